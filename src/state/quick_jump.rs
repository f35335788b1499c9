// Quick-jump navigation state.
// The fixed drawer allow-list and the one-shot pending scroll target kept in session storage.

use crate::content::GuideSection;
use crate::shell::Shell;

/// Drawer entries, in display order. Other sections are never listed.
pub const QUICK_JUMP_IDS: [&str; 6] = [
    "gather-tab",
    "collect-tab",
    "planters-tab",
    "status-tab",
    "tools-tab",
    "settings-tab",
];

/// Session storage key for a scroll target carried across a route change.
pub const PENDING_SCROLL_KEY: &str = "revoguide.pending-scroll";

/// Header height assumed when the shell cannot measure it.
pub const DEFAULT_HEADER_HEIGHT: f64 = 84.0;

/// Gap left between the sticky header and the target heading.
pub const HEADER_GAP: f64 = 10.0;

/// Sections present in the allow-list, in allow-list order.
pub fn quick_jump_entries(sections: &[GuideSection]) -> Vec<&GuideSection> {
    QUICK_JUMP_IDS
        .iter()
        .filter_map(|id| sections.iter().find(|section| section.id == *id))
        .collect()
}

/// Scroll offset that keeps a heading clear of the sticky header.
pub fn header_offset(header_height: Option<f64>) -> u32 {
    let height = header_height
        .filter(|h| h.is_finite() && *h >= 0.0)
        .unwrap_or(DEFAULT_HEADER_HEIGHT);
    (height + HEADER_GAP).round() as u32
}

/// Remember a target for the next completed guide render.
pub fn set_pending_scroll(shell: &dyn Shell, id: &str) -> bool {
    shell.storage_set(PENDING_SCROLL_KEY, id)
}

/// Take the pending target, if any. A second call returns `None`.
pub fn consume_pending_scroll(shell: &dyn Shell) -> Option<String> {
    let id = shell.storage_get(PENDING_SCROLL_KEY)?;
    shell.storage_remove(PENDING_SCROLL_KEY);
    Some(id).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MemoryShell;

    fn section(id: &str) -> GuideSection {
        GuideSection {
            id: id.to_string(),
            file: format!("content/{}.md", id),
            title_en: None,
            subsections: Vec::new(),
        }
    }

    #[test]
    fn test_entries_follow_allow_list_order() {
        let sections: Vec<GuideSection> = [
            "intro",
            "settings-tab",
            "gather-tab",
            "faq",
            "tools-tab",
        ]
        .into_iter()
        .map(section)
        .collect();

        let ids: Vec<&str> = quick_jump_entries(&sections)
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["gather-tab", "tools-tab", "settings-tab"]);
    }

    #[test]
    fn test_header_offset() {
        assert_eq!(header_offset(None), 94);
        assert_eq!(header_offset(Some(64.4)), 74);
        assert_eq!(header_offset(Some(f64::NAN)), 94);
    }

    #[test]
    fn test_pending_scroll_consumed_once() {
        let shell = MemoryShell::new();
        assert!(consume_pending_scroll(&shell).is_none());

        assert!(set_pending_scroll(&shell, "tools-tab"));
        assert_eq!(consume_pending_scroll(&shell).as_deref(), Some("tools-tab"));
        assert!(consume_pending_scroll(&shell).is_none());
    }
}
