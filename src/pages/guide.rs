// Guide page.
// Concatenates every section's markdown into one scrollable document and fills the quick-jump drawer.

use futures::stream::{self, StreamExt};
use maud::{Markup, html};
use tracing::{error, warn};

use crate::content::GuideSection;
use crate::error::Result;
use crate::html::{empty_state, load_failed, loading};
use crate::markdown::{self, RenderOptions};
use crate::router::View;
use crate::shell::{APP_REGION, DRAWER_REGION, Shell};
use crate::state::quick_jump::{consume_pending_scroll, header_offset, quick_jump_entries};

use super::{Pages, hero, page_shell};

/// Region holding the concatenated sections.
pub const GUIDE_ROOT: &str = "guideRoot";

pub async fn render(pages: &Pages, view: &View<'_>) -> Result<()> {
    view.commit(APP_REGION, skeleton(pages))?;

    let sections = match pages.guide_sections().await {
        Ok(sections) => sections,
        Err(e) => {
            error!(error = %e, "could not load guide sections");
            let message = load_failed(&pages.config().content.sections_path);
            view.commit(GUIDE_ROOT, empty_state("⚠️", message))?;
            return Ok(());
        }
    };

    let body = render_sections(pages, &sections).await;
    if !view.commit(GUIDE_ROOT, body)? {
        // A newer navigation owns the page and will handle any pending scroll.
        return Ok(());
    }
    view.commit(DRAWER_REGION, drawer_html(&sections))?;

    if let Some(target) = consume_pending_scroll(view.shell()) {
        if !scroll_to_section(view.shell(), &target) {
            warn!(target, "quick jump target not found in guide");
        }
    }
    Ok(())
}

/// Render all sections in declaration order. Files are fetched concurrently;
/// one failing file only replaces its own section with a placeholder.
pub async fn render_sections(pages: &Pages, sections: &[GuideSection]) -> Markup {
    if sections.is_empty() {
        return empty_state("📄", "No guide sections found.");
    }

    let content = pages.content();
    let concurrency = pages.config().content.fetch_concurrency.max(1);

    let rendered: Vec<Markup> = stream::iter(sections)
        .map(|section| async move { (section, content.fetch_text(&section.file).await) })
        .buffered(concurrency)
        .map(|(section, fetched)| match fetched {
            Ok(md) => section_html(section, markdown::render(&md, RenderOptions::default())),
            Err(e) => {
                error!(file = %section.file, error = %e, "could not load guide section");
                section_html(section, empty_state("⚠️", load_failed(&section.file)))
            }
        })
        .collect()
        .await;

    html! {
        @for part in rendered { (part) }
    }
}

fn section_html(section: &GuideSection, inner: Markup) -> Markup {
    html! {
        section.guide-section id=(section.id) { (inner) }
    }
}

/// Quick-jump buttons for the drawer, numbered from 1.
pub fn drawer_html(sections: &[GuideSection]) -> Markup {
    html! {
        @for (idx, section) in quick_jump_entries(sections).into_iter().enumerate() {
            button.guide-link type="button" data-jump-id=(section.id) {
                span.guide-index { (idx + 1) }
                span.guide-text { (section.title()) }
            }
        }
    }
}

/// Fill the drawer outside of any navigation (startup preload).
pub fn render_drawer(shell: &dyn Shell, sections: &[GuideSection]) -> Result<()> {
    shell.set_region(DRAWER_REGION, drawer_html(sections))
}

/// Scroll to a section, leaving room for the sticky header.
pub fn scroll_to_section(shell: &dyn Shell, id: &str) -> bool {
    shell.scroll_to(id, header_offset(shell.header_height()))
}

fn skeleton(pages: &Pages) -> Markup {
    let actions = html! {
        a.btn.btn-primary target="_blank" rel="noopener noreferrer"
            href=(pages.config().github.latest_release_url()) { "Download macro" }
        a.btn.btn-ghost href="#/troubleshooting" { "View troubleshooting" }
    };
    page_shell(html! {
        (hero(
            "GUIDE",
            "Revolution Macro, clearly explained.",
            "Install, configure, and optimize the macro without guesswork.",
            Some(actions),
        ))
        div.surface.guide-grid.single {
            div.prose id=(GUIDE_ROOT) { (loading()) }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, title: Option<&str>) -> GuideSection {
        GuideSection {
            id: id.to_string(),
            file: format!("content/{}.md", id),
            title_en: title.map(str::to_string),
            subsections: Vec::new(),
        }
    }

    #[test]
    fn test_drawer_lists_allow_list_only() {
        let sections = vec![
            section("intro", Some("Intro")),
            section("tools-tab", Some("Tools <beta>")),
            section("gather-tab", None),
        ];
        let html = drawer_html(&sections).into_string();

        assert!(!html.contains("intro"));
        let gather = html.find(r#"data-jump-id="gather-tab""#).unwrap();
        let tools = html.find(r#"data-jump-id="tools-tab""#).unwrap();
        assert!(gather < tools);
        assert!(html.contains(r#"<span class="guide-index">2</span><span class="guide-text">Tools &lt;beta&gt;</span>"#));
        assert!(html.contains(r#"<span class="guide-text">gather-tab</span>"#));
    }

    #[test]
    fn test_section_ids_are_escaped() {
        let html = section_html(&section(r#"a"b"#, None), html! { "x" }).into_string();
        assert!(html.contains(r#"id="a&quot;b""#));
        assert!(html.ends_with(">x</section>"));
    }
}
