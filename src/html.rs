// Shared markup components.
// Loading spinner and empty-state cards used by every page, built with `maud` so text is always escaped.

use maud::{Markup, Render, html};

/// Spinner placeholder shown while a region loads.
pub fn loading() -> Markup {
    html! {
        div.loading { div.spinner {} }
    }
}

/// Empty-state card.
pub fn empty_state(icon: &str, message: impl Render) -> Markup {
    html! {
        div.empty-state {
            div.empty-icon { (icon) }
            div { (message) }
        }
    }
}

/// `Could not load <code>{path}</code>.`
pub fn load_failed(path: &str) -> Markup {
    html! { "Could not load " code { (path) } "." }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_escapes_text() {
        let card = empty_state("⚠️", r#"<img src=x onerror="alert(1)">"#).into_string();
        assert!(card.contains("&lt;img src=x onerror=&quot;alert(1)&quot;&gt;"));
        assert!(!card.contains("<img"));
        assert!(card.contains("⚠️"));
    }

    #[test]
    fn test_load_failed_marks_up_path() {
        let card = empty_state("⚠️", load_failed("content/<x>.md")).into_string();
        assert!(card.contains("Could not load <code>content/&lt;x&gt;.md</code>."));
    }
}
