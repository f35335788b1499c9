// Markdown rendering module.
// GitHub-flavoured markdown to sanitized markup: raw HTML is escaped and script link targets become `#`.

use maud::{Markup, PreEscaped};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Treat single newlines as line breaks (issue bodies are written that way).
    pub breaks: bool,
}

const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Render markdown to safe markup.
pub fn render(markdown: &str, options: RenderOptions) -> Markup {
    let mut extensions = Options::empty();
    extensions.insert(Options::ENABLE_TABLES);
    extensions.insert(Options::ENABLE_STRIKETHROUGH);
    extensions.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(markdown, extensions).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::SoftBreak if options.breaks => Event::HardBreak,
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: neutralize(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: neutralize(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);

    // Wide tables scroll horizontally inside a wrapper.
    PreEscaped(
        out.replace("<table>", r#"<div class="table-wrap"><table>"#)
            .replace("</table>", "</table></div>"),
    )
}

fn neutralize(url: CowStr<'_>) -> CowStr<'_> {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if BLOCKED_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme)) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let out = render("# Gather\n\nUse **fields**.", RenderOptions::default()).into_string();
        assert!(out.contains("<h1>Gather</h1>"));
        assert!(out.contains("<strong>fields</strong>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = render(
            "hello <script>alert(1)</script>\n\n<div onclick=\"x()\">hi</div>",
            RenderOptions::default(),
        )
        .into_string();
        assert!(!out.contains("<script>"));
        assert!(!out.contains("<div onclick"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_neutralized() {
        let out = render(
            "[click](javascript:alert(1)) [ok](https://example.com)",
            RenderOptions::default(),
        )
        .into_string();
        assert!(out.contains(r##"<a href="#">click</a>"##));
        assert!(out.contains(r#"<a href="https://example.com">ok</a>"#));
    }

    #[test]
    fn test_tables_are_wrapped() {
        let out = render("| a | b |\n|---|---|\n| 1 | 2 |\n", RenderOptions::default()).into_string();
        assert!(out.contains(r#"<div class="table-wrap"><table>"#));
        assert!(out.contains("</table></div>"));
    }

    #[test]
    fn test_breaks_option() {
        let soft = render("line one\nline two", RenderOptions::default()).into_string();
        assert!(!soft.contains("<br />"));

        let hard = render("line one\nline two", RenderOptions { breaks: true }).into_string();
        assert!(hard.contains("<br />"));
    }
}
