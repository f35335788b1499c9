// Headless shell.
// Keeps the document as a string and records scrolls and storage, for the CLI and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use maud::{Markup, html};

use crate::error::{GuideError, Result};

use super::{APP_REGION, DRAWER_REGION, Shell};

/// Static page chrome around the app region.
fn chrome() -> Markup {
    html! {
        header.site-header {
            nav.site-nav {
                a.nav-link href="#/guide" { "Guide" }
                a.nav-link href="#/troubleshooting" { "Troubleshooting" }
                a.nav-link href="#/changelog" { "Changelog" }
            }
        }
        aside.drawer id="drawer" {
            div.drawer-title { "Quick Jump" }
            nav.guide-nav id=(DRAWER_REGION) {}
        }
        main id=(APP_REGION) {}
    }
}

#[derive(Debug, Default)]
struct Inner {
    document: String,
    fragment: String,
    storage: HashMap<String, String>,
    active_nav: Option<String>,
    header_height: Option<f64>,
    scrolls: Vec<(String, u32)>,
}

/// In-memory `Shell` implementation.
#[derive(Debug)]
pub struct MemoryShell {
    inner: Mutex<Inner>,
}

impl MemoryShell {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                document: chrome().into_string(),
                ..Inner::default()
            }),
        }
    }

    pub fn with_fragment(self, fragment: &str) -> Self {
        self.lock().fragment = fragment.to_string();
        self
    }

    pub fn with_header_height(self, height: f64) -> Self {
        self.lock().header_height = Some(height);
        self
    }

    /// Full document markup.
    pub fn document(&self) -> String {
        self.lock().document.clone()
    }

    /// Inner markup of the element with `id`.
    pub fn region(&self, id: &str) -> Option<String> {
        let inner = self.lock();
        find_element(&inner.document, id).map(|(start, end)| inner.document[start..end].to_string())
    }

    pub fn active_nav(&self) -> Option<String> {
        self.lock().active_nav.clone()
    }

    /// Every scroll performed, oldest first.
    pub fn scrolls(&self) -> Vec<(String, u32)> {
        self.lock().scrolls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for MemoryShell {
    fn fragment(&self) -> String {
        self.lock().fragment.clone()
    }

    fn set_fragment(&self, fragment: &str) {
        self.lock().fragment = fragment.to_string();
    }

    fn set_region(&self, id: &str, html: Markup) -> Result<()> {
        let mut inner = self.lock();
        let (start, end) = find_element(&inner.document, id)
            .ok_or_else(|| GuideError::MissingRegion(id.to_string()))?;
        inner.document.replace_range(start..end, &html.into_string());
        Ok(())
    }

    fn set_active_nav(&self, href: Option<&str>) {
        self.lock().active_nav = href.map(str::to_string);
    }

    fn header_height(&self) -> Option<f64> {
        self.lock().header_height
    }

    fn scroll_to(&self, id: &str, offset_px: u32) -> bool {
        let mut inner = self.lock();
        if find_element(&inner.document, id).is_none() {
            return false;
        }
        inner.scrolls.push((id.to_string(), offset_px));
        true
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.lock().storage.get(key).cloned()
    }

    fn storage_set(&self, key: &str, value: &str) -> bool {
        self.lock()
            .storage
            .insert(key.to_string(), value.to_string());
        true
    }

    fn storage_remove(&self, key: &str) {
        self.lock().storage.remove(key);
    }
}

/// Byte range of the inner markup of the element carrying `id="{id}"`.
///
/// Works on markup this crate produces: attribute values and text are
/// escaped, so a literal `id="..."` only appears as a real attribute.
fn find_element(doc: &str, id: &str) -> Option<(usize, usize)> {
    let needle = format!(r#"id="{}""#, id);
    let mut from = 0;

    while let Some(pos) = doc[from..].find(&needle) {
        let at = from + pos;
        // skip data-id="..." and similar
        let standalone = doc[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_whitespace());

        if standalone {
            let open = doc[..at].rfind('<')?;
            let tag: String = doc[open + 1..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect();
            let inner_start = at + doc[at..].find('>')? + 1;
            let inner_end = closing_tag(doc, inner_start, &tag)?;
            return Some((inner_start, inner_end));
        }
        from = at + needle.len();
    }
    None
}

fn closing_tag(doc: &str, start: usize, tag: &str) -> Option<usize> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut depth = 1;
    let mut i = start;

    loop {
        let next_close = i + doc[i..].find(&close)?;
        match doc[i..].find(&open).map(|p| p + i) {
            Some(o) if o < next_close => {
                let boundary = doc[o + open.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/');
                if boundary {
                    depth += 1;
                }
                i = o + open.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                i = next_close + close.len();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use maud::PreEscaped;

    use super::*;

    fn markup(raw: &str) -> Markup {
        PreEscaped(raw.to_string())
    }

    #[test]
    fn test_set_region_replaces_inner_markup() {
        let shell = MemoryShell::new();
        shell
            .set_region("app", markup(r#"<div id="fixList"><div>a</div></div><p>tail</p>"#))
            .unwrap();
        shell.set_region("fixList", html! { span { "b" } }).unwrap();

        assert_eq!(
            shell.region("app").unwrap(),
            r#"<div id="fixList"><span>b</span></div><p>tail</p>"#
        );
        assert!(shell.document().ends_with("</main>"));
    }

    #[test]
    fn test_data_id_is_not_an_id() {
        let shell = MemoryShell::new();
        shell
            .set_region("app", markup(r#"<button data-id="x">b</button><div id="x">body</div>"#))
            .unwrap();
        assert_eq!(shell.region("x").unwrap(), "body");
    }

    #[test]
    fn test_missing_region_is_an_error() {
        let shell = MemoryShell::new();
        assert!(matches!(
            shell.set_region("nope", html! { "x" }),
            Err(GuideError::MissingRegion(_))
        ));
    }

    #[test]
    fn test_scroll_requires_element() {
        let shell = MemoryShell::new();
        assert!(!shell.scroll_to("tools-tab", 94));
        shell
            .set_region("app", html! { section.guide-section id="tools-tab" {} })
            .unwrap();
        assert!(shell.scroll_to("tools-tab", 94));
        assert_eq!(shell.scrolls(), vec![("tools-tab".to_string(), 94)]);
    }
}
