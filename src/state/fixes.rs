// Troubleshooting fix items.
// Converts approved GitHub issues into categorised, searchable fix entries.

use maud::Markup;
use serde::{Deserialize, Serialize};

use crate::github::Issue;
use crate::markdown::{self, RenderOptions};

/// Closed set of fix categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Windows,
    Mac,
    Macro,
    Pro,
    General,
}

impl Category {
    /// Chip order on the troubleshooting page.
    pub const ALL: [Category; 5] = [
        Category::Windows,
        Category::Mac,
        Category::Macro,
        Category::Pro,
        Category::General,
    ];

    /// Map one lower-cased label to a category.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "windows" => Some(Category::Windows),
            "mac" | "macos" => Some(Category::Mac),
            "macro" => Some(Category::Macro),
            "pro" => Some(Category::Pro),
            _ => None,
        }
    }

    /// Value used in `data-cat` attributes and CLI flags.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Windows => "windows",
            Category::Mac => "mac",
            Category::Macro => "macro",
            Category::Pro => "pro",
            Category::General => "general",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Category::Windows => "Windows",
            Category::Mac => "macOS",
            Category::Macro => "Macro",
            Category::Pro => "Pro",
            Category::General => "General",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// One approved fix, derived from a GitHub issue.
#[derive(Debug, Clone)]
pub struct FixItem {
    pub id: String,
    pub number: u64,
    pub title: String,
    /// Trimmed markdown source, used for search.
    pub body: String,
    /// Rendered and sanitized body.
    pub body_html: Markup,
    pub html_url: String,
    /// Lower-cased label names.
    pub labels: Vec<String>,
    /// Primary category, shown as the badge.
    pub category: Category,
    /// Every category any label maps to (`General` when none do).
    pub categories: Vec<Category>,
}

impl FixItem {
    pub fn from_issue(issue: &Issue) -> Self {
        let labels: Vec<String> = issue
            .labels
            .iter()
            .map(|label| label.name.to_lowercase())
            .collect();

        // Primary category follows a fixed priority, not label order.
        let mut categories: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|category| {
                labels
                    .iter()
                    .any(|label| Category::from_label(label) == Some(*category))
            })
            .collect();
        if categories.is_empty() {
            categories.push(Category::General);
        }

        let body = issue.body.as_deref().unwrap_or("").trim().to_string();
        let body_html = markdown::render(&body, RenderOptions { breaks: true });

        Self {
            id: issue.id.to_string(),
            number: issue.number,
            title: issue.title.clone(),
            body,
            body_html,
            html_url: issue.html_url.clone(),
            labels,
            category: categories[0],
            categories,
        }
    }

    pub fn in_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Case-insensitive substring match on title, body, and label names.
    /// `needle` must already be lower-cased.
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.body.to_lowercase().contains(needle)
            || self.labels.iter().any(|label| label.contains(needle))
    }
}

/// Build fix items from an issues listing, dropping pull requests.
pub fn normalize_issues(issues: &[Issue]) -> Vec<FixItem> {
    issues
        .iter()
        .filter(|issue| !issue.is_pull_request())
        .map(FixItem::from_issue)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::github::{Label, PullRequestMarker};

    pub(crate) fn issue(id: u64, title: &str, body: &str, labels: &[&str]) -> Issue {
        Issue {
            id,
            number: id + 100,
            title: title.to_string(),
            body: Some(body.to_string()),
            html_url: format!("https://github.com/o/r/issues/{}", id + 100),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: name.to_string(),
                    color: None,
                })
                .collect(),
            pull_request: None,
            created_at: None,
        }
    }

    #[test]
    fn test_category_priority_and_fallback() {
        let item = FixItem::from_issue(&issue(1, "t", "b", &["approved", "Pro", "Windows"]));
        assert_eq!(item.category, Category::Windows);
        assert_eq!(item.categories, vec![Category::Windows, Category::Pro]);

        let item = FixItem::from_issue(&issue(2, "t", "b", &["approved", "MacOS"]));
        assert_eq!(item.category, Category::Mac);

        let item = FixItem::from_issue(&issue(3, "t", "b", &["approved"]));
        assert_eq!(item.category, Category::General);
        assert!(item.in_category(Category::General));
        assert!(!item.in_category(Category::Windows));
    }

    #[test]
    fn test_pull_requests_excluded() {
        let mut pr = issue(2, "pr", "", &[]);
        pr.pull_request = Some(PullRequestMarker::default());
        let items = normalize_issues(&[issue(1, "fix", "", &[]), pr]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
    }

    #[test]
    fn test_text_match() {
        let item = FixItem::from_issue(&issue(1, "Hive Not Found", "Reset the **camera**", &["mac"]));
        assert!(item.matches_text(""));
        assert!(item.matches_text("hive not"));
        assert!(item.matches_text("camera"));
        assert!(item.matches_text("mac"));
        assert!(!item.matches_text("windows"));
    }

    #[test]
    fn test_body_rendered_with_breaks() {
        let item = FixItem::from_issue(&issue(1, "t", "  step one\nstep two  ", &[]));
        assert_eq!(item.body, "step one\nstep two");
        assert!(item.body_html.0.contains("<br />"));
    }
}
