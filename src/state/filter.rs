// Troubleshooting filter state.
// A single-select category chip combined (AND) with a free-text search.

use super::fixes::{Category, FixItem};

/// Active category chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a chip key (`all`, `windows`, `mac`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        if key == "all" {
            Some(CategoryFilter::All)
        } else {
            Category::from_key(key).map(CategoryFilter::Only)
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.badge(),
        }
    }

    pub fn admits(&self, item: &FixItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.in_category(*category),
        }
    }
}

/// Combined filter over the loaded fix list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixFilter {
    pub category: CategoryFilter,
    /// Raw search box contents.
    pub query: String,
}

impl FixFilter {
    /// Trimmed, lower-cased search term.
    pub fn needle(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Items passing both the category and the search term, in list order.
    pub fn apply<'a>(&self, items: &'a [FixItem]) -> Vec<&'a FixItem> {
        let needle = self.needle();
        items
            .iter()
            .filter(|item| self.category.admits(item) && item.matches_text(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixes::FixItem;
    use crate::state::fixes::tests::issue;

    fn items() -> Vec<FixItem> {
        [
            issue(1, "Hive crash on startup", "Reinstall", &["windows"]),
            issue(2, "Camera drifts", "Reset camera", &["mac"]),
            issue(3, "Windows camera zoom", "Zoom out fully", &["windows", "macro"]),
            issue(4, "Pro license", "Relog", &[]),
        ]
        .iter()
        .map(FixItem::from_issue)
        .collect()
    }

    fn ids(visible: Vec<&FixItem>) -> Vec<&str> {
        visible.into_iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_all_category_shows_everything() {
        let items = items();
        assert_eq!(ids(FixFilter::default().apply(&items)), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_category_only() {
        let items = items();
        let filter = FixFilter {
            category: CategoryFilter::Only(Category::Windows),
            query: String::new(),
        };
        assert_eq!(ids(filter.apply(&items)), ["1", "3"]);

        let filter = FixFilter {
            category: CategoryFilter::Only(Category::Macro),
            query: String::new(),
        };
        assert_eq!(ids(filter.apply(&items)), ["3"]);

        let filter = FixFilter {
            category: CategoryFilter::Only(Category::General),
            query: String::new(),
        };
        assert_eq!(ids(filter.apply(&items)), ["4"]);
    }

    #[test]
    fn test_search_only_is_case_insensitive() {
        let items = items();
        let filter = FixFilter {
            category: CategoryFilter::All,
            query: "  CAMERA ".to_string(),
        };
        assert_eq!(ids(filter.apply(&items)), ["2", "3"]);
    }

    #[test]
    fn test_category_and_search_combine_with_and() {
        let items = items();
        let filter = FixFilter {
            category: CategoryFilter::Only(Category::Mac),
            query: "camera".to_string(),
        };
        assert_eq!(ids(filter.apply(&items)), ["2"]);

        let filter = FixFilter {
            category: CategoryFilter::Only(Category::Pro),
            query: "camera".to_string(),
        };
        assert!(filter.apply(&items).is_empty());
    }
}
