// Troubleshooting board state.
// The loaded fix list plus the filter and accordion state the page re-renders from.

use super::accordion::{AccordionPolicy, AccordionState};
use super::filter::{CategoryFilter, FixFilter};
use super::fixes::FixItem;

/// Outcome of loading the fix list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSource {
    Loaded,
    /// The issues request failed; the board is empty.
    Unavailable,
}

/// Interactive state behind the troubleshooting page.
#[derive(Debug, Clone)]
pub struct FixBoard {
    items: Vec<FixItem>,
    source: BoardSource,
    pub filter: FixFilter,
    pub accordion: AccordionState,
}

impl FixBoard {
    pub fn new(items: Vec<FixItem>, policy: AccordionPolicy) -> Self {
        Self {
            items,
            source: BoardSource::Loaded,
            filter: FixFilter::default(),
            accordion: AccordionState::new(policy),
        }
    }

    pub fn unavailable(policy: AccordionPolicy) -> Self {
        Self {
            source: BoardSource::Unavailable,
            ..Self::new(Vec::new(), policy)
        }
    }

    pub fn source(&self) -> BoardSource {
        self.source
    }

    pub fn items(&self) -> &[FixItem] {
        &self.items
    }

    pub fn visible(&self) -> Vec<&FixItem> {
        self.filter.apply(&self.items)
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    /// Toggle a fix body. Unknown ids are ignored and report `None`.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if !self.items.iter().any(|item| item.id == id) {
            return None;
        }
        Some(self.accordion.toggle(id))
    }
}
