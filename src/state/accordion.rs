// Accordion expansion state for the fix list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How opening one item affects the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccordionPolicy {
    /// Items toggle independently.
    #[default]
    Multi,
    /// Opening an item closes every other item.
    Single,
}

/// Set of expanded item ids under a policy.
#[derive(Debug, Clone, Default)]
pub struct AccordionState {
    policy: AccordionPolicy,
    open: BTreeSet<String>,
}

impl AccordionState {
    pub fn new(policy: AccordionPolicy) -> Self {
        Self {
            policy,
            open: BTreeSet::new(),
        }
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    /// Flip one item. Returns whether it is now open.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.open.remove(id) {
            return false;
        }
        if self.policy == AccordionPolicy::Single {
            self.open.clear();
        }
        self.open.insert(id.to_string());
        true
    }
}
