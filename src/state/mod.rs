// State management module.
// Fix list filtering, accordion expansion, and quick-jump scroll targets.

pub mod accordion;
pub mod board;
pub mod filter;
pub mod fixes;
pub mod quick_jump;

pub use accordion::{AccordionPolicy, AccordionState};
pub use board::{BoardSource, FixBoard};
pub use filter::{CategoryFilter, FixFilter};
pub use fixes::{Category, FixItem, normalize_issues};
pub use quick_jump::{QUICK_JUMP_IDS, header_offset, quick_jump_entries};
