// Static site content.
// Section descriptors and the markdown files they point at.

pub mod sections;
pub mod source;

pub use sections::{GuideSection, Subsection, parse_sections};
pub use source::{ContentSource, SiteRoot};
