// Revolution Macro documentation site.
// Hash-routed guide, troubleshooting fixes, and changelog rendered into a host shell.

pub mod app;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod github;
pub mod html;
pub mod markdown;
pub mod pages;
pub mod router;
pub mod shell;
pub mod state;

#[cfg(test)]
mod testutil;

pub use app::{App, QuickJump};
pub use config::SiteConfig;
pub use error::{GuideError, Result};
pub use router::Route;
pub use shell::{MemoryShell, Shell};
