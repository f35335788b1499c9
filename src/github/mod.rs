// GitHub API module.
// Provides the cached client, transport, and types for the releases and issues listings.

pub mod client;
pub mod endpoints;
pub mod transport;
pub mod types;

pub use client::{CachePolicy, GitHubClient};
pub use endpoints::{open_issues_url, submit_fix_url};
pub use transport::{HttpTransport, Transport};
pub use types::*;
