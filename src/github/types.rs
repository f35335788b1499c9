// GitHub API response types.
// Defines structs for deserializing the releases and issues listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue label. Only the name matters for categorisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}

/// GitHub issue from the issues listing.
///
/// The listing also returns pull requests; those carry a `pull_request` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub pull_request: Option<PullRequestMarker>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Marker present on pull requests returned by the issues listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestMarker {
    pub url: Option<String>,
    pub html_url: Option<String>,
}

/// GitHub release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,
    pub name: Option<String>,
    #[serde(default)]
    pub tag_name: String,
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Display title: name, else tag, else a generic label.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| Some(self.tag_name.as_str()).filter(|tag| !tag.is_empty()))
            .unwrap_or("Release")
    }
}

/// Downloadable file attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    pub browser_download_url: String,
    #[serde(default)]
    pub download_count: u64,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
