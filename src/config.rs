// Site configuration module.
// Repository coordinates, content locations and UI policies, loaded from JSON with a default for every field.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL;
use crate::error::{GuideError, Result};
use crate::state::AccordionPolicy;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// GitHub repositories the site reads from
    pub github: GitHubConfig,
    /// Where the static guide content lives
    pub content: ContentConfig,
    /// Troubleshooting page settings
    pub troubleshooting: TroubleshootingConfig,
    /// Maximum number of releases shown on the changelog
    pub changelog_limit: usize,
    /// Seconds an API response stays cached
    pub cache_ttl_secs: u64,
}

/// GitHub repository coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_base: String,
    /// Owner of the macro repository (releases)
    pub macro_owner: String,
    /// Name of the macro repository
    pub macro_repo: String,
    /// Owner of the website repository (fix issues)
    pub site_owner: String,
    /// Name of the website repository
    pub site_repo: String,
}

/// Static content location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Local directory or http(s) base URL holding `data/` and markdown files
    pub root: String,
    /// Section descriptor document, relative to `root`
    pub sections_path: String,
    /// Markdown files fetched at once while building the guide
    pub fetch_concurrency: usize,
}

/// Troubleshooting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TroubleshootingConfig {
    /// Only issues carrying this label are listed (empty = no label filter)
    pub required_label: String,
    /// Body text pre-filled on the "Submit Fix" issue form
    pub submit_fix_body: String,
    /// Whether fix bodies open independently or one at a time
    pub accordion: AccordionPolicy,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            content: ContentConfig::default(),
            troubleshooting: TroubleshootingConfig::default(),
            changelog_limit: 15,
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            macro_owner: "nosyliam".to_string(),
            macro_repo: "revolution-macro".to_string(),
            site_owner: "AlgesGT".to_string(),
            site_repo: "revolutionmacroguide".to_string(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            sections_path: "data/guide-sections.json".to_string(),
            fetch_concurrency: 4,
        }
    }
}

impl Default for TroubleshootingConfig {
    fn default() -> Self {
        Self {
            required_label: "approved".to_string(),
            submit_fix_body: "Explain clearly how you solved the issue".to_string(),
            accordion: AccordionPolicy::default(),
        }
    }
}

impl GitHubConfig {
    /// Browser URL of the website repository.
    pub fn site_repo_url(&self) -> String {
        format!("https://github.com/{}/{}", self.site_owner, self.site_repo)
    }

    /// Browser URL of the latest macro release.
    pub fn latest_release_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/releases/latest",
            self.macro_owner, self.macro_repo
        )
    }
}

impl SiteConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "revoguide").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from an explicit path, else the default location, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| GuideError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.content.fetch_concurrency == 0 {
            return Err(GuideError::Config(
                "content.fetch_concurrency must be at least 1".to_string(),
            ));
        }
        if self.changelog_limit == 0 {
            return Err(GuideError::Config(
                "changelog_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
