// Static content loading.
// Reads the section list and markdown files from a local directory or an http(s) base URL.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use url::Url;

use crate::error::{GuideError, Result};
use crate::github::Transport;

/// Where static files are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteRoot {
    Dir(PathBuf),
    Remote(Url),
}

impl SiteRoot {
    /// `http://` and `https://` roots are remote, anything else is a directory.
    pub fn parse(root: &str) -> Result<Self> {
        if root.starts_with("http://") || root.starts_with("https://") {
            let mut url = Url::parse(root)?;
            // Url::join replaces the last segment unless the path ends in '/'
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Self::Remote(url))
        } else {
            Ok(Self::Dir(PathBuf::from(root)))
        }
    }
}

/// Reader for files relative to the site root. Never cached.
pub struct ContentSource {
    root: SiteRoot,
    transport: Arc<dyn Transport>,
}

impl ContentSource {
    pub fn new(root: SiteRoot, transport: Arc<dyn Transport>) -> Self {
        Self { root, transport }
    }

    pub async fn fetch_text(&self, path: &str) -> Result<String> {
        match &self.root {
            SiteRoot::Dir(dir) => {
                let relative = relative_path(path)?;
                Ok(tokio::fs::read_to_string(dir.join(relative)).await?)
            }
            SiteRoot::Remote(base) => {
                relative_path(path)?;
                let url = base.join(path)?;
                if !url.as_str().starts_with(base.as_str()) {
                    return Err(outside_root(path));
                }
                self.transport.get_text(url.as_str()).await
            }
        }
    }

}

/// Content paths must stay under the root: no parent or absolute
/// components, no scheme, no `//host` network paths.
fn relative_path(path: &str) -> Result<&Path> {
    let candidate = Path::new(path);
    let escapes = candidate
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    let network = path.starts_with("//") || path.starts_with('\\');
    // `https:` or `C:` in the first segment
    let scheme = path
        .split(['/', '\\'])
        .next()
        .is_some_and(|segment| segment.contains(':'));

    if path.is_empty() || escapes || network || scheme {
        return Err(outside_root(path));
    }
    Ok(candidate)
}

fn outside_root(path: &str) -> GuideError {
    GuideError::Malformed {
        path: path.to_string(),
        reason: "content paths must be relative and stay under the site root".to_string(),
    }
}
