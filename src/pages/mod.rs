// Page renderers.
// Each page fetches what it needs and commits `maud` markup through a `View`.

pub mod changelog;
pub mod guide;
pub mod not_found;
pub mod troubleshooting;

use std::sync::{Arc, Mutex};

use maud::{Markup, html};
use tracing::debug;

use crate::config::SiteConfig;
use crate::content::{ContentSource, GuideSection, parse_sections};
use crate::error::Result;
use crate::github::GitHubClient;

/// Shared dependencies of every page.
pub struct Pages {
    config: SiteConfig,
    github: GitHubClient,
    content: ContentSource,
    sections: Mutex<Option<Arc<Vec<GuideSection>>>>,
}

impl Pages {
    pub fn new(config: SiteConfig, github: GitHubClient, content: ContentSource) -> Self {
        Self {
            config,
            github,
            content,
            sections: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn github(&self) -> &GitHubClient {
        &self.github
    }

    pub fn content(&self) -> &ContentSource {
        &self.content
    }

    /// Section descriptors, loaded once and then reused. Failures are not
    /// remembered, so the next render tries again.
    pub async fn guide_sections(&self) -> Result<Arc<Vec<GuideSection>>> {
        if let Some(sections) = self.cached_sections() {
            return Ok(sections);
        }

        let path = &self.config.content.sections_path;
        let json = self.content.fetch_text(path).await?;
        let sections = Arc::new(parse_sections(path, &json)?);
        debug!(count = sections.len(), "loaded guide sections");

        *self.sections.lock().unwrap_or_else(|e| e.into_inner()) = Some(sections.clone());
        Ok(sections)
    }

    fn cached_sections(&self) -> Option<Arc<Vec<GuideSection>>> {
        self.sections
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Hero block shared by the pages.
pub(crate) fn hero(eyebrow: &str, title: &str, lead: &str, actions: Option<Markup>) -> Markup {
    html! {
        div.page-hero {
            div.eyebrow { (eyebrow) }
            h1 { (title) }
            p.lead { (lead) }
            @if let Some(actions) = actions {
                div.hero-actions { (actions) }
            }
        }
    }
}

/// Outer page container every page renders inside.
pub(crate) fn page_shell(content: Markup) -> Markup {
    html! {
        section.container.page-shell.page-enter { (content) }
    }
}
