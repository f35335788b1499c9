// Guide section descriptors.
// Parses `guide-sections.json` and enforces unique section ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};

/// One markdown document in the guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSection {
    /// Anchor id and quick-jump key.
    pub id: String,
    /// Markdown path relative to the site root.
    pub file: String,
    #[serde(rename = "titleEn", default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

impl GuideSection {
    pub fn title(&self) -> &str {
        self.title_en
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(&self.id)
    }
}

/// Heading inside a section, listed for navigation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "titleEn", default)]
    pub title_en: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SectionsDocument {
    #[serde(default)]
    sections: Vec<GuideSection>,
}

/// Parse the descriptor document at `path`.
pub fn parse_sections(path: &str, json: &str) -> Result<Vec<GuideSection>> {
    let document: SectionsDocument =
        serde_json::from_str(json).map_err(|e| GuideError::Malformed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    let mut seen = HashSet::new();
    for section in &document.sections {
        if !seen.insert(section.id.as_str()) {
            return Err(GuideError::Malformed {
                path: path.to_string(),
                reason: format!("duplicate section id `{}`", section.id),
            });
        }
    }

    Ok(document.sections)
}
