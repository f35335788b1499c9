// Changelog page.
// Lists macro releases with their notes and downloadable assets.

use chrono::{DateTime, Utc};
use maud::{Markup, html};

use crate::error::Result;
use crate::github::{Release, ReleaseAsset};
use crate::html::{empty_state, loading};
use crate::markdown::{self, RenderOptions};
use crate::router::View;
use crate::shell::APP_REGION;

use super::{Pages, hero, page_shell};

/// Region holding the release cards.
pub const RELEASE_LIST: &str = "releaseList";

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

pub async fn render(pages: &Pages, view: &View<'_>) -> Result<()> {
    view.commit(APP_REGION, skeleton())?;

    let config = pages.config();
    let limit = config.changelog_limit;
    let releases = pages
        .github()
        .get_releases(&config.github.macro_owner, &config.github.macro_repo, limit)
        .await;

    view.commit(RELEASE_LIST, list_html(releases.as_deref(), limit))?;
    Ok(())
}

/// Release cards in API order, at most `limit` of them.
/// `None` means the releases could not be fetched.
pub fn list_html(releases: Option<&[Release]>, limit: usize) -> Markup {
    match releases {
        None => empty_state("⚠️", "Could not load releases."),
        Some([]) => empty_state("📦", "No releases published yet."),
        Some(releases) => html! {
            @for release in releases.iter().take(limit) { (release_html(release)) }
        },
    }
}

fn release_html(release: &Release) -> Markup {
    let notes = markdown::render(
        release.body.as_deref().unwrap_or(""),
        RenderOptions::default(),
    );

    html! {
        article.release-card {
            div.release-head {
                div.release-title {
                    (release.display_name())
                    @if release.prerelease {
                        span.pill { "Pre-release" }
                    }
                }
                div.release-meta {
                    (release.tag_name)
                    @if let Some(at) = release.published_at {
                        " • " (format_date(at))
                    }
                }
                div.release-link {
                    a.btn.btn-ghost href=(release.html_url.as_deref().unwrap_or("#"))
                        target="_blank" rel="noopener noreferrer" { "Open on GitHub" }
                }
            }
            div.prose { (notes) }
            (assets_html(&release.assets))
        }
    }
}

fn assets_html(assets: &[ReleaseAsset]) -> Markup {
    html! {
        @if !assets.is_empty() {
            ul.release-assets {
                @for asset in assets {
                    li {
                        a href=(asset.browser_download_url) rel="noopener noreferrer" { (asset.name) }
                        " "
                        span.asset-size { (format_bytes(asset.size)) }
                    }
                }
            }
        }
    }
}

/// Human-readable size in the largest unit that keeps the value at least 1,
/// with up to two decimals.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let mut value = bytes as f64 / scale as f64;
    // 1023.999 KB prints as 1024 KB; carry into the next unit instead
    if (value * 100.0).round() / 100.0 >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    let value = format!("{:.2}", value);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, UNITS[unit])
}

/// `Jan 5, 2024`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

fn skeleton() -> Markup {
    page_shell(html! {
        (hero(
            "CHANGELOG",
            "Latest releases from GitHub.",
            "See what changed before you update.",
            None,
        ))
        div.surface id=(RELEASE_LIST) { (loading()) }
    })
}
