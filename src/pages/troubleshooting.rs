// Troubleshooting page.
// Approved fixes from the website repository's issues, with category chips, search, and an accordion.

use maud::{Markup, html};

use crate::error::Result;
use crate::github::{open_issues_url, submit_fix_url};
use crate::html::{empty_state, loading};
use crate::router::View;
use crate::shell::APP_REGION;
use crate::state::{BoardSource, Category, CategoryFilter, FixBoard, FixItem, normalize_issues};

use super::{Pages, hero, page_shell};

/// Region holding the category chips.
pub const FIX_FILTERS: &str = "fixFilters";
/// Region holding the accordion list.
pub const FIX_LIST: &str = "fixList";

/// Render the page. Returns the board for later interaction, or `None`
/// when a newer navigation took over before the list was committed.
pub async fn render(pages: &Pages, view: &View<'_>) -> Result<Option<FixBoard>> {
    view.commit(APP_REGION, skeleton(pages)?)?;

    let board = load_board(pages).await;
    if !view.commit(FIX_LIST, list_html(&board))? {
        return Ok(None);
    }
    Ok(Some(board))
}

/// Fetch approved issues and build a fresh board.
pub async fn load_board(pages: &Pages) -> FixBoard {
    let config = pages.config();
    let policy = config.troubleshooting.accordion;

    match pages
        .github()
        .get_labeled_issues(
            &config.github.site_owner,
            &config.github.site_repo,
            &config.troubleshooting.required_label,
        )
        .await
    {
        Some(issues) => FixBoard::new(normalize_issues(&issues), policy),
        None => FixBoard::unavailable(policy),
    }
}

/// Accordion list for the board's current filter.
pub fn list_html(board: &FixBoard) -> Markup {
    if board.source() == BoardSource::Unavailable {
        return empty_state("⚠️", "Could not load fixes right now. Try again later.");
    }
    if board.items().is_empty() {
        return empty_state("📭", "No approved fixes yet.");
    }

    let visible = board.visible();
    if visible.is_empty() {
        return empty_state("🔎", "No fixes found.");
    }

    html! {
        @for item in visible {
            (item_html(item, board.accordion.is_open(&item.id)))
        }
    }
}

/// Category chips with `active` marked.
pub fn chips_html(active: CategoryFilter) -> Markup {
    let chips = std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.into_iter().map(CategoryFilter::Only));

    html! {
        @for chip in chips {
            button.chip.active[chip == active] data-cat=(chip.key()) type="button" {
                (chip.label())
            }
        }
    }
}

fn item_html(item: &FixItem, open: bool) -> Markup {
    let title = if item.title.trim().is_empty() {
        "Untitled fix"
    } else {
        item.title.as_str()
    };
    let expanded = if open { "true" } else { "false" };

    html! {
        div.acc-item.open[open] {
            button.acc-btn type="button" data-acc="btn" data-id=(item.id) aria-expanded=(expanded) {
                div.acc-left {
                    span.pill { (item.category.badge()) }
                    div.acc-title { (title) }
                }
                span.chevron aria-hidden="true" { "▾" }
            }
            div.acc-body data-acc="body" data-id=(item.id) {
                div.prose {
                    (item.body_html)
                    div.acc-link {
                        a.btn.btn-ghost href=(item.html_url) target="_blank" rel="noopener noreferrer" {
                            "Open on GitHub (#" (item.number) ")"
                        }
                    }
                }
            }
        }
    }
}

fn skeleton(pages: &Pages) -> Result<Markup> {
    let repo_url = pages.config().github.site_repo_url();
    let submit = submit_fix_url(&repo_url, &pages.config().troubleshooting.submit_fix_body)?;

    let actions = html! {
        a.btn.btn-ghost href=(open_issues_url(&repo_url)) target="_blank" rel="noopener noreferrer" {
            "Open Issues"
        }
        a.btn.btn-primary href=(submit.as_str()) target="_blank" rel="noopener noreferrer" {
            "Submit Fix"
        }
    };

    Ok(page_shell(html! {
        (hero(
            "TROUBLESHOOTING",
            "Find and apply the fix fast.",
            "Filter by category, search keywords, and open the exact walkthrough.",
            Some(actions),
        ))
        div.surface {
            div.toolbar {
                div.search {
                    span.search-icon { "🔍" }
                    input id="fixSearch" type="search" placeholder="Search fixes..." autocomplete="off";
                }
                div.filter-chips id=(FIX_FILTERS) { (chips_html(CategoryFilter::All)) }
            }
            div.accordion id=(FIX_LIST) { (loading()) }
        }
    }))
}
