// App state and navigation loop.
// Wires the shell, router, and pages together and handles troubleshooting and quick-jump events.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{error, info, warn};

use crate::config::SiteConfig;
use crate::content::{ContentSource, SiteRoot};
use crate::error::Result;
use crate::github::{GitHubClient, HttpTransport};
use crate::html::loading;
use crate::pages::troubleshooting::{FIX_FILTERS, FIX_LIST};
use crate::pages::{Pages, changelog, guide, not_found, troubleshooting};
use crate::router::{Route, Router, View};
use crate::shell::{APP_REGION, Shell};
use crate::state::quick_jump::set_pending_scroll;
use crate::state::{CategoryFilter, FixBoard};

/// Result of activating a quick-jump entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickJump {
    /// Already on the guide; scrolled in place.
    Scrolled,
    /// On the guide, but no section has that id.
    Missing,
    /// Target stored and the fragment switched to the guide; the scroll
    /// happens once that render completes.
    Deferred,
}

/// Main application state.
pub struct App {
    shell: Arc<dyn Shell>,
    router: Router,
    pages: Pages,
    /// Troubleshooting state while that page is showing.
    board: Mutex<Option<FixBoard>>,
}

impl App {
    pub fn new(shell: Arc<dyn Shell>, pages: Pages) -> Self {
        Self {
            shell,
            router: Router::new(),
            pages,
            board: Mutex::new(None),
        }
    }

    /// Build the app with the HTTP transport and wall-clock cache expiry.
    pub fn from_config(config: SiteConfig, shell: Arc<dyn Shell>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        let github = GitHubClient::with_system_clock(
            transport.clone(),
            config.github.api_base.clone(),
            config.cache_ttl(),
        );
        let content = ContentSource::new(SiteRoot::parse(&config.content.root)?, transport);
        Ok(Self::new(shell, Pages::new(config, github, content)))
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    pub fn current_route(&self) -> Route {
        self.router.current_route()
    }

    /// Initial load: default the fragment, fill the drawer, render the route.
    pub async fn start(&self) -> Route {
        if self.shell.fragment().trim_start_matches('#').is_empty() {
            self.shell.set_fragment(Route::DEFAULT_FRAGMENT);
        }
        self.preload_drawer().await;
        self.navigate().await
    }

    /// Fill the quick-jump drawer before the guide has been visited.
    pub async fn preload_drawer(&self) {
        match self.pages.guide_sections().await {
            Ok(sections) => {
                if let Err(e) = guide::render_drawer(self.shell.as_ref(), &sections) {
                    warn!(error = %e, "could not fill quick-jump drawer");
                }
            }
            // The guide page shows its own error card for this.
            Err(e) => error!(error = %e, "could not load guide sections"),
        }
    }

    /// Render whatever the current fragment points at. Called on startup and
    /// on every fragment change.
    pub async fn navigate(&self) -> Route {
        let fragment = self.shell.fragment();
        let route = Route::from_fragment(&fragment);
        info!(fragment, ?route, "navigate");

        let view = View::new(self.shell.as_ref(), self.router.begin(route));
        self.lock_board().take();

        if let Err(e) = view.commit(APP_REGION, loading()) {
            error!(error = %e, "could not show loading state");
        }

        if let Err(e) = self.render(route, &view).await {
            error!(?route, error = %e, "route render failed");
            if let Err(e) = not_found::render(&view) {
                error!(error = %e, "could not render not-found page");
            }
        }

        if view.is_current() {
            self.shell.set_active_nav(route.nav_href());
        }
        route
    }

    /// Set the fragment and render it, as a link click would.
    pub async fn navigate_to(&self, fragment: &str) -> Route {
        self.shell.set_fragment(fragment);
        self.navigate().await
    }

    async fn render(&self, route: Route, view: &View<'_>) -> Result<()> {
        match route {
            Route::Guide => guide::render(&self.pages, view).await,
            Route::Troubleshooting => {
                if let Some(board) = troubleshooting::render(&self.pages, view).await? {
                    if view.is_current() {
                        *self.lock_board() = Some(board);
                    }
                }
                Ok(())
            }
            Route::Changelog => changelog::render(&self.pages, view).await,
            Route::NotFound => not_found::render(view),
        }
    }

    /// Drawer entry activated.
    pub fn quick_jump(&self, id: &str) -> QuickJump {
        if Route::from_fragment(&self.shell.fragment()) == Route::Guide {
            return if guide::scroll_to_section(self.shell.as_ref(), id) {
                QuickJump::Scrolled
            } else {
                QuickJump::Missing
            };
        }

        if !set_pending_scroll(self.shell.as_ref(), id) {
            warn!(id, "session storage unavailable, quick jump will not scroll");
        }
        self.shell.set_fragment(Route::DEFAULT_FRAGMENT);
        QuickJump::Deferred
    }

    /// Category chip clicked. Returns false when the troubleshooting page is not showing.
    pub fn select_category(&self, category: CategoryFilter) -> Result<bool> {
        self.with_board(|shell, board| {
            board.select_category(category);
            shell.set_region(FIX_FILTERS, troubleshooting::chips_html(category))?;
            shell.set_region(FIX_LIST, troubleshooting::list_html(board))
        })
        .map(|updated| updated.is_some())
    }

    /// Search box input. Returns false when the troubleshooting page is not showing.
    pub fn search_fixes(&self, query: &str) -> Result<bool> {
        self.with_board(|shell, board| {
            board.set_query(query);
            shell.set_region(FIX_LIST, troubleshooting::list_html(board))
        })
        .map(|updated| updated.is_some())
    }

    /// Accordion header clicked. Returns whether the item is now open, or
    /// `None` if the page or the item is not showing.
    pub fn toggle_fix(&self, id: &str) -> Result<Option<bool>> {
        self.with_board(|shell, board| {
            let Some(open) = board.toggle(id) else {
                return Ok(None);
            };
            shell.set_region(FIX_LIST, troubleshooting::list_html(board))?;
            Ok(Some(open))
        })
        .map(Option::flatten)
    }

    /// Copy of the troubleshooting state, if that page is showing.
    pub fn board(&self) -> Option<FixBoard> {
        self.lock_board().clone()
    }

    fn with_board<T>(
        &self,
        f: impl FnOnce(&dyn Shell, &mut FixBoard) -> Result<T>,
    ) -> Result<Option<T>> {
        let mut board = self.lock_board();
        match board.as_mut() {
            Some(board) => f(self.shell.as_ref(), board).map(Some),
            None => Ok(None),
        }
    }

    fn lock_board(&self) -> MutexGuard<'_, Option<FixBoard>> {
        self.board.lock().unwrap_or_else(|e| e.into_inner())
    }
}
