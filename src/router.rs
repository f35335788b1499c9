// Hash-fragment routing.
// Maps the URL fragment to a route and hands out render tickets so stale renders never commit.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use maud::Markup;
use tracing::debug;

use crate::error::Result;
use crate::shell::Shell;

/// Every page the site can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Guide,
    Troubleshooting,
    Changelog,
    NotFound,
}

impl Route {
    /// Fragment the app falls back to when none is set.
    pub const DEFAULT_FRAGMENT: &'static str = "#/guide";

    /// Resolve a fragment such as `#/changelog`.
    pub fn from_fragment(fragment: &str) -> Self {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        match path {
            "" | "/" | "/guide" => Route::Guide,
            "/troubleshooting" => Route::Troubleshooting,
            "/changelog" => Route::Changelog,
            _ => Route::NotFound,
        }
    }

    /// Navigation link highlighted for this route.
    pub fn nav_href(&self) -> Option<&'static str> {
        match self {
            Route::Guide => Some("#/guide"),
            Route::Troubleshooting => Some("#/troubleshooting"),
            Route::Changelog => Some("#/changelog"),
            Route::NotFound => None,
        }
    }

}

/// Tracks the current route and the generation of the latest navigation.
#[derive(Debug, Default)]
pub struct Router {
    generation: Arc<AtomicU64>,
    current: Mutex<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a navigation. Any ticket issued earlier stops being current.
    pub fn begin(&self, route: Route) -> RenderTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = route;
        RenderTicket {
            generation,
            latest: self.generation.clone(),
            route,
        }
    }

    pub fn current_route(&self) -> Route {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Proof that a render belongs to a particular navigation.
#[derive(Debug, Clone)]
pub struct RenderTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
    route: Route,
}

impl RenderTicket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

/// Shell handle that only writes while its ticket is current.
pub struct View<'a> {
    shell: &'a dyn Shell,
    ticket: RenderTicket,
}

impl<'a> View<'a> {
    pub fn new(shell: &'a dyn Shell, ticket: RenderTicket) -> Self {
        Self { shell, ticket }
    }

    pub fn shell(&self) -> &'a dyn Shell {
        self.shell
    }

    pub fn is_current(&self) -> bool {
        self.ticket.is_current()
    }

    /// Write `html` into region `id`. Returns false if a newer navigation
    /// has started, in which case nothing is written.
    pub fn commit(&self, id: &str, html: Markup) -> Result<bool> {
        if !self.ticket.is_current() {
            debug!(region = id, route = ?self.ticket.route, "dropping stale render");
            return Ok(false);
        }
        self.shell.set_region(id, html)?;
        Ok(true)
    }
}
