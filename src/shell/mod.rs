// Page shell abstraction.
// Everything the site needs from the browser: regions, the fragment, session storage, scrolling.

pub mod memory;

pub use memory::MemoryShell;

use maud::Markup;

use crate::error::Result;

/// Region the router renders whole pages into.
pub const APP_REGION: &str = "app";

/// Drawer region holding the quick-jump list.
pub const DRAWER_REGION: &str = "drawerGuideNav";

/// Host surface the app renders into.
pub trait Shell: Send + Sync {
    /// Current URL fragment including the leading `#`, or empty.
    fn fragment(&self) -> String;

    /// Change the fragment. The host reports the change back through
    /// `App::navigate`, the same as a user-initiated one.
    fn set_fragment(&self, fragment: &str);

    /// Replace the contents of the element with `id`.
    fn set_region(&self, id: &str, html: Markup) -> Result<()>;

    /// Mark the navigation link with `href` active and clear the others.
    /// `None` clears every link.
    fn set_active_nav(&self, href: Option<&str>);

    /// Measured height of the sticky header, if available.
    fn header_height(&self) -> Option<f64>;

    /// Scroll so the element with `id` sits `offset_px` below the top of
    /// the viewport. Returns false when no such element exists.
    fn scroll_to(&self, id: &str, offset_px: u32) -> bool;

    fn storage_get(&self, key: &str) -> Option<String>;

    /// Returns false when storage is unavailable.
    fn storage_set(&self, key: &str, value: &str) -> bool;

    fn storage_remove(&self, key: &str);
}
