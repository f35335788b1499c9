// Cache module for in-memory response caching.
// Memoizes GitHub API responses per URL for a fixed time-to-live.

pub mod clock;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheStats, CachedData, DEFAULT_TTL, TtlCache};
