// GitHub API client.
// Wraps a transport with the per-URL response cache and degrades failures to `None`.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

use crate::cache::{CacheStats, Clock, SystemClock, TtlCache};
use crate::error::Result;

use super::transport::Transport;

/// Whether a request may be served from, and stored in, the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    Use,
    Bypass,
}

/// GitHub API client with a time-bounded response cache.
pub struct GitHubClient {
    transport: Arc<dyn Transport>,
    cache: TtlCache<Arc<Value>>,
    api_base: String,
}

impl GitHubClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        api_base: impl Into<String>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            cache: TtlCache::new(ttl, clock),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client using wall-clock expiry.
    pub fn with_system_clock(
        transport: Arc<dyn Transport>,
        api_base: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self::new(transport, api_base, ttl, Arc::new(SystemClock))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// GET a JSON document.
    ///
    /// Returns `None` on any failure (status, network, or body parse); the
    /// error is logged. Successful responses are cached under the exact URL
    /// unless the policy says otherwise, and cache hits return the same `Arc`.
    pub async fn fetch_json(&self, url: &str, policy: CachePolicy) -> Option<Arc<Value>> {
        if policy == CachePolicy::Use {
            if let Some(hit) = self.cache.get(url) {
                debug!(url, "cache hit");
                return Some(hit);
            }
        }

        match self.request_json(url).await {
            Ok(value) => {
                let value = Arc::new(value);
                if policy == CachePolicy::Use {
                    let purged = self.cache.purge_expired();
                    if purged > 0 {
                        debug!(purged, "dropped expired cache entries");
                    }
                    self.cache.insert(url, value.clone());
                }
                Some(value)
            }
            Err(e) => {
                error!(url, error = %e, "GitHub API error");
                None
            }
        }
    }

    async fn request_json(&self, url: &str) -> Result<Value> {
        let body = self.transport.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
