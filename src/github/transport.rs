// HTTP transport for GitHub and static content requests.
// One GET per call; status codes are mapped to typed errors, rate limits are tracked.

use std::sync::Mutex;

use futures::future::BoxFuture;
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{GuideError, Result};

use super::types::RateLimit;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Something that can GET a URL and return its body.
pub trait Transport: Send + Sync {
    fn get_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Unauthenticated reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
    rate_limit: Mutex<RateLimit>,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("revoguide"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(GuideError::Http)?;

        Ok(Self {
            client,
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Most recent rate limit headers seen.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        self.update_rate_limit(&response);
        let response = self.check_response(response)?;
        Ok(response.text().await?)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let mut rate_limit = self.rate_limit.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(limit) = header("x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    fn check_response(&self, response: Response) -> Result<Response> {
        let url = response.url().to_string();
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(GuideError::NotFound(url)),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if self.rate_limit().remaining == 0 =>
            {
                let reset_at = chrono::DateTime::from_timestamp(self.rate_limit().reset as i64, 0)
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(GuideError::RateLimited { reset_at })
            }
            status => Err(GuideError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

impl Transport for HttpTransport {
    fn get_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.fetch(url))
    }
}
