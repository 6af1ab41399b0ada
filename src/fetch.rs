//! HTTP Page Fetcher
//!
//! The network collaborator the TTL cache wraps: GET a URL, return its body.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::ops::Operation;

/// Fetches page bodies over HTTP.
///
/// Transport errors are returned as [`CacheError::Fetch`](crate::CacheError::Fetch);
/// non-success statuses are not errors, their body is returned like any other.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Operation<String> for HttpFetcher {
    type Output = String;

    fn name(&self) -> &str {
        "get_page"
    }

    async fn call(&self, url: String) -> Result<String> {
        let response = self.client.get(&url).send().await?;
        debug!(url = %url, status = %response.status(), "page fetched");
        Ok(response.text().await?)
    }
}
