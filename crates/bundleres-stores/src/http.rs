//! HTTP transport shared by the store lookups

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{ResolveError, Result};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("bundleres/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetch a URL and return its status and body
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

/// Fetch a URL and fail with [`ResolveError::HttpStatus`] on non-2xx.
pub(crate) async fn get_success(transport: &dyn HttpTransport, url: &Url) -> Result<String> {
    debug!(url = %url, "GET");
    let response = transport.get(url).await?;
    if !response.is_success() {
        debug!(url = %url, status = response.status, "request failed");
        return Err(ResolveError::HttpStatus {
            status: response.status,
            url: url.to_string(),
        });
    }
    Ok(response.body)
}

/// Client settings for [`ReqwestTransport`]
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// [`HttpTransport`] backed by a single reqwest client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with the given timeout and user agent
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
