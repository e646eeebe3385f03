//! Input adapters: HTTP(S) URLs, local files and standard input.
//!
//! Only [`fetch_url`] needs the `fetch` feature; reading files and stdin is
//! always available.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::{PithError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: format!("Mozilla/5.0 (compatible; pith/{})", env!("CARGO_PKG_VERSION")) }
    }
}

/// Fetches a page and returns its body as text.
///
/// Redirects are followed and the configured timeout covers the whole request.
///
/// # Errors
///
/// - [`PithError::InvalidUrl`] if `url` does not parse or is not http(s)
/// - [`PithError::Timeout`] if the request exceeds `config.timeout`
/// - [`PithError::HttpError`] for connection failures and error statuses
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    use std::time::Duration;

    use reqwest::Client;
    use tracing::debug;
    use url::Url;

    let parsed = Url::parse(url).map_err(|e| PithError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PithError::InvalidUrl(format!("unsupported scheme `{}`", parsed.scheme())));
    }

    let client = Client::builder().timeout(Duration::from_secs(config.timeout)).build()?;

    let timed_out = |e: reqwest::Error| {
        if e.is_timeout() { PithError::Timeout { timeout: config.timeout } } else { PithError::HttpError(e) }
    };

    let response = client
        .get(parsed)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .map_err(timed_out)?
        .error_for_status()?;

    debug!(status = %response.status(), url = %response.url(), "fetched page");
    response.text().await.map_err(timed_out)
}

/// Reads a local HTML file.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn fetch_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PithError::FileNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    let mut bytes = Vec::new();
    io::stdin().read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
