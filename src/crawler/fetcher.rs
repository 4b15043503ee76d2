//! Page fetchers
//!
//! This module defines the [`PageFetcher`] seam between the scheduler and the
//! network, and its two implementations:
//! - [`BrowserFetcher`]: renders pages in headless Chromium, one isolated
//!   browser context per fetch
//! - [`HttpFetcher`]: plain HTTP GET for sites that need no script execution
//!
//! Fetch failures never propagate: they are logged and reported as `None`.

use crate::config::{BrowserConfig, UserAgentConfig};
use crate::SeoError;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Retrieves the HTML of a page
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetches `url` and returns its HTML, or `None` if the fetch failed
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Fetcher backed by a headless Chromium instance
///
/// The browser process lives as long as the fetcher. Each call to
/// [`PageFetcher::fetch`] creates a fresh browser context (separate cookies,
/// cache and storage), loads the page in it and disposes the context before
/// returning.
pub struct BrowserFetcher {
    browser: Browser,
    handler: JoinHandle<()>,
    timeout: Duration,
}

impl BrowserFetcher {
    /// Launches the browser
    ///
    /// # Arguments
    ///
    /// * `config` - Browser launch settings
    /// * `timeout` - Upper bound on a single page load
    ///
    /// # Returns
    ///
    /// * `Ok(BrowserFetcher)` - Browser is running and ready
    /// * `Err(SeoError::Browser)` - Chromium could not be found or started
    pub async fn launch(config: &BrowserConfig, timeout: Duration) -> Result<Self, SeoError> {
        let mut builder = ChromeConfig::builder()
            .window_size(config.window_width, config.window_height)
            .request_timeout(timeout);

        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &config.executable {
            builder = builder.chrome_executable(executable);
        }

        let chrome_config = builder.build().map_err(SeoError::Browser)?;

        let (browser, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| SeoError::Browser(format!("Failed to launch browser: {}", e)))?;

        // The CDP connection only makes progress while its handler is polled.
        // Per-message errors are logged; the loop ends with the stream.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
            tracing::debug!("Browser handler stream ended");
        });

        tracing::info!("Browser launched (headless: {})", config.headless);

        Ok(Self {
            browser,
            handler,
            timeout,
        })
    }

    /// Shuts the browser down and waits for its handler to finish
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Failed to wait for browser process: {}", e);
        }
        if let Err(e) = self.handler.await {
            tracing::debug!("Browser handler task failed: {}", e);
        }
        tracing::info!("Browser closed");
    }

    /// Opens a page inside `context_id`, loads `url` and returns the markup
    async fn render(&self, context_id: &BrowserContextId, url: &str) -> Result<String, CdpError> {
        let mut params = CreateTargetParams::new("about:blank");
        params.browser_context_id = Some(context_id.clone());

        let page = self.browser.new_page(params).await?;
        let content = load_content(&page, url).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page for {}: {}", url, e);
        }

        content
    }
}

/// Navigates and reads the document after scripts have run
async fn load_content(page: &Page, url: &str) -> Result<String, CdpError> {
    page.goto(url).await?;
    page.content().await
}

impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let context_id = match self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await
        {
            Ok(response) => response.result.browser_context_id,
            Err(e) => {
                tracing::warn!("Error fetching {}: could not create browser context: {}", url, e);
                return None;
            }
        };

        let rendered = tokio::time::timeout(self.timeout, self.render(&context_id, url)).await;

        // Disposing the context also closes any page a timed-out render left open
        if let Err(e) = self
            .browser
            .execute(DisposeBrowserContextParams::new(context_id))
            .await
        {
            tracing::debug!("Failed to dispose browser context for {}: {}", url, e);
        }

        match rendered {
            Ok(Ok(html)) => Some(html),
            Ok(Err(e)) => {
                tracing::warn!("Error fetching {}: {}", url, e);
                None
            }
            Err(_) => {
                tracing::warn!("Error fetching {}: timed out after {:?}", url, self.timeout);
                None
            }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Overall request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use seo_ripple::config::UserAgentConfig;
/// use seo_ripple::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(60)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher that performs a plain HTTP GET without rendering
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, SeoError> {
        Ok(Self {
            client: build_http_client(config, timeout)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!("Error fetching {}: request timeout", url);
                } else if e.is_connect() {
                    tracing::warn!("Error fetching {}: connection failed", url);
                } else {
                    tracing::warn!("Error fetching {}: {}", url, e);
                }
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Error fetching {}: HTTP {}", url, status.as_u16());
            return None;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !content_type.contains("html") {
            tracing::debug!("Skipping {}: content type {}", url, content_type);
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Error reading body of {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn http_fetcher() -> HttpFetcher {
        HttpFetcher::new(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><title>Home</title></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let html = http_fetcher().fetch(&format!("{}/", server.uri())).await;
        assert_eq!(html.as_deref(), Some("<html><title>Home</title></html>"));
    }

    #[tokio::test]
    async fn test_http_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let html = http_fetcher()
            .fetch(&format!("{}/missing", server.uri()))
            .await;
        assert!(html.is_none());
    }

    #[tokio::test]
    async fn test_http_fetch_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        // No retries: a single request, then give up
        let html = http_fetcher().fetch(&format!("{}/", server.uri())).await;
        assert!(html.is_none());
    }

    #[tokio::test]
    async fn test_http_fetch_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
            )
            .mount(&server)
            .await;

        let html = http_fetcher()
            .fetch(&format!("{}/doc.pdf", server.uri()))
            .await;
        assert!(html.is_none());
    }

    #[tokio::test]
    async fn test_http_fetch_connection_refused() {
        // Bind then drop a listener to get a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let html = http_fetcher()
            .fetch(&format!("http://127.0.0.1:{}/", port))
            .await;
        assert!(html.is_none());
    }
}
