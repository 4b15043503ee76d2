use crate::url::ScopeMode;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for SEO-Ripple
///
/// Every section is optional; missing keys fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub browser: BrowserConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Which fetcher backs the crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Render every page in a headless Chromium
    #[default]
    Browser,
    /// Plain HTTP GET, no script execution
    Http,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum link distance from the seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Hard cap on the number of pages analyzed in one crawl
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,

    /// Upper bound on a single page load, in seconds
    #[serde(rename = "navigation-timeout")]
    pub navigation_timeout: u64,

    /// How discovered links are matched against the seed's domain
    pub scope: ScopeMode,

    /// Which fetcher to use
    pub fetcher: FetcherKind,
}

impl CrawlerConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: None,
            navigation_timeout: 60,
            scope: ScopeMode::default(),
            fetcher: FetcherKind::default(),
        }
    }
}

/// Headless browser configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run without a visible window
    pub headless: bool,

    /// Path to the Chromium/Chrome binary; auto-detected when unset
    pub executable: Option<PathBuf>,

    #[serde(rename = "window-width")]
    pub window_width: u32,

    #[serde(rename = "window-height")]
    pub window_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            window_width: 1280,
            window_height: 800,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the user agent string: `Name/Version (+ContactURL)`
    pub fn user_agent(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SeoRipple".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawler.max_depth, 2);
        assert_eq!(config.crawler.max_pages, None);
        assert_eq!(config.crawler.navigation_timeout(), Duration::from_secs(60));
        assert_eq!(config.crawler.scope, ScopeMode::Registrable);
        assert_eq!(config.crawler.fetcher, FetcherKind::Browser);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_user_agent_with_contact() {
        let ua = UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: Some("https://example.com/about".to_string()),
        };
        assert_eq!(ua.user_agent(), "TestCrawler/1.0 (+https://example.com/about)");
    }

    #[test]
    fn test_user_agent_without_contact() {
        let ua = UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: None,
        };
        assert_eq!(ua.user_agent(), "TestCrawler/1.0");
    }
}
