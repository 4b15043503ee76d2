//! URL handling module for SEO-Ripple
//!
//! This module provides seed URL validation, link normalization, registrable
//! domain extraction, and crawl scope matching.

mod domain;
mod normalize;

use crate::UrlError;
use serde::Deserialize;
use url::Url;

// Re-export main functions
pub use domain::registrable_domain;
pub use normalize::{parse_seed_url, strip_query_and_fragment};

/// How discovered links are matched against the crawl's scope domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    /// The link's registrable domain must equal the scope domain
    #[default]
    Registrable,
    /// The scope domain must appear anywhere in the normalized link
    ///
    /// The scope domain is still derived with private suffixes applied, so a
    /// seed on `foo.github.io` matches links containing `foo.github.io`, not
    /// every `github.io` site.
    Substring,
}

/// The domain a crawl is confined to, computed once from the seed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainScope {
    domain: String,
    mode: ScopeMode,
}

impl DomainScope {
    /// Builds the scope for a crawl starting at `seed`
    ///
    /// # Returns
    ///
    /// * `Ok(DomainScope)` - Scope bound to the seed's registrable domain
    /// * `Err(UrlError::MissingDomain)` - The seed has no host
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use seo_ripple::url::{DomainScope, ScopeMode};
    ///
    /// let seed = Url::parse("https://www.example.com/").unwrap();
    /// let scope = DomainScope::from_seed(&seed, ScopeMode::Registrable).unwrap();
    /// assert_eq!(scope.domain(), "example.com");
    ///
    /// let link = Url::parse("https://blog.example.com/post").unwrap();
    /// assert!(scope.contains(&link));
    /// ```
    pub fn from_seed(seed: &Url, mode: ScopeMode) -> Result<Self, UrlError> {
        let domain = registrable_domain(seed).ok_or(UrlError::MissingDomain)?;
        Ok(Self { domain, mode })
    }

    /// The registrable domain of the seed
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn mode(&self) -> ScopeMode {
        self.mode
    }

    /// Checks whether a normalized link belongs to this scope
    ///
    /// In `Substring` mode the check runs against the full serialized URL,
    /// which can admit foreign hosts whose path happens to mention the scope
    /// domain (`https://mirror.net/example.com/`).
    pub fn contains(&self, url: &Url) -> bool {
        match self.mode {
            ScopeMode::Registrable => {
                registrable_domain(url).as_deref() == Some(self.domain.as_str())
            }
            ScopeMode::Substring => url.as_str().contains(&self.domain),
        }
    }
}
