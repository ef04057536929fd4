//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote API access settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Traversal behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Keyword rules for tagging references
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Load configuration if the file exists, otherwise return defaults.
    ///
    /// Unlike `load_or_default`, a file that exists but fails to parse is an error.
    pub fn load_if_present(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay API credentials from `CF_PUBLIC_KEY` / `CF_SECRET_KEY`.
    pub fn with_env_credentials(mut self) -> Self {
        if let Ok(key) = std::env::var("CF_PUBLIC_KEY") {
            if !key.trim().is_empty() {
                self.api.key = Some(key);
            }
        }
        if let Ok(secret) = std::env::var("CF_SECRET_KEY") {
            if !secret.trim().is_empty() {
                self.api.secret = Some(secret);
            }
        }
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        let base = url::Url::parse(&self.api.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "api.base_url must be http(s), got '{}'",
                self.api.base_url
            )));
        }
        if self.api.key.is_some() != self.api.secret.is_some() {
            return Err(AppError::validation(
                "api.key and api.secret must be set together",
            ));
        }
        if self.crawler.max_blogs == Some(0) {
            return Err(AppError::validation("crawler.max_blogs must be > 0"));
        }
        for rule in &self.classifier.rules {
            if rule.keyword.trim().is_empty() || rule.tag.trim().is_empty() {
                return Err(AppError::validation(
                    "classifier rules need a non-empty keyword and tag",
                ));
            }
        }
        Ok(())
    }
}

/// HTTP client and API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `https://codeforces.com/api`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay before each request in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,

    /// Public API key, enables signed requests together with `secret`
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default, skip_serializing)]
    pub secret: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: 0,
            key: None,
            secret: None,
        }
    }
}

/// Traversal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Upper bound on blogs visited in one run
    #[serde(default)]
    pub max_blogs: Option<usize>,

    /// Blogs whose title contains one of these (case-insensitive) are left alone
    #[serde(default = "defaults::skip_title_keywords")]
    pub skip_title_keywords: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_blogs: None,
            skip_title_keywords: defaults::skip_title_keywords(),
        }
    }
}

impl CrawlerConfig {
    /// Whether a blog title matches one of the skip keywords.
    pub fn is_filtered_title(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.skip_title_keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .any(|k| title.contains(&k.to_lowercase()))
    }
}

/// Keyword classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub rules: Vec<TagRule>,
}

/// Mapping from a keyword found near a reference to a tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagRule {
    /// Keyword to search for in the surrounding text
    pub keyword: String,

    /// Tag recorded on the reference
    pub tag: String,
}

mod defaults {
    pub fn base_url() -> String {
        "https://codeforces.com/api".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; cf-analyzer/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn skip_title_keywords() -> Vec<String> {
        vec!["editorial".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.api.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_node_bound() {
        let mut config = Config::default();
        config.crawler.max_blogs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_half_credentials() {
        let mut config = Config::default();
        config.api.key = Some("public".into());
        assert!(config.validate().is_err());
        config.api.secret = Some("secret".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_base() {
        let mut config = Config::default();
        config.api.base_url = "ftp://codeforces.com/api".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            max_blogs = 50

            [[classifier.rules]]
            keyword = "segment tree"
            tag = "data structures"
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.max_blogs, Some(50));
        assert_eq!(config.crawler.skip_title_keywords, vec!["editorial"]);
        assert_eq!(config.api.base_url, "https://codeforces.com/api");
        assert_eq!(config.classifier.rules.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn filtered_title_is_case_insensitive() {
        let crawler = CrawlerConfig::default();
        assert!(crawler.is_filtered_title("Codeforces Round #925 EDITORIAL"));
        assert!(!crawler.is_filtered_title("Codeforces Round #925 announcement"));
    }

    #[test]
    fn load_if_present_rejects_broken_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let config = Config::load_if_present(&path).unwrap();
        assert_eq!(config.api.base_url, "https://codeforces.com/api");

        fs::write(&path, "[crawler\nmax_blogs = ").unwrap();
        assert!(matches!(
            Config::load_if_present(&path),
            Err(AppError::Toml(_))
        ));
        assert!(Config::load_or_default(&path).validate().is_ok());
    }
}
