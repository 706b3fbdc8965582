//! Site configuration
//!
//! The configuration names the hosted content store, the website whose
//! posts are listed, and listing defaults. It is loaded once at start-up,
//! either from a YAML file (with `{{ env.NAME }}` interpolation) or directly
//! from environment variables.

use crate::error::{Error, Result};
use crate::template::{self, TemplateContext};
use crate::types::OrderBy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Site Config
// ============================================================================

/// Complete site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Remote content store connection
    pub store: StoreConfig,

    /// Blog listing settings
    pub blog: BlogConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

// ============================================================================
// Store
// ============================================================================

/// Remote content store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project URL of the hosted backend
    pub url: String,

    /// Public (anon) API key
    pub anon_key: String,

    /// Path of the REST interface below `url`
    #[serde(default = "default_rest_path")]
    pub rest_path: String,

    /// Table holding the posts
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_rest_path() -> String {
    "rest/v1".to_string()
}

fn default_table() -> String {
    "blog_posts".to_string()
}

// ============================================================================
// Blog
// ============================================================================

/// Pagination style for the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingMode {
    /// "Load more" button appending to the list
    LoadMore,
    /// Numbered page buttons replacing the list
    #[default]
    NumberedPages,
}

/// Blog listing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Site whose posts are listed
    pub website_id: String,

    /// Posts per page
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Listing order
    #[serde(default)]
    pub order_by: OrderBy,

    /// Pagination style
    #[serde(default)]
    pub mode: ListingMode,
}

fn default_per_page() -> usize {
    6
}

// ============================================================================
// HTTP
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional client-side request rate limit
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            requests_per_second: None,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Loading
// ============================================================================

impl SiteConfig {
    /// Load from a YAML file, interpolating against the process environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml(&content, &TemplateContext::from_process_env())
    }

    /// Parse YAML, render templates, then validate
    pub fn from_yaml(yaml: &str, ctx: &TemplateContext) -> Result<Self> {
        let raw: serde_json::Value = serde_yaml::from_str(yaml)?;
        let rendered = template::render_value(&raw, ctx)?;
        let config: SiteConfig = serde_json::from_value(rendered)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `WEBSITE_ID` and
    /// optional `BLOG_PER_PAGE`
    pub fn from_env() -> Result<Self> {
        Self::from_context(&TemplateContext::from_process_env())
    }

    /// Same as [`SiteConfig::from_env`] against an explicit variable set
    pub fn from_context(ctx: &TemplateContext) -> Result<Self> {
        let required = |name: &str| {
            ctx.get("env", name)
                .map(str::to_string)
                .ok_or_else(|| Error::missing_field(name))
        };

        let per_page = match ctx.get("env", "BLOG_PER_PAGE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::invalid_value("BLOG_PER_PAGE", format!("'{raw}' is not a number")))?,
            None => default_per_page(),
        };

        let config = SiteConfig {
            store: StoreConfig {
                url: required("SUPABASE_URL")?,
                anon_key: required("SUPABASE_ANON_KEY")?,
                rest_path: default_rest_path(),
                table: default_table(),
            },
            blog: BlogConfig {
                website_id: required("WEBSITE_ID")?,
                per_page,
                order_by: OrderBy::default(),
                mode: ListingMode::default(),
            },
            http: HttpConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a valid query
    pub fn validate(&self) -> Result<()> {
        if self.store.url.trim().is_empty() {
            return Err(Error::missing_field("store.url"));
        }
        url::Url::parse(&self.store.url)
            .map_err(|e| Error::invalid_value("store.url", e.to_string()))?;
        if self.store.anon_key.trim().is_empty() {
            return Err(Error::missing_field("store.anon_key"));
        }
        if self.store.table.trim().is_empty() {
            return Err(Error::missing_field("store.table"));
        }
        if self.blog.website_id.trim().is_empty() {
            return Err(Error::missing_field("blog.website_id"));
        }
        if self.blog.per_page == 0 {
            return Err(Error::invalid_value("blog.per_page", "must be greater than 0"));
        }
        if self.http.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "http.requests_per_second",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Copy with the API key masked, for printing
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.store.anon_key = "********".to_string();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderColumn;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const YAML: &str = r#"
store:
  url: "{{ env.SUPABASE_URL }}"
  anon_key: "{{ env.SUPABASE_ANON_KEY }}"
blog:
  website_id: site-1
  per_page: 10
  order_by:
    column: created_at
    ascending: true
  mode: load_more
http:
  timeout_secs: 5
  requests_per_second: 20
"#;

    fn ctx() -> TemplateContext {
        let mut ctx = TemplateContext::new();
        ctx.set_env("SUPABASE_URL", "https://abc.supabase.co")
            .set_env("SUPABASE_ANON_KEY", "anon-123")
            .set_env("WEBSITE_ID", "site-9");
        ctx
    }

    #[test]
    fn test_from_yaml() {
        let config = SiteConfig::from_yaml(YAML, &ctx()).unwrap();
        assert_eq!(config.store.url, "https://abc.supabase.co");
        assert_eq!(config.store.anon_key, "anon-123");
        assert_eq!(config.store.rest_path, "rest/v1");
        assert_eq!(config.store.table, "blog_posts");
        assert_eq!(config.blog.per_page, 10);
        assert_eq!(config.blog.order_by, OrderBy::asc(OrderColumn::CreatedAt));
        assert_eq!(config.blog.mode, ListingMode::LoadMore);
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.http.requests_per_second, Some(20));
    }

    #[test]
    fn test_defaults() {
        let yaml = r"
store:
  url: https://abc.supabase.co
  anon_key: key
blog:
  website_id: site-1
";
        let config = SiteConfig::from_yaml(yaml, &TemplateContext::new()).unwrap();
        assert_eq!(config.blog.per_page, 6);
        assert_eq!(config.blog.order_by, OrderBy::desc(OrderColumn::PublishedAt));
        assert_eq!(config.blog.mode, ListingMode::NumberedPages);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.requests_per_second.is_none());
    }

    #[test]
    fn test_missing_env_variable() {
        let err = SiteConfig::from_yaml(YAML, &TemplateContext::new()).unwrap_err();
        assert!(matches!(err, Error::UndefinedVariable { .. }));
    }

    #[test]
    fn test_zero_per_page_rejected() {
        let yaml = r"
store: { url: 'https://abc.supabase.co', anon_key: key }
blog: { website_id: site-1, per_page: 0 }
";
        let err = SiteConfig::from_yaml(yaml, &TemplateContext::new()).unwrap_err();
        assert!(err.to_string().contains("blog.per_page"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let yaml = r"
store: { url: 'not a url', anon_key: key }
blog: { website_id: site-1 }
";
        let err = SiteConfig::from_yaml(yaml, &TemplateContext::new()).unwrap_err();
        assert!(err.to_string().contains("store.url"));
    }

    #[test]
    fn test_from_context() {
        let mut ctx = ctx();
        ctx.set_env("BLOG_PER_PAGE", "4");
        let config = SiteConfig::from_context(&ctx).unwrap();
        assert_eq!(config.blog.website_id, "site-9");
        assert_eq!(config.blog.per_page, 4);

        let err = SiteConfig::from_context(&TemplateContext::new()).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "store:\n  url: https://abc.supabase.co\n  anon_key: key\nblog:\n  website_id: site-1\n"
        )
        .unwrap();

        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.blog.website_id, "site-1");

        let missing = SiteConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(missing, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_redacted() {
        let config = SiteConfig::from_yaml(YAML, &ctx()).unwrap();
        assert_eq!(config.redacted().store.anon_key, "********");
        assert_eq!(config.store.anon_key, "anon-123");
    }
}
