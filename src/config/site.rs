//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// Language offered by the translation toggle (BCP-47 code)
    pub secondary_language: String,

    // URL
    pub url: String,
    pub root: String,
    /// URL segment under which posts live
    pub blog_dir: String,
    /// URL segment under which category pages live
    pub category_dir: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    pub new_post_name: String,
    pub render_drafts: bool,

    // Sorting
    /// Sort posts by parsed calendar date instead of the raw date string.
    /// Off by default: the raw string ordering is the historical behavior.
    pub calendar_sort: bool,

    // Category freshness thresholds
    #[serde(default)]
    pub freshness: FreshnessConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "MyBlog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            secondary_language: "ml".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            blog_dir: "blog".to_string(),
            category_dir: "category".to_string(),

            content_dir: "content/posts".to_string(),
            public_dir: "public".to_string(),

            new_post_name: ":title.mdx".to_string(),
            render_drafts: false,

            calendar_sort: false,

            freshness: FreshnessConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Thresholds for category freshness classification, in days
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FreshnessConfig {
    pub fresh_days: i64,
    pub stale_days: i64,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            fresh_days: 7,
            stale_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/posts");
        assert_eq!(config.secondary_language, "ml");
        assert!(!config.render_drafts);
        assert!(!config.calendar_sort);
        assert_eq!(config.freshness.fresh_days, 7);
        assert_eq!(config.freshness.stale_days, 30);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
url: https://blog.example.org
render_drafts: true
freshness:
  fresh_days: 3
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert!(config.render_drafts);
        assert_eq!(config.freshness.fresh_days, 3);
        assert_eq!(config.freshness.stale_days, 30);
    }
}
