//! Post model

use serde::{Deserialize, Serialize};

use super::FrontMatter;
use crate::config::SiteConfig;
use crate::helpers::url;

/// A single blog post: slug, metadata and the raw body.
///
/// Constructed fresh on every query by reading the backing file; never
/// cached or mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier derived from the file name, used as URL segment
    pub slug: String,

    /// Parsed front-matter
    pub meta: FrontMatter,

    /// Body text after the front-matter block (MDX source, not rendered)
    pub content: String,
}

impl Post {
    /// URL path under the site root, e.g. `/blog/my-post`
    pub fn path(&self, config: &SiteConfig) -> String {
        url::url_for(config, &format!("{}/{}", config.blog_dir, self.slug))
    }

    /// Full permalink including the site URL
    pub fn permalink(&self, config: &SiteConfig) -> String {
        url::full_url_for(config, &format!("{}/{}", config.blog_dir, self.slug))
    }

    /// Read-time label with the display fallback
    pub fn read_time(&self) -> &str {
        self.meta.read_time.as_deref().unwrap_or("5 min read")
    }

    /// Author with the site author as fallback
    pub fn author<'a>(&'a self, config: &'a SiteConfig) -> &'a str {
        self.meta.author.as_deref().unwrap_or(&config.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            author: "Site Author".to_string(),
            ..SiteConfig::default()
        }
    }

    fn post(slug: &str) -> Post {
        Post {
            slug: slug.to_string(),
            meta: FrontMatter::default(),
            content: String::new(),
        }
    }

    #[test]
    fn test_post_paths() {
        let config = test_config();
        let p = post("hello-world");
        assert_eq!(p.path(&config), "/blog/hello-world");
        assert_eq!(p.permalink(&config), "https://example.com/blog/hello-world");
    }

    #[test]
    fn test_defensive_defaults() {
        let config = test_config();
        let mut p = post("x");
        assert_eq!(p.read_time(), "5 min read");
        assert_eq!(p.author(&config), "Site Author");

        p.meta.read_time = Some("2 min read".to_string());
        p.meta.author = Some("Guest".to_string());
        assert_eq!(p.read_time(), "2 min read");
        assert_eq!(p.author(&config), "Guest");
    }
}
