//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "blog/my-post") // -> "/blog/my-post"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Derive the URL segment for a category name: lower-cased, with the
/// literal sequence " & " and spaces replaced by single hyphens.
///
/// # Examples
/// ```ignore
/// category_slug("Life Story")    // -> "life-story"
/// category_slug("Tech & Code")   // -> "tech-code"
/// ```
pub fn category_slug(name: &str) -> String {
    name.to_lowercase().replace(" & ", "-").replace(' ', "-")
}

/// Map a URL segment back to the exact category string it was derived
/// from. Callers must resolve the slug before querying by category, since
/// category matching is on the exact (case-insensitive) name.
pub fn find_category<'a>(categories: &'a [String], slug: &str) -> Option<&'a str> {
    categories
        .iter()
        .find(|c| category_slug(c) == slug)
        .map(|c| c.as_str())
}

/// URL path for a category page, e.g. `/category/life-story`
pub fn category_path(config: &SiteConfig, name: &str) -> String {
    url_for(
        config,
        &format!("{}/{}", config.category_dir, category_slug(name)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "blog/hello"), "/blog/hello");
        assert_eq!(url_for(&config, "/blog/hello"), "/blog/hello");
        assert_eq!(url_for(&config, ""), "/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "blog/hello"),
            "https://example.com/blog/hello"
        );
    }

    #[test]
    fn test_category_slug() {
        assert_eq!(category_slug("Technology"), "technology");
        assert_eq!(category_slug("Life Story"), "life-story");
        assert_eq!(category_slug("Tech & Code"), "tech-code");
        assert_eq!(category_slug("Online Security"), "online-security");
    }

    #[test]
    fn test_find_category() {
        let categories = vec!["Life Story".to_string(), "Technology".to_string()];
        assert_eq!(find_category(&categories, "life-story"), Some("Life Story"));
        assert_eq!(find_category(&categories, "technology"), Some("Technology"));
        assert_eq!(find_category(&categories, "missing"), None);
    }

    #[test]
    fn test_category_path() {
        let config = test_config();
        assert_eq!(
            category_path(&config, "Life Story"),
            "/category/life-story"
        );
    }
}
