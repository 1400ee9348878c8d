//! Generator module - emits the derived site surfaces: sitemap.xml,
//! robots.txt, search index and JSON feeds of posts and category stats.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs;

use crate::content::{ContentIndex, Post};
use crate::helpers::{date, url};
use crate::Blog;

/// Derived-artifact generator
pub struct Generator {
    blog: Blog,
    index: ContentIndex,
}

impl Generator {
    pub fn new(blog: &Blog) -> Self {
        let index = ContentIndex::from_config(&blog.base_dir, &blog.config);
        Self {
            blog: blog.clone(),
            index,
        }
    }

    /// Generate all derived artifacts into the public directory
    pub fn generate(&self, now: DateTime<Utc>) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        let posts = self.index.all_posts(false)?;
        let categories = self.index.categories()?;

        self.generate_sitemap(&posts, &categories, now)?;
        self.generate_robots()?;
        self.generate_search_index(&posts)?;
        self.generate_posts_feed(&posts)?;
        self.generate_stats_feed(now)?;

        Ok(())
    }

    /// Sitemap over the site root, the blog index, every published post
    /// and every category page
    fn generate_sitemap(
        &self,
        posts: &[Post],
        categories: &[String],
        now: DateTime<Utc>,
    ) -> Result<()> {
        let config = &self.blog.config;
        let today = date::format_ymd(now);

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        push_url(&mut xml, &config.url, &today, "weekly", "1.0");
        push_url(
            &mut xml,
            &url::full_url_for(config, &config.blog_dir),
            &today,
            "daily",
            "0.8",
        );

        for category in categories {
            let loc = url::full_url_for(
                config,
                &format!("{}/{}", config.category_dir, url::category_slug(category)),
            );
            push_url(&mut xml, &loc, &today, "weekly", "0.8");
        }

        for post in posts {
            // Post dates that fail to parse fall back to today
            let lastmod = date::parse_date(&post.meta.date)
                .map(date::format_ymd)
                .unwrap_or_else(|| today.clone());
            push_url(&mut xml, &post.permalink(config), &lastmod, "monthly", "0.7");
        }

        xml.push_str("</urlset>\n");

        let output = self.blog.public_dir.join("sitemap.xml");
        fs::write(&output, xml)?;
        tracing::info!("Generated sitemap.xml");
        Ok(())
    }

    fn generate_robots(&self) -> Result<()> {
        let sitemap = url::full_url_for(&self.blog.config, "sitemap.xml");
        let robots = format!(
            "User-agent: *\nAllow: /\nDisallow: /private/\n\nSitemap: {}\n",
            sitemap
        );

        let output = self.blog.public_dir.join("robots.txt");
        fs::write(&output, robots)?;
        tracing::info!("Generated robots.txt");
        Ok(())
    }

    /// Search index consumed by the client-side search box
    fn generate_search_index(&self, posts: &[Post]) -> Result<()> {
        let config = &self.blog.config;
        let search_data: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                serde_json::json!({
                    "slug": p.slug,
                    "url": p.path(config),
                    "title": p.meta.title,
                    "excerpt": p.meta.excerpt,
                    "category": p.meta.category,
                    "tags": p.meta.tags,
                    "date": p.meta.date,
                })
            })
            .collect();

        let output = self.blog.public_dir.join("search.json");
        fs::write(&output, serde_json::to_string_pretty(&search_data)?)?;
        tracing::info!("Generated search.json");
        Ok(())
    }

    fn generate_posts_feed(&self, posts: &[Post]) -> Result<()> {
        let output = self.blog.public_dir.join("posts.json");
        fs::write(&output, serde_json::to_string_pretty(posts)?)?;
        tracing::info!("Generated posts.json");
        Ok(())
    }

    fn generate_stats_feed(&self, now: DateTime<Utc>) -> Result<()> {
        let stats = self.index.category_stats(now)?;
        let output = self.blog.public_dir.join("stats.json");
        fs::write(&output, serde_json::to_string_pretty(&stats)?)?;
        tracing::info!("Generated stats.json");
        Ok(())
    }
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    xml.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    xml.push_str(&format!("    <priority>{}</priority>\n", priority));
    xml.push_str("  </url>\n");
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::TimeZone;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, front: &str) {
        fs::write(dir.join(name), format!("---\n{}---\nbody", front)).unwrap();
    }

    fn test_blog() -> (TempDir, Blog) {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig {
            url: "https://example.com".to_string(),
            content_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            ..SiteConfig::default()
        };
        fs::create_dir_all(tmp.path().join("posts")).unwrap();
        let blog = Blog::with_config(tmp.path(), config);
        (tmp, blog)
    }

    #[test]
    fn test_generate_writes_all_artifacts() {
        let (tmp, blog) = test_blog();
        write_post(
            &tmp.path().join("posts"),
            "hello.mdx",
            "title: Hello\ndate: \"2024-06-01\"\ncategory: Life Story\n",
        );

        let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        Generator::new(&blog).generate(now).unwrap();

        for artifact in ["sitemap.xml", "robots.txt", "search.json", "posts.json", "stats.json"] {
            assert!(blog.public_dir.join(artifact).exists(), "{}", artifact);
        }
    }

    #[test]
    fn test_sitemap_urls_and_lastmod() {
        let (tmp, blog) = test_blog();
        write_post(
            &tmp.path().join("posts"),
            "hello.mdx",
            "title: Hello\ndate: \"2024-06-01\"\ncategory: Life Story\n",
        );

        let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        Generator::new(&blog).generate(now).unwrap();

        let sitemap = fs::read_to_string(blog.public_dir.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/blog/hello</loc>"));
        assert!(sitemap.contains("<loc>https://example.com/category/life-story</loc>"));
        assert!(sitemap.contains("<lastmod>2024-06-01</lastmod>"));
        assert!(sitemap.contains("<lastmod>2024-06-10</lastmod>"));
    }

    #[test]
    fn test_sitemap_unparseable_date_falls_back_to_today() {
        let (tmp, blog) = test_blog();
        write_post(
            &tmp.path().join("posts"),
            "odd.mdx",
            "title: Odd\ndate: \"someday\"\n",
        );

        let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        Generator::new(&blog).generate(now).unwrap();

        let sitemap = fs::read_to_string(blog.public_dir.join("sitemap.xml")).unwrap();
        let entry = sitemap
            .split("<url>")
            .find(|e| e.contains("/blog/odd"))
            .unwrap();
        assert!(entry.contains("<lastmod>2024-06-10</lastmod>"));
    }

    #[test]
    fn test_robots_points_at_sitemap() {
        let (_tmp, blog) = test_blog();
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        Generator::new(&blog).generate(now).unwrap();

        let robots = fs::read_to_string(blog.public_dir.join("robots.txt")).unwrap();
        assert!(robots.contains("Disallow: /private/"));
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
    }

    #[test]
    fn test_search_index_shape() {
        let (tmp, blog) = test_blog();
        write_post(
            &tmp.path().join("posts"),
            "hello.mdx",
            "title: Hello\ndate: \"2024-06-01\"\nexcerpt: Hi\ntags: [a, b]\n",
        );

        let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        Generator::new(&blog).generate(now).unwrap();

        let raw = fs::read_to_string(blog.public_dir.join("search.json")).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["slug"], "hello");
        assert_eq!(entries[0]["url"], "/blog/hello");
        assert_eq!(entries[0]["tags"][1], "b");
    }
}
