//! Content index - translates a directory of content files into queryable
//! post records.
//!
//! Every operation re-reads and re-parses the backing directory; there is
//! no cache and no invalidation. Fully deterministic given a file-system
//! snapshot and a fixed `now` for the stats queries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{FrontMatter, Post};
use crate::config::{FreshnessConfig, SiteConfig};
use crate::helpers::date;

/// Content file extensions recognized by the index
const CONTENT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Errors surfaced by index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("post not found: {slug}")]
    NotFound { slug: String },

    #[error("malformed content in {slug}: {reason}")]
    MalformedContent { slug: String, reason: String },

    #[error("failed to read content directory {dir:?}")]
    Io {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Derived per-category freshness aggregate, computed on demand
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub post_count: usize,
    /// Raw date string of the most recent post in the category
    pub last_updated: String,
    pub days_since_last_update: i64,
    pub is_stale: bool,
    pub is_fresh: bool,
}

/// File-system-backed post index
pub struct ContentIndex {
    content_dir: PathBuf,
    calendar_sort: bool,
    freshness: FreshnessConfig,
}

impl ContentIndex {
    /// Create an index over a content directory with default options
    pub fn new<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
            calendar_sort: false,
            freshness: FreshnessConfig::default(),
        }
    }

    /// Create an index configured from the site config
    pub fn from_config(base_dir: &Path, config: &SiteConfig) -> Self {
        Self {
            content_dir: base_dir.join(&config.content_dir),
            calendar_sort: config.calendar_sort,
            freshness: config.freshness.clone(),
        }
    }

    /// File identifiers in the content directory: entries carrying a
    /// content extension whose name does not start with `_` (underscore
    /// files are partials, not posts). Directory enumeration order.
    pub fn slugs(&self) -> Result<Vec<String>, IndexError> {
        let mut slugs = Vec::new();

        for entry in WalkDir::new(&self.content_dir).max_depth(1) {
            let entry = entry.map_err(|e| IndexError::Io {
                dir: self.content_dir.clone(),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('_') {
                continue;
            }
            if !is_content_file(entry.path()) {
                continue;
            }
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                slugs.push(stem.to_string());
            }
        }

        Ok(slugs)
    }

    /// Load one post by slug. A trailing content extension on the slug is
    /// stripped first, so `slugs()` output round-trips.
    pub fn get(&self, slug: &str) -> Result<Post, IndexError> {
        let slug = strip_content_extension(slug);

        let raw = CONTENT_EXTENSIONS
            .iter()
            .map(|ext| self.content_dir.join(format!("{}.{}", slug, ext)))
            .find_map(|path| std::fs::read_to_string(path).ok())
            .ok_or_else(|| IndexError::NotFound {
                slug: slug.to_string(),
            })?;

        let (meta, body) =
            FrontMatter::parse(&raw).map_err(|e| IndexError::MalformedContent {
                slug: slug.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Post {
            slug: slug.to_string(),
            meta,
            content: body.to_string(),
        })
    }

    /// All posts, drafts excluded unless asked for, sorted descending by
    /// the raw `date` string. The sort compares strings, not calendars,
    /// unless `calendar_sort` is enabled in the config.
    ///
    /// A single unreadable or malformed file fails the whole listing.
    pub fn all_posts(&self, include_drafts: bool) -> Result<Vec<Post>, IndexError> {
        let mut posts = self
            .slugs()?
            .iter()
            .map(|slug| self.get(slug))
            .collect::<Result<Vec<_>, _>>()?;

        posts.retain(|p| include_drafts || !p.meta.draft);
        self.sort_posts(&mut posts);
        Ok(posts)
    }

    /// Only posts marked `draft: true`, same sort order as `all_posts`
    pub fn drafts(&self) -> Result<Vec<Post>, IndexError> {
        let mut posts = self
            .slugs()?
            .iter()
            .map(|slug| self.get(slug))
            .collect::<Result<Vec<_>, _>>()?;

        posts.retain(|p| p.meta.draft);
        self.sort_posts(&mut posts);
        Ok(posts)
    }

    /// Published posts whose category equals `name` case-insensitively.
    /// Callers map URL slugs back to the exact category string first.
    pub fn by_category(&self, name: &str) -> Result<Vec<Post>, IndexError> {
        let needle = name.to_lowercase();
        let mut posts = self.all_posts(false)?;
        posts.retain(|p| {
            p.meta
                .category
                .as_deref()
                .map(|c| c.to_lowercase() == needle)
                .unwrap_or(false)
        });
        Ok(posts)
    }

    /// Distinct non-empty categories across published posts. Order is
    /// incidental; sort explicitly before displaying.
    pub fn categories(&self) -> Result<Vec<String>, IndexError> {
        let posts = self.all_posts(false)?;
        Ok(distinct_categories(&posts))
    }

    /// Per-category freshness statistics, sorted ascending by days since
    /// the latest post (freshest category first). `now` is injected so
    /// callers and tests control the clock.
    pub fn category_stats(&self, now: DateTime<Utc>) -> Result<Vec<CategoryStat>, IndexError> {
        let posts = self.all_posts(false)?;
        let categories = distinct_categories(&posts);

        let mut stats: Vec<CategoryStat> = categories
            .into_iter()
            .map(|category| {
                let category_posts: Vec<&Post> = posts
                    .iter()
                    .filter(|p| p.meta.category.as_deref() == Some(category.as_str()))
                    .collect();

                // Posts are already sorted descending, so the first match
                // is the most recent one. An empty date reads as no date.
                let last_updated = category_posts
                    .first()
                    .map(|p| p.meta.date.clone())
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "N/A".to_string());

                let days = date::days_since(now, &last_updated);

                CategoryStat {
                    category,
                    post_count: category_posts.len(),
                    last_updated,
                    days_since_last_update: days,
                    is_stale: days > self.freshness.stale_days,
                    is_fresh: days <= self.freshness.fresh_days,
                }
            })
            .collect();

        stats.sort_by_key(|s| s.days_since_last_update);
        Ok(stats)
    }

    fn sort_posts(&self, posts: &mut [Post]) {
        if self.calendar_sort {
            posts.sort_by_key(|p| std::cmp::Reverse(date::sort_key(&p.meta.date)));
        } else {
            posts.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));
        }
    }
}

fn distinct_categories(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for post in posts {
        if let Some(c) = post.meta.category.as_deref() {
            if !c.is_empty() && seen.insert(c.to_string()) {
                categories.push(c.to_string());
            }
        }
    }
    categories
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CONTENT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

fn strip_content_extension(slug: &str) -> &str {
    for ext in CONTENT_EXTENSIONS {
        if let Some(stripped) = slug.strip_suffix(&format!(".{}", ext)) {
            return stripped;
        }
    }
    slug
}
