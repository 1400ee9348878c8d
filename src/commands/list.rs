//! List site content

use anyhow::Result;
use chrono::Utc;

use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let index = blog.index();

    match content_type {
        "post" | "posts" => {
            let posts = index.all_posts(false)?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.meta.date,
                    post.meta.title,
                    post.meta.category.as_deref().unwrap_or("-")
                );
            }
        }
        "draft" | "drafts" => {
            let drafts = index.drafts()?;
            println!("Drafts ({}):", drafts.len());
            for post in drafts {
                println!("  {} - {}", post.meta.date, post.meta.title);
            }
        }
        "category" | "categories" => {
            let mut categories = index.categories()?;
            categories.sort();
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {}", category);
            }
        }
        "stats" => {
            let stats = index.category_stats(Utc::now())?;
            println!("Category freshness ({}):", stats.len());
            for stat in stats {
                let label = if stat.is_fresh {
                    "fresh"
                } else if stat.is_stale {
                    "stale"
                } else {
                    "ok"
                };
                println!(
                    "  {} - {} posts, last updated {} ({} days ago, {})",
                    stat.category,
                    stat.post_count,
                    stat.last_updated,
                    stat.days_since_last_update,
                    label
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, draft, category, stats",
                content_type
            );
        }
    }

    Ok(())
}
