//! Post search
//!
//! Case-insensitive substring search over title, excerpt, category and
//! tags, the same fields the site's search box looks at.

use super::Post;

/// Filter posts matching a free-text query. An empty query matches all.
pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts.iter().filter(|p| matches(p, &needle)).collect()
}

fn matches(post: &Post, needle: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        post.meta.title,
        post.meta.excerpt,
        post.meta.category.as_deref().unwrap_or(""),
        post.meta.tags.join(" ")
    )
    .to_lowercase();
    haystack.contains(needle)
}
