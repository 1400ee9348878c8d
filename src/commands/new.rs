//! Create a new post or draft

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Create a new content file with a front-matter scaffold.
///
/// Drafts get `draft: true` and publish by flipping that flag; there is
/// no separate drafts directory.
pub fn create_post(blog: &Blog, title: &str, draft: bool) -> Result<()> {
    let now = chrono::Local::now();

    fs::create_dir_all(&blog.content_dir)?;

    let slug = slug::slugify(title);
    let filename = blog
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    let file_path = blog.content_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let draft_line = if draft { "draft: true\n" } else { "" };
    let content = format!(
        "---\ntitle: \"{}\"\ndate: \"{}\"\nexcerpt: \"\"\n{}---\n",
        title,
        now.format("%Y-%m-%d"),
        draft_line
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_and_draft() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), SiteConfig::default());

        create_post(&blog, "Hello World", false).unwrap();
        let post = blog.index().get("hello-world").unwrap();
        assert_eq!(post.meta.title, "Hello World");
        assert!(!post.meta.draft);

        create_post(&blog, "Work in Progress", true).unwrap();
        let drafts = blog.index().drafts().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].meta.title, "Work in Progress");
    }

    #[test]
    fn test_create_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), SiteConfig::default());

        create_post(&blog, "Same Title", false).unwrap();
        assert!(create_post(&blog, "Same Title", false).is_err());
    }
}
