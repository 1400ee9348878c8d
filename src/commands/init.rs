//! Initialize a new blog directory

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title: MyBlog
description: ""
author: John Doe
language: en
secondary_language: ml

# URL
url: http://example.com
root: /

# Directory
content_dir: content/posts
public_dir: public

# Writing
new_post_name: :title.mdx
render_drafts: false
"#;

const SAMPLE_POST: &str = r#"---
title: "Hello World"
date: "2024-01-01"
excerpt: "The first post."
category: "Life Story"
tags:
  - welcome
---

Welcome to your new blog. Edit or delete this post, then run
`mdxblog generate` to rebuild the derived artifacts.
"#;

/// Create the config, content directory and a sample post
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Already initialized: {:?}", config_path);
    }

    let posts_dir = target_dir.join("content/posts");
    fs::create_dir_all(&posts_dir)?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(posts_dir.join("hello-world.mdx"), SAMPLE_POST)?;

    tracing::info!("Initialized blog in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blog;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_working_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let blog = Blog::new(tmp.path()).unwrap();
        let posts = blog.index().all_posts(false).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");

        // Re-running refuses to clobber the config
        assert!(init_site(tmp.path()).is_err());
    }
}
