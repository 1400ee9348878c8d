//! Content module - post parsing, indexing and search

mod frontmatter;
pub mod index;
mod post;
pub mod search;

pub use frontmatter::FrontMatter;
pub use index::{CategoryStat, ContentIndex, IndexError};
pub use post::Post;
