//! Generate the derived site artifacts

use anyhow::Result;
use chrono::Utc;

use crate::generator::Generator;
use crate::Blog;

pub fn run(blog: &Blog) -> Result<()> {
    let generator = Generator::new(blog);
    generator.generate(Utc::now())?;
    Ok(())
}
