//! Configuration module

mod site;

pub use site::FreshnessConfig;
pub use site::SiteConfig;
