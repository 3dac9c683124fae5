//! Configuration module

mod site;

pub use site::DirsConfig;
pub use site::ScriptsConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILE;
