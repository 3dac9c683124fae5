//! Site configuration (velcro.toml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::scripts::ScriptOrder;

/// Name of the config file at the site root
pub const CONFIG_FILE: &str = "velcro.toml";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Layout wrapped around every post page
    pub base_html: String,
    /// Where the built site is written
    pub output_dir: String,
    /// Post folders starting with this prefix are drafts
    pub draft_prefix: String,

    pub dirs: DirsConfig,
    pub scripts: ScriptsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_html: "src/base.html".to_string(),
            output_dir: "dist".to_string(),
            draft_prefix: "_".to_string(),
            dirs: DirsConfig::default(),
            scripts: ScriptsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Whether a post folder name marks a draft
    pub fn is_draft(&self, slug: &str) -> bool {
        !self.draft_prefix.is_empty() && slug.starts_with(&self.draft_prefix)
    }
}

/// Source directories, relative to the site root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirsConfig {
    pub root: String,
    pub pages: String,
    pub posts: String,
    pub assets: String,
    pub styles: String,
    pub scripts: String,
    pub components: String,
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            root: "src".to_string(),
            pages: "src/pages".to_string(),
            posts: "src/posts".to_string(),
            assets: "src/assets".to_string(),
            styles: "src/styles".to_string(),
            scripts: "src/scripts".to_string(),
            components: "src/components".to_string(),
        }
    }
}

/// Script hook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    /// Global vs. local order within each stage
    pub order: ScriptOrder,
    /// Inject the site `preload` script into every post
    pub global_pre_load: bool,
    /// Inject the site `index` script into every post
    pub global_post_load: bool,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            order: ScriptOrder::GlobalFirst,
            global_pre_load: true,
            global_post_load: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.output_dir, "dist");
        assert_eq!(config.dirs.posts, "src/posts");
        assert_eq!(config.scripts.order, ScriptOrder::GlobalFirst);
        assert!(config.scripts.global_post_load);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
output_dir = "public"
draft_prefix = "draft-"

[dirs]
posts = "content/posts"

[scripts]
order = "local-first"
global_pre_load = false
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.output_dir, "public");
        assert_eq!(config.dirs.posts, "content/posts");
        // Unset keys keep their defaults
        assert_eq!(config.dirs.scripts, "src/scripts");
        assert_eq!(config.scripts.order, ScriptOrder::LocalFirst);
        assert!(!config.scripts.global_pre_load);
        assert!(config.scripts.global_post_load);
    }

    #[test]
    fn test_is_draft() {
        let mut config = SiteConfig::default();
        assert!(config.is_draft("_wip"));
        assert!(!config.is_draft("example-post-one"));

        config.draft_prefix = String::new();
        assert!(!config.is_draft("_wip"));
    }
}
