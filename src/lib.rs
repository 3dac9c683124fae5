//! velcro: a small static blog generator
//!
//! Posts live in their own folders and may carry a `preload.js` and an
//! `index.js` that are embedded into the generated page, alongside the
//! site-wide scripts from the scripts directory.

pub mod build;
pub mod commands;
pub mod config;
pub mod error;
pub mod helpers;
pub mod scripts;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::VelcroError;

/// A velcro site rooted at a directory
#[derive(Debug, Clone)]
pub struct Velcro {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source root, watched for changes
    pub source_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Velcro {
    /// Open a site, reading `velcro.toml` if there is one
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config::CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", config::CONFIG_FILE);
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.dirs.root);
        let output_dir = base_dir.join(&config.output_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            output_dir,
        })
    }

    /// Resolve a config path against the base directory
    pub fn path(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Path of the config file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(config::CONFIG_FILE)
    }

    /// Build the static site
    pub fn build(&self, options: build::BuildOptions) -> Result<build::BuildReport> {
        commands::build::run(self, options)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
