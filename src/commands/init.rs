//! Initialize a new velcro blog

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::VelcroError;
use crate::templates::{INIT_TEMPLATE, KEEP_FILE};

lazy_static! {
    static ref BLOG_NAME: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Create a new blog named `name` inside `parent_dir`, returning its path
pub fn init_site(parent_dir: &Path, name: &str) -> Result<PathBuf> {
    tracing::debug!("Validating blog name {:?}", name);
    if !BLOG_NAME.is_match(name) {
        return Err(VelcroError::InvalidBlogName(name.to_string()).into());
    }

    let target_dir = parent_dir.join(name);
    if target_dir.exists() {
        return Err(VelcroError::AlreadyExists(target_dir).into());
    }

    tracing::info!("Initializing your velcro blog...");
    fs::create_dir_all(&target_dir)?;
    write_template(&target_dir)?;

    Ok(target_dir)
}

/// Write the embedded starter site into `target_dir`
fn write_template(target_dir: &Path) -> Result<()> {
    for file in INIT_TEMPLATE {
        let dest = target_dir.join(file.path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.file_name().and_then(|n| n.to_str()) == Some(KEEP_FILE) {
            continue;
        }

        tracing::debug!("Writing {:?}", dest);
        fs::write(&dest, file.content)?;
    }

    Ok(())
}
