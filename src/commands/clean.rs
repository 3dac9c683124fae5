//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Velcro;

/// Remove the output directory if present
pub fn run(velcro: &Velcro) -> Result<()> {
    if velcro.output_dir.exists() {
        fs::remove_dir_all(&velcro.output_dir)?;
        tracing::info!("Deleted: {:?}", velcro.output_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", velcro.output_dir);
    }

    Ok(())
}
