//! Build the static site

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::build::{BuildOptions, BuildReport, Builder};
use crate::Velcro;

/// Build the site once
pub fn run(velcro: &Velcro, options: BuildOptions) -> Result<BuildReport> {
    let start = Instant::now();

    let builder = Builder::new(velcro, options)?;
    let report = builder.run()?;

    tracing::info!(
        "Built {} posts ({} HTML files, {} copied, {} drafts skipped) in {:.2}s",
        report.posts,
        report.html_files,
        report.copied_files,
        report.drafts_skipped,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Watch the source tree and rebuild on changes. Blocks until the watcher stops.
pub fn watch(velcro: &Velcro, options: BuildOptions) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&velcro.source_dir, notify::RecursiveMode::Recursive)?;

    let config_path = velcro.config_path();
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", velcro.source_dir);

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, rebuilding...");
                    // Config may have changed, so reopen the site
                    let result = Velcro::new(&velcro.base_dir).and_then(|v| run(&v, options));
                    if let Err(e) = result {
                        tracing::error!("Build failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
