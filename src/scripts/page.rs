//! Content pages and the site-wide global script

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use super::{InjectionPoint, Snippet};
use crate::config::ScriptsConfig;

/// A post folder and its optional local scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPage {
    /// Folder name of the post
    pub slug: String,

    /// Local `preload.*` script
    pub pre_load: Option<Snippet>,

    /// Local `index.*` script
    pub post_load: Option<Snippet>,
}

impl ContentPage {
    /// Create a page with no local scripts
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            pre_load: None,
            post_load: None,
        }
    }

    /// Attach a local script at the given point
    pub fn with_script(mut self, point: InjectionPoint, snippet: impl Into<Snippet>) -> Self {
        *self.slot_mut(point) = Some(snippet.into());
        self
    }

    /// Local script at the given point, if any
    pub fn script(&self, point: InjectionPoint) -> Option<&Snippet> {
        match point {
            InjectionPoint::PreLoad => self.pre_load.as_ref(),
            InjectionPoint::PostLoad => self.post_load.as_ref(),
        }
    }

    /// Load a page from its post folder. The slug is the folder name,
    /// lossily converted if it is not UTF-8.
    pub fn load(dir: &Path) -> Result<Self> {
        let slug = dir
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut page = Self::new(slug);
        for (point, path) in find_hooks(dir)? {
            tracing::debug!("Found {} script for {}: {:?}", point, page.slug, path);
            *page.slot_mut(point) = Some(read_snippet(&path)?);
        }

        Ok(page)
    }

    fn slot_mut(&mut self, point: InjectionPoint) -> &mut Option<Snippet> {
        match point {
            InjectionPoint::PreLoad => &mut self.pre_load,
            InjectionPoint::PostLoad => &mut self.post_load,
        }
    }
}

/// Site-wide scripts applied to every page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalScript {
    pub pre_load: Option<Snippet>,
    pub post_load: Option<Snippet>,
}

impl GlobalScript {
    /// No global scripts
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single global script at the given point
    pub fn at(point: InjectionPoint, snippet: impl Into<Snippet>) -> Self {
        let mut global = Self::default();
        match point {
            InjectionPoint::PreLoad => global.pre_load = Some(snippet.into()),
            InjectionPoint::PostLoad => global.post_load = Some(snippet.into()),
        }
        global
    }

    pub fn script(&self, point: InjectionPoint) -> Option<&Snippet> {
        match point {
            InjectionPoint::PreLoad => self.pre_load.as_ref(),
            InjectionPoint::PostLoad => self.post_load.as_ref(),
        }
    }

    /// Load the global scripts from the site scripts directory.
    ///
    /// A missing directory yields no global scripts. Stages disabled in the
    /// config are skipped even if the file exists.
    pub fn load(scripts_dir: &Path, config: &ScriptsConfig) -> Result<Self> {
        let mut global = Self::default();
        if !scripts_dir.is_dir() {
            return Ok(global);
        }

        for (point, path) in find_hooks(scripts_dir)? {
            let enabled = match point {
                InjectionPoint::PreLoad => config.global_pre_load,
                InjectionPoint::PostLoad => config.global_post_load,
            };
            if !enabled {
                tracing::debug!("Global {} script disabled, skipping {:?}", point, path);
                continue;
            }

            tracing::debug!("Found global {} script: {:?}", point, path);
            let snippet = Some(read_snippet(&path)?);
            match point {
                InjectionPoint::PreLoad => global.pre_load = snippet,
                InjectionPoint::PostLoad => global.post_load = snippet,
            }
        }

        Ok(global)
    }
}

/// Read a script file as-is; bytes that are not UTF-8 are replaced
fn read_snippet(path: &Path) -> Result<Snippet> {
    let bytes = fs::read(path)?;
    Ok(Snippet::new(String::from_utf8_lossy(&bytes)))
}

/// Find the hook files directly inside `dir`, at most one per injection point.
///
/// Files are visited in name order so that the first of `index.js` and
/// `index.mjs` wins deterministically.
fn find_hooks(dir: &Path) -> Result<Vec<(InjectionPoint, PathBuf)>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut hooks: Vec<(InjectionPoint, PathBuf)> = Vec::new();
    for path in paths {
        let Some(point) = InjectionPoint::from_path(&path) else {
            continue;
        };

        if let Some((_, kept)) = hooks.iter().find(|(p, _)| *p == point) {
            tracing::warn!(
                "Multiple {} scripts in {:?}, using {:?} and ignoring {:?}",
                point,
                dir,
                kept,
                path
            );
            continue;
        }

        hooks.push((point, path));
    }

    Ok(hooks)
}
