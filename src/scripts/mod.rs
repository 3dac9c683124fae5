//! Script hooks - per-post and site-wide scripts injected into generated pages
//!
//! Every post folder may carry a `preload.js` (run before the page content is
//! parsed) and an `index.js` (run after). The site scripts directory may carry
//! the same pair, applied to every post.

mod injector;
mod page;

pub use injector::{ResolvedScripts, ScriptInjector, ScriptOrder};
pub use page::{ContentPage, GlobalScript};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// File extensions recognised as script hooks
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs"];

/// Point in the page lifecycle at which a snippet runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectionPoint {
    /// Before the page content is parsed (`preload.*`)
    PreLoad,
    /// After the page content is loaded (`index.*`)
    PostLoad,
}

impl InjectionPoint {
    /// File stem that selects this injection point
    pub fn file_stem(self) -> &'static str {
        match self {
            InjectionPoint::PreLoad => "preload",
            InjectionPoint::PostLoad => "index",
        }
    }

    /// Map a script file to its injection point by file identity.
    ///
    /// `preload.js` maps to `PreLoad` and `index.js` to `PostLoad`. Files with a
    /// non-script extension (e.g. `index.html`) are not hooks.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if !SCRIPT_EXTENSIONS.contains(&ext) {
            return None;
        }

        match path.file_stem()?.to_str()? {
            "preload" => Some(InjectionPoint::PreLoad),
            "index" => Some(InjectionPoint::PostLoad),
            _ => None,
        }
    }
}

impl fmt::Display for InjectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectionPoint::PreLoad => write!(f, "pre-load"),
            InjectionPoint::PostLoad => write!(f, "post-load"),
        }
    }
}

/// An opaque unit of script text, embedded verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snippet(String);

impl Snippet {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Snippet {
    fn from(body: &str) -> Self {
        Self(body.to_string())
    }
}

impl From<String> for Snippet {
    fn from(body: String) -> Self {
        Self(body)
    }
}
