//! Script injector - decides which snippets a page gets at each injection point

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ContentPage, GlobalScript, InjectionPoint, Snippet};

/// Order of global and local snippets within one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptOrder {
    /// Site-wide snippet runs before the page's own (e.g. analytics first)
    #[default]
    GlobalFirst,
    /// Page's own snippet runs before the site-wide one
    LocalFirst,
}

/// Snippets to embed into one page, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedScripts {
    pub pre_stage: Vec<Snippet>,
    pub post_stage: Vec<Snippet>,
}

impl ResolvedScripts {
    pub fn is_empty(&self) -> bool {
        self.pre_stage.is_empty() && self.post_stage.is_empty()
    }
}

/// Resolves the scripts of each page against the site's global script.
///
/// The global script is loaded once and owned here; resolution never mutates
/// it, so one injector can be shared across pages and threads.
#[derive(Debug, Clone, Default)]
pub struct ScriptInjector {
    global: GlobalScript,
    order: ScriptOrder,
}

impl ScriptInjector {
    pub fn new(global: GlobalScript, order: ScriptOrder) -> Self {
        Self { global, order }
    }

    /// Resolve both stages for a page
    pub fn resolve(&self, page: &ContentPage) -> ResolvedScripts {
        ResolvedScripts {
            pre_stage: self.resolve_stage(page, InjectionPoint::PreLoad),
            post_stage: self.resolve_stage(page, InjectionPoint::PostLoad),
        }
    }

    /// Resolve a batch of pages, keyed by slug in input order
    pub fn resolve_all<'a, I>(&self, pages: I) -> IndexMap<String, ResolvedScripts>
    where
        I: IntoIterator<Item = &'a ContentPage>,
    {
        pages
            .into_iter()
            .map(|page| (page.slug.clone(), self.resolve(page)))
            .collect()
    }

    fn resolve_stage(&self, page: &ContentPage, point: InjectionPoint) -> Vec<Snippet> {
        let global = self.global.script(point);
        let local = page.script(point);

        let (first, second) = match self.order {
            ScriptOrder::GlobalFirst => (global, local),
            ScriptOrder::LocalFirst => (local, global),
        };

        first.into_iter().chain(second).cloned().collect()
    }
}
