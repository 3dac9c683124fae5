//! Site builder - turns the source tree into the output directory
//!
//! Phases run in order: pages, posts, assets, scripts, styles. Every HTML file
//! has its component includes expanded; post pages are also wrapped in the
//! base layout and get their resolved scripts embedded.

mod includes;
mod validate;

pub use includes::{wrap_in_layout, IncludeResolver};
pub use validate::{validate_html, HtmlIssue};

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::VelcroError;
use crate::helpers::embed_scripts;
use crate::scripts::{ContentPage, GlobalScript, InjectionPoint, ResolvedScripts, ScriptInjector};
use crate::Velcro;

/// Build options from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Build post folders carrying the draft prefix too
    pub drafts: bool,
}

/// What a build produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub drafts_skipped: usize,
    pub html_files: usize,
    pub copied_files: usize,
}

/// How an HTML file is treated
#[derive(Clone, Copy)]
enum HtmlKind<'s> {
    /// Post page: base layout plus the post's scripts
    Post(&'s ResolvedScripts),
    /// Standalone page: global scripts only
    Page,
    /// Anything else: includes only
    Plain,
}

/// Builds a site into its output directory
pub struct Builder<'a> {
    velcro: &'a Velcro,
    options: BuildOptions,
    injector: ScriptInjector,
    layout: Option<String>,
    components_dir: PathBuf,
}

impl<'a> Builder<'a> {
    /// Create a builder, loading the global scripts and the base layout once
    pub fn new(velcro: &'a Velcro, options: BuildOptions) -> Result<Self> {
        let config = &velcro.config;

        let global = GlobalScript::load(&velcro.path(&config.dirs.scripts), &config.scripts)?;
        let injector = ScriptInjector::new(global, config.scripts.order);

        let layout_path = velcro.path(&config.base_html);
        let layout = if !config.base_html.is_empty() && layout_path.is_file() {
            tracing::debug!("Using base layout {:?}", layout_path);
            Some(fs::read_to_string(&layout_path)?)
        } else {
            None
        };

        Ok(Self {
            velcro,
            options,
            injector,
            layout,
            components_dir: velcro.path(&config.dirs.components),
        })
    }

    /// Run every build phase
    pub fn run(&self) -> Result<BuildReport> {
        let mut report = BuildReport::default();
        fs::create_dir_all(&self.velcro.output_dir)?;

        tracing::info!("Building pages...");
        self.build_pages(&mut report)?;

        tracing::info!("Building posts...");
        self.build_posts(&mut report)?;

        let dirs = &self.velcro.config.dirs;
        for (name, dir) in [
            ("assets", &dirs.assets),
            ("scripts", &dirs.scripts),
            ("styles", &dirs.styles),
        ] {
            tracing::info!("Building {}...", name);
            self.build_static(&self.velcro.path(dir), name, &mut report)?;
        }

        Ok(report)
    }

    /// Standalone pages land at the output root
    fn build_pages(&self, report: &mut BuildReport) -> Result<()> {
        let pages_dir = self.velcro.path(&self.velcro.config.dirs.pages);
        if !pages_dir.is_dir() {
            return Ok(());
        }

        self.process_directory(&pages_dir, &self.velcro.output_dir, HtmlKind::Page, report)
    }

    fn build_posts(&self, report: &mut BuildReport) -> Result<()> {
        let posts_dir = self.velcro.path(&self.velcro.config.dirs.posts);
        if !posts_dir.is_dir() {
            return Err(VelcroError::MissingPostsDir(posts_dir).into());
        }

        let mut folders = Vec::new();
        for entry in fs::read_dir(&posts_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                folders.push(path);
            }
        }
        folders.sort();

        for folder in folders {
            let page = ContentPage::load(&folder)?;
            if self.velcro.config.is_draft(&page.slug) && !self.options.drafts {
                tracing::debug!("Skipping draft {}", page.slug);
                report.drafts_skipped += 1;
                continue;
            }

            let scripts = self.injector.resolve(&page);
            tracing::debug!(
                "Building post {} ({} pre-load, {} post-load scripts)",
                page.slug,
                scripts.pre_stage.len(),
                scripts.post_stage.len()
            );

            // Output follows the folder name, which is unique on disk
            let Some(name) = folder.file_name() else {
                continue;
            };
            let output = self.velcro.output_dir.join("posts").join(name);
            fs::create_dir_all(&output)?;
            self.process_directory(&folder, &output, HtmlKind::Post(&scripts), report)?;
            report.posts += 1;
        }

        Ok(())
    }

    fn build_static(&self, source: &Path, name: &str, report: &mut BuildReport) -> Result<()> {
        if !source.is_dir() {
            return Ok(());
        }

        let output = self.velcro.output_dir.join(name);
        fs::create_dir_all(&output)?;
        self.process_directory(source, &output, HtmlKind::Plain, report)
    }

    /// Mirror `src` into `dst`, processing HTML and copying everything else
    fn process_directory(
        &self,
        src: &Path,
        dst: &Path,
        kind: HtmlKind<'_>,
        report: &mut BuildReport,
    ) -> Result<()> {
        for entry in WalkDir::new(src)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            let relative = path.strip_prefix(src)?;
            let target = dst.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            // Post hooks are embedded inline, not shipped as files
            if matches!(kind, HtmlKind::Post(_))
                && entry.depth() == 1
                && InjectionPoint::from_path(path).is_some()
            {
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }

            if is_html_file(path) {
                self.process_html(path, &target, kind)?;
                report.html_files += 1;
            } else {
                tracing::debug!("Copying {:?} -> {:?}", path, target);
                fs::copy(path, &target)?;
                report.copied_files += 1;
            }
        }

        Ok(())
    }

    fn process_html(&self, src: &Path, dst: &Path, kind: HtmlKind<'_>) -> Result<()> {
        let content = fs::read_to_string(src)?;

        let content = match (kind, &self.layout) {
            (HtmlKind::Post(_), Some(layout)) => wrap_in_layout(layout, &content),
            _ => content,
        };

        let expanded = IncludeResolver::new(&self.components_dir).expand(&content)?;

        let html = match kind {
            HtmlKind::Post(scripts) => embed_scripts(&expanded, scripts),
            HtmlKind::Page => {
                let page = ContentPage::new(page_slug(src));
                embed_scripts(&expanded, &self.injector.resolve(&page))
            }
            HtmlKind::Plain => expanded,
        };

        for issue in validate_html(&html) {
            tracing::warn!("{}: {:?}", issue, src);
        }

        tracing::debug!("Writing {:?}", dst);
        fs::write(dst, html)?;
        Ok(())
    }
}

fn page_slug(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Check if a file is an HTML file
fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LAYOUT: &str = r#"<html>
<head><title>Blog</title></head>
<body>
<!-- include="@components/header" -->
<!-- include="@content" -->
</body>
</html>
"#;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "src/base.html", LAYOUT);
        write(root, "src/components/header.html", "<header>My Blog</header>");
        write(root, "src/scripts/index.js", "console.log('Hello from GLOBAL index.js!');");
        write(root, "src/styles/main.css", "body { margin: 0; }");
        write(root, "src/posts/one/index.html", "<article>One</article>");
        write(root, "src/posts/one/preload.js", "console.log('Hello from preload.js!');");
        write(root, "src/posts/one/index.js", "console.log('Hello from LOCAL index.js!');");
        write(root, "src/posts/one/cover.png", "png");
        write(root, "src/posts/two/index.html", "<article>Two</article>");
        write(root, "src/posts/two/index.js", "two();");
        tmp
    }

    fn build(root: &Path, options: BuildOptions) -> Result<BuildReport> {
        let velcro = Velcro::new(root)?;
        Builder::new(&velcro, options)?.run()
    }

    #[test]
    fn test_build_post_with_scripts() {
        let tmp = site();
        let report = build(tmp.path(), BuildOptions::default()).unwrap();
        assert_eq!(report.posts, 2);

        let html = fs::read_to_string(tmp.path().join("dist/posts/one/index.html")).unwrap();
        assert!(html.contains("<header>My Blog</header>"));
        assert!(html.contains("<article>One</article>"));

        let pre = html.find("Hello from preload.js!").unwrap();
        let head_close = html.find("</head>").unwrap();
        let global = html.find("Hello from GLOBAL index.js!").unwrap();
        let local = html.find("Hello from LOCAL index.js!").unwrap();
        let article = html.find("<article>").unwrap();
        let body_close = html.find("</body>").unwrap();

        assert!(pre < head_close);
        assert!(article < global && global < local && local < body_close);
    }

    #[test]
    fn test_build_keeps_posts_isolated() {
        let tmp = site();
        build(tmp.path(), BuildOptions::default()).unwrap();

        let two = fs::read_to_string(tmp.path().join("dist/posts/two/index.html")).unwrap();
        assert!(two.contains("two();"));
        assert!(two.contains("Hello from GLOBAL index.js!"));
        assert!(!two.contains("Hello from LOCAL index.js!"));
        assert!(!two.contains("Hello from preload.js!"));

        let one = fs::read_to_string(tmp.path().join("dist/posts/one/index.html")).unwrap();
        assert!(!one.contains("two();"));
    }

    #[test]
    fn test_build_copies_assets_and_skips_post_hooks() {
        let tmp = site();
        let report = build(tmp.path(), BuildOptions::default()).unwrap();

        let out = tmp.path().join("dist");
        assert!(out.join("posts/one/cover.png").exists());
        assert!(!out.join("posts/one/index.js").exists());
        assert!(!out.join("posts/one/preload.js").exists());
        assert!(out.join("scripts/index.js").exists());
        assert!(out.join("styles/main.css").exists());
        assert_eq!(report.copied_files, 3);
        assert_eq!(report.html_files, 2);
    }

    #[test]
    fn test_build_skips_drafts() {
        let tmp = site();
        write(tmp.path(), "src/posts/_wip/index.html", "<p>wip</p>");

        let report = build(tmp.path(), BuildOptions::default()).unwrap();
        assert_eq!(report.drafts_skipped, 1);
        assert!(!tmp.path().join("dist/posts/_wip").exists());

        let report = build(tmp.path(), BuildOptions { drafts: true }).unwrap();
        assert_eq!(report.drafts_skipped, 0);
        assert_eq!(report.posts, 3);
        assert!(tmp.path().join("dist/posts/_wip/index.html").exists());
    }

    #[test]
    fn test_build_pages_get_global_scripts_only() {
        let tmp = site();
        write(
            tmp.path(),
            "src/pages/about.html",
            "<html><head></head><body>About</body></html>",
        );
        build(tmp.path(), BuildOptions::default()).unwrap();

        let about = fs::read_to_string(tmp.path().join("dist/about.html")).unwrap();
        assert!(about.contains("Hello from GLOBAL index.js!"));
        assert!(!about.contains("Hello from LOCAL index.js!"));
        assert!(!about.contains("<header>My Blog</header>"));
    }

    #[test]
    fn test_build_without_posts_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let err = build(tmp.path(), BuildOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VelcroError>(),
            Some(VelcroError::MissingPostsDir(_))
        ));
    }

    #[test]
    fn test_build_reports_circular_include() {
        let tmp = site();
        write(
            tmp.path(),
            "src/components/header.html",
            r#"<!-- include="@components/header" -->"#,
        );
        let err = build(tmp.path(), BuildOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VelcroError>(),
            Some(VelcroError::CircularInclude(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_build_non_utf8_post_folders_stay_separate() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = site();
        let posts = tmp.path().join("src/posts");
        for (name, script) in [(&b"a\xff"[..], "alpha();"), (&b"b\xff"[..], "beta();")] {
            let dir = posts.join(OsStr::from_bytes(name));
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("index.html"), "<article>post</article>").unwrap();
            fs::write(dir.join("index.js"), script).unwrap();
        }

        let report = build(tmp.path(), BuildOptions::default()).unwrap();
        assert_eq!(report.posts, 4);

        let out = tmp.path().join("dist/posts");
        let a = fs::read_to_string(out.join(OsStr::from_bytes(b"a\xff")).join("index.html")).unwrap();
        let b = fs::read_to_string(out.join(OsStr::from_bytes(b"b\xff")).join("index.html")).unwrap();
        assert!(a.contains("alpha();") && !a.contains("beta();"));
        assert!(b.contains("beta();") && !b.contains("alpha();"));
        assert!(!out.join("index.html").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_build_fails_on_dangling_symlink() {
        let tmp = site();
        std::os::unix::fs::symlink(
            tmp.path().join("does-not-exist.png"),
            tmp.path().join("src/posts/one/broken.png"),
        )
        .unwrap();

        assert!(build(tmp.path(), BuildOptions::default()).is_err());
    }
}
