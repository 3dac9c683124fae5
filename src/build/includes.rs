//! Component includes - `<!-- include="@components/name" -->`

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::VelcroError;

lazy_static! {
    static ref INCLUDE: Regex = Regex::new(r#"<!--\s*include\s*=\s*"(@[^"]+)"\s*-->"#).unwrap();
    static ref CONTENT_MARKER: Regex =
        Regex::new(r#"<!--\s*include\s*=\s*"@content"\s*-->"#).unwrap();
}

const COMPONENT_PREFIX: &str = "@components/";

/// Expands component includes from a components directory
pub struct IncludeResolver<'a> {
    components_dir: &'a Path,
}

impl<'a> IncludeResolver<'a> {
    pub fn new(components_dir: &'a Path) -> Self {
        Self { components_dir }
    }

    /// Expand every component include in `content`, recursively.
    ///
    /// `@content` markers and unknown `@` targets are left as they are.
    pub fn expand(&self, content: &str) -> Result<String, VelcroError> {
        let mut chain = Vec::new();
        self.expand_with_chain(content, &mut chain)
    }

    fn expand_with_chain(
        &self,
        content: &str,
        chain: &mut Vec<PathBuf>,
    ) -> Result<String, VelcroError> {
        let mut result = String::with_capacity(content.len());
        let mut last = 0;

        for caps in INCLUDE.captures_iter(content) {
            let (Some(whole), Some(target)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            result.push_str(&content[last..whole.start()]);
            last = whole.end();

            let Some(name) = target.as_str().strip_prefix(COMPONENT_PREFIX) else {
                result.push_str(whole.as_str());
                continue;
            };
            let name = name.strip_suffix(".html").unwrap_or(name);
            let path = self.components_dir.join(format!("{}.html", name));

            if chain.contains(&path) {
                return Err(VelcroError::CircularInclude(name.to_string()));
            }

            tracing::debug!("Including component {:?}", path);
            let component = fs::read_to_string(&path).map_err(|source| {
                VelcroError::ComponentRead {
                    name: name.to_string(),
                    source,
                }
            })?;

            chain.push(path);
            let expanded = self.expand_with_chain(&component, chain);
            chain.pop();

            result.push_str(&expanded?);
        }

        result.push_str(&content[last..]);
        Ok(result)
    }
}

/// Place `content` into a layout at its `@content` marker.
///
/// A layout without a marker gets the content appended.
pub fn wrap_in_layout(layout: &str, content: &str) -> String {
    match CONTENT_MARKER.find(layout) {
        Some(m) => format!("{}{}{}", &layout[..m.start()], content, &layout[m.end()..]),
        None => {
            tracing::warn!("Base layout has no @content include, appending page content");
            format!("{}{}", layout, content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn components(files: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (name, body) in files {
            let path = tmp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        tmp
    }

    #[test]
    fn test_expand_component() {
        let tmp = components(&[("header.html", "<header>Blog</header>")]);
        let resolver = IncludeResolver::new(tmp.path());

        let out = resolver
            .expand(r#"<body><!-- include="@components/header" --><p>x</p></body>"#)
            .unwrap();
        assert_eq!(out, "<body><header>Blog</header><p>x</p></body>");
    }

    #[test]
    fn test_expand_with_html_suffix_and_spacing() {
        let tmp = components(&[("nav/menu.html", "<nav></nav>")]);
        let resolver = IncludeResolver::new(tmp.path());

        let out = resolver
            .expand(r#"<!--include = "@components/nav/menu.html"-->"#)
            .unwrap();
        assert_eq!(out, "<nav></nav>");
    }

    #[test]
    fn test_nested_and_repeated_components() {
        let tmp = components(&[
            ("header.html", r#"<header><!-- include="@components/logo" --></header>"#),
            ("logo.html", "LOGO"),
        ]);
        let resolver = IncludeResolver::new(tmp.path());

        let out = resolver
            .expand(r#"<!-- include="@components/header" --><!-- include="@components/logo" -->"#)
            .unwrap();
        assert_eq!(out, "<header>LOGO</header>LOGO");
    }

    #[test]
    fn test_content_and_unknown_markers_are_kept() {
        let tmp = components(&[]);
        let resolver = IncludeResolver::new(tmp.path());

        let input = r#"<main><!-- include="@content" --></main><!-- include="@partials/x" -->"#;
        assert_eq!(resolver.expand(input).unwrap(), input);
    }

    #[test]
    fn test_circular_include_is_an_error() {
        let tmp = components(&[
            ("a.html", r#"<!-- include="@components/b" -->"#),
            ("b.html", r#"<!-- include="@components/a" -->"#),
        ]);
        let resolver = IncludeResolver::new(tmp.path());

        let err = resolver
            .expand(r#"<!-- include="@components/a" -->"#)
            .unwrap_err();
        assert!(matches!(err, VelcroError::CircularInclude(name) if name == "a"));
    }

    #[test]
    fn test_missing_component_is_an_error() {
        let tmp = components(&[]);
        let resolver = IncludeResolver::new(tmp.path());

        let err = resolver
            .expand(r#"<!-- include="@components/ghost" -->"#)
            .unwrap_err();
        assert!(matches!(err, VelcroError::ComponentRead { name, .. } if name == "ghost"));
    }

    #[test]
    fn test_wrap_in_layout() {
        let layout = r#"<html><body><!-- include="@content" --></body></html>"#;
        assert_eq!(
            wrap_in_layout(layout, "<p>post</p>"),
            "<html><body><p>post</p></body></html>"
        );
        assert_eq!(wrap_in_layout("<hr>", "<p>post</p>"), "<hr><p>post</p>");
    }
}
