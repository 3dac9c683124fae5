//! Starter site written by `velcro init`
//!
//! All files are embedded directly in the binary.

/// A file of the starter site, relative to the new site's root
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// Placeholder that only exists to keep an otherwise empty directory
pub const KEEP_FILE: &str = ".gitkeep";

macro_rules! template_files {
    ($($path:literal),* $(,)?) => {
        &[$(TemplateFile {
            path: $path,
            content: include_str!(concat!("init/", $path)),
        }),*]
    };
}

/// Every file of the starter site
pub const INIT_TEMPLATE: &[TemplateFile] = template_files![
    "velcro.toml",
    "src/base.html",
    "src/components/header.html",
    "src/pages/index.html",
    "src/posts/example-post-one/index.html",
    "src/posts/example-post-one/preload.js",
    "src/posts/example-post-one/index.js",
    "src/scripts/index.js",
    "src/styles/main.css",
    "src/assets/.gitkeep",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_example_post_hooks() {
        let find = |path: &str| INIT_TEMPLATE.iter().find(|f| f.path == path);

        let preload = find("src/posts/example-post-one/preload.js").unwrap();
        assert!(preload
            .content
            .contains("console.log('Hello from preload.js!');"));

        let global = find("src/scripts/index.js").unwrap();
        assert!(global
            .content
            .contains("console.log('Hello from GLOBAL index.js!');"));
    }

    #[test]
    fn test_template_config_parses() {
        let file = INIT_TEMPLATE
            .iter()
            .find(|f| f.path == "velcro.toml")
            .unwrap();
        let config: crate::config::SiteConfig = toml::from_str(file.content).unwrap();
        assert_eq!(config.output_dir, "dist");
    }
}
