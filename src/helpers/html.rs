//! HTML helper functions

use lazy_static::lazy_static;
use regex::Regex;

use crate::scripts::{ResolvedScripts, Snippet};

lazy_static! {
    static ref HEAD_CLOSE: Regex = Regex::new(r"(?i)</head\s*>").unwrap();
    static ref BODY_OPEN: Regex = Regex::new(r"(?i)<body(\s[^>]*)?>").unwrap();
    static ref BODY_CLOSE: Regex = Regex::new(r"(?i)</body\s*>").unwrap();
}

/// Wrap a snippet in an inline script tag
///
/// # Examples
/// ```ignore
/// inline_script(&Snippet::from("go();")) // -> <script>\ngo();\n</script>
/// ```
pub fn inline_script(snippet: &Snippet) -> String {
    format!("<script>\n{}\n</script>", snippet.as_str())
}

/// Embed resolved scripts into a page.
///
/// Pre-load snippets go right before `</head>` (or before `<body>`, or at the
/// very start when the page has neither). Post-load snippets go right before
/// the last `</body>`, or at the end.
pub fn embed_scripts(html: &str, scripts: &ResolvedScripts) -> String {
    let html = insert_pre_load(html, &render_stage(&scripts.pre_stage));
    insert_before_body_close(&html, &render_stage(&scripts.post_stage))
}

/// Insert markup right before the last `</body>`, or append it
pub fn insert_before_body_close(html: &str, markup: &str) -> String {
    if markup.is_empty() {
        return html.to_string();
    }

    match BODY_CLOSE.find_iter(html).last() {
        Some(m) => splice(html, m.start(), markup),
        None => format!("{}\n{}\n", html, markup),
    }
}

fn insert_pre_load(html: &str, markup: &str) -> String {
    if markup.is_empty() {
        return html.to_string();
    }

    if let Some(m) = HEAD_CLOSE.find(html) {
        splice(html, m.start(), markup)
    } else if let Some(m) = BODY_OPEN.find(html) {
        splice(html, m.start(), markup)
    } else {
        format!("{}\n{}", markup, html)
    }
}

fn render_stage(snippets: &[Snippet]) -> String {
    snippets
        .iter()
        .map(inline_script)
        .collect::<Vec<_>>()
        .join("\n")
}

fn splice(html: &str, at: usize, markup: &str) -> String {
    let mut out = String::with_capacity(html.len() + markup.len() + 1);
    out.push_str(&html[..at]);
    out.push_str(markup);
    out.push('\n');
    out.push_str(&html[at..]);
    out
}
