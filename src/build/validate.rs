//! Structural checks on generated HTML

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref HEAD_OPEN: Regex = Regex::new(r"(?i)<head(\s[^>]*)?>").unwrap();
    static ref HEAD_CLOSE: Regex = Regex::new(r"(?i)</head>").unwrap();
    static ref BODY_OPEN: Regex = Regex::new(r"(?i)<body(\s[^>]*)?>").unwrap();
    static ref BODY_CLOSE: Regex = Regex::new(r"(?i)</body>").unwrap();
}

/// A problem found in a page. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlIssue {
    UnclosedHead,
    UnclosedBody,
    MissingHead,
}

impl fmt::Display for HtmlIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HtmlIssue::UnclosedHead => write!(f, "Unclosed <head> tag detected"),
            HtmlIssue::UnclosedBody => write!(f, "Unclosed <body> tag detected"),
            HtmlIssue::MissingHead => write!(f, "Missing <head> tag"),
        }
    }
}

/// Check a page for unclosed or missing `<head>`/`<body>` tags
pub fn validate_html(content: &str) -> Vec<HtmlIssue> {
    let has_head_open = HEAD_OPEN.is_match(content);
    let has_body_open = BODY_OPEN.is_match(content);

    let mut issues = Vec::new();
    if has_head_open && !HEAD_CLOSE.is_match(content) {
        issues.push(HtmlIssue::UnclosedHead);
    }
    if has_body_open && !BODY_CLOSE.is_match(content) {
        issues.push(HtmlIssue::UnclosedBody);
    }
    if !has_head_open {
        issues.push(HtmlIssue::MissingHead);
    }
    issues
}
