//! Page dump format: page texts joined with `PAGE <n>` boundary markers.
//!
//! ```text
//!
//! ================================================================================
//! PAGE 120
//! ================================================================================
//! <text of page 120>
//! ```

use crate::output::PageText;
use once_cell::sync::Lazy;
use regex::Regex;

/// Rule line framing a page marker: 80 `=` characters.
pub const PAGE_RULE: &str =
    "================================================================================";

static PAGE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\A|\n)={80}[ \t]*\r?\nPAGE[ \t]+(\d+)[ \t]*\r?\n={80}[ \t]*(?:\r?\n|\z)")
        .expect("valid page marker regex")
});

/// The marker written before page `page`.
pub fn page_marker(page: usize) -> String {
    format!("\n{PAGE_RULE}\nPAGE {page}\n{PAGE_RULE}\n")
}

/// Concatenate pages, each preceded by its marker and followed by one `\n`.
pub fn join_pages(pages: &[PageText]) -> String {
    let capacity = pages.iter().map(|p| p.text.len() + 2 * PAGE_RULE.len() + 16).sum();
    let mut out = String::with_capacity(capacity);
    for page in pages {
        out.push_str(&page_marker(page.page));
        out.push_str(&page.text);
        out.push('\n');
    }
    out
}

/// Split a page dump back into pages.
///
/// Each marker owns the newline in front of it, and each body loses the one
/// `\n` [`join_pages`] appended. Text without any marker is returned as a
/// single page 1. Text before the first marker is dropped.
pub fn split_pages(text: &str) -> Vec<PageText> {
    let markers: Vec<(usize, usize, usize)> = PAGE_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let page = caps.get(1)?.as_str().parse().ok()?;
            Some((page, whole.start(), whole.end()))
        })
        .collect();

    if markers.is_empty() {
        return if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![PageText::new(1, text)]
        };
    }

    markers
        .iter()
        .enumerate()
        .map(|(i, &(page, _, body_start))| {
            let body_end = markers.get(i + 1).map_or(text.len(), |next| next.1);
            let body = &text[body_start..body_end];
            PageText::new(page, body.strip_suffix('\n').unwrap_or(body))
        })
        .collect()
}
