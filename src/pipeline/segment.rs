//! Recipe segmentation.
//!
//! Every recipe in the cookbook opens with its title followed by a line such
//! as `MAKES: 4 to 6 servings DIFFICULTY: Easy`. A block runs from one title
//! to the next (page breaks included) and is attributed to the page its
//! marker line sits on.

use crate::model::Difficulty;
use crate::output::PageText;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Lines above the marker searched for a title.
const TITLE_LOOKBACK: usize = 4;

/// Most physical lines a wrapped title is rebuilt from.
const MAX_TITLE_LINES: usize = 3;

static RECIPE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)MAKES:\s*(\d+)\s*(?:(?:to|-|–)\s*(\d+)\s*)?servings?\b.*?DIFFICULTY:\s*([a-z]+)",
    )
    .unwrap()
});

/// Words a wrapped title line can end on.
const TITLE_CONNECTORS: &[&str] = &["AND", "WITH", "&", "OF", "IN", "ON", "THE", "A", "OR"];

/// One recipe's slice of the cookbook text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeBlock {
    /// Title-cased recipe name.
    pub name: String,
    /// 1-indexed page of the marker line.
    pub page: usize,
    /// Upper bound of the printed serving range.
    pub servings: u32,
    pub difficulty: Difficulty,
    pub description: Option<String>,
    /// Body lines opening with a quantity.
    pub ingredients: Vec<String>,
    /// Title through to the next title, capped at the ingredient window.
    pub text: String,
}

struct Line<'a> {
    page: usize,
    text: &'a str,
}

struct Marker {
    title: String,
    title_line: usize,
    marker_line: usize,
    servings: u32,
    difficulty: Difficulty,
}

/// Split page texts into recipe blocks, in document order.
pub fn segment(pages: &[PageText], window: usize) -> Vec<RecipeBlock> {
    let lines: Vec<Line<'_>> = pages
        .iter()
        .flat_map(|p| p.text.lines().map(move |text| Line { page: p.page, text }))
        .collect();

    let markers = find_markers(&lines);

    for page in pages {
        if !markers.iter().any(|m| lines[m.marker_line].page == page.page) {
            debug!("Page {}: no recipe marker", page.page);
        }
    }

    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(lines.len(), |next| next.title_line);
            build_block(&lines, marker, end, window)
        })
        .collect()
}

fn find_markers(lines: &[Line<'_>]) -> Vec<Marker> {
    let mut markers: Vec<Marker> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(caps) = RECIPE_MARKER.captures(line.text) else {
            continue;
        };
        let (Some(whole), Some(low)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let low: u32 = low.as_str().parse().unwrap_or(0);
        let high: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(low);
        let level = caps.get(3).map_or("", |m| m.as_str());
        let difficulty = Difficulty::parse(level).unwrap_or_else(|| {
            debug!(
                "Page {}: unknown difficulty {:?}, using moderate",
                line.page, level
            );
            Difficulty::Moderate
        });

        // A title may share the marker line.
        let inline = line.text[..whole.start()].trim();
        let floor = markers.last().map_or(0, |m| m.marker_line + 1);
        let title = if has_letters(inline) {
            Some((inline.to_string(), idx))
        } else {
            title_above(lines, idx, floor)
        };

        let Some((raw_title, title_line)) = title else {
            debug!("Page {}: recipe marker without a title, skipped", line.page);
            continue;
        };

        markers.push(Marker {
            title: title_case(&raw_title),
            title_line,
            marker_line: idx,
            servings: low.max(high),
            difficulty,
        });
    }

    markers
}

/// The nearest non-blank line above `idx`, rejoined with wrapped title
/// lines directly above it. Never looks at or above `floor`.
fn title_above(lines: &[Line<'_>], idx: usize, floor: usize) -> Option<(String, usize)> {
    let lowest = idx.saturating_sub(TITLE_LOOKBACK).max(floor);
    let start = (lowest..idx).rev().find(|&j| !lines[j].text.trim().is_empty())?;

    let mut parts = vec![lines[start].text.trim()];
    let mut first = start;
    while parts.len() < MAX_TITLE_LINES && first > floor {
        let above = lines[first - 1].text.trim();
        if !is_upper_line(above) || !is_upper_line(parts[0]) || !continues_title(above, parts[0]) {
            break;
        }
        parts.insert(0, above);
        first -= 1;
    }

    Some((parts.join(" "), first))
}

fn build_block(lines: &[Line<'_>], marker: &Marker, end: usize, window: usize) -> RecipeBlock {
    let text = lines[marker.title_line..end]
        .iter()
        .map(|l| l.text)
        .collect::<Vec<_>>()
        .join("\n");

    let body = &lines[(marker.marker_line + 1).min(end)..end];
    let ingredients: Vec<String> = body
        .iter()
        .map(|l| l.text.trim())
        .filter(|t| starts_with_quantity(t))
        .map(str::to_string)
        .collect();

    let description = body
        .iter()
        .map(|l| l.text.trim())
        .take_while(|t| !starts_with_quantity(t))
        .find(|t| !t.is_empty())
        .filter(|t| is_prose(t))
        .map(str::to_string);

    RecipeBlock {
        name: marker.title.clone(),
        page: lines[marker.marker_line].page,
        servings: marker.servings,
        difficulty: marker.difficulty,
        description,
        ingredients,
        text: truncate_chars(&text, window).to_string(),
    }
}

/// Capitalise the first letter of each word, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.split_whitespace().collect::<Vec<_>>().join(" ").chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = c.is_whitespace() || matches!(c, '-' | '(' | '/');
        }
    }
    out
}

fn starts_with_quantity(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || "½⅓¼⅔¾⅛⅜⅝⅞".contains(c))
}

fn has_letters(s: &str) -> bool {
    s.chars().any(char::is_alphabetic)
}

fn is_upper_line(s: &str) -> bool {
    has_letters(s) && !s.chars().any(char::is_lowercase)
}

fn is_prose(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !RECIPE_MARKER.is_match(s)
}

/// Whether `upper` reads as the first half of a title continued by `lower`.
fn continues_title(upper: &str, lower: &str) -> bool {
    let last = upper.split_whitespace().next_back().unwrap_or("");
    let first = lower.split_whitespace().next().unwrap_or("");
    upper.ends_with(',')
        || upper.ends_with('-')
        || TITLE_CONNECTORS.contains(&last)
        || TITLE_CONNECTORS.contains(&first)
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
