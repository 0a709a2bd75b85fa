//! Page search: which pages mention which terms.

use crate::output::PageText;
use std::collections::BTreeMap;

/// Terms searched when none are given: low-calorie-density and
/// low-glycemic foods.
pub static DEFAULT_SEARCH_TERMS: &[&str] = &[
    "barley", "lentils", "chickpeas", "quinoa", "sweet potato", "apple", "pear", "orange",
    "grapefruit", "peach", "broccoli", "cauliflower", "brussels sprouts", "spinach", "arugula",
    "mushrooms", "peppers", "tomato", "cucumber", "celery", "zucchini", "squash", "eggplant",
    "asparagus", "lettuce", "chia seeds", "pumpkin seeds", "walnuts", "almonds", "black beans",
    "kidney beans", "pinto beans", "split peas", "brown rice", "wild rice", "oats", "bulgur",
    "onion", "garlic", "ginger", "cinnamon", "cumin", "avocado", "nuts", "seeds", "herbs", "tea",
    "strawberries", "blueberries", "raspberries", "blackberries", "leafy greens", "cruciferous",
    "whole grains",
];

/// Pages (sorted, 1-indexed) on which each term occurs, case-insensitively.
///
/// Terms found on fewer than `min_mentions` pages are left out.
pub fn scan_pages<S: AsRef<str>>(
    pages: &[PageText],
    terms: &[S],
    min_mentions: usize,
) -> BTreeMap<String, Vec<usize>> {
    let lowered: Vec<(usize, String)> = pages
        .iter()
        .map(|p| (p.page, p.text.to_lowercase()))
        .collect();

    let mut mentions = BTreeMap::new();
    for term in terms {
        let term = term.as_ref().trim();
        let needle = term.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        let mut hits: Vec<usize> = lowered
            .iter()
            .filter(|(_, text)| text.contains(&needle))
            .map(|(page, _)| *page)
            .collect();
        hits.sort_unstable();
        hits.dedup();
        if !hits.is_empty() && hits.len() >= min_mentions {
            mentions.insert(term.to_string(), hits);
        }
    }
    mentions
}
