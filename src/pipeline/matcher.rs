//! Keyword-to-food matching.
//!
//! Keywords are tried longest first and each match claims its span of the
//! text, so a shorter keyword nested in a longer one never fires on the same
//! words: `2 cups cherry tomatoes` yields `cherry-tomatoes` and not
//! `tomatoes-all-types`. A keyword must begin at a word boundary (`sage`
//! does not match inside `sausage`) but may run into a longer word, which is
//! how plurals match (`carrot` in `carrots`).

use crate::keywords::FOOD_KEYWORDS;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

static CANONICAL: Lazy<KeywordMatcher> =
    Lazy::new(|| KeywordMatcher::new(FOOD_KEYWORDS.iter().copied()));

/// Matches free text against a keyword → food key table.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    /// `(keyword, food key)`, longest keyword first.
    entries: Vec<(String, String)>,
}

impl KeywordMatcher {
    /// Build a matcher from `(keyword, food key)` pairs. Keywords are
    /// lowercased; when a keyword repeats, the first pair wins.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (keyword, food) in pairs {
            let keyword = normalise(keyword.as_ref());
            if keyword.is_empty() || entries.iter().any(|(k, _)| *k == keyword) {
                continue;
            }
            entries.push((keyword, food.into()));
        }
        entries.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { entries }
    }

    /// The matcher over [`FOOD_KEYWORDS`].
    pub fn canonical() -> &'static KeywordMatcher {
        &CANONICAL
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Food keys whose keywords occur in `text`, sorted and deduplicated.
    pub fn match_text(&self, text: &str) -> BTreeSet<String> {
        let haystack = normalise(text);
        let mut claimed = vec![false; haystack.len()];
        let mut found = BTreeSet::new();

        for (keyword, food) in &self.entries {
            for (start, _) in haystack.match_indices(keyword.as_str()) {
                let end = start + keyword.len();
                if !starts_word(&haystack, start) || claimed[start..end].iter().any(|&c| c) {
                    continue;
                }
                claimed[start..end].fill(true);
                found.insert(food.clone());
            }
        }

        found
    }
}

/// Lowercase and collapse whitespace runs (PDF text wraps mid-ingredient).
pub(crate) fn normalise(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether byte offset `start` of `haystack` begins a word.
pub(crate) fn starts_word(haystack: &str, start: usize) -> bool {
    haystack[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
}

/// Whether `needle` (already lowercase) occurs at the start of a word in `haystack`.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack
        .match_indices(needle)
        .any(|(start, _)| starts_word(haystack, start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(text: &str) -> Vec<String> {
        KeywordMatcher::canonical()
            .match_text(text)
            .into_iter()
            .collect()
    }

    #[test]
    fn every_keyword_matches_its_food() {
        for (keyword, food) in FOOD_KEYWORDS {
            let text = format!("1 cup {keyword}, chopped");
            let found = KeywordMatcher::canonical().match_text(&text);
            assert!(
                found.contains(*food),
                "{keyword:?} should yield {food:?}, got {found:?}"
            );
        }
    }

    #[test]
    fn longest_keyword_wins() {
        assert_eq!(matched("2 cups cherry tomatoes, halved"), vec!["cherry-tomatoes"]);
        assert_eq!(matched("1 tsp garlic powder"), vec!["garlic-powder"]);
        assert_eq!(matched("½ tsp red pepper flakes"), vec!["crushed-red-pepper-flakes"]);
        assert_eq!(matched("1 large sweet potato"), vec!["sweet-potatoes"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(matched("CHERRY TOMATOES"), vec!["cherry-tomatoes"]);
        assert_eq!(matched("Kale"), vec!["kale"]);
    }

    #[test]
    fn shorter_keyword_still_matches_elsewhere() {
        assert_eq!(
            matched("cherry tomatoes and 1 can chopped tomatoes"),
            vec!["cherry-tomatoes", "tomatoes-all-types"]
        );
    }

    #[test]
    fn keyword_must_start_a_word() {
        assert!(matched("vegan sausage").is_empty());
        assert_eq!(matched("3 carrots"), vec!["carrots"]);
        assert_eq!(matched("chickpeas"), vec!["chickpeas"]);
    }

    #[test]
    fn wrapped_lines_are_joined() {
        assert_eq!(matched("1 cup cooked black\n  beans"), vec!["black-beans"]);
    }

    #[test]
    fn every_vinegar_maps_to_one_food() {
        assert_eq!(
            matched("balsamic vinegar, apple cider vinegar, red wine vinegar"),
            vec!["vinegar-all-types"]
        );
    }

    #[test]
    fn no_match_is_empty() {
        assert!(matched("Preheat the oven to 200°C.").is_empty());
        assert!(matched("").is_empty());
    }

    #[test]
    fn custom_table_dedups_keywords() {
        let matcher = KeywordMatcher::new([("Beans", "beans-a"), ("beans", "beans-b")]);
        assert_eq!(matcher.len(), 1);
        assert_eq!(
            matcher.match_text("beans").into_iter().collect::<Vec<_>>(),
            vec!["beans-a"]
        );
    }

    #[test]
    fn contains_word_respects_boundaries() {
        assert!(contains_word("kale salad", "salad"));
        assert!(!contains_word("smack", "mac"));
        assert!(contains_word("mac and cheese", "mac"));
    }
}
