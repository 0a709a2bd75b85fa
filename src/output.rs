//! Result types returned by the extraction entry points.

use crate::error::PageError;
use crate::model::{Difficulty, MealType, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Text of one PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed page number.
    pub page: usize,
    pub text: String,
}

impl PageText {
    pub fn new(page: usize, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub recipes: Vec<Recipe>,
    pub summary: ExtractionSummary,
    /// Pages that were selected but yielded no text.
    pub page_errors: Vec<PageError>,
    pub stats: ExtractionStats,
}

/// Counters for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages in the document (0 when running from a page dump).
    pub total_pages: usize,
    /// Pages that yielded text and were segmented.
    pub pages_read: usize,
    /// Selected pages without usable text.
    pub pages_skipped: usize,
    /// Food records loaded from `data/foods`.
    pub foods_loaded: usize,
    pub recipes_found: usize,
    /// Recipe files written (0 on a dry run).
    pub recipes_written: usize,
    /// Matched keywords dropped because the food has no record.
    pub unknown_foods_dropped: usize,
    pub text_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Per-run summary written next to the recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub total_recipes: usize,
    /// `first-last` page numbers read, e.g. `120-200`.
    pub page_range: String,
    pub recipes_by_meal_type: BTreeMap<MealType, usize>,
    pub recipes_by_difficulty: BTreeMap<Difficulty, usize>,
    pub recipe_ids: Vec<String>,
    pub recipe_names: Vec<String>,
}

impl ExtractionSummary {
    pub fn from_recipes(recipes: &[Recipe], first_page: usize, last_page: usize) -> Self {
        let mut summary = Self {
            total_recipes: recipes.len(),
            page_range: format!("{first_page}-{last_page}"),
            ..Self::default()
        };
        for recipe in recipes {
            *summary
                .recipes_by_meal_type
                .entry(recipe.meal_type)
                .or_default() += 1;
            *summary
                .recipes_by_difficulty
                .entry(recipe.difficulty)
                .or_default() += 1;
            summary.recipe_ids.push(recipe.id.clone());
            summary.recipe_names.push(recipe.name.clone());
        }
        summary
    }

    /// File name the summary is stored under.
    pub fn file_name(&self) -> String {
        format!("summary-{}.json", self.page_range)
    }
}

/// PDF metadata, available without reading any page text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, meal_type: MealType, difficulty: Difficulty) -> Recipe {
        Recipe {
            id: id.into(),
            name: format!("Recipe {id}"),
            page: 1,
            meal_type,
            servings: 2,
            difficulty,
            description: None,
            ingredients: vec![],
            foods: vec![],
            daily_dozen: vec![],
            tweaks: vec![],
            synergies: vec![],
        }
    }

    #[test]
    fn summary_counts_by_meal_and_difficulty() {
        let recipes = vec![
            recipe("recipe-001", MealType::Lunch, Difficulty::Easy),
            recipe("recipe-002", MealType::Dinner, Difficulty::Easy),
            recipe("recipe-003", MealType::Dinner, Difficulty::Moderate),
        ];
        let summary = ExtractionSummary::from_recipes(&recipes, 201, 270);

        assert_eq!(summary.total_recipes, 3);
        assert_eq!(summary.page_range, "201-270");
        assert_eq!(summary.recipes_by_meal_type[&MealType::Dinner], 2);
        assert_eq!(summary.recipes_by_difficulty[&Difficulty::Easy], 2);
        assert_eq!(summary.recipe_ids, vec!["recipe-001", "recipe-002", "recipe-003"]);
        assert_eq!(summary.file_name(), "summary-201-270.json");
    }

    #[test]
    fn summary_serialises_enum_keys_as_strings() {
        let recipes = vec![recipe("recipe-001", MealType::Breakfast, Difficulty::Easy)];
        let json = serde_json::to_value(ExtractionSummary::from_recipes(&recipes, 1, 1)).unwrap();
        assert_eq!(json["recipes_by_meal_type"]["breakfast"], 1);
        assert_eq!(json["recipes_by_difficulty"]["easy"], 1);
    }
}
