//! Record types stored in the curated database.
//!
//! One JSON file per [`Food`] under `data/foods/` and one per [`Recipe`]
//! under `data/recipes/`. Both are plain snapshots: a run creates them, a
//! rerun may overwrite a recipe, nothing else mutates them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A curated ingredient entry.
///
/// The catalogue key of a food is its file stem (`hibiscus-tea`), not `id`
/// (`food-105`); recipes reference foods by key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub synergies: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub timing: Vec<String>,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub sources: FoodSources,
}

/// Page references and quotations backing a food entry.
///
/// Older files store `sources` as a list of `{ "page", "quote" }` entries or
/// with a bare number/string in `pages`/`quotes`; both are read through
/// [`normalise_sources`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct FoodSources {
    pub pages: Vec<u32>,
    pub quotes: Vec<String>,
}

#[derive(Deserialize)]
struct SourceFields {
    #[serde(default)]
    pages: Vec<u32>,
    #[serde(default)]
    quotes: Vec<String>,
}

impl TryFrom<Value> for FoodSources {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let value = normalise_sources(&value).unwrap_or(value);
        let SourceFields { pages, quotes } = serde_json::from_value(value)?;
        Ok(Self { pages, quotes })
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// The `{ "pages": [...], "quotes": [...] }` form of a legacy `sources`
/// value, or `None` when it is already in that form.
pub fn normalise_sources(sources: &Value) -> Option<Value> {
    match sources {
        Value::Array(entries) => {
            let collect = |field: &str| -> Vec<Value> {
                entries
                    .iter()
                    .filter_map(|e| e.get(field))
                    .filter(|v| truthy(v))
                    .cloned()
                    .collect()
            };
            let mut fixed = Map::new();
            fixed.insert("pages".into(), Value::Array(collect("page")));
            fixed.insert("quotes".into(), Value::Array(collect("quote")));
            Some(Value::Object(fixed))
        }
        Value::Object(fields) => {
            let mut fixed = fields.clone();
            let mut changed = false;
            for field in ["pages", "quotes"] {
                if let Some(v) = fixed.get_mut(field) {
                    if truthy(v) && !v.is_array() {
                        *v = Value::Array(vec![v.take()]);
                        changed = true;
                    }
                }
            }
            changed.then_some(Value::Object(fixed))
        }
        _ => None,
    }
}

/// A tagged cookbook recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub page: usize,
    pub meal_type: MealType,
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(default, alias = "foods_used")]
    pub foods: Vec<String>,
    #[serde(default, alias = "daily_dozen_coverage")]
    pub daily_dozen: Vec<String>,
    #[serde(default, alias = "tweaks_incorporated")]
    pub tweaks: Vec<String>,
    #[serde(default)]
    pub synergies: Vec<Synergy>,
}

/// Two or more foods in one recipe that reinforce each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Synergy {
    pub foods: Vec<String>,
    pub benefit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Dessert => "dessert",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty printed on the recipe's `MAKES:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    #[serde(alias = "difficult")]
    Advanced,
}

impl Difficulty {
    /// Case-insensitive parse; `difficult` is read as `advanced`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "moderate" => Some(Difficulty::Moderate),
            "advanced" | "difficult" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
