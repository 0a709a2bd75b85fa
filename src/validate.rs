//! Schema checks for the food directory.
//!
//! Food files are edited by hand, so validation works on raw JSON values and
//! reports every problem instead of stopping at the first one.

use crate::error::CookbookError;
use crate::store::{file_name, json_files};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const REQUIRED_FIELDS: &[&str] = &["id", "name", "categories", "properties", "benefits", "sources"];

pub static VALID_CATEGORIES: &[&str] = &[
    "rich-in-legumes",
    "rich-in-vegetables",
    "rich-in-fruits",
    "rich-in-whole-grains",
    "cruciferous",
    "greens",
    "high-fiber",
    "high-water-rich",
    "anti-inflammatory",
    "low-glycemic",
    "herbs-and-spices",
    "appetite-suppression",
    "weight-loss-booster",
    "prebiotic",
    "sweetener-alternative",
    "particularly-satiating",
    "low-calorie-density",
    "low-in-added-fat",
    "fat-blocker",
    "rich-in-greens",
    "microbiome-friendly",
    "low-insulin-index",
    "fruits",
    "berries",
    "vegetables",
    "nuts-and-seeds",
    "mood-support",
    "metabolic-booster",
    "thermogenic",
    "fat-burner",
    "enzyme-rich",
    "circadian-rhythm-support",
    "beverages",
    "antioxidant-rich",
    "digestive-support",
    "metabolism-boosting",
    "whole-grains",
    "low-in-salt",
    "sleep-optimization",
    "behavior-tweak",
    "timing-strategy",
    "hydration-strategy",
    "chronobiology",
    "evening-beverage",
    "caffeine-free",
    "resistant-starch",
    "herbs-spices",
    "nutrient-dense",
    "heavy-metal-detox",
    "allium-family",
];

pub static VALID_TIMING: &[&str] = &[
    "any-meal",
    "breakfast",
    "lunch",
    "dinner",
    "snacks",
    "with-meals",
    "in-cooking",
    "earlier-in-meal",
    "earlier-in-meal-for-maximum-benefit",
    "particularly-effective-in-soups",
    "daily",
    "can-sprinkle-on-meals",
    "with-beverages",
    "dessert",
    "with-meals-containing-fat",
    "salads",
    "soups",
    "meal-prep",
    "evening",
    "as-snack",
    "broths",
    "during-meals",
    "can-be-added-to-meals",
    "morning-preferred",
    "between-meals",
    "not-within-6-hours-of-bedtime",
    "morning",
    "preferably-raw",
    "eat-early-in-meal",
    "meal-preload",
    "nightly",
    "regular-bedtime",
    "consistent-time",
    "evening-safe",
    "any-time-of-day",
    "morning-to-afternoon-emphasis",
    "reduced-evening",
    "before-7pm-cutoff",
    "daily-rhythm-alignment",
    "consistent-schedule",
    "morning-to-midday",
    "avoid-6-hours-before-bed",
    "particularly-effective-as-pasta-substitute",
    "particularly-effective-in-dressings",
    "particularly-effective-roasted",
    "appetizers",
    "particularly-effective-in-stuffing",
];

static FOOD_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^food-\d+$").unwrap());

/// One problem in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub file: String,
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(file: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            file: file.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}] {}", self.file, self.field, self.message)
    }
}

/// Outcome of [`validate_foods`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Files checked.
    pub files: usize,
    pub unique_ids: usize,
    pub unique_names: usize,
    pub errors: Vec<ValidationIssue>,
    /// Duplicate names; often intentional.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors grouped by file, files in name order.
    pub fn errors_by_file(&self) -> BTreeMap<&str, Vec<&ValidationIssue>> {
        let mut grouped: BTreeMap<&str, Vec<&ValidationIssue>> = BTreeMap::new();
        for issue in &self.errors {
            grouped.entry(issue.file.as_str()).or_default().push(issue);
        }
        grouped
    }
}

fn present<'a>(food: &'a Value, field: &str) -> Option<&'a Value> {
    food.get(field).filter(|v| !v.is_null())
}

/// Check one parsed food file.
pub fn validate_food_value(file: &str, food: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let Some(obj) = food.as_object() else {
        issues.push(ValidationIssue::new(file, "root", "Must be a JSON object"));
        return issues;
    };

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(*field) {
            issues.push(ValidationIssue::new(file, field, "Missing required field"));
        }
    }

    if let Some(id) = present(food, "id") {
        match id.as_str() {
            Some(s) if FOOD_ID.is_match(s) => {}
            _ => issues.push(ValidationIssue::new(
                file,
                "id",
                format!("Invalid format: {id}. Expected: \"food-{{number}}\""),
            )),
        }
    }

    if let Some(name) = present(food, "name") {
        match name.as_str() {
            None => issues.push(ValidationIssue::new(file, "name", "Must be a string")),
            Some(s) if s.trim().is_empty() => {
                issues.push(ValidationIssue::new(file, "name", "Cannot be empty"))
            }
            Some(_) => {}
        }
    }

    if let Some(categories) = present(food, "categories") {
        match categories.as_array() {
            None => issues.push(ValidationIssue::new(file, "categories", "Must be an array")),
            Some(list) => {
                for cat in list {
                    if !cat.as_str().is_some_and(|c| VALID_CATEGORIES.contains(&c)) {
                        issues.push(ValidationIssue::new(
                            file,
                            "categories",
                            format!("Invalid category: {cat}"),
                        ));
                    }
                }
                if list.is_empty() {
                    issues.push(ValidationIssue::new(
                        file,
                        "categories",
                        "Must have at least one category",
                    ));
                }
            }
        }
    }

    if let Some(timing) = present(food, "timing") {
        match timing.as_array() {
            None => issues.push(ValidationIssue::new(file, "timing", "Must be an array")),
            Some(list) => {
                for time in list {
                    if !time.as_str().is_some_and(|t| VALID_TIMING.contains(&t)) {
                        issues.push(ValidationIssue::new(
                            file,
                            "timing",
                            format!("Invalid timing: {time}"),
                        ));
                    }
                }
            }
        }
    }

    for field in ["properties", "synergies", "conflicts"] {
        if present(food, field).is_some_and(|v| !v.is_array()) {
            issues.push(ValidationIssue::new(file, field, "Must be an array"));
        }
    }

    if let Some(sources) = present(food, "sources") {
        if !sources.is_object() {
            issues.push(ValidationIssue::new(file, "sources", "Must be an object"));
        } else {
            if !sources.get("pages").is_some_and(Value::is_array) {
                issues.push(ValidationIssue::new(
                    file,
                    "sources.pages",
                    "Must be an array of page numbers",
                ));
            }
            if !sources.get("quotes").is_some_and(Value::is_array) {
                issues.push(ValidationIssue::new(
                    file,
                    "sources.quotes",
                    "Must be an array of quote strings",
                ));
            }
        }
    }

    issues
}

/// Validate every `*.json` in `dir`, including cross-file duplicate checks.
pub fn validate_foods(dir: &Path) -> Result<ValidationReport, CookbookError> {
    let files = json_files(dir)?;
    let mut report = ValidationReport {
        files: files.len(),
        ..ValidationReport::default()
    };
    if files.is_empty() {
        warn!("No food files found in {}", dir.display());
        return Ok(report);
    }

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for path in &files {
        let file = file_name(path);
        let raw = fs::read_to_string(path).map_err(|source| CookbookError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        let food: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                report
                    .errors
                    .push(ValidationIssue::new(&file, "parse", e.to_string()));
                continue;
            }
        };

        report.errors.extend(validate_food_value(&file, &food));

        if let Some(id) = food.get("id").and_then(Value::as_str) {
            if !seen_ids.insert(id.to_string()) {
                report.errors.push(ValidationIssue::new(
                    &file,
                    "id",
                    format!("Duplicate ID: \"{id}\""),
                ));
            }
        }
        if let Some(name) = food.get("name").and_then(Value::as_str) {
            if !name.is_empty() && !seen_names.insert(name.to_lowercase()) {
                report.warnings.push(ValidationIssue::new(
                    &file,
                    "name",
                    format!("Duplicate name \"{name}\" (may be intentional)"),
                ));
            }
        }
    }

    report.unique_ids = seen_ids.len();
    report.unique_names = seen_names.len();
    debug!(
        "Validated {} food files: {} errors, {} warnings",
        report.files,
        report.errors.len(),
        report.warnings.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn valid_food(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "categories": ["greens"],
            "properties": [],
            "benefits": "",
            "synergies": [],
            "conflicts": [],
            "timing": ["any-meal"],
            "amount": "",
            "sources": {"pages": [12], "quotes": []}
        })
    }

    fn fields(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn valid_food_has_no_issues() {
        assert!(validate_food_value("kale.json", &valid_food("food-1", "Kale")).is_empty());
    }

    #[test]
    fn flags_bad_id_and_unknown_category() {
        let mut food = valid_food("kale", "Kale");
        food["categories"] = json!(["greens", "leafy"]);
        let issues = validate_food_value("kale.json", &food);
        assert_eq!(fields(&issues), vec!["id", "categories"]);
        assert!(issues[1].message.contains("leafy"));
        assert_eq!(
            issues[0].to_string(),
            "kale.json: [id] Invalid format: \"kale\". Expected: \"food-{number}\""
        );
    }

    #[test]
    fn flags_missing_and_mistyped_fields() {
        let food = json!({
            "id": "food-2",
            "name": "",
            "categories": [],
            "properties": "crunchy",
            "timing": ["whenever"],
            "sources": {"pages": 3}
        });
        let issues = validate_food_value("x.json", &food);
        assert_eq!(
            fields(&issues),
            vec![
                "benefits",
                "name",
                "categories",
                "timing",
                "properties",
                "sources.pages",
                "sources.quotes",
            ]
        );
    }

    #[test]
    fn directory_report_catches_duplicates_and_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let write = |name: &str, v: &Value| {
            fs::write(tmp.path().join(name), serde_json::to_string(v).unwrap()).unwrap()
        };
        write("a.json", &valid_food("food-1", "Kale"));
        write("b.json", &valid_food("food-1", "kale"));
        write("c.json", &valid_food("food-3", "Miso"));
        fs::write(tmp.path().join("d.json"), "{").unwrap();

        let report = validate_foods(tmp.path()).unwrap();
        assert_eq!(report.files, 4);
        assert!(!report.is_valid());
        assert_eq!(fields(&report.errors), vec!["id", "parse"]);
        assert_eq!(report.errors[0].file, "b.json");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.unique_ids, 2);
        assert_eq!(report.errors_by_file().len(), 2);
    }
}
