//! Aggregate the record directories into single bundle files for the site.
//!
//! Records are carried through as raw JSON so hand-added fields survive.
//! Every bundle is sorted by `id` so rebuilding an unchanged database gives
//! an identical file apart from the build timestamp.

use crate::error::CookbookError;
use crate::store::{file_name, json_files, read_json, write_json_atomic};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

pub const FOODS_BUNDLE: &str = "foods-bundle.json";
pub const RECIPES_BUNDLE: &str = "recipes-bundle.json";

const BUILDER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What a bundle build wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReport {
    pub path: PathBuf,
    pub records: usize,
    /// Size of the compact JSON encoding.
    pub size_bytes: usize,
}

/// Read every record file; any unreadable record or one missing `id`/`name`
/// fails the whole build, listing all offenders.
fn collect_records(dir: &Path, files: &[PathBuf]) -> Result<Vec<Value>, CookbookError> {
    let mut records = Vec::with_capacity(files.len());
    let mut problems = Vec::new();

    for path in files {
        let file = file_name(path);
        match read_json::<Value>(path) {
            Ok(record) => {
                let has = |field: &str| {
                    record
                        .get(field)
                        .is_some_and(|v| v.as_str().is_some_and(|s| !s.is_empty()))
                };
                if has("id") && has("name") {
                    records.push(record);
                } else {
                    problems.push(format!("{file}: Missing required field (id or name)"));
                }
            }
            Err(CookbookError::InvalidJson { source, .. }) => {
                problems.push(format!("{file}: {source}"));
            }
            Err(e) => return Err(e),
        }
    }

    if !problems.is_empty() {
        return Err(CookbookError::InvalidRecords {
            dir: dir.to_path_buf(),
            problems,
        });
    }

    records.sort_by(|a, b| id_of(a).cmp(id_of(b)));
    Ok(records)
}

fn id_of(record: &Value) -> &str {
    record.get("id").and_then(Value::as_str).unwrap_or_default()
}

/// Strings in `record[field]`, which may be an array or a single string.
fn strings_in<'a>(record: &'a Value, field: &str) -> Vec<&'a str> {
    match record.get(field) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.as_str()],
        _ => Vec::new(),
    }
}

fn sorted(set: BTreeSet<&str>) -> Value {
    Value::from(set.into_iter().collect::<Vec<_>>())
}

fn build_metadata(pairs: &[(&str, usize)]) -> Value {
    let mut meta = Map::new();
    meta.insert(
        "build_timestamp".into(),
        Value::from(chrono::Utc::now().to_rfc3339()),
    );
    for (key, count) in pairs {
        meta.insert((*key).into(), Value::from(*count));
    }
    meta.insert("builder_version".into(), Value::from(BUILDER_VERSION));
    Value::Object(meta)
}

fn write_bundle(path: PathBuf, bundle: &Value, records: usize) -> Result<BundleReport, CookbookError> {
    write_json_atomic(&path, bundle)?;
    let size_bytes = bundle.to_string().len();
    info!(
        "Wrote {} ({} records, {:.2} KB)",
        path.display(),
        records,
        size_bytes as f64 / 1024.0
    );
    Ok(BundleReport {
        path,
        records,
        size_bytes,
    })
}

/// Build `<out_dir>/foods-bundle.json` from `foods_dir`.
///
/// `index_file`, when it exists, contributes its `extraction_metadata` and
/// `extraction_index` entries.
pub fn bundle_foods(
    foods_dir: &Path,
    index_file: &Path,
    out_dir: &Path,
) -> Result<BundleReport, CookbookError> {
    let files = json_files(foods_dir)?;
    if files.is_empty() {
        return Err(CookbookError::EmptyCollection {
            kind: "food",
            dir: foods_dir.to_path_buf(),
        });
    }
    let foods = collect_records(foods_dir, &files)?;

    let categories: BTreeSet<&str> = foods.iter().flat_map(|f| strings_in(f, "categories")).collect();

    let mut bundle = Map::new();
    if index_file.exists() {
        let index: Value = read_json(index_file)?;
        for key in ["extraction_metadata", "extraction_index"] {
            if let Some(v) = index.get(key) {
                bundle.insert(key.into(), v.clone());
            }
        }
    }
    bundle.insert(
        "build_metadata".into(),
        build_metadata(&[
            ("total_foods", foods.len()),
            ("total_categories", categories.len()),
        ]),
    );
    bundle.insert("categories".into(), sorted(categories));
    let count = foods.len();
    bundle.insert("foods".into(), Value::Array(foods));

    write_bundle(out_dir.join(FOODS_BUNDLE), &Value::Object(bundle), count)
}

/// Build `<out_dir>/recipes-bundle.json` from the `recipe-*.json` files in
/// `recipes_dir`. Run summaries and other files are ignored.
pub fn bundle_recipes(recipes_dir: &Path, out_dir: &Path) -> Result<BundleReport, CookbookError> {
    let files: Vec<PathBuf> = json_files(recipes_dir)?
        .into_iter()
        .filter(|p| file_name(p).starts_with("recipe-"))
        .collect();
    if files.is_empty() {
        return Err(CookbookError::EmptyCollection {
            kind: "recipe",
            dir: recipes_dir.to_path_buf(),
        });
    }
    let recipes = collect_records(recipes_dir, &files)?;

    let mut meal_types = BTreeSet::new();
    let mut difficulties = BTreeSet::new();
    let mut daily_dozen = BTreeSet::new();
    let mut tweaks = BTreeSet::new();
    for recipe in &recipes {
        meal_types.extend(strings_in(recipe, "meal_type"));
        difficulties.extend(strings_in(recipe, "difficulty"));
        daily_dozen.extend(strings_in(recipe, "daily_dozen"));
        daily_dozen.extend(strings_in(recipe, "daily_dozen_coverage"));
        tweaks.extend(strings_in(recipe, "tweaks"));
        tweaks.extend(strings_in(recipe, "tweaks_incorporated"));
    }

    let mut bundle = Map::new();
    bundle.insert(
        "build_metadata".into(),
        build_metadata(&[
            ("total_recipes", recipes.len()),
            ("total_meal_types", meal_types.len()),
            ("total_difficulties", difficulties.len()),
        ]),
    );
    bundle.insert("meal_types".into(), sorted(meal_types));
    bundle.insert("difficulties".into(), sorted(difficulties));
    bundle.insert("daily_dozen_items".into(), sorted(daily_dozen));
    bundle.insert("tweaks".into(), sorted(tweaks));
    let count = recipes.len();
    bundle.insert("recipes".into(), Value::Array(recipes));

    write_bundle(out_dir.join(RECIPES_BUNDLE), &Value::Object(bundle), count)
}
