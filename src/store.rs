//! The flat-file database: one JSON document per food or recipe.
//!
//! Recipes are overwritten wholesale on every run. Foods are curated by hand
//! and are never overwritten: [`create_food`] only ever creates.

use crate::error::CookbookError;
use crate::model::{normalise_sources, Food, Recipe};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

static FOOD_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^food-(\d+)$").unwrap());

// ── Food catalogue ───────────────────────────────────────────────────────

/// Every food record in `data/foods`, keyed by file stem.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: BTreeMap<String, Food>,
    /// Slugified food name → key.
    by_name: HashMap<String, String>,
}

impl FoodCatalog {
    /// Load every `*.json` in `dir`. Files that do not parse as a food are
    /// skipped with a warning.
    pub fn load(dir: &Path) -> Result<Self, CookbookError> {
        let mut foods = Vec::new();
        for path in json_files(dir)? {
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match read_json::<Food>(&path) {
                Ok(food) => foods.push((key.to_string(), food)),
                Err(e) => warn!("Skipping food file: {}", e),
            }
        }
        let catalog = Self::from_foods(foods);
        debug!("Loaded {} foods from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    pub fn from_foods<I>(foods: I) -> Self
    where
        I: IntoIterator<Item = (String, Food)>,
    {
        let foods: BTreeMap<String, Food> = foods.into_iter().collect();
        let by_name = foods
            .iter()
            .map(|(key, food)| (slugify(&food.name), key.clone()))
            .collect();
        Self { foods, by_name }
    }

    pub fn get(&self, key: &str) -> Option<&Food> {
        self.foods.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.foods.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Food)> {
        self.foods.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Display name of a food, falling back to its key.
    pub fn name_of<'a>(&'a self, key: &'a str) -> &'a str {
        self.foods.get(key).map_or(key, |f| f.name.as_str())
    }

    /// Categories of a food; empty when it has no record.
    pub fn categories_of(&self, key: &str) -> &[String] {
        self.foods
            .get(key)
            .map(|f| f.categories.as_slice())
            .unwrap_or_default()
    }

    /// Resolve a reference that is either a food key or a food name.
    pub fn resolve(&self, reference: &str) -> Option<&str> {
        let slug = slugify(reference);
        if let Some((key, _)) = self.foods.get_key_value(slug.as_str()) {
            return Some(key.as_str());
        }
        self.by_name.get(&slug).map(String::as_str)
    }
}

// ── Reading and writing ──────────────────────────────────────────────────

/// `*.json` files directly in `dir`, sorted by file name.
pub(crate) fn json_files(dir: &Path) -> Result<Vec<PathBuf>, CookbookError> {
    let read_failed = |source| CookbookError::ReadFailed {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_failed)? {
        let path = entry.map_err(read_failed)?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CookbookError> {
    let raw = fs::read_to_string(path).map_err(|source| CookbookError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CookbookError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

fn to_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<String, CookbookError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| {
        CookbookError::InvalidJson {
            path: path.to_path_buf(),
            source,
        }
    })?;
    json.push('\n');
    Ok(json)
}

/// Write `contents` to a temp file beside `path`, creating parent dirs.
fn stage(path: &Path, contents: &str) -> Result<NamedTempFile, CookbookError> {
    let write_failed = |source| CookbookError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_failed)?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(write_failed)?;
    tmp.write_all(contents.as_bytes()).map_err(write_failed)?;
    tmp.flush().map_err(write_failed)?;
    Ok(tmp)
}

/// Serialise `value` as pretty JSON and atomically replace `path`.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CookbookError> {
    write_text_atomic(path, &to_pretty_json(path, value)?)
}

/// Atomically replace `path` with `contents` (temp file + rename).
pub fn write_text_atomic(path: &Path, contents: &str) -> Result<(), CookbookError> {
    stage(path, contents)?
        .persist(path)
        .map_err(|e| CookbookError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}

/// Write `<dir>/<recipe id>.json`, replacing any previous version.
pub fn write_recipe(dir: &Path, recipe: &Recipe) -> Result<PathBuf, CookbookError> {
    let path = dir.join(format!("{}.json", recipe.id));
    write_json_atomic(&path, recipe)?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

// ── Food curation ────────────────────────────────────────────────────────

/// Result of [`create_food`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateOutcome {
    Created,
    /// The file was already there and was left untouched.
    AlreadyExists,
}

/// Create `<dir>/<slug>.json` unless it exists.
pub fn create_food<T: Serialize + ?Sized>(
    dir: &Path,
    slug: &str,
    food: &T,
) -> Result<CreateOutcome, CookbookError> {
    let path = dir.join(format!("{slug}.json"));
    if path.exists() {
        debug!("{} already exists, skipping", path.display());
        return Ok(CreateOutcome::AlreadyExists);
    }

    let tmp = stage(&path, &to_pretty_json(&path, food)?)?;
    match tmp.persist_noclobber(&path) {
        Ok(_) => {
            info!("Created {}", path.display());
            Ok(CreateOutcome::Created)
        }
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
            Ok(CreateOutcome::AlreadyExists)
        }
        Err(e) => Err(CookbookError::OutputWriteFailed {
            path,
            source: e.error,
        }),
    }
}

/// One entry of a food seed file: `{ "filename": "...", "data": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSeed {
    pub filename: String,
    pub data: Value,
}

impl FoodSeed {
    /// Seed file name without its `.json` extension.
    pub fn slug(&self) -> &str {
        self.filename
            .strip_suffix(".json")
            .unwrap_or(&self.filename)
    }
}

/// Read a JSON array of [`FoodSeed`]s.
pub fn read_seeds(path: &Path) -> Result<Vec<FoodSeed>, CookbookError> {
    read_json(path)
}

/// [`create_food`] for every seed, in order.
pub fn seed_foods(
    dir: &Path,
    seeds: &[FoodSeed],
) -> Result<Vec<(String, CreateOutcome)>, CookbookError> {
    seeds
        .iter()
        .map(|seed| {
            let outcome = create_food(dir, seed.slug(), &seed.data)?;
            Ok((seed.filename.clone(), outcome))
        })
        .collect()
}

/// File-name slug for a food name: `Beans (Legumes)` → `beans-legumes`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        match c {
            '(' | ')' => {}
            c if c.is_whitespace() || c == '-' => {
                if !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            c if c.is_ascii_lowercase() || c.is_ascii_digit() => slug.push(c),
            _ => {}
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// `food-<n+1>` where `n` is the highest numeric id in `dir`.
pub fn next_food_id(dir: &Path) -> Result<String, CookbookError> {
    if !dir.exists() {
        return Ok("food-1".to_string());
    }
    let max = json_files(dir)?
        .iter()
        .filter_map(|path| read_json::<Value>(path).ok())
        .filter_map(|food| {
            let id = food.get("id")?.as_str()?;
            FOOD_ID.captures(id)?.get(1)?.as_str().parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0);
    Ok(format!("food-{}", max + 1))
}

/// A food created (or found) by [`new_food`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub path: PathBuf,
    pub food: Food,
    pub outcome: CreateOutcome,
}

/// Create an empty food record named `name` with the next free id.
/// At least one category is required; a food without one fails validation.
pub fn new_food(dir: &Path, name: &str, categories: &[String]) -> Result<NewFood, CookbookError> {
    let name = name.trim();
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(CookbookError::InvalidConfig(format!(
            "Food name {name:?} has no usable characters"
        )));
    }
    if categories.iter().all(|c| c.trim().is_empty()) {
        return Err(CookbookError::InvalidConfig(format!(
            "Food {name:?} needs at least one category"
        )));
    }
    let food = Food {
        id: next_food_id(dir)?,
        name: name.to_string(),
        categories: categories.to_vec(),
        ..Food::default()
    };
    let outcome = create_food(dir, &slug, &food)?;
    Ok(NewFood {
        path: dir.join(format!("{slug}.json")),
        food,
        outcome,
    })
}

/// One id rewritten by [`renumber_food_ids`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdChange {
    pub file: String,
    pub old_id: Option<String>,
    pub new_id: String,
}

/// If any food id is shared by two files, renumber every food `food-1` to
/// `food-N` in file-name order. Only files whose id changes are rewritten;
/// other fields keep their order and content.
pub fn renumber_food_ids(dir: &Path) -> Result<Vec<IdChange>, CookbookError> {
    let mut foods = Vec::new();
    let mut counts: HashMap<Option<String>, usize> = HashMap::new();
    for path in json_files(dir)? {
        let value: Value = read_json(&path)?;
        let id = value.get("id").and_then(Value::as_str).map(str::to_string);
        *counts.entry(id.clone()).or_default() += 1;
        foods.push((path, id, value));
    }

    let duplicates = counts.values().filter(|&&n| n > 1).count();
    if duplicates == 0 {
        info!("No duplicate food ids in {}", dir.display());
        return Ok(Vec::new());
    }
    info!("{} duplicate food id(s), renumbering {} foods", duplicates, foods.len());

    let mut changes = Vec::new();
    for (n, (path, old_id, mut value)) in foods.into_iter().enumerate() {
        let new_id = format!("food-{}", n + 1);
        if old_id.as_deref() == Some(new_id.as_str()) {
            continue;
        }
        let Some(obj) = value.as_object_mut() else {
            warn!("{} is not a JSON object, left as is", path.display());
            continue;
        };
        obj.insert("id".to_string(), Value::String(new_id.clone()));
        write_json_atomic(&path, &value)?;
        changes.push(IdChange {
            file: file_name(&path),
            old_id,
            new_id,
        });
    }
    Ok(changes)
}

/// Rewrite legacy `sources` values into `{ "pages": [...], "quotes": [...] }`.
/// Returns the names of the files rewritten; unreadable files are skipped.
pub fn fix_sources(dir: &Path) -> Result<Vec<String>, CookbookError> {
    let mut fixed = Vec::new();
    for path in json_files(dir)? {
        let mut value: Value = match read_json(&path) {
            Ok(v) => v,
            Err(e) => {
                warn!("Skipping food file: {}", e);
                continue;
            }
        };
        let Some(sources) = value.get("sources").and_then(normalise_sources) else {
            continue;
        };
        let Some(obj) = value.as_object_mut() else {
            continue;
        };
        obj.insert("sources".to_string(), sources);
        write_json_atomic(&path, &value)?;
        debug!("Fixed sources in {}", path.display());
        fixed.push(file_name(&path));
    }
    info!("Fixed sources in {} food file(s)", fixed.len());
    Ok(fixed)
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
