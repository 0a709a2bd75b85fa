//! # cookbook-extract
//!
//! Scrape a cookbook PDF into a personal database of foods and tagged recipes.
//!
//! The database is two folders of flat JSON files, `data/foods` (curated by
//! hand, one file per ingredient) and `data/recipes` (regenerated by every
//! extraction run). No server, no database engine.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    explicit path or first *.pdf in the base directory
//!  ├─ 2. Text     per-page text via pdfium (blocking, spawn_blocking)
//!  ├─ 3. Segment  title + "MAKES: n servings DIFFICULTY: level" blocks
//!  ├─ 4. Match    ingredient keywords → food keys, longest first
//!  ├─ 5. Tag      meal type, Daily Dozen, tweaks, synergies
//!  └─ 6. Store    recipe-NNN.json + summary-<first>-<last>.json
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cookbook_extract::{extract_recipes, ExtractionConfig, PageSelection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::builder()
//!         .base_dir("/books/how-not-to-diet")
//!         .pages(PageSelection::Range(201, 270))
//!         .first_recipe_number(30)
//!         .build()?;
//!     let output = extract_recipes(&config).await?;
//!     for recipe in &output.recipes {
//!         println!("{} {} ({})", recipe.id, recipe.name, recipe.meal_type);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Iterating on the heuristics does not need pdfium: dump the pages once with
//! [`dump_pages`], then rerun [`extract_recipes_from_text`] on the dump.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `cookbook` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! cookbook-extract = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod bundle;
pub mod config;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod rules;
pub mod store;
pub mod validate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use bundle::{bundle_foods, bundle_recipes, BundleReport};
pub use config::{ExtractionConfig, ExtractionConfigBuilder, PageSelection};
pub use error::{CookbookError, PageError};
pub use extract::{
    dump_pages, extract_recipes, extract_recipes_from_text, extract_recipes_sync, inspect,
    search_pages, DumpReport,
};
pub use model::{Difficulty, Food, FoodSources, MealType, Recipe, Synergy};
pub use output::{DocumentMetadata, ExtractionOutput, ExtractionStats, ExtractionSummary, PageText};
pub use pipeline::matcher::KeywordMatcher;
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use store::{
    create_food, fix_sources, new_food, renumber_food_ids, seed_foods, slugify, CreateOutcome, FoodCatalog,
    FoodSeed,
};
pub use validate::{validate_foods, ValidationIssue, ValidationReport};
