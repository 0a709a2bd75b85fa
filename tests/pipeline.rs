//! Integration tests for cookbook-extract.
//!
//! Everything here runs on temporary directories and page dumps, except the
//! pdfium-backed tests at the bottom. Those are gated behind `PDFIUM_E2E`
//! and a cookbook PDF in `./test_cases/` so they do not run in CI unless
//! explicitly requested.
//!
//! Run with:
//!   PDFIUM_E2E=1 PDFIUM_LIB_PATH=. cargo test --test pipeline -- --nocapture

use cookbook_extract::bundle::{FOODS_BUNDLE, RECIPES_BUNDLE};
use cookbook_extract::pipeline::pages::{join_pages, split_pages};
use cookbook_extract::{
    bundle_foods, bundle_recipes, dump_pages, extract_recipes, extract_recipes_from_text,
    fix_sources, inspect, new_food, renumber_food_ids, seed_foods, validate_foods, CookbookError,
    CreateOutcome, Difficulty, ExtractionConfig, ExtractionProgressCallback, FoodSeed, MealType,
    PageSelection, PageText, ProgressCallback,
};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

const DUMP: &str = "
================================================================================
PAGE 10
================================================================================
SPICED OATMEAL BOWL
MAKES: 2 servings DIFFICULTY: Easy
Warm and quick.
1 cup oats
1 tbsp ground flaxseed
1 tsp cinnamon

================================================================================
PAGE 11
================================================================================
LEMON GARLIC HUMMUS
MAKES: 6 servings DIFFICULTY: Easy
1 can chickpeas, drained
2 cloves garlic
1 lemon, juiced
";

fn seed(filename: &str, id: &str, name: &str, categories: &[&str]) -> FoodSeed {
    FoodSeed {
        filename: filename.to_string(),
        data: json!({
            "id": id,
            "name": name,
            "categories": categories,
            "properties": [],
            "benefits": "",
            "sources": { "pages": [], "quotes": [] },
        }),
    }
}

fn seeds() -> Vec<FoodSeed> {
    vec![
        seed("oat-groats-whole-intact-oats.json", "food-1", "Oats", &["whole-grains"]),
        seed("flaxseeds-ground.json", "food-2", "Ground Flaxseeds", &["nuts-and-seeds"]),
        seed("cinnamon.json", "food-3", "Cinnamon", &["herbs-and-spices"]),
        seed("chickpeas.json", "food-4", "Chickpeas", &["rich-in-legumes"]),
        seed("garlic.json", "food-5", "Garlic", &["herbs-and-spices", "allium-family"]),
    ]
}

/// A base directory with seeded foods and a config rooted at it.
fn workspace() -> (TempDir, ExtractionConfig) {
    let tmp = TempDir::new().unwrap();
    let config = ExtractionConfig::builder()
        .base_dir(tmp.path())
        .build()
        .unwrap();
    seed_foods(&config.foods_dir(), &seeds()).unwrap();
    (tmp, config)
}

fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[derive(Default)]
struct Counting {
    completed: AtomicUsize,
    recipes: AtomicUsize,
}

impl ExtractionProgressCallback for Counting {
    fn on_extraction_complete(&self, _pages_read: usize, recipes_found: usize) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.recipes.store(recipes_found, Ordering::SeqCst);
    }
}

// ── Text runs ────────────────────────────────────────────────────────────────

#[test]
fn test_text_run_writes_tagged_recipes() {
    let (_tmp, config) = workspace();
    let output = extract_recipes_from_text(DUMP, &config).unwrap();

    assert_eq!(output.recipes.len(), 2);

    let oatmeal = &output.recipes[0];
    assert_eq!(oatmeal.id, "recipe-001");
    assert_eq!(oatmeal.name, "Spiced Oatmeal Bowl");
    assert_eq!(oatmeal.page, 10);
    assert_eq!(oatmeal.servings, 2);
    assert_eq!(oatmeal.difficulty, Difficulty::Easy);
    assert_eq!(oatmeal.meal_type, MealType::Breakfast);
    assert_eq!(
        oatmeal.foods,
        vec!["cinnamon", "flaxseeds-ground", "oat-groats-whole-intact-oats"]
    );
    for item in ["whole-grains", "flaxseeds", "herbs-and-spices"] {
        assert!(
            oatmeal.daily_dozen.contains(&item.to_string()),
            "missing {item} in {:?}",
            oatmeal.daily_dozen
        );
    }

    let hummus = &output.recipes[1];
    assert_eq!(hummus.id, "recipe-002");
    assert_eq!(hummus.meal_type, MealType::Snack);
    assert_eq!(hummus.servings, 6);
    // lemon has no food record
    assert_eq!(hummus.foods, vec!["chickpeas", "garlic"]);
    assert!(hummus.daily_dozen.contains(&"beans".to_string()));

    let dir = config.recipes_dir();
    let stored = read(&dir.join("recipe-002.json"));
    assert_eq!(stored["name"], "Lemon Garlic Hummus");
    assert_eq!(stored["meal_type"], "snack");

    let summary = read(&dir.join("summary-10-11.json"));
    assert_eq!(summary["total_recipes"], 2);
    assert_eq!(summary["recipe_ids"], json!(["recipe-001", "recipe-002"]));
}

#[test]
fn test_text_run_is_repeatable() {
    let (_tmp, config) = workspace();
    let first = extract_recipes_from_text(DUMP, &config).unwrap();
    let stored = fs::read_to_string(config.recipes_dir().join("recipe-001.json")).unwrap();

    let second = extract_recipes_from_text(DUMP, &config).unwrap();
    assert_eq!(first.recipes, second.recipes);
    assert_eq!(
        stored,
        fs::read_to_string(config.recipes_dir().join("recipe-001.json")).unwrap()
    );
}

#[test]
fn test_text_run_numbering_and_summary_flags() {
    let (_tmp, config) = workspace();
    let config = ExtractionConfig {
        first_recipe_number: 41,
        write_summary: false,
        pages: PageSelection::Single(11),
        ..config
    };
    let output = extract_recipes_from_text(DUMP, &config).unwrap();

    assert_eq!(output.recipes.len(), 1);
    assert_eq!(output.recipes[0].id, "recipe-041");
    assert!(config.recipes_dir().join("recipe-041.json").exists());
    assert!(!config.recipes_dir().join("summary-11-11.json").exists());
}

#[test]
fn test_text_run_reports_completion() {
    let (_tmp, config) = workspace();
    let counter = Arc::new(Counting::default());
    let config = ExtractionConfig {
        progress_callback: Some(Arc::clone(&counter) as ProgressCallback),
        dry_run: true,
        ..config
    };
    extract_recipes_from_text(DUMP, &config).unwrap();

    assert_eq!(counter.completed.load(Ordering::SeqCst), 1);
    assert_eq!(counter.recipes.load(Ordering::SeqCst), 2);
}

#[test]
fn test_dump_format_survives_round_trip() {
    let pages = split_pages(DUMP);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].page, 10);
    assert!(pages[1].text.contains("LEMON GARLIC HUMMUS"));

    let rejoined = join_pages(&[PageText::new(3, "alpha"), PageText::new(7, "beta")]);
    let back = split_pages(&rejoined);
    assert_eq!(back.iter().map(|p| p.page).collect::<Vec<_>>(), vec![3, 7]);
    assert_eq!(back[1].text.trim(), "beta");
}

// ── Food curation ────────────────────────────────────────────────────────────

#[test]
fn test_seeding_never_clobbers_curated_foods() {
    let (_tmp, config) = workspace();
    let cinnamon = config.foods_dir().join("cinnamon.json");
    fs::write(&cinnamon, r#"{"id": "food-3", "name": "Ceylon Cinnamon"}"#).unwrap();

    let outcomes = seed_foods(&config.foods_dir(), &seeds()).unwrap();
    assert_eq!(outcomes.len(), 5);
    assert!(outcomes
        .iter()
        .all(|(_, outcome)| *outcome == CreateOutcome::AlreadyExists));
    assert_eq!(read(&cinnamon)["name"], "Ceylon Cinnamon");
}

#[test]
fn test_new_food_takes_next_id_and_validates() {
    let (_tmp, config) = workspace();
    let foods = config.foods_dir();

    let created = new_food(&foods, "Black Cumin", &["herbs-and-spices".to_string()]).unwrap();
    assert_eq!(created.outcome, CreateOutcome::Created);
    assert_eq!(created.food.id, "food-6");
    assert_eq!(created.path, foods.join("black-cumin.json"));

    let again = new_food(&foods, "Black Cumin", &["herbs-and-spices".to_string()]).unwrap();
    assert_eq!(again.outcome, CreateOutcome::AlreadyExists);
    assert_eq!(read(&created.path)["categories"], json!(["herbs-and-spices"]));

    assert!(new_food(&foods, "Nigella", &[]).is_err());
    assert!(!foods.join("nigella.json").exists());

    let report = validate_foods(&foods).unwrap();
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.files, 6);
    assert_eq!(report.unique_ids, 6);
}

#[test]
fn test_validation_then_renumber_fixes_duplicate_ids() {
    let (_tmp, config) = workspace();
    let foods = config.foods_dir();
    fs::write(
        foods.join("apple.json"),
        serde_json::to_string_pretty(&json!({
            "id": "food-2",
            "name": "Apple",
            "categories": ["fruits"],
            "properties": [],
            "benefits": "",
            "sources": { "pages": [], "quotes": [] },
            "notes": "kept",
        }))
        .unwrap(),
    )
    .unwrap();

    let report = validate_foods(&foods).unwrap();
    assert!(!report.is_valid());
    assert!(report.errors.iter().any(|e| e.field == "id"));

    let changes = renumber_food_ids(&foods).unwrap();
    assert!(!changes.is_empty());
    // apple.json sorts first
    let apple = read(&foods.join("apple.json"));
    assert_eq!(apple["id"], "food-1");
    assert_eq!(apple["notes"], "kept");

    assert!(validate_foods(&foods).unwrap().is_valid());
    assert!(renumber_food_ids(&foods).unwrap().is_empty());
}

#[test]
fn test_fix_sources_repairs_legacy_records() {
    let (_tmp, config) = workspace();
    let foods = config.foods_dir();
    fs::write(
        foods.join("barley.json"),
        serde_json::to_string_pretty(&json!({
            "id": "food-6",
            "name": "Barley",
            "categories": ["rich-in-whole-grains"],
            "properties": [],
            "benefits": "",
            "sources": [{ "page": 88, "quote": "pearl or hulled" }, { "page": 90 }],
        }))
        .unwrap(),
    )
    .unwrap();

    let report = validate_foods(&foods).unwrap();
    assert!(report.errors.iter().any(|e| e.field == "sources"));

    assert_eq!(fix_sources(&foods).unwrap(), vec!["barley.json"]);
    assert_eq!(
        read(&foods.join("barley.json"))["sources"],
        json!({ "pages": [88, 90], "quotes": ["pearl or hulled"] })
    );
    assert!(validate_foods(&foods).unwrap().is_valid());
    assert!(fix_sources(&foods).unwrap().is_empty());
}

// ── Bundles ──────────────────────────────────────────────────────────────────

#[test]
fn test_bundles_from_a_full_run() {
    let (_tmp, config) = workspace();
    fs::write(
        config.index_file(),
        r#"{"extraction_metadata": {"source": "cookbook"}, "extraction_index": {"pages": 2}}"#,
    )
    .unwrap();
    extract_recipes_from_text(DUMP, &config).unwrap();

    let foods = bundle_foods(&config.foods_dir(), &config.index_file(), &config.bundle_dir).unwrap();
    assert_eq!(foods.records, 5);
    assert_eq!(foods.path, config.bundle_dir.join(FOODS_BUNDLE));

    let recipes = bundle_recipes(&config.recipes_dir(), &config.bundle_dir).unwrap();
    assert_eq!(recipes.records, 2);

    let bundle = read(&config.bundle_dir.join(FOODS_BUNDLE));
    assert_eq!(bundle["extraction_metadata"]["source"], "cookbook");
    assert_eq!(bundle["foods"][0]["id"], "food-1");

    let bundle = read(&config.bundle_dir.join(RECIPES_BUNDLE));
    assert_eq!(bundle["meal_types"], json!(["breakfast", "snack"]));
    assert_eq!(bundle["difficulties"], json!(["easy"]));
    assert_eq!(bundle["recipes"][1]["id"], "recipe-002");
}

#[test]
fn test_bundle_rejects_broken_records() {
    let (_tmp, config) = workspace();
    fs::write(config.foods_dir().join("broken.json"), "{ not json").unwrap();

    match bundle_foods(&config.foods_dir(), &config.index_file(), &config.bundle_dir) {
        Err(CookbookError::InvalidRecords { problems, .. }) => {
            assert_eq!(problems.len(), 1);
            assert!(problems[0].starts_with("broken.json"));
        }
        other => panic!("expected InvalidRecords, got {other:?}"),
    }
    assert!(!config.bundle_dir.join(FOODS_BUNDLE).exists());
}

// ── Input errors (no pdfium needed) ──────────────────────────────────────────

#[tokio::test]
async fn test_missing_pdf_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = ExtractionConfig::rooted_at(tmp.path());
    assert!(matches!(
        extract_recipes(&config).await.unwrap_err(),
        CookbookError::PdfNotFound { .. }
    ));
}

#[tokio::test]
async fn test_non_pdf_input_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("cookbook.pdf"), "plain text, not a PDF").unwrap();
    let config = ExtractionConfig::rooted_at(tmp.path());
    assert!(matches!(
        inspect(&config).await.unwrap_err(),
        CookbookError::NotAPdf { .. }
    ));
}

// ── pdfium-backed tests (opt-in) ─────────────────────────────────────────────

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

/// Skip this test if PDFIUM_E2E is not set *or* no PDF file at `path`.
macro_rules! e2e_skip_unless_ready {
    ($path:expr) => {{
        if std::env::var("PDFIUM_E2E").is_err() {
            println!("SKIP — set PDFIUM_E2E=1 to run pdfium tests");
            return;
        }
        let p: PathBuf = $path;
        if !p.exists() {
            println!("SKIP — test file not found: {}", p.display());
            return;
        }
        p
    }};
}

#[tokio::test]
async fn test_pdfium_inspect_and_dump() {
    let pdf = e2e_skip_unless_ready!(test_cases_dir().join("cookbook.pdf"));
    let tmp = TempDir::new().unwrap();
    let config = ExtractionConfig::builder()
        .base_dir(tmp.path())
        .pdf_path(&pdf)
        .pages(PageSelection::Range(1, 3))
        .build()
        .unwrap();

    let meta = inspect(&config).await.expect("inspect() should succeed");
    assert!(meta.page_count > 0);
    println!("Metadata: {:?}", meta);

    let out = tmp.path().join("pages.txt");
    let report = dump_pages(&config, &out).await.expect("dump should succeed");
    let pages = split_pages(&fs::read_to_string(&out).unwrap());
    assert_eq!(pages.len(), report.pages_written);
    assert!(pages.iter().all(|p| (1..=3).contains(&p.page)));
}

#[tokio::test]
async fn test_pdfium_extraction_matches_text_run() {
    let pdf = e2e_skip_unless_ready!(test_cases_dir().join("cookbook.pdf"));
    let tmp = TempDir::new().unwrap();
    let config = ExtractionConfig::builder()
        .base_dir(tmp.path())
        .pdf_path(&pdf)
        .known_foods_only(false)
        .dry_run(true)
        .build()
        .unwrap();

    let from_pdf = extract_recipes(&config).await.expect("extraction should succeed");
    let dump = tmp.path().join("pages.txt");
    dump_pages(&config, &dump).await.unwrap();
    let from_text =
        extract_recipes_from_text(&fs::read_to_string(&dump).unwrap(), &config).unwrap();

    assert_eq!(from_pdf.recipes, from_text.recipes);
    println!("{} recipes", from_pdf.recipes.len());
}
