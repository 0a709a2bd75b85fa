//! Extraction entry points.
//!
//! [`extract_recipes`] runs the whole pipeline against the PDF;
//! [`extract_recipes_from_text`] runs the same segmentation and tagging on a
//! page dump so the heuristics can be iterated on without pdfium.

use crate::config::{ExtractionConfig, PageSelection};
use crate::error::{CookbookError, PageError};
use crate::model::Recipe;
use crate::output::{DocumentMetadata, ExtractionOutput, ExtractionStats, ExtractionSummary, PageText};
use crate::pipeline::matcher::KeywordMatcher;
use crate::pipeline::{input, pages, search, segment, tagger, text};
use crate::store::{self, FoodCatalog};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Extract, tag and store every recipe on the selected pages of the PDF.
///
/// # Returns
/// `Ok(ExtractionOutput)` even when some pages had no text (see
/// `output.page_errors`).
///
/// # Errors
/// Fatal errors only: no PDF, not a PDF, pdfium unavailable, an empty page
/// selection, an unreadable food directory or a failed write.
pub async fn extract_recipes(config: &ExtractionConfig) -> Result<ExtractionOutput, CookbookError> {
    let total_start = Instant::now();

    // ── Step 1: Read page text ───────────────────────────────────────────
    let read = read_pages(config).await?;
    info!(
        "Read {} pages ({} skipped) in {}ms",
        read.pages.len(),
        read.errors.len(),
        read.duration_ms
    );

    // ── Step 2: Segment, match, tag, store ───────────────────────────────
    let mut output = process_pages(&read.pages, read.errors, config)?;
    output.stats.total_pages = read.total_pages;
    output.stats.text_duration_ms = read.duration_ms;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Extraction complete: {} recipes from {} pages, {}ms total",
        output.stats.recipes_found, output.stats.pages_read, output.stats.total_duration_ms
    );
    Ok(output)
}

/// Synchronous wrapper around [`extract_recipes`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_recipes_sync(config: &ExtractionConfig) -> Result<ExtractionOutput, CookbookError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CookbookError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract_recipes(config))
}

/// Run extraction on a page dump (see [`dump_pages`]) instead of the PDF.
///
/// Only pages within `config.pages` are used.
pub fn extract_recipes_from_text(
    dump: &str,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, CookbookError> {
    let total_start = Instant::now();
    let pages: Vec<PageText> = pages::split_pages(dump)
        .into_iter()
        .filter(|p| config.pages.contains(p.page))
        .collect();
    debug!("Page dump holds {} selected pages", pages.len());

    let mut output = process_pages(&pages, Vec::new(), config)?;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
    Ok(output)
}

/// Extract PDF metadata without reading any page text.
pub async fn inspect(config: &ExtractionConfig) -> Result<DocumentMetadata, CookbookError> {
    let pdf_path = input::resolve_input(config)?;
    text::extract_metadata(&pdf_path, config).await
}

/// What [`dump_pages`] wrote.
#[derive(Debug, Clone)]
pub struct DumpReport {
    pub path: PathBuf,
    pub pages_written: usize,
    pub page_errors: Vec<PageError>,
}

/// Write the selected pages' text, joined with `PAGE <n>` markers, to `out_path`.
pub async fn dump_pages(
    config: &ExtractionConfig,
    out_path: &Path,
) -> Result<DumpReport, CookbookError> {
    let read = read_pages(config).await?;
    store::write_text_atomic(out_path, &pages::join_pages(&read.pages))?;
    info!("Dumped {} pages to {}", read.pages.len(), out_path.display());
    Ok(DumpReport {
        path: out_path.to_path_buf(),
        pages_written: read.pages.len(),
        page_errors: read.errors,
    })
}

/// Pages of the PDF mentioning each term; see [`search::scan_pages`].
pub async fn search_pages<S: AsRef<str>>(
    config: &ExtractionConfig,
    terms: &[S],
    min_mentions: usize,
) -> Result<BTreeMap<String, Vec<usize>>, CookbookError> {
    let read = read_pages(config).await?;
    info!("Scanning {} pages for {} terms", read.pages.len(), terms.len());
    Ok(search::scan_pages(&read.pages, terms, min_mentions))
}

// ── Internal helpers ─────────────────────────────────────────────────────

struct ReadPages {
    pages: Vec<PageText>,
    errors: Vec<PageError>,
    total_pages: usize,
    duration_ms: u64,
}

/// Resolve the PDF and read the selected pages.
async fn read_pages(config: &ExtractionConfig) -> Result<ReadPages, CookbookError> {
    let pdf_path = input::resolve_input(config)?;
    info!("Reading {}", pdf_path.display());

    let metadata = text::extract_metadata(&pdf_path, config).await?;
    let total_pages = metadata.page_count;

    let page_indices = config.pages.to_indices(total_pages);
    if page_indices.is_empty() {
        return Err(CookbookError::PageOutOfRange {
            page: first_requested(&config.pages),
            total: total_pages,
        });
    }
    debug!("Selected {} of {} pages", page_indices.len(), total_pages);

    let start = Instant::now();
    let results = text::extract_page_texts(&pdf_path, config, &page_indices).await?;
    let mut pages = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(page) => pages.push(page),
            Err(e) => errors.push(e),
        }
    }

    Ok(ReadPages {
        pages,
        errors,
        total_pages,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn first_requested(selection: &PageSelection) -> usize {
    match selection {
        PageSelection::All => 0,
        PageSelection::Single(p) | PageSelection::Range(p, _) => *p,
        PageSelection::Set(pages) => pages.iter().copied().min().unwrap_or(0),
    }
}

fn load_catalog(config: &ExtractionConfig) -> Result<FoodCatalog, CookbookError> {
    let dir = config.foods_dir();
    if !config.known_foods_only && !dir.exists() {
        warn!("No food directory at {}; tagging without food records", dir.display());
        return Ok(FoodCatalog::default());
    }
    FoodCatalog::load(&dir)
}

/// Segmentation, matching, tagging and storage, shared by both entry points.
fn process_pages(
    pages: &[PageText],
    page_errors: Vec<PageError>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, CookbookError> {
    let catalog = load_catalog(config)?;
    let matcher = KeywordMatcher::canonical();
    let blocks = segment::segment(pages, config.ingredient_window);
    debug!("Segmented {} recipe blocks", blocks.len());

    let mut stats = ExtractionStats {
        pages_read: pages.len(),
        pages_skipped: page_errors.len(),
        foods_loaded: catalog.len(),
        ..ExtractionStats::default()
    };

    let mut recipes = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.into_iter().enumerate() {
        let mut foods = matcher.match_text(&block.text);
        if config.known_foods_only {
            let before = foods.len();
            foods.retain(|key| catalog.contains(key));
            let dropped = before - foods.len();
            if dropped > 0 {
                debug!("{}: dropped {} foods without a record", block.name, dropped);
            }
            stats.unknown_foods_dropped += dropped;
        }

        let tags = tagger::derive_tags(&block.name, &block.text, &foods, &catalog);
        recipes.push(Recipe {
            id: format!("recipe-{:03}", config.first_recipe_number + i),
            name: block.name,
            page: block.page,
            meal_type: tags.meal_type,
            servings: block.servings,
            difficulty: block.difficulty,
            description: block.description,
            ingredients: block.ingredients,
            foods: foods.into_iter().collect(),
            daily_dozen: tags.daily_dozen,
            tweaks: tags.tweaks,
            synergies: tags.synergies,
        });
    }
    stats.recipes_found = recipes.len();

    let first_page = pages.iter().map(|p| p.page).min().unwrap_or(0);
    let last_page = pages.iter().map(|p| p.page).max().unwrap_or(0);
    let summary = ExtractionSummary::from_recipes(&recipes, first_page, last_page);

    if config.dry_run {
        info!("Dry run: {} recipes not written", recipes.len());
    } else {
        let dir = config.recipes_dir();
        fs::create_dir_all(&dir).map_err(|source| CookbookError::OutputWriteFailed {
            path: dir.clone(),
            source,
        })?;
        for recipe in &recipes {
            store::write_recipe(&dir, recipe)?;
            stats.recipes_written += 1;
        }
        if config.write_summary {
            store::write_json_atomic(&dir.join(summary.file_name()), &summary)?;
        }
        info!("Wrote {} recipes to {}", stats.recipes_written, dir.display());
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_complete(stats.pages_read, stats.recipes_found);
    }

    Ok(ExtractionOutput {
        recipes,
        summary,
        page_errors,
        stats,
    })
}
