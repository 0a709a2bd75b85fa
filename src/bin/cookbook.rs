//! CLI binary for cookbook-extract.
//!
//! A thin shim over the library crate: every subcommand maps its flags to an
//! `ExtractionConfig` or a directory and prints what the library returned.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cookbook_extract::pipeline::search::DEFAULT_SEARCH_TERMS;
use cookbook_extract::store::read_seeds;
use cookbook_extract::{
    bundle_foods, bundle_recipes, config::resolve_under, dump_pages, extract_recipes,
    extract_recipes_from_text, fix_sources, inspect, new_food, renumber_food_ids, search_pages,
    seed_foods, validate_foods, CreateOutcome, ExtractionConfig, ExtractionConfigBuilder,
    ExtractionOutput, ExtractionProgressCallback, PageSelection, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar while pdfium reads pages, plus one
/// log line per skipped page.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Per-page wall-clock start times.
    start_times: Mutex<HashMap<usize, Instant>>,
    chars: AtomicUsize,
    skipped: AtomicUsize,
}

impl CliProgressCallback {
    /// Spinner until `on_extraction_start` tells us the page count.
    fn new_dynamic(prefix: &'static str) -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix(prefix);
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            chars: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.reset_eta();
    }

    /// Clear the bar; used by commands that never reach `on_extraction_complete`.
    fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }

    fn elapsed_secs(&self, page_num: usize) -> f64 {
        self.start_times
            .lock()
            .map(|mut t| t.remove(&page_num))
            .ok()
            .flatten()
            .map(|t| t.elapsed().as_millis() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        if let Ok(mut times) = self.start_times.lock() {
            times.insert(page_num, Instant::now());
        }
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: usize, _total: usize, text_len: usize) {
        self.elapsed_secs(page_num);
        self.chars.fetch_add(text_len, Ordering::SeqCst);
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, _total: usize, error: &str) {
        let secs = self.elapsed_secs(page_num);
        self.skipped.fetch_add(1, Ordering::SeqCst);

        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} Page {:>4}  {}  {}",
            yellow("–"),
            page_num,
            dim(&msg),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_extraction_complete(&self, pages_read: usize, recipes_found: usize) {
        self.bar.finish_and_clear();
        let skipped = self.skipped.load(Ordering::SeqCst);
        eprintln!(
            "{} {} pages read ({} chars, {} skipped)  →  {} recipes",
            if recipes_found > 0 { green("✔") } else { cyan("⚠") },
            bold(&pages_read.to_string()),
            self.chars.load(Ordering::SeqCst),
            skipped,
            bold(&recipes_found.to_string()),
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # What is in the PDF?
  cookbook inspect

  # Extract the recipes on pages 120-200, numbering them from recipe-001
  cookbook recipes --pages 120-200

  # Continue numbering for a second page range
  cookbook recipes --pages 201-270 --first-number 30

  # Dump page text once, then iterate on the text without pdfium
  cookbook dump --pages 120-270 -o pages.txt
  cookbook recipes --from-text pages.txt --pages 120-200 --dry-run

  # Which pages mention lentils or barley?
  cookbook search lentils barley

  # Curate foods
  cookbook add-foods seeds/spices.json
  cookbook new-food "Black Cumin" --category herbs-and-spices
  cookbook validate
  cookbook renumber
  cookbook fix-sources

  # Build public/foods-bundle.json and public/recipes-bundle.json
  cookbook bundle

LAYOUT:
  <base-dir>/*.pdf                   the cookbook (first by name)
  <data-dir>/foods/<slug>.json       curated food records
  <data-dir>/recipes/recipe-NNN.json extracted recipes
  <data-dir>/index.json              optional extraction metadata
  <base-dir>/public/                 bundles

ENVIRONMENT VARIABLES:
  COOKBOOK_BASE_DIR   Default for --base-dir
  COOKBOOK_DATA_DIR   Default for --data-dir
  COOKBOOK_PDF        Default for --pdf
  PDFIUM_LIB_PATH     Directory or file of an existing libpdfium
  RUST_LOG            Overrides the log filter
"#;

/// Scrape a cookbook PDF into a flat-file database of foods and recipes.
#[derive(Parser, Debug)]
#[command(
    name = "cookbook",
    version,
    about = "Scrape a cookbook PDF into a flat-file database of foods and tagged recipes",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory holding the cookbook PDF; other paths default under it.
    #[arg(long, global = true, env = "COOKBOOK_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Database root holding foods/ and recipes/. Default: <base-dir>/data.
    #[arg(long, global = true, env = "COOKBOOK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "COOKBOOK_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "COOKBOOK_QUIET")]
    quiet: bool,

    /// Disable the progress bar.
    #[arg(long, global = true, env = "COOKBOOK_NO_PROGRESS")]
    no_progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct PdfArgs {
    /// Cookbook PDF. Default: first *.pdf in --base-dir.
    #[arg(long, env = "COOKBOOK_PDF")]
    pdf: Option<PathBuf>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "COOKBOOK_PASSWORD")]
    password: Option<String>,

    /// Path to libpdfium (file or directory).
    #[arg(long, env = "COOKBOOK_PDFIUM_LIB")]
    pdfium_lib: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print PDF metadata.
    Inspect {
        #[command(flatten)]
        pdf: PdfArgs,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Write the text of the selected pages, with PAGE markers, to a file.
    Dump {
        #[command(flatten)]
        pdf: PdfArgs,

        /// Page selection: all, 5, 120-200, or 1,3,5.
        #[arg(long, default_value = "all")]
        pages: PageSelection,

        /// Output file, relative to --base-dir.
        #[arg(short, long, default_value = "pages.txt")]
        output: PathBuf,
    },

    /// Extract, tag and store the recipes on the selected pages.
    Recipes {
        #[command(flatten)]
        pdf: PdfArgs,

        /// Page selection: all, 5, 120-200, or 1,3,5.
        #[arg(long, env = "COOKBOOK_PAGES", default_value = "all")]
        pages: PageSelection,

        /// Read a page dump instead of the PDF.
        #[arg(long, value_name = "FILE")]
        from_text: Option<PathBuf>,

        /// Number of the first recipe (recipe-001).
        #[arg(long, default_value_t = 1)]
        first_number: usize,

        /// Characters of each recipe block scanned for ingredients.
        #[arg(long, default_value_t = 4000)]
        window: usize,

        /// Keep matched foods that have no record in foods/.
        #[arg(long)]
        all_foods: bool,

        /// Do not write summary-<first>-<last>.json.
        #[arg(long)]
        no_summary: bool,

        /// Run everything but write nothing.
        #[arg(long)]
        dry_run: bool,

        /// Print the extraction output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the pages mentioning each term.
    Search {
        #[command(flatten)]
        pdf: PdfArgs,

        /// Terms to look for. Default: a built-in list of whole foods.
        terms: Vec<String>,

        /// Page selection: all, 5, 120-200, or 1,3,5.
        #[arg(long, default_value = "all")]
        pages: PageSelection,

        /// Only report terms found on at least this many pages.
        #[arg(long, default_value_t = 1)]
        min_mentions: usize,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Create food records from a seed file; existing files are left alone.
    AddFoods {
        /// JSON array of { "filename": "...", "data": {...} }.
        seeds: PathBuf,
    },

    /// Create an empty food record with the next free id.
    NewFood {
        /// Display name, e.g. "Black Cumin".
        name: String,

        /// Category (repeatable, at least one).
        #[arg(short, long = "category", required = true)]
        categories: Vec<String>,
    },

    /// Check every food record.
    Validate {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Renumber food ids food-1..food-N when any id is duplicated.
    Renumber,

    /// Rewrite legacy `sources` values as { "pages": [...], "quotes": [...] }.
    FixSources,

    /// Build the bundle files the site loads.
    Bundle {
        /// Which bundles to build.
        #[arg(long, value_enum, default_value = "all")]
        only: BundleTarget,

        /// Output directory. Default: <base-dir>/public.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BundleTarget {
    All,
    Foods,
    Recipes,
}

impl Command {
    /// Whether the command reads page text through pdfium.
    fn reads_pages(&self) -> bool {
        match self {
            Command::Dump { .. } | Command::Search { json: false, .. } => true,
            Command::Recipes {
                from_text, json, ..
            } => from_text.is_none() && !json,
            _ => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar carries the feedback while pages are read; library
    // INFO logs would tear it.
    let show_progress = !cli.quiet && !cli.no_progress && cli.command.reads_pages();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let base = cli.base_dir.clone();
    let data_dir = cli
        .data_dir
        .as_deref()
        .map(|d| resolve_under(&base, d))
        .unwrap_or_else(|| base.join("data"));

    match cli.command {
        Command::Inspect { ref pdf, json } => {
            let config = config_builder(&cli, &data_dir, pdf, PageSelection::All, None)
                .build()
                .context("Invalid configuration")?;
            let meta = inspect(&config).await.context("Failed to inspect PDF")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
                );
            } else {
                if let Some(ref t) = meta.title {
                    println!("Title:        {}", t);
                }
                if let Some(ref a) = meta.author {
                    println!("Author:       {}", a);
                }
                if let Some(ref s) = meta.subject {
                    println!("Subject:      {}", s);
                }
                println!("Pages:        {}", meta.page_count);
                println!("PDF Version:  {}", meta.pdf_version);
                if let Some(ref p) = meta.producer {
                    println!("Producer:     {}", p);
                }
                if let Some(ref c) = meta.creator {
                    println!("Creator:      {}", c);
                }
            }
        }

        Command::Dump {
            ref pdf,
            ref pages,
            ref output,
        } => {
            let progress = show_progress.then(|| CliProgressCallback::new_dynamic("Dumping"));
            let config = config_builder(&cli, &data_dir, pdf, pages.clone(), progress.clone())
                .build()
                .context("Invalid configuration")?;
            let out_path = resolve_under(&base, output);

            let report = dump_pages(&config, &out_path).await;
            if let Some(cb) = &progress {
                cb.finish();
            }
            let report = report.context("Page dump failed")?;

            if !cli.quiet {
                eprintln!(
                    "{}  {} pages  →  {}",
                    green("✔"),
                    report.pages_written,
                    bold(&report.path.display().to_string()),
                );
                if !report.page_errors.is_empty() {
                    eprintln!("   {} pages without text", report.page_errors.len());
                }
            }
        }

        Command::Recipes {
            ref from_text,
            json,
            ..
        } => {
            let progress = show_progress.then(|| CliProgressCallback::new_dynamic("Extracting"));
            let config = recipes_config(&cli, &data_dir, progress.clone())?;

            let output = match from_text {
                Some(dump_path) => {
                    let dump_path = resolve_under(&base, dump_path);
                    let dump = tokio::fs::read_to_string(&dump_path)
                        .await
                        .with_context(|| format!("Failed to read page dump {:?}", dump_path))?;
                    extract_recipes_from_text(&dump, &config)
                }
                None => extract_recipes(&config).await,
            };
            if let Some(cb) = &progress {
                cb.finish();
            }
            let output = output.context("Recipe extraction failed")?;

            if json {
                let json =
                    serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
                println!("{json}");
            } else if !cli.quiet {
                print_recipes(&output, &config);
            }
        }

        Command::Search {
            ref pdf,
            ref terms,
            ref pages,
            min_mentions,
            json,
        } => {
            let progress = show_progress.then(|| CliProgressCallback::new_dynamic("Searching"));
            let config = config_builder(&cli, &data_dir, pdf, pages.clone(), progress.clone())
                .build()
                .context("Invalid configuration")?;
            let terms: Vec<String> = if terms.is_empty() {
                DEFAULT_SEARCH_TERMS.iter().map(|t| t.to_string()).collect()
            } else {
                terms.clone()
            };

            let found = search_pages(&config, &terms, min_mentions).await;
            if let Some(cb) = &progress {
                cb.finish();
            }
            let found = found.context("Search failed")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&found).context("Failed to serialise results")?
                );
            } else {
                let mut rows: Vec<_> = found.iter().collect();
                rows.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));
                for (term, pages) in rows {
                    let list: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
                    println!("{:<20} {:>4}  {}", term, pages.len(), dim(&list.join(", ")));
                }
                if found.is_empty() && !cli.quiet {
                    eprintln!("No term found on {min_mentions} or more pages");
                }
            }
        }

        Command::AddFoods { ref seeds } => {
            let foods_dir = data_dir.join("foods");
            let seeds_path = resolve_under(&base, seeds);
            let seeds = read_seeds(&seeds_path)
                .with_context(|| format!("Failed to read seed file {:?}", seeds_path))?;
            let results = seed_foods(&foods_dir, &seeds).context("Failed to create foods")?;

            let mut created = 0;
            for (file, outcome) in &results {
                match outcome {
                    CreateOutcome::Created => {
                        created += 1;
                        if !cli.quiet {
                            println!("  {} {}", green("✓"), file);
                        }
                    }
                    CreateOutcome::AlreadyExists => {
                        if !cli.quiet {
                            println!("  {} {} {}", dim("·"), file, dim("(exists)"));
                        }
                    }
                }
            }
            if !cli.quiet {
                eprintln!(
                    "{} {} created, {} already present  →  {}",
                    green("✔"),
                    bold(&created.to_string()),
                    results.len() - created,
                    foods_dir.display(),
                );
            }
        }

        Command::NewFood {
            ref name,
            ref categories,
        } => {
            let foods_dir = data_dir.join("foods");
            let created = new_food(&foods_dir, name, categories)
                .with_context(|| format!("Failed to create food {:?}", name))?;
            match created.outcome {
                CreateOutcome::Created => println!(
                    "{} {} ({})  →  {}",
                    green("✔"),
                    bold(&created.food.name),
                    created.food.id,
                    created.path.display()
                ),
                CreateOutcome::AlreadyExists => println!(
                    "{} {} already exists",
                    cyan("⚠"),
                    created.path.display()
                ),
            }
        }

        Command::Validate { json } => {
            let foods_dir = data_dir.join("foods");
            let report = validate_foods(&foods_dir).context("Validation could not run")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialise report")?
                );
            } else {
                for (file, issues) in report.errors_by_file() {
                    println!("{} {}", red("✗"), bold(file));
                    for issue in issues {
                        println!("    [{}] {}", issue.field, issue.message);
                    }
                }
                for warning in &report.warnings {
                    println!("{} {}", yellow("!"), warning);
                }
                if !cli.quiet {
                    eprintln!(
                        "{} files, {} unique ids, {} unique names, {} errors, {} warnings",
                        report.files,
                        report.unique_ids,
                        report.unique_names,
                        report.errors.len(),
                        report.warnings.len(),
                    );
                }
            }

            if !report.is_valid() {
                bail!("{} validation error(s) in {}", report.errors.len(), foods_dir.display());
            }
            if !cli.quiet && !json {
                eprintln!("{} All foods valid", green("✔"));
            }
        }

        Command::Renumber => {
            let foods_dir = data_dir.join("foods");
            let changes = renumber_food_ids(&foods_dir).context("Renumbering failed")?;
            if changes.is_empty() {
                if !cli.quiet {
                    eprintln!("{} No duplicate ids, nothing to do", green("✔"));
                }
            } else {
                for change in &changes {
                    println!(
                        "  {:<32} {} → {}",
                        change.file,
                        dim(change.old_id.as_deref().unwrap_or("(none)")),
                        change.new_id
                    );
                }
                if !cli.quiet {
                    eprintln!("{} {} files renumbered", green("✔"), bold(&changes.len().to_string()));
                }
            }
        }

        Command::FixSources => {
            let foods_dir = data_dir.join("foods");
            let fixed = fix_sources(&foods_dir).context("Fixing sources failed")?;
            for file in &fixed {
                println!("  {} {}", green("✔"), file);
            }
            if !cli.quiet {
                eprintln!("{} {} files fixed", green("✔"), bold(&fixed.len().to_string()));
            }
        }

        Command::Bundle { only, ref out_dir } => {
            let out_dir = out_dir
                .as_deref()
                .map(|d| resolve_under(&base, d))
                .unwrap_or_else(|| base.join("public"));

            let mut reports = Vec::new();
            if only != BundleTarget::Recipes {
                reports.push(
                    bundle_foods(&data_dir.join("foods"), &data_dir.join("index.json"), &out_dir)
                        .context("Failed to build foods bundle")?,
                );
            }
            if only != BundleTarget::Foods {
                reports.push(
                    bundle_recipes(&data_dir.join("recipes"), &out_dir)
                        .context("Failed to build recipes bundle")?,
                );
            }

            if !cli.quiet {
                for report in reports {
                    eprintln!(
                        "{}  {} records  {}  →  {}",
                        green("✔"),
                        report.records,
                        dim(&format!("{:.2} KB", report.size_bytes as f64 / 1024.0)),
                        bold(&report.path.display().to_string()),
                    );
                }
            }
        }
    }

    Ok(())
}

/// Map the shared CLI args onto an `ExtractionConfig` builder.
fn config_builder(
    cli: &Cli,
    data_dir: &Path,
    pdf: &PdfArgs,
    pages: PageSelection,
    progress: Option<Arc<CliProgressCallback>>,
) -> ExtractionConfigBuilder {
    let mut builder = ExtractionConfig::builder()
        .base_dir(&cli.base_dir)
        .data_dir(data_dir)
        .pages(pages);

    if let Some(ref path) = pdf.pdf {
        builder = builder.pdf_path(resolve_under(&cli.base_dir, path));
    }
    if let Some(ref pwd) = pdf.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(ref lib) = pdf.pdfium_lib {
        builder = builder.pdfium_lib_path(lib.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb as ProgressCallback);
    }

    builder
}

/// Config for `recipes`; its numbering and window flags go through `build()`.
fn recipes_config(
    cli: &Cli,
    data_dir: &Path,
    progress: Option<Arc<CliProgressCallback>>,
) -> Result<ExtractionConfig> {
    let Command::Recipes {
        ref pdf,
        ref pages,
        first_number,
        window,
        all_foods,
        no_summary,
        dry_run,
        ..
    } = cli.command
    else {
        bail!("not a recipes command");
    };
    config_builder(cli, data_dir, pdf, pages.clone(), progress)
        .first_recipe_number(first_number)
        .ingredient_window(window)
        .known_foods_only(!all_foods)
        .write_summary(!no_summary)
        .dry_run(dry_run)
        .build()
        .context("Invalid configuration")
}

fn print_recipes(output: &ExtractionOutput, config: &ExtractionConfig) {
    for recipe in &output.recipes {
        println!(
            "  {} {:<40} {:<9} {:<8} p.{:<4} {}",
            cyan(&recipe.id),
            recipe.name,
            recipe.meal_type.as_str(),
            recipe.difficulty.as_str(),
            recipe.page,
            dim(&format!("{} foods", recipe.foods.len())),
        );
    }

    let stats = &output.stats;
    eprintln!(
        "{}  {} recipes from {} pages  {}ms",
        if output.page_errors.is_empty() {
            green("✔")
        } else {
            cyan("⚠")
        },
        bold(&stats.recipes_found.to_string()),
        stats.pages_read,
        stats.total_duration_ms,
    );
    if stats.unknown_foods_dropped > 0 {
        eprintln!(
            "   {} matched foods without a record were dropped",
            dim(&stats.unknown_foods_dropped.to_string())
        );
    }
    if config.dry_run {
        eprintln!("   {}", dim("dry run: nothing written"));
    } else {
        eprintln!(
            "   {} files  →  {}",
            stats.recipes_written,
            bold(&config.recipes_dir().display().to_string()),
        );
    }
}
