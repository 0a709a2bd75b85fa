//! Configuration types for recipe extraction.
//!
//! Every knob of a run lives in [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]; the CLI fills it from flags and environment
//! variables.

use crate::error::CookbookError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for a recipe extraction run.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use cookbook_extract::{ExtractionConfig, PageSelection};
///
/// let config = ExtractionConfig::builder()
///     .base_dir("/books/how-not-to-diet")
///     .pages(PageSelection::Range(120, 200))
///     .first_recipe_number(1)
///     .build()
///     .unwrap();
/// assert!(config.recipes_dir().ends_with("data/recipes"));
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Directory searched for the cookbook PDF (`*.pdf`, first by name). Default: `.`.
    pub base_dir: PathBuf,

    /// Explicit PDF path. Takes precedence over the `base_dir` search.
    pub pdf_path: Option<PathBuf>,

    /// Root of the curated database; holds `foods/` and `recipes/`. Default: `<base_dir>/data`.
    pub data_dir: PathBuf,

    /// Where bundles are written. Default: `<base_dir>/public`.
    pub bundle_dir: PathBuf,

    /// Page selection. Default: All pages.
    pub pages: PageSelection,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Explicit pdfium library path. Falls back to `PDFIUM_LIB_PATH`, then
    /// the executable's directory, the working directory and the system.
    pub pdfium_lib_path: Option<PathBuf>,

    /// Number given to the first recipe of the run (`recipe-001`). Default: 1.
    pub first_recipe_number: usize,

    /// Maximum characters of a recipe block scanned for ingredients. Default: 4000.
    pub ingredient_window: usize,

    /// Drop matched foods that have no record in `data/foods`. Default: true.
    pub known_foods_only: bool,

    /// Write `summary-<first>-<last>.json` next to the recipes. Default: true.
    pub write_summary: bool,

    /// Run the whole pipeline but write nothing. Default: false.
    pub dry_run: bool,

    /// Optional per-page progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::rooted_at(".")
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("base_dir", &self.base_dir)
            .field("pdf_path", &self.pdf_path)
            .field("data_dir", &self.data_dir)
            .field("bundle_dir", &self.bundle_dir)
            .field("pages", &self.pages)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field("first_recipe_number", &self.first_recipe_number)
            .field("ingredient_window", &self.ingredient_window)
            .field("known_foods_only", &self.known_foods_only)
            .field("write_summary", &self.write_summary)
            .field("dry_run", &self.dry_run)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
            data_dir_set: false,
            bundle_dir_set: false,
        }
    }

    /// Defaults with every directory derived from `base`.
    pub fn rooted_at(base: impl Into<PathBuf>) -> Self {
        let base_dir = base.into();
        Self {
            data_dir: base_dir.join("data"),
            bundle_dir: base_dir.join("public"),
            base_dir,
            pdf_path: None,
            pages: PageSelection::default(),
            password: None,
            pdfium_lib_path: None,
            first_recipe_number: 1,
            ingredient_window: 4000,
            known_foods_only: true,
            write_summary: true,
            dry_run: false,
            progress_callback: None,
        }
    }

    /// `<data_dir>/foods`
    pub fn foods_dir(&self) -> PathBuf {
        self.data_dir.join("foods")
    }

    /// `<data_dir>/recipes`
    pub fn recipes_dir(&self) -> PathBuf {
        self.data_dir.join("recipes")
    }

    /// `<data_dir>/index.json`, the optional extraction metadata file.
    pub fn index_file(&self) -> PathBuf {
        self.data_dir.join("index.json")
    }
}

/// Builder for [`ExtractionConfig`].
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
    data_dir_set: bool,
    bundle_dir_set: bool,
}

impl fmt::Debug for ExtractionConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl ExtractionConfigBuilder {
    /// Set the base directory. Data and bundle directories follow it unless
    /// they were set explicitly.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = dir.into();
        if !self.data_dir_set {
            self.config.data_dir = self.config.base_dir.join("data");
        }
        if !self.bundle_dir_set {
            self.config.bundle_dir = self.config.base_dir.join("public");
        }
        self
    }

    pub fn pdf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdf_path = Some(path.into());
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self.data_dir_set = true;
        self
    }

    pub fn bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.bundle_dir = dir.into();
        self.bundle_dir_set = true;
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn first_recipe_number(mut self, n: usize) -> Self {
        self.config.first_recipe_number = n;
        self
    }

    pub fn ingredient_window(mut self, chars: usize) -> Self {
        self.config.ingredient_window = chars;
        self
    }

    pub fn known_foods_only(mut self, v: bool) -> Self {
        self.config.known_foods_only = v;
        self
    }

    pub fn write_summary(mut self, v: bool) -> Self {
        self.config.write_summary = v;
        self
    }

    pub fn dry_run(mut self, v: bool) -> Self {
        self.config.dry_run = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, CookbookError> {
        let c = &self.config;
        if c.first_recipe_number == 0 {
            return Err(CookbookError::InvalidConfig(
                "Recipe numbering starts at 1".into(),
            ));
        }
        if c.ingredient_window < 100 {
            return Err(CookbookError::InvalidConfig(format!(
                "Ingredient window must be ≥ 100 characters, got {}",
                c.ingredient_window
            )));
        }
        if let PageSelection::Range(start, end) = c.pages {
            if start == 0 || start > end {
                return Err(CookbookError::InvalidConfig(format!(
                    "Invalid page range {start}-{end}"
                )));
            }
        }
        Ok(self.config)
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_under(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

// ── Page selection ───────────────────────────────────────────────────────

/// Specifies which pages of the PDF to scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Scan all pages (default).
    #[default]
    All,
    /// Scan a single page (1-indexed).
    Single(usize),
    /// Scan a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Scan specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Whether a 1-indexed page number is selected.
    pub fn contains(&self, page: usize) -> bool {
        match self {
            PageSelection::All => page >= 1,
            PageSelection::Single(p) => *p == page,
            PageSelection::Range(start, end) => page >= *start && page <= *end,
            PageSelection::Set(pages) => pages.contains(&page),
        }
    }
}

impl std::str::FromStr for PageSelection {
    type Err = CookbookError;

    /// Parse `all`, `5`, `120-200` or `1,3,5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let page = |p: &str| -> Result<usize, CookbookError> {
            let n: usize = p.trim().parse().map_err(|_| {
                CookbookError::InvalidConfig(format!("Invalid page number: '{}'", p.trim()))
            })?;
            if n < 1 {
                return Err(CookbookError::InvalidConfig(
                    "Pages are 1-indexed, minimum is 1".into(),
                ));
            }
            Ok(n)
        };

        if s == "all" {
            return Ok(PageSelection::All);
        }
        if let Some((start, end)) = s.split_once('-') {
            let (start, end) = (page(start)?, page(end)?);
            if start > end {
                return Err(CookbookError::InvalidConfig(format!(
                    "Invalid page range '{start}-{end}': start must be <= end"
                )));
            }
            return Ok(PageSelection::Range(start, end));
        }
        if s.contains(',') {
            let pages = s.split(',').map(page).collect::<Result<Vec<_>, _>>()?;
            return Ok(PageSelection::Set(pages));
        }
        Ok(PageSelection::Single(page(&s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_selection_to_indices() {
        assert_eq!(PageSelection::All.to_indices(5), vec![0, 1, 2, 3, 4]);
        assert_eq!(PageSelection::Single(3).to_indices(5), vec![2]);
        assert_eq!(PageSelection::Single(6).to_indices(5), Vec::<usize>::new());
        assert_eq!(PageSelection::Range(2, 4).to_indices(5), vec![1, 2, 3]);
        assert_eq!(PageSelection::Range(4, 9).to_indices(5), vec![3, 4]);
        assert_eq!(
            PageSelection::Set(vec![3, 1, 3]).to_indices(5),
            vec![0, 2] // deduplicated and sorted
        );
    }

    #[test]
    fn parse_page_selection() {
        assert_eq!("all".parse::<PageSelection>().unwrap(), PageSelection::All);
        assert_eq!("7".parse::<PageSelection>().unwrap(), PageSelection::Single(7));
        assert_eq!(
            "120-200".parse::<PageSelection>().unwrap(),
            PageSelection::Range(120, 200)
        );
        assert_eq!(
            "1, 3,5".parse::<PageSelection>().unwrap(),
            PageSelection::Set(vec![1, 3, 5])
        );
        assert!("0".parse::<PageSelection>().is_err());
        assert!("9-3".parse::<PageSelection>().is_err());
        assert!("x".parse::<PageSelection>().is_err());
    }

    #[test]
    fn selection_contains() {
        assert!(PageSelection::Range(120, 200).contains(120));
        assert!(!PageSelection::Range(120, 200).contains(201));
        assert!(PageSelection::Set(vec![2, 4]).contains(4));
        assert!(!PageSelection::All.contains(0));
    }

    #[test]
    fn base_dir_moves_derived_dirs() {
        let config = ExtractionConfig::builder()
            .base_dir("/books")
            .build()
            .unwrap();
        assert_eq!(config.foods_dir(), PathBuf::from("/books/data/foods"));
        assert_eq!(config.recipes_dir(), PathBuf::from("/books/data/recipes"));
        assert_eq!(config.bundle_dir, PathBuf::from("/books/public"));
    }

    #[test]
    fn explicit_data_dir_survives_base_dir() {
        let config = ExtractionConfig::builder()
            .data_dir("/elsewhere")
            .base_dir("/books")
            .build()
            .unwrap();
        assert_eq!(config.foods_dir(), PathBuf::from("/elsewhere/foods"));
        assert_eq!(config.bundle_dir, PathBuf::from("/books/public"));
    }

    #[test]
    fn build_rejects_bad_values() {
        assert!(ExtractionConfig::builder()
            .first_recipe_number(0)
            .build()
            .is_err());
        assert!(ExtractionConfig::builder()
            .ingredient_window(10)
            .build()
            .is_err());
        assert!(ExtractionConfig::builder()
            .pages(PageSelection::Range(9, 2))
            .build()
            .is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let config = ExtractionConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }
}
