//! Error types for the cookbook-extract library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`CookbookError`] — **Fatal**: the run cannot proceed at all (no PDF,
//!   unreadable food directory, a write that failed). Returned as
//!   `Err(CookbookError)` from the top-level entry points.
//!
//! * [`PageError`] — **Non-fatal**: a single page had no usable text. Stored
//!   inside [`crate::output::ExtractionOutput`]; the other pages are still
//!   segmented and tagged.
//!
//! Everything else in the pipeline is best-effort: an ingredient that matches
//! no keyword is simply absent from the output.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the cookbook-extract library.
#[derive(Debug, Error)]
pub enum CookbookError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// No `*.pdf` file was found in the search directory.
    #[error("No PDF found in '{dir}'\nPlace the cookbook PDF there or pass --pdf <PATH>.")]
    PdfNotFound { dir: PathBuf },

    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// The page selection does not intersect the document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Text extraction needs a pdfium shared library. You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium.\n\
  • Place the library next to the executable or in the working directory.\n\
  • Install pdfium system-wide.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Data directory errors ─────────────────────────────────────────────
    /// A data directory or file could not be read.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON file could not be parsed or serialised.
    #[error("Invalid JSON in '{path}': {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more records could not be aggregated.
    #[error("{} file(s) in '{dir}' failed validation:\n  - {}", problems.len(), problems.join("\n  - "))]
    InvalidRecords { dir: PathBuf, problems: Vec<String> },

    /// A directory that must hold records holds none.
    #[error("No {kind} files found in '{dir}'")]
    EmptyCollection { kind: &'static str, dir: PathBuf },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single page.
///
/// Pages that fail this way are skipped; recipes on the remaining pages are
/// still extracted.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum PageError {
    /// pdfium could not load the page or its text layer.
    #[error("Page {page}: text extraction failed: {detail}")]
    TextUnavailable { page: usize, detail: String },

    /// The page has no extractable text (blank or image-only).
    #[error("Page {page}: no text")]
    Empty { page: usize },
}

impl PageError {
    /// 1-indexed page number the error refers to.
    pub fn page(&self) -> usize {
        match self {
            PageError::TextUnavailable { page, .. } | PageError::Empty { page } => *page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_not_found_mentions_dir() {
        let e = CookbookError::PdfNotFound {
            dir: PathBuf::from("/books"),
        };
        assert!(e.to_string().contains("/books"), "got: {e}");
    }

    #[test]
    fn invalid_records_lists_every_problem() {
        let e = CookbookError::InvalidRecords {
            dir: PathBuf::from("data/foods"),
            problems: vec!["a.json: missing id".into(), "b.json: bad json".into()],
        };
        let msg = e.to_string();
        assert!(msg.starts_with("2 file(s)"), "got: {msg}");
        assert!(msg.contains("a.json: missing id"));
        assert!(msg.contains("b.json: bad json"));
    }

    #[test]
    fn page_error_reports_page() {
        let e = PageError::Empty { page: 7 };
        assert_eq!(e.page(), 7);
        assert_eq!(e.to_string(), "Page 7: no text");

        let e = PageError::TextUnavailable {
            page: 3,
            detail: "bad stream".into(),
        };
        assert_eq!(e.page(), 3);
        assert!(e.to_string().contains("bad stream"));
    }
}
