//! Input resolution: find the cookbook PDF and check it really is one.
//!
//! pdfium only reports "could not load" for a missing or mistyped file, so
//! existence, read permission and the `%PDF` magic bytes are checked here
//! first to give the caller a meaningful error.

use crate::config::ExtractionConfig;
use crate::error::CookbookError;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The PDF a run reads: `config.pdf_path` if set, otherwise the first
/// `*.pdf` in `config.base_dir`.
pub fn resolve_input(config: &ExtractionConfig) -> Result<PathBuf, CookbookError> {
    let path = match &config.pdf_path {
        Some(path) => path.clone(),
        None => locate_pdf(&config.base_dir)?,
    };
    resolve_local(&path)
}

/// First `*.pdf` (case-insensitive extension) in `dir`, by file name.
pub fn locate_pdf(dir: &Path) -> Result<PathBuf, CookbookError> {
    let entries = fs::read_dir(dir).map_err(|source| CookbookError::ReadFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    match pdfs.into_iter().next() {
        Some(pdf) => {
            info!("Found PDF: {}", pdf.display());
            Ok(pdf)
        }
        None => Err(CookbookError::PdfNotFound {
            dir: dir.to_path_buf(),
        }),
    }
}

/// Validate existence, read permission and PDF magic bytes.
pub fn resolve_local(path: &Path) -> Result<PathBuf, CookbookError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(CookbookError::FileNotFound { path });
    }

    match fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(CookbookError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(CookbookError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(CookbookError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn locate_picks_first_pdf_by_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b-book.pdf"), b"%PDF-1.7").unwrap();
        fs::write(tmp.path().join("a-book.PDF"), b"%PDF-1.7").unwrap();
        fs::write(tmp.path().join("0-notes.txt"), b"text").unwrap();

        let found = locate_pdf(tmp.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "a-book.PDF");
    }

    #[test]
    fn locate_without_pdf_fails() {
        let tmp = TempDir::new().unwrap();
        let err = locate_pdf(tmp.path()).unwrap_err();
        assert!(matches!(err, CookbookError::PdfNotFound { .. }));
    }

    #[test]
    fn resolve_rejects_missing_and_non_pdf() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.pdf");
        assert!(matches!(
            resolve_local(&missing).unwrap_err(),
            CookbookError::FileNotFound { .. }
        ));

        let fake = tmp.path().join("fake.pdf");
        fs::write(&fake, b"<html>").unwrap();
        match resolve_local(&fake).unwrap_err() {
            CookbookError::NotAPdf { magic, .. } => assert_eq!(&magic, b"<htm"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn explicit_path_wins_over_search() {
        let tmp = TempDir::new().unwrap();
        let pdf = tmp.path().join("chosen.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        fs::write(tmp.path().join("a.pdf"), b"%PDF-1.4").unwrap();

        let config = ExtractionConfig::builder()
            .base_dir(tmp.path())
            .pdf_path(&pdf)
            .build()
            .unwrap();
        assert_eq!(resolve_input(&config).unwrap(), pdf);
    }
}
