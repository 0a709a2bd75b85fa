//! PDF text extraction via pdfium.
//!
//! pdfium is a blocking C library, so every call here runs under
//! `tokio::task::spawn_blocking` and the async functions only await the
//! worker. The library is bound per call; a run makes two calls at most.

use crate::config::ExtractionConfig;
use crate::error::{CookbookError, PageError};
use crate::output::{DocumentMetadata, PageText};
use crate::progress::ProgressCallback;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming the pdfium shared library.
pub const PDFIUM_LIB_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind pdfium: the explicit path (file or directory), then `PDFIUM_LIB_PATH`, then the
/// executable's directory, then the working directory, then the system.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, CookbookError> {
    let configured = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(PDFIUM_LIB_ENV).map(PathBuf::from));

    if let Some(path) = configured {
        let path = if path.is_dir() {
            Pdfium::pdfium_platform_library_name_at_path(&path)
        } else {
            path
        };
        let bindings = Pdfium::bind_to_library(&path).map_err(|e| {
            CookbookError::PdfiumBindingFailed(format!("{} ({e:?})", path.display()))
        })?;
        debug!("Bound pdfium from {}", path.display());
        return Ok(Pdfium::new(bindings));
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(Pdfium::pdfium_platform_library_name_at_path(&dir));
    }
    candidates.push(Pdfium::pdfium_platform_library_name_at_path(Path::new(".")));

    for path in candidates {
        if let Ok(bindings) = Pdfium::bind_to_library(&path) {
            debug!("Bound pdfium from {}", path.display());
            return Ok(Pdfium::new(bindings));
        }
    }

    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| CookbookError::PdfiumBindingFailed(format!("{e:?}")))?;
    Ok(Pdfium::new(bindings))
}

fn open_document<'a>(
    pdfium: &'a Pdfium,
    pdf_path: &Path,
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, CookbookError> {
    pdfium.load_pdf_from_file(pdf_path, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                CookbookError::WrongPassword {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                CookbookError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            }
        } else {
            CookbookError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: err_str,
            }
        }
    })
}

/// Read the text layer of the selected pages (0-indexed).
///
/// The outer `Result` fails only when the document cannot be opened; each
/// page then either yields its text or a [`PageError`].
pub async fn extract_page_texts(
    pdf_path: &Path,
    config: &ExtractionConfig,
    page_indices: &[usize],
) -> Result<Vec<Result<PageText, PageError>>, CookbookError> {
    let path = pdf_path.to_path_buf();
    let password = config.password.clone();
    let lib_path = config.pdfium_lib_path.clone();
    let callback = config.progress_callback.clone();
    let indices = page_indices.to_vec();

    tokio::task::spawn_blocking(move || {
        extract_page_texts_blocking(
            &path,
            lib_path.as_deref(),
            password.as_deref(),
            &indices,
            callback.as_ref(),
        )
    })
    .await
    .map_err(|e| CookbookError::Internal(format!("Text extraction task panicked: {}", e)))?
}

fn extract_page_texts_blocking(
    pdf_path: &Path,
    lib_path: Option<&Path>,
    password: Option<&str>,
    page_indices: &[usize],
    callback: Option<&ProgressCallback>,
) -> Result<Vec<Result<PageText, PageError>>, CookbookError> {
    let pdfium = bind_pdfium(lib_path)?;
    let document = open_document(&pdfium, pdf_path, password)?;
    let pages = document.pages();
    let total_pages = pages.len() as usize;
    let selected = page_indices.len();
    info!("PDF loaded: {} pages, reading {}", total_pages, selected);

    if let Some(cb) = callback {
        cb.on_extraction_start(selected);
    }

    let mut results = Vec::with_capacity(selected);
    for &idx in page_indices {
        let page_num = idx + 1;
        if idx >= total_pages {
            warn!(
                "Skipping page {} (out of range, total={})",
                page_num, total_pages
            );
            continue;
        }
        if let Some(cb) = callback {
            cb.on_page_start(page_num, selected);
        }

        let result = pages
            .get(idx as u16)
            .and_then(|page| page.text().map(|text| text.all()))
            .map_err(|e| PageError::TextUnavailable {
                page: page_num,
                detail: format!("{:?}", e),
            })
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(PageError::Empty { page: page_num })
                } else {
                    Ok(PageText::new(page_num, text))
                }
            });

        match &result {
            Ok(page) => {
                debug!("Page {}: {} chars", page_num, page.text.chars().count());
                if let Some(cb) = callback {
                    cb.on_page_complete(page_num, selected, page.text.chars().count());
                }
            }
            Err(e) => {
                debug!("{}", e);
                if let Some(cb) = callback {
                    cb.on_page_error(page_num, selected, &e.to_string());
                }
            }
        }
        results.push(result);
    }

    Ok(results)
}

/// Document metadata, without reading page text.
pub async fn extract_metadata(
    pdf_path: &Path,
    config: &ExtractionConfig,
) -> Result<DocumentMetadata, CookbookError> {
    let path = pdf_path.to_path_buf();
    let password = config.password.clone();
    let lib_path = config.pdfium_lib_path.clone();

    tokio::task::spawn_blocking(move || {
        extract_metadata_blocking(&path, lib_path.as_deref(), password.as_deref())
    })
    .await
    .map_err(|e| CookbookError::Internal(format!("Metadata task panicked: {}", e)))?
}

fn extract_metadata_blocking(
    pdf_path: &Path,
    lib_path: Option<&Path>,
    password: Option<&str>,
) -> Result<DocumentMetadata, CookbookError> {
    let pdfium = bind_pdfium(lib_path)?;
    let document = open_document(&pdfium, pdf_path, password)?;

    let metadata = document.metadata();
    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().trim().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}
