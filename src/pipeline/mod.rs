//! Pipeline stages for recipe extraction.
//!
//! Each submodule implements one transformation step and is testable on its
//! own; only [`input`] and [`text`] touch the PDF.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ text ──▶ pages ──▶ segment ──▶ matcher ──▶ tagger
//! (*.pdf)  (pdfium)  (dump)   (blocks)    (foods)     (tags)
//! ```
//!
//! 1. [`input`]   — pick the PDF and check its magic bytes
//! 2. [`text`]    — read page text; runs in `spawn_blocking` because pdfium
//!    is not async-safe
//! 3. [`pages`]   — join pages with `PAGE <n>` markers, or split a dump back
//! 4. [`segment`] — cut the text into recipe blocks on the `MAKES:` marker
//! 5. [`matcher`] — map ingredient keywords to food keys, longest first
//! 6. [`tagger`]  — meal type, Daily Dozen, tweaks and synergies
//!
//! [`search`] reuses the page texts to report keyword mentions per page.

pub mod input;
pub mod matcher;
pub mod pages;
pub mod search;
pub mod segment;
pub mod tagger;
pub mod text;
