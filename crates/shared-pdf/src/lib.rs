//! Shared PDF handling utilities
//!
//! This crate provides page-ordered text extraction from uploaded leases and
//! a small page writer for producing paginated report documents.

pub mod error;
pub mod extract;
pub mod layout;
pub mod writer;

pub use error::{ExtractError, PdfWriteError};
pub use extract::{extract_pages, extract_text};
pub use layout::wrap;
pub use writer::{FontFace, PageLayout, PageWriter, RenderedPdf, Rgb};
