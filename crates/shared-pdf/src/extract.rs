//! Page-ordered text extraction
//!
//! lopdf decides whether the upload opens at all; pdf-extract then decodes
//! each page through the document's fonts (simple encodings, Type0/CID
//! fonts and their ToUnicode maps). A document that opens but whose
//! content cannot be decoded yields empty pages rather than an error.

use crate::error::ExtractError;
use lopdf::Document;
use shared_types::LeaseDocument;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Extract the whole lease as one string: page texts concatenated in page order.
pub fn extract_text(document: &LeaseDocument) -> Result<String, ExtractError> {
    Ok(extract_pages(&document.content)?.concat())
}

/// Extract text per page, in page order
pub fn extract_pages(data: &[u8]) -> Result<Vec<String>, ExtractError> {
    if data.len() < 5 || &data[0..5] != b"%PDF-" {
        return Err(ExtractError::NotPdf);
    }

    let doc = Document::load_mem(data).map_err(|e| ExtractError::Unreadable(e.to_string()))?;
    let page_count = doc.get_pages().len();

    let decoded = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));

    let pages: Vec<String> = match decoded {
        Ok(Ok(pages)) => pages.iter().map(|page| tidy(page)).collect(),
        Ok(Err(e)) => {
            warn!(error = %e, "page text could not be decoded");
            vec![String::new(); page_count]
        }
        Err(_) => {
            warn!("text decoder aborted on this document");
            vec![String::new(); page_count]
        }
    };

    debug!(
        pages = pages.len(),
        empty = pages.iter().filter(|p| p.is_empty()).count(),
        "extracted lease text"
    );

    Ok(pages)
}

/// Trim every line and drop the blank lines pdf-extract emits around
/// paragraph and page breaks.
fn tidy(page: &str) -> String {
    page.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
