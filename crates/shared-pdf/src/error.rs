use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Document is not a PDF (missing %PDF header)")]
    NotPdf,

    #[error("Failed to open PDF: {0}")]
    Unreadable(String),
}

#[derive(Error, Debug)]
pub enum PdfWriteError {
    #[error("Failed to encode page content: {0}")]
    Encode(String),

    #[error("Failed to serialize PDF: {0}")]
    Save(String),
}
