use crate::jurisdiction::Jurisdiction;
use shared_pdf::PdfWriteError;
use thiserror::Error;

/// A lookup the static tables cannot satisfy. This is a build defect, not
/// something a user can recover from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No rule set configured for {0}")]
    MissingRuleSet(Jurisdiction),

    #[error("No resource list configured for {0}")]
    MissingResources(Jurisdiction),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to write PDF report: {0}")]
    Pdf(#[from] PdfWriteError),
}
