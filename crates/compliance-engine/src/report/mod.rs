//! Report renderings
//!
//! Three independent views over one `AnalysisResult`: markdown for the
//! screen, a plain-text download, and a paginated PDF download. Each is a
//! pure transformation; nothing is stored.

pub mod markdown;
pub mod pdf;
pub mod sample;
pub mod text;

use crate::jurisdiction::Jurisdiction;
use shared_types::{PropertyMetadata, ReviewerRole};

pub use markdown::render_markdown;
pub use pdf::render_pdf;
pub use sample::{sample_report, SAMPLE_JURISDICTION};
pub use text::render_text;

pub const DISCLAIMER: &str = "Disclaimer: This lease analysis is for educational and \
    informational purposes only and does not constitute legal advice. Always consult with a \
    qualified attorney.";

pub const PRIVACY_NOTICE: &str = "Privacy: Your lease was processed in memory to produce this \
    report and has not been stored.";

/// Column width for wrapped report text and the separator rule
pub const REPORT_COLUMNS: usize = 95;

/// Who the report is for and what it covers
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub jurisdiction: Jurisdiction,
    pub role: ReviewerRole,
    /// Requester identity shown in the title block (the submitted email)
    pub requester: &'a str,
    pub property: Option<&'a PropertyMetadata>,
}

impl ReportContext<'_> {
    pub fn title(&self) -> String {
        format!(
            "{} Lease Analysis for: {} ({})",
            self.jurisdiction.name(),
            self.requester,
            self.role.name()
        )
    }

    /// Property lines for the title block, empty when nothing was given
    pub fn property_lines(&self) -> Vec<String> {
        let Some(property) = self.property else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        match (&property.address, &property.unit) {
            (Some(address), Some(unit)) => lines.push(format!("Property: {}, Unit {}", address, unit)),
            (Some(address), None) => lines.push(format!("Property: {}", address)),
            (None, Some(unit)) => lines.push(format!("Unit: {}", unit)),
            (None, None) => {}
        }
        if let Some(landlord) = &property.landlord_name {
            lines.push(format!("Landlord: {}", landlord));
        }
        lines
    }
}
