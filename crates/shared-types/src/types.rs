use thiserror::Error;

/// Media type accepted for uploaded leases
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Unsupported document type '{0}'. Only PDF leases are accepted")]
    UnsupportedMediaType(String),

    #[error("Uploaded document is empty")]
    Empty,
}

/// An uploaded lease. Lives only for the duration of one request and is
/// never written anywhere.
#[derive(Clone)]
pub struct LeaseDocument {
    pub filename: String,
    pub content: Vec<u8>,
    pub media_type: String,
}

impl LeaseDocument {
    /// Accept an upload, rejecting anything that is not declared as a PDF.
    ///
    /// Browsers often send `application/octet-stream` (or nothing) for local
    /// files, so a generic type is tolerated when the filename says `.pdf`.
    pub fn new(
        filename: impl Into<String>,
        content: Vec<u8>,
        media_type: Option<&str>,
    ) -> Result<Self, DocumentError> {
        let filename = filename.into();
        let declared = media_type
            .map(|m| m.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let is_pdf_name = filename.to_ascii_lowercase().ends_with(".pdf");
        let accepted = declared == PDF_MEDIA_TYPE
            || ((declared.is_empty() || declared == "application/octet-stream") && is_pdf_name);

        if !accepted {
            let shown = if declared.is_empty() {
                filename.clone()
            } else {
                declared
            };
            return Err(DocumentError::UnsupportedMediaType(shown));
        }

        if content.is_empty() {
            return Err(DocumentError::Empty);
        }

        Ok(Self {
            filename,
            content,
            media_type: PDF_MEDIA_TYPE.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// Lease bytes stay out of logs.
impl std::fmt::Debug for LeaseDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaseDocument")
            .field("filename", &self.filename)
            .field("bytes", &self.content.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    Tenant,
    Landlord,
    PropertyManager,
}

impl ReviewerRole {
    pub fn name(&self) -> &'static str {
        match self {
            ReviewerRole::Tenant => "Tenant",
            ReviewerRole::Landlord => "Landlord",
            ReviewerRole::PropertyManager => "Property Manager",
        }
    }

    /// How the reviewer reads the lease; feeds the prompt preamble
    pub fn legal_lens(&self) -> &'static str {
        match self {
            ReviewerRole::Tenant => {
                "protecting the tenant's rights and flagging clauses that waive or weaken statutory tenant protections"
            }
            ReviewerRole::Landlord => {
                "protecting the landlord from unenforceable clauses, penalties, and missing mandatory disclosures"
            }
            ReviewerRole::PropertyManager => {
                "ensuring the managing agent's standard lease meets every statutory requirement before it is signed"
            }
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', " ").as_str() {
            "tenant" => Some(ReviewerRole::Tenant),
            "landlord" => Some(ReviewerRole::Landlord),
            "property manager" | "manager" => Some(ReviewerRole::PropertyManager),
            _ => None,
        }
    }

    pub fn all() -> [Self; 3] {
        [
            ReviewerRole::Tenant,
            ReviewerRole::Landlord,
            ReviewerRole::PropertyManager,
        ]
    }
}

impl std::fmt::Display for ReviewerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional free-text details about the leased property
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PropertyMetadata {
    pub address: Option<String>,
    pub unit: Option<String>,
    pub landlord_name: Option<String>,
}

impl PropertyMetadata {
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.unit.is_none() && self.landlord_name.is_none()
    }
}

/// Severity tiers, declared in report order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Severity {
    Critical,
    Warning,
    Compliant,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Compliant];

    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Critical => "🔴",
            Severity::Warning => "⚠️",
            Severity::Compliant => "✅",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Compliant => "Compliant",
        }
    }

    /// Section heading used when findings are grouped by tier
    pub fn heading(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical Issues",
            Severity::Warning => "Potential Issues",
            Severity::Compliant => "Compliant Clauses",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    /// `None` when the line carried no recognizable marker
    pub severity: Option<Severity>,
    pub description: String,
    /// Trimmed line the finding was parsed from
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    pub raw: String,
}

impl AnalysisResult {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Some(severity))
            .count()
    }

    pub fn unclassified(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity.is_none())
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |f| f.severity == Some(severity))
    }

    /// The normalized report lines, in first-seen order
    pub fn lines(&self) -> Vec<&str> {
        self.findings.iter().map(|f| f.line.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_declared_pdf() {
        let doc = LeaseDocument::new("lease.pdf", b"%PDF-1.7".to_vec(), Some("application/pdf"));
        assert!(doc.is_ok());
    }

    #[test]
    fn test_accepts_octet_stream_with_pdf_name() {
        let doc = LeaseDocument::new(
            "Lease.PDF",
            b"%PDF-1.7".to_vec(),
            Some("application/octet-stream"),
        )
        .unwrap();
        assert_eq!(doc.media_type, PDF_MEDIA_TYPE);
    }

    #[test]
    fn test_rejects_word_document() {
        let err = LeaseDocument::new(
            "lease.docx",
            vec![1, 2, 3],
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        )
        .unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_rejects_octet_stream_without_pdf_name() {
        let err = LeaseDocument::new("lease.txt", vec![1], None).unwrap_err();
        assert_eq!(err, DocumentError::UnsupportedMediaType("lease.txt".into()));
    }

    #[test]
    fn test_rejects_empty_upload() {
        let err = LeaseDocument::new("lease.pdf", vec![], Some("application/pdf")).unwrap_err();
        assert_eq!(err, DocumentError::Empty);
    }

    #[test]
    fn test_debug_hides_content() {
        let doc = LeaseDocument::new("a.pdf", b"secret".to_vec(), Some("application/pdf")).unwrap();
        let shown = format!("{:?}", doc);
        assert!(!shown.contains("secret"));
        assert!(shown.contains("bytes: 6"));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(ReviewerRole::parse("Tenant"), Some(ReviewerRole::Tenant));
        assert_eq!(ReviewerRole::parse(" landlord "), Some(ReviewerRole::Landlord));
        assert_eq!(
            ReviewerRole::parse("property_manager"),
            Some(ReviewerRole::PropertyManager)
        );
        assert_eq!(
            ReviewerRole::parse("Property Manager"),
            Some(ReviewerRole::PropertyManager)
        );
        assert_eq!(ReviewerRole::parse("broker"), None);
    }

    #[test]
    fn test_severity_order_is_report_order() {
        let mut tiers = vec![Severity::Compliant, Severity::Critical, Severity::Warning];
        tiers.sort();
        assert_eq!(tiers, Severity::ALL.to_vec());
    }

    #[test]
    fn test_result_counts() {
        let finding = |severity, text: &str| Finding {
            severity,
            description: text.to_string(),
            line: text.to_string(),
        };
        let result = AnalysisResult {
            findings: vec![
                finding(Some(Severity::Critical), "a"),
                finding(Some(Severity::Compliant), "b"),
                finding(None, "c"),
                finding(Some(Severity::Critical), "d"),
            ],
            raw: String::new(),
        };
        assert_eq!(result.count(Severity::Critical), 2);
        assert_eq!(result.count(Severity::Warning), 0);
        assert_eq!(result.unclassified().count(), 1);
        assert_eq!(result.lines(), vec!["a", "b", "c", "d"]);
    }
}
