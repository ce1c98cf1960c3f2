pub mod types;
pub mod usage;

pub use types::{
    AnalysisResult, DocumentError, Finding, LeaseDocument, PropertyMetadata, ReviewerRole,
    Severity,
};
pub use usage::{UsageAction, UsageRecord};
