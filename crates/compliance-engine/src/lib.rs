//! Lease compliance engine
//!
//! Jurisdiction rule catalog, prompt construction, normalization of model
//! output, and report rendering. Everything here is synchronous and pure;
//! network access lives in `analysis-client` and `usage-guard`.

pub mod catalog;
pub mod error;
pub mod jurisdiction;
pub mod normalize;
pub mod prompt;
pub mod report;

pub use catalog::{all_resources, resources_for, rules_for, Catalog, Resource, Rule, RuleSet};
pub use error::{CatalogError, RenderError};
pub use jurisdiction::Jurisdiction;
pub use normalize::{normalize, parse_marker, Marker};
pub use prompt::{build_prompt, marker, AnalysisRequest};
pub use report::{
    render_markdown, render_pdf, render_text, sample_report, ReportContext, DISCLAIMER,
    PRIVACY_NOTICE, SAMPLE_JURISDICTION,
};
