//! Request pipeline for a single lease analysis
//!
//! Validate, check quota, extract, build the prompt, call the provider,
//! record usage, normalize, render. Each step runs only if the previous one
//! succeeded; the uploaded bytes never leave this function.

use base64::{engine::general_purpose::STANDARD, Engine};
use compliance_engine::{
    build_prompt, normalize, render_markdown, render_pdf, render_text, rules_for,
    AnalysisRequest, Jurisdiction, ReportContext,
};
use serde::{Deserialize, Serialize};
use shared_types::{AnalysisResult, Finding, LeaseDocument, PropertyMetadata, ReviewerRole, Severity};
use tracing::{debug, info, warn};
use usage_guard::normalize_email;

use crate::error::ServerError;
use crate::state::AppState;

/// Raw multipart fields, as submitted
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub email: Option<String>,
    pub jurisdiction: Option<String>,
    pub role: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: Option<Vec<u8>>,
    pub address: Option<String>,
    pub unit: Option<String>,
    pub landlord_name: Option<String>,
}

impl AnalyzeForm {
    fn property(&self) -> Option<PropertyMetadata> {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let property = PropertyMetadata {
            address: clean(&self.address),
            unit: clean(&self.unit),
            landlord_name: clean(&self.landlord_name),
        };
        (!property.is_empty()).then_some(property)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub compliant: usize,
    pub unclassified: usize,
}

impl From<&AnalysisResult> for SeverityCounts {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            critical: result.count(Severity::Critical),
            warning: result.count(Severity::Warning),
            compliant: result.count(Severity::Compliant),
            unclassified: result.unclassified().count(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub jurisdiction: Jurisdiction,
    pub role: ReviewerRole,
    pub markdown: String,
    pub findings: Vec<Finding>,
    pub counts: SeverityCounts,
    /// Base64-encoded plain-text report
    pub text_export: String,
    /// Base64-encoded PDF report
    pub pdf_export: String,
    pub page_count: usize,
    /// Non-fatal problems the user should know about
    pub warnings: Vec<String>,
}

pub async fn analyze(state: &AppState, form: AnalyzeForm) -> Result<AnalyzeResponse, ServerError> {
    let email = form
        .email
        .as_deref()
        .and_then(normalize_email)
        .ok_or(ServerError::InvalidEmail)?;

    let jurisdiction = form
        .jurisdiction
        .as_deref()
        .and_then(Jurisdiction::parse)
        .ok_or_else(|| ServerError::InvalidRequest("Unknown or missing jurisdiction".to_string()))?;
    let role = form
        .role
        .as_deref()
        .and_then(ReviewerRole::parse)
        .ok_or_else(|| ServerError::InvalidRequest("Unknown or missing role".to_string()))?;
    let property = form.property();

    let content = form
        .content
        .ok_or_else(|| ServerError::InvalidRequest("A lease file is required".to_string()))?;
    let document = LeaseDocument::new(
        form.filename.unwrap_or_default(),
        content,
        form.content_type.as_deref(),
    )?;

    info!(
        jurisdiction = jurisdiction.code(),
        role = %role,
        bytes = document.len(),
        "analysis requested"
    );

    if state.guard.has_used(&email).await? {
        info!("free analysis already used");
        return Err(ServerError::QuotaExhausted);
    }

    let text = tokio::task::spawn_blocking(move || shared_pdf::extract_text(&document))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;
    debug!(chars = text.len(), "lease text extracted");

    let mut warnings = Vec::new();
    if text.trim().is_empty() {
        warnings.push(
            "No text could be extracted from this lease (it may be a scanned image). \
             Results may be incomplete."
                .to_string(),
        );
    }

    let rules = rules_for(jurisdiction)?;
    let prompt = build_prompt(&AnalysisRequest {
        jurisdiction,
        role,
        rules,
        text: &text,
    });

    let raw = state.provider.complete(&prompt).await.map_err(|e| {
        warn!(provider = state.provider.name(), error = %e, "analysis call failed");
        ServerError::from(e)
    })?;

    // Only a completed analysis consumes the free quota
    if let Err(e) = state.guard.record_use(&email).await {
        warn!(error = %e, "continuing without a usage record");
        warnings.push("Your free analysis could not be recorded.".to_string());
    }

    let result = normalize(&raw);
    let ctx = ReportContext {
        jurisdiction,
        role,
        requester: &email,
        property: property.as_ref(),
    };
    let markdown = render_markdown(&result, &ctx);
    let text_export = render_text(&result, &ctx)?;
    let pdf = render_pdf(&result, &ctx)?;

    let counts = SeverityCounts::from(&result);
    info!(
        findings = result.findings.len(),
        critical = counts.critical,
        pages = pdf.page_count,
        "analysis complete"
    );

    Ok(AnalyzeResponse {
        success: true,
        jurisdiction,
        role,
        markdown,
        counts,
        text_export: STANDARD.encode(text_export),
        pdf_export: STANDARD.encode(&pdf.bytes),
        page_count: pdf.page_count,
        warnings,
        findings: result.findings,
    })
}
