//! API handlers for the lease analyzer server
//!
//! Provides REST endpoints for:
//! - Lease analysis (multipart upload)
//! - The sample report
//! - Jurisdiction and role listing

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use compliance_engine::{
    all_resources, render_markdown, sample_report, Jurisdiction, ReportContext, Resource,
    SAMPLE_JURISDICTION,
};
use serde::{Deserialize, Serialize};
use shared_types::{Finding, ReviewerRole};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::ServerError;
use crate::pipeline::{self, AnalyzeForm, AnalyzeResponse};
use crate::state::AppState;

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Routes and per-request middleware. Rate limiting and CORS are added by
/// `main`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/jurisdictions", get(handle_list_jurisdictions))
        .route("/api/sample", get(handle_sample))
        .route("/api/analyze", post(handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "lease-analyzer-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize, Deserialize)]
pub struct JurisdictionInfo {
    pub code: String,
    pub name: String,
    pub statute: String,
    pub resources: Vec<ResourceInfo>,
}

#[derive(Serialize, Deserialize)]
pub struct ResourceInfo {
    pub title: String,
    pub url: String,
}

impl From<&Resource> for ResourceInfo {
    fn from(r: &Resource) -> Self {
        Self {
            title: r.title.to_string(),
            url: r.url.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct RoleInfo {
    pub id: ReviewerRole,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct JurisdictionListResponse {
    pub success: bool,
    pub jurisdictions: Vec<JurisdictionInfo>,
    pub roles: Vec<RoleInfo>,
}

/// Handler: GET /api/jurisdictions
pub async fn handle_list_jurisdictions() -> Json<JurisdictionListResponse> {
    let sidebar = all_resources();
    let jurisdictions = Jurisdiction::ALL
        .into_iter()
        .map(|j| JurisdictionInfo {
            code: j.code().to_string(),
            name: j.name().to_string(),
            statute: j.statute_citation().to_string(),
            resources: sidebar
                .iter()
                .filter(|(owner, _)| *owner == j)
                .map(|(_, resource)| ResourceInfo::from(*resource))
                .collect(),
        })
        .collect();

    let roles = ReviewerRole::all()
        .into_iter()
        .map(|role| RoleInfo {
            id: role,
            name: role.name().to_string(),
        })
        .collect();

    Json(JurisdictionListResponse {
        success: true,
        jurisdictions,
        roles,
    })
}

#[derive(Serialize, Deserialize)]
pub struct SampleResponse {
    pub success: bool,
    pub jurisdiction: Jurisdiction,
    pub markdown: String,
    pub findings: Vec<Finding>,
}

/// Handler: GET /api/sample
pub async fn handle_sample(State(state): State<AppState>) -> Json<SampleResponse> {
    state.guard.log_sample_view().await;

    let report = sample_report();
    let ctx = ReportContext {
        jurisdiction: SAMPLE_JURISDICTION,
        role: ReviewerRole::Tenant,
        requester: "Sample Lease",
        property: None,
    };
    Json(SampleResponse {
        success: true,
        jurisdiction: SAMPLE_JURISDICTION,
        markdown: render_markdown(&report, &ctx),
        findings: report.findings,
    })
}

/// Handler: POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                form.filename = field.file_name().map(str::to_string);
                form.content_type = field.content_type().map(str::to_string);
                form.content = Some(field.bytes().await?.to_vec());
            }
            "email" => form.email = Some(field.text().await?),
            "jurisdiction" => form.jurisdiction = Some(field.text().await?),
            "role" => form.role = Some(field.text().await?),
            "address" => form.address = Some(field.text().await?),
            "unit" => form.unit = Some(field.text().await?),
            "landlord_name" => form.landlord_name = Some(field.text().await?),
            _ => debug!(field = %name, "ignoring unknown form field"),
        }
    }

    let response = pipeline::analyze(&state, form).await?;
    Ok(Json(response))
}
