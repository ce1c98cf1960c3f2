//! Plain-text download

use super::{ReportContext, DISCLAIMER, REPORT_COLUMNS};
use crate::catalog::resources_for;
use crate::error::CatalogError;
use shared_types::AnalysisResult;

/// Disclaimer, a rule, the title block, the normalized finding lines,
/// then the jurisdiction's resources.
pub fn render_text(result: &AnalysisResult, ctx: &ReportContext<'_>) -> Result<String, CatalogError> {
    let resources = resources_for(ctx.jurisdiction)?;

    let mut out = String::new();
    out.push_str(DISCLAIMER);
    out.push('\n');
    out.push_str(&"-".repeat(REPORT_COLUMNS));
    out.push_str("\n\n");

    out.push_str(&ctx.title());
    out.push('\n');
    for line in ctx.property_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');

    for line in result.lines() {
        out.push_str(line);
        out.push('\n');
    }

    out.push_str("\nResources:\n");
    for resource in resources {
        out.push_str(&format!("- {}: {}\n", resource.title, resource.url));
    }

    Ok(out)
}
