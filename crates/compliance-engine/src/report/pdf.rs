//! Paginated PDF download
//!
//! Layout, top to bottom: title block, italic disclaimer, a rule, one
//! highlighted section per non-empty tier, resources in bold, and the
//! privacy notice. Every line is 14pt; page breaks are handled by
//! `PageWriter`.

use super::{ReportContext, DISCLAIMER, PRIVACY_NOTICE, REPORT_COLUMNS};
use crate::catalog::resources_for;
use crate::error::RenderError;
use shared_pdf::{wrap, FontFace, PageLayout, PageWriter, RenderedPdf, Rgb};
use shared_types::{AnalysisResult, Finding, Severity};
use tracing::debug;

const LINE_HEIGHT: f32 = 14.0;

const OTHER_NOTES_FILL: Rgb = Rgb(0.9, 0.9, 0.9);

fn tier_fill(severity: Severity) -> Rgb {
    match severity {
        Severity::Critical => Rgb(1.0, 0.8, 0.8),
        Severity::Warning => Rgb(1.0, 0.92, 0.7),
        Severity::Compliant => Rgb(0.8, 1.0, 0.8),
    }
}

pub fn render_pdf(result: &AnalysisResult, ctx: &ReportContext<'_>) -> Result<RenderedPdf, RenderError> {
    let resources = resources_for(ctx.jurisdiction)?;
    let mut writer = PageWriter::new(PageLayout::letter());

    writer.set_font(FontFace::Regular, 12.0);
    writer.text_line(&ctx.title(), LINE_HEIGHT)?;
    writer.set_font(FontFace::Regular, 10.0);
    for line in ctx.property_lines() {
        writer.text_line(&line, LINE_HEIGHT)?;
    }
    writer.advance(6.0);

    writer.set_font(FontFace::Oblique, 8.0);
    for line in wrap(DISCLAIMER, REPORT_COLUMNS) {
        writer.text_line(&line, LINE_HEIGHT)?;
    }
    writer.advance(6.0);
    writer.set_font(FontFace::Regular, 10.0);
    writer.text_line(&"-".repeat(REPORT_COLUMNS), LINE_HEIGHT)?;

    for severity in Severity::ALL {
        let findings: Vec<&Finding> = result.with_severity(severity).collect();
        section(&mut writer, severity.heading(), &findings, tier_fill(severity))?;
    }
    let notes: Vec<&Finding> = result.unclassified().collect();
    section(&mut writer, "Other Notes", &notes, OTHER_NOTES_FILL)?;

    writer.advance(20.0);
    writer.set_font(FontFace::Bold, 10.0);
    writer.text_line("Resources:", LINE_HEIGHT)?;
    for resource in resources {
        for line in wrap(&format!("- {}: {}", resource.title, resource.url), REPORT_COLUMNS) {
            writer.text_line(&line, LINE_HEIGHT)?;
        }
    }

    writer.advance(10.0);
    writer.set_font(FontFace::Oblique, 8.0);
    for line in wrap(PRIVACY_NOTICE, REPORT_COLUMNS) {
        writer.text_line(&line, LINE_HEIGHT)?;
    }

    let rendered = writer.finish()?;
    debug!(
        pages = rendered.page_count,
        bytes = rendered.bytes.len(),
        "rendered PDF report"
    );
    Ok(rendered)
}

fn section(
    writer: &mut PageWriter,
    heading: &str,
    findings: &[&Finding],
    fill: Rgb,
) -> Result<(), RenderError> {
    if findings.is_empty() {
        return Ok(());
    }

    writer.advance(6.0);
    writer.set_font(FontFace::Bold, 11.0);
    writer.text_line(heading, LINE_HEIGHT)?;
    writer.set_font(FontFace::Regular, 10.0);
    for finding in findings {
        for line in wrap(&finding.description, REPORT_COLUMNS) {
            writer.highlighted_line(&line, fill, LINE_HEIGHT)?;
        }
    }
    Ok(())
}
