//! Completion normalization
//!
//! Turns the model's raw bullet list into ordered, de-duplicated findings.
//! Lines that carry no recognizable severity marker are kept as
//! unclassified findings rather than dropped, so a model that drifts from
//! the requested format still yields a report. Finding content is taken
//! as-is; nothing here judges whether the model is right.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{AnalysisResult, Finding, Severity};
use std::collections::HashSet;
use tracing::{debug, warn};

lazy_static! {
    /// Leading list bullet: "-", "*", "•", "1.", "2)"
    static ref BULLET: Regex = Regex::new(r"^(?:[-*•]|\d{1,3}[.)])\s+").unwrap();

    /// Tier word that may follow a glyph, e.g. "Critical:" or "**Warning** -"
    static ref TIER_LABEL: Regex = Regex::new(
        r"(?i)^\**\s*(?:non-compliant|critical|warning|potential issue|compliant)\s*\**\s*(?::|-|–)\s*"
    )
    .unwrap();

    /// Tier word used alone as a marker: "Critical:", "[Warning]", "Compliant -"
    static ref TEXT_MARKER: Regex = Regex::new(
        r"(?i)^\[?\s*\**\s*(non-compliant|violation|critical|warning|potential issue|compliant)\s*\**\s*\]?\s*(?::|-|–|\])\s*"
    )
    .unwrap();
}

/// Glyph prefixes in match order. Variation selectors are listed before
/// the bare glyph so the longer form is stripped whole.
const GLYPHS: &[(&str, Severity)] = &[
    ("🔴", Severity::Critical),
    ("❌", Severity::Critical),
    ("⛔", Severity::Critical),
    ("🚫", Severity::Critical),
    ("⚠️", Severity::Warning),
    ("⚠", Severity::Warning),
    ("🟡", Severity::Warning),
    ("🟠", Severity::Warning),
    ("✅", Severity::Compliant),
    ("🟢", Severity::Compliant),
    ("✔️", Severity::Compliant),
    ("✔", Severity::Compliant),
];

/// Outcome of reading one line's marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Tagged { severity: Severity, rest: String },
    Unclassified,
}

/// Read the severity marker at the start of a trimmed line
pub fn parse_marker(line: &str) -> Marker {
    let body = BULLET.replace(line, "");
    let body = body.trim_start();

    for (glyph, severity) in GLYPHS {
        if let Some(rest) = body.strip_prefix(glyph) {
            let rest = rest.trim_start();
            let rest = TIER_LABEL.replace(rest, "");
            return Marker::Tagged {
                severity: *severity,
                rest: rest.trim().to_string(),
            };
        }
    }

    if let Some(caps) = TEXT_MARKER.captures(body) {
        let severity = match caps[1].to_lowercase().as_str() {
            "non-compliant" | "violation" | "critical" => Severity::Critical,
            "warning" | "potential issue" => Severity::Warning,
            _ => Severity::Compliant,
        };
        let matched = caps.get(0).map(|m| m.end()).unwrap_or(0);
        return Marker::Tagged {
            severity,
            rest: body[matched..].trim().to_string(),
        };
    }

    Marker::Unclassified
}

/// Normalize a raw completion into an `AnalysisResult`.
///
/// Lines are trimmed, blanks dropped, and exact repeats (case-sensitive)
/// of an earlier line discarded. A marked line whose finding text repeats
/// an earlier marked finding's is discarded as well; unmarked lines never
/// shadow a marked one. First occurrence wins.
pub fn normalize(raw: &str) -> AnalysisResult {
    let mut seen_lines: HashSet<&str> = HashSet::new();
    let mut seen_descriptions: HashSet<String> = HashSet::new();
    let mut findings = Vec::new();

    for line in raw.lines().map(str::trim) {
        if line.is_empty() || !seen_lines.insert(line) {
            continue;
        }

        let (severity, description) = match parse_marker(line) {
            Marker::Tagged { severity, rest } if !rest.is_empty() => (Some(severity), rest),
            Marker::Tagged { severity, .. } => (Some(severity), line.to_string()),
            Marker::Unclassified => (None, line.to_string()),
        };

        if severity.is_some() && !seen_descriptions.insert(description.clone()) {
            debug!("dropping repeated finding");
            continue;
        }

        findings.push(Finding {
            severity,
            description,
            line: line.to_string(),
        });
    }

    let unclassified = findings.iter().filter(|f| f.severity.is_none()).count();
    if unclassified > 0 {
        warn!(
            unclassified,
            total = findings.len(),
            "completion lines without a severity marker"
        );
    }

    AnalysisResult {
        findings,
        raw: raw.to_string(),
    }
}
