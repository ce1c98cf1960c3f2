//! On-screen markdown view

use super::ReportContext;
use shared_types::{AnalysisResult, Finding, Severity};

const OTHER_NOTES: &str = "#### 📝 Other Notes";

/// Render findings grouped by tier, Critical first. Empty tiers are
/// omitted. Unmarked findings follow under "Other Notes".
pub fn render_markdown(result: &AnalysisResult, ctx: &ReportContext<'_>) -> String {
    let mut out = format!(
        "### 🧾 {} Lease Compliance Report\n",
        ctx.jurisdiction.name()
    );

    if result.is_empty() {
        out.push_str("\n_No findings were returned for this lease._\n");
        return out;
    }

    for severity in Severity::ALL {
        let findings: Vec<&Finding> = result.with_severity(severity).collect();
        if findings.is_empty() {
            continue;
        }
        out.push_str(&format!("\n#### {} {}\n", severity.glyph(), severity.heading()));
        for finding in findings {
            out.push_str(&format!("- {} {}\n", severity.glyph(), finding.description));
        }
    }

    let notes: Vec<&Finding> = result.unclassified().collect();
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(OTHER_NOTES);
        out.push('\n');
        for finding in notes {
            out.push_str(&format!("- {}\n", finding.description));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jurisdiction::Jurisdiction;
    use crate::normalize::normalize;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::ReviewerRole;

    fn ctx() -> ReportContext<'static> {
        ReportContext {
            jurisdiction: Jurisdiction::NewJersey,
            role: ReviewerRole::Tenant,
            requester: "renter@example.com",
            property: None,
        }
    }

    #[test]
    fn test_groups_by_tier_in_order() {
        let result = normalize(
            "- ✅ Compliant: Deposit within cap\n\
             - 🔴 Critical: Waives habitability\n\
             - ⚠️ Warning: Late fee unclear",
        );
        let md = render_markdown(&result, &ctx());
        assert_eq!(
            md,
            "### 🧾 New Jersey Lease Compliance Report\n\
             \n#### 🔴 Critical Issues\n\
             - 🔴 Waives habitability\n\
             \n#### ⚠️ Potential Issues\n\
             - ⚠️ Late fee unclear\n\
             \n#### ✅ Compliant Clauses\n\
             - ✅ Deposit within cap\n"
        );
    }

    #[test]
    fn test_empty_tiers_omitted() {
        let result = normalize("- ⚠️ Warning: Entry notice missing");
        let md = render_markdown(&result, &ctx());
        assert!(!md.contains("Critical Issues"));
        assert!(!md.contains("Compliant Clauses"));
        assert!(md.contains("#### ⚠️ Potential Issues"));
    }

    #[test]
    fn test_unclassified_under_other_notes() {
        let result = normalize("Overall the lease is reasonable.\n- 🔴 Critical: Confession of judgment");
        let md = render_markdown(&result, &ctx());
        let critical = md.find("Critical Issues").unwrap();
        let notes = md.find("Other Notes").unwrap();
        assert!(critical < notes);
        assert!(md.ends_with("- Overall the lease is reasonable.\n"));
    }

    #[test]
    fn test_no_findings() {
        let md = render_markdown(&normalize(""), &ctx());
        assert!(md.contains("No findings"));
    }

    fn finding_line() -> impl Strategy<Value = String> {
        let prefix = prop_oneof![
            Just("- 🔴 Critical: "),
            Just("- ⚠️ Warning: "),
            Just("- ✅ Compliant: "),
            Just(""),
        ];
        (prefix, "[A-Za-z][A-Za-z ]{0,15}").prop_map(|(p, body)| format!("{}{}", p, body))
    }

    proptest! {
        /// Each finding renders as exactly one bullet line
        #[test]
        fn finding_count_preserved(lines in proptest::collection::vec(finding_line(), 0..25)) {
            let result = normalize(&lines.join("\n"));
            let md = render_markdown(&result, &ctx());
            let bullets = md.lines().filter(|l| l.starts_with("- ")).count();
            prop_assert_eq!(bullets, result.findings.len());
        }
    }
}
