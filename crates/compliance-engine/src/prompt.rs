//! Prompt construction for lease analysis
//!
//! `build_prompt` is a pure function of its request: no clock, no
//! randomness, no truncation of the lease text.

use crate::catalog::RuleSet;
use crate::jurisdiction::Jurisdiction;
use shared_types::{ReviewerRole, Severity};

/// Everything the prompt is built from, and nothing else
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub jurisdiction: Jurisdiction,
    pub role: ReviewerRole,
    pub rules: &'a RuleSet,
    pub text: &'a str,
}

/// Marker text the model is told to start each finding with
pub fn marker(severity: Severity) -> String {
    format!("{} {}:", severity.glyph(), severity.label())
}

pub fn build_prompt(request: &AnalysisRequest<'_>) -> String {
    let AnalysisRequest {
        jurisdiction,
        role,
        rules,
        text,
    } = *request;

    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are a {state} landlord-tenant law compliance reviewer. \
         Review the residential lease below on behalf of a {role}, \
         {lens}. Apply {state} law ({citation}) and the checklist that follows.\n\n",
        state = jurisdiction.name(),
        role = role.name().to_lowercase(),
        lens = role.legal_lens(),
        citation = jurisdiction.statute_citation(),
    ));

    prompt.push_str(&format!("{} compliance checklist:\n", jurisdiction.name()));
    prompt.push_str(&rules.checklist());
    prompt.push_str("\n\nSeverity guide:\n");
    prompt.push_str(&rules.checklist_schema().join("\n"));

    prompt.push_str("\n\nOutput format (follow exactly):\n");
    prompt.push_str("- One finding per line, each line starting with \"- \" followed by exactly one of:\n");
    for severity in Severity::ALL {
        prompt.push_str(&format!("  {}\n", marker(severity)));
    }
    prompt.push_str(
        "- Use the Critical marker for clauses that violate the law, the Warning marker for \
         missing or unclear terms, and the Compliant marker for clauses that satisfy a rule.\n\
         - Do not write an introduction or preamble.\n\
         - Do not repeat a finding.\n\
         - Do not add a closing summary, advice, or commentary after the last finding.\n",
    );

    prompt.push_str("\nLease text:\n");
    prompt.push_str(text);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::rules_for;
    use proptest::prelude::*;

    fn request(text: &str) -> AnalysisRequest<'_> {
        AnalysisRequest {
            jurisdiction: Jurisdiction::NewJersey,
            role: ReviewerRole::Tenant,
            rules: rules_for(Jurisdiction::NewJersey).unwrap(),
            text,
        }
    }

    #[test]
    fn test_prompt_names_jurisdiction_and_role() {
        let prompt = build_prompt(&request("Rent: $1500/mo"));
        assert!(prompt.starts_with("You are a New Jersey landlord-tenant law"));
        assert!(prompt.contains("on behalf of a tenant"));
        assert!(prompt.contains("N.J.S.A. 46:8 et seq."));
    }

    #[test]
    fn test_prompt_contains_full_rule_set() {
        let rules = rules_for(Jurisdiction::NewJersey).unwrap();
        let prompt = build_prompt(&request(""));
        for rule in &rules.rules {
            assert!(prompt.contains(rule.statement), "missing rule: {}", rule.topic);
        }
    }

    #[test]
    fn test_prompt_lists_all_three_markers() {
        let prompt = build_prompt(&request(""));
        assert!(prompt.contains("🔴 Critical:"));
        assert!(prompt.contains("⚠️ Warning:"));
        assert!(prompt.contains("✅ Compliant:"));
        assert!(prompt.contains("Do not repeat a finding"));
    }

    #[test]
    fn test_lease_text_appended_verbatim() {
        let lease = "  Tenant shall pay   $1,500 (one thousand five hundred)\n\n\tper month.  ";
        let prompt = build_prompt(&request(lease));
        assert!(prompt.ends_with(&format!("Lease text:\n{}", lease)));
    }

    #[test]
    fn test_role_changes_lens_not_rules() {
        let rules = rules_for(Jurisdiction::Pennsylvania).unwrap();
        let tenant = build_prompt(&AnalysisRequest {
            jurisdiction: Jurisdiction::Pennsylvania,
            role: ReviewerRole::Tenant,
            rules,
            text: "x",
        });
        let landlord = build_prompt(&AnalysisRequest {
            jurisdiction: Jurisdiction::Pennsylvania,
            role: ReviewerRole::Landlord,
            rules,
            text: "x",
        });
        assert_ne!(tenant, landlord);
        assert!(landlord.contains(&rules.checklist()));
        assert!(tenant.contains(&rules.checklist()));
    }

    proptest! {
        /// Identical inputs always produce byte-identical prompts
        #[test]
        fn prompt_is_deterministic(text in any::<String>(), tenant in any::<bool>()) {
            let role = if tenant { ReviewerRole::Tenant } else { ReviewerRole::PropertyManager };
            let rules = rules_for(Jurisdiction::Pennsylvania).unwrap();
            let req = AnalysisRequest {
                jurisdiction: Jurisdiction::Pennsylvania,
                role,
                rules,
                text: &text,
            };
            prop_assert_eq!(build_prompt(&req), build_prompt(&req));
            prop_assert!(build_prompt(&req).ends_with(text.as_str()));
        }
    }
}
