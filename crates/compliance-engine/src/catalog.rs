//! Static rule catalog
//!
//! Plain-language compliance checklists and tenant resource links for each
//! jurisdiction. Built once at first use and never modified.

use crate::error::CatalogError;
use crate::jurisdiction::Jurisdiction;
use lazy_static::lazy_static;
use serde::Serialize;
use shared_types::Severity;
use std::collections::HashMap;

/// One checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Short clause name, e.g. "Security Deposit"
    pub topic: &'static str,
    /// The requirement in plain language
    pub statement: &'static str,
    pub citation: &'static str,
    /// Tier to report when the lease violates the rule
    pub default_severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    pub jurisdiction: Jurisdiction,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// The checklist as prompt-ready lines: `- statement (citation)`
    pub fn checklist(&self) -> String {
        self.rules
            .iter()
            .map(|r| format!("- {} ({})", r.statement, r.citation))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Severity-tagged schema: `[Critical] Topic: statement`
    pub fn checklist_schema(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| format!("[{}] {}: {}", r.default_severity.label(), r.topic, r.statement))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: &'static str,
    pub url: &'static str,
}

lazy_static! {
    static ref RULE_SETS: HashMap<Jurisdiction, RuleSet> = {
        let mut sets = HashMap::new();
        sets.insert(
            Jurisdiction::NewJersey,
            RuleSet {
                jurisdiction: Jurisdiction::NewJersey,
                rules: new_jersey_rules(),
            },
        );
        sets.insert(
            Jurisdiction::Pennsylvania,
            RuleSet {
                jurisdiction: Jurisdiction::Pennsylvania,
                rules: pennsylvania_rules(),
            },
        );
        sets
    };

    static ref RESOURCES: HashMap<Jurisdiction, Vec<Resource>> = {
        let mut resources = HashMap::new();
        resources.insert(
            Jurisdiction::NewJersey,
            vec![
                Resource {
                    title: "NJ Truth-in-Renting Guide",
                    url: "https://www.nj.gov/dca/divisions/codes/publications/pdf_lti/truth_in_renting.pdf",
                },
                Resource {
                    title: "NJ Landlord-Tenant Info",
                    url: "https://www.nj.gov/dca/divisions/codes/offices/landlord_tenant_information.html",
                },
            ],
        );
        resources.insert(
            Jurisdiction::Pennsylvania,
            vec![
                Resource {
                    title: "PA Tenant Guide",
                    url: "https://www.attorneygeneral.gov/wp-content/uploads/2018/01/Tenant_Rights.pdf",
                },
                Resource {
                    title: "PA Legal Aid",
                    url: "https://www.palawhelp.org/issues/housing/landlord-and-tenant-law",
                },
            ],
        );
        resources
    };
}

/// Rule set for a jurisdiction
pub fn rules_for(jurisdiction: Jurisdiction) -> Result<&'static RuleSet, CatalogError> {
    RULE_SETS
        .get(&jurisdiction)
        .filter(|set| !set.is_empty())
        .ok_or(CatalogError::MissingRuleSet(jurisdiction))
}

/// Tenant resource links for a jurisdiction
pub fn resources_for(jurisdiction: Jurisdiction) -> Result<&'static [Resource], CatalogError> {
    RESOURCES
        .get(&jurisdiction)
        .filter(|list| !list.is_empty())
        .map(Vec::as_slice)
        .ok_or(CatalogError::MissingResources(jurisdiction))
}

/// Every jurisdiction's resources, in jurisdiction order
pub fn all_resources() -> Vec<(Jurisdiction, &'static Resource)> {
    Jurisdiction::ALL
        .iter()
        .filter_map(|j| RESOURCES.get(j).map(|list| (*j, list)))
        .flat_map(|(j, list)| list.iter().map(move |r| (j, r)))
        .collect()
}

/// Start-up check over the static tables
pub struct Catalog;

impl Catalog {
    /// Fails on the first jurisdiction missing a rule set or resource list
    pub fn validate() -> Result<(), CatalogError> {
        for jurisdiction in Jurisdiction::ALL {
            rules_for(jurisdiction)?;
            resources_for(jurisdiction)?;
        }
        Ok(())
    }
}

// ============================================================================
// New Jersey
// ============================================================================

fn new_jersey_rules() -> Vec<Rule> {
    vec![
        Rule {
            topic: "Security Deposit",
            statement: "Security deposit may not exceed 1.5 months' rent",
            citation: "N.J.S.A. 46:8-21.2",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Deposit Account",
            statement: "Deposit must be held in an interest-bearing account and the tenant told \
                        the bank name, address, and interest rate within 30 days",
            citation: "N.J.S.A. 46:8-19",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Deposit Return",
            statement: "Deposit, with interest and an itemized list of deductions, must be \
                        returned within 30 days after the tenancy ends",
            citation: "N.J.S.A. 46:8-21.1",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Late Fee",
            statement: "Late fees must be stated in the lease; tenants who are senior citizens \
                        or receive Social Security get a 5 business day grace period",
            citation: "N.J.S.A. 2A:42-6.1",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Truth in Renting",
            statement: "Landlord must provide the DCA Truth in Renting statement to the tenant",
            citation: "N.J.S.A. 46:8-45",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Entry Notice",
            statement: "Landlord must give at least one day's notice before entering for \
                        inspection or repairs, except in emergencies",
            citation: "N.J.A.C. 5:10-5.1",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Habitability",
            statement: "Any waiver of the implied warranty of habitability or of required \
                        repairs is void",
            citation: "N.J.S.A. 46:8-48",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Eviction Protections",
            statement: "Tenants may only be evicted for a good cause listed in the \
                        Anti-Eviction Act; waivers of these protections are void",
            citation: "N.J.S.A. 2A:18-61.1",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Confession of Judgment",
            statement: "Confession of judgment clauses are prohibited in residential leases",
            citation: "N.J.S.A. 2A:16-9.3",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Window Guards",
            statement: "Lease must notify tenants of the right to window guards in units where \
                        children 10 or younger live",
            citation: "N.J.A.C. 5:10-27.1",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Lead Paint Disclosure",
            statement: "Housing built before 1978 requires a lead-based paint disclosure and \
                        the EPA pamphlet",
            citation: "42 U.S.C. 4852d",
            default_severity: Severity::Critical,
        },
    ]
}

// ============================================================================
// Pennsylvania
// ============================================================================

fn pennsylvania_rules() -> Vec<Rule> {
    vec![
        Rule {
            topic: "Security Deposit",
            statement: "Security deposit may not exceed 2 months' rent in the first year and \
                        1 month's rent after the first year",
            citation: "68 P.S. § 250.511a",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Deposit Interest",
            statement: "Deposits over $100 held more than 2 years must be placed in an \
                        interest-bearing escrow account and interest paid to the tenant annually",
            citation: "68 P.S. § 250.511b",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Deposit Return",
            statement: "Deposit and a written list of damages must be returned within 30 days \
                        after the tenant moves out and gives a forwarding address",
            citation: "68 P.S. § 250.512",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Late Fee",
            statement: "Late fees must be stated in the lease and be reasonable; no fee may be \
                        charged that the lease does not specify",
            citation: "68 P.S. § 250.501",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Notice to Quit",
            statement: "Notice to quit is 10 days for nonpayment of rent, 15 days for leases of \
                        one year or less, and 30 days for leases over one year, unless the tenant \
                        waived it in writing",
            citation: "68 P.S. § 250.501",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Plain Language",
            statement: "Residential leases must be written in plain, understandable language",
            citation: "73 P.S. § 2205",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Habitability",
            statement: "Any waiver of the implied warranty of habitability is void",
            citation: "68 P.S. § 250.103",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Confession of Judgment",
            statement: "Confession of judgment clauses are prohibited in residential leases",
            citation: "68 P.S. § 250.513",
            default_severity: Severity::Critical,
        },
        Rule {
            topic: "Entry Notice",
            statement: "Lease should state reasonable notice before landlord entry, except in \
                        emergencies",
            citation: "68 P.S. § 250.501",
            default_severity: Severity::Warning,
        },
        Rule {
            topic: "Lead Paint Disclosure",
            statement: "Housing built before 1978 requires a lead-based paint disclosure and \
                        the EPA pamphlet",
            citation: "42 U.S.C. 4852d",
            default_severity: Severity::Critical,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete() {
        assert_eq!(Catalog::validate(), Ok(()));
    }

    #[test]
    fn test_every_jurisdiction_has_rules_and_resources() {
        for jurisdiction in Jurisdiction::ALL {
            let rules = rules_for(jurisdiction).unwrap();
            assert_eq!(rules.jurisdiction, jurisdiction);
            assert!(!rules.is_empty());
            assert!(!resources_for(jurisdiction).unwrap().is_empty());
        }
    }

    #[test]
    fn test_new_jersey_resources() {
        let titles: Vec<_> = resources_for(Jurisdiction::NewJersey)
            .unwrap()
            .iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(
            titles,
            vec!["NJ Truth-in-Renting Guide", "NJ Landlord-Tenant Info"]
        );
    }

    #[test]
    fn test_resources_do_not_cross_jurisdictions() {
        for r in resources_for(Jurisdiction::NewJersey).unwrap() {
            assert!(!r.title.starts_with("PA"));
        }
        for r in resources_for(Jurisdiction::Pennsylvania).unwrap() {
            assert!(!r.title.starts_with("NJ"));
        }
    }

    #[test]
    fn test_all_resources_in_jurisdiction_order() {
        let all = all_resources();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].0, Jurisdiction::NewJersey);
        assert_eq!(all[3].0, Jurisdiction::Pennsylvania);
    }

    #[test]
    fn test_checklist_cites_every_rule() {
        let rules = rules_for(Jurisdiction::Pennsylvania).unwrap();
        let checklist = rules.checklist();
        assert_eq!(checklist.lines().count(), rules.len());
        assert!(checklist.contains("(73 P.S. § 2205)"));
    }

    #[test]
    fn test_checklist_schema_tags_severity() {
        let schema = rules_for(Jurisdiction::NewJersey).unwrap().checklist_schema();
        assert_eq!(
            schema[0],
            "[Critical] Security Deposit: Security deposit may not exceed 1.5 months' rent"
        );
        assert!(schema.iter().any(|line| line.starts_with("[Warning] Late Fee:")));
    }
}
