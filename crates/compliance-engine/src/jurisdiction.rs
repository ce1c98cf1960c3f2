//! Jurisdictions supported by the lease analyzer
//!
//! The set is closed: every variant must have a rule set and a resource
//! list in the catalog (see `Catalog::validate`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "NJ")]
    NewJersey,
    #[serde(rename = "PA")]
    Pennsylvania,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 2] = [Jurisdiction::NewJersey, Jurisdiction::Pennsylvania];

    /// Get the full state name
    pub fn name(&self) -> &'static str {
        match self {
            Jurisdiction::NewJersey => "New Jersey",
            Jurisdiction::Pennsylvania => "Pennsylvania",
        }
    }

    /// Two-letter postal code
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::NewJersey => "NJ",
            Jurisdiction::Pennsylvania => "PA",
        }
    }

    /// Primary statute citation for residential landlord-tenant law
    pub fn statute_citation(&self) -> &'static str {
        match self {
            Jurisdiction::NewJersey => "N.J.S.A. 46:8 et seq.",
            Jurisdiction::Pennsylvania => "68 P.S. § 250.501 et seq.",
        }
    }

    /// Parse from state code or name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('_', " ").as_str() {
            "NJ" | "NEW JERSEY" => Some(Jurisdiction::NewJersey),
            "PA" | "PENNSYLVANIA" => Some(Jurisdiction::Pennsylvania),
            _ => None,
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
