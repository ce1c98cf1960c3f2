//! Canned demo report shown to visitors before they upload a lease

use crate::jurisdiction::Jurisdiction;
use crate::normalize::normalize;
use shared_types::AnalysisResult;

pub const SAMPLE_JURISDICTION: Jurisdiction = Jurisdiction::NewJersey;

const SAMPLE_COMPLETION: &str = "\
- ⚠️ Warning: Late fee amount and grace period are not stated; New Jersey requires a 5 business day grace period for senior citizen tenants.
- ⚠️ Warning: Landlord may enter \"at any time\"; reasonable advance notice for non-emergency entry should be specified.
- ⚠️ Warning: Tenant is made responsible for \"all repairs\", which may shift the landlord's habitability obligations.
- ✅ Compliant: Security deposit of one month's rent is within the 1.5 month limit.
- ✅ Compliant: Lead-based paint disclosure is attached for the pre-1978 building.
- ✅ Compliant: Termination requires written notice consistent with the Anti-Eviction Act.
";

/// The demo report. Built through the same normalizer as live results so
/// it renders identically.
pub fn sample_report() -> AnalysisResult {
    normalize(SAMPLE_COMPLETION)
}
