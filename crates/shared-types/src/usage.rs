//! Usage records kept in the external record store
//!
//! The store is a spreadsheet behind an HTTP API, so every cell comes back
//! as a string and rows written by older deployments may lack the `Action`
//! and `Timestamp` columns entirely. Deserialization is lenient about both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Email column value used when an anonymous visitor opens the sample report
pub const SAMPLE_VIEW_KEY: &str = "sample_demo_click";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAction {
    /// The one free analysis granted per email
    FreeAnalysis,
    /// Someone opened the sample report; never counts against a quota
    SampleView,
}

impl UsageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageAction::FreeAnalysis => "free_analysis",
            UsageAction::SampleView => "sample_view",
        }
    }
}

impl FromStr for UsageAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free_analysis" => Ok(UsageAction::FreeAnalysis),
            "sample_view" => Ok(UsageAction::SampleView),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(rename = "Email")]
    pub email: String,

    #[serde(
        rename = "Action",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<UsageAction>,

    #[serde(
        rename = "Timestamp",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl UsageRecord {
    pub fn free_analysis(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            action: Some(UsageAction::FreeAnalysis),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn sample_view() -> Self {
        Self {
            email: SAMPLE_VIEW_KEY.to_string(),
            action: Some(UsageAction::SampleView),
            timestamp: Some(Utc::now()),
        }
    }

    /// Rows without an action predate the column and were all free analyses.
    pub fn consumes_quota(&self) -> bool {
        matches!(self.action, None | Some(UsageAction::FreeAnalysis))
    }
}

/// Empty or unparseable cells become `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let cell: Option<String> = Option::deserialize(deserializer)?;
    Ok(cell.and_then(|s| {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            s.parse().ok()
        }
    }))
}
