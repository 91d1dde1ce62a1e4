use serde::{Deserialize, Serialize};

/// A prospective customer as seen by the scoring core.
///
/// Records are assembled by collaborators (CSV loader, CRM/contract-registry
/// enrichment) before scoring; the engine treats them as read-only. Every
/// field except `name` is optional because real prospect exports are
/// partially populated.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CompanyRecord {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<f64>,

    /// Free-text fields scanned by the keyword matcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology_keywords_found: Option<String>,

    /// Government contractor identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cage_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duns_number: Option<String>,

    /// Component scores precomputed by an upstream collaborator.
    /// When present the matching scorer clamps and passes them through
    /// instead of recomputing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_contract_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology_relevance_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_indicators_score: Option<f64>,
}

impl CompanyRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Lowercased concatenation of every free-text field, the single
    /// haystack the keyword matcher scans. Fields are space-separated so
    /// terms never match across a field boundary.
    pub fn free_text(&self) -> String {
        let parts = [
            self.description.as_deref(),
            self.research_summary.as_deref(),
            self.contract_history.as_deref(),
            self.technology_keywords_found.as_deref(),
            self.industry.as_deref(),
            Some(self.name.as_str()),
        ];

        parts
            .iter()
            .flatten()
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_cage_code(&self) -> bool {
        self.cage_code.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    pub fn has_duns_number(&self) -> bool {
        self.duns_number
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    pub fn has_contract_history(&self) -> bool {
        self.contract_history
            .as_deref()
            .is_some_and(|h| !h.trim().is_empty())
    }

    pub fn industry_lower(&self) -> String {
        self.industry
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// US variants recognized by the firmographics scorer.
    pub fn is_us_based(&self) -> bool {
        matches!(
            self.country
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase()
                .as_str(),
            "united states" | "usa" | "us"
        )
    }
}
