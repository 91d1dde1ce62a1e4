use super::components::{
    compliance_score, defense_score, firmographics_score, technology_score,
};
use super::config::{ScoringConfig, ScoringWeights, TierThreshold, ALGORITHM_VERSION};
use super::matcher::{extract_all_matches, total_matches};
use super::stats::SessionStats;
use crate::prospects::CompanyRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Matched keywords are only counted toward the bonus multiplier once the
/// total reaches this many terms.
const BONUS_KEYWORD_THRESHOLD: usize = 5;

/// Structured per-record scoring error. Batch scoring converts these into
/// failure entries instead of propagating them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
}

/// Sub-scores after rounding, keyed the way the results document expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub defense_contract_score: f64,
    pub technology_relevance_score: f64,
    pub compliance_indicators_score: f64,
    pub firmographics_score: f64,
    pub total_score: f64,
}

/// Derived booleans and scalars that explain a score without re-deriving
/// it from the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringFactors {
    pub has_cage_code: bool,
    pub has_duns_number: bool,
    pub has_contract_history: bool,
    pub has_research_summary: bool,
    pub employee_count: Option<i64>,
    pub annual_revenue: Option<f64>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub total_keywords_found: usize,
    pub keyword_categories_found: Vec<String>,
    pub is_defense_industry: bool,
    pub has_technology_keywords: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub weights_used: ScoringWeights,
    pub bonus_applied: bool,
    pub total_keywords_found: usize,
    pub scoring_algorithm_version: String,
}

/// Complete scoring output for one company. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub company_name: String,
    pub total_score: f64,
    pub tier_classification: String,
    pub component_scores: ComponentScores,
    pub keyword_matches: BTreeMap<String, Vec<String>>,
    pub scoring_factors: ScoringFactors,
    pub metadata: ResultMetadata,
    pub timestamp: DateTime<Utc>,
}

/// One failed record in a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub company_name: String,
    pub reason: String,
}

/// Successes and failures of a batch run. A batch never errors as a whole;
/// bad records land in `failures` with a reason.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub results: Vec<ScoringResult>,
    pub failures: Vec<BatchFailure>,
}

/// Rule evaluator owning an immutable configuration and the session
/// statistics for the records it has scored. No process-wide state: create
/// one engine per run and pass it where scoring happens.
pub struct ScoringEngine {
    config: ScoringConfig,
    stats: SessionStats,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            stats: SessionStats::default(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Score one company record.
    ///
    /// Fails only on input validation (missing name). A component that
    /// produces an unusable value is degraded to 0 with a warning rather
    /// than failing the record.
    pub fn score_company(&mut self, record: &CompanyRecord) -> Result<ScoringResult, ScoreError> {
        if record.name.trim().is_empty() {
            return Err(ScoreError::MissingField { field: "name" });
        }

        let defense = guarded("defense_contract", defense_score(record, &self.config));
        let technology = guarded(
            "technology_relevance",
            technology_score(record, &self.config),
        );
        let compliance = guarded(
            "compliance_indicators",
            compliance_score(record, &self.config),
        );
        let firmographics = guarded("firmographics", firmographics_score(record, &self.config));

        let weights = &self.config.scoring_weights;
        let mut total = defense * weights.defense_contract_score
            + technology * weights.technology_relevance
            + compliance * weights.compliance_indicators
            + firmographics * weights.firmographics;

        let keyword_matches = extract_all_matches(record, &self.config);
        let total_keywords = total_matches(&keyword_matches);
        let bonus_applied = total_keywords >= BONUS_KEYWORD_THRESHOLD;

        if bonus_applied {
            let multiplier = self.config.algorithm_parameters.bonus_multiplier;
            total = (total * multiplier).min(100.0);
            debug!(
                company = %record.name,
                multiplier,
                total_keywords,
                "applied keyword volume bonus"
            );
        }

        let total = round_1dp(total.clamp(0.0, 100.0));
        let tier = classify_tier(&self.config.tier_classification, total);

        let result = ScoringResult {
            company_name: record.name.clone(),
            total_score: total,
            tier_classification: tier,
            component_scores: ComponentScores {
                defense_contract_score: round_1dp(defense),
                technology_relevance_score: round_1dp(technology),
                compliance_indicators_score: round_1dp(compliance),
                firmographics_score: round_1dp(firmographics),
                total_score: total,
            },
            scoring_factors: extract_scoring_factors(record, &keyword_matches),
            keyword_matches,
            metadata: ResultMetadata {
                weights_used: weights.clone(),
                bonus_applied,
                total_keywords_found: total_keywords,
                scoring_algorithm_version: ALGORITHM_VERSION.to_string(),
            },
            timestamp: Utc::now(),
        };

        self.stats.record(&result);

        debug!(
            company = %result.company_name,
            score = result.total_score,
            tier = %result.tier_classification,
            "scored company"
        );

        Ok(result)
    }

    /// Score a batch of records sequentially, collecting per-record
    /// failures without aborting.
    pub fn batch_score(&mut self, records: &[CompanyRecord]) -> BatchOutcome {
        info!(companies = records.len(), "starting batch scoring");

        let mut outcome = BatchOutcome::default();

        for (i, record) in records.iter().enumerate() {
            match self.score_company(record) {
                Ok(result) => outcome.results.push(result),
                Err(err) => {
                    let company_name = if record.name.trim().is_empty() {
                        format!("company_{}", i + 1)
                    } else {
                        record.name.clone()
                    };
                    warn!(company = %company_name, error = %err, "failed to score company");
                    outcome.failures.push(BatchFailure {
                        company_name,
                        reason: err.to_string(),
                    });
                }
            }
        }

        if !outcome.results.is_empty() {
            let avg: f64 = outcome.results.iter().map(|r| r.total_score).sum::<f64>()
                / outcome.results.len() as f64;
            info!(
                scored = outcome.results.len(),
                failed = outcome.failures.len(),
                average_score = round_1dp(avg),
                "batch scoring complete"
            );
        } else {
            info!(failed = outcome.failures.len(), "batch scoring complete, no records scored");
        }

        outcome
    }
}

/// Degraded-component guard: a non-finite sub-score contributes 0 and the
/// run continues.
fn guarded(component: &str, score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        warn!(component, "component produced a non-finite score, contributing 0");
        0.0
    }
}

/// First declared tier whose inclusive range contains the score;
/// `excluded` when none match.
pub fn classify_tier(tiers: &[TierThreshold], score: f64) -> String {
    tiers
        .iter()
        .find(|tier| tier.min_score <= score && score <= tier.max_score)
        .map(|tier| tier.name.clone())
        .unwrap_or_else(|| "excluded".to_string())
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn extract_scoring_factors(
    record: &CompanyRecord,
    keyword_matches: &BTreeMap<String, Vec<String>>,
) -> ScoringFactors {
    let industry = record.industry_lower();
    ScoringFactors {
        has_cage_code: record.has_cage_code(),
        has_duns_number: record.has_duns_number(),
        has_contract_history: record.has_contract_history(),
        has_research_summary: record
            .research_summary
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty()),
        employee_count: record.employee_count,
        annual_revenue: record.annual_revenue,
        industry: record.industry.clone(),
        country: record.country.clone(),
        total_keywords_found: total_matches(keyword_matches),
        keyword_categories_found: keyword_matches.keys().cloned().collect(),
        is_defense_industry: ["defense", "aerospace", "military"]
            .iter()
            .any(|term| industry.contains(term)),
        has_technology_keywords: keyword_matches
            .keys()
            .any(|category| category.contains("technology")),
    }
}
