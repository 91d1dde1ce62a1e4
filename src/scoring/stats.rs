use super::engine::ScoringResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Batch-level aggregates accumulated across every record an engine
/// instance scores. Averages are updated incrementally, never recomputed
/// from the full result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub companies_scored: u64,
    pub tier_distribution: BTreeMap<String, u64>,
    pub average_scores: AverageScores,
    pub keyword_usage: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageScores {
    pub total: f64,
    pub defense_contract: f64,
    pub technology_relevance: f64,
    pub compliance_indicators: f64,
    pub firmographics: f64,
}

impl SessionStats {
    pub fn record(&mut self, result: &ScoringResult) {
        self.companies_scored += 1;
        let n = self.companies_scored as f64;

        *self
            .tier_distribution
            .entry(result.tier_classification.clone())
            .or_insert(0) += 1;

        let scores = &result.component_scores;
        roll(&mut self.average_scores.total, scores.total_score, n);
        roll(
            &mut self.average_scores.defense_contract,
            scores.defense_contract_score,
            n,
        );
        roll(
            &mut self.average_scores.technology_relevance,
            scores.technology_relevance_score,
            n,
        );
        roll(
            &mut self.average_scores.compliance_indicators,
            scores.compliance_indicators_score,
            n,
        );
        roll(
            &mut self.average_scores.firmographics,
            scores.firmographics_score,
            n,
        );

        for terms in result.keyword_matches.values() {
            for term in terms {
                *self.keyword_usage.entry(term.clone()).or_insert(0) += 1;
            }
        }
    }

    /// Most frequently matched terms, highest count first, ties broken
    /// alphabetically for stable output.
    pub fn top_keywords(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .keyword_usage
            .iter()
            .map(|(term, count)| (term.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }
}

fn roll(average: &mut f64, value: f64, n: f64) {
    *average = (*average * (n - 1.0) + value) / n;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prospects::CompanyRecord;
    use crate::scoring::{ScoringConfig, ScoringEngine};

    fn result_for(name: &str, description: &str) -> ScoringResult {
        let mut engine = ScoringEngine::new(ScoringConfig::default());
        let mut record = CompanyRecord::named(name);
        record.description = Some(description.to_string());
        engine.score_company(&record).unwrap()
    }

    #[test]
    fn test_counts_and_tier_distribution() {
        let mut stats = SessionStats::default();
        let result = result_for("Acme", "hypersonic propulsion");
        stats.record(&result);
        stats.record(&result);

        assert_eq!(stats.companies_scored, 2);
        assert_eq!(
            stats.tier_distribution.get(&result.tier_classification),
            Some(&2)
        );
    }

    #[test]
    fn test_running_average_matches_arithmetic_mean() {
        let mut stats = SessionStats::default();
        let a = result_for("A", "hypersonic nuclear propulsion defense manufacturing");
        let b = result_for("B", "");
        stats.record(&a);
        stats.record(&b);

        let expected = (a.total_score + b.total_score) / 2.0;
        assert!((stats.average_scores.total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_usage_accumulates() {
        let mut stats = SessionStats::default();
        let result = result_for("Acme", "hypersonic test article");
        stats.record(&result);
        stats.record(&result);
        assert_eq!(stats.keyword_usage.get("hypersonic"), Some(&2));
    }

    #[test]
    fn test_top_keywords_ordering() {
        let mut stats = SessionStats::default();
        stats.keyword_usage.insert("drone".to_string(), 3);
        stats.keyword_usage.insert("hypersonic".to_string(), 5);
        stats.keyword_usage.insert("nuclear".to_string(), 3);

        let top = stats.top_keywords(2);
        assert_eq!(top, vec![("hypersonic", 5), ("drone", 3)]);
    }

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::default();
        assert_eq!(stats.companies_scored, 0);
        assert!(stats.top_keywords(5).is_empty());
        assert_eq!(stats.average_scores.total, 0.0);
    }
}
