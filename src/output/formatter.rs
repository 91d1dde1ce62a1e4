use crate::scoring::{BatchFailure, ScoringResult, SessionStats};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Format ranked results as one line per company
/// Format: "{name} | {tier} | {score} | {key factors}"
pub fn format_result_list(results: &[&ScoringResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No companies scored.".to_string();
    }

    results
        .iter()
        .map(|result| format_result_line(result, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_result_line(result: &ScoringResult, use_colors: bool) -> String {
    let factors = key_factors(result).join(", ");
    let score = format!("{:.1}", result.total_score);

    if use_colors {
        format!(
            "{} | {} | {} | {}",
            result.company_name.bold(),
            result.tier_classification.cyan(),
            score.yellow(),
            factors
        )
    } else {
        format!(
            "{} | {} | {} | {}",
            result.company_name, result.tier_classification, score, factors
        )
    }
}

/// The handful of signals that most influenced a score, for one-line
/// display and logs. Mirrors what the result's scoring factors expose:
/// industry and identifier signals first, then the matched categories.
pub fn key_factors(result: &ScoringResult) -> Vec<String> {
    let mut factors = Vec::new();

    if result.scoring_factors.is_defense_industry {
        factors.push("defense industry".to_string());
    }
    if result.scoring_factors.has_cage_code {
        factors.push("CAGE code".to_string());
    }
    if result.scoring_factors.has_contract_history {
        factors.push("contract history".to_string());
    }

    factors.extend(result.keyword_matches.keys().take(3).cloned());
    factors.truncate(5);

    if factors.is_empty() {
        factors.push("no strong signals".to_string());
    }
    factors
}

/// Multi-line summary of a scoring session for the end of a batch run.
pub fn format_stats_summary(stats: &SessionStats) -> String {
    let mut lines = vec![
        format!("Companies scored: {}", stats.companies_scored),
        format!("Average total score: {:.1}", stats.average_scores.total),
    ];

    if !stats.tier_distribution.is_empty() {
        let tiers = stats
            .tier_distribution
            .iter()
            .map(|(tier, count)| format!("{tier}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Tier distribution: {tiers}"));
    }

    let top = stats.top_keywords(5);
    if !top.is_empty() {
        let keywords = top
            .iter()
            .map(|(term, count)| format!("{term} ({count})"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Top keywords: {keywords}"));
    }

    lines.join("\n")
}

pub fn format_failures(failures: &[BatchFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("  {} - {}", failure.company_name, failure.reason))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prospects::CompanyRecord;
    use crate::scoring::{ScoringConfig, ScoringEngine};

    fn sample_result() -> ScoringResult {
        let mut engine = ScoringEngine::new(ScoringConfig::default());
        let mut record = CompanyRecord::named("Acme Aerospace");
        record.industry = Some("Defense Manufacturing".to_string());
        record.cage_code = Some("1A234".to_string());
        engine.score_company(&record).unwrap()
    }

    #[test]
    fn test_plain_line_format() {
        let result = sample_result();
        let line = format_result_line(&result, false);
        assert!(line.starts_with("Acme Aerospace | "));
        assert!(line.contains(&result.tier_classification));
        assert!(line.contains(&format!("{:.1}", result.total_score)));
    }

    #[test]
    fn test_key_factors_prioritized_and_capped() {
        let result = sample_result();
        let factors = key_factors(&result);
        assert_eq!(factors[0], "defense industry");
        assert_eq!(factors[1], "CAGE code");
        assert!(factors.len() <= 5);
    }

    #[test]
    fn test_key_factors_fallback() {
        let mut engine = ScoringEngine::new(ScoringConfig::default());
        let result = engine
            .score_company(&CompanyRecord::named("Plain Co"))
            .unwrap();
        assert_eq!(key_factors(&result), vec!["no strong signals".to_string()]);
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(format_result_list(&[], false), "No companies scored.");
    }

    #[test]
    fn test_stats_summary_mentions_counts() {
        let mut engine = ScoringEngine::new(ScoringConfig::default());
        let mut record = CompanyRecord::named("Acme");
        record.description = Some("hypersonic propulsion".to_string());
        engine.score_company(&record).unwrap();

        let summary = format_stats_summary(engine.stats());
        assert!(summary.contains("Companies scored: 1"));
        assert!(summary.contains("Tier distribution:"));
        assert!(summary.contains("hypersonic"));
    }

    #[test]
    fn test_format_failures() {
        let failures = vec![BatchFailure {
            company_name: "company_2".to_string(),
            reason: "missing required field `name`".to_string(),
        }];
        let formatted = format_failures(&failures);
        assert!(formatted.contains("company_2"));
        assert!(formatted.contains("missing required field"));
    }
}
