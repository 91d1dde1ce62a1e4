use super::config::{RangeTable, ScoringConfig};

/// Validate a scoring configuration at load time.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let weights = [
        (
            "scoring_weights.defense_contract_score",
            config.scoring_weights.defense_contract_score,
        ),
        (
            "scoring_weights.technology_relevance",
            config.scoring_weights.technology_relevance,
        ),
        (
            "scoring_weights.compliance_indicators",
            config.scoring_weights.compliance_indicators,
        ),
        (
            "scoring_weights.firmographics",
            config.scoring_weights.firmographics,
        ),
    ];
    for (label, weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            errors.push(format!("{label}: must be a non-negative number"));
        }
    }

    if config.algorithm_parameters.bonus_multiplier <= 0.0 {
        errors.push("algorithm_parameters.bonus_multiplier: must be positive".to_string());
    }

    for (name, category) in &config.keywords {
        if category.terms.is_empty() {
            errors.push(format!("keywords.{name}.terms: must not be empty"));
        }
    }
    for (name, category) in &config.technology_keywords {
        if category.keywords.is_empty() {
            errors.push(format!("technology_keywords.{name}.keywords: must not be empty"));
        }
    }
    for (name, category) in &config.compliance_keywords {
        if category.terms.is_empty() {
            errors.push(format!("compliance_keywords.{name}.terms: must not be empty"));
        }
    }

    validate_range_table(
        &config.firmographics.employee_count,
        "firmographics.employee_count",
        &mut errors,
    );
    validate_range_table(&config.firmographics.revenue, "firmographics.revenue", &mut errors);

    validate_tiers(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_range_table(table: &RangeTable, label: &str, errors: &mut Vec<String>) {
    for (i, band) in table.ranges.iter().enumerate() {
        if band.min > band.max {
            errors.push(format!(
                "{label}.ranges[{i}]: min {} exceeds max {}",
                band.min, band.max
            ));
        }
    }
}

/// Tier ranges must partition [0, 100]: inclusive on both ends, no
/// overlaps, and no gap wider than the 1-point step the range convention
/// uses (e.g. 45-59 followed by 60-74). A score falling into a gap would
/// silently classify as `excluded`, so malformed partitions fail the
/// configuration load instead.
fn validate_tiers(config: &ScoringConfig, errors: &mut Vec<String>) {
    let tiers = &config.tier_classification;

    if tiers.is_empty() {
        errors.push("tier_classification: must declare at least one tier".to_string());
        return;
    }

    for tier in tiers {
        if tier.min_score > tier.max_score {
            errors.push(format!(
                "tier_classification.{}: min_score {} exceeds max_score {}",
                tier.name, tier.min_score, tier.max_score
            ));
        }
        if tier.min_score < 0.0 || tier.max_score > 100.0 {
            errors.push(format!(
                "tier_classification.{}: range must lie within [0, 100]",
                tier.name
            ));
        }
    }

    let mut sorted: Vec<_> = tiers.iter().collect();
    sorted.sort_by(|a, b| a.min_score.total_cmp(&b.min_score));

    if let Some(first) = sorted.first() {
        if first.min_score > 0.0 {
            errors.push(format!(
                "tier_classification: scores below {} are uncovered",
                first.min_score
            ));
        }
    }
    if let Some(last) = sorted.last() {
        if last.max_score < 100.0 {
            errors.push(format!(
                "tier_classification: scores above {} are uncovered",
                last.max_score
            ));
        }
    }

    for pair in sorted.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if upper.min_score < lower.max_score {
            errors.push(format!(
                "tier_classification: '{}' and '{}' overlap",
                lower.name, upper.name
            ));
        } else if upper.min_score - lower.max_score > 1.0 {
            errors.push(format!(
                "tier_classification: gap between '{}' (max {}) and '{}' (min {})",
                lower.name, lower.max_score, upper.name, upper.min_score
            ));
        }
    }
}
