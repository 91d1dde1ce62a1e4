use super::config::ScoringConfig;
use crate::prospects::CompanyRecord;

/// Fixed indicator lists. These are part of the algorithm, not the
/// configuration: changing them changes scores for every customer of the
/// config format, so they stay compiled in.
const DEFENSE_KEYWORDS: [&str; 6] = [
    "defense",
    "military",
    "aerospace",
    "dod",
    "government",
    "contractor",
];

const DEFENSE_INDUSTRIES: [&str; 5] = [
    "defense",
    "aerospace",
    "military",
    "manufacturing",
    "engineering",
];

const TECH_INDICATORS: [&str; 7] = [
    "software",
    "ai",
    "iot",
    "cloud",
    "cybersecurity",
    "automation",
    "digital",
];

const CERT_INDICATORS: [&str; 7] = [
    "iso",
    "soc",
    "fedramp",
    "certified",
    "compliant",
    "audit",
    "assessment",
];

/// Industry-to-points mapping applied by the firmographics scorer; first
/// match in this order wins.
const INDUSTRY_POINTS: [(&str, f64); 7] = [
    ("aircraft", 15.0),
    ("aerospace", 15.0),
    ("defense", 12.0),
    ("engineering", 12.0),
    ("manufacturing", 10.0),
    ("technology", 8.0),
    ("software", 8.0),
];

fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

fn count_indicators(indicators: &[&str], text: &str) -> usize {
    indicators.iter().filter(|i| text.contains(**i)).count()
}

/// Defense-contract component.
///
/// An upstream contract-registry score passes through after clamping.
/// Otherwise fixed contributions: CAGE code 15, DUNS 10, contract history
/// 20, 5 per defense keyword capped at 25, and 30 for a defense-adjacent
/// industry.
pub fn defense_score(record: &CompanyRecord, _config: &ScoringConfig) -> f64 {
    if let Some(existing) = record.defense_contract_score {
        return clamp_score(existing);
    }

    let mut score = 0.0;

    if record.has_cage_code() {
        score += 15.0;
    }
    if record.has_duns_number() {
        score += 10.0;
    }
    if record.has_contract_history() {
        score += 20.0;
    }

    let description = format!(
        "{} {}",
        record.description.as_deref().unwrap_or_default(),
        record.research_summary.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    let keyword_hits = count_indicators(&DEFENSE_KEYWORDS, &description);
    score += (keyword_hits as f64 * 5.0).min(25.0);

    let industry = record.industry_lower();
    if DEFENSE_INDUSTRIES.iter().any(|di| industry.contains(di)) {
        score += 30.0;
    }

    clamp_score(score)
}

/// Technology-relevance component.
///
/// Per configured category: min(found x points/len x 10, points), plus a
/// flat indicator bonus of 5 per hit capped at 20. Categories scan with
/// plain substring matching; the fuzzy rules apply only to the keyword
/// matcher that feeds the bonus count.
pub fn technology_score(record: &CompanyRecord, config: &ScoringConfig) -> f64 {
    if let Some(existing) = record.technology_relevance_score {
        return clamp_score(existing);
    }

    let all_text = format!(
        "{} {} {} {}",
        record.description.as_deref().unwrap_or_default(),
        record.research_summary.as_deref().unwrap_or_default(),
        record.technology_keywords_found.as_deref().unwrap_or_default(),
        record.industry.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    let mut score = 0.0;

    for category in config.technology_keywords.values() {
        if category.keywords.is_empty() {
            continue;
        }
        let found = category
            .keywords
            .iter()
            .filter(|kw| all_text.contains(&kw.to_lowercase()))
            .count();
        if found > 0 {
            let per_term = category.points / category.keywords.len() as f64;
            score += (found as f64 * per_term * 10.0).min(category.points);
        }
    }

    let indicator_hits = count_indicators(&TECH_INDICATORS, &all_text);
    score += (indicator_hits as f64 * 5.0).min(20.0);

    clamp_score(score)
}

/// Compliance-indicators component.
///
/// Per configured category: min(found x points/2, points), plus 8 per
/// certification indicator capped at 25.
pub fn compliance_score(record: &CompanyRecord, config: &ScoringConfig) -> f64 {
    if let Some(existing) = record.compliance_indicators_score {
        return clamp_score(existing);
    }

    let all_text = format!(
        "{} {} {}",
        record.description.as_deref().unwrap_or_default(),
        record.research_summary.as_deref().unwrap_or_default(),
        record.technology_keywords_found.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    let mut score = 0.0;

    for category in config.compliance_keywords.values() {
        let found = category
            .terms
            .iter()
            .filter(|term| all_text.contains(&term.to_lowercase()))
            .count();
        if found > 0 {
            score += (found as f64 * category.points / 2.0).min(category.points);
        }
    }

    let cert_hits = count_indicators(&CERT_INDICATORS, &all_text);
    score += (cert_hits as f64 * 8.0).min(25.0);

    clamp_score(score)
}

/// Firmographics component.
///
/// Always computed from raw fields; there is no precomputed shortcut.
/// First matching employee band + first matching revenue band + first
/// matching industry mapping + 5 for US-based companies.
pub fn firmographics_score(record: &CompanyRecord, config: &ScoringConfig) -> f64 {
    let mut score = 0.0;

    if let Some(count) = record.employee_count {
        if let Some(points) = config.firmographics.employee_count.points_for(count as f64) {
            score += points;
        }
    }

    if let Some(revenue) = record.annual_revenue {
        if let Some(points) = config.firmographics.revenue.points_for(revenue) {
            score += points;
        }
    }

    let industry = record.industry_lower();
    if let Some((_, points)) = INDUSTRY_POINTS
        .iter()
        .find(|(key, _)| industry.contains(key))
    {
        score += points;
    }

    if record.is_us_based() {
        score += 5.0;
    }

    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_defense_precomputed_passes_through() {
        let mut record = CompanyRecord::named("Acme");
        record.defense_contract_score = Some(42.0);
        assert_eq!(defense_score(&record, &config()), 42.0);
    }

    #[test]
    fn test_precomputed_values_are_clamped() {
        let mut record = CompanyRecord::named("Acme");
        record.defense_contract_score = Some(250.0);
        record.technology_relevance_score = Some(-10.0);
        record.compliance_indicators_score = Some(1e12);
        assert_eq!(defense_score(&record, &config()), 100.0);
        assert_eq!(technology_score(&record, &config()), 0.0);
        assert_eq!(compliance_score(&record, &config()), 100.0);
    }

    #[test]
    fn test_defense_identifier_points() {
        let mut record = CompanyRecord::named("Acme");
        record.cage_code = Some("1A234".to_string());
        record.duns_number = Some("123456789".to_string());
        record.contract_history = Some("Prime on two DoD contracts".to_string());
        // 15 + 10 + 20, plus keyword points for "dod"/"contract..." in history? No:
        // the keyword scan covers description and research summary only.
        assert_eq!(defense_score(&record, &config()), 45.0);
    }

    #[test]
    fn test_defense_keyword_cap() {
        let mut record = CompanyRecord::named("Acme");
        record.description = Some(
            "defense military aerospace DoD government contractor services".to_string(),
        );
        // 6 keywords x 5 capped at 25, no industry field set
        assert_eq!(defense_score(&record, &config()), 25.0);
    }

    #[test]
    fn test_defense_industry_bonus() {
        let mut record = CompanyRecord::named("Acme");
        record.industry = Some("Defense Manufacturing".to_string());
        assert_eq!(defense_score(&record, &config()), 30.0);
    }

    #[test]
    fn test_spec_example_company_defense_floor() {
        let mut record = CompanyRecord::named("Acme Aerospace");
        record.industry = Some("Defense Manufacturing".to_string());
        record.cage_code = Some("1A234".to_string());
        record.country = Some("United States".to_string());
        record.employee_count = Some(250);
        // CAGE 15 + industry 30 at minimum
        assert!(defense_score(&record, &config()) >= 45.0);
    }

    #[test]
    fn test_technology_precomputed_passes_through() {
        let mut record = CompanyRecord::named("Acme");
        record.technology_relevance_score = Some(42.0);
        assert_eq!(technology_score(&record, &config()), 42.0);
    }

    #[test]
    fn test_technology_category_formula() {
        let mut record = CompanyRecord::named("Acme");
        record.description = Some("CNC machining shop".to_string());
        let mut cfg = config();
        cfg.technology_keywords.clear();
        cfg.technology_keywords.insert(
            "mfg".to_string(),
            crate::scoring::config::TechnologyCategory {
                points: 10.0,
                keywords: vec![
                    "CNC machining".to_string(),
                    "additive manufacturing".to_string(),
                    "composites".to_string(),
                    "castings".to_string(),
                ],
            },
        );
        // 1 found x (10/4) x 10 = 25, capped at category points (10)
        assert_eq!(technology_score(&record, &cfg), 10.0);
    }

    #[test]
    fn test_technology_indicator_bonus_capped() {
        let mut record = CompanyRecord::named("Acme");
        record.description =
            Some("software AI IoT cloud cybersecurity automation digital".to_string());
        let mut cfg = config();
        cfg.technology_keywords.clear();
        // 7 indicators x 5 capped at 20
        assert_eq!(technology_score(&record, &cfg), 20.0);
    }

    #[test]
    fn test_compliance_category_formula() {
        let mut record = CompanyRecord::named("Acme");
        record.description = Some("CMMC and ITAR registered".to_string());
        let mut cfg = config();
        cfg.compliance_keywords.clear();
        cfg.compliance_keywords.insert(
            "cyber".to_string(),
            crate::scoring::config::KeywordCategory {
                points: 12.0,
                terms: vec![
                    "CMMC".to_string(),
                    "ITAR".to_string(),
                    "DFARS".to_string(),
                ],
            },
        );
        // 2 found x 12/2 = 12, at the category cap
        assert_eq!(compliance_score(&record, &cfg), 12.0);
    }

    #[test]
    fn test_compliance_cert_bonus_capped() {
        let mut record = CompanyRecord::named("Acme");
        record.description =
            Some("ISO SOC FedRAMP certified compliant audit assessment".to_string());
        let mut cfg = config();
        cfg.compliance_keywords.clear();
        // 7 indicators x 8 capped at 25
        assert_eq!(compliance_score(&record, &cfg), 25.0);
    }

    #[test]
    fn test_firmographics_spec_example() {
        let mut record = CompanyRecord::named("Acme Aerospace");
        record.industry = Some("Defense Manufacturing".to_string());
        record.country = Some("United States".to_string());
        record.employee_count = Some(250);
        // employees 201-1000 -> 15, industry "defense" -> 12, US -> 5
        assert_eq!(firmographics_score(&record, &config()), 32.0);
    }

    #[test]
    fn test_firmographics_industry_first_match_order() {
        let mut record = CompanyRecord::named("Acme");
        record.industry = Some("aerospace manufacturing".to_string());
        // "aerospace" (15) wins over "manufacturing" (10)
        assert_eq!(firmographics_score(&record, &config()), 15.0);
    }

    #[test]
    fn test_firmographics_ignores_precomputed_fields() {
        let mut record = CompanyRecord::named("Acme");
        record.defense_contract_score = Some(99.0);
        assert_eq!(firmographics_score(&record, &config()), 0.0);
    }

    #[test]
    fn test_firmographics_out_of_range_values() {
        let mut record = CompanyRecord::named("Acme");
        record.employee_count = Some(-5);
        record.annual_revenue = Some(-1000.0);
        assert_eq!(firmographics_score(&record, &config()), 0.0);
    }

    #[test]
    fn test_all_components_bounded() {
        let mut record = CompanyRecord::named("Everything Corp");
        record.industry = Some("defense aerospace manufacturing engineering software".to_string());
        record.description = Some(
            "hypersonic nuclear propulsion drone UAV RF EW CMMC ITAR DFARS AS9100 ISO 9001 \
             software AI IoT cloud cybersecurity automation digital certified compliant audit \
             CNC machining additive manufacturing composites robotics defense military DoD"
                .to_string(),
        );
        record.cage_code = Some("1A234".to_string());
        record.duns_number = Some("123456789".to_string());
        record.contract_history = Some("many".to_string());
        record.employee_count = Some(500);
        record.annual_revenue = Some(50_000_000.0);
        record.country = Some("USA".to_string());

        let cfg = config();
        for score in [
            defense_score(&record, &cfg),
            technology_score(&record, &cfg),
            compliance_score(&record, &cfg),
            firmographics_score(&record, &cfg),
        ] {
            assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        }
    }
}
