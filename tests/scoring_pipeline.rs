use tam_scout::output::ResultsReport;
use tam_scout::prospects::parse_companies;
use tam_scout::scoring::{classify_tier, ScoringConfig, ScoringEngine};

const PROSPECTS_CSV: &str = "\
name,industry,country,employee_count,annual_revenue,description,cage_code
Acme Aerospace,Defense Manufacturing,United States,250,\"$12,500,000\",Hypersonic propulsion and UAV systems for DoD programs,1A234
Orbit Labs,Software,Canada,40,1000000,Cloud analytics platform,
,Defense,United States,10,,Missing name row,
Plain Co,,,,,\" \",
";

#[test]
fn csv_to_report_pipeline() {
    let records = parse_companies(PROSPECTS_CSV.as_bytes()).expect("CSV parses");
    assert_eq!(records.len(), 4);

    let config = ScoringConfig::default();
    let mut engine = ScoringEngine::new(config.clone());
    let outcome = engine.batch_score(&records);

    // One record has no name: three successes, one failure, no batch error.
    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].reason.contains("name"));

    // Every score is bounded and its tier matches a fresh classification.
    for result in &outcome.results {
        assert!((0.0..=100.0).contains(&result.total_score));
        assert_eq!(
            result.tier_classification,
            classify_tier(&config.tier_classification, result.total_score)
        );
    }

    // The defense manufacturer outranks the plain records.
    let report = ResultsReport::new(&outcome, engine.stats(), engine.config());
    let ranked = report.ranked_results();
    assert_eq!(ranked[0].company_name, "Acme Aerospace");
    assert!(ranked[0].scoring_factors.has_cage_code);
    assert!(ranked[0].scoring_factors.is_defense_industry);

    // Session stats saw every success.
    assert_eq!(engine.stats().companies_scored, 3);
    assert_eq!(
        engine.stats().tier_distribution.values().sum::<u64>(),
        3
    );
}

#[test]
fn report_survives_persistence() {
    let records = parse_companies(PROSPECTS_CSV.as_bytes()).expect("CSV parses");
    let mut engine = ScoringEngine::new(ScoringConfig::default());
    let outcome = engine.batch_score(&records);
    let report = ResultsReport::new(&outcome, engine.stats(), engine.config());

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scoring_results.json");
    report.save(&path).expect("report saves");

    let loaded = ResultsReport::load(&path).expect("report loads");
    assert_eq!(report, loaded);
    assert_eq!(loaded.metadata.total_companies, 4);
    assert_eq!(loaded.failed_companies.len(), 1);
}

#[test]
fn custom_config_changes_tiering() {
    let yaml = r#"
scoring_weights:
  defense_contract_score: 1.0
  technology_relevance: 0.0
  compliance_indicators: 0.0
  firmographics: 0.0
tier_classification:
  - { name: hot, min_score: 40, max_score: 100 }
  - { name: cold, min_score: 0, max_score: 39 }
"#;
    let config: ScoringConfig = serde_saphyr::from_str(yaml).expect("config parses");
    tam_scout::scoring::validate_config(&config).expect("config valid");

    let records = parse_companies(PROSPECTS_CSV.as_bytes()).expect("CSV parses");
    let mut engine = ScoringEngine::new(config);
    let outcome = engine.batch_score(&records);

    let acme = outcome
        .results
        .iter()
        .find(|r| r.company_name == "Acme Aerospace")
        .expect("Acme scored");
    // CAGE (15) + industry (30) + defense keywords from the description
    // put the full-weight defense component past the hot threshold.
    assert_eq!(acme.tier_classification, "hot");
}
