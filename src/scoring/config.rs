use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version tag recorded in result metadata.
pub const ALGORITHM_VERSION: &str = "1.0";

/// Main scoring configuration.
///
/// Declarative rule set loaded once per run and treated as immutable.
/// Every section is optional in YAML; omitted sections take the built-in
/// defaults below.
///
/// Example YAML:
/// ```yaml
/// scoring_weights:
///   defense_contract_score: 0.35
///   technology_relevance: 0.30
///   compliance_indicators: 0.25
///   firmographics: 0.10
/// keywords:
///   primary:
///     points: 10
///     terms: [hypersonic, nuclear, propulsion]
/// tier_classification:
///   - { name: tier_1, min_score: 90, max_score: 100 }
///   - { name: excluded, min_score: 0, max_score: 89 }
/// algorithm_parameters:
///   bonus_multiplier: 1.2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub scoring_weights: ScoringWeights,

    /// Primary keyword categories; matches feed the bonus-multiplier count.
    #[serde(default = "default_keywords")]
    pub keywords: BTreeMap<String, KeywordCategory>,

    /// Technology keyword categories consumed by the technology scorer.
    #[serde(default = "default_technology_keywords")]
    pub technology_keywords: BTreeMap<String, TechnologyCategory>,

    /// Compliance keyword categories consumed by the compliance scorer.
    #[serde(default = "default_compliance_keywords")]
    pub compliance_keywords: BTreeMap<String, KeywordCategory>,

    #[serde(default)]
    pub firmographics: FirmographicsConfig,

    /// Ordered tier ranges; classification is first-match over this order.
    #[serde(default = "default_tiers")]
    pub tier_classification: Vec<TierThreshold>,

    #[serde(default)]
    pub algorithm_parameters: AlgorithmParameters,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scoring_weights: ScoringWeights::default(),
            keywords: default_keywords(),
            technology_keywords: default_technology_keywords(),
            compliance_keywords: default_compliance_keywords(),
            firmographics: FirmographicsConfig::default(),
            tier_classification: default_tiers(),
            algorithm_parameters: AlgorithmParameters::default(),
        }
    }
}

/// Component weights. They should sum to 1.0 but the aggregator uses them
/// as given; validation only rejects negative values.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringWeights {
    #[serde(default = "default_defense_weight")]
    pub defense_contract_score: f64,
    #[serde(default = "default_technology_weight")]
    pub technology_relevance: f64,
    #[serde(default = "default_compliance_weight")]
    pub compliance_indicators: f64,
    #[serde(default = "default_firmographics_weight")]
    pub firmographics: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            defense_contract_score: default_defense_weight(),
            technology_relevance: default_technology_weight(),
            compliance_indicators: default_compliance_weight(),
            firmographics: default_firmographics_weight(),
        }
    }
}

fn default_defense_weight() -> f64 {
    0.35
}
fn default_technology_weight() -> f64 {
    0.30
}
fn default_compliance_weight() -> f64 {
    0.25
}
fn default_firmographics_weight() -> f64 {
    0.10
}

/// A named keyword group with a point value.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeywordCategory {
    #[serde(default = "default_category_points")]
    pub points: f64,
    pub terms: Vec<String>,
}

fn default_category_points() -> f64 {
    10.0
}

/// Technology categories use a `keywords` list (the upstream config format
/// names it differently from the generic `terms`).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TechnologyCategory {
    #[serde(default = "default_technology_points")]
    pub points: f64,
    pub keywords: Vec<String>,
}

fn default_technology_points() -> f64 {
    8.0
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FirmographicsConfig {
    #[serde(default = "default_employee_ranges")]
    pub employee_count: RangeTable,
    #[serde(default = "default_revenue_ranges")]
    pub revenue: RangeTable,
}

impl Default for FirmographicsConfig {
    fn default() -> Self {
        Self {
            employee_count: default_employee_ranges(),
            revenue: default_revenue_ranges(),
        }
    }
}

/// An ordered list of inclusive bands; the first band containing the value
/// wins. Bands are non-overlapping by convention.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RangeTable {
    pub ranges: Vec<RangeBand>,
}

impl RangeTable {
    /// Points for the first band containing `value`, if any.
    pub fn points_for(&self, value: f64) -> Option<f64> {
        self.ranges
            .iter()
            .find(|band| band.min <= value && value <= band.max)
            .map(|band| band.points)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RangeBand {
    pub min: f64,
    pub max: f64,
    pub points: f64,
}

/// One tier range; scores match inclusively on both ends.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierThreshold {
    pub name: String,
    pub min_score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AlgorithmParameters {
    /// Applied to the weighted total when five or more keywords match.
    #[serde(default = "default_bonus_multiplier")]
    pub bonus_multiplier: f64,
    #[serde(default)]
    pub keyword_matching: KeywordMatching,
}

impl Default for AlgorithmParameters {
    fn default() -> Self {
        Self {
            bonus_multiplier: default_bonus_multiplier(),
            keyword_matching: KeywordMatching::default(),
        }
    }
}

fn default_bonus_multiplier() -> f64 {
    1.2
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeywordMatching {
    #[serde(default = "default_fuzzy")]
    pub fuzzy_matching: bool,
}

impl Default for KeywordMatching {
    fn default() -> Self {
        Self {
            fuzzy_matching: default_fuzzy(),
        }
    }
}

fn default_fuzzy() -> bool {
    true
}

fn category(points: f64, terms: &[&str]) -> KeywordCategory {
    KeywordCategory {
        points,
        terms: terms.iter().map(|t| t.to_string()).collect(),
    }
}

fn default_keywords() -> BTreeMap<String, KeywordCategory> {
    BTreeMap::from([
        (
            "primary".to_string(),
            category(
                10.0,
                &[
                    "hypersonic",
                    "nuclear",
                    "propulsion",
                    "defense manufacturing",
                    "engineering services",
                ],
            ),
        ),
        (
            "secondary".to_string(),
            category(7.0, &["drone", "UAS", "UAV", "UXS", "UUV"]),
        ),
        (
            "specialized".to_string(),
            category(10.0, &["RF", "EW", "Electronic Warfare"]),
        ),
    ])
}

fn default_technology_keywords() -> BTreeMap<String, TechnologyCategory> {
    BTreeMap::from([
        (
            "advanced_manufacturing".to_string(),
            TechnologyCategory {
                points: 10.0,
                keywords: vec![
                    "CNC machining".to_string(),
                    "additive manufacturing".to_string(),
                    "precision machining".to_string(),
                    "composites".to_string(),
                ],
            },
        ),
        (
            "emerging_tech".to_string(),
            TechnologyCategory {
                points: 8.0,
                keywords: vec![
                    "artificial intelligence".to_string(),
                    "machine learning".to_string(),
                    "autonomy".to_string(),
                    "robotics".to_string(),
                ],
            },
        ),
    ])
}

fn default_compliance_keywords() -> BTreeMap<String, KeywordCategory> {
    BTreeMap::from([
        (
            "cybersecurity".to_string(),
            category(12.0, &["CMMC", "NIST 800-171", "DFARS", "ITAR"]),
        ),
        (
            "quality_certifications".to_string(),
            category(8.0, &["AS9100", "ISO 9001", "NADCAP"]),
        ),
    ])
}

fn default_employee_ranges() -> RangeTable {
    RangeTable {
        ranges: vec![
            RangeBand {
                min: 1.0,
                max: 50.0,
                points: 5.0,
            },
            RangeBand {
                min: 51.0,
                max: 200.0,
                points: 10.0,
            },
            RangeBand {
                min: 201.0,
                max: 1000.0,
                points: 15.0,
            },
            RangeBand {
                min: 1001.0,
                max: 50_000.0,
                points: 8.0,
            },
        ],
    }
}

fn default_revenue_ranges() -> RangeTable {
    RangeTable {
        ranges: vec![
            RangeBand {
                min: 1_000_000.0,
                max: 10_000_000.0,
                points: 5.0,
            },
            RangeBand {
                min: 10_000_001.0,
                max: 100_000_000.0,
                points: 10.0,
            },
            RangeBand {
                min: 100_000_001.0,
                max: 1_000_000_000.0,
                points: 15.0,
            },
            RangeBand {
                min: 1_000_000_001.0,
                max: 50_000_000_000.0,
                points: 8.0,
            },
        ],
    }
}

fn default_tiers() -> Vec<TierThreshold> {
    let tier = |name: &str, min_score: f64, max_score: f64| TierThreshold {
        name: name.to_string(),
        min_score,
        max_score,
    };
    vec![
        tier("tier_1", 90.0, 100.0),
        tier("tier_2", 75.0, 89.0),
        tier("tier_3", 60.0, 74.0),
        tier("tier_4", 45.0, 59.0),
        tier("excluded", 0.0, 44.0),
    ]
}
