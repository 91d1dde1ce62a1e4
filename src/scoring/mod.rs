pub mod components;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod stats;
pub mod validation;

pub use config::{ScoringConfig, ScoringWeights, TierThreshold, ALGORITHM_VERSION};
pub use engine::{
    classify_tier, BatchFailure, BatchOutcome, ScoreError, ScoringEngine, ScoringResult,
};
pub use matcher::{extract_all_matches, keyword_matches, total_matches};
pub use stats::SessionStats;
pub use validation::validate_config;
