use crate::scoring::{
    BatchFailure, BatchOutcome, ScoringConfig, ScoringResult, ScoringWeights, SessionStats,
    ALGORITHM_VERSION,
};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::Path;

/// Serializable results document: a metadata block followed by the
/// per-company results and the failures of the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsReport {
    pub metadata: ReportMetadata,
    pub results: Vec<ScoringResult>,
    pub failed_companies: Vec<BatchFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub total_companies: usize,
    pub scoring_algorithm_version: String,
    pub weights_used: ScoringWeights,
    pub bonus_multiplier: f64,
    pub statistics: SessionStats,
}

impl ResultsReport {
    pub fn new(outcome: &BatchOutcome, stats: &SessionStats, config: &ScoringConfig) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                total_companies: outcome.results.len() + outcome.failures.len(),
                scoring_algorithm_version: ALGORITHM_VERSION.to_string(),
                weights_used: config.scoring_weights.clone(),
                bonus_multiplier: config.algorithm_parameters.bonus_multiplier,
                statistics: stats.clone(),
            },
            results: outcome.results.clone(),
            failed_companies: outcome.failures.clone(),
        }
    }

    /// Save the report as pretty JSON atomically.
    ///
    /// Uses atomic-write-file so a crash mid-write never leaves a truncated
    /// report behind. Creates parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create results directory at {}", parent.display())
                })?;
            }
        }

        let mut file = AtomicWriteFile::open(path)
            .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

        serde_json::to_writer_pretty(&mut file, self).context("Failed to serialize report")?;

        file.commit().context("Failed to save scoring report")?;

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open report at {}", path.display()))?;
        serde_json::from_reader(file).context("Failed to parse scoring report")
    }

    /// Results ordered by score descending, name ascending for ties.
    pub fn ranked_results(&self) -> Vec<&ScoringResult> {
        let mut ranked: Vec<&ScoringResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| {
            b.total_score
                .total_cmp(&a.total_score)
                .then_with(|| a.company_name.cmp(&b.company_name))
        });
        ranked
    }
}
