use crate::scoring::ScoringConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the config directory path (~/.config/tam-scout/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("tam-scout")
}

/// Get the default config file path (~/.config/tam-scout/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load the scoring configuration, falling back to built-in defaults.
///
/// A missing or malformed config file is never fatal: the run continues on
/// the documented default rule set and the fallback is logged. Structural
/// problems inside a parsed config (overlapping tiers, negative weights)
/// are a different matter and are surfaced by
/// `scoring::validate_config`, which the CLI checks before scoring.
pub fn load_scoring_config(path: Option<&Path>) -> ScoringConfig {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    if !config_path.exists() {
        warn!(
            path = %config_path.display(),
            "scoring config not found, using built-in defaults"
        );
        return ScoringConfig::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) => {
            warn!(
                path = %config_path.display(),
                error = %err,
                "failed to read scoring config, using built-in defaults"
            );
            return ScoringConfig::default();
        }
    };

    match serde_saphyr::from_str::<ScoringConfig>(&content) {
        Ok(config) => {
            info!(path = %config_path.display(), "loaded scoring config");
            config
        }
        Err(err) => {
            warn!(
                path = %config_path.display(),
                error = %err,
                "invalid YAML in scoring config, using built-in defaults"
            );
            ScoringConfig::default()
        }
    }
}
