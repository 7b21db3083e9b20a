use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("invalid relevance weights: degree {degree} + betweenness {betweenness} must be positive")]
    InvalidWeights { degree: f64, betweenness: f64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config at {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub relevance: RelevanceConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
}

/// Weights for combining degree and betweenness centrality into the single
/// relevance score. Both default to 0.5 (equal-weighted sum).
#[derive(Debug, Clone, Deserialize)]
pub struct RelevanceConfig {
    #[serde(default = "default_weight")]
    pub degree_weight: f64,
    #[serde(default = "default_weight")]
    pub betweenness_weight: f64,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            degree_weight: default_weight(),
            betweenness_weight: default_weight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_top_central")]
    pub top_central: usize,
    #[serde(default = "default_gap_report")]
    pub gap_report: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            top_central: default_top_central(),
            gap_report: default_gap_report(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorsConfig {
    /// Explicit program-to-color assignments. Programs not listed here get a
    /// deterministic color from the palette.
    #[serde(default)]
    pub programs: HashMap<String, String>,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "default_fallback_color")]
    pub fallback: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            programs: HashMap::new(),
            palette: default_palette(),
            fallback: default_fallback_color(),
        }
    }
}

fn default_weight() -> f64 {
    0.5
}

fn default_top_central() -> usize {
    3
}

fn default_gap_report() -> usize {
    10
}

fn default_palette() -> Vec<String> {
    ["#87CEEB", "#90EE90", "#FA8072", "#FFD700", "#DDA0DD", "#F0E68C"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_fallback_color() -> String {
    "#C0C0C0".to_string()
}

/// Load the config from an explicit path, the `COLLABNET_CONFIG` env var, or
/// fall back to defaults. An explicit path that does not exist is an error;
/// no path at all is not.
pub fn resolve_config(explicit: Option<PathBuf>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(&path);
    }

    if let Ok(path) = env::var("COLLABNET_CONFIG") {
        return load_config(Path::new(&path));
    }

    Ok(AppConfig::default())
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.is_file() {
        return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<()> {
    let relevance = &config.relevance;
    let sum = relevance.degree_weight + relevance.betweenness_weight;
    if relevance.degree_weight < 0.0 || relevance.betweenness_weight < 0.0 || sum <= 0.0 {
        return Err(ConfigError::InvalidWeights {
            degree: relevance.degree_weight,
            betweenness: relevance.betweenness_weight,
        });
    }
    Ok(())
}
