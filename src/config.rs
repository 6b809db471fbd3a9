use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::objective::ObjectiveWeights;
use crate::services::solver::{SolveBudget, SolverBackend};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub solver: SolverSettings,
    #[serde(default)]
    pub reporting: ReportingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_problem_name")]
    pub problem_name: String,
    #[serde(default = "default_preference_penalty")]
    pub preference_penalty: f64,
    #[serde(default = "default_true")]
    pub validate_capabilities: bool,
    /// Day choice that is compatible with every day, for pairing and reports
    #[serde(default = "default_wildcard_day")]
    pub wildcard_day: String,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            problem_name: default_problem_name(),
            preference_penalty: default_preference_penalty(),
            validate_capabilities: true,
            wildcard_day: default_wildcard_day(),
        }
    }
}

impl MatchingSettings {
    pub fn weights(&self) -> ObjectiveWeights {
        ObjectiveWeights {
            preference_penalty: self.preference_penalty,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverSettings {
    #[serde(default)]
    pub backend: SolverBackend,
    /// Wall-clock limit per solve; 0 disables it
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: Option<u64>,
    pub node_limit: Option<u64>,
    /// Where to write the LP dump; empty disables it
    #[serde(default = "default_lp_dump_path")]
    pub lp_dump_path: String,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            backend: SolverBackend::default(),
            time_limit_secs: default_time_limit_secs(),
            node_limit: None,
            lp_dump_path: default_lp_dump_path(),
        }
    }
}

impl SolverSettings {
    pub fn budget(&self) -> SolveBudget {
        SolveBudget {
            time_limit: self
                .time_limit_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            node_limit: self.node_limit,
        }
    }

    pub fn lp_dump_path(&self) -> Option<PathBuf> {
        match self.lp_dump_path.trim() {
            "" => None,
            path => Some(PathBuf::from(path)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportingSettings {
    #[serde(default = "default_score_decimals")]
    pub score_decimals: u32,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            score_decimals: default_score_decimals(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_problem_name() -> String { "date_pairing".to_string() }
fn default_preference_penalty() -> f64 { 0.1 }
fn default_true() -> bool { true }
fn default_time_limit_secs() -> Option<u64> { Some(60) }
fn default_lp_dump_path() -> String { "DatingModel.lp".to_string() }
fn default_wildcard_day() -> String { crate::models::domain::WILDCARD_DAY.to_string() }
fn default_score_decimals() -> u32 { 2 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DATEMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DATEMATCH__SOLVER__BACKEND -> solver.backend
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("DATEMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
