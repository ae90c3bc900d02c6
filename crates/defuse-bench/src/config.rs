use defuse_bot::BotParams;
use defuse_core::game::setup::{ColoredWireRule, GameSetup, SeatConfig};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

const DEFAULT_MAX_TURNS: usize = 400;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root benchmark configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub table: TableConfig,
    #[serde(default)]
    pub bot: BotConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BenchmarkConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        self.table.validate()?;
        self.bot.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// How many games to play and how they are seeded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        if self.max_turns == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.max_turns".to_string(),
                message: "turn limit must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

fn default_max_turns() -> usize {
    DEFAULT_MAX_TURNS
}

/// Table layout shared by every game of a run. All seats are played by the bot,
/// so seat kinds are not configurable and unknown keys are rejected.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub players: usize,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default = "default_mission")]
    pub mission: u32,
    #[serde(default)]
    pub yellow: ColoredWireRule,
    #[serde(default)]
    pub red: ColoredWireRule,
    #[serde(default = "default_true")]
    pub double_detectors: bool,
    #[serde(default)]
    pub detonator_limit: Option<u8>,
}

impl TableConfig {
    pub fn to_setup(&self) -> GameSetup {
        let seats = (0..self.players)
            .map(|idx| {
                let name = self
                    .names
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("Bot {}", idx + 1));
                SeatConfig::ai(name)
            })
            .collect();
        GameSetup {
            seats,
            mission: self.mission,
            yellow: self.yellow,
            red: self.red,
            double_detectors: self.double_detectors,
            detonator_limit: self.detonator_limit,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.names.len() > self.players {
            return Err(ValidationError::InvalidField {
                field: "table.names".to_string(),
                message: format!(
                    "{} names given for {} players",
                    self.names.len(),
                    self.players
                ),
            });
        }

        self.to_setup()
            .validate()
            .map_err(|err| ValidationError::InvalidField {
                field: "table".to_string(),
                message: err.to_string(),
            })
    }
}

fn default_mission() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// Overrides for the heuristic constants; unset fields keep the environment/default value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BotConfig {
    #[serde(default)]
    pub mc_iterations: Option<usize>,
    #[serde(default)]
    pub mc_time_cap_ms: Option<u64>,
    #[serde(default)]
    pub dd_min_gain: Option<f64>,
    #[serde(default)]
    pub red_guard_ratio: Option<f64>,
}

impl BotConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.mc_iterations == Some(0) {
            return Err(ValidationError::InvalidField {
                field: "bot.mc_iterations".to_string(),
                message: "at least one Monte Carlo trial is required".to_string(),
            });
        }

        if let Some(gain) = self.dd_min_gain
            && !(0.0..=1.0).contains(&gain)
        {
            return Err(ValidationError::InvalidField {
                field: "bot.dd_min_gain".to_string(),
                message: "gain must lie within [0, 1]".to_string(),
            });
        }

        if let Some(ratio) = self.red_guard_ratio
            && !(ratio.is_finite() && ratio >= 0.0)
        {
            return Err(ValidationError::InvalidField {
                field: "bot.red_guard_ratio".to_string(),
                message: "ratio must be a non-negative number".to_string(),
            });
        }

        Ok(())
    }

    /// Applies the configured overrides on top of `base`.
    pub fn apply(&self, base: BotParams) -> BotParams {
        let mut params = base;
        if let Some(iterations) = self.mc_iterations {
            params.mc_iterations = iterations;
        }
        if let Some(cap) = self.mc_time_cap_ms {
            params.mc_time_cap = Some(Duration::from_millis(cap));
        }
        if let Some(gain) = self.dd_min_gain {
            params.dd_min_gain = gain;
        }
        if let Some(ratio) = self.red_guard_ratio {
            params.red_guard_ratio = ratio;
        }
        params
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
