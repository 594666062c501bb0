// Configuration loading and parsing (balancer.toml).

use pickup_core::{EngineSettings, ScoreWeights, MAX_FUDGE_RANGE, MAX_TEAMS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Name of the single config file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "balancer.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub engine: EngineSettings,
    /// Team count used when neither the command line nor the request sets one.
    pub default_teams: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engine: EngineSettings::default(),
            default_teams: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// balancer.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire balancer.toml file.
#[derive(Debug, Clone, Deserialize)]
struct BalancerFile {
    weights: ScoreWeights,
    fudge: FudgeSection,
    teams: TeamsSection,
}

#[derive(Debug, Clone, Deserialize)]
struct FudgeSection {
    range: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct TeamsSection {
    default_count: usize,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/balancer.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: BalancerFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        engine: EngineSettings {
            weights: file.weights,
            fudge_range: file.fudge.range,
        },
        default_teams: file.teams.default_count,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy any file in `defaults/` that is missing from `config/`.
/// Returns the paths that were written. Skips `.example` files and never
/// overwrites an existing config file.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load config relative to the current working directory, copying defaults
/// into place first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_or_default(&cwd)
}

/// Like `load_config_from`, but copies defaults first and falls back to the
/// built-in settings when `base_dir` has neither `defaults/` nor `config/`.
pub fn load_config_or_default(base_dir: &Path) -> Result<Config, ConfigError> {
    if !base_dir.join("defaults").exists() && !base_dir.join("config").exists() {
        warn!(
            "no defaults/ or config/ directory in {}; using built-in settings",
            base_dir.display()
        );
        return Ok(Config::default());
    }
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let w = &config.engine.weights;
    let weight_fields: &[(&str, f64)] = &[
        ("weights.game_knowledge", w.game_knowledge),
        ("weights.goal_scoring", w.goal_scoring),
        ("weights.attack", w.attack),
        ("weights.midfield", w.midfield),
        ("weights.defense", w.defense),
        ("weights.fitness", w.fitness),
    ];
    for (name, val) in weight_fields {
        if !val.is_finite() || *val <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    let range = config.engine.fudge_range;
    if !(0.0..=MAX_FUDGE_RANGE).contains(&range) {
        return Err(ConfigError::ValidationError {
            field: "fudge.range".into(),
            message: format!("must be between 0 and {MAX_FUDGE_RANGE}, got {range}"),
        });
    }

    let teams = config.default_teams;
    if !(2..=MAX_TEAMS as usize).contains(&teams) {
        return Err(ConfigError::ValidationError {
            field: "teams.default_count".into(),
            message: format!("must be between 2 and {MAX_TEAMS}, got {teams}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
