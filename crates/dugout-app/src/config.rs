// Configuration loading and parsing (dugout.toml).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use dugout_core::optimizer::{RosterRequirements, DEFAULT_SALARY_CAP};
use dugout_core::stats::types::FieldingPosition;

use crate::source::LineupSource;

/// Default tracing filter when neither `RUST_LOG` nor `[logging] filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "dugout_core=info,dugout_app=info,warn";

const CONFIG_FILE: &str = "dugout.toml";

/// First season with recorded statistics.
const FIRST_SEASON: u16 = 1871;
const LAST_SEASON: u16 = 2100;

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
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub season: u16,
    pub data: DataConfig,
    pub lineups: LineupSource,
    pub contest: ContestConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContestConfig {
    pub salary_cap: u32,
    pub roster: RosterRequirements,
}

// ---------------------------------------------------------------------------
// dugout.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DugoutFile {
    season: SeasonSection,
    data: DataConfig,
    lineups: LineupSection,
    #[serde(default)]
    contest: ContestSection,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct SeasonSection {
    year: u16,
}

/// Paths to the historical stat tree and the optimizer input document.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub stats_dir: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SourceKind {
    File,
    Url,
}

#[derive(Debug, Clone, Deserialize)]
struct LineupSection {
    source: SourceKind,
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContestSection {
    #[serde(default = "default_salary_cap")]
    salary_cap: u32,
    /// Position class code (`"P"`, `"1B"`, `"OF"`, ...) to slot count.
    #[serde(default)]
    roster: BTreeMap<String, u32>,
}

impl Default for ContestSection {
    fn default() -> Self {
        ContestSection {
            salary_cap: DEFAULT_SALARY_CAP,
            roster: BTreeMap::new(),
        }
    }
}

fn default_salary_cap() -> u32 {
    DEFAULT_SALARY_CAP
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
            dir: default_log_dir(),
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/dugout.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: DugoutFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate_season(file.season.year)?;
    let lineups = lineup_source(&file.lineups)?;
    let contest = contest(&file.contest)?;

    Ok(Config {
        season: file.season.year,
        data: file.data,
        lineups,
        contest,
        logging: file.logging,
    })
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

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
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // Never overwrite a user's edited config.
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_season(year: u16) -> Result<(), ConfigError> {
    if !(FIRST_SEASON..=LAST_SEASON).contains(&year) {
        return Err(invalid(
            "season.year",
            format!("must be between {FIRST_SEASON} and {LAST_SEASON}, got {year}"),
        ));
    }
    Ok(())
}

fn lineup_source(section: &LineupSection) -> Result<LineupSource, ConfigError> {
    match section.source {
        SourceKind::File => match &section.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(LineupSource::File(path.clone())),
            _ => Err(invalid("lineups.path", "required when source = \"file\"")),
        },
        SourceKind::Url => match section.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(LineupSource::Url(url.to_string())),
            _ => Err(invalid("lineups.url", "required when source = \"url\"")),
        },
    }
}

fn contest(section: &ContestSection) -> Result<ContestConfig, ConfigError> {
    if section.salary_cap == 0 {
        return Err(invalid("contest.salary_cap", "must be greater than 0"));
    }

    let roster = if section.roster.is_empty() {
        RosterRequirements::default()
    } else {
        let mut slots = BTreeMap::new();
        for (code, &count) in &section.roster {
            let field = format!("contest.roster.{code}");
            let position = FieldingPosition::from_code(code)
                .ok_or_else(|| invalid(field.as_str(), "unknown position class"))?;
            if count == 0 {
                return Err(invalid(field, "must be > 0"));
            }
            if slots.insert(position, count).is_some() {
                return Err(invalid(
                    field,
                    format!("duplicates the {position} slot count"),
                ));
            }
        }
        RosterRequirements { slots }
    };

    Ok(ContestConfig {
        salary_cap: section.salary_cap,
        roster,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
