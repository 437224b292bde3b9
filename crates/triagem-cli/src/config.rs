use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use triagem_instruments::catalog::{CatalogPolicy, DEFAULT_MIN_QUESTIONS};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

const DEFAULT_SESSION_MAX_AGE_HOURS: u32 = 24;
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory found")]
    NoConfigDir,

    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("config is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriagemConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Holds `sessions/` and `history.jsonl`.
    pub data_dir: PathBuf,
    pub min_questions: usize,
    /// Replaces the built-in instruments when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Unfinished sessions older than this are dropped at startup.
    pub session_max_age_hours: u32,
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for TriagemConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: default_data_dir(),
            min_questions: DEFAULT_MIN_QUESTIONS,
            catalog_path: None,
            session_max_age_hours: DEFAULT_SESSION_MAX_AGE_HOURS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl TriagemConfig {
    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir.join("sessions")
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.jsonl")
    }

    pub fn session_max_age(&self) -> jiff::SignedDuration {
        jiff::SignedDuration::from_hours(i64::from(self.session_max_age_hours))
    }

    pub fn catalog_policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            min_questions: self.min_questions,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("triagem"))
        .unwrap_or_else(|| PathBuf::from(".triagem"))
}

/// `<config dir>/triagem/config.json`
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("triagem").join("config.json"))
}

pub fn load_config(path: &Path) -> Result<TriagemConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    Ok(serde_json::from_value(migrated)?)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_or_default(path: &Path) -> Result<TriagemConfig, ConfigError> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(TriagemConfig::default())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 -> v1: catalog policy, session age and log settings were hardcoded.
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        obj.entry("min_questions")
            .or_insert(serde_json::Value::from(DEFAULT_MIN_QUESTIONS));
        obj.entry("session_max_age_hours")
            .or_insert(serde_json::Value::from(DEFAULT_SESSION_MAX_AGE_HOURS));
        obj.entry("log_filter")
            .or_insert(serde_json::Value::from(DEFAULT_LOG_FILTER));
        obj.entry("log_format")
            .or_insert(serde_json::Value::from("text"));
        obj.insert("config_version".to_string(), serde_json::Value::from(1));
        tracing::info!("migrated config v0 -> v1");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &TriagemConfig) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes()).map_err(io_err)?;
    std::fs::rename(&tmp_path, path).map_err(io_err)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
