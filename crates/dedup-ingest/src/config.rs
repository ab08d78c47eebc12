//! Run configuration loaded from a TOML file.
//!
//! ```toml
//! threshold = 0.9
//! progress_interval = 100
//!
//! [schemas.small]
//! email = "E-mail"
//! name = "Contact"
//! address_lines = ["Street", "Street 2"]
//! country = "Country"
//! zip = "ZIP"
//! state = "Region"
//! ```
//!
//! Every key is optional; a missing schema table keeps the built-in layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use dedup_model::{DEFAULT_PROGRESS_INTERVAL, DatasetSchemas, DedupOptions, Schema, Threshold};

use crate::error::{IngestError, Result};

/// Environment variable naming the config file when no path is given.
pub const CONFIG_ENV_VAR: &str = "DEDUP_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    progress_interval: Option<usize>,
    #[serde(default)]
    schemas: SchemaTables,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaTables {
    #[serde(default)]
    master: Option<Schema>,
    #[serde(default)]
    small: Option<Schema>,
}

/// Schemas and options for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupConfig {
    pub schemas: DatasetSchemas,
    pub options: DedupOptions,
}

impl DedupConfig {
    fn from_file(file: ConfigFile) -> Self {
        let threshold = match file.threshold {
            Some(value) => Threshold::new(value).unwrap_or_else(|| {
                warn!(value, default = Threshold::DEFAULT.value(), "threshold out of range");
                Threshold::DEFAULT
            }),
            None => Threshold::DEFAULT,
        };
        Self {
            schemas: DatasetSchemas {
                master: file.schemas.master.unwrap_or_else(Schema::master_default),
                small: file.schemas.small.unwrap_or_else(Schema::small_default),
            },
            options: DedupOptions {
                threshold,
                progress_interval: file.progress_interval.unwrap_or(DEFAULT_PROGRESS_INTERVAL),
            },
        }
    }
}

/// Path from the environment, if set and non-empty.
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Parse config text; `path` labels errors.
pub fn parse_config(contents: &str, path: &Path) -> Result<DedupConfig> {
    let file: ConfigFile = toml::from_str(contents).map_err(|source| IngestError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    let config = DedupConfig::from_file(file);
    config
        .schemas
        .validate()
        .map_err(|source| IngestError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(config)
}

/// Load the config at `path`.
pub fn load_config(path: &Path) -> Result<DedupConfig> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
    parse_config(&contents, path)
}

/// Load from `path`, else from [`CONFIG_ENV_VAR`], else the built-in defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<DedupConfig> {
    match path.map(Path::to_path_buf).or_else(config_path_from_env) {
        Some(path) => load_config(&path),
        None => Ok(DedupConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<DedupConfig> {
        parse_config(contents, Path::new("test.toml"))
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("").expect("parse empty");
        assert_eq!(config, DedupConfig::default());
    }

    #[test]
    fn out_of_range_threshold_degrades() {
        let config = parse("threshold = 3.0").expect("parse");
        assert_eq!(config.options.threshold, Threshold::DEFAULT);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let error = parse("treshold = 0.9").unwrap_err();
        assert!(matches!(error, IngestError::Toml { .. }));
    }
}
