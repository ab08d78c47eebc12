//! Loading of input records and run configuration.

pub mod config;
pub mod error;
pub mod records;

pub use config::{
    CONFIG_ENV_VAR, DedupConfig, config_path_from_env, load_config, load_config_or_default,
    parse_config,
};
pub use error::{IngestError, Result};
pub use records::{RecordSet, read_records, read_records_from_reader};
