pub mod error;
pub mod options;
pub mod outcome;
pub mod record;
pub mod schema;

pub use error::{DedupError, Result};
pub use options::{DEFAULT_PROGRESS_INTERVAL, DedupOptions, Threshold};
pub use outcome::{
    ClassifiedRecord, DedupReport, MATCH_METHOD_FIELD, MATCH_SCORE_FIELD, MATCHED_ADDRESS_FIELD,
    MATCHED_FULL_NAME_FIELD, MatchMethod, MatchResult, MethodCounts,
};
pub use record::Record;
pub use schema::{DatasetSchemas, Role, Schema};
