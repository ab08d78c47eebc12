use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::schema::{Role, Schema};

pub const MATCH_METHOD_FIELD: &str = "_matchMethod";
pub const MATCH_SCORE_FIELD: &str = "_matchScore";
pub const MATCHED_FULL_NAME_FIELD: &str = "_matchedFullName";
pub const MATCHED_ADDRESS_FIELD: &str = "_matchedAddress";

/// Cascade stage that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Email,
    Name,
    Address,
}

impl MatchMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Address => "address",
        }
    }

    /// Small-schema field whose value triggered a match of this kind.
    pub fn trigger_field(self, small: &Schema) -> Option<&str> {
        match self {
            Self::Email => small.field(Role::Email),
            Self::Name => small.field(Role::Name),
            Self::Address => small.field(Role::AddressLine(0)),
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of running the cascade on one small record.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    NoMatch,
    Matched {
        method: MatchMethod,
        /// Rounded similarity; `None` for exact email matches.
        score: Option<f64>,
        /// Index of the matched record in the master dataset.
        master_row: usize,
    },
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn method(&self) -> Option<MatchMethod> {
        match self {
            Self::Matched { method, .. } => Some(*method),
            Self::NoMatch => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Matched { score, .. } => *score,
            Self::NoMatch => None,
        }
    }

    pub fn master_row(&self) -> Option<usize> {
        match self {
            Self::Matched { master_row, .. } => Some(*master_row),
            Self::NoMatch => None,
        }
    }

    /// Score with two decimals, or `""` when there is none.
    pub fn score_label(&self) -> String {
        self.score().map(|score| format!("{score:.2}")).unwrap_or_default()
    }
}

/// A small record with its cascade outcome and the matched master details.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    /// Position of the record in the small dataset (0-based).
    pub row: usize,
    pub record: Record,
    pub result: MatchResult,
    pub matched_customer_id: String,
    pub matched_full_name: String,
    /// Concatenated master address; only filled for address matches.
    pub matched_address: String,
}

impl ClassifiedRecord {
    /// Flatten into the exported duplicate row.
    ///
    /// The matched customer id leads under `customer_field` (skipped when the
    /// master schema has none), followed by the original fields and the
    /// match annotations.
    pub fn to_output_record(&self, customer_field: Option<&str>) -> Record {
        let mut out = Record::new();
        if let Some(field) = customer_field {
            out.insert(field, self.matched_customer_id.as_str());
        }
        for (field, value) in self.record.fields() {
            out.insert(field, value);
        }
        out.insert(
            MATCH_METHOD_FIELD,
            self.result.method().map(MatchMethod::as_str).unwrap_or(""),
        );
        out.insert(MATCH_SCORE_FIELD, self.result.score_label());
        out.insert(MATCHED_FULL_NAME_FIELD, self.matched_full_name.as_str());
        out.insert(MATCHED_ADDRESS_FIELD, self.matched_address.as_str());
        out
    }
}

/// Per-method duplicate counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCounts {
    pub email: usize,
    pub name: usize,
    pub address: usize,
}

impl MethodCounts {
    pub fn total(&self) -> usize {
        self.email + self.name + self.address
    }
}

/// Classified output of a full run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupReport {
    pub duplicates: Vec<ClassifiedRecord>,
    pub non_duplicates: Vec<Record>,
    /// Small records dropped because their name was blank.
    pub skipped_blank_names: usize,
    /// Size of the small dataset.
    pub total: usize,
}

impl DedupReport {
    pub fn method_counts(&self) -> MethodCounts {
        let mut counts = MethodCounts::default();
        for duplicate in &self.duplicates {
            match duplicate.result.method() {
                Some(MatchMethod::Email) => counts.email += 1,
                Some(MatchMethod::Name) => counts.name += 1,
                Some(MatchMethod::Address) => counts.address += 1,
                None => {}
            }
        }
        counts
    }

    /// Records that went through the cascade.
    pub fn classified(&self) -> usize {
        self.duplicates.len() + self.non_duplicates.len()
    }
}
