//! Three-stage match cascade: exact email, fuzzy name, gated fuzzy address.
//!
//! Stages run in a fixed order and the first one that matches decides the
//! outcome. Both fuzzy stages keep the highest-scoring master record and break
//! ties in favor of the record that comes first in master order, so the
//! master dataset must never be reordered.

use dedup_model::{DatasetSchemas, MatchMethod, MatchResult, Record, Role, Threshold};
use tracing::trace;

use crate::email_index::EmailIndex;
use crate::normalize::{concat_address, leading_number, normalize_name};
use crate::similarity::{round_score, similarity};

/// Geographic roles that gate address candidates.
const GATE_ROLES: [Role; 3] = [Role::Country, Role::Zip, Role::State];

/// Comparison keys derived once per master record.
#[derive(Debug, Clone)]
struct MasterKeys {
    name: String,
    address: String,
}

impl MasterKeys {
    fn house_number(&self) -> Option<&str> {
        leading_number(&self.address)
    }
}

/// Classifies small records against a fixed master dataset.
#[derive(Debug)]
pub struct MatchEngine<'a> {
    master: &'a [Record],
    schemas: &'a DatasetSchemas,
    threshold: Threshold,
    email_index: EmailIndex,
    keys: Vec<MasterKeys>,
}

impl<'a> MatchEngine<'a> {
    /// Build the email index and per-record keys for `master`.
    pub fn new(master: &'a [Record], schemas: &'a DatasetSchemas, threshold: Threshold) -> Self {
        let email_index = EmailIndex::build(master, &schemas.master);
        let keys = master
            .iter()
            .map(|record| MasterKeys {
                name: normalize_name(schemas.master.value(record, Role::Name)),
                address: concat_address(record, &schemas.master).to_lowercase(),
            })
            .collect();
        Self {
            master,
            schemas,
            threshold,
            email_index,
            keys,
        }
    }

    pub fn schemas(&self) -> &DatasetSchemas {
        self.schemas
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn email_index(&self) -> &EmailIndex {
        &self.email_index
    }

    /// Master record at `row`.
    pub fn master_record(&self, row: usize) -> Option<&'a Record> {
        self.master.get(row)
    }

    /// Run the cascade on one small record.
    ///
    /// Callers are expected to skip records with a blank name; see
    /// [`crate::deduplicate`].
    pub fn classify(&self, small: &Record) -> MatchResult {
        self.match_email(small)
            .or_else(|| self.match_name(small))
            .or_else(|| self.match_address(small))
            .unwrap_or(MatchResult::NoMatch)
    }

    /// Stage 1: exact, case-insensitive email lookup. Never scored.
    pub fn match_email(&self, small: &Record) -> Option<MatchResult> {
        let raw = self.schemas.small.value(small, Role::Email);
        let master_row = self.email_index.lookup(raw)?;
        trace!(master_row, "email stage matched");
        Some(MatchResult::Matched {
            method: MatchMethod::Email,
            score: None,
            master_row,
        })
    }

    /// Stage 2: best normalized-name similarity across every master record.
    pub fn match_name(&self, small: &Record) -> Option<MatchResult> {
        let target = normalize_name(self.schemas.small.value(small, Role::Name));
        let scored = self
            .keys
            .iter()
            .enumerate()
            .map(|(row, keys)| (row, similarity(&target, &keys.name)));
        self.accept(MatchMethod::Name, best_candidate(scored))
    }

    /// Stage 3: best address similarity among geographically eligible master
    /// records sharing the small record's house number.
    pub fn match_address(&self, small: &Record) -> Option<MatchResult> {
        let gates: Vec<(Role, &str)> = GATE_ROLES
            .iter()
            .map(|role| (*role, self.schemas.small.value(small, *role).trim()))
            .filter(|(_, value)| !value.is_empty())
            .collect();
        let address = concat_address(small, &self.schemas.small).to_lowercase();
        let house_number = leading_number(&address)?;

        let scored = self
            .master
            .iter()
            .zip(&self.keys)
            .enumerate()
            .filter(|(_, (record, _))| {
                gates
                    .iter()
                    .all(|(role, value)| self.schemas.master.value(record, *role).trim() == *value)
            })
            .filter(|(_, (_, keys))| keys.house_number() == Some(house_number))
            .map(|(row, (_, keys))| (row, similarity(&address, &keys.address)));
        self.accept(MatchMethod::Address, best_candidate(scored))
    }

    fn accept(&self, method: MatchMethod, best: Option<(usize, f64)>) -> Option<MatchResult> {
        let (master_row, score) = best?;
        if score < self.threshold.value() {
            trace!(%method, master_row, score, "best candidate below threshold");
            return None;
        }
        trace!(%method, master_row, score, "fuzzy stage matched");
        Some(MatchResult::Matched {
            method,
            score: Some(round_score(score)),
            master_row,
        })
    }
}

/// Highest-scoring `(row, score)`, keeping the earliest row on ties.
///
/// Scores of zero never produce a candidate.
fn best_candidate<I>(scored: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut best_score = 0.0;
    let mut best_row = None;
    for (row, score) in scored {
        if score > best_score {
            best_score = score;
            best_row = Some(row);
        }
    }
    best_row.map(|row| (row, best_score))
}
