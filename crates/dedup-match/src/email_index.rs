//! Exact email lookup over the master dataset.

use std::collections::HashMap;

use dedup_model::{Record, Role, Schema};

use crate::normalize::split_emails;

/// Normalized email address to the master rows listing it, in master order.
#[derive(Debug, Clone, Default)]
pub struct EmailIndex {
    rows: HashMap<String, Vec<usize>>,
}

impl EmailIndex {
    /// Index every address of every master record.
    ///
    /// A master cell may hold several comma-separated addresses; each one maps
    /// to the same row.
    pub fn build(master: &[Record], schema: &Schema) -> Self {
        let mut rows: HashMap<String, Vec<usize>> = HashMap::new();
        for (row, record) in master.iter().enumerate() {
            for email in split_emails(schema.value(record, Role::Email)) {
                rows.entry(email).or_default().push(row);
            }
        }
        Self { rows }
    }

    /// Master rows indexed under an already-normalized address.
    pub fn rows(&self, email: &str) -> &[usize] {
        self.rows.get(email).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First master row for the first address in `raw` that is indexed.
    pub fn lookup(&self, raw: &str) -> Option<usize> {
        split_emails(raw).find_map(|email| self.rows(&email).first().copied())
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
