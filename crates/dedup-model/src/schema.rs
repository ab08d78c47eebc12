//! Field-role mappings for the master and small datasets.
//!
//! The matching engine never reads a literal column header. It asks a
//! [`Schema`] for the value of a [`Role`], so the same engine runs against
//! exports whose headers differ.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DedupError, Result};
use crate::record::Record;

/// Logical purpose of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Email,
    Name,
    /// Address line by position (0-based) in schema order.
    AddressLine(usize),
    Country,
    Zip,
    State,
    CustomerId,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Name => write!(f, "name"),
            Self::AddressLine(index) => write!(f, "address line {}", index + 1),
            Self::Country => write!(f, "country"),
            Self::Zip => write!(f, "zip"),
            Self::State => write!(f, "state"),
            Self::CustomerId => write!(f, "customer id"),
        }
    }
}

/// Literal field names for each role in one dataset variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// Email field; may hold several comma-separated addresses.
    pub email: String,
    /// Full name field.
    pub name: String,
    /// Address line fields, concatenated in this order.
    pub address_lines: Vec<String>,
    pub country: String,
    pub zip: String,
    pub state: String,
    /// Customer number; only master exports carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl Schema {
    /// Column layout of the master customer export.
    pub fn master_default() -> Self {
        Self {
            email: "Email Addresses".to_string(),
            name: "Full Name".to_string(),
            address_lines: vec![
                "Address Line 1".to_string(),
                "Address Line 2".to_string(),
                "Address Line 3".to_string(),
            ],
            country: "Country ID".to_string(),
            zip: "Zip Code".to_string(),
            state: "State".to_string(),
            customer_id: Some("Customer #".to_string()),
        }
    }

    /// Column layout of the small (incoming) list.
    pub fn small_default() -> Self {
        Self {
            email: "Email Address".to_string(),
            name: "Name".to_string(),
            address_lines: vec![
                "Address 1".to_string(),
                "Address 2".to_string(),
                "Address 3".to_string(),
            ],
            country: "Country ID".to_string(),
            zip: "Postal Code".to_string(),
            state: "State / Region".to_string(),
            customer_id: None,
        }
    }

    /// Literal field name for `role`, if this schema maps it.
    pub fn field(&self, role: Role) -> Option<&str> {
        match role {
            Role::Email => Some(self.email.as_str()),
            Role::Name => Some(self.name.as_str()),
            Role::AddressLine(index) => self.address_lines.get(index).map(String::as_str),
            Role::Country => Some(self.country.as_str()),
            Role::Zip => Some(self.zip.as_str()),
            Role::State => Some(self.state.as_str()),
            Role::CustomerId => self.customer_id.as_deref(),
        }
    }

    /// Value of `role` in `record`; `""` when the role is unmapped or the cell absent.
    pub fn value<'r>(&self, record: &'r Record, role: Role) -> &'r str {
        self.field(role).map_or("", |field| record.get(field))
    }

    /// Every mapped role with its field name, in declaration order.
    pub fn roles(&self) -> Vec<(Role, &str)> {
        let mut roles = vec![(Role::Email, self.email.as_str()), (Role::Name, self.name.as_str())];
        for (index, line) in self.address_lines.iter().enumerate() {
            roles.push((Role::AddressLine(index), line.as_str()));
        }
        roles.push((Role::Country, self.country.as_str()));
        roles.push((Role::Zip, self.zip.as_str()));
        roles.push((Role::State, self.state.as_str()));
        if let Some(customer) = self.customer_id.as_deref() {
            roles.push((Role::CustomerId, customer));
        }
        roles
    }

    /// Check that every role the engine dereferences names a field.
    pub fn validate(&self, dataset: &str) -> Result<()> {
        let invalid = |message: String| DedupError::InvalidSchema {
            dataset: dataset.to_string(),
            message,
        };
        if self.address_lines.is_empty() {
            return Err(invalid("at least one address line is required".to_string()));
        }
        for (role, field) in self.roles() {
            if field.trim().is_empty() {
                return Err(invalid(format!("{role} field name is blank")));
            }
        }
        Ok(())
    }
}

/// The pair of schemas active for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchemas {
    pub master: Schema,
    pub small: Schema,
}

impl Default for DatasetSchemas {
    fn default() -> Self {
        Self {
            master: Schema::master_default(),
            small: Schema::small_default(),
        }
    }
}

impl DatasetSchemas {
    pub fn new(master: Schema, small: Schema) -> Self {
        Self { master, small }
    }

    pub fn validate(&self) -> Result<()> {
        self.master.validate("master")?;
        self.small.validate("small")
    }
}
