//! # Validation Ruleset
//!
//! The artifact. Field declaration order is the serialized field order, so
//! reordering fields here changes every artifact on disk.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use acfg_client::types::{BlockIdentifier, NetworkIdentifier, OperationStatus};

use crate::error::ParseError;

/// Static description of what a response validator must accept.
///
/// # Invariants
///
/// - `allowed_operation_statuses` is unique by label and sorted by label.
/// - `allowed_errors` is unique by code, in the order the server listed them.
/// - `allowed_operation_types` is unique and sorted.
/// - `allowed_currencies` is keyed by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRuleset {
    pub network_identifier: NetworkIdentifier,
    pub genesis_block_identifier: BlockIdentifier,
    pub allowed_operation_statuses: Vec<OperationStatus>,
    pub allowed_errors: Vec<AllowedError>,
    pub allowed_operation_types: Vec<String>,
    #[serde(default)]
    pub allowed_currencies: BTreeMap<String, CurrencyDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_timestamp_start_index: Option<i64>,
    #[serde(default)]
    pub historical_balance_lookup: bool,
}

/// An error code the validator accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedError {
    pub code: i32,
    pub message: String,
    pub retriable: bool,
}

/// Precision of a currency, keyed by symbol in the ruleset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyDescriptor {
    pub decimals: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ValidationRuleset {
    /// Check the invariants listed on the type. Rulesets produced by
    /// derivation always hold them; a loaded artifact may not.
    pub fn validate(&self) -> Result<(), ParseError> {
        strictly_sorted(
            "allowed_operation_statuses",
            self.allowed_operation_statuses.iter().map(|s| s.status.as_str()),
        )?;
        strictly_sorted(
            "allowed_operation_types",
            self.allowed_operation_types.iter().map(String::as_str),
        )?;

        let mut codes = BTreeSet::new();
        for e in &self.allowed_errors {
            if !codes.insert(e.code) {
                return Err(ParseError::DuplicateErrorCode { code: e.code });
            }
        }
        Ok(())
    }

    /// Look up whether `status` counts as successful.
    pub fn status_successful(&self, status: &str) -> Option<bool> {
        self.allowed_operation_statuses
            .binary_search_by(|s| s.status.as_str().cmp(status))
            .ok()
            .map(|i| self.allowed_operation_statuses[i].successful)
    }

    pub fn error(&self, code: i32) -> Option<&AllowedError> {
        self.allowed_errors.iter().find(|e| e.code == code)
    }

    pub fn allows_operation_type(&self, operation_type: &str) -> bool {
        self.allowed_operation_types
            .binary_search_by(|t| t.as_str().cmp(operation_type))
            .is_ok()
    }
}

fn strictly_sorted<'a>(
    field: &'static str,
    labels: impl Iterator<Item = &'a str>,
) -> Result<(), ParseError> {
    let mut previous: Option<&str> = None;
    for label in labels {
        match previous {
            Some(p) if p == label => {
                return Err(ParseError::DuplicateLabel {
                    field,
                    label: label.to_string(),
                })
            }
            Some(p) if p > label => {
                return Err(ParseError::Unsorted {
                    field,
                    previous: p.to_string(),
                    label: label.to_string(),
                })
            }
            _ => {}
        }
        previous = Some(label);
    }
    Ok(())
}
