//! Error types for canonicalization.

use thiserror::Error;

/// Error while lowering a value into canonical form.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The input could not be represented as a JSON-like value
    /// (e.g. a map with non-string keys).
    #[error("value is not representable as canonical JSON: {0}")]
    Unrepresentable(#[from] serde_json::Error),
}
