//! Error taxonomy for snapshot generation.
//!
//! Each stage has its own error type; [`GenerateError`] tags which stage
//! failed. Nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

use acfg_client::FetchError;

/// Metadata was fetched but cannot yield a consistent ruleset.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DerivationError {
    #[error("server declares no operation statuses")]
    NoOperationStatuses,

    #[error("server declares no successful operation status")]
    NoSuccessfulStatus,

    #[error("operation status {status:?} is declared both successful and unsuccessful")]
    ConflictingOperationStatus { status: String },

    #[error("error code {code} is declared more than once with different content")]
    DuplicateErrorCode { code: i32 },

    #[error("currency {symbol:?} is declared with conflicting decimals {first} and {second}")]
    ConflictingCurrency {
        symbol: String,
        first: i32,
        second: i32,
    },

    #[error("currency {symbol:?} is declared with conflicting metadata")]
    ConflictingCurrencyMetadata { symbol: String },

    #[error("genesis block index {genesis} is after current block index {current}")]
    GenesisAfterCurrent { genesis: i64, current: i64 },
}

/// An artifact could not be loaded as a ruleset.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid ruleset JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{field} is not sorted: {label:?} follows {previous:?}")]
    Unsorted {
        field: &'static str,
        previous: String,
        label: String,
    },

    #[error("{field} lists {label:?} more than once")]
    DuplicateLabel { field: &'static str, label: String },

    #[error("allowed_errors lists code {code} more than once")]
    DuplicateErrorCode { code: i32 },
}

/// The rendered ruleset could not be durably written.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("parent directory of {path} does not exist")]
    MissingParent { path: PathBuf },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Terminal failure of a generator run, tagged by stage.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("bootstrap error: {0}")]
    Bootstrap(#[from] FetchError),

    #[error("derivation error: {0}")]
    Derivation(#[from] DerivationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("serialization error: {0}")]
    Canonicalization(#[from] acfg_core::CanonicalizationError),

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}
