//! # acfg-core — Canonical Structural Equality
//!
//! Decides whether two arbitrarily nested JSON-like values represent the
//! same logical value, independent of mapping key order or the map type
//! that produced them.
//!
//! ## Pipeline
//!
//! 1. Any input is lowered into [`CanonicalValue`], a closed tagged variant
//!    over null, booleans, numbers, strings, sequences and mappings.
//! 2. [`CanonicalBytes::new()`] encodes the value per RFC 8785: mapping keys
//!    sorted, sequences kept in order, compact separators.
//! 3. [`fingerprint()`] hashes the canonical bytes with SHA-256.
//! 4. [`equal()`] compares fingerprints.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `acfg-*` crates.
//! - Inputs are never mutated; every function here is pure.
//! - No `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod equality;
pub mod error;
pub mod value;

pub use canonical::CanonicalBytes;
pub use digest::{fingerprint, Fingerprint};
pub use equality::{equal, equivalent};
pub use error::CanonicalizationError;
pub use value::CanonicalValue;
