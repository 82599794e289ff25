//! # Snapshot Generator
//!
//! Orchestrates fetch → derive → render → persist. Each stage completes
//! before the next begins, and the output file is touched only after every
//! earlier stage has succeeded.

use std::path::{Path, PathBuf};

use acfg_client::MetadataSource;
use acfg_core::{fingerprint, CanonicalBytes, CanonicalValue, CanonicalizationError, Fingerprint};

use crate::derive::derive_ruleset;
use crate::error::{GenerateError, PersistenceError};
use crate::persist::{persist, FILE_MODE};
use crate::render::render;

/// Result of a successful [`generate()`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    /// Fingerprint of the artifact's decoded content.
    pub fingerprint: Fingerprint,
    pub bytes: usize,
}

/// How an existing artifact compares with a freshly derived one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Byte-identical.
    UpToDate { fingerprint: Fingerprint },
    /// Same content, different bytes (e.g. hand-reformatted).
    Reformatted { fingerprint: Fingerprint },
    /// Different content. `existing` is `None` when the file is not JSON.
    Outdated {
        expected: Fingerprint,
        existing: Option<Fingerprint>,
    },
    /// No file at the path.
    Missing,
}

impl CheckOutcome {
    /// Whether the existing artifact still describes the server.
    pub fn is_current(&self) -> bool {
        matches!(self, Self::UpToDate { .. } | Self::Reformatted { .. })
    }
}

/// Fetch metadata from `source`, derive the ruleset and write it to `output`.
///
/// # Errors
///
/// The returned [`GenerateError`] names the failed stage. On any error
/// `output` is left as it was.
pub async fn generate(
    source: &impl MetadataSource,
    output: &Path,
) -> Result<Snapshot, GenerateError> {
    let bytes = build(source).await?;
    let fingerprint = content_fingerprint(&bytes)?;

    persist(output, &bytes, FILE_MODE)?;

    tracing::info!(path = %output.display(), %fingerprint, bytes = bytes.len(), "wrote configuration");
    Ok(Snapshot {
        path: output.to_path_buf(),
        fingerprint,
        bytes: bytes.len(),
    })
}

/// Derive the ruleset and compare it with the artifact at `output`
/// without writing anything.
pub async fn check(
    source: &impl MetadataSource,
    output: &Path,
) -> Result<CheckOutcome, GenerateError> {
    let expected_bytes = build(source).await?;
    let expected = content_fingerprint(&expected_bytes)?;

    let existing_bytes = match std::fs::read(output) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CheckOutcome::Missing),
        Err(source) => {
            return Err(PersistenceError::Io {
                path: output.to_path_buf(),
                source,
            }
            .into())
        }
    };

    if existing_bytes == expected_bytes {
        return Ok(CheckOutcome::UpToDate {
            fingerprint: expected,
        });
    }

    Ok(match content_fingerprint(&existing_bytes) {
        Ok(existing) if existing == expected => CheckOutcome::Reformatted {
            fingerprint: expected,
        },
        Ok(existing) => CheckOutcome::Outdated {
            expected,
            existing: Some(existing),
        },
        Err(_) => CheckOutcome::Outdated {
            expected,
            existing: None,
        },
    })
}

/// Fetch, derive and render.
async fn build(source: &impl MetadataSource) -> Result<Vec<u8>, GenerateError> {
    let meta = source.fetch_metadata().await?;
    let ruleset = derive_ruleset(&meta)?;
    tracing::info!(
        network = %ruleset.network_identifier,
        statuses = ruleset.allowed_operation_statuses.len(),
        errors = ruleset.allowed_errors.len(),
        operation_types = ruleset.allowed_operation_types.len(),
        currencies = ruleset.allowed_currencies.len(),
        "derived ruleset"
    );

    let bytes = render(&ruleset)?;
    tracing::debug!("configuration:\n{}", String::from_utf8_lossy(&bytes));
    Ok(bytes)
}

/// Fingerprint of the JSON content of `bytes`, independent of layout.
fn content_fingerprint(bytes: &[u8]) -> Result<Fingerprint, CanonicalizationError> {
    let value: CanonicalValue = serde_json::from_slice(bytes)?;
    Ok(fingerprint(&CanonicalBytes::new(&value)?))
}
