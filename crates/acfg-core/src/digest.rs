//! # Fingerprints — Content-Derived Identity of a Value
//!
//! A [`Fingerprint`] is the SHA-256 digest of a value's [`CanonicalBytes`].
//! [`fingerprint()`] accepts only `&CanonicalBytes`, so every fingerprint in
//! the workspace is computed over canonicalized content.

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// Algorithm tag rendered in front of the hex digest.
const ALGORITHM: &str = "sha256";

/// SHA-256 digest of a value's canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{ALGORITHM}:{}", self.to_hex())
    }
}

/// Compute the fingerprint of canonical bytes.
pub fn fingerprint(data: &CanonicalBytes) -> Fingerprint {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Fingerprint(bytes)
}
