//! # Canonical Serialization — RFC 8785 Byte Production
//!
//! `CanonicalBytes` is the sole construction path for bytes that feed a
//! fingerprint. The inner buffer is private and the only constructor takes
//! a [`CanonicalValue`], so no digest can be computed over bytes that skipped
//! canonicalization.
//!
//! Encoding uses `serde_jcs` (JSON Canonicalization Scheme):
//!
//! 1. Mapping keys are sorted by UTF-16 code units.
//! 2. Sequences keep their original element order.
//! 3. Separators are compact; there is no insignificant whitespace.
//! 4. Numbers use the ECMAScript shortest form, so `1` and `1.0` encode
//!    identically while `1` and `"1"` do not.

use crate::error::CanonicalizationError;
use crate::value::CanonicalValue;

/// Bytes produced exclusively by RFC 8785 canonicalization of a
/// [`CanonicalValue`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize a value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::Unrepresentable`] if the JCS encoder
    /// rejects the value. Values built from parsed JSON always encode.
    pub fn new(value: &CanonicalValue) -> Result<Self, CanonicalizationError> {
        let s = serde_jcs::to_string(value)?;
        Ok(Self(s.into_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
