//! # Deterministic Rendering
//!
//! The artifact is human-readable JSON: one field per line, nested values
//! indented by [`INDENT`], fields in struct declaration order, one trailing
//! newline. `serde_json` is built without `preserve_order`, so free-form
//! `metadata` objects render with sorted keys.

use serde::Serialize;

use crate::error::ParseError;
use crate::ruleset::ValidationRuleset;

/// Indentation unit of the rendered artifact.
pub const INDENT: &[u8] = b"  ";

/// Render a ruleset to its artifact bytes.
pub fn render(ruleset: &ValidationRuleset) -> Result<Vec<u8>, serde_json::Error> {
    render_with_indent(ruleset, INDENT)
}

/// Decode artifact bytes with plain `serde_json`, then check the set
/// invariants the lookups on [`ValidationRuleset`] rely on.
pub fn parse(bytes: &[u8]) -> Result<ValidationRuleset, ParseError> {
    let ruleset: ValidationRuleset = serde_json::from_slice(bytes)?;
    ruleset.validate()?;
    Ok(ruleset)
}

fn render_with_indent(value: &impl Serialize, indent: &[u8]) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    out.push(b'\n');
    Ok(out)
}
