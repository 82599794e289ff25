//! # Canonical Equality
//!
//! Two values are equal when their fingerprints match. Mapping key order
//! never affects the result; sequence order and scalar type always do.

use serde::Serialize;

use crate::canonical::CanonicalBytes;
use crate::digest::fingerprint;
use crate::error::CanonicalizationError;
use crate::value::CanonicalValue;

/// Report whether two canonical values represent the same logical value.
///
/// Total and reflexive. A `CanonicalValue` has string keys and finite
/// numbers only, so JCS encoding does not fail for it; if it ever did, the
/// values are compared structurally instead of by fingerprint.
pub fn equal(a: &CanonicalValue, b: &CanonicalValue) -> bool {
    equal_with(a, b, CanonicalBytes::new)
}

fn equal_with(
    a: &CanonicalValue,
    b: &CanonicalValue,
    encode: impl Fn(&CanonicalValue) -> Result<CanonicalBytes, CanonicalizationError>,
) -> bool {
    match (encode(a), encode(b)) {
        (Ok(x), Ok(y)) => fingerprint(&x) == fingerprint(&y),
        _ => a == b,
    }
}

/// Compare any two serializable values canonically.
///
/// The values need not share a Rust type: a struct and a `serde_json::Value`
/// holding the same fields in another order are equivalent.
///
/// # Errors
///
/// Returns [`CanonicalizationError`] if either value cannot be represented
/// as JSON.
pub fn equivalent(a: &impl Serialize, b: &impl Serialize) -> Result<bool, CanonicalizationError> {
    let a = CanonicalValue::from_serialize(a)?;
    let b = CanonicalValue::from_serialize(b)?;
    Ok(equal(&a, &b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cv(v: serde_json::Value) -> CanonicalValue {
        v.into()
    }

    #[test]
    fn number_and_string_differ() {
        assert!(!equal(&cv(json!(5)), &cv(json!("5"))));
    }

    #[test]
    fn bool_and_number_differ() {
        assert!(!equal(&cv(json!(true)), &cv(json!(1))));
    }

    #[test]
    fn null_and_empty_containers_differ() {
        assert!(!equal(&cv(json!(null)), &cv(json!({}))));
        assert!(!equal(&cv(json!([])), &cv(json!({}))));
    }

    #[test]
    fn key_order_is_ignored() {
        let a: CanonicalValue = serde_json::from_str(r#"{"b": {"y": 1, "x": 2}, "a": [1]}"#).unwrap();
        let b: CanonicalValue = serde_json::from_str(r#"{"a": [1], "b": {"x": 2, "y": 1}}"#).unwrap();
        assert!(equal(&a, &b));
    }

    #[test]
    fn sequence_order_matters() {
        let a = cv(json!([{"code": 1, "message": "a"}, {"code": 2, "message": "b"}]));
        let b = cv(json!([{"code": 2, "message": "b"}, {"code": 1, "message": "a"}]));
        assert!(!equal(&a, &b));
    }

    #[test]
    fn integral_float_equals_integer() {
        assert!(equal(&cv(json!(1.0)), &cv(json!(1))));
    }

    #[test]
    fn encoder_failure_keeps_reflexivity() {
        let failing = |_: &CanonicalValue| -> Result<CanonicalBytes, CanonicalizationError> {
            Err(serde_json::from_str::<u8>("x").unwrap_err().into())
        };
        let a = cv(json!({"b": [1, 2], "a": null}));
        let b = cv(json!({"a": null, "b": [1, 2]}));
        assert!(equal_with(&a, &a, failing));
        assert!(equal_with(&a, &b, failing));
        assert!(!equal_with(&a, &cv(json!({"a": null, "b": [2, 1]})), failing));
    }

    #[test]
    fn equivalent_across_types() {
        #[derive(Serialize)]
        struct Status {
            status: &'static str,
            successful: bool,
        }
        let typed = Status { status: "SUCCESS", successful: true };
        let dynamic = json!({"successful": true, "status": "SUCCESS"});
        assert!(equivalent(&typed, &dynamic).unwrap());
    }

    #[test]
    fn equivalent_detects_difference() {
        assert!(!equivalent(&json!({"a": 1}), &json!({"a": 1, "b": null})).unwrap());
    }
}
