//! # Ruleset Derivation
//!
//! A pure function from [`RemoteMetadata`] to [`ValidationRuleset`]. Sets
//! are collected into ordered collections so the output never depends on
//! hash iteration order.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use acfg_client::types::OperationStatus;
use acfg_client::RemoteMetadata;

use crate::error::DerivationError;
use crate::ruleset::{AllowedError, CurrencyDescriptor, ValidationRuleset};

/// Derive the ruleset for the metadata's selected network.
///
/// Exact duplicates in the server's declarations are collapsed (the first
/// occurrence keeps its position); contradictory duplicates are errors. Two
/// currencies with one symbol must agree on both decimals and metadata.
pub fn derive_ruleset(meta: &RemoteMetadata) -> Result<ValidationRuleset, DerivationError> {
    let genesis = &meta.status.genesis_block_identifier;
    let current = &meta.status.current_block_identifier;
    if genesis.index > current.index {
        return Err(DerivationError::GenesisAfterCurrent {
            genesis: genesis.index,
            current: current.index,
        });
    }

    let allow = &meta.options.allow;
    Ok(ValidationRuleset {
        network_identifier: meta.network.clone(),
        genesis_block_identifier: genesis.clone(),
        allowed_operation_statuses: operation_statuses(&allow.operation_statuses)?,
        allowed_errors: allowed_errors(&allow.errors)?,
        allowed_operation_types: allow
            .operation_types
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        allowed_currencies: currencies(&allow.currencies)?,
        allowed_timestamp_start_index: allow.timestamp_start_index,
        historical_balance_lookup: allow.historical_balance_lookup,
    })
}

fn operation_statuses(
    declared: &[OperationStatus],
) -> Result<Vec<OperationStatus>, DerivationError> {
    let mut by_label: BTreeMap<&str, bool> = BTreeMap::new();
    for s in declared {
        match by_label.entry(s.status.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(s.successful);
            }
            Entry::Occupied(slot) if *slot.get() != s.successful => {
                return Err(DerivationError::ConflictingOperationStatus {
                    status: s.status.clone(),
                });
            }
            Entry::Occupied(_) => {}
        }
    }

    if by_label.is_empty() {
        return Err(DerivationError::NoOperationStatuses);
    }
    if !by_label.values().any(|successful| *successful) {
        return Err(DerivationError::NoSuccessfulStatus);
    }

    Ok(by_label
        .into_iter()
        .map(|(status, successful)| OperationStatus::new(status, successful))
        .collect())
}

fn allowed_errors(
    declared: &[acfg_client::types::Error],
) -> Result<Vec<AllowedError>, DerivationError> {
    let mut out: Vec<AllowedError> = Vec::with_capacity(declared.len());
    let mut position: BTreeMap<i32, usize> = BTreeMap::new();
    for e in declared {
        let entry = AllowedError {
            code: e.code,
            message: e.message.clone(),
            retriable: e.retriable,
        };
        match position.get(&e.code) {
            Some(&i) if out[i] == entry => {}
            Some(_) => return Err(DerivationError::DuplicateErrorCode { code: e.code }),
            None => {
                position.insert(e.code, out.len());
                out.push(entry);
            }
        }
    }
    Ok(out)
}

fn currencies(
    declared: &[acfg_client::types::Currency],
) -> Result<BTreeMap<String, CurrencyDescriptor>, DerivationError> {
    let mut out = BTreeMap::new();
    for c in declared {
        match out.entry(c.symbol.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(CurrencyDescriptor {
                    decimals: c.decimals,
                    metadata: c.metadata.clone(),
                });
            }
            Entry::Occupied(slot) => {
                let first: &CurrencyDescriptor = slot.get();
                if first.decimals != c.decimals {
                    return Err(DerivationError::ConflictingCurrency {
                        symbol: c.symbol.clone(),
                        first: first.decimals,
                        second: c.decimals,
                    });
                }
                if first.metadata != c.metadata {
                    return Err(DerivationError::ConflictingCurrencyMetadata {
                        symbol: c.symbol.clone(),
                    });
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acfg_client::types::{
        Allow, BlockIdentifier, Currency, Error, NetworkIdentifier, NetworkOptionsResponse,
        NetworkStatusResponse, Version,
    };

    fn metadata(allow: Allow) -> RemoteMetadata {
        let network = NetworkIdentifier::new("bitcoin", "mainnet");
        RemoteMetadata {
            networks: vec![network.clone()],
            network,
            status: NetworkStatusResponse {
                current_block_identifier: BlockIdentifier {
                    index: 10,
                    hash: "h10".into(),
                },
                current_block_timestamp: 0,
                genesis_block_identifier: BlockIdentifier {
                    index: 0,
                    hash: "h0".into(),
                },
                oldest_block_identifier: None,
                peers: vec![],
            },
            options: NetworkOptionsResponse {
                version: Version {
                    rosetta_version: "1.4.0".into(),
                    node_version: "1.0.0".into(),
                    middleware_version: None,
                    metadata: None,
                },
                allow,
            },
        }
    }

    fn base_allow() -> Allow {
        Allow {
            operation_statuses: vec![
                OperationStatus::new("SUCCESS", true),
                OperationStatus::new("FAILURE", false),
            ],
            operation_types: vec!["TRANSFER".into()],
            errors: vec![Error::new(1, "not found", false)],
            ..Allow::default()
        }
    }

    #[test]
    fn statuses_are_sorted_by_label() {
        let r = derive_ruleset(&metadata(base_allow())).unwrap();
        let labels: Vec<_> = r.allowed_operation_statuses.iter().map(|s| s.status.as_str()).collect();
        assert_eq!(labels, ["FAILURE", "SUCCESS"]);
    }

    #[test]
    fn errors_keep_source_order() {
        let mut allow = base_allow();
        allow.errors = vec![
            Error::new(5, "five", false),
            Error::new(2, "two", true),
            Error::new(9, "nine", false),
        ];
        let r = derive_ruleset(&metadata(allow)).unwrap();
        let codes: Vec<_> = r.allowed_errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, [5, 2, 9]);
    }

    #[test]
    fn error_description_and_details_are_dropped() {
        let mut allow = base_allow();
        allow.errors[0].description = Some("long text".into());
        allow.errors[0].details = Some(serde_json::json!({"k": 1}));
        let r = derive_ruleset(&metadata(allow)).unwrap();
        assert_eq!(
            r.allowed_errors,
            vec![AllowedError {
                code: 1,
                message: "not found".into(),
                retriable: false
            }]
        );
    }

    #[test]
    fn operation_types_are_deduplicated_and_sorted() {
        let mut allow = base_allow();
        allow.operation_types = vec!["TRANSFER".into(), "FEE".into(), "TRANSFER".into()];
        let r = derive_ruleset(&metadata(allow)).unwrap();
        assert_eq!(r.allowed_operation_types, ["FEE", "TRANSFER"]);
    }

    #[test]
    fn exact_duplicates_collapse() {
        let mut allow = base_allow();
        allow.operation_statuses.push(OperationStatus::new("SUCCESS", true));
        allow.errors.push(Error::new(1, "not found", false));
        allow.currencies = vec![Currency::new("BTC", 8), Currency::new("BTC", 8)];
        let r = derive_ruleset(&metadata(allow)).unwrap();
        assert_eq!(r.allowed_operation_statuses.len(), 2);
        assert_eq!(r.allowed_errors.len(), 1);
        assert_eq!(r.allowed_currencies.len(), 1);
    }

    #[test]
    fn conflicting_status_is_rejected() {
        let mut allow = base_allow();
        allow.operation_statuses.push(OperationStatus::new("FAILURE", true));
        assert_eq!(
            derive_ruleset(&metadata(allow)),
            Err(DerivationError::ConflictingOperationStatus {
                status: "FAILURE".into()
            })
        );
    }

    #[test]
    fn empty_statuses_are_rejected() {
        let mut allow = base_allow();
        allow.operation_statuses.clear();
        assert_eq!(
            derive_ruleset(&metadata(allow)),
            Err(DerivationError::NoOperationStatuses)
        );
    }

    #[test]
    fn all_unsuccessful_statuses_are_rejected() {
        let mut allow = base_allow();
        allow.operation_statuses = vec![OperationStatus::new("FAILURE", false)];
        assert_eq!(
            derive_ruleset(&metadata(allow)),
            Err(DerivationError::NoSuccessfulStatus)
        );
    }

    #[test]
    fn reused_error_code_is_rejected() {
        let mut allow = base_allow();
        allow.errors.push(Error::new(1, "gone", false));
        assert_eq!(
            derive_ruleset(&metadata(allow)),
            Err(DerivationError::DuplicateErrorCode { code: 1 })
        );
    }

    #[test]
    fn conflicting_currency_is_rejected() {
        let mut allow = base_allow();
        allow.currencies = vec![Currency::new("ETH", 18), Currency::new("ETH", 9)];
        assert_eq!(
            derive_ruleset(&metadata(allow)),
            Err(DerivationError::ConflictingCurrency {
                symbol: "ETH".into(),
                first: 18,
                second: 9
            })
        );
    }

    #[test]
    fn currency_metadata_conflict_is_rejected() {
        let mut allow = base_allow();
        let mut tagged = Currency::new("USDC", 6);
        tagged.metadata = Some(serde_json::json!({"contract": "0xabc"}));
        allow.currencies = vec![Currency::new("USDC", 6), tagged];
        assert_eq!(
            derive_ruleset(&metadata(allow)),
            Err(DerivationError::ConflictingCurrencyMetadata {
                symbol: "USDC".into()
            })
        );
    }

    #[test]
    fn genesis_after_current_is_rejected() {
        let mut meta = metadata(base_allow());
        meta.status.genesis_block_identifier.index = 11;
        assert_eq!(
            derive_ruleset(&meta),
            Err(DerivationError::GenesisAfterCurrent {
                genesis: 11,
                current: 10
            })
        );
    }

    #[test]
    fn currencies_and_flags_carry_over() {
        let mut allow = base_allow();
        let mut usdc = Currency::new("USDC", 6);
        usdc.metadata = Some(serde_json::json!({"contract": "0xabc"}));
        allow.currencies = vec![usdc, Currency::new("ETH", 18)];
        allow.timestamp_start_index = Some(4);
        allow.historical_balance_lookup = true;
        let r = derive_ruleset(&metadata(allow)).unwrap();
        let symbols: Vec<_> = r.allowed_currencies.keys().map(String::as_str).collect();
        assert_eq!(symbols, ["ETH", "USDC"]);
        assert_eq!(r.allowed_currencies["USDC"].decimals, 6);
        assert_eq!(r.allowed_timestamp_start_index, Some(4));
        assert!(r.historical_balance_lookup);
    }

    #[test]
    fn derivation_is_pure() {
        let meta = metadata(base_allow());
        assert_eq!(derive_ruleset(&meta), derive_ruleset(&meta));
    }
}
