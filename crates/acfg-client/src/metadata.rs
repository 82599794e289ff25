//! # Remote Metadata
//!
//! [`RemoteMetadata`] bundles the three metadata responses for the network
//! a run targets. It is received once and never mutated.
//!
//! Shape rules enforced on assembly (violations are `FetchError::Malformed`):
//!
//! | Field                                   | Rule                 |
//! |-----------------------------------------|----------------------|
//! | `blockchain`, `network`                 | non-empty            |
//! | block identifier `index` / `hash`       | `>= 0` / non-empty   |
//! | `rosetta_version`, `node_version`       | non-empty            |
//! | operation status label, operation type  | non-empty            |
//! | error `code` / `message`                | `>= 0` / non-empty   |
//! | currency `symbol` / `decimals`          | non-empty / `>= 0`   |
//! | `timestamp_start_index`                 | `>= 0`               |
//!
//! Semantic consistency (duplicates, conflicts) is not checked here; that
//! belongs to ruleset derivation.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::types::{
    BlockIdentifier, NetworkIdentifier, NetworkListResponse, NetworkOptionsResponse,
    NetworkStatusResponse,
};

/// Everything the remote server reports about its capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteMetadata {
    /// Every network the server supports, in server order.
    pub networks: Vec<NetworkIdentifier>,
    /// The network this metadata describes (first entry of `networks`).
    pub network: NetworkIdentifier,
    pub status: NetworkStatusResponse,
    pub options: NetworkOptionsResponse,
}

impl RemoteMetadata {
    /// Combine the three endpoint responses, selecting the first network.
    ///
    /// # Errors
    ///
    /// `FetchError::NoNetworks` if the list is empty, `FetchError::Malformed`
    /// if any response breaks a shape rule.
    pub fn assemble(
        list: NetworkListResponse,
        status: NetworkStatusResponse,
        options: NetworkOptionsResponse,
    ) -> Result<Self, FetchError> {
        let network = primary_network(&list)?.clone();
        check_status(&status)?;
        check_options(&options)?;
        Ok(Self {
            networks: list.network_identifiers,
            network,
            status,
            options,
        })
    }
}

/// Capability to produce [`RemoteMetadata`].
///
/// The generator only ever calls this once per run.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    async fn fetch_metadata(&self) -> Result<RemoteMetadata, FetchError>;
}

/// A fixed snapshot serves itself.
impl MetadataSource for RemoteMetadata {
    async fn fetch_metadata(&self) -> Result<RemoteMetadata, FetchError> {
        Ok(self.clone())
    }
}

/// Validate a network list and return the network to target.
pub(crate) fn primary_network(list: &NetworkListResponse) -> Result<&NetworkIdentifier, FetchError> {
    for id in &list.network_identifiers {
        if id.blockchain.is_empty() || id.network.is_empty() {
            return Err(malformed("/network/list", format!("incomplete network identifier {id}")));
        }
    }
    list.network_identifiers.first().ok_or(FetchError::NoNetworks)
}

pub(crate) fn check_status(status: &NetworkStatusResponse) -> Result<(), FetchError> {
    const ENDPOINT: &str = "/network/status";
    check_block(ENDPOINT, "current_block_identifier", &status.current_block_identifier)?;
    check_block(ENDPOINT, "genesis_block_identifier", &status.genesis_block_identifier)?;
    if let Some(oldest) = &status.oldest_block_identifier {
        check_block(ENDPOINT, "oldest_block_identifier", oldest)?;
    }
    if status.current_block_timestamp < 0 {
        return Err(malformed(ENDPOINT, "current_block_timestamp is negative"));
    }
    Ok(())
}

pub(crate) fn check_options(options: &NetworkOptionsResponse) -> Result<(), FetchError> {
    const ENDPOINT: &str = "/network/options";
    if options.version.rosetta_version.is_empty() {
        return Err(malformed(ENDPOINT, "version.rosetta_version is empty"));
    }
    if options.version.node_version.is_empty() {
        return Err(malformed(ENDPOINT, "version.node_version is empty"));
    }

    let allow = &options.allow;
    if allow.operation_statuses.iter().any(|s| s.status.is_empty()) {
        return Err(malformed(ENDPOINT, "operation status with empty label"));
    }
    if allow.operation_types.iter().any(String::is_empty) {
        return Err(malformed(ENDPOINT, "empty operation type"));
    }
    for err in &allow.errors {
        if err.code < 0 {
            return Err(malformed(ENDPOINT, format!("error code {} is negative", err.code)));
        }
        if err.message.is_empty() {
            return Err(malformed(ENDPOINT, format!("error code {} has an empty message", err.code)));
        }
    }
    for currency in &allow.currencies {
        if currency.symbol.is_empty() {
            return Err(malformed(ENDPOINT, "currency with empty symbol"));
        }
        if currency.decimals < 0 {
            return Err(malformed(
                ENDPOINT,
                format!("currency {} has negative decimals", currency.symbol),
            ));
        }
    }
    if allow.timestamp_start_index.is_some_and(|i| i < 0) {
        return Err(malformed(ENDPOINT, "timestamp_start_index is negative"));
    }
    Ok(())
}

fn check_block(endpoint: &str, field: &str, block: &BlockIdentifier) -> Result<(), FetchError> {
    if block.index < 0 {
        return Err(malformed(endpoint, format!("{field}.index is negative")));
    }
    if block.hash.is_empty() {
        return Err(malformed(endpoint, format!("{field}.hash is empty")));
    }
    Ok(())
}

fn malformed(endpoint: &str, reason: impl Into<String>) -> FetchError {
    FetchError::Malformed {
        endpoint: endpoint.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Allow, Currency, Error, OperationStatus, Version};

    fn block(index: i64, hash: &str) -> BlockIdentifier {
        BlockIdentifier {
            index,
            hash: hash.to_string(),
        }
    }

    fn list() -> NetworkListResponse {
        NetworkListResponse {
            network_identifiers: vec![
                NetworkIdentifier::new("bitcoin", "mainnet"),
                NetworkIdentifier::new("bitcoin", "testnet3"),
            ],
        }
    }

    fn status() -> NetworkStatusResponse {
        NetworkStatusResponse {
            current_block_identifier: block(100, "h100"),
            current_block_timestamp: 1_600_000_000_000,
            genesis_block_identifier: block(0, "h0"),
            oldest_block_identifier: None,
            peers: vec![],
        }
    }

    fn options() -> NetworkOptionsResponse {
        NetworkOptionsResponse {
            version: Version {
                rosetta_version: "1.4.0".into(),
                node_version: "0.21.0".into(),
                middleware_version: None,
                metadata: None,
            },
            allow: Allow {
                operation_statuses: vec![OperationStatus::new("SUCCESS", true)],
                operation_types: vec!["TRANSFER".into()],
                errors: vec![Error::new(1, "not found", false)],
                currencies: vec![Currency::new("BTC", 8)],
                ..Allow::default()
            },
        }
    }

    fn assert_malformed(result: Result<RemoteMetadata, FetchError>, needle: &str) {
        match result {
            Err(FetchError::Malformed { reason, .. }) => {
                assert!(reason.contains(needle), "unexpected reason: {reason}")
            }
            other => panic!("expected Malformed containing {needle:?}, got {other:?}"),
        }
    }

    #[test]
    fn assemble_selects_first_network() {
        let meta = RemoteMetadata::assemble(list(), status(), options()).unwrap();
        assert_eq!(meta.network, NetworkIdentifier::new("bitcoin", "mainnet"));
        assert_eq!(meta.networks.len(), 2);
    }

    #[test]
    fn assemble_rejects_empty_network_list() {
        let result = RemoteMetadata::assemble(
            NetworkListResponse { network_identifiers: vec![] },
            status(),
            options(),
        );
        assert!(matches!(result, Err(FetchError::NoNetworks)));
    }

    #[test]
    fn assemble_rejects_incomplete_network() {
        let mut l = list();
        l.network_identifiers[1].network.clear();
        assert_malformed(RemoteMetadata::assemble(l, status(), options()), "incomplete network");
    }

    #[test]
    fn rejects_empty_genesis_hash() {
        let mut s = status();
        s.genesis_block_identifier.hash.clear();
        assert_malformed(RemoteMetadata::assemble(list(), s, options()), "genesis_block_identifier.hash");
    }

    #[test]
    fn rejects_negative_current_index() {
        let mut s = status();
        s.current_block_identifier.index = -1;
        assert_malformed(RemoteMetadata::assemble(list(), s, options()), "current_block_identifier.index");
    }

    #[test]
    fn rejects_missing_versions() {
        let mut o = options();
        o.version.node_version.clear();
        assert_malformed(RemoteMetadata::assemble(list(), status(), o), "node_version");
    }

    #[test]
    fn rejects_negative_error_code() {
        let mut o = options();
        o.allow.errors.push(Error::new(-3, "bad", false));
        assert_malformed(RemoteMetadata::assemble(list(), status(), o), "negative");
    }

    #[test]
    fn rejects_empty_error_message() {
        let mut o = options();
        o.allow.errors.push(Error::new(4, "", true));
        assert_malformed(RemoteMetadata::assemble(list(), status(), o), "empty message");
    }

    #[test]
    fn rejects_empty_status_label_and_operation_type() {
        let mut o = options();
        o.allow.operation_statuses.push(OperationStatus::new("", false));
        assert_malformed(RemoteMetadata::assemble(list(), status(), o), "empty label");

        let mut o = options();
        o.allow.operation_types.push(String::new());
        assert_malformed(RemoteMetadata::assemble(list(), status(), o), "operation type");
    }

    #[test]
    fn rejects_bad_currency() {
        let mut o = options();
        o.allow.currencies.push(Currency::new("ETH", -1));
        assert_malformed(RemoteMetadata::assemble(list(), status(), o), "negative decimals");
    }

    #[test]
    fn rejects_empty_currency_symbol() {
        let mut o = options();
        o.allow.currencies.push(Currency::new("", 2));
        assert_malformed(RemoteMetadata::assemble(list(), status(), o), "empty symbol");
    }

    #[test]
    fn rejects_negative_timestamp_start_index() {
        let mut o = options();
        o.allow.timestamp_start_index = Some(-1);
        assert_malformed(RemoteMetadata::assemble(list(), status(), o), "timestamp_start_index");
    }

    #[test]
    fn accepts_zero_timestamp_start_index() {
        let mut o = options();
        o.allow.timestamp_start_index = Some(0);
        assert!(RemoteMetadata::assemble(list(), status(), o).is_ok());
    }

    #[test]
    fn rejects_negative_current_block_timestamp() {
        let mut s = status();
        s.current_block_timestamp = -5;
        assert_malformed(RemoteMetadata::assemble(list(), s, options()), "current_block_timestamp");
    }

    #[test]
    fn checks_oldest_block_when_present() {
        let mut s = status();
        s.oldest_block_identifier = Some(block(3, ""));
        assert_malformed(RemoteMetadata::assemble(list(), s, options()), "oldest_block_identifier.hash");

        let mut s = status();
        s.oldest_block_identifier = Some(block(-2, "h"));
        assert_malformed(RemoteMetadata::assemble(list(), s, options()), "oldest_block_identifier.index");

        let mut s = status();
        s.oldest_block_identifier = Some(block(3, "h3"));
        assert!(RemoteMetadata::assemble(list(), s, options()).is_ok());
    }

    #[tokio::test]
    async fn fixed_snapshot_is_a_source() {
        let meta = RemoteMetadata::assemble(list(), status(), options()).unwrap();
        let fetched = meta.fetch_metadata().await.unwrap();
        assert_eq!(fetched, meta);
    }
}
