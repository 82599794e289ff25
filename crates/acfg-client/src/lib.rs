//! # acfg-client — Remote Metadata Client
//!
//! Fetches the capability description of a remote blockchain-data API:
//! which networks it serves, its genesis and current blocks, and the
//! operation statuses, operation types, errors and currencies it may emit.
//!
//! ## Endpoints
//!
//! | Method | Path              | Request                  | Response                 |
//! |--------|-------------------|--------------------------|--------------------------|
//! | POST   | `/network/list`   | `{}`                     | `NetworkListResponse`    |
//! | POST   | `/network/status` | `{network_identifier}`   | `NetworkStatusResponse`  |
//! | POST   | `/network/options`| `{network_identifier}`   | `NetworkOptionsResponse` |
//!
//! ## Architecture
//!
//! Consumers depend on the [`MetadataSource`] trait, not on HTTP. The
//! [`HttpFetcher`] is the production implementation; tests substitute a
//! fixed in-memory source.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod metadata;
pub mod types;

pub use config::{ClientConfig, ConfigError};
pub use error::FetchError;
pub use fetcher::HttpFetcher;
pub use metadata::{MetadataSource, RemoteMetadata};
