//! Client error types.

/// Errors while fetching remote metadata.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP transport error (unreachable host, timeout, TLS failure).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The response body did not decode into the expected type.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// `/network/list` returned no networks.
    #[error("server reported no supported networks")]
    NoNetworks,
    /// A decoded response violates the protocol's shape rules.
    #[error("malformed {endpoint} response: {reason}")]
    Malformed { endpoint: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
