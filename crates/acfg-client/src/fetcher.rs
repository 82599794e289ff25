//! # HTTP Metadata Fetcher
//!
//! Production [`MetadataSource`]: three sequential JSON `POST` calls against
//! the configured server. Construction performs no I/O.
//!
//! There is no retry. A failed call surfaces immediately so the operator
//! decides whether to re-run.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::metadata::{self, MetadataSource, RemoteMetadata};
use crate::types::{
    MetadataRequest, NetworkIdentifier, NetworkListResponse, NetworkOptionsResponse,
    NetworkRequest, NetworkStatusResponse,
};

const NETWORK_LIST_PATH: &str = "network/list";
const NETWORK_STATUS_PATH: &str = "network/status";
const NETWORK_OPTIONS_PATH: &str = "network/options";

/// HTTP client bound to one server.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Build a fetcher from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| FetchError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let base_url = config.server_url.as_str().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// `POST /network/list`.
    pub async fn network_list(&self) -> Result<NetworkListResponse, FetchError> {
        self.post(NETWORK_LIST_PATH, &MetadataRequest::default()).await
    }

    /// `POST /network/status` for `network`.
    pub async fn network_status(
        &self,
        network: &NetworkIdentifier,
    ) -> Result<NetworkStatusResponse, FetchError> {
        self.post(
            NETWORK_STATUS_PATH,
            &NetworkRequest {
                network_identifier: network,
            },
        )
        .await
    }

    /// `POST /network/options` for `network`.
    pub async fn network_options(
        &self,
        network: &NetworkIdentifier,
    ) -> Result<NetworkOptionsResponse, FetchError> {
        self.post(
            NETWORK_OPTIONS_PATH,
            &NetworkRequest {
                network_identifier: network,
            },
        )
        .await
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, FetchError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let endpoint = format!("/{path}");
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(%url, "requesting");

        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| FetchError::Deserialization { endpoint, source: e })
    }
}

impl MetadataSource for HttpFetcher {
    async fn fetch_metadata(&self) -> Result<RemoteMetadata, FetchError> {
        let list = self.network_list().await?;
        let network = metadata::primary_network(&list)?.clone();
        tracing::info!(%network, networks = list.network_identifiers.len(), "selected network");

        let status = self.network_status(&network).await?;
        let options = self.network_options(&network).await?;
        tracing::info!(
            rosetta_version = %options.version.rosetta_version,
            node_version = %options.version.node_version,
            current_index = status.current_block_identifier.index,
            "fetched network metadata"
        );

        RemoteMetadata::assemble(list, status, options)
    }
}
