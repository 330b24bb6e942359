//! Client for the backend's plain JSON endpoints.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ChatConfig;
use crate::error::{classify_reqwest_error, TransportError};
use crate::models::{DatasetInfo, DatasetsResponse};

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// HTTP client for health and dataset endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ChatConfig,
}

impl ApiClient {
    pub fn new(config: ChatConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: ChatConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Check that the backend is up.
    ///
    /// `GET /`
    pub async fn health_check(&self) -> Result<HealthStatus, TransportError> {
        self.get_json("/").await
    }

    /// List the datasets the agent can query.
    ///
    /// `GET /api/datasets`
    pub async fn list_datasets(&self) -> Result<Vec<DatasetInfo>, TransportError> {
        let response: DatasetsResponse = self.get_json("/api/datasets").await?;
        Ok(response.datasets)
    }

    /// Absolute URL for a visualization URL sent by the server
    pub fn resolve_file_url(&self, url: &str) -> String {
        self.config.resolve_url(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, TransportError> {
        let url = self.config.url(path);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::from_status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}
