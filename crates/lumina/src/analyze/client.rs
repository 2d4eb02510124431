use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::pipeline::ProcessedRecord;

use super::error::AnalyzeError;
use super::types::{
    AnalyzeRequest, AnalyzeResponse, CollectionSummary, CollectionsResponse, HealthStatus,
    OrganizedFile, SearchResponse,
};

/// JSON client for the organization service.
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalyzeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AnalyzeError::InvalidConfig(e.to_string()))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, AnalyzeError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AnalyzeError::InvalidConfig(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                AnalyzeError::InvalidConfig(format!("Base URL cannot have a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Submits processed records for organization.
    pub async fn analyze(&self, records: &[ProcessedRecord]) -> Result<AnalyzeResponse, AnalyzeError> {
        info!(files = records.len(), "Sending files for analysis");
        let request = self
            .client
            .post(self.url(&["api", "analyze"])?)
            .json(&AnalyzeRequest { files: records });

        let response: AnalyzeResponse = self.send(request).await?;
        info!(
            collection_id = %response.collection_id,
            categories = response.categories.len(),
            "Analysis complete"
        );
        Ok(response)
    }

    pub async fn health(&self) -> Result<HealthStatus, AnalyzeError> {
        self.send(self.client.get(self.url(&["api", "health"])?)).await
    }

    pub async fn collection(&self, collection_id: &str) -> Result<AnalyzeResponse, AnalyzeError> {
        let url = self.url(&["api", "collections", collection_id])?;
        self.send(self.client.get(url)).await
    }

    pub async fn collections(&self) -> Result<Vec<CollectionSummary>, AnalyzeError> {
        let response: CollectionsResponse =
            self.send(self.client.get(self.url(&["api", "collections"])?)).await?;
        Ok(response.collections)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<OrganizedFile>, AnalyzeError> {
        let request = self
            .client
            .get(self.url(&["api", "search"])?)
            .query(&[("query", query)]);
        let response: SearchResponse = self.send(request).await?;
        Ok(response.results)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AnalyzeError> {
        let response = request
            .send()
            .await
            .map_err(|e| AnalyzeError::from_reqwest(e, &self.base_url))?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Analysis service response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = AnalyzeError::from_status(status, &body);
            warn!("Analysis service request failed: {}", err);
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalyzeError::from_reqwest(e, &self.base_url))?;
        serde_json::from_str(&body).map_err(|e| AnalyzeError::Decode(e.to_string()))
    }
}
