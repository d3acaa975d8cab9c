//! Service-backed retriever for a remote vector-search endpoint
//!
//! The second `Retriever` variant: the corpus lives behind a hosted
//! vector-search service and queries go over REST. The engine stays
//! agnostic to which variant is active.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use tokio::time::timeout;
use tracing::debug;

use rce_core::{Error, ProjectRecord, RecordFilter, Result, Retriever};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the remote vector-search service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorServiceConfig {
    pub api_key: String,
    pub endpoint: String,
    pub namespace: String,
}

impl VectorServiceConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("VECTOR_SEARCH_API_KEY").map_err(|_| {
            Error::Configuration(
                "VECTOR_SEARCH_API_KEY environment variable not found".to_string(),
            )
        })?;

        let endpoint = env::var("VECTOR_SEARCH_URL").map_err(|_| {
            Error::Configuration("VECTOR_SEARCH_URL environment variable not found".to_string())
        })?;

        let namespace = env::var("VECTOR_SEARCH_NAMESPACE")
            .unwrap_or_else(|_| "renovation-projects".to_string());

        Ok(Self {
            api_key,
            endpoint,
            namespace,
        })
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    top_k: usize,
    namespace: &'a str,
    filter: &'a RecordFilter,
}

#[derive(Deserialize)]
struct QueryMatch {
    score: Option<f32>,
    record: ProjectRecord,
}

#[derive(Deserialize)]
struct QueryResponse {
    matches: Vec<QueryMatch>,
}

/// Retriever backed by a hosted vector-search index
pub struct VectorServiceRetriever {
    config: VectorServiceConfig,
    client: Client,
}

impl VectorServiceRetriever {
    /// Create a new retriever from configuration
    pub fn new(config: VectorServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new retriever from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(VectorServiceConfig::from_env()?)
    }
}

#[async_trait]
impl Retriever for VectorServiceRetriever {
    async fn search(
        &self,
        query_text: &str,
        filter: &RecordFilter,
        k: usize,
    ) -> Result<Vec<ProjectRecord>> {
        let body = QueryRequest {
            query: query_text,
            top_k: k,
            namespace: &self.config.namespace,
            filter,
        };
        let url = format!("{}/query", self.config.endpoint.trim_end_matches('/'));

        let request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send();

        let response = timeout(REQUEST_TIMEOUT, request)
            .await
            .map_err(|_| Error::Timeout("vector search request timed out".to_string()))?
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Retrieval(format!(
                "vector search failed with status {}",
                response.status()
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let records: Vec<ProjectRecord> = parsed
            .matches
            .into_iter()
            .take(k)
            .map(|m| {
                debug!(id = %m.record.id, score = ?m.score, "vector match");
                m.record
            })
            .collect();

        Ok(records)
    }

    fn is_ready(&self) -> bool {
        true
    }
}
