use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{BackendConfig, NetworkConfig};
use crate::gym::Gym;

/// Body of a call to the backend's HTTP query endpoint.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    path: &'a str,
    args: serde_json::Map<String, serde_json::Value>,
    format: &'a str,
}

/// Envelope returned by the query endpoint.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum QueryResponse<T> {
    Success {
        value: T,
    },
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

/// Read-only client for the gym records held by the backend.
#[derive(Clone, Debug)]
pub struct GymApiClient {
    client: reqwest::Client,
    url: String,
    gyms_query: String,
}

impl GymApiClient {
    /// Create a new API client with configurable timeouts.
    pub fn new(backend: &BackendConfig, network_config: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(network_config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(network_config.connect_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: format!("{}/api/query", backend.url.trim_end_matches('/')),
            gyms_query: backend.gyms_query.clone(),
        })
    }

    /// Fetch every gym record.
    pub async fn fetch_gyms(&self) -> Result<Vec<Gym>> {
        let request = QueryRequest {
            path: &self.gyms_query,
            args: serde_json::Map::new(),
            format: "json",
        };

        tracing::debug!("Querying {} at {}", self.gyms_query, self.url);
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to backend")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Backend returned error status: {}", status);
        }

        let body = response
            .json::<QueryResponse<Vec<Gym>>>()
            .await
            .context("Failed to parse gym records")?;

        match body {
            QueryResponse::Success { value } => {
                tracing::info!("Fetched {} gyms", value.len());
                Ok(value)
            }
            QueryResponse::Error { error_message } => {
                anyhow::bail!("Query {} failed: {}", self.gyms_query, error_message)
            }
        }
    }
}

/// Load gym records from a JSON export (an array of records).
pub fn load_gyms_from_file(path: &Path) -> Result<Vec<Gym>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let gyms: Vec<Gym> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse gym records in {}", path.display()))?;
    tracing::info!("Loaded {} gyms from {}", gyms.len(), path.display());
    Ok(gyms)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Envelope Parsing Tests ====================

    #[test]
    fn test_success_envelope() {
        let json = r#"{"status": "success", "value": [1, 2, 3], "logLines": []}"#;
        let parsed: QueryResponse<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed, QueryResponse::Success { value } if value == vec![1, 2, 3]));
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"status": "error", "errorMessage": "Server Error", "logLines": []}"#;
        let parsed: QueryResponse<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed, QueryResponse::Error { error_message } if error_message == "Server Error"));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{"status": "pending"}"#;
        assert!(serde_json::from_str::<QueryResponse<Vec<u32>>>(json).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let request = QueryRequest {
            path: "gyms:getAll",
            args: serde_json::Map::new(),
            format: "json",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"path": "gyms:getAll", "args": {}, "format": "json"})
        );
    }

    // ==================== GymApiClient Construction Tests ====================

    #[test]
    fn test_api_client_url_has_single_slash() {
        let backend = BackendConfig {
            url: "https://example.convex.cloud/".to_string(),
            ..Default::default()
        };
        let client = GymApiClient::new(&backend, &NetworkConfig::default()).unwrap();
        assert_eq!(client.url, "https://example.convex.cloud/api/query");
    }
}
