use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::http::ResponseExt;
use crate::traits::TaskSource;
use weekly_core::RawTask;

/// Asana response envelope: every payload sits under a `data` key.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Task-relevant fields requested from the API; anything else the
/// provider attaches is ignored at deserialization.
const TASK_OPT_FIELDS: &str = "name,completed,due_on,custom_fields";

/// Asana API client.
pub struct AsanaClient {
    access_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl AsanaClient {
    /// Create a new Asana client.
    ///
    /// # Arguments
    /// * `access_token` - Personal access token
    /// * `base_url` - Optional override for testing against a mock server
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(access_token: String, base_url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.unwrap_or_else(|| "https://app.asana.com".to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            access_token,
            base_url,
            client,
        })
    }

    /// Build an API URL.
    fn build_url(&self, path: &str) -> String {
        format!("{}/api/1.0/{path}", self.base_url)
    }

    /// Make an authenticated GET request.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .context("Failed to send request to Asana API")?
            .ensure_success("Asana")
            .await?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .context("Failed to parse Asana API response")?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl TaskSource for AsanaClient {
    async fn fetch_tasks(
        &self,
        project_id: &str,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<Vec<RawTask>> {
        let url = self.build_url(&format!("projects/{project_id}/tasks"));

        log::debug!("Fetching tasks for project {project_id} ({window_start}..{window_end})");

        let query = [
            ("opt_fields", TASK_OPT_FIELDS.to_string()),
            ("completed_since", window_start.format("%Y-%m-%d").to_string()),
            ("due_on", window_end.format("%Y-%m-%d").to_string()),
        ];

        let tasks: Vec<RawTask> = self.get(&url, &query).await?;
        log::info!("Fetched {} tasks from project {project_id}", tasks.len());
        Ok(tasks)
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let url = self.build_url("users/me");

        log::debug!("Validating Asana credentials: {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Failed to connect to Asana API")?;

        Ok(response.status().is_success())
    }

    fn source_name(&self) -> &'static str {
        "asana"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = AsanaClient::new("test-token".to_string(), None).unwrap();
        let url = client.build_url("projects/12345/tasks");
        assert_eq!(url, "https://app.asana.com/api/1.0/projects/12345/tasks");
    }

    #[test]
    fn test_build_url_removes_trailing_slash() {
        let client = AsanaClient::new(
            "test-token".to_string(),
            Some("https://asana.example.com/".to_string()),
        )
        .unwrap();

        let url = client.build_url("users/me");
        assert_eq!(url, "https://asana.example.com/api/1.0/users/me");
    }

    #[test]
    fn test_envelope_decoding() {
        let json = r#"{"data": [{"name": "Design doc", "due_on": "2024-06-05"}]}"#;
        let envelope: Envelope<Vec<RawTask>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].name, "Design doc");
        assert!(envelope.data[0].custom_fields.is_empty());
    }

    #[test]
    fn test_source_name() {
        let client = AsanaClient::new("test-token".to_string(), None).unwrap();
        assert_eq!(client.source_name(), "asana");
    }
}
