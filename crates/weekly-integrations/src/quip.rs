use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http::ResponseExt;
use crate::traits::{DocumentSink, PublishedDocument};

/// Request body for document creation.
#[derive(Debug, Serialize)]
struct NewDocumentRequest<'a> {
    title: &'a str,
    content: &'a str,
    format: &'a str,
}

/// Quip thread envelope returned by document creation.
#[derive(Debug, Deserialize)]
struct ThreadResponse {
    thread: QuipThread,
}

/// A Quip thread (document).
#[derive(Debug, Clone, Deserialize)]
pub struct QuipThread {
    pub id: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Quip API client.
pub struct QuipClient {
    access_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl QuipClient {
    /// Create a new Quip client.
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

        let base_url = base_url.unwrap_or_else(|| "https://platform.quip.com".to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            access_token,
            base_url,
            client,
        })
    }

    /// Build an API URL.
    fn build_url(&self, path: &str) -> String {
        format!("{}/1/{path}", self.base_url)
    }

    /// Create a new document thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails
    pub async fn new_document(&self, title: &str, content: &str) -> Result<QuipThread> {
        let url = self.build_url("threads/new-document");

        log::debug!("POST {url}");

        let request = NewDocumentRequest {
            title,
            content,
            format: "markdown",
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Quip API")?
            .ensure_success("Quip")
            .await?;

        let envelope: ThreadResponse = response
            .json()
            .await
            .context("Failed to parse Quip API response")?;

        Ok(envelope.thread)
    }
}

#[async_trait]
impl DocumentSink for QuipClient {
    async fn publish(&self, title: &str, body: &str) -> Result<PublishedDocument> {
        let thread = self.new_document(title, body).await?;

        log::info!("Created Quip document {} ({title})", thread.id);

        Ok(PublishedDocument {
            id: thread.id,
            link: thread.link,
        })
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let url = self.build_url("users/current");

        log::debug!("Validating Quip credentials: {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Failed to connect to Quip API")?;

        Ok(response.status().is_success())
    }

    fn sink_name(&self) -> &'static str {
        "quip"
    }
}
