use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use weekly_core::RawTask;

/// Document created by the sink, identified by the provider.
#[derive(Debug, Clone)]
pub struct PublishedDocument {
    pub id: String,
    pub link: Option<String>,
}

/// A project-tracking service the digest pulls task records from.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetch raw task records for one project within the given window.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    async fn fetch_tasks(
        &self,
        project_id: &str,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<Vec<RawTask>>;

    /// Validate API credentials and connectivity.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable.
    async fn validate_credentials(&self) -> Result<bool>;

    /// Get the source name
    #[must_use]
    fn source_name(&self) -> &'static str;
}

/// A collaboration service the finished report is published to.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Create one document with the given title and body. Called exactly
    /// once per invocation, after all projects are aggregated.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    async fn publish(&self, title: &str, body: &str) -> Result<PublishedDocument>;

    /// Validate API credentials and connectivity.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable.
    async fn validate_credentials(&self) -> Result<bool>;

    /// Get the sink name
    #[must_use]
    fn sink_name(&self) -> &'static str;
}
