//! Shared HTTP helpers for the API clients.

use anyhow::Result;

/// Longest error-body excerpt carried into an error message. Providers
/// serve whole HTML pages on some failures; the excerpt keeps logs sane.
const ERROR_BODY_LIMIT: usize = 512;

/// Extension trait adding non-2xx handling to `reqwest::Response`.
#[async_trait::async_trait]
pub trait ResponseExt {
    /// Turn a non-success response into an error naming the API, the
    /// status code with its reason phrase, and an excerpt of the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the response status is not in the 2xx range.
    async fn ensure_success(self, api_name: &str) -> Result<Self>
    where
        Self: Sized;
}

#[async_trait::async_trait]
impl ResponseExt for reqwest::Response {
    async fn ensure_success(self, api_name: &str) -> Result<Self> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }

        log::warn!("{api_name} API returned {status}");
        let body = self.text().await.unwrap_or_default();
        anyhow::bail!(
            "{api_name} API error ({} {}): {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown"),
            excerpt(&body),
        );
    }
}

/// First [`ERROR_BODY_LIMIT`] characters of an error body, on a char
/// boundary.
fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
