//! HTTP loader for the published restock spreadsheet.

use std::time::Duration;

use reqwest::Client;
use restock_core::FeedRecord;

use crate::error::FeedError;
use crate::parse::parse_feed;

/// Fetches the CSV export of the restock sheet and parses it.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Creates a `FeedClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Downloads the feed at `url` and returns its normalized records.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnexpectedStatus`] if the server answers with a non-2xx status.
    /// - [`FeedError::Http`] on network failure or an unreadable body.
    pub async fn load_feed(&self, url: &str) -> Result<Vec<FeedRecord>, FeedError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        let records = parse_feed(&body);
        tracing::debug!(
            bytes = body.len(),
            records = records.len(),
            "parsed restock feed"
        );
        Ok(records)
    }
}
