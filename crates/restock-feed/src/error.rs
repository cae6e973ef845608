use thiserror::Error;

/// Errors returned while fetching the restock CSV feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from feed {url}")]
    UnexpectedStatus { status: u16, url: String },
}
