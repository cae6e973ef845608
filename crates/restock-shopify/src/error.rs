use thiserror::Error;

use crate::types::UserError;

/// Errors returned by the Shopify Admin GraphQL client.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Network or TLS failure before any HTTP status was received, or an
    /// endpoint that is not a valid URL.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status. `body` is the parsed
    /// payload re-serialized as JSON (a synthetic `{"errors": ...}` object
    /// when the body was not JSON).
    #[error("HTTP {status} {status_text}\nendpoint: {endpoint}\nbody: {body}")]
    Transport {
        status: u16,
        status_text: String,
        endpoint: String,
        body: String,
    },

    /// The response carried a top-level GraphQL `errors` member.
    #[error("GraphQL errors: {}", pretty_json(.0))]
    Query(serde_json::Value),

    /// `metafieldsSet` rejected at least one input in a batch.
    #[error("metafieldsSet failed with {} user error(s): {}", .0.len(), format_user_errors(.0))]
    UserErrors(Vec<UserError>),

    /// The `data` member did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
