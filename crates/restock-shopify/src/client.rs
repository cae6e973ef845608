//! HTTP client for the Shopify Admin GraphQL API.
//!
//! Wraps `reqwest` with the access-token header and the response rules the
//! sync depends on: the body is read as text before JSON parsing so that a
//! non-JSON error page still produces a diagnosable error, non-2xx statuses
//! become [`ShopifyError::Transport`], and a top-level `errors` member
//! becomes [`ShopifyError::Query`].

use std::time::Duration;

use reqwest::Client;
use restock_core::SyncConfig;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::ShopifyError;
use crate::types::ShopResponse;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const SHOP_NAME_QUERY: &str = "{ shop { name } }";

/// Client for a single Admin GraphQL endpoint.
///
/// Use [`AdminClient::from_config`] for production or
/// [`AdminClient::with_endpoint`] to point at a mock server in tests.
pub struct AdminClient {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl AdminClient {
    /// Creates a client for the store and API version in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &SyncConfig) -> Result<Self, ShopifyError> {
        Self::with_endpoint(
            &config.graphql_endpoint(),
            &config.shopify_admin_token,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit endpoint URL.
    ///
    /// The endpoint is not validated here; an unusable URL fails on the first
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
            access_token: access_token.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one GraphQL operation and returns its `data` member.
    ///
    /// `variables` is passed through unmodified. Returns `Value::Null` when
    /// the payload has no `data`.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::Http`] on network failure or an invalid endpoint.
    /// - [`ShopifyError::Transport`] on a non-2xx status.
    /// - [`ShopifyError::Query`] if the payload carries top-level `errors`.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value, ShopifyError> {
        tracing::debug!(endpoint = %self.endpoint, "sending Admin GraphQL request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let mut payload = parse_payload(&text);

        if !status.is_success() {
            return Err(ShopifyError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                endpoint: self.endpoint.clone(),
                body: payload.to_string(),
            });
        }

        if let Some(errors) = payload.get("errors").filter(|e| is_truthy(e)) {
            return Err(ShopifyError::Query(errors.clone()));
        }

        Ok(payload.get_mut("data").map(Value::take).unwrap_or(Value::Null))
    }

    /// Like [`AdminClient::execute`], deserializing `data` into `T`.
    ///
    /// `context` names the operation in deserialization errors.
    ///
    /// # Errors
    ///
    /// Everything [`AdminClient::execute`] returns, plus
    /// [`ShopifyError::Deserialize`] if `data` does not match `T`.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        context: &str,
    ) -> Result<T, ShopifyError> {
        let data = self.execute(query, variables).await?;
        serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Runs the `{ shop { name } }` connectivity query.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`]; a failure here means the endpoint or token is
    /// unusable.
    pub async fn shop_name(&self) -> Result<String, ShopifyError> {
        let data: ShopResponse = self
            .execute_as(SHOP_NAME_QUERY, json!({}), "shop connectivity check")
            .await?;
        Ok(data.shop.name)
    }
}

/// Parses a response body, never failing.
///
/// An empty body is `{}`; a body that is not JSON is wrapped as
/// `{"errors": "<raw text>"}` so it flows through the normal error checks.
fn parse_payload(text: &str) -> Value {
    if text.is_empty() {
        return json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "errors": text }))
}

/// JavaScript-style truthiness, used for the `errors` member check.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
