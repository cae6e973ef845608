//! Restock-date metafield writes via batched `metafieldsSet` mutations.

use std::collections::HashMap;

use restock_core::FeedRecord;
use serde_json::json;

use crate::client::AdminClient;
use crate::error::ShopifyError;
use crate::types::{MetafieldsSetInput, MetafieldsSetResponse};

/// Shopify accepts at most 25 inputs per `metafieldsSet` call.
pub const METAFIELDS_SET_BATCH_SIZE: usize = 25;

pub const RESTOCK_NAMESPACE: &str = "custom";
pub const RESTOCK_KEY: &str = "restock_date";
pub const RESTOCK_VALUE_TYPE: &str = "single_line_text_field";

const METAFIELDS_SET_MUTATION: &str = r"
mutation SetRestockDates($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields { key namespace value owner { __typename ... on ProductVariant { id } } }
    userErrors { field message }
  }
}
";

/// Joins targets with resolved variant GIDs into `custom.restock_date` inputs.
///
/// Targets whose SKU has no (or an empty) GID are dropped. Output order
/// follows `targets`.
#[must_use]
pub fn restock_date_inputs(
    targets: &[FeedRecord],
    variant_ids: &HashMap<String, String>,
) -> Vec<MetafieldsSetInput> {
    targets
        .iter()
        .filter_map(|target| {
            let owner_id = variant_ids.get(&target.sku).filter(|id| !id.is_empty())?;
            Some(MetafieldsSetInput {
                owner_id: owner_id.clone(),
                namespace: RESTOCK_NAMESPACE.to_string(),
                key: RESTOCK_KEY.to_string(),
                value_type: RESTOCK_VALUE_TYPE.to_string(),
                value: target.restock_date.clone(),
            })
        })
        .collect()
}

/// Writes `inputs` in batches of [`METAFIELDS_SET_BATCH_SIZE`], returning the
/// number of inputs sent.
///
/// Batches are not atomic with respect to each other: when a batch fails,
/// earlier batches stay written.
///
/// # Errors
///
/// - [`ShopifyError::UserErrors`] as soon as one batch reports user errors;
///   remaining batches are not sent.
/// - Any other [`ShopifyError`] from the request itself.
pub async fn set_metafields(
    client: &AdminClient,
    inputs: &[MetafieldsSetInput],
) -> Result<usize, ShopifyError> {
    let mut written = 0usize;

    for (batch_index, batch) in inputs.chunks(METAFIELDS_SET_BATCH_SIZE).enumerate() {
        let data: MetafieldsSetResponse = client
            .execute_as(
                METAFIELDS_SET_MUTATION,
                json!({ "metafields": batch }),
                "metafieldsSet",
            )
            .await?;

        let payload = data.metafields_set;
        if !payload.user_errors.is_empty() {
            for user_error in &payload.user_errors {
                tracing::error!(
                    batch = batch_index,
                    field = ?user_error.field,
                    message = %user_error.message,
                    "metafieldsSet user error"
                );
            }
            return Err(ShopifyError::UserErrors(payload.user_errors));
        }

        written += batch.len();
        tracing::debug!(
            batch = batch_index,
            inputs = batch.len(),
            confirmed = payload.metafields.as_ref().map_or(0, Vec::len),
            "metafieldsSet batch applied"
        );
    }

    Ok(written)
}
