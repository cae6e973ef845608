//! SKU to variant GID resolution via batched `productVariants` searches.

use std::collections::HashMap;

use serde_json::json;

use crate::client::AdminClient;
use crate::error::ShopifyError;
use crate::types::ProductVariantsResponse;

/// Maximum SKUs OR-ed into a single search expression.
pub const RESOLVE_BATCH_SIZE: usize = 20;

/// `first:` argument for each search; comfortably above one variant per SKU.
pub const VARIANT_PAGE_SIZE: u32 = 100;

const VARIANTS_BY_SKU_QUERY: &str = r"
query VariantsBySku($q: String!, $first: Int!) {
  productVariants(first: $first, query: $q) {
    nodes { id sku }
  }
}
";

/// Builds the disjunctive search expression `sku:<a> OR sku:<b> ...`.
///
/// Values are inserted verbatim; SKUs containing spaces or search syntax are
/// not escaped.
#[must_use]
pub fn sku_search_query<S: AsRef<str>>(skus: &[S]) -> String {
    skus.iter()
        .map(|s| format!("sku:{}", s.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Resolves SKUs to variant GIDs, [`RESOLVE_BATCH_SIZE`] SKUs per request.
///
/// Every returned variant with a non-empty SKU is recorded; when several
/// variants share a SKU the last one seen wins. SKUs with no match are simply
/// absent from the map.
///
/// # Errors
///
/// Returns the first [`ShopifyError`] from any batch; later batches are not
/// sent.
pub async fn resolve_variant_ids<S: AsRef<str>>(
    client: &AdminClient,
    skus: &[S],
) -> Result<HashMap<String, String>, ShopifyError> {
    let mut variant_ids = HashMap::new();

    for (batch_index, batch) in skus.chunks(RESOLVE_BATCH_SIZE).enumerate() {
        let search = sku_search_query(batch);
        let data: ProductVariantsResponse = client
            .execute_as(
                VARIANTS_BY_SKU_QUERY,
                json!({ "q": search, "first": VARIANT_PAGE_SIZE }),
                "productVariants search",
            )
            .await?;

        let nodes = data.product_variants.nodes;
        tracing::debug!(
            batch = batch_index,
            skus = batch.len(),
            variants = nodes.len(),
            "resolved SKU batch"
        );

        for node in nodes {
            if let Some(sku) = node.sku.filter(|s| !s.is_empty()) {
                variant_ids.insert(sku, node.id);
            }
        }
    }

    Ok(variant_ids)
}
