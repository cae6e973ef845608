//! Request and response shapes for the Admin GraphQL operations used by the
//! restock sync.
//!
//! Only the fields the sync reads are modelled. `sku` on a variant is
//! nullable in the Admin schema and is modelled as `Option<String>`.

use serde::{Deserialize, Serialize};

/// `data` of the `{ shop { name } }` connectivity query.
#[derive(Debug, Deserialize)]
pub struct ShopResponse {
    pub shop: Shop,
}

#[derive(Debug, Deserialize)]
pub struct Shop {
    pub name: String,
}

/// `data` of the `productVariants` search query.
#[derive(Debug, Deserialize)]
pub struct ProductVariantsResponse {
    #[serde(rename = "productVariants")]
    pub product_variants: VariantConnection,
}

#[derive(Debug, Deserialize)]
pub struct VariantConnection {
    #[serde(default)]
    pub nodes: Vec<VariantNode>,
}

#[derive(Debug, Deserialize)]
pub struct VariantNode {
    /// Variant GID, e.g. `gid://shopify/ProductVariant/123`.
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
}

/// One entry of the `metafields` argument to `metafieldsSet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldsSetInput {
    pub owner_id: String,
    pub namespace: String,
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
}

/// `data` of the `metafieldsSet` mutation.
#[derive(Debug, Deserialize)]
pub struct MetafieldsSetResponse {
    #[serde(rename = "metafieldsSet")]
    pub metafields_set: MetafieldsSetPayload,
}

#[derive(Debug, Deserialize)]
pub struct MetafieldsSetPayload {
    #[serde(default)]
    pub metafields: Option<Vec<WrittenMetafield>>,
    #[serde(default, rename = "userErrors")]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub struct WrittenMetafield {
    pub key: String,
    pub namespace: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// A validation error reported by a mutation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field, e.g. `["metafields", "0", "value"]`.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(path) if !path.is_empty() => write!(f, "{}: {}", path.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}
