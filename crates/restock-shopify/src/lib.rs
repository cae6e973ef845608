pub mod client;
pub mod error;
pub mod metafields;
pub mod resolve;
pub mod types;

pub use client::AdminClient;
pub use error::ShopifyError;
pub use metafields::{restock_date_inputs, set_metafields, METAFIELDS_SET_BATCH_SIZE};
pub use resolve::{resolve_variant_ids, sku_search_query, RESOLVE_BATCH_SIZE, VARIANT_PAGE_SIZE};
pub use types::{MetafieldsSetInput, UserError};
