//! Feed row types shared by the loader and the Shopify writer.

use serde::{Deserialize, Serialize};

/// One normalized data row from the restock spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    /// Trimmed SKU; never empty once loaded.
    pub sku: String,

    /// Numeric stock level. `None` when the cell is not a number.
    pub stock: Option<f64>,

    /// Restock date exactly as written in the sheet (trimmed). Opaque text,
    /// may be empty.
    pub restock_date: String,
}

impl FeedRecord {
    /// `true` when the row is out of stock and should have its restock date
    /// synced. Non-numeric stock never matches.
    #[must_use]
    pub fn is_restock_target(&self) -> bool {
        self.stock == Some(0.0)
    }
}

/// Coerces a stock cell to a number.
///
/// Mirrors spreadsheet-export semantics: a blank cell counts as `0`, plain
/// decimal and exponent notations are accepted, everything else is `None`.
#[must_use]
pub fn parse_stock(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    // `f64::from_str` also accepts "inf" and "NaN"; neither is a stock count.
    let numeric_chars = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !numeric_chars {
        return None;
    }

    trimmed.parse::<f64>().ok()
}
