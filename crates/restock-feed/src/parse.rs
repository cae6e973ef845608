//! Minimal CSV parsing for the restock spreadsheet export.
//!
//! The sheet is a plain comma-separated export with three positional columns:
//! SKU, stock, restock date. Quoted fields are not supported; a cell that
//! contains a comma shifts every later column in its row.

use restock_core::{parse_stock, FeedRecord};

/// Parses the CSV text into normalized feed records.
///
/// Carriage returns are stripped, the document is trimmed, and the first line
/// is always treated as a header and discarded. Missing columns default to an
/// empty string. Rows whose SKU is blank after trimming are dropped.
#[must_use]
pub fn parse_feed(text: &str) -> Vec<FeedRecord> {
    let normalized = text.replace('\r', "");

    normalized
        .trim()
        .split('\n')
        .skip(1)
        .filter_map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Option<FeedRecord> {
    let mut cols = line.split(',');
    let sku = cols.next().unwrap_or_default().trim();
    let stock = cols.next().unwrap_or_default();
    let restock_date = cols.next().unwrap_or_default().trim();

    if sku.is_empty() {
        return None;
    }

    Some(FeedRecord {
        sku: sku.to_string(),
        stock: parse_stock(stock),
        restock_date: restock_date.to_string(),
    })
}

/// Selects the out-of-stock rows, keeping feed order.
#[must_use]
pub fn restock_targets(records: &[FeedRecord]) -> Vec<FeedRecord> {
    records
        .iter()
        .filter(|r| r.is_restock_target())
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
