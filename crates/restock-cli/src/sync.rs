//! The restock sync run: connectivity check, feed load, target filter,
//! SKU resolution, metafield writes.
//!
//! Every stage runs once and in order. Any error aborts the run and is
//! returned to `main`, which exits non-zero. The two early returns
//! (no targets, nothing resolved) are successful outcomes.

use anyhow::Context;
use restock_feed::{restock_targets, FeedClient};
use restock_shopify::{resolve_variant_ids, restock_date_inputs, set_metafields, AdminClient};

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SyncOutcome {
    /// The feed had no out-of-stock rows.
    NoTargets,
    /// There were targets but none resolved to a variant.
    NothingResolved { targets: usize },
    /// Dry run: `planned` writes were built and not sent.
    DryRun { planned: usize },
    Synced { written: usize },
}

/// Runs `{ shop { name } }` and returns the shop name.
pub(crate) async fn check_connectivity(client: &AdminClient) -> anyhow::Result<String> {
    tracing::info!(endpoint = client.endpoint(), "checking Admin API connectivity");
    let shop = client
        .shop_name()
        .await
        .context("Admin API connectivity check failed")?;
    tracing::info!(shop = %shop, "connected to Shopify");
    Ok(shop)
}

pub(crate) async fn run_sync(
    client: &AdminClient,
    feed: &FeedClient,
    feed_url: &str,
    dry_run: bool,
) -> anyhow::Result<SyncOutcome> {
    check_connectivity(client).await?;

    let records = feed
        .load_feed(feed_url)
        .await
        .with_context(|| format!("failed to load restock feed from {feed_url}"))?;
    let targets = restock_targets(&records);
    let target_skus: Vec<&str> = targets.iter().map(|t| t.sku.as_str()).collect();

    tracing::info!(
        records = records.len(),
        targets = targets.len(),
        skus = %format_skus(&target_skus),
        "loaded restock feed"
    );

    if targets.is_empty() {
        tracing::info!("no out-of-stock SKUs in feed; skipping sync");
        return Ok(SyncOutcome::NoTargets);
    }

    let variant_ids = resolve_variant_ids(client, &target_skus)
        .await
        .context("failed to resolve SKUs to variants")?;
    let inputs = restock_date_inputs(&targets, &variant_ids);

    tracing::debug!(
        resolved = variant_ids.len(),
        unresolved = targets.len().saturating_sub(inputs.len()),
        "SKU resolution finished"
    );

    if inputs.is_empty() {
        tracing::warn!(
            targets = targets.len(),
            "no out-of-stock SKU resolved to a variant; check SKU spelling in the sheet"
        );
        return Ok(SyncOutcome::NothingResolved {
            targets: targets.len(),
        });
    }

    if dry_run {
        for input in &inputs {
            tracing::info!(
                owner_id = %input.owner_id,
                value = %input.value,
                "dry-run: would set restock_date"
            );
        }
        return Ok(SyncOutcome::DryRun {
            planned: inputs.len(),
        });
    }

    let written = set_metafields(client, &inputs)
        .await
        .context("metafieldsSet failed")?;
    tracing::info!(written, "restock_date synced");

    Ok(SyncOutcome::Synced { written })
}

fn format_skus(skus: &[&str]) -> String {
    if skus.is_empty() {
        "(none)".to_string()
    } else {
        skus.join(", ")
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
