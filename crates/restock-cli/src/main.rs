mod sync;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::sync::SyncOutcome;

#[derive(Debug, Parser)]
#[command(name = "restock-cli")]
#[command(about = "Sync restock dates for out-of-stock SKUs into Shopify variant metafields")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the sheet, resolve out-of-stock SKUs, and write `custom.restock_date` (default)
    Sync {
        /// CSV export URL to read instead of `SHEET_CSV_URL`
        #[arg(long)]
        feed_url: Option<String>,

        /// Resolve variants and report the planned writes without calling `metafieldsSet`
        #[arg(long)]
        dry_run: bool,
    },
    /// Only check that the Admin API endpoint and token work
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = restock_core::load_sync_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    for var in config.unset_vars() {
        tracing::warn!(var, "environment variable is not set; requests that need it will fail");
    }

    let client = restock_shopify::AdminClient::from_config(&config)?;

    match cli.command {
        Some(Commands::Ping) => {
            let shop = sync::check_connectivity(&client).await?;
            println!("connected to {shop}");
        }
        Some(Commands::Sync { feed_url, dry_run }) => {
            let feed_url = feed_url.unwrap_or_else(|| config.sheet_csv_url.clone());
            run(&client, &config, &feed_url, dry_run).await?;
        }
        None => run(&client, &config, &config.sheet_csv_url, false).await?,
    }

    Ok(())
}

async fn run(
    client: &restock_shopify::AdminClient,
    config: &restock_core::SyncConfig,
    feed_url: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let feed = restock_feed::FeedClient::new(config.request_timeout_secs, &config.user_agent)?;

    match sync::run_sync(client, &feed, feed_url, dry_run).await? {
        SyncOutcome::NoTargets => println!("no out-of-stock SKUs; nothing to sync"),
        SyncOutcome::NothingResolved { targets } => {
            println!("none of {targets} out-of-stock SKUs matched a variant; nothing written");
        }
        SyncOutcome::DryRun { planned } => {
            println!("dry-run: would set restock_date on {planned} variants");
        }
        SyncOutcome::Synced { written } => println!("restock_date synced for {written} variants"),
    }

    Ok(())
}
