// ------------------------------------------------------------
// External dependencies
// ------------------------------------------------------------

use std::sync::Arc;

use futures_util::future::join_all;
use log::{info, warn};

use metadata_collector::config::load_config;
use metadata_collector::{CollectorBuilder, MetaDataCollector, MetadataLookup};

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Responsibilities:
// - Load configuration
// - Initialize logging
// - Start the metadata collector for the configured backend
// - Resolve every configured lookup and print the result
//
// A connection failure during startup ends the process with an
// error; lookup failures are reported per identifier.
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = load_config(&path)?;

    let default_level = if config.debug_log() { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let descriptor = config.metadata_report.descriptor()?;
    info!("Loaded {} ({} lookups)", path, config.lookups.len());

    let collector: Arc<dyn MetaDataCollector> = CollectorBuilder::new(descriptor)
        .with_retry_policy(config.metadata_report.retry)
        .init()
        .await?;

    // --------------------------------------------------------
    // Lookups run concurrently on the shared connection
    // --------------------------------------------------------
    let results = join_all(config.lookups.iter().map(|id| {
        let collector = collector.clone();
        async move { (id, collector.lookup(id).await) }
    }))
    .await;

    for (id, lookup) in results {
        match &lookup {
            MetadataLookup::TransientError(_) => {
                warn!("{} {}: {}", id.side, id.service_interface, lookup)
            }
            _ => println!("[{} {}] {}", id.side, id.service_interface, lookup),
        }
    }

    Ok(())
}
