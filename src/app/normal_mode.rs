use crate::{
    arbitrage::{ detector::ArbitrageDetector, snapshot::fetch_snapshot },
    config::Config,
    exchange::{ binance::BinanceClient, client::{ P2PClient, SpotClient }, p2p::BinanceP2PClient },
    utils::console::{ print_app_starting, print_config, print_report },
};
use anyhow::{ Context, Result };
use tracing::{ error, info };

/// Fetch one snapshot, scan every candidate against it and print the ranking
pub fn run_normal_mode(config: Config) -> Result<()> {
    print_app_starting();
    print_config(&config);

    let spot = BinanceClient::new(&config.spot_url, config.request_timeout()).context(
        "Failed to create spot client"
    )?;
    let p2p = BinanceP2PClient::new(&config.p2p_url, config.request_timeout()).context(
        "Failed to create P2P client"
    )?;

    info!("Quote sources: spot={}, p2p={}", spot.name(), p2p.name());

    let rt = tokio::runtime::Builder
        ::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    let snapshot = rt
        .block_on(fetch_snapshot(&spot, &p2p, &config))
        .inspect_err(|e| error!("❌ Failed to fetch market snapshot: {}", e))
        .context("Failed to fetch market snapshot")?;

    info!("✓ Snapshot ready: {} spot rates, {} P2P quotes", snapshot.table.defined_rates(), snapshot.p2p.len());

    let report = ArbitrageDetector::from_config(&config)
        .scan(&snapshot)
        .context("Scan aborted")?;

    print_report(&report);
    Ok(())
}
