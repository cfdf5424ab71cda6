use std::time::Instant;

use futures::future::try_join_all;
use itertools::iproduct;
use rust_decimal::Decimal;
use strum::IntoEnumIterator;
use tracing::{ debug, error, info, warn };

use crate::arbitrage::conversion_table::ConversionTable;
use crate::arbitrage::p2p_index::P2PRateIndex;
use crate::config::Config;
use crate::enums::direction::Direction;
use crate::error::{ ArbitrageError, Result };
use crate::exchange::client::{ P2PClient, SpotClient };
use crate::models::quote::{ P2PQuoteKey, P2PRequest };
use crate::models::symbol::SpotPair;

/// Immutable rate snapshot taken once per run
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub table: ConversionTable,
    pub p2p: P2PRateIndex,
}

/// Fetch every spot pair and every P2P combination concurrently and build
/// both tables. The first failing request fails the whole snapshot.
pub async fn fetch_snapshot(
    spot: &dyn SpotClient,
    p2p: &dyn P2PClient,
    config: &Config
) -> Result<MarketSnapshot> {
    let start = Instant::now();

    let (table, index) = tokio::try_join!(
        fetch_conversion_table(spot, config),
        fetch_p2p_index(p2p, config)
    ).inspect_err(|e| error!("Snapshot fetch failed: {}", e))?;

    info!(
        "Fetched snapshot in {:.2?}: {} spot rates from {}, {} P2P quotes from {}",
        start.elapsed(),
        table.defined_rates(),
        spot.name(),
        index.len(),
        p2p.name()
    );

    Ok(MarketSnapshot { table, p2p: index })
}

/// One request per quoted pair, prices resolved with the configured policy
pub async fn fetch_conversion_table(spot: &dyn SpotClient, config: &Config) -> Result<ConversionTable> {
    let pairs = config.quoted_pairs();

    let requests = pairs.iter().map(|pair| async move {
        let top = spot.fetch_spot_top(pair, config.spot_depth).await?;
        let price = top.price(config.spot_price).ok_or_else(|| {
            ArbitrageError::Arithmetic(format!("cannot resolve {} price for {}", config.spot_price, pair))
        })?;
        debug!("Spot {} = {} ({})", pair, price, config.spot_price);
        Ok::<(&SpotPair, Decimal), ArbitrageError>((pair, price))
    });

    let quotes = try_join_all(requests).await?;
    ConversionTable::build(&config.symbols, quotes)
}

/// Every `{BUY, SELL} x S x P` request for the configured fiat and notional
pub fn p2p_requests(config: &Config) -> Vec<P2PRequest> {
    iproduct!(Direction::iter(), config.symbols.iter(), config.payments.iter())
        .map(|(direction, symbol, payment)| P2PRequest {
            key: P2PQuoteKey::new(direction, symbol.clone(), payment.clone()),
            fiat: config.fiat.clone(),
            notional: config.initial_amount,
            rows: config.p2p_rows,
        })
        .collect()
}

/// Fetch all P2P quotes. Each result carries its own key, so the index never
/// depends on completion order.
pub async fn fetch_p2p_index(p2p: &dyn P2PClient, config: &Config) -> Result<P2PRateIndex> {
    let requests = p2p_requests(config);

    let fetches = requests.into_iter().map(|request| async move {
        match p2p.fetch_p2p_top(&request).await {
            Ok(price) => Ok(Some((request.key, price))),
            Err(ArbitrageError::NoListings { request: what }) if config.allow_empty_listings => {
                warn!("No P2P listings for {}, dropping it from the index", what);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    });

    let quotes = try_join_all(fetches).await?;
    P2PRateIndex::build(quotes.into_iter().flatten())
}
