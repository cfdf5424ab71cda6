use async_trait::async_trait;
use reqwest::Client as HttpClient;
use url::Url;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::{ Duration, Instant };
use tracing::{ debug, error };

use crate::error::{ ArbitrageError, Result };
use crate::exchange::client::SpotClient;
use crate::models::binance_models::BinanceOrderbookSnapshot;
use crate::models::quote::SpotTop;
use crate::models::symbol::SpotPair;

const SOURCE: &str = "binance-spot";

/// Binance spot REST client, reads the top of the order book
pub struct BinanceClient {
    /// Base URL for API requests
    base_url: Url,

    /// Pooled HTTP client shared by every request of a run
    http: HttpClient,
}

impl BinanceClient {
    /// Create a new Binance client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e|
            ArbitrageError::InvalidConfiguration(format!("invalid spot URL '{}': {}", base_url, e))
        )?;

        Ok(Self {
            base_url,
            http: build_http_client(timeout, SOURCE)?,
        })
    }

    /// Extract best bid and best ask from a depth snapshot
    fn top_of_book(pair: &SpotPair, snapshot: &BinanceOrderbookSnapshot) -> Result<SpotTop> {
        let (Some(bid), Some(ask)) = (snapshot.bids.first(), snapshot.asks.first()) else {
            return Err(ArbitrageError::NoListings {
                request: format!("spot book {}", pair.code()),
            });
        };

        Ok(SpotTop {
            best_bid: parse_price(SOURCE, &bid[0])?,
            best_ask: parse_price(SOURCE, &ask[0])?,
        })
    }
}

#[async_trait]
impl SpotClient for BinanceClient {
    fn name(&self) -> &str {
        "Binance"
    }

    async fn fetch_spot_top(&self, pair: &SpotPair, depth: usize) -> Result<SpotTop> {
        let start = Instant::now();

        // Build the URL for the depth endpoint
        let mut url = self.base_url
            .join("api/v3/depth")
            .map_err(|e| ArbitrageError::source_unavailable(SOURCE, e))?;
        url.query_pairs_mut()
            .append_pair("symbol", &pair.code())
            .append_pair("limit", &depth.to_string());

        let response = self.http
            .get(url)
            .send().await
            .map_err(|e| ArbitrageError::source_unavailable(SOURCE, e))?;

        // Check if the request was successful
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Binance API error for {}: {} - {}", pair, status, text);
            return Err(ArbitrageError::source_unavailable(SOURCE, format!("{} - {}", status, text)));
        }

        let snapshot: BinanceOrderbookSnapshot = response
            .json().await
            .map_err(|e| ArbitrageError::source_unavailable(SOURCE, e))?;

        let top = Self::top_of_book(pair, &snapshot)?;

        debug!(
            pair = %pair,
            bid = %top.best_bid,
            ask = %top.best_ask,
            "Fetched spot top in {:.2?}",
            start.elapsed()
        );

        Ok(top)
    }
}

/// HTTP client tuned for many small concurrent requests
pub(crate) fn build_http_client(timeout: Duration, source: &str) -> Result<HttpClient> {
    HttpClient::builder()
        .timeout(timeout)
        .tcp_nodelay(true) // Disable Nagle's algorithm for low latency
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| ArbitrageError::source_unavailable(source, e))
}

/// Parse a decimal price string, rejecting zero and negative prices
pub(crate) fn parse_price(source: &str, raw: &str) -> Result<Decimal> {
    let price = Decimal::from_str(raw.trim()).map_err(|e|
        ArbitrageError::invalid_quote(source, format!("unparsable price '{}': {}", raw, e))
    )?;

    if price <= Decimal::ZERO {
        return Err(ArbitrageError::invalid_quote(source, format!("non-positive price {}", price)));
    }

    Ok(price)
}
