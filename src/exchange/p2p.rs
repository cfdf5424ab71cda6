use async_trait::async_trait;
use reqwest::Client as HttpClient;
use url::Url;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::time::{ Duration, Instant };
use tracing::{ debug, error };

use crate::error::{ ArbitrageError, Result };
use crate::exchange::binance::{ build_http_client, parse_price };
use crate::exchange::client::P2PClient;
use crate::models::binance_models::{ P2PSearchRequest, P2PSearchResponse };
use crate::models::quote::P2PRequest;

const SOURCE: &str = "binance-p2p";
const SEARCH_ENDPOINT: &str = "bapi/c2c/v2/friendly/c2c/adv/search";

/// Binance P2P marketplace client, reads the best advertisement of a search
pub struct BinanceP2PClient {
    search_url: Url,
    http: HttpClient,
}

impl BinanceP2PClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let search_url = Url::parse(base_url)
            .and_then(|base| base.join(SEARCH_ENDPOINT))
            .map_err(|e|
                ArbitrageError::InvalidConfiguration(format!("invalid P2P URL '{}': {}", base_url, e))
            )?;

        Ok(Self {
            search_url,
            http: build_http_client(timeout, SOURCE)?,
        })
    }

    /// Search body for a request. The notional goes out as a whole fiat amount.
    fn payload(request: &P2PRequest) -> Result<P2PSearchRequest<'_>> {
        let trans_amount = request.notional
            .trunc()
            .to_u64()
            .ok_or_else(|| {
                ArbitrageError::InvalidConfiguration(
                    format!("notional {} cannot be sent as a P2P amount", request.notional)
                )
            })?;

        Ok(P2PSearchRequest {
            asset: &request.key.symbol,
            countries: Vec::new(),
            fiat: &request.fiat,
            page: 1,
            pay_types: vec![request.key.payment.as_ref()],
            pro_merchant_ads: false,
            publisher_type: None,
            rows: request.rows,
            trade_type: request.key.direction.as_ref(),
            trans_amount,
        })
    }

    /// Price of the first advertisement, `NoListings` when there is none
    fn top_price(request: &P2PRequest, response: P2PSearchResponse) -> Result<Decimal> {
        let first = response.data.and_then(|ads| ads.into_iter().next());

        match first {
            Some(entry) => parse_price(SOURCE, &entry.adv.price),
            None => {
                debug!(
                    code = ?response.code,
                    message = ?response.message,
                    "Empty P2P search for {}",
                    request
                );
                Err(ArbitrageError::NoListings { request: request.to_string() })
            }
        }
    }
}

#[async_trait]
impl P2PClient for BinanceP2PClient {
    fn name(&self) -> &str {
        "Binance P2P"
    }

    async fn fetch_p2p_top(&self, request: &P2PRequest) -> Result<Decimal> {
        let start = Instant::now();
        let payload = Self::payload(request)?;

        let response = self.http
            .post(self.search_url.clone())
            .json(&payload)
            .send().await
            .map_err(|e| ArbitrageError::source_unavailable(SOURCE, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Binance P2P error for {}: {} - {}", request, status, text);
            return Err(ArbitrageError::source_unavailable(SOURCE, format!("{} - {}", status, text)));
        }

        let body: P2PSearchResponse = response
            .json().await
            .map_err(|e| ArbitrageError::source_unavailable(SOURCE, e))?;

        let price = Self::top_price(request, body)?;
        debug!(request = %request, price = %price, "Fetched P2P top in {:.2?}", start.elapsed());

        Ok(price)
    }
}
