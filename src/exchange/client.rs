use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::quote::{ P2PRequest, SpotTop };
use crate::models::symbol::SpotPair;

/// Source of spot order-book tops
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpotClient: Send + Sync {
    /// Get the name of the exchange
    fn name(&self) -> &str;

    /// Best bid and best ask for `pair`, reading `depth` levels of the book.
    ///
    /// Fails with `SourceUnavailable` on transport or decoding errors and
    /// with `NoListings` when either side of the book is empty.
    async fn fetch_spot_top(&self, pair: &SpotPair, depth: usize) -> Result<SpotTop>;
}

/// Source of P2P advertisement prices
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait P2PClient: Send + Sync {
    fn name(&self) -> &str;

    /// Unit price in fiat of the top advertisement matching `request`.
    ///
    /// Fails with `SourceUnavailable` on transport or HTTP errors and
    /// with `NoListings` when the search returned no advertisements.
    async fn fetch_p2p_top(&self, request: &P2PRequest) -> Result<Decimal>;
}
