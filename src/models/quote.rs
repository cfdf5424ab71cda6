use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::enums::direction::Direction;
use crate::enums::policy::SpotPricePolicy;

/// Best bid and best ask of a spot order book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotTop {
    pub best_bid: Decimal,
    pub best_ask: Decimal,
}

impl SpotTop {
    /// Representative price under the given policy, `None` on overflow
    #[inline]
    pub fn price(&self, policy: SpotPricePolicy) -> Option<Decimal> {
        match policy {
            SpotPricePolicy::Mid => self.best_bid.checked_add(self.best_ask)?.checked_div(dec!(2)),
            SpotPricePolicy::BestBid => Some(self.best_bid),
        }
    }
}

/// Composite key of a P2P quote
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct P2PQuoteKey {
    pub direction: Direction,
    pub symbol: Arc<str>,
    pub payment: Arc<str>,
}

impl P2PQuoteKey {
    pub fn new(direction: Direction, symbol: Arc<str>, payment: Arc<str>) -> Self {
        Self { direction, symbol, payment }
    }
}

impl fmt::Display for P2PQuoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} via {}", self.direction, self.symbol, self.payment)
    }
}

/// One P2P advertisement search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P2PRequest {
    pub key: P2PQuoteKey,
    pub fiat: Arc<str>,
    /// Fiat amount the advertisement must accept
    pub notional: Decimal,
    pub rows: usize,
}

impl fmt::Display for P2PRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {} {}", self.key, self.notional, self.fiat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_price_policies() {
        let top = SpotTop { best_bid: dec!(99.5), best_ask: dec!(100.5) };
        assert_eq!(top.price(SpotPricePolicy::Mid), Some(dec!(100)));
        assert_eq!(top.price(SpotPricePolicy::BestBid), Some(dec!(99.5)));
    }

    #[test]
    fn test_mid_price_overflow_is_none() {
        let top = SpotTop { best_bid: Decimal::MAX, best_ask: Decimal::MAX };
        assert_eq!(top.price(SpotPricePolicy::Mid), None);
    }
}
