use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::enums::direction::Direction;
use crate::error::{ ArbitrageError, Result };
use crate::models::quote::P2PQuoteKey;

/// Best P2P unit price per `(direction, symbol, payment method)`
#[derive(Debug, Clone, Default)]
pub struct P2PRateIndex {
    prices: HashMap<P2PQuoteKey, Decimal>,
}

impl P2PRateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build<I>(quotes: I) -> Result<Self> where I: IntoIterator<Item = (P2PQuoteKey, Decimal)> {
        let mut index = Self::new();
        for (key, price) in quotes {
            index.insert(key, price)?;
        }
        Ok(index)
    }

    /// Record a fetched quote. Prices must be positive: the entry leg divides by them.
    pub fn insert(&mut self, key: P2PQuoteKey, price: Decimal) -> Result<()> {
        if price <= Decimal::ZERO {
            return Err(
                ArbitrageError::invalid_quote("p2p", format!("non-positive price {} for {}", price, key))
            );
        }
        self.prices.insert(key, price);
        Ok(())
    }

    #[inline]
    pub fn lookup(&self, direction: Direction, symbol: &Arc<str>, payment: &Arc<str>) -> Result<Decimal> {
        let key = P2PQuoteKey::new(direction, symbol.clone(), payment.clone());
        self.prices
            .get(&key)
            .copied()
            .ok_or(ArbitrageError::MissingQuote {
                direction,
                symbol: key.symbol,
                payment: key.payment,
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
