use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{ debug, warn };

use crate::error::{ ArbitrageError, Result };
use crate::models::symbol::SpotPair;

/// Dense `Symbol x Symbol` rate table.
///
/// Holds `1` on the diagonal, the quoted price for every quoted pair and its
/// reciprocal for the reverse direction. Nothing else is derived: an
/// unquoted pair stays undefined and looking it up fails with `MissingRate`.
#[derive(Debug, Clone)]
pub struct ConversionTable {
    symbols: Vec<Arc<str>>,
    positions: HashMap<Arc<str>, usize>,
    /// Row-major, `rates[from * n + to]`
    rates: Vec<Option<Decimal>>,
}

impl ConversionTable {
    /// Identity-only table over `symbols`
    pub fn new(symbols: &[Arc<str>]) -> Self {
        let n = symbols.len();
        let positions = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();

        let mut rates = vec![None; n * n];
        for i in 0..n {
            rates[i * n + i] = Some(Decimal::ONE);
        }

        Self {
            symbols: symbols.to_vec(),
            positions,
            rates,
        }
    }

    /// Build a table from resolved spot prices.
    /// Pairs naming a symbol outside `symbols` are ignored.
    pub fn build<'a, I>(symbols: &[Arc<str>], quotes: I) -> Result<Self>
        where I: IntoIterator<Item = (&'a SpotPair, Decimal)>
    {
        let mut table = Self::new(symbols);
        let mut quoted = 0usize;

        for (pair, price) in quotes {
            if table.insert(pair, price)? {
                quoted += 1;
            }
        }

        debug!("Built conversion table over {} symbols from {} quoted pairs", symbols.len(), quoted);
        Ok(table)
    }

    /// Record `base -> quote = price` and its reciprocal.
    /// Returns `false` when the pair is outside the symbol set.
    pub fn insert(&mut self, pair: &SpotPair, price: Decimal) -> Result<bool> {
        let (Some(&from), Some(&to)) = (
            self.positions.get(pair.base.as_ref()),
            self.positions.get(pair.quote.as_ref()),
        ) else {
            debug!("Ignoring rate for {} outside the symbol set", pair);
            return Ok(false);
        };

        if from == to {
            return Err(
                ArbitrageError::InvalidConfiguration(
                    format!("spot pair {} quotes a symbol against itself", pair)
                )
            );
        }
        if price <= Decimal::ZERO {
            return Err(
                ArbitrageError::invalid_quote("spot", format!("non-positive rate {} for {}", price, pair))
            );
        }

        let inverse = Decimal::ONE.checked_div(price).ok_or_else(|| {
            ArbitrageError::Arithmetic(format!("cannot invert rate {} for {}", price, pair))
        })?;

        let n = self.symbols.len();
        if self.rates[from * n + to].is_some() {
            warn!("Rate for {} quoted twice, keeping the latest", pair);
        }
        self.rates[from * n + to] = Some(price);
        self.rates[to * n + from] = Some(inverse);

        Ok(true)
    }

    /// Rate converting one unit of `from` into units of `to`
    #[inline]
    pub fn lookup(&self, from: &Arc<str>, to: &Arc<str>) -> Result<Decimal> {
        self.positions
            .get(from)
            .zip(self.positions.get(to))
            .and_then(|(&i, &j)| self.rates[i * self.symbols.len() + j])
            .ok_or_else(|| ArbitrageError::MissingRate {
                from: from.clone(),
                to: to.clone(),
            })
    }

    #[inline]
    pub fn symbols(&self) -> &[Arc<str>] {
        &self.symbols
    }

    /// Number of defined off-diagonal entries
    pub fn defined_rates(&self) -> usize {
        let n = self.symbols.len();
        self.rates
            .iter()
            .enumerate()
            .filter(|(idx, rate)| rate.is_some() && idx / n != idx % n)
            .count()
    }
}
