use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use rust_decimal::Decimal;

/// A candidate round trip: buy `symbols[0]` for fiat through `entry_payment`,
/// convert along the path, and sell the last symbol through `exit_payment`.
///
/// `symbols` is never empty for cycles produced by the enumerator; check
/// [`Cycle::is_empty`] before calling `entry`/`exit` on a hand-built one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub symbols: Vec<Arc<str>>,
    pub entry_payment: Arc<str>,
    pub exit_payment: Arc<str>,
}

impl Cycle {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// # Panics
    /// When `symbols` is empty.
    #[inline]
    pub fn entry(&self) -> &Arc<str> {
        &self.symbols[0]
    }

    /// # Panics
    /// When `symbols` is empty.
    #[inline]
    pub fn exit(&self) -> &Arc<str> {
        &self.symbols[self.symbols.len() - 1]
    }

    /// `USDT->BTC->ETH`
    pub fn path(&self) -> String {
        self.symbols.iter().join("->")
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}->{}", self.path(), self.entry_payment, self.exit_payment)
    }
}

/// A cycle together with the fiat amount it ends with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedCycle {
    pub cycle: Cycle,
    pub final_amount: Decimal,
    /// `(final_amount / notional) * 100 - 100`
    pub profit_pct: Decimal,
}

impl fmt::Display for EvaluatedCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {:.2} ({:.2}%)",
            self.cycle,
            self.final_amount.round_dp(2),
            self.profit_pct.round_dp(2)
        )
    }
}
