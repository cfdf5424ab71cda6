use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::arbitrage::conversion_table::ConversionTable;
use crate::arbitrage::p2p_index::P2PRateIndex;
use crate::enums::direction::Direction;
use crate::error::{ ArbitrageError, Result };
use crate::models::cycle::{ Cycle, EvaluatedCycle };

/// Composes the monetary multiplier of a cycle from a fixed rate snapshot
#[derive(Debug, Clone, Copy)]
pub struct CycleEvaluator<'a> {
    table: &'a ConversionTable,
    p2p: &'a P2PRateIndex,
    notional: Decimal,
    /// P2P side priced on the exit leg
    exit_direction: Direction,
}

impl<'a> CycleEvaluator<'a> {
    pub fn new(
        table: &'a ConversionTable,
        p2p: &'a P2PRateIndex,
        notional: Decimal,
        exit_direction: Direction
    ) -> Self {
        Self { table, p2p, notional, exit_direction }
    }

    #[inline]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Run the notional through the cycle.
    ///
    /// 1. entry: `amount = A / p2p(BUY, symbols[0], entry_payment)`
    /// 2. each hop: `amount *= table(symbols[i-1], symbols[i])`
    /// 3. exit: `amount *= p2p(exit_direction, symbols[k-1], exit_payment)`
    /// 4. profit: `(amount / A) * 100 - 100`
    pub fn evaluate(&self, cycle: Cycle) -> Result<EvaluatedCycle> {
        if cycle.is_empty() {
            return Err(ArbitrageError::InvalidConfiguration(format!("empty cycle {}", cycle)));
        }

        let entry_price = self.p2p.lookup(Direction::Buy, cycle.entry(), &cycle.entry_payment)?;
        let mut amount = checked(self.notional.checked_div(entry_price), "entry leg", &cycle)?;

        for hop in cycle.symbols.windows(2) {
            let rate = self.table.lookup(&hop[0], &hop[1])?;
            amount = checked(amount.checked_mul(rate), "conversion leg", &cycle)?;
        }

        let exit_price = self.p2p.lookup(self.exit_direction, cycle.exit(), &cycle.exit_payment)?;
        let final_amount = checked(amount.checked_mul(exit_price), "exit leg", &cycle)?;

        let profit_pct = checked(
            final_amount
                .checked_div(self.notional)
                .and_then(|ratio| ratio.checked_mul(dec!(100)))
                .and_then(|pct| pct.checked_sub(dec!(100))),
            "profit ratio",
            &cycle
        )?;

        Ok(EvaluatedCycle {
            cycle,
            final_amount,
            profit_pct,
        })
    }
}

#[inline]
fn checked(value: Option<Decimal>, step: &str, cycle: &Cycle) -> Result<Decimal> {
    value.ok_or_else(|| ArbitrageError::Arithmetic(format!("{} overflowed for {}", step, cycle)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote::P2PQuoteKey;
    use crate::models::symbol::SpotPair;
    use std::sync::Arc;

    fn sym(name: &str) -> Arc<str> {
        Arc::from(name)
    }

    fn cycle(symbols: &[&str], entry: &str, exit: &str) -> Cycle {
        Cycle {
            symbols: symbols
                .iter()
                .map(|s| sym(s))
                .collect(),
            entry_payment: sym(entry),
            exit_payment: sym(exit),
        }
    }

    /// S=[A,B], P=[P1], BUY(A,P1)=1, BUY(B,P1)=2, SELL(B,P1)=1.5
    fn snapshot(rate_a_b: Decimal) -> (ConversionTable, P2PRateIndex) {
        let symbols = vec![sym("A"), sym("B")];
        let pair = SpotPair::new("A", "B");
        let table = ConversionTable::build(&symbols, [(&pair, rate_a_b)]).unwrap();
        let p2p = P2PRateIndex::build([
            (P2PQuoteKey::new(Direction::Buy, sym("A"), sym("P1")), dec!(1)),
            (P2PQuoteKey::new(Direction::Buy, sym("B"), sym("P1")), dec!(2)),
            (P2PQuoteKey::new(Direction::Sell, sym("B"), sym("P1")), dec!(1.5)),
        ]).unwrap();
        (table, p2p)
    }

    #[test]
    fn test_break_even_cycle() {
        let (table, p2p) = snapshot(dec!(0.5));
        let evaluator = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Buy);

        let result = evaluator.evaluate(cycle(&["A", "B"], "P1", "P1")).unwrap();
        assert_eq!(result.final_amount, dec!(1000));
        assert_eq!(result.profit_pct, Decimal::ZERO);
    }

    #[test]
    fn test_profitable_cycle() {
        let (table, p2p) = snapshot(dec!(0.6));
        let evaluator = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Buy);

        let result = evaluator.evaluate(cycle(&["A", "B"], "P1", "P1")).unwrap();
        assert_eq!(result.final_amount, dec!(1200));
        assert_eq!(result.profit_pct, dec!(20));
        assert_eq!(result.to_string(), "A->B: P1->P1 = 1200.00 (20.00%)");
    }

    #[test]
    fn test_reverse_direction_uses_reciprocal_rate() {
        let (table, p2p) = snapshot(dec!(0.5));
        let evaluator = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Buy);

        // 1000 / 2 = 500 B, * 2 = 1000 A, * 1 = 1000
        let result = evaluator.evaluate(cycle(&["B", "A"], "P1", "P1")).unwrap();
        assert_eq!(result.final_amount, dec!(1000));
        assert_eq!(result.profit_pct, Decimal::ZERO);
    }

    #[test]
    fn test_exit_leg_follows_configured_direction() {
        // BUY is the default exit quote; SELL is what a seller actually
        // receives and gives a different result.
        let (table, p2p) = snapshot(dec!(0.6));

        let buy_exit = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Buy)
            .evaluate(cycle(&["A", "B"], "P1", "P1"))
            .unwrap();
        let sell_exit = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Sell)
            .evaluate(cycle(&["A", "B"], "P1", "P1"))
            .unwrap();

        assert_eq!(buy_exit.final_amount, dec!(1200));
        assert_eq!(sell_exit.final_amount, dec!(900));
        assert_eq!(sell_exit.profit_pct, dec!(-10));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let (table, p2p) = snapshot(dec!(0.6123456789));
        let evaluator = CycleEvaluator::new(&table, &p2p, dec!(2000), Direction::Buy);

        let first = evaluator.evaluate(cycle(&["B", "A"], "P1", "P1")).unwrap();
        let second = evaluator.evaluate(cycle(&["B", "A"], "P1", "P1")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_rate_fails_only_that_candidate() {
        let symbols = vec![sym("A"), sym("B"), sym("C")];
        let pair = SpotPair::new("A", "B");
        let table = ConversionTable::build(&symbols, [(&pair, dec!(0.6))]).unwrap();
        let p2p = P2PRateIndex::build(
            ["A", "B", "C"].map(|s| (P2PQuoteKey::new(Direction::Buy, sym(s), sym("P1")), dec!(1)))
        ).unwrap();
        let evaluator = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Buy);

        let err = evaluator.evaluate(cycle(&["A", "B", "C"], "P1", "P1")).unwrap_err();
        assert_eq!(err, ArbitrageError::MissingRate { from: sym("B"), to: sym("C") });

        // the same evaluator still prices covered candidates
        let ok = evaluator.evaluate(cycle(&["A", "B"], "P1", "P1")).unwrap();
        assert_eq!(ok.final_amount, dec!(600));
    }

    #[test]
    fn test_missing_quote_on_entry_and_exit() {
        let (table, p2p) = snapshot(dec!(0.5));
        let evaluator = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Buy);

        let entry = evaluator.evaluate(cycle(&["A", "B"], "P2", "P1")).unwrap_err();
        assert!(matches!(entry, ArbitrageError::MissingQuote { direction: Direction::Buy, .. }));

        let exit = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Sell)
            .evaluate(cycle(&["B", "A"], "P1", "P1"))
            .unwrap_err();
        assert_eq!(
            exit,
            ArbitrageError::MissingQuote {
                direction: Direction::Sell,
                symbol: sym("A"),
                payment: sym("P1"),
            }
        );
    }

    #[test]
    fn test_empty_cycle_is_rejected() {
        let (table, p2p) = snapshot(dec!(0.5));
        let evaluator = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Buy);

        let err = evaluator.evaluate(cycle(&[], "P1", "P1")).unwrap_err();
        assert!(matches!(err, ArbitrageError::InvalidConfiguration(_)));
        assert!(!err.is_coverage_gap());
    }

    #[test]
    fn test_direct_cycle_has_no_conversion_leg() {
        let (table, p2p) = snapshot(dec!(0.5));
        let evaluator = CycleEvaluator::new(&table, &p2p, dec!(1000), Direction::Sell);

        // buy B at 2 through P1, sell it at 1.5 through P1
        let result = evaluator.evaluate(cycle(&["B"], "P1", "P1")).unwrap();
        assert_eq!(result.final_amount, dec!(750));
        assert_eq!(result.profit_pct, dec!(-25));
    }
}
