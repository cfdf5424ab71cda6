use std::ops::RangeInclusive;
use std::sync::Arc;

use itertools::{ iproduct, Itertools };

use crate::config::Config;
use crate::models::cycle::Cycle;

/// Generates every candidate cycle for a symbol set and a payment set.
///
/// Order is deterministic: path length ascending, then index permutations in
/// lexicographic order, then entry payment, then exit payment.
#[derive(Debug, Clone)]
pub struct CycleEnumerator<'a> {
    symbols: &'a [Arc<str>],
    payments: &'a [Arc<str>],
    lengths: RangeInclusive<usize>,
}

impl<'a> CycleEnumerator<'a> {
    /// Paths of `min_len..=max_len` distinct symbols
    pub fn new(
        symbols: &'a [Arc<str>],
        payments: &'a [Arc<str>],
        min_len: usize,
        max_len: usize
    ) -> Self {
        Self {
            symbols,
            payments,
            lengths: min_len.max(1)..=max_len,
        }
    }

    /// Paths of 2..=max_depth+1 symbols, or 1..=max_depth+1 with direct cycles enabled
    pub fn from_config(config: &'a Config) -> Self {
        let min_len = if config.include_direct_cycles { 1 } else { 2 };
        Self::new(&config.symbols, &config.payments, min_len, config.max_depth + 1)
    }

    /// Lazy candidate sequence; each call starts over from the first candidate
    pub fn iter(&self) -> impl Iterator<Item = Cycle> + use<'a> {
        let symbols = self.symbols;
        let payments = self.payments;
        let m = payments.len();

        self.lengths
            .clone()
            .flat_map(move |len| (0..symbols.len()).permutations(len))
            .flat_map(move |path| {
                iproduct!(0..m, 0..m).map(move |(entry, exit)| Cycle {
                    symbols: path
                        .iter()
                        .map(|&i| symbols[i].clone())
                        .collect(),
                    entry_payment: payments[entry].clone(),
                    exit_payment: payments[exit].clone(),
                })
            })
    }

    /// `sum over L of n!/(n-L)! * m^2`, saturating
    pub fn candidate_count(&self) -> usize {
        let n = self.symbols.len();
        let m2 = self.payments.len().saturating_mul(self.payments.len());

        self.lengths
            .clone()
            .map(|len| partial_permutations(n, len).saturating_mul(m2))
            .fold(0usize, usize::saturating_add)
    }
}

/// `n! / (n - k)!`, zero when `k > n`
fn partial_permutations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (n - k + 1..=n).fold(1usize, usize::saturating_mul)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(values: &[&str]) -> Vec<Arc<str>> {
        values
            .iter()
            .map(|s| Arc::from(*s))
            .collect()
    }

    #[test]
    fn test_partial_permutations() {
        assert_eq!(partial_permutations(5, 2), 20);
        assert_eq!(partial_permutations(5, 3), 60);
        assert_eq!(partial_permutations(3, 3), 6);
        assert_eq!(partial_permutations(2, 3), 0);
        assert_eq!(partial_permutations(4, 0), 1);
    }

    #[test]
    fn test_count_matches_formula_and_iteration() {
        let symbols = names(&["USDT", "BTC", "BUSD", "BNB", "ETH"]);
        let payments = names(&["TinkoffNew", "RosBankNew"]);

        for max_depth in 1..=4 {
            let enumerator = CycleEnumerator::new(&symbols, &payments, 2, max_depth + 1);
            let expected: usize = (2..=max_depth + 1)
                .map(|len| partial_permutations(5, len) * 4)
                .sum();

            assert_eq!(enumerator.candidate_count(), expected);
            assert_eq!(enumerator.iter().count(), expected);
        }
    }

    #[test]
    fn test_default_depth_produces_pairs_only() {
        let symbols = names(&["A", "B", "C"]);
        let payments = names(&["P1", "P2"]);
        let enumerator = CycleEnumerator::new(&symbols, &payments, 2, 2);

        assert_eq!(enumerator.candidate_count(), 6 * 4);
        assert!(enumerator.iter().all(|c| c.symbols.len() == 2));
    }

    #[test]
    fn test_paths_never_repeat_a_symbol() {
        let symbols = names(&["A", "B", "C", "D"]);
        let payments = names(&["P1"]);
        let enumerator = CycleEnumerator::new(&symbols, &payments, 2, 4);

        for cycle in enumerator.iter() {
            let distinct: HashSet<_> = cycle.symbols.iter().collect();
            assert_eq!(distinct.len(), cycle.symbols.len(), "repeated symbol in {}", cycle);
        }
    }

    #[test]
    fn test_enumeration_order() {
        let symbols = names(&["A", "B", "C"]);
        let payments = names(&["P1", "P2"]);
        let enumerator = CycleEnumerator::new(&symbols, &payments, 2, 3);

        let lines: Vec<String> = enumerator
            .iter()
            .map(|c| c.to_string())
            .collect();

        assert_eq!(
            &lines[..5],
            &["A->B: P1->P1", "A->B: P1->P2", "A->B: P2->P1", "A->B: P2->P2", "A->C: P1->P1"]
        );
        // length-2 paths come first, all of them
        assert_eq!(lines[23], "C->B: P2->P2");
        assert_eq!(lines[24], "A->B->C: P1->P1");
        assert_eq!(lines.last().unwrap(), "C->B->A: P2->P2");
    }

    #[test]
    fn test_iteration_is_restartable_and_deterministic() {
        let symbols = names(&["A", "B", "C"]);
        let payments = names(&["P1", "P2"]);
        let enumerator = CycleEnumerator::new(&symbols, &payments, 2, 3);

        let first: Vec<Cycle> = enumerator.iter().collect();
        let second: Vec<Cycle> = enumerator.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_direct_cycles_come_first() {
        let symbols = names(&["A", "B"]);
        let payments = names(&["P1", "P2"]);
        let enumerator = CycleEnumerator::new(&symbols, &payments, 1, 2);

        assert_eq!(enumerator.candidate_count(), 2 * 4 + 2 * 4);
        let first = enumerator.iter().next().unwrap();
        assert_eq!(first.to_string(), "A: P1->P1");
        assert_eq!(first.entry(), first.exit());
    }

    #[test]
    fn test_depth_beyond_symbol_count_adds_nothing() {
        let symbols = names(&["A", "B"]);
        let payments = names(&["P1"]);
        let enumerator = CycleEnumerator::new(&symbols, &payments, 2, 6);

        assert_eq!(enumerator.candidate_count(), 2);
        assert_eq!(enumerator.iter().count(), 2);
    }
}
