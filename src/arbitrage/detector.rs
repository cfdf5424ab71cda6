// src/arbitrage/detector.rs

use std::time::Instant;

use colored::Colorize;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{ debug, info, warn };

use crate::arbitrage::enumerator::CycleEnumerator;
use crate::arbitrage::evaluator::CycleEvaluator;
use crate::arbitrage::ranker;
use crate::arbitrage::snapshot::MarketSnapshot;
use crate::config::Config;
use crate::enums::direction::Direction;
use crate::enums::policy::RankingPolicy;
use crate::error::Result;
use crate::models::cycle::{ Cycle, EvaluatedCycle };

/// Outcome of one pass over every candidate cycle
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Candidates produced by the enumerator
    pub candidates: usize,
    /// Candidates priced successfully
    pub evaluated: usize,
    /// Candidates skipped for a missing rate, missing quote or overflow
    pub skipped: usize,
    pub ranking: RankingPolicy,
    /// Ranked survivors
    pub cycles: Vec<EvaluatedCycle>,
    pub elapsed_ms: u128,
}

impl ScanReport {
    /// Up to `n` cycles, most profitable first, whatever the ranking policy
    pub fn best(&self, n: usize) -> Vec<&EvaluatedCycle> {
        ranker::top_opportunities(&self.cycles, self.ranking, n)
    }
}

/// Scans a snapshot for profitable cycles
pub struct ArbitrageDetector<'a> {
    enumerator: CycleEnumerator<'a>,
    notional: Decimal,
    exit_direction: Direction,
    ranking: RankingPolicy,
}

impl<'a> ArbitrageDetector<'a> {
    pub fn new(
        enumerator: CycleEnumerator<'a>,
        notional: Decimal,
        exit_direction: Direction,
        ranking: RankingPolicy
    ) -> Self {
        Self { enumerator, notional, exit_direction, ranking }
    }

    pub fn from_config(config: &'a Config) -> Self {
        Self::new(
            CycleEnumerator::from_config(config),
            config.initial_amount,
            config.exit_direction,
            config.ranking
        )
    }

    /// Evaluate every candidate against the snapshot, then rank.
    ///
    /// Candidates are priced in parallel but collected in enumeration order,
    /// so `FullSort` ties and `Threshold` output stay deterministic. A
    /// candidate that cannot be priced is skipped; any other error aborts.
    pub fn scan(&self, snapshot: &MarketSnapshot) -> Result<ScanReport> {
        let start = Instant::now();
        let evaluator = CycleEvaluator::new(
            &snapshot.table,
            &snapshot.p2p,
            self.notional,
            self.exit_direction
        );

        let candidates: Vec<Cycle> = self.enumerator.iter().collect();
        debug!("Enumerated {} candidate cycles", candidates.len());

        let outcomes: Vec<_> = candidates
            .into_par_iter()
            .map(|cycle| evaluator.evaluate(cycle))
            .collect();

        let candidates = outcomes.len();
        let mut evaluated = Vec::with_capacity(candidates);
        let mut skipped = 0usize;

        for outcome in outcomes {
            match outcome {
                Ok(cycle) => evaluated.push(cycle),
                Err(e) if e.is_coverage_gap() => {
                    debug!("Skipping candidate: {}", e);
                    skipped += 1;
                }
                Err(e) => {
                    return Err(e);
                }
            }
        }

        if skipped > 0 {
            warn!("{} of {} candidates skipped for missing market data", skipped, candidates);
        }

        let evaluated_count = evaluated.len();
        let cycles = ranker::rank(evaluated, self.ranking);
        let elapsed_ms = start.elapsed().as_millis();

        info!(
            "Scanned {} candidates in {} ms: {} evaluated, {} kept by {}",
            candidates,
            elapsed_ms,
            evaluated_count,
            cycles.len(),
            self.ranking
        );

        Ok(ScanReport {
            candidates,
            evaluated: evaluated_count,
            skipped,
            ranking: self.ranking,
            cycles,
            elapsed_ms,
        })
    }
}

/// Colored form of an evaluated cycle for the console
pub fn display(cycle: &EvaluatedCycle) -> String {
    let pct = format!("{:.2}%", cycle.profit_pct.round_dp(2));
    let pct = if cycle.profit_pct > Decimal::ZERO {
        pct.bright_green().bold()
    } else {
        pct.red()
    };

    format!(
        "{}: {}->{} = {} ({})",
        cycle.cycle.path().green(),
        cycle.cycle.entry_payment.yellow(),
        cycle.cycle.exit_payment.yellow(),
        format!("{:.2}", cycle.final_amount.round_dp(2)).cyan(),
        pct
    )
}

/// Print one line per ranked cycle, in ranked order
pub fn print_opportunities(report: &ScanReport) {
    if report.cycles.is_empty() {
        println!("{}", "No cycles passed the ranking policy".yellow());
        return;
    }

    for cycle in &report.cycles {
        println!("{}", display(cycle));
    }
}
