use itertools::Itertools;

use crate::enums::policy::RankingPolicy;
use crate::models::cycle::EvaluatedCycle;

/// Apply a ranking policy to cycles given in enumeration order.
///
/// `Threshold` keeps cycles strictly above the percentage, order untouched.
/// `FullSort` sorts ascending by profit; the sort is stable so equal profits
/// keep their enumeration order.
pub fn rank(mut cycles: Vec<EvaluatedCycle>, policy: RankingPolicy) -> Vec<EvaluatedCycle> {
    match policy {
        RankingPolicy::Threshold(min_pct) => {
            cycles.retain(|c| c.profit_pct > min_pct);
            cycles
        }
        RankingPolicy::FullSort => {
            cycles.sort_by(|a, b| a.profit_pct.cmp(&b.profit_pct));
            cycles
        }
    }
}

/// The N most profitable cycles of a ranked sequence, best first.
/// Equal profits keep enumeration order under `Threshold`.
pub fn top_opportunities(
    ranked: &[EvaluatedCycle],
    policy: RankingPolicy,
    n: usize
) -> Vec<&EvaluatedCycle> {
    match policy {
        // most profitable cycles are at the tail
        RankingPolicy::FullSort => ranked.iter().rev().take(n).collect(),
        RankingPolicy::Threshold(_) =>
            ranked
                .iter()
                .sorted_by(|a, b| b.profit_pct.cmp(&a.profit_pct))
                .take(n)
                .collect(),
    }
}
