use crate::{ arbitrage::enumerator::CycleEnumerator, config::Config, utils::console::print_config };
use anyhow::{ bail, Result };
use tracing::info;

/// Number of candidates printed when listing
const SAMPLE_SIZE: usize = 20;

/// List the candidate space without touching the network
pub fn run_candidates_mode(config: Config) -> Result<()> {
    print_config(&config);

    let enumerator = CycleEnumerator::from_config(&config);
    let total = enumerator.candidate_count();

    if total == 0 {
        bail!("No candidate cycles for {} symbols at max depth {}", config.symbols.len(), config.max_depth);
    }

    info!("{} candidate cycles over {} symbols and {} payment methods", total, config.symbols.len(), config.payments.len());

    println!("{} candidate cycles", total);
    for (i, cycle) in enumerator.iter().take(SAMPLE_SIZE).enumerate() {
        println!("{:5}. {}", i + 1, cycle);
    }
    if total > SAMPLE_SIZE {
        println!("  ... {} more", total - SAMPLE_SIZE);
    }

    Ok(())
}
