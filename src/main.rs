use anyhow::{ Context, Result };

use p2p_arbitrage::app;
use p2p_arbitrage::config::Config;
use p2p_arbitrage::utils::logging;

// Define command line arguments enum
#[derive(Debug)]
enum Command {
    Run,
    Candidates,
}

fn main() -> Result<()> {
    let command = if std::env::args().nth(1).as_deref() == Some("candidates") {
        Command::Candidates
    } else {
        Command::Run
    };

    let config = Config::from_env().context(
        "Failed to load configuration from environment. Check the P2PA_* variables and your .env file."
    )?;

    let _log_guards = logging
        ::init_logging(config.log_level, config.debug, &config.log_config)
        .context("Failed to initialize logging system")?;

    match command {
        Command::Run => app::normal_mode::run_normal_mode(config)?,
        Command::Candidates => app::candidates_mode::run_candidates_mode(config)?,
    }

    Ok(())
}
