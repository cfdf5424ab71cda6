use dotenv::dotenv;
use rust_decimal::Decimal;
use serde::{ Deserialize, Serialize };
use std::collections::HashSet;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::{ Display, EnumString };
use tracing::Level;

use crate::enums::direction::Direction;
use crate::enums::policy::{ RankingPolicy, SpotPricePolicy };
use crate::error::{ ArbitrageError, Result };
use crate::models::symbol::SpotPair;
use crate::utils::serde_helpers::level;

const ENV_PREFIX: &str = "P2PA_";

const DEFAULT_SYMBOLS: &str = "USDT,BTC,BUSD,BNB,ETH";
const DEFAULT_PAYMENTS: &str = "TinkoffNew,RosBankNew";
const DEFAULT_SPOT_PAIRS: &str =
    "BTC/USDT,BUSD/USDT,BNB/USDT,ETH/USDT,USDT/RUB,BTC/BUSD,BNB/BTC,ETH/BTC,BTC/RUB,\
     BNB/BUSD,ETH/BUSD,BUSD/RUB,BNB/ETH,BNB/RUB,ETH/RUB";

pub const DEFAULT_SPOT_URL: &str = "https://api.binance.com/";
pub const DEFAULT_P2P_URL: &str = "https://p2p.binance.com/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub debug: bool,

    /// Ordered symbol set S
    pub symbols: Vec<Arc<str>>,
    /// Ordered payment-method set P
    pub payments: Vec<Arc<str>>,
    pub spot_pairs: Vec<SpotPair>,
    pub fiat: Arc<str>,

    /// Notional A, in fiat
    pub initial_amount: Decimal,
    /// Paths hold 2..=max_depth+1 symbols
    pub max_depth: usize,
    pub ranking: RankingPolicy,

    pub spot_depth: usize,
    pub p2p_rows: usize,
    pub spot_price: SpotPricePolicy,
    pub exit_direction: Direction,
    pub include_direct_cycles: bool,
    pub allow_empty_listings: bool,

    pub spot_url: String,
    pub p2p_url: String,
    pub request_timeout_secs: u64,

    #[serde(with = "level")]
    pub log_level: Level,
    pub log_config: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub directory: PathBuf,
    pub filename_prefix: String,
    pub rotation: LogRotation,
    pub max_files: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl Config {
    /// Load configuration from the process environment and an optional `.env` file
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine, every variable has a default
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    /// Keys are passed without the `P2PA_` prefix.
    pub fn from_vars<F>(lookup: F) -> Result<Self> where F: Fn(&str) -> Option<String> {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let var_or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        let debug = parse_value::<bool>("DEBUG", &var_or("DEBUG", "false"))?;

        let symbols = parse_list(&var_or("SYMBOLS", DEFAULT_SYMBOLS).to_uppercase());
        // Payment identifiers are case sensitive on the P2P side, keep them as given
        let payments = parse_list(&var_or("PAYMENTS", DEFAULT_PAYMENTS));

        let spot_pairs = var_or("SPOT_PAIRS", DEFAULT_SPOT_PAIRS)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(SpotPair::from_str)
            .collect::<Result<Vec<_>>>()?;

        let fiat: Arc<str> = var_or("FIAT", "RUB").trim().to_uppercase().into();

        let initial_amount = parse_value::<Decimal>("INITIAL_AMOUNT", &var_or("INITIAL_AMOUNT", "2000"))?;
        let max_depth = parse_value::<usize>("MAX_DEPTH", &var_or("MAX_DEPTH", "1"))?;
        let ranking = RankingPolicy::from_str(&var_or("RANKING", "threshold:1"))?;

        let spot_depth = parse_value::<usize>("SPOT_DEPTH", &var_or("SPOT_DEPTH", "1"))?;
        let p2p_rows = parse_value::<usize>("P2P_ROWS", &var_or("P2P_ROWS", "10"))?;
        let spot_price = parse_value::<SpotPricePolicy>("SPOT_PRICE", &var_or("SPOT_PRICE", "mid"))?;
        let exit_direction = parse_value::<Direction>(
            "EXIT_DIRECTION",
            &var_or("EXIT_DIRECTION", "BUY")
        )?;
        let include_direct_cycles = parse_value::<bool>(
            "INCLUDE_DIRECT_CYCLES",
            &var_or("INCLUDE_DIRECT_CYCLES", "false")
        )?;
        let allow_empty_listings = parse_value::<bool>(
            "ALLOW_EMPTY_LISTINGS",
            &var_or("ALLOW_EMPTY_LISTINGS", "false")
        )?;

        let spot_url = var_or("SPOT_URL", DEFAULT_SPOT_URL);
        let p2p_url = var_or("P2P_URL", DEFAULT_P2P_URL);
        let request_timeout_secs = parse_value::<u64>(
            "REQUEST_TIMEOUT_SECS",
            &var_or("REQUEST_TIMEOUT_SECS", "10")
        )?;

        let log_level = parse_value::<Level>("LOG_LEVEL", &var_or("LOG_LEVEL", "info"))?;
        let log_rotation = parse_value::<LogRotation>("LOG_ROTATION", &var_or("LOG_ROTATION", "daily"))?;
        let max_files = var("LOG_MAX_FILES")
            .map(|raw| parse_value::<usize>("LOG_MAX_FILES", &raw))
            .transpose()?;

        let log_config = LogConfig {
            directory: PathBuf::from(var_or("LOG_DIRECTORY", "logs")),
            filename_prefix: var_or("LOG_FILENAME_PREFIX", "p2p_arbitrage"),
            rotation: log_rotation,
            max_files,
        };

        let config = Config {
            debug,
            symbols,
            payments,
            spot_pairs,
            fiat,
            initial_amount,
            max_depth,
            ranking,
            spot_depth,
            p2p_rows,
            spot_price,
            exit_direction,
            include_direct_cycles,
            allow_empty_listings,
            spot_url,
            p2p_url,
            request_timeout_secs,
            log_level,
            log_config,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the scan cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure_unique("symbol", &self.symbols)?;
        ensure_unique("payment method", &self.payments)?;

        if self.initial_amount <= Decimal::ZERO {
            return Err(
                ArbitrageError::InvalidConfiguration(
                    format!("initial amount must be positive, got {}", self.initial_amount)
                )
            );
        }
        if self.max_depth == 0 {
            return Err(ArbitrageError::InvalidConfiguration("max depth must be at least 1".into()));
        }
        if self.spot_depth == 0 || self.p2p_rows == 0 {
            return Err(
                ArbitrageError::InvalidConfiguration(
                    "spot depth and P2P rows must be at least 1".into()
                )
            );
        }
        if let Some(pair) = self.spot_pairs.iter().find(|p| p.base == p.quote) {
            return Err(
                ArbitrageError::InvalidConfiguration(
                    format!("spot pair {} quotes a symbol against itself", pair)
                )
            );
        }

        Ok(())
    }

    /// Spot pairs whose both ends are in the symbol set, in configured order
    pub fn quoted_pairs(&self) -> Vec<SpotPair> {
        self.spot_pairs
            .iter()
            .filter(|pair| {
                let covered =
                    self.symbols.iter().any(|s| *s == pair.base) &&
                    self.symbols.iter().any(|s| *s == pair.quote);
                if !covered {
                    tracing::debug!("Skipping spot pair {} outside the symbol set", pair);
                }
                covered
            })
            .cloned()
            .collect()
    }

    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_list(raw: &str) -> Vec<Arc<str>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Arc::from)
        .collect()
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T> where T: FromStr, T::Err: fmt::Display {
    raw.trim()
        .parse::<T>()
        .map_err(|e| {
            ArbitrageError::InvalidConfiguration(
                format!("failed to parse {}{}='{}': {}", ENV_PREFIX, name, raw, e)
            )
        })
}

fn ensure_unique(what: &str, items: &[Arc<str>]) -> Result<()> {
    if items.is_empty() {
        return Err(ArbitrageError::InvalidConfiguration(format!("{} set is empty", what)));
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.as_ref()) {
            return Err(
                ArbitrageError::InvalidConfiguration(format!("duplicate {} '{}'", what, item))
            );
        }
    }

    Ok(())
}
