pub mod app;
pub mod arbitrage;
pub mod config;
pub mod enums;
pub mod error;
pub mod exchange;
pub mod models;
pub mod utils;

pub use arbitrage::detector::{ ArbitrageDetector, ScanReport };
pub use arbitrage::snapshot::{ fetch_snapshot, MarketSnapshot };
pub use config::Config;
pub use error::{ ArbitrageError, Result };
