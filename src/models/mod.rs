pub mod binance_models;
pub mod cycle;
pub mod quote;
pub mod symbol;
