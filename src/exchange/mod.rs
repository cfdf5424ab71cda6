pub mod binance;
pub mod client;
pub mod p2p;
