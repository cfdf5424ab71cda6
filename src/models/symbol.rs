use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{ Deserialize, Deserializer, Serialize, Serializer };

use crate::error::ArbitrageError;

/// A quoted spot trading pair: one unit of `base` is worth `rate` units of `quote`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpotPair {
    pub base: Arc<str>, // Using Arc<str> to reduce clone costs
    pub quote: Arc<str>,
}

impl SpotPair {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.trim().to_uppercase().into(),
            quote: quote.trim().to_uppercase().into(),
        }
    }

    /// Exchange symbol code, e.g. `BTCUSDT`
    #[inline]
    pub fn code(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }

    #[inline]
    pub fn involves(&self, symbol: &str) -> bool {
        self.base.as_ref() == symbol || self.quote.as_ref() == symbol
    }
}

impl FromStr for SpotPair {
    type Err = ArbitrageError;

    /// Parses `BASE/QUOTE`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, quote)) if !base.trim().is_empty() && !quote.trim().is_empty() => {
                Ok(SpotPair::new(base, quote))
            }
            _ =>
                Err(
                    ArbitrageError::InvalidConfiguration(
                        format!("invalid spot pair '{}', expected BASE/QUOTE", s)
                    )
                ),
        }
    }
}

impl fmt::Display for SpotPair {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl Serialize for SpotPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpotPair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let pair: SpotPair = " btc/Usdt ".parse().unwrap();
        assert_eq!(pair.base.as_ref(), "BTC");
        assert_eq!(pair.quote.as_ref(), "USDT");
        assert_eq!(pair.code(), "BTCUSDT");
        assert_eq!(pair.to_string(), "BTC/USDT");
        assert!(pair.involves("USDT"));
        assert!(!pair.involves("ETH"));
    }

    #[test]
    fn test_parse_rejects_malformed_pairs() {
        assert!("BTCUSDT".parse::<SpotPair>().is_err());
        assert!("BTC/".parse::<SpotPair>().is_err());
        assert!("/USDT".parse::<SpotPair>().is_err());
    }
}
