use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{ Deserialize, Serialize };
use strum_macros::{ Display, EnumString };

use crate::error::ArbitrageError;

/// How a single spot rate is derived from the top of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SpotPricePolicy {
    /// `(best_bid + best_ask) / 2`
    Mid,
    /// `best_bid` alone
    #[strum(to_string = "bid", serialize = "best-bid")]
    #[serde(rename = "bid")]
    BestBid,
}

/// Which evaluated cycles are reported, and in what order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingPolicy {
    /// Keep cycles whose profit percentage is strictly above the value, in enumeration order
    Threshold(Decimal),
    /// Keep everything, least profitable first
    FullSort,
}

impl FromStr for RankingPolicy {
    type Err = ArbitrageError;

    /// Accepts `full-sort` or `threshold:<percent>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();

        if value == "full-sort" || value == "sort" {
            return Ok(RankingPolicy::FullSort);
        }

        match value.split_once(':') {
            Some(("threshold", pct)) =>
                Decimal::from_str(pct.trim())
                    .map(RankingPolicy::Threshold)
                    .map_err(|e| {
                        ArbitrageError::InvalidConfiguration(
                            format!("invalid ranking threshold '{}': {}", pct, e)
                        )
                    }),
            _ =>
                Err(
                    ArbitrageError::InvalidConfiguration(
                        format!("unknown ranking policy '{}', expected 'full-sort' or 'threshold:<pct>'", s)
                    )
                ),
        }
    }
}

impl fmt::Display for RankingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingPolicy::Threshold(pct) => write!(f, "threshold:{}", pct),
            RankingPolicy::FullSort => write!(f, "full-sort"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ranking_policy_parsing() {
        assert_eq!("full-sort".parse::<RankingPolicy>().unwrap(), RankingPolicy::FullSort);
        assert_eq!(
            "threshold:1".parse::<RankingPolicy>().unwrap(),
            RankingPolicy::Threshold(dec!(1))
        );
        assert_eq!(
            " Threshold: 2.5 ".parse::<RankingPolicy>().unwrap(),
            RankingPolicy::Threshold(dec!(2.5))
        );
        assert!("threshold:abc".parse::<RankingPolicy>().is_err());
        assert!("best".parse::<RankingPolicy>().is_err());
    }

    #[test]
    fn test_ranking_policy_display_round_trips() {
        let policy = RankingPolicy::Threshold(dec!(1.5));
        assert_eq!(policy.to_string().parse::<RankingPolicy>().unwrap(), policy);
    }

    #[test]
    fn test_spot_price_policy_parsing() {
        assert_eq!("mid".parse::<SpotPricePolicy>().unwrap(), SpotPricePolicy::Mid);
        assert_eq!("BID".parse::<SpotPricePolicy>().unwrap(), SpotPricePolicy::BestBid);
        assert_eq!("best-bid".parse::<SpotPricePolicy>().unwrap(), SpotPricePolicy::BestBid);
        assert!("ask".parse::<SpotPricePolicy>().is_err());
    }

    #[test]
    fn test_spot_price_policy_json_matches_env_syntax() {
        for policy in [SpotPricePolicy::Mid, SpotPricePolicy::BestBid] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy));

            let raw: String = serde_json::from_str(&json).unwrap();
            assert_eq!(raw.parse::<SpotPricePolicy>().unwrap(), policy);
            assert_eq!(serde_json::from_str::<SpotPricePolicy>(&json).unwrap(), policy);
        }
    }
}
