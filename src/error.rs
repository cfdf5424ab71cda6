use std::sync::Arc;

use thiserror::Error;

use crate::enums::direction::Direction;

/// Errors raised while fetching quotes, building rate tables and evaluating cycles
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArbitrageError {
    /// Transport, HTTP status or payload decoding failure
    #[error("Quote source {source_name} unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// The source answered but had nothing to offer for the request
    #[error("No listings returned for {request}")]
    NoListings {
        request: String,
    },

    /// The source returned a price that cannot be used as a rate
    #[error("Invalid quote from {source_name}: {detail}")]
    InvalidQuote {
        source_name: String,
        detail: String,
    },

    #[error("No conversion rate for {from} -> {to}")]
    MissingRate {
        from: Arc<str>,
        to: Arc<str>,
    },

    #[error("No P2P quote for {direction} {symbol} via {payment}")]
    MissingQuote {
        direction: Direction,
        symbol: Arc<str>,
        payment: Arc<str>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Checked decimal arithmetic overflowed or divided by zero
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

impl ArbitrageError {
    pub fn source_unavailable(source_name: &str, message: impl ToString) -> Self {
        ArbitrageError::SourceUnavailable {
            source_name: source_name.to_string(),
            message: message.to_string(),
        }
    }

    pub fn invalid_quote(source_name: &str, detail: impl ToString) -> Self {
        ArbitrageError::InvalidQuote {
            source_name: source_name.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Errors that only affect a single candidate and must not abort a scan
    #[inline]
    pub fn is_coverage_gap(&self) -> bool {
        matches!(
            self,
            ArbitrageError::MissingRate { .. } |
                ArbitrageError::MissingQuote { .. } |
                ArbitrageError::Arithmetic(_)
        )
    }
}

pub type Result<T, E = ArbitrageError> = std::result::Result<T, E>;
