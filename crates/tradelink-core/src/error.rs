use thiserror::Error;

use crate::StandardId;

/// Validation and contract errors exposed by `tradelink-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: &'static str },

    #[error("missing required field '{field}'")]
    MissingRequiredField { field: &'static str },

    #[error("link to '{identifier}' has not been resolved")]
    UnresolvedLink { identifier: StandardId },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },
    #[error("'{later}' must not be before '{earlier}'")]
    InvalidDateOrder {
        earlier: &'static str,
        later: &'static str,
    },
}

