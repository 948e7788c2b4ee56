use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use time::Date;
use tradelink_core::ValidationError;

use crate::Product;

/// A futures contract that delivers an interest rate swap.
///
/// Deserialized values pass through [`DeliverableSwapFuture::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DeliverableSwapFutureFields")]
pub struct DeliverableSwapFuture {
    notional: f64,
    currency: String,
    last_trade_date: Date,
    delivery_date: Date,
    underlying_swap: String,
}

impl DeliverableSwapFuture {
    pub fn new(
        notional: f64,
        currency: impl AsRef<str>,
        last_trade_date: Date,
        delivery_date: Date,
        underlying_swap: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        validate_positive("notional", notional)?;
        if delivery_date < last_trade_date {
            return Err(ValidationError::InvalidDateOrder {
                earlier: "lastTradeDate",
                later: "deliveryDate",
            });
        }

        Ok(Self {
            notional,
            currency: validate_currency_code(currency.as_ref())?,
            last_trade_date,
            delivery_date,
            underlying_swap: underlying_swap.into(),
        })
    }

    pub fn notional(&self) -> f64 {
        self.notional
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn last_trade_date(&self) -> Date {
        self.last_trade_date
    }

    pub fn delivery_date(&self) -> Date {
        self.delivery_date
    }

    pub fn underlying_swap(&self) -> &str {
        &self.underlying_swap
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliverableSwapFutureFields {
    notional: f64,
    currency: String,
    last_trade_date: Date,
    delivery_date: Date,
    underlying_swap: String,
}

impl TryFrom<DeliverableSwapFutureFields> for DeliverableSwapFuture {
    type Error = ValidationError;

    fn try_from(fields: DeliverableSwapFutureFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.notional,
            fields.currency,
            fields.last_trade_date,
            fields.delivery_date,
            fields.underlying_swap,
        )
    }
}

impl Product for DeliverableSwapFuture {
    const SECURITY_TYPE: &'static str = "DeliverableSwapFuture";
}

// Floats compare by bit pattern so that `Eq` and `Hash` agree.
impl PartialEq for DeliverableSwapFuture {
    fn eq(&self, other: &Self) -> bool {
        self.notional.to_bits() == other.notional.to_bits()
            && self.currency == other.currency
            && self.last_trade_date == other.last_trade_date
            && self.delivery_date == other.delivery_date
            && self.underlying_swap == other.underlying_swap
    }
}

impl Eq for DeliverableSwapFuture {}

impl Hash for DeliverableSwapFuture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.notional.to_bits().hash(state);
        self.currency.hash(state);
        self.last_trade_date.hash(state);
        self.delivery_date.hash(state);
        self.underlying_swap.hash(state);
    }
}

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}
