use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::FromRow;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("price must not be negative")]
    Negative,
    #[error("price is not a decimal number: {0}")]
    Malformed(String),
}

/// Non-negative amount with two fractional digits.
///
/// Stored as NUMERIC on Postgres and TEXT on SQLite; both are read back as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        // Half-cents round away from zero.
        let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        Ok(Self(amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<String> for Price {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let amount = value
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::Malformed(value.clone()))?;
        Self::new(amount)
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub price: Price,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn new(name: String, price: Price) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(Decimal),
    Text(String),
}

impl PriceInput {
    pub fn into_price(self) -> Result<Price, PriceError> {
        match self {
            PriceInput::Number(amount) => Price::new(amount),
            PriceInput::Text(raw) => Price::try_from(raw),
        }
    }
}
