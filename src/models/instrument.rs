//! Instrument records: tradable securities with a unique market symbol and
//! nullable OHLC prices (null until the first price update).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

pub const MAX_FIELD_LENGTH: usize = 255;
pub const MAX_CURRENCY_LENGTH: usize = 5;

/// Number of values expected in a price update: open, high, low, close.
pub const PRICE_FIELDS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Instrument {
    pub id: i64,
    pub name: String,
    pub exchange: String,
    pub symbol: String,
    pub currency: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentCreate {
    pub name: String,
    pub exchange: String,
    pub symbol: String,
    pub currency: String,
}

impl InstrumentCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        for (field, value) in [
            ("name", &self.name),
            ("exchange", &self.exchange),
            ("symbol", &self.symbol),
        ] {
            if value.is_empty() || value.len() > MAX_FIELD_LENGTH {
                return Err(ApiError::Validation(format!(
                    "{} must be between 1 and {} characters",
                    field, MAX_FIELD_LENGTH
                )));
            }
        }
        validate_currency(&self.currency)
    }
}

/// Patch payload: `prices` is the OHLC quartet `[open, high, low, close]`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InstrumentUpdate {
    pub currency: Option<String>,
    pub prices: Option<Vec<f64>>,
}

impl InstrumentUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.currency.is_none() && self.prices.is_none() {
            return Err(ApiError::Validation(
                "No updatable field supplied, expected currency or prices.".into(),
            ));
        }
        if let Some(currency) = &self.currency {
            validate_currency(currency)?;
        }
        if let Some(prices) = &self.prices {
            if prices.len() != PRICE_FIELDS {
                return Err(ApiError::Validation(format!(
                    "prices must contain exactly {} values: open, high, low, close",
                    PRICE_FIELDS
                )));
            }
        }
        Ok(())
    }
}

/// Exact-match list filters, AND-combined when several are supplied.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InstrumentFilter {
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub symbol: Option<String>,
    pub currency: Option<String>,
}

fn validate_currency(currency: &str) -> Result<(), ApiError> {
    if currency.is_empty() || currency.len() > MAX_CURRENCY_LENGTH {
        return Err(ApiError::Validation(format!(
            "currency must be between 1 and {} characters",
            MAX_CURRENCY_LENGTH
        )));
    }
    Ok(())
}
