//! Order records: the per-user transaction log, independent of asset/trade
//! bookkeeping. `type` is free text, conventionally "BUY" or "SELL".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub instrument_id: i64,
    #[serde(with = "crate::dates::wire_date")]
    pub date: NaiveDate,
    pub volume: f64,
    pub price: f64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub order_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub instrument_id: i64,
    #[serde(with = "crate::dates::wire_date")]
    pub date: NaiveDate,
    pub volume: f64,
    pub price: f64,
    #[serde(rename = "type")]
    pub order_type: String,
}

/// Patch payload: any subset of the order's own fields.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OrderUpdate {
    #[serde(default, with = "crate::dates::wire_date_opt")]
    pub date: Option<NaiveDate>,
    pub volume: Option<f64>,
    pub price: Option<f64>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
}

impl OrderUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.date.is_none()
            && self.volume.is_none()
            && self.price.is_none()
            && self.order_type.is_none()
        {
            return Err(ApiError::Validation(
                "No updatable field supplied, expected date, volume, price or type.".into(),
            ));
        }
        Ok(())
    }
}

/// Typed list filters, AND-combined. Date bounds are inclusive.
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub instrument_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub order_type: Option<String>,
}
