//! Portfolio aggregate: the per-user container, its open positions (assets) and
//! closed positions (trades).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Portfolio {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub portfolio_type: String,
}

/// An open position. `currency` is copied from the instrument at creation time
/// and does not follow later instrument updates.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Asset {
    pub id: i64,
    pub portfolio_id: i64,
    pub instrument_id: i64,
    #[serde(with = "crate::dates::wire_date")]
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub volume: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetCreate {
    pub instrument_id: i64,
    #[serde(with = "crate::dates::wire_date")]
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub volume: f64,
}

/// Patch payload: buy price and volume are the only mutable fields.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AssetUpdate {
    pub buy_price: Option<f64>,
    pub volume: Option<f64>,
}

impl AssetUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.buy_price.is_none() && self.volume.is_none() {
            return Err(ApiError::Validation(
                "No updatable field supplied, expected buy_price or volume.".into(),
            ));
        }
        Ok(())
    }
}

/// A closed position: the originating asset's linkage plus the sale.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trade {
    pub id: i64,
    pub portfolio_id: i64,
    pub instrument_id: i64,
    #[serde(with = "crate::dates::wire_date")]
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    #[serde(with = "crate::dates::wire_date")]
    pub sell_date: NaiveDate,
    pub sell_price: f64,
    pub volume: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeCreate {
    pub asset_id: i64,
    #[serde(with = "crate::dates::wire_date")]
    pub sell_date: NaiveDate,
    pub sell_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_type_serializes_as_type() {
        let portfolio = Portfolio {
            id: 1,
            user_id: 2,
            portfolio_type: "Overview".into(),
        };
        let json = serde_json::to_value(&portfolio).unwrap();
        assert_eq!(json["type"], "Overview");
        assert!(json.get("portfolio_type").is_none());
    }

    #[test]
    fn asset_update_requires_a_field() {
        assert!(AssetUpdate::default().validate().is_err());
        let patch: AssetUpdate = serde_json::from_str(r#"{"volume":2}"#).unwrap();
        assert!(patch.validate().is_ok());
        assert!(patch.buy_price.is_none());
    }

    #[test]
    fn trade_create_parses_wire_sell_date() {
        let body: TradeCreate =
            serde_json::from_str(r#"{"asset_id":4,"sell_date":"05/07/2025","sell_price":1.5}"#)
                .unwrap();
        assert_eq!(body.sell_date, NaiveDate::from_ymd_opt(2025, 7, 5).unwrap());
    }
}
