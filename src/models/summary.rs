//! Summary records: per-user aggregate figures, stored verbatim and mutated only
//! via explicit update.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Summary {
    pub id: i64,
    pub user_id: i64,
    pub ending_market_value: Option<f64>,
    pub beginning_market_value: Option<f64>,
    pub profit_loss: Option<f64>,
}

/// Patch payload: absent fields are left untouched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SummaryUpdate {
    pub ending_market_value: Option<f64>,
    pub beginning_market_value: Option<f64>,
    pub profit_loss: Option<f64>,
}

impl SummaryUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.ending_market_value.is_none()
            && self.beginning_market_value.is_none()
            && self.profit_loss.is_none()
        {
            return Err(ApiError::Validation(
                "No updatable field supplied, expected ending_market_value, beginning_market_value or profit_loss.".into(),
            ));
        }
        Ok(())
    }
}
