//! Instrument endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::crud;
use crate::error::ApiError;
use crate::models::{Instrument, InstrumentCreate, InstrumentFilter, InstrumentUpdate};
use crate::response::Collection;
use crate::state::AppState;

pub async fn list_instruments(
    State(state): State<AppState>,
    Query(filter): Query<InstrumentFilter>,
) -> Result<Json<Collection<Instrument>>, ApiError> {
    let instruments = crud::instruments::list_instruments(&state.pool, &filter).await?;
    Ok(Json(instruments.into()))
}

pub async fn create_instrument(
    State(state): State<AppState>,
    Json(instrument_in): Json<InstrumentCreate>,
) -> Result<Json<Instrument>, ApiError> {
    instrument_in.validate()?;
    if crud::instruments::get_instrument_by_symbol(&state.pool, &instrument_in.symbol)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Instrument with symbol already exists.".into()));
    }
    let instrument = crud::instruments::create_instrument(&state.pool, &instrument_in).await?;
    Ok(Json(instrument))
}

pub async fn get_instrument(
    State(state): State<AppState>,
    Path(instrument_id): Path<i64>,
) -> Result<Json<Instrument>, ApiError> {
    let instrument = crud::instruments::get_instrument_by_id(&state.pool, instrument_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No instrument found with this id.".into()))?;
    Ok(Json(instrument))
}

/// Patch currency and/or the OHLC price quartet; untouched fields keep their
/// stored values.
pub async fn update_instrument(
    State(state): State<AppState>,
    Path(instrument_id): Path<i64>,
    Json(update): Json<InstrumentUpdate>,
) -> Result<Json<Instrument>, ApiError> {
    let mut instrument = crud::instruments::get_instrument_by_id(&state.pool, instrument_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No instrument found with this id.".into()))?;
    update.validate()?;
    if let Some(prices) = &update.prices {
        instrument = crud::instruments::update_instrument_prices(
            &state.pool,
            instrument.id,
            prices[0],
            prices[1],
            prices[2],
            prices[3],
        )
        .await?;
    }
    if let Some(currency) = &update.currency {
        instrument =
            crud::instruments::update_instrument_currency(&state.pool, instrument.id, currency)
                .await?;
    }
    Ok(Json(instrument))
}
