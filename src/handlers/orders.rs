//! Order endpoints, nested under `/users/{user_id}/orders`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::require_user;
use crate::crud;
use crate::dates::parse_wire_date;
use crate::error::ApiError;
use crate::models::{Order, OrderCreate, OrderFilter, OrderUpdate};
use crate::response::Collection;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub instrument_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
}

impl OrderListQuery {
    /// Convert wire dates at the boundary; all filters AND-combine downstream.
    fn into_filter(self) -> Result<OrderFilter, ApiError> {
        Ok(OrderFilter {
            instrument_id: self.instrument_id,
            start_date: parse_date_param("start_date", self.start_date.as_deref())?,
            end_date: parse_date_param("end_date", self.end_date.as_deref())?,
            order_type: self.order_type,
        })
    }
}

fn parse_date_param(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    value
        .map(|s| {
            parse_wire_date(s).map_err(|_| {
                ApiError::Validation(format!("Invalid {}, expected DD/MM/YYYY.", name))
            })
        })
        .transpose()
}

pub async fn list_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<OrderListQuery>,
) -> Result<Json<Collection<Order>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let filter = params.into_filter()?;
    let orders = crud::orders::list_orders(&state.pool, user_id, &filter).await?;
    Ok(Json(orders.into()))
}

pub async fn create_order(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(order_in): Json<OrderCreate>,
) -> Result<Json<Order>, ApiError> {
    require_user(&state.pool, user_id).await?;
    if crud::instruments::get_instrument_by_id(&state.pool, order_in.instrument_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(
            "No valid instrument found with instrument id.".into(),
        ));
    }
    let order = crud::orders::create_order(&state.pool, user_id, &order_in).await?;
    Ok(Json(order))
}

/// Delete all of the user's orders, returning the removed rows.
pub async fn delete_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Collection<Order>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let orders = crud::orders::delete_orders_by_user(&state.pool, user_id).await?;
    Ok(Json(orders.into()))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path((user_id, order_id)): Path<(i64, i64)>,
) -> Result<Json<Order>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let order = find_order_for_user(&state, user_id, order_id).await?;
    Ok(Json(order))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path((user_id, order_id)): Path<(i64, i64)>,
    Json(update): Json<OrderUpdate>,
) -> Result<Json<Order>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let order = find_order_for_user(&state, user_id, order_id).await?;
    update.validate()?;
    let order = crud::orders::update_order(&state.pool, order.id, &update).await?;
    Ok(Json(order))
}

async fn find_order_for_user(
    state: &AppState,
    user_id: i64,
    order_id: i64,
) -> Result<Order, ApiError> {
    crud::orders::get_order_by_id(&state.pool, order_id)
        .await?
        .filter(|order| order.user_id == user_id)
        .ok_or_else(|| ApiError::NotFound("No order found with this id for the user.".into()))
}
