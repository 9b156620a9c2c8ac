//! Order data access.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{Order, OrderCreate, OrderFilter, OrderUpdate};

pub async fn create_order(
    pool: &PgPool,
    user_id: i64,
    order_create: &OrderCreate,
) -> Result<Order, ApiError> {
    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, instrument_id, date, volume, price, type) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(user_id)
    .bind(order_create.instrument_id)
    .bind(order_create.date)
    .bind(order_create.volume)
    .bind(order_create.price)
    .bind(&order_create.order_type)
    .fetch_one(pool)
    .await?;
    tracing::debug!(order_id = order.id, user_id, "created order");
    Ok(order)
}

/// List a user's orders. All supplied filters AND-combine; date bounds are
/// inclusive on both ends.
pub async fn list_orders(
    pool: &PgPool,
    user_id: i64,
    filter: &OrderFilter,
) -> Result<Vec<Order>, ApiError> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders \
         WHERE user_id = $1 \
           AND ($2::bigint IS NULL OR instrument_id = $2) \
           AND ($3::date IS NULL OR date >= $3) \
           AND ($4::date IS NULL OR date <= $4) \
           AND ($5::text IS NULL OR type = $5) \
         ORDER BY id",
    )
    .bind(user_id)
    .bind(filter.instrument_id)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .bind(filter.order_type.as_deref())
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn get_order_by_id(pool: &PgPool, order_id: i64) -> Result<Option<Order>, ApiError> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// Patch an order: absent fields keep their stored value.
pub async fn update_order(
    pool: &PgPool,
    order_id: i64,
    update: &OrderUpdate,
) -> Result<Order, ApiError> {
    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET \
            date = COALESCE($2::date, date), \
            volume = COALESCE($3::double precision, volume), \
            price = COALESCE($4::double precision, price), \
            type = COALESCE($5::text, type) \
         WHERE id = $1 RETURNING *",
    )
    .bind(order_id)
    .bind(update.date)
    .bind(update.volume)
    .bind(update.price)
    .bind(update.order_type.as_deref())
    .fetch_one(pool)
    .await?;
    Ok(order)
}

/// Remove all of a user's orders, returning the deleted rows.
pub async fn delete_orders_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Order>, ApiError> {
    let orders = sqlx::query_as::<_, Order>("DELETE FROM orders WHERE user_id = $1 RETURNING *")
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    tracing::debug!(user_id, count = orders.len(), "deleted orders");
    Ok(orders)
}
