//! Resource routes. Nested resources resolve their parents inside the
//! handlers, in a fixed order (user, then portfolio, then instrument).

use axum::{routing::get, routing::post, Router};

use crate::handlers::{assets, instruments, login, orders, portfolio, summary, trades, users};
use crate::state::AppState;

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login::login))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/lookup", get(users::lookup_user))
        .route(
            "/users/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/instruments",
            get(instruments::list_instruments).post(instruments::create_instrument),
        )
        .route(
            "/instruments/:instrument_id",
            get(instruments::get_instrument).put(instruments::update_instrument),
        )
        .route(
            "/users/:user_id/portfolio",
            get(portfolio::get_portfolio)
                .post(portfolio::create_portfolio)
                .delete(portfolio::delete_portfolio),
        )
        .route(
            "/users/:user_id/portfolio/assets",
            get(assets::list_assets)
                .post(assets::create_asset)
                .delete(assets::delete_assets),
        )
        .route(
            "/users/:user_id/portfolio/assets/:asset_id",
            get(assets::get_asset).put(assets::update_asset),
        )
        .route(
            "/users/:user_id/portfolio/trades",
            get(trades::list_trades).post(trades::create_trade),
        )
        .route(
            "/users/:user_id/orders",
            get(orders::list_orders)
                .post(orders::create_order)
                .delete(orders::delete_orders),
        )
        .route(
            "/users/:user_id/orders/:order_id",
            get(orders::get_order).put(orders::update_order),
        )
        .route(
            "/users/:user_id/summary",
            get(summary::get_summary)
                .post(summary::create_summary)
                .put(summary::update_summary),
        )
        .with_state(state)
}
