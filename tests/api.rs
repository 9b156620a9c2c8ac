//! End-to-end API tests against a live PostgreSQL.
//!
//! They require the `POSTGRES_*` environment variables and create a
//! `<POSTGRES_DB>_test` database on demand, so they are ignored by default:
//! `cargo test -- --ignored`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use investment_tracker::{app, create_tables, ensure_database_exists, AppState, Settings};
use serde_json::{json, Value};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{}{}", prefix, nanos, n)
}

async fn spawn_app() -> (String, reqwest::Client) {
    dotenvy::dotenv().ok();
    let mut settings = Settings::from_env().expect("POSTGRES_* environment variables must be set");
    settings.postgres_db = format!("{}_test", settings.postgres_db);
    let url = settings.database_url();
    ensure_database_exists(&url).await.unwrap();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .unwrap();
    create_tables(&pool).await.unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app(AppState { pool })).await.unwrap();
    });
    (base, reqwest::Client::new())
}

async fn post_json(client: &reqwest::Client, url: String, body: Value) -> (u16, Value) {
    let response = client.post(url).json(&body).send().await.unwrap();
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(client: &reqwest::Client, url: String) -> (u16, Value) {
    let response = client.get(url).send().await.unwrap();
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn put_json(client: &reqwest::Client, url: String, body: Value) -> (u16, Value) {
    let response = client.put(url).json(&body).send().await.unwrap();
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn delete_json(client: &reqwest::Client, url: String) -> (u16, Value) {
    let response = client.delete(url).send().await.unwrap();
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

fn user_payload() -> Value {
    json!({
        "username": unique("user"),
        "email": format!("{}@example.com", unique("mail")),
        "password": "password123",
    })
}

fn instrument_payload() -> Value {
    json!({
        "name": unique("C&C GROUP ORD EURO."),
        "exchange": "LSE",
        "symbol": unique("SYM"),
        "currency": "GBX",
    })
}

async fn create_user(client: &reqwest::Client, base: &str) -> Value {
    let (status, body) = post_json(client, format!("{}/users", base), user_payload()).await;
    assert_eq!(status, 200);
    body
}

async fn create_instrument(client: &reqwest::Client, base: &str) -> Value {
    let (status, body) =
        post_json(client, format!("{}/instruments", base), instrument_payload()).await;
    assert_eq!(status, 200);
    body
}

async fn create_portfolio(client: &reqwest::Client, base: &str, user_id: i64) -> Value {
    let (status, body) = post_json(
        client,
        format!("{}/users/{}/portfolio", base, user_id),
        Value::Null,
    )
    .await;
    assert_eq!(status, 200);
    body
}

// - - - - - - - - - - - - - - - - - - -
// USERS

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn create_user_rejects_duplicate_email_and_username() {
    let (base, client) = spawn_app().await;
    let payload = user_payload();
    let (status, created) = post_json(&client, format!("{}/users", base), payload.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(created["username"], payload["username"]);
    assert_eq!(created["email"], payload["email"]);
    assert!(created["id"].is_i64());
    assert!(created.get("hashed_password").is_none());

    // Same email, fresh username.
    let mut dup_email = payload.clone();
    dup_email["username"] = json!(unique("user"));
    let (status, _) = post_json(&client, format!("{}/users", base), dup_email).await;
    assert_eq!(status, 400);

    // Same username, fresh email.
    let mut dup_username = payload.clone();
    dup_username["email"] = json!(format!("{}@example.com", unique("mail")));
    let (status, _) = post_json(&client, format!("{}/users", base), dup_username).await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn user_is_retrievable_by_id_username_and_email() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let id = user["id"].as_i64().unwrap();
    let username = user["username"].as_str().unwrap();
    let email = user["email"].as_str().unwrap();

    let (status, by_id) = get_json(&client, format!("{}/users/{}", base, id)).await;
    assert_eq!(status, 200);
    assert_eq!(by_id["username"], user["username"]);

    let (status, by_username) = get_json(
        &client,
        format!("{}/users/lookup?username={}", base, username),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(by_username["id"], user["id"]);

    let (status, by_email) =
        get_json(&client, format!("{}/users/lookup?email={}", base, email)).await;
    assert_eq!(status, 200);
    assert_eq!(by_email["id"], user["id"]);

    // Mismatched username/email pair.
    let (status, _) = get_json(
        &client,
        format!(
            "{}/users/lookup?email={}&username={}",
            base,
            email,
            unique("other")
        ),
    )
    .await;
    assert_eq!(status, 400);

    // Neither parameter.
    let (status, _) = get_json(&client, format!("{}/users/lookup", base)).await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn deleted_user_is_gone_and_second_delete_fails() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let id = user["id"].as_i64().unwrap();
    let email = user["email"].as_str().unwrap();

    let (status, deleted) = delete_json(&client, format!("{}/users/{}", base, id)).await;
    assert_eq!(status, 200);
    assert_eq!(deleted["id"], user["id"]);
    assert_eq!(deleted["email"], user["email"]);

    let (status, _) = get_json(&client, format!("{}/users/{}", base, id)).await;
    assert_eq!(status, 400);
    let (status, _) = get_json(&client, format!("{}/users/lookup?email={}", base, email)).await;
    assert_eq!(status, 400);
    let (status, _) = delete_json(&client, format!("{}/users/{}", base, id)).await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn user_patch_updates_only_supplied_fields() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let id = user["id"].as_i64().unwrap();

    let (status, _) = put_json(&client, format!("{}/users/{}", base, id), json!({})).await;
    assert_eq!(status, 400);

    let new_username = unique("renamed");
    let (status, updated) = put_json(
        &client,
        format!("{}/users/{}", base, id),
        json!({ "username": new_username }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["username"], json!(new_username));
    assert_eq!(updated["email"], user["email"]);

    // Old password still verifies after a username-only patch.
    let (status, _) = post_json(
        &client,
        format!("{}/login", base),
        json!({ "username": new_username, "password": "password123" }),
    )
    .await;
    assert_eq!(status, 200);

    let (status, _) = put_json(
        &client,
        format!("{}/users/{}", base, id),
        json!({ "password": "newpassword456" }),
    )
    .await;
    assert_eq!(status, 200);
    let (status, _) = post_json(
        &client,
        format!("{}/login", base),
        json!({ "username": new_username, "password": "newpassword456" }),
    )
    .await;
    assert_eq!(status, 200);
    let (status, _) = post_json(
        &client,
        format!("{}/login", base),
        json!({ "username": new_username, "password": "password123" }),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn login_requires_matching_credentials() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let email = user["email"].as_str().unwrap();

    let (status, body) = post_json(
        &client,
        format!("{}/login", base),
        json!({ "email": email, "password": "password123" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], user["id"]);

    let (status, _) = post_json(
        &client,
        format!("{}/login", base),
        json!({ "email": email, "password": "wrong-password" }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = post_json(
        &client,
        format!("{}/login", base),
        json!({ "password": "password123" }),
    )
    .await;
    assert_eq!(status, 400);
}

// - - - - - - - - - - - - - - - - - - -
// INSTRUMENTS

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn instrument_create_echoes_fields_and_rejects_duplicate_symbol() {
    let (base, client) = spawn_app().await;
    let payload = json!({
        "name": "C&C GROUP ORD EURO.01",
        "exchange": "LSE",
        "symbol": unique("CCR"),
        "currency": "GBX",
    });
    let (status, created) =
        post_json(&client, format!("{}/instruments", base), payload.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(created["name"], payload["name"]);
    assert_eq!(created["exchange"], payload["exchange"]);
    assert_eq!(created["symbol"], payload["symbol"]);
    assert_eq!(created["currency"], payload["currency"]);
    assert!(created["open"].is_null());
    assert!(created["close"].is_null());

    let (status, _) = post_json(&client, format!("{}/instruments", base), payload).await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn instrument_patch_updates_exactly_the_supplied_fields() {
    let (base, client) = spawn_app().await;
    let instrument = create_instrument(&client, &base).await;
    let id = instrument["id"].as_i64().unwrap();
    let url = format!("{}/instruments/{}", base, id);

    let (status, _) = put_json(&client, url.clone(), json!({})).await;
    assert_eq!(status, 400);

    let (status, updated) =
        put_json(&client, url.clone(), json!({ "prices": [1.0, 2.0, 3.0, 4.0] })).await;
    assert_eq!(status, 200);
    assert_eq!(updated["open"], 1.0);
    assert_eq!(updated["high"], 2.0);
    assert_eq!(updated["low"], 3.0);
    assert_eq!(updated["close"], 4.0);
    assert_eq!(updated["currency"], "GBX");

    let (status, _) = put_json(&client, url.clone(), json!({ "prices": [1.0, 2.0] })).await;
    assert_eq!(status, 400);

    let (status, updated) = put_json(&client, url, json!({ "currency": "GBP" })).await;
    assert_eq!(status, 200);
    assert_eq!(updated["currency"], "GBP");
    assert_eq!(updated["open"], 1.0);
}

// - - - - - - - - - - - - - - - - - - -
// PORTFOLIO

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn portfolio_is_created_once_per_user() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    let url = format!("{}/users/{}/portfolio", base, user_id);

    // No portfolio yet.
    let (status, _) = get_json(&client, url.clone()).await;
    assert_eq!(status, 400);

    let (status, portfolio) = post_json(&client, url.clone(), Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(portfolio["user_id"], user["id"]);
    assert_eq!(portfolio["type"], "Overview");

    let (status, _) = post_json(&client, url.clone(), Value::Null).await;
    assert_eq!(status, 400);

    let (status, deleted) = delete_json(&client, url.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(deleted["id"], portfolio["id"]);

    let (status, _) = get_json(&client, url).await;
    assert_eq!(status, 400);
}

// - - - - - - - - - - - - - - - - - - -
// ASSETS

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn asset_copies_instrument_currency_and_patches_volume() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    let portfolio = create_portfolio(&client, &base, user_id).await;
    let instrument = create_instrument(&client, &base).await;
    let instrument_id = instrument["id"].as_i64().unwrap();
    let assets_url = format!("{}/users/{}/portfolio/assets", base, user_id);

    let (status, asset) = post_json(
        &client,
        assets_url.clone(),
        json!({
            "instrument_id": instrument_id,
            "buy_date": "04/07/2025",
            "buy_price": 1,
            "volume": 1,
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(asset["portfolio_id"], portfolio["id"]);
    assert_eq!(asset["instrument_id"], instrument["id"]);
    assert_eq!(asset["buy_price"], 1.0);
    assert_eq!(asset["volume"], 1.0);
    assert_eq!(asset["currency"], "GBX");
    assert_eq!(asset["buy_date"], "04/07/2025");

    // Patch volume only.
    let asset_id = asset["id"].as_i64().unwrap();
    let asset_url = format!("{}/{}", assets_url, asset_id);
    let (status, updated) = put_json(&client, asset_url.clone(), json!({ "volume": 2 })).await;
    assert_eq!(status, 200);
    assert_eq!(updated["buy_price"], 1.0);
    assert_eq!(updated["volume"], 2.0);

    // Changing the instrument's currency later does not touch the asset.
    let (status, _) = put_json(
        &client,
        format!("{}/instruments/{}", base, instrument_id),
        json!({ "currency": "GBP" }),
    )
    .await;
    assert_eq!(status, 200);
    let (status, unchanged) = get_json(&client, asset_url).await;
    assert_eq!(status, 200);
    assert_eq!(unchanged["currency"], "GBX");

    let (status, listed) = get_json(&client, assets_url.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(listed["count"], 1);

    let (status, removed) = delete_json(&client, assets_url.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(removed["count"], 1);
    let (status, listed) = get_json(&client, assets_url).await;
    assert_eq!(status, 200);
    assert_eq!(listed["count"], 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn asset_creation_requires_portfolio_and_instrument() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    let assets_url = format!("{}/users/{}/portfolio/assets", base, user_id);
    let payload = json!({
        "instrument_id": 1,
        "buy_date": "04/07/2025",
        "buy_price": 1,
        "volume": 1,
    });

    // No portfolio yet.
    let (status, _) = post_json(&client, assets_url.clone(), payload.clone()).await;
    assert_eq!(status, 400);

    create_portfolio(&client, &base, user_id).await;
    let (status, _) = post_json(
        &client,
        assets_url,
        json!({
            "instrument_id": i64::MAX,
            "buy_date": "04/07/2025",
            "buy_price": 1,
            "volume": 1,
        }),
    )
    .await;
    assert_eq!(status, 400);
}

// - - - - - - - - - - - - - - - - - - -
// TRADES

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn trade_carries_the_asset_linkage() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    let portfolio = create_portfolio(&client, &base, user_id).await;
    let instrument = create_instrument(&client, &base).await;

    let (status, asset) = post_json(
        &client,
        format!("{}/users/{}/portfolio/assets", base, user_id),
        json!({
            "instrument_id": instrument["id"],
            "buy_date": "04/07/2025",
            "buy_price": 1,
            "volume": 1,
        }),
    )
    .await;
    assert_eq!(status, 200);

    let trades_url = format!("{}/users/{}/portfolio/trades", base, user_id);
    let (status, trade) = post_json(
        &client,
        trades_url.clone(),
        json!({
            "asset_id": asset["id"],
            "sell_date": "05/07/2025",
            "sell_price": 1.5,
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(trade["portfolio_id"], portfolio["id"]);
    assert_eq!(trade["instrument_id"], instrument["id"]);
    assert_eq!(trade["buy_date"], "04/07/2025");
    assert_eq!(trade["sell_date"], "05/07/2025");
    assert_eq!(trade["sell_price"], 1.5);
    assert_eq!(trade["currency"], "GBX");

    let (status, listed) = get_json(&client, trades_url.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(listed["count"], 1);

    // Unknown asset id.
    let (status, _) = post_json(
        &client,
        trades_url,
        json!({
            "asset_id": i64::MAX,
            "sell_date": "05/07/2025",
            "sell_price": 1.5,
        }),
    )
    .await;
    assert_eq!(status, 400);
}

// - - - - - - - - - - - - - - - - - - -
// ORDERS

async fn create_order(
    client: &reqwest::Client,
    base: &str,
    user_id: i64,
    instrument_id: i64,
    date: &str,
    order_type: &str,
) -> Value {
    let (status, order) = post_json(
        client,
        format!("{}/users/{}/orders", base, user_id),
        json!({
            "instrument_id": instrument_id,
            "date": date,
            "volume": 1,
            "price": 1,
            "type": order_type,
        }),
    )
    .await;
    assert_eq!(status, 200);
    order
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn order_list_filters_combine_with_and() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    let first = create_instrument(&client, &base).await;
    let second = create_instrument(&client, &base).await;
    let first_id = first["id"].as_i64().unwrap();
    let second_id = second["id"].as_i64().unwrap();

    create_order(&client, &base, user_id, first_id, "06/07/2025", "BUY").await;
    create_order(&client, &base, user_id, first_id, "07/07/2025", "SELL").await;
    create_order(&client, &base, user_id, second_id, "07/07/2025", "BUY").await;

    let orders_url = format!("{}/users/{}/orders", base, user_id);
    let (status, all) = get_json(&client, orders_url.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(all["count"], 3);

    // Lower date bound is inclusive.
    let (status, from) = get_json(
        &client,
        format!("{}?start_date=07/07/2025", orders_url),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(from["count"], 2);

    let (status, until) = get_json(&client, format!("{}?end_date=06/07/2025", orders_url)).await;
    assert_eq!(status, 200);
    assert_eq!(until["count"], 1);

    let (status, by_type) = get_json(&client, format!("{}?type=BUY", orders_url)).await;
    assert_eq!(status, 200);
    assert_eq!(by_type["count"], 2);

    let (status, by_instrument) = get_json(
        &client,
        format!("{}?instrument_id={}", orders_url, first_id),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(by_instrument["count"], 2);

    // AND-combination narrows to the single matching row.
    let (status, combined) = get_json(
        &client,
        format!(
            "{}?instrument_id={}&type=BUY&start_date=06/07/2025",
            orders_url, first_id
        ),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(combined["count"], 1);
    assert_eq!(combined["data"][0]["date"], "06/07/2025");

    let (status, _) = get_json(&client, format!("{}?start_date=2025-07-06", orders_url)).await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn order_patch_touches_only_supplied_fields() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    let instrument = create_instrument(&client, &base).await;
    let instrument_id = instrument["id"].as_i64().unwrap();
    let order = create_order(&client, &base, user_id, instrument_id, "06/07/2025", "BUY").await;
    let order_url = format!(
        "{}/users/{}/orders/{}",
        base,
        user_id,
        order["id"].as_i64().unwrap()
    );

    let (status, fetched) = get_json(&client, order_url.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(fetched["date"], "06/07/2025");
    assert_eq!(fetched["user_id"], user["id"]);

    let (status, _) = put_json(&client, order_url.clone(), json!({})).await;
    assert_eq!(status, 400);

    let (status, updated) = put_json(
        &client,
        order_url.clone(),
        json!({ "volume": 5, "type": "SELL" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["volume"], 5.0);
    assert_eq!(updated["type"], "SELL");
    assert_eq!(updated["price"], 1.0);
    assert_eq!(updated["date"], "06/07/2025");

    // An order belonging to another user is not reachable through this path.
    let other = create_user(&client, &base).await;
    let (status, _) = get_json(
        &client,
        format!(
            "{}/users/{}/orders/{}",
            base,
            other["id"].as_i64().unwrap(),
            order["id"].as_i64().unwrap()
        ),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn deleting_all_orders_returns_the_removed_rows() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    let instrument = create_instrument(&client, &base).await;
    let instrument_id = instrument["id"].as_i64().unwrap();
    create_order(&client, &base, user_id, instrument_id, "06/07/2025", "BUY").await;
    create_order(&client, &base, user_id, instrument_id, "07/07/2025", "BUY").await;

    let orders_url = format!("{}/users/{}/orders", base, user_id);
    let (status, removed) = delete_json(&client, orders_url.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(removed["count"], 2);
    assert_eq!(removed["data"].as_array().unwrap().len(), 2);

    let (status, listed) = get_json(&client, orders_url).await;
    assert_eq!(status, 200);
    assert_eq!(listed["count"], 0);
}

// - - - - - - - - - - - - - - - - - - -
// SUMMARY

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn summary_lifecycle() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    let url = format!("{}/users/{}/summary", base, user_id);

    let (status, _) = get_json(&client, url.clone()).await;
    assert_eq!(status, 400);

    let (status, summary) = post_json(&client, url.clone(), Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(summary["user_id"], user["id"]);
    assert!(summary["ending_market_value"].is_null());
    assert!(summary["beginning_market_value"].is_null());
    assert!(summary["profit_loss"].is_null());

    let (status, _) = post_json(&client, url.clone(), Value::Null).await;
    assert_eq!(status, 400);

    let (status, _) = put_json(&client, url.clone(), json!({})).await;
    assert_eq!(status, 400);

    let (status, updated) = put_json(&client, url.clone(), json!({ "profit_loss": 12.5 })).await;
    assert_eq!(status, 200);
    assert_eq!(updated["profit_loss"], 12.5);
    assert!(updated["ending_market_value"].is_null());

    let (status, updated) = put_json(
        &client,
        url,
        json!({ "ending_market_value": 100.0, "beginning_market_value": 90.0 }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["ending_market_value"], 100.0);
    assert_eq!(updated["beginning_market_value"], 90.0);
    assert_eq!(updated["profit_loss"], 12.5);
}

// - - - - - - - - - - - - - - - - - - -
// USER DELETE CASCADE

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn deleting_a_user_removes_everything_it_owns() {
    let (base, client) = spawn_app().await;
    let user = create_user(&client, &base).await;
    let user_id = user["id"].as_i64().unwrap();
    create_portfolio(&client, &base, user_id).await;
    let instrument = create_instrument(&client, &base).await;
    let instrument_id = instrument["id"].as_i64().unwrap();

    create_order(&client, &base, user_id, instrument_id, "06/07/2025", "BUY").await;
    let (status, asset) = post_json(
        &client,
        format!("{}/users/{}/portfolio/assets", base, user_id),
        json!({
            "instrument_id": instrument_id,
            "buy_date": "04/07/2025",
            "buy_price": 1,
            "volume": 1,
        }),
    )
    .await;
    assert_eq!(status, 200);
    let (status, _) = post_json(
        &client,
        format!("{}/users/{}/portfolio/trades", base, user_id),
        json!({ "asset_id": asset["id"], "sell_date": "05/07/2025", "sell_price": 2 }),
    )
    .await;
    assert_eq!(status, 200);
    let (status, _) = post_json(
        &client,
        format!("{}/users/{}/summary", base, user_id),
        Value::Null,
    )
    .await;
    assert_eq!(status, 200);

    let (status, _) = delete_json(&client, format!("{}/users/{}", base, user_id)).await;
    assert_eq!(status, 200);

    // Everything hanging off the user is gone with it.
    let (status, _) = get_json(&client, format!("{}/users/{}", base, user_id)).await;
    assert_eq!(status, 400);
    let (status, _) = get_json(&client, format!("{}/users/{}/portfolio", base, user_id)).await;
    assert_eq!(status, 400);
    let (status, _) = get_json(&client, format!("{}/users/{}/summary", base, user_id)).await;
    assert_eq!(status, 400);

    // The instrument survives; it was only referenced.
    let (status, _) = get_json(&client, format!("{}/instruments/{}", base, instrument_id)).await;
    assert_eq!(status, 200);
}
