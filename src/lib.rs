//! Investment tracker: a personal portfolio-tracking REST API over PostgreSQL.

pub mod config;
pub mod crud;
pub mod dates;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod security;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{ApiError, ConfigError};
pub use response::Collection;
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{create_tables, drop_tables, ensure_database_exists};
