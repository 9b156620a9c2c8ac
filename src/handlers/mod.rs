//! HTTP handlers: per-resource adapters from routes to the data-access layer.
//!
//! Every handler follows the same ordering: resolve required parents (user,
//! then portfolio, then instrument), check uniqueness on creation, require at
//! least one recognized field on update, mutate, serialize.

pub mod assets;
pub mod instruments;
pub mod login;
pub mod orders;
pub mod portfolio;
pub mod summary;
pub mod trades;
pub mod users;

use sqlx::PgPool;

use crate::crud;
use crate::error::ApiError;
use crate::models::User;

/// Resolve the `user_id` path parameter. The first missing parent
/// short-circuits the request.
pub(crate) async fn require_user(pool: &PgPool, user_id: i64) -> Result<User, ApiError> {
    crud::users::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user found with this id.".into()))
}
