//! User records. The stored row carries the password hash; `UserPublic` is the
//! projection that crosses the API boundary.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

pub const MAX_FIELD_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 40;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Patch payload: absent fields are left untouched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.is_none() && self.password.is_none() {
            return Err(ApiError::Validation(
                "No updatable field supplied, expected username or password.".into(),
            ));
        }
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.is_empty() || username.len() > MAX_FIELD_LENGTH {
        return Err(ApiError::Validation(format!(
            "username must be between 1 and {} characters",
            MAX_FIELD_LENGTH
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    if !email.contains('@') || email.len() < 3 || email.len() > MAX_FIELD_LENGTH {
        return Err(ApiError::Validation("email must be a valid email address".into()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LENGTH || password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "password must be between {} and {} characters",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(username: &str, email: &str, password: &str) -> UserCreate {
        UserCreate {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_a_well_formed_user() {
        assert!(create("harry", "harry@example.com", "longenough").validate().is_ok());
    }

    #[test]
    fn rejects_bad_emails_and_short_passwords() {
        assert!(create("harry", "not-an-email", "longenough").validate().is_err());
        assert!(create("harry", "harry@example.com", "short").validate().is_err());
    }

    #[test]
    fn public_projection_drops_the_hash() {
        let user = User {
            id: 7,
            username: "harry".into(),
            email: "harry@example.com".into(),
            hashed_password: "$argon2id$...".into(),
        };
        let json = serde_json::to_value(UserPublic::from(user)).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json.get("hashed_password").is_none());
    }

    #[test]
    fn update_requires_at_least_one_field() {
        assert!(UserUpdate::default().validate().is_err());
        let patch = UserUpdate {
            username: Some("new-name".into()),
            password: None,
        };
        assert!(patch.validate().is_ok());
    }
}
