// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// US ZIP or ZIP+4.
static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid zip code pattern"));

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,

    /// Unique, stored lower-cased.
    pub email: String,

    /// Argon2 password hash. Never serialized.
    pub password_hash: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip_code: Option<String>,
    pub occupation_status: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// User as returned to the client (no password hash).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip_code: Option<String>,
    pub occupation_status: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            zip_code: user.zip_code,
            occupation_status: user.occupation_status,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating an account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password length must be between 8 and 128 characters."
    ))]
    pub password: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[serde(default, alias = "zip_code")]
    #[validate(regex(path = *ZIP_CODE, message = "Zip code must look like 12345 or 12345-6789."))]
    pub zip_code: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub occupation_status: Option<String>,
}

/// DTO for signing in.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for a partial profile update. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    #[serde(default, alias = "zip_code")]
    #[validate(regex(path = *ZIP_CODE, message = "Zip code must look like 12345 or 12345-6789."))]
    pub zip_code: Option<String>,
    #[validate(length(max = 50))]
    pub occupation_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(json: serde_json::Value) -> SignUpRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_valid_signup() {
        let req = signup(serde_json::json!({
            "email": "viewer@example.com",
            "password": "password123",
            "firstName": "Ada",
            "lastName": "Lee",
            "zip_code": "94110",
            "occupationStatus": "Student"
        }));
        assert!(req.validate().is_ok());
        assert_eq!(req.zip_code.as_deref(), Some("94110"));
    }

    #[test]
    fn test_invalid_signup_fields() {
        let req = signup(serde_json::json!({
            "email": "not-an-email",
            "password": "short",
            "firstName": "Ada",
            "lastName": "Lee",
            "zipCode": "ABCDE"
        }));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("zip_code"));
    }
}
