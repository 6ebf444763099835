//! User entity model and DTOs.

use numrent_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub balance: Decimal,
    pub is_admin: bool,
    /// Provider-assigned ids of the sessions this user owns.
    pub session_ids: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub balance: Decimal,
    pub is_admin: bool,
    pub session_ids: Vec<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            balance: user.balance,
            is_admin: user.is_admin,
            session_ids: user.session_ids,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    /// 0 for self-registration; the configured elevated amount for
    /// admin-created accounts.
    pub balance: Decimal,
    pub is_admin: bool,
}
