//! Repository for the `users` table.
//!
//! One table backs three concerns: the credential store (email + password
//! hash), the balance ledger, and the session directory (`session_ids`).
//! Balance mutations go through a single conditional UPDATE so the
//! non-negative invariant holds even under concurrent debits.

use numrent_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, password_hash, name, balance, is_admin, session_ids, created_at, updated_at";

/// Provides CRUD, ledger, and session-directory operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email violates `uq_users_email`; the caller maps that to a
    /// conflict.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name, balance, is_admin)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(input.balance)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive, exact match as stored).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update the display name. Email is immutable; there is no other
    /// profile field. Returns `true` if the row was updated.
    pub async fn update_name(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One-way promotion to admin. Returns `true` if the row was updated
    /// (`false` for a missing user or one that is already admin).
    pub async fn promote_to_admin(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_admin = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_admin = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Balance ledger --

    /// Current balance, or `None` for an unknown user.
    pub async fn balance(pool: &PgPool, id: DbId) -> Result<Option<Decimal>, sqlx::Error> {
        let row: Option<(Decimal,)> = sqlx::query_as("SELECT balance FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(balance,)| balance))
    }

    /// Apply a signed delta to the balance in one conditional UPDATE.
    ///
    /// The WHERE clause enforces the zero floor at the storage layer, so two
    /// concurrent debits can never both pass a stale balance check: whichever
    /// lands second simply matches no row. Returns the new balance, or `None`
    /// when the user does not exist or the floor would be crossed -- callers
    /// disambiguate with [`UserRepo::find_by_id`].
    pub async fn adjust_balance(
        pool: &PgPool,
        id: DbId,
        delta: Decimal,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        let row: Option<(Decimal,)> = sqlx::query_as(
            "UPDATE users SET balance = balance + $2, updated_at = NOW()
             WHERE id = $1 AND balance + $2 >= 0
             RETURNING balance",
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(balance,)| balance))
    }

    // -- Session directory --

    /// Idempotent set-insert of a session id. Returns `true` when the id was
    /// newly added, `false` when it was already present (or the user is
    /// unknown; callers that care check existence first).
    pub async fn add_session(
        pool: &PgPool,
        id: DbId,
        session_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET session_ids = array_append(session_ids, $2), updated_at = NOW()
             WHERE id = $1 AND NOT ($2 = ANY(session_ids))",
        )
        .bind(id)
        .bind(session_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The session ids owned by a user, or `None` for an unknown user.
    pub async fn session_ids(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let row: Option<(Vec<String>,)> =
            sqlx::query_as("SELECT session_ids FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(ids,)| ids))
    }
}
