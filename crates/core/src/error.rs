use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Ids are strings here because they span two id spaces: local BIGSERIAL
    /// user ids and provider-issued session ids.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Insufficient balance: {required} required, {available} available")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
