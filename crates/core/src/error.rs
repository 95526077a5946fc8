/// Domain error taxonomy shared by every layer.
///
/// Each variant maps to exactly one HTTP status and machine-readable code in
/// the API crate, so handlers only ever need to pick the right variant.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed input rejected at an entry point that reports 400.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A payload, query string or identifier failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing, invalid or expired credential.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Login attempt with an unknown email or a wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The principal exists but has been disabled by an administrator.
    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`] with an owned message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for a [`CoreError::NotFound`] on the given entity.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result alias used across the core crate.
pub type CoreResult<T> = Result<T, CoreError>;
