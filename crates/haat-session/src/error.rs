//! Session errors.

use thiserror::Error;

/// Session error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session expired.
    #[error("session expired")]
    Expired,

    /// Operation requires an authenticated customer.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Session is already bound to a different customer.
    #[error("already authenticated as {0}")]
    AlreadyAuthenticated(String),
}

impl SessionError {
    /// Check if this failure should send the caller to a login flow.
    pub fn requires_login(&self) -> bool {
        matches!(self, SessionError::Expired | SessionError::NotAuthenticated)
    }
}
