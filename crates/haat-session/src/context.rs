//! Session context and lifecycle.
//!
//! A [`SessionContext`] is an explicit value the storefront threads
//! through its request handling instead of global auth state. It starts
//! as a guest, can be upgraded once by [`login`](SessionContext::login)
//! with a verified customer profile, and is torn down by
//! [`logout`](SessionContext::logout), which hands back a fresh guest
//! context. Credential verification itself happens outside this crate;
//! the profile passed to `login` is taken at face value.

use crate::SessionError;
use haat_commerce::ids::{CartId, CustomerId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        Self(generate_session_id())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A verified customer identity.
///
/// Produced by the authentication provider after it has checked
/// credentials; this crate never sees passwords or tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Customer ID.
    pub id: CustomerId,
    /// Email address.
    pub email: String,
    /// Name shown in the storefront header.
    pub display_name: String,
}

impl CustomerProfile {
    /// Create a customer profile.
    pub fn new(
        id: impl Into<CustomerId>,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
        }
    }
}

/// A storefront session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Session ID.
    pub id: SessionId,
    /// The authenticated customer, if any.
    pub customer: Option<CustomerProfile>,
    /// Cart bound to this session.
    pub cart_id: Option<CartId>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last activity.
    pub last_activity_at: i64,
    /// Unix timestamp when the session expires.
    pub expires_at: i64,
}

impl SessionContext {
    /// Default session duration: 7 days.
    pub const DEFAULT_DURATION_SECS: i64 = 7 * 24 * 60 * 60;

    /// Start a new guest session.
    pub fn guest() -> Self {
        let now = current_timestamp();
        let id = SessionId::generate();
        info!("guest session {} started", id);

        Self {
            id,
            customer: None,
            cart_id: None,
            created_at: now,
            last_activity_at: now,
            expires_at: now + Self::DEFAULT_DURATION_SECS,
        }
    }

    /// Replace the expiry with a custom duration from creation.
    pub fn with_duration(mut self, duration_secs: i64) -> Self {
        self.expires_at = self.created_at + duration_secs;
        self
    }

    /// Upgrade a guest session with a verified customer profile.
    ///
    /// The cart stays bound, so whatever a guest gathered survives the
    /// login. Logging in again as the same customer just refreshes the
    /// profile; a different customer is rejected and must log out first.
    pub fn login(&mut self, profile: CustomerProfile) -> Result<(), SessionError> {
        if let Some(existing) = &self.customer {
            if existing.id != profile.id {
                return Err(SessionError::AlreadyAuthenticated(existing.id.to_string()));
            }
            self.customer = Some(profile);
            self.touch();
            return Ok(());
        }

        info!("session {} authenticated as customer {}", self.id, profile.id);
        self.customer = Some(profile);
        self.touch();
        Ok(())
    }

    /// End this session and hand back a fresh guest context.
    ///
    /// Consumes the session: the id, cart binding, and customer are all
    /// dropped and the replacement starts clean.
    pub fn logout(self) -> SessionContext {
        info!("session {} ended", self.id);
        SessionContext::guest()
    }

    /// Update the last-activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity_at = current_timestamp();
    }

    /// Push the expiry out from now.
    pub fn extend(&mut self, duration_secs: i64) {
        self.expires_at = current_timestamp() + duration_secs;
        self.touch();
    }

    /// Bind a cart to this session.
    pub fn attach_cart(&mut self, cart_id: CartId) {
        self.cart_id = Some(cart_id);
        self.touch();
    }

    /// Check if a customer is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.customer.is_some()
    }

    /// Check if the session is expired.
    pub fn is_expired(&self) -> bool {
        current_timestamp() > self.expires_at
    }

    /// Validate the session, returning an error if expired.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.is_expired() {
            Err(SessionError::Expired)
        } else {
            Ok(())
        }
    }

    /// Get the authenticated customer, or an error for guests and
    /// expired sessions.
    pub fn require_customer(&self) -> Result<&CustomerProfile, SessionError> {
        self.validate()?;
        self.customer.as_ref().ok_or(SessionError::NotAuthenticated)
    }

    /// The authenticated customer's id, if any.
    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer.as_ref().map(|c| &c.id)
    }
}

/// Generate a prefixed random session ID.
fn generate_session_id() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 24] = rand::thread_rng().gen();
    format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes))
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
