//! Session management for Haat storefronts.
//!
//! Provides the session context, customer identity, and session errors.

mod context;
mod error;

pub use context::{CustomerProfile, SessionContext, SessionId};
pub use error::SessionError;
