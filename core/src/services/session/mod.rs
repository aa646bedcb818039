//! Session service module
//!
//! Orchestrates the session lifecycle over the token codec, the
//! revocation blacklist, and the user directory:
//! - Initial access+refresh pair issuance at login
//! - Refresh: exchanging a valid refresh token for a fresh access token
//! - Logout: blacklisting both tokens of a session
//! - Background pruning of expired blacklist entries

mod cleanup;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{BlacklistPruner, PrunerConfig};
pub use service::SessionService;
