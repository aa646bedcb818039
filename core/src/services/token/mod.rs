//! Token module for JWT handling
//!
//! This module owns the cryptographic half of the session subsystem:
//! - Access and refresh token issuance with purpose binding
//! - Verification with a precise rejection taxonomy
//! - Lenient expiry extraction for logout-time revocation

mod codec;
mod config;

pub use codec::TokenCodec;
pub use config::TokenConfig;
