//! # Shelfmark Core
//!
//! Core business logic and domain layer for the Shelfmark backend.
//! This crate contains the session/token subsystem: domain entities,
//! repository interfaces, token issuance and verification, and the
//! refresh/logout orchestration, along with the error types that
//! form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
