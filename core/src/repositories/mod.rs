//! Repository interfaces for externally persisted state.

pub mod blacklist;
pub mod user;

pub use blacklist::{hash_token, MockTokenBlacklist, TokenBlacklist};
pub use user::{MockUserDirectory, UserDirectory};
