//! Domain entities for the session/token subsystem.

pub mod token;
pub mod user;

pub use token::{Claims, RevokedToken, TokenPair, TokenPurpose};
pub use user::User;
