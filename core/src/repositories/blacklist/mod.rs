//! Token blacklist repository: the persisted set of revoked tokens.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub mod mock;

pub use mock::MockTokenBlacklist;
pub use r#trait::TokenBlacklist;

#[cfg(test)]
mod tests;

use sha2::{Digest, Sha256};

/// Hashes a token value for storage.
///
/// Blacklist implementations key entries by this digest so raw token
/// strings are never persisted.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
