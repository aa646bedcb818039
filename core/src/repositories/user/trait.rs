//! User directory trait.
//!
//! The session subsystem needs exactly one fact about users: whether the
//! id referenced by a refresh token still exists. The user module owns
//! everything else about accounts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Read-only lookup of users by id
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by their id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
}
