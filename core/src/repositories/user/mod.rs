//! User directory: resolves user ids to existence.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub mod mock;

pub use mock::MockUserDirectory;
pub use r#trait::UserDirectory;
