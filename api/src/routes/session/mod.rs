//! Session route handlers: refresh and logout

pub mod logout;
pub mod refresh;

use std::sync::Arc;

use sm_core::repositories::{TokenBlacklist, UserDirectory};
use sm_core::services::session::SessionService;

/// Application state shared across session handlers
pub struct AppState<B, U>
where
    B: TokenBlacklist,
    U: UserDirectory,
{
    pub session_service: Arc<SessionService<B, U>>,
}
