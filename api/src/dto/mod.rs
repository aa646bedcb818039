//! Request and response data transfer objects

pub mod session;

pub use session::{LogoutRequest, LogoutResponse, RefreshSessionRequest, SessionResponse};
