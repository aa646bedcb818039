use actix_web::{web, HttpResponse};

use crate::dto::session::{RefreshSessionRequest, SessionResponse};
use crate::handlers::error::handle_domain_error;

use sm_core::repositories::{TokenBlacklist, UserDirectory};

use super::AppState;

/// Handler for POST /api/v1/session/refresh
///
/// Exchanges a valid refresh token for a fresh access token. The
/// refresh token itself is echoed back unchanged.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: uniform `invalid_session` for every rejected token
/// - 404 Not Found: the referenced user no longer exists
/// - 500 Internal Server Error: blacklist or user store unavailable
pub async fn refresh<B, U>(
    state: web::Data<AppState<B, U>>,
    request: web::Json<RefreshSessionRequest>,
) -> HttpResponse
where
    B: TokenBlacklist + 'static,
    U: UserDirectory + 'static,
{
    match state
        .session_service
        .refresh_session(&request.refresh_token)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(SessionResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.access_expires_in,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
