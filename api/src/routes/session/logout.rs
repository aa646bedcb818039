use actix_web::{web, HttpResponse};

use crate::dto::session::{LogoutRequest, LogoutResponse};
use crate::handlers::error::handle_domain_error;

use sm_core::repositories::{TokenBlacklist, UserDirectory};

use super::AppState;

/// Handler for POST /api/v1/session/logout
///
/// Revokes a session by blacklisting both of its tokens. Succeeds even
/// when the tokens are already expired or damaged, and repeating the
/// call is harmless.
///
/// # Request Body
///
/// ```json
/// {
///     "user_id": "uuid",
///     "access_token": "string",
///     "refresh_token": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 500 Internal Server Error: blacklist store unavailable
pub async fn logout<B, U>(
    state: web::Data<AppState<B, U>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    B: TokenBlacklist + 'static,
    U: UserDirectory + 'static,
{
    match state
        .session_service
        .logout(
            request.user_id,
            &request.access_token,
            &request.refresh_token,
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
