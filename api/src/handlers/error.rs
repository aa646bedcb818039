//! Maps domain errors to HTTP responses.
//!
//! Every verification-class token rejection collapses into one uniform
//! `invalid_session` response. The concrete reason (expired, bad
//! signature, revoked, wrong purpose, ...) is logged server-side only:
//! exposing it would hand an attacker a signal oracle for probing
//! forged or stolen tokens.

use actix_web::HttpResponse;

use sm_core::errors::{AuthError, DomainError};
use sm_shared::ErrorResponse;

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => {
            log::warn!("session rejected: {:?}", token_error);
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_session",
                "Session is invalid or expired. Please sign in again.",
            ))
        }
        DomainError::Auth(AuthError::UserNotFound { id }) => {
            // The caller already presented a structurally valid,
            // non-revoked token, so naming the missing user is safe
            log::warn!("refresh rejected: user {} no longer exists", id);
            HttpResponse::NotFound().json(
                ErrorResponse::new("user_not_found", format!("User not found: {}", id))
                    .with_detail("resource", "User")
                    .with_detail("id", id.to_string()),
            )
        }
        DomainError::Store { .. } | DomainError::Internal { .. } => {
            log::error!("infrastructure error: {}", error);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}
