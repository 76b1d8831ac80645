//! Session middleware
//!
//! Turns a `Authorization: Bearer <token>` header into an [`AuthUser`].
//! Available both as a layer for whole route groups and as an extractor.
//!
//! Every rejection is the same 401. Whether the token was missing,
//! malformed, forged or expired is only visible in the debug log.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use moneybags_shared::AuthError;
use tracing::debug;

/// Identity proven by a valid session token
///
/// Carries the username only. Handlers resolve anything else through the
/// stores so a deleted account is noticed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
}

/// Pull the token out of an `Authorization` header value
///
/// The value must be exactly `<scheme> <token>` with one space, where the
/// scheme is `bearer` in any case.
pub(crate) fn bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || token.is_empty() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

/// Validate the request's session token
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;

    // Non-visible-ASCII values fail here
    let value = header.to_str().map_err(|_| {
        debug!("Authorization header is not visible ASCII");
        AuthError::InvalidToken
    })?;

    let token = bearer_token(value).ok_or_else(|| {
        debug!("Authorization header is not a bearer credential");
        AuthError::InvalidToken
    })?;

    let claims = state.jwt().validate(token).map_err(|e| {
        debug!(reason = %e, "Session token rejected");
        AuthError::from(e)
    })?;

    Ok(AuthUser {
        username: claims.sub,
    })
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already authenticated by `require_session`
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);
        Ok(authenticate(&app_state, &parts.headers)?)
    }
}

/// Layer function that rejects requests without a valid session token
///
/// Use with `axum::middleware::from_fn_with_state` on a route group.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
