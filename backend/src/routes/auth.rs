//! Authentication routes
//!
//! Password verification runs on the blocking thread pool and token
//! signing uses the keys loaded into `AppState` at startup.

use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use super::ApiJson;
use axum::{extract::State, routing::post, Json, Router};
use moneybags_shared::{LoginRequest, TokenResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(login))
}

/// Exchange username and password for a session token
///
/// POST /api/v1/auth/token
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let tokens =
        AuthService::login(state.stores(), state.jwt(), &req.username, &req.password).await?;
    Ok(Json(tokens))
}
