//! User account routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserAccountService;
use crate::state::AppState;
use super::ApiJson;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use moneybags_shared::{CreateUserAccountRequest, UserAccountResponse};

/// Registration is public; reading requires a session, which the
/// `AuthUser` extractor enforces on its own.
pub fn user_account_routes() -> Router<AppState> {
    Router::new().route("/", post(register).get(get_current))
}

/// POST /api/v1/user-accounts
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserAccountRequest>,
) -> ApiResult<(StatusCode, Json<UserAccountResponse>)> {
    let account = UserAccountService::register(state.stores(), req).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /api/v1/user-accounts
async fn get_current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserAccountResponse>> {
    let account = UserAccountService::get_current(state.stores(), &auth.username).await?;
    Ok(Json(account))
}
