//! Bank account routes, nested under a budget

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::BankAccountService;
use crate::state::AppState;
use super::ApiJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use moneybags_shared::{BankAccountResponse, BankAccountsListResponse, CreateBankAccountRequest};

/// Paths are relative to `/budgets`
pub fn bank_account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:budget_id/bank-accounts",
            get(list_bank_accounts).post(create_bank_account),
        )
        .route(
            "/:budget_id/bank-accounts/:bank_account_id",
            get(get_bank_account),
        )
}

/// GET /api/v1/budgets/:budget_id/bank-accounts
async fn list_bank_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<String>,
) -> ApiResult<Json<BankAccountsListResponse>> {
    let accounts = BankAccountService::list(state.stores(), &auth.username, &budget_id).await?;
    Ok(Json(accounts))
}

/// POST /api/v1/budgets/:budget_id/bank-accounts
async fn create_bank_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<String>,
    ApiJson(req): ApiJson<CreateBankAccountRequest>,
) -> ApiResult<(StatusCode, Json<BankAccountResponse>)> {
    let account =
        BankAccountService::create(state.stores(), &auth.username, &budget_id, &req.name).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /api/v1/budgets/:budget_id/bank-accounts/:bank_account_id
async fn get_bank_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((budget_id, bank_account_id)): Path<(String, String)>,
) -> ApiResult<Json<BankAccountResponse>> {
    let account = BankAccountService::get(
        state.stores(),
        &auth.username,
        &budget_id,
        &bank_account_id,
    )
    .await?;
    Ok(Json(account))
}
