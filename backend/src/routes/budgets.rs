//! Budget routes
//!
//! Mounted behind `require_session`. Every handler passes the caller's
//! username to a service, which runs the ownership chain before touching
//! the budget.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::BudgetService;
use crate::state::AppState;
use super::ApiJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use moneybags_shared::{BudgetResponse, BudgetsListResponse, CreateBudgetRequest};

pub fn budget_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/:budget_id", get(get_budget))
}

/// GET /api/v1/budgets
async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<BudgetsListResponse>> {
    let budgets = BudgetService::list(state.stores(), &auth.username).await?;
    Ok(Json(budgets))
}

/// POST /api/v1/budgets
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateBudgetRequest>,
) -> ApiResult<(StatusCode, Json<BudgetResponse>)> {
    let budget = BudgetService::create(state.stores(), &auth.username, &req.name).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

/// GET /api/v1/budgets/:budget_id
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<String>,
) -> ApiResult<Json<BudgetResponse>> {
    let budget = BudgetService::get(state.stores(), &auth.username, &budget_id).await?;
    Ok(Json(budget))
}
