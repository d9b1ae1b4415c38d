//! Account CRUD handlers. Every route runs behind the JWT middleware; the
//! authenticated username from [`Claims`] is the account owner key.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, ok};
use crate::ledger::models::{Account, is_supported_currency};
use crate::user_auth::Claims;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub currency: String,
}

/// POST /api/v1/accounts
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<Account> {
    if !is_supported_currency(&req.currency) {
        return ApiError::bad_request(format!("unsupported currency: {}", req.currency)).into_err();
    }

    let account = state.store.create_account(&claims.sub, &req.currency).await?;
    tracing::info!(account_id = account.id, owner = %account.owner, currency = %account.currency, "Account created");
    ok(account)
}

/// GET /api/v1/accounts/{id}
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> ApiResult<Account> {
    let account = state.store.get_account(id).await?;
    if account.owner != claims.sub {
        return ApiError::forbidden("account doesn't belong to the authenticated user").into_err();
    }
    ok(account)
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub page_id: i64,
    pub page_size: i64,
}

/// GET /api/v1/accounts?page_id=1&page_size=10
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListAccountsQuery>,
) -> ApiResult<Vec<Account>> {
    if query.page_id < 1 || !(1..=50).contains(&query.page_size) {
        return ApiError::bad_request("page_id must be >= 1 and page_size in 1..=50").into_err();
    }

    let offset = (query.page_id - 1) * query.page_size;
    let accounts = state
        .store
        .list_accounts(&claims.sub, query.page_size, offset)
        .await?;
    ok(accounts)
}

#[derive(Debug, Deserialize)]
pub struct AdjustBalanceRequest {
    /// Signed delta in minor units; a zero delta is a legal no-op.
    pub amount: i64,
}

/// PATCH /api/v1/accounts/{id}
///
/// Direct balance adjustment outside any transfer. The store applies the
/// balance change and its audit entry as one unit of work.
pub async fn adjust_balance(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<AdjustBalanceRequest>,
) -> ApiResult<Account> {
    let account = state.store.get_account(id).await?;
    if account.owner != claims.sub {
        return ApiError::forbidden("account doesn't belong to the authenticated user").into_err();
    }

    let (account, _entry) = state.store.adjust_balance(id, req.amount).await?;
    ok(account)
}

/// DELETE /api/v1/accounts/{id}
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> ApiResult<String> {
    let account = state.store.get_account(id).await?;
    if account.owner != claims.sub {
        return ApiError::forbidden("account doesn't belong to the authenticated user").into_err();
    }

    state.store.delete_account(id).await?;
    ok(format!("account {} deleted", id))
}
