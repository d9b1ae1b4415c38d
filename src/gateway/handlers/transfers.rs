//! Transfer handlers: the precondition stage in front of the engine.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, ok};
use crate::ledger::models::{Transfer, TransferParams, TransferResult};
use crate::ledger::LedgerError;
use crate::user_auth::Claims;

#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// POST /api/v1/transfers
///
/// Validates amount positivity, distinct accounts, source ownership, and
/// currency match, then hands off to the engine. The whole unit of work runs
/// under the configured deadline; on timeout the engine future is dropped and
/// the store transaction rolls back, so no leg is ever left applied.
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateTransferRequest>,
) -> ApiResult<TransferResult> {
    if req.amount <= 0 {
        return Err(LedgerError::InvalidAmount.into());
    }
    if req.from_account_id == req.to_account_id {
        return Err(LedgerError::SameAccount.into());
    }

    let from = state.store.get_account(req.from_account_id).await?;
    if from.owner != claims.sub {
        return ApiError::forbidden("source account doesn't belong to the authenticated user")
            .into_err();
    }

    let to = state.store.get_account(req.to_account_id).await?;
    if from.currency != to.currency {
        return Err(LedgerError::CurrencyMismatch.into());
    }

    let params = TransferParams {
        from_account_id: req.from_account_id,
        to_account_id: req.to_account_id,
        amount: req.amount,
    };

    let result = match tokio::time::timeout(state.transfer_deadline, state.store.transfer(params))
        .await
    {
        Ok(result) => result?,
        Err(_) => {
            tracing::warn!(
                from = req.from_account_id,
                to = req.to_account_id,
                "Transfer aborted: deadline exceeded"
            );
            return Err(LedgerError::LockTimeout.into());
        }
    };

    tracing::info!(
        transfer_id = result.transfer.id,
        from = result.transfer.from_account_id,
        to = result.transfer.to_account_id,
        amount = result.transfer.amount,
        "Transfer committed"
    );
    ok(result)
}

#[derive(Debug, Deserialize)]
pub struct ListTransfersQuery {
    pub account_id: i64,
    pub page_id: i64,
    pub page_size: i64,
}

/// GET /api/v1/transfers?account_id=1&page_id=1&page_size=10
///
/// Transfers touching the given account, either side, newest first. The
/// account must belong to the caller.
pub async fn list_transfers(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListTransfersQuery>,
) -> ApiResult<Vec<Transfer>> {
    if query.page_id < 1 || !(1..=50).contains(&query.page_size) {
        return ApiError::bad_request("page_id must be >= 1 and page_size in 1..=50").into_err();
    }

    let account = state.store.get_account(query.account_id).await?;
    if account.owner != claims.sub {
        return ApiError::forbidden("account doesn't belong to the authenticated user").into_err();
    }

    let offset = (query.page_id - 1) * query.page_size;
    let transfers = state
        .store
        .list_transfers(query.account_id, query.page_size, offset)
        .await?;
    ok(transfers)
}

/// GET /api/v1/transfers/{id}
pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> ApiResult<Transfer> {
    let transfer = state.store.get_transfer(id).await?;

    // Visible to either side of the movement.
    let from = state.store.get_account(transfer.from_account_id).await;
    let to = state.store.get_account(transfer.to_account_id).await;
    let involved = [from, to]
        .into_iter()
        .filter_map(Result::ok)
        .any(|account| account.owner == claims.sub);
    if !involved {
        return ApiError::forbidden("transfer doesn't involve the authenticated user").into_err();
    }

    ok(transfer)
}
