//! Points Handlers
//!
//! Inbound ledger surface: the reporting subsystem credits points
//! here, and the read paths expose balance and history. The caller is
//! trusted to have authenticated the user (auth is an external
//! collaborator).

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::ledger as ledger_repo;
use crate::ledger;
use crate::utils::{AppError, AppResponse, ok};
use shared::models::PointTransaction;

/// Credit request from the reporting subsystem, one per approved
/// report. `requestId` makes retried deliveries safe.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[validate(range(min = 1, message = "amount must be a positive integer"))]
    pub amount: i64,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerMutationResponse {
    pub balance: i64,
    pub transaction: PointTransaction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub user_id: String,
    pub balance: i64,
}

/// POST /api/points/credit
pub async fn credit(
    State(state): State<ServerState>,
    Json(request): Json<CreditRequest>,
) -> Result<Json<AppResponse<LedgerMutationResponse>>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (balance, transaction) = ledger::credit(
        state.pool(),
        &request.user_id,
        request.amount,
        &request.description,
        request.request_id.as_deref(),
    )
    .await?;

    Ok(ok(LedgerMutationResponse {
        balance,
        transaction,
    }))
}

/// GET /api/points/balance/{user_id}
pub async fn balance(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<AppResponse<BalanceResponse>>, AppError> {
    let balance = ledger_repo::get_balance(state.pool(), &user_id).await?;
    Ok(ok(BalanceResponse { user_id, balance }))
}

/// GET /api/points/transactions/{user_id}
pub async fn transactions(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<AppResponse<Vec<PointTransaction>>>, AppError> {
    let transactions = ledger_repo::list_transactions(state.pool(), &user_id).await?;
    Ok(ok(transactions))
}
