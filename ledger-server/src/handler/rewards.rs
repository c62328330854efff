//! Rewards Handlers
//!
//! Catalog reads, the redemption endpoint, and the admin CRUD surface
//! (create/update/delete with `cost > 0` enforced at write time).

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::reward as reward_repo;
use crate::handler::points::LedgerMutationResponse;
use crate::ledger;
use crate::utils::{AppError, AppResponse, ok, ok_with_message};
use shared::models::{Reward, RewardCreate, RewardUpdate, RewardsOverview};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub reward_id: i64,
    /// Optional idempotency key; retried requests with the same key
    /// debit at most once
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRewardRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "cost must be a positive integer"))]
    pub cost: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRewardRequest {
    pub name: Option<String>,
    pub cost: Option<i64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// GET /api/rewards
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<Reward>>>, AppError> {
    let rewards = reward_repo::find_all(state.pool()).await?;
    Ok(ok(rewards))
}

/// GET /api/rewards/overview/{user_id}
pub async fn overview(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<AppResponse<RewardsOverview>>, AppError> {
    let snapshot = ledger::overview(state.pool(), &user_id).await?;
    Ok(ok(snapshot))
}

/// POST /api/rewards/redeem
///
/// Success returns the new balance and the frozen transaction; the
/// front end re-fetches the overview afterwards (the engine pushes
/// nothing).
pub async fn redeem(
    State(state): State<ServerState>,
    Json(request): Json<RedeemRequest>,
) -> Result<Json<AppResponse<LedgerMutationResponse>>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (balance, transaction) = ledger::redeem(
        state.pool(),
        &request.user_id,
        request.reward_id,
        request.request_id.as_deref(),
    )
    .await?;

    Ok(ok(LedgerMutationResponse {
        balance,
        transaction,
    }))
}

/// POST /api/rewards (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(request): Json<CreateRewardRequest>,
) -> Result<Json<AppResponse<Reward>>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let reward = reward_repo::create(
        state.pool(),
        RewardCreate {
            name: request.name,
            cost: request.cost,
            description: request.description,
            image_url: request.image_url,
        },
    )
    .await?;
    Ok(ok(reward))
}

/// PUT /api/rewards/{id} (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRewardRequest>,
) -> Result<Json<AppResponse<Reward>>, AppError> {
    let reward = reward_repo::update(
        state.pool(),
        id,
        RewardUpdate {
            name: request.name,
            cost: request.cost,
            description: request.description,
            image_url: request.image_url,
            is_active: request.is_active,
        },
    )
    .await?;
    Ok(ok(reward))
}

/// DELETE /api/rewards/{id} (admin, soft delete)
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<DeleteResponse>>, AppError> {
    let deleted = reward_repo::delete(state.pool(), id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Reward {id} not found")));
    }
    Ok(ok_with_message(
        DeleteResponse { deleted },
        "Reward deleted",
    ))
}
