//! Redemption Engine
//!
//! Executes a user's request to exchange points for a catalog reward.
//! Validation happens before the ledger is touched; the debit and the
//! log append are one atomic unit inside `apply_delta`. The engine
//! pushes no updates — callers re-read balance/history afterwards.

use crate::db::repository::{RepoError, RepoResult, ledger, reward};
use shared::models::{PointTransaction, TransactionType};
use sqlx::SqlitePool;

/// Redeem `reward_id` for `user_id`.
///
/// Cost and name are read from the catalog at redemption time and
/// frozen into the transaction record; later repricing or deletion of
/// the reward never rewrites history.
///
/// `InsufficientBalance` propagates unchanged — it is the expected
/// "not enough points" outcome, not a fault.
pub async fn redeem(
    pool: &SqlitePool,
    user_id: &str,
    reward_id: i64,
    request_id: Option<&str>,
) -> RepoResult<(i64, PointTransaction)> {
    let reward = reward::find_active_by_id(pool, reward_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reward {reward_id} not found")))?;

    // Catalog guarantees this at write time; check again before debiting
    if reward.cost <= 0 {
        return Err(RepoError::Validation(format!(
            "Reward {} has non-positive cost {}",
            reward.name, reward.cost
        )));
    }

    let description = format!("Redeemed: {}", reward.name);
    let (balance, record) = ledger::apply_delta(
        pool,
        user_id,
        TransactionType::Redeemed,
        reward.cost,
        &description,
        request_id,
    )
    .await?;

    tracing::info!(
        user_id = %user_id,
        reward = %reward.name,
        cost = reward.cost,
        balance,
        "Reward redeemed"
    );
    Ok((balance, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::earning::credit;
    use shared::models::{RewardCreate, RewardUpdate};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    async fn seed_reward(pool: &SqlitePool, name: &str, cost: i64) -> i64 {
        reward::create(
            pool,
            RewardCreate {
                name: name.into(),
                cost,
                description: None,
                image_url: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_redeem_debits_and_freezes_description() {
        let pool = test_pool().await;
        let reward_id = seed_reward(&pool, "Eco Tote Bag", 60).await;
        credit(&pool, "u1", 100, "Report approved", None).await.unwrap();

        let (balance, record) = redeem(&pool, "u1", reward_id, None).await.unwrap();
        assert_eq!(balance, 40);
        assert_eq!(record.amount, 60);
        assert_eq!(record.description, "Redeemed: Eco Tote Bag");
    }

    #[tokio::test]
    async fn test_redeem_insufficient_leaves_state_untouched() {
        let pool = test_pool().await;
        let reward_id = seed_reward(&pool, "Eco Tote Bag", 60).await;
        credit(&pool, "u1", 40, "Report approved", None).await.unwrap();

        let err = redeem(&pool, "u1", reward_id, None).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::InsufficientBalance { balance: 40, required: 60 }
        ));
        assert_eq!(ledger::get_balance(&pool, "u1").await.unwrap(), 40);
        assert_eq!(ledger::list_transactions(&pool, "u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_redeem_unknown_reward() {
        let pool = test_pool().await;
        credit(&pool, "u1", 100, "Report approved", None).await.unwrap();

        let err = redeem(&pool, "u1", 12345, None).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        // Rejected before touching the ledger
        assert_eq!(ledger::get_balance(&pool, "u1").await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_redeem_soft_deleted_reward_fails() {
        let pool = test_pool().await;
        let reward_id = seed_reward(&pool, "Eco Tote Bag", 60).await;
        credit(&pool, "u1", 100, "Report approved", None).await.unwrap();
        reward::delete(&pool, reward_id).await.unwrap();

        let err = redeem(&pool, "u1", reward_id, None).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_history_survives_reward_repricing_and_deletion() {
        let pool = test_pool().await;
        let reward_id = seed_reward(&pool, "Eco Tote Bag", 60).await;
        credit(&pool, "u1", 100, "Report approved", None).await.unwrap();
        redeem(&pool, "u1", reward_id, None).await.unwrap();

        // Reprice, rename, then delete the reward
        reward::update(
            &pool,
            reward_id,
            RewardUpdate {
                name: Some("Canvas Bag".into()),
                cost: Some(90),
                description: None,
                image_url: None,
                is_active: None,
            },
        )
        .await
        .unwrap();
        reward::delete(&pool, reward_id).await.unwrap();

        // The frozen record is untouched
        let log = ledger::list_transactions(&pool, "u1").await.unwrap();
        let redeemed = log
            .iter()
            .find(|t| t.tx_type == TransactionType::Redeemed)
            .unwrap();
        assert_eq!(redeemed.amount, 60);
        assert_eq!(redeemed.description, "Redeemed: Eco Tote Bag");
        assert_eq!(ledger::get_balance(&pool, "u1").await.unwrap(), 40);
    }

    #[tokio::test]
    async fn test_duplicate_redeem_request_is_noop() {
        let pool = test_pool().await;
        let reward_id = seed_reward(&pool, "Eco Tote Bag", 60).await;
        credit(&pool, "u1", 120, "Report approved", None).await.unwrap();

        let (b1, t1) = redeem(&pool, "u1", reward_id, Some("rdm-42")).await.unwrap();
        let (b2, t2) = redeem(&pool, "u1", reward_id, Some("rdm-42")).await.unwrap();
        assert_eq!(b1, 60);
        assert_eq!(b2, 60);
        assert_eq!(t1.id, t2.id);
        assert_eq!(ledger::list_transactions(&pool, "u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_redeem_without_request_id_is_not_idempotent() {
        // Without a request id two calls are two debits, per contract
        let pool = test_pool().await;
        let reward_id = seed_reward(&pool, "Eco Tote Bag", 60).await;
        credit(&pool, "u1", 120, "Report approved", None).await.unwrap();

        redeem(&pool, "u1", reward_id, None).await.unwrap();
        let (balance, _) = redeem(&pool, "u1", reward_id, None).await.unwrap();
        assert_eq!(balance, 0);
    }
}
