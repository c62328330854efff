//! Overview Query Service
//!
//! Pure read path assembling the dashboard snapshot. Three
//! independent reads, each reflecting durable state at the time it
//! was issued; no atomic cross-read snapshot is promised.

use crate::db::repository::{RepoError, RepoResult, ledger, reward};
use shared::models::RewardsOverview;
use sqlx::SqlitePool;

/// Assemble `{balance, transactions, rewards}` for `user_id`.
///
/// Unknown accounts come back with zero/empty defaults; only a blank
/// user id is an error.
pub async fn overview(pool: &SqlitePool, user_id: &str) -> RepoResult<RewardsOverview> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(RepoError::Validation("User id is required".into()));
    }

    let balance = ledger::get_balance(pool, user_id).await?;
    let transactions = ledger::list_transactions(pool, user_id).await?;
    let rewards = reward::find_all(pool).await?;

    Ok(RewardsOverview {
        balance,
        transactions,
        rewards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::earning::credit;
    use shared::models::RewardCreate;
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

    #[tokio::test]
    async fn test_unknown_user_gets_zero_defaults() {
        let pool = test_pool().await;
        let snapshot = overview(&pool, "u2").await.unwrap();
        assert_eq!(snapshot.balance, 0);
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.rewards.is_empty());
    }

    #[tokio::test]
    async fn test_blank_user_id_rejected() {
        let pool = test_pool().await;
        for blank in ["", "   "] {
            let err = overview(&pool, blank).await.unwrap_err();
            assert!(matches!(err, RepoError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_populated_snapshot() {
        let pool = test_pool().await;
        reward::create(
            &pool,
            RewardCreate {
                name: "Eco Tote Bag".into(),
                cost: 60,
                description: None,
                image_url: None,
            },
        )
        .await
        .unwrap();
        credit(&pool, "u1", 100, "Report approved", None).await.unwrap();

        let snapshot = overview(&pool, "u1").await.unwrap();
        assert_eq!(snapshot.balance, 100);
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.rewards.len(), 1);
    }
}
