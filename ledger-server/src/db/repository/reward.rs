//! Reward Catalog Repository

use super::{RepoError, RepoResult};
use shared::models::{Reward, RewardCreate, RewardUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const REWARD_SELECT: &str = "SELECT id, name, cost, description, image_url, is_active, created_at, updated_at FROM reward";

/// Active catalog, ordered by name.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Reward>> {
    let sql = format!("{REWARD_SELECT} WHERE is_active = 1 ORDER BY name");
    let rows = sqlx::query_as::<_, Reward>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Look up a reward regardless of active state (admin edit path).
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reward>> {
    let sql = format!("{REWARD_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Reward>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Look up a redeemable reward. Soft-deleted items are absent.
pub async fn find_active_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reward>> {
    let sql = format!("{REWARD_SELECT} WHERE id = ? AND is_active = 1");
    let row = sqlx::query_as::<_, Reward>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: RewardCreate) -> RepoResult<Reward> {
    validate_name(&data.name)?;
    validate_cost(data.cost)?;

    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO reward (id, name, cost, description, image_url, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.cost)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reward".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RewardUpdate) -> RepoResult<Reward> {
    if let Some(name) = &data.name {
        validate_name(name)?;
    }
    if let Some(cost) = data.cost {
        validate_cost(cost)?;
    }

    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE reward SET name = COALESCE(?1, name), cost = COALESCE(?2, cost), description = COALESCE(?3, description), image_url = COALESCE(?4, image_url), is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.name)
    .bind(data.cost)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reward {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reward {id} not found")))
}

/// Soft delete: the row stays so past redemptions keep their context,
/// but the item leaves the catalog and can no longer be redeemed.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = now_millis();
    let rows = sqlx::query("UPDATE reward SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

fn validate_name(name: &str) -> RepoResult<()> {
    if name.trim().is_empty() {
        return Err(RepoError::Validation("Reward name is required".into()));
    }
    Ok(())
}

fn validate_cost(cost: i64) -> RepoResult<()> {
    if cost <= 0 {
        return Err(RepoError::Validation(format!(
            "Reward cost must be positive, got {cost}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn tote_bag() -> RewardCreate {
        RewardCreate {
            name: "Eco Tote Bag".into(),
            cost: 60,
            description: Some("Reusable canvas bag".into()),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let pool = test_pool().await;
        let reward = create(&pool, tote_bag()).await.unwrap();
        assert_eq!(reward.cost, 60);
        assert!(reward.is_active);

        create(
            &pool,
            RewardCreate {
                name: "Bamboo Bottle".into(),
                cost: 120,
                description: None,
                image_url: None,
            },
        )
        .await
        .unwrap();

        // Ordered by name
        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Bamboo Bottle");
        assert_eq!(all[1].name, "Eco Tote Bag");
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_cost() {
        let pool = test_pool().await;
        for bad in [0, -10] {
            let err = create(
                &pool,
                RewardCreate {
                    name: "Broken".into(),
                    cost: bad,
                    description: None,
                    image_url: None,
                },
            )
            .await
            .unwrap_err();
            assert!(matches!(err, RepoError::Validation(_)));
        }
        assert!(find_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_non_positive_cost() {
        let pool = test_pool().await;
        let reward = create(&pool, tote_bag()).await.unwrap();
        let err = update(
            &pool,
            reward.id,
            RewardUpdate {
                name: None,
                cost: Some(0),
                description: None,
                image_url: None,
                is_active: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(find_by_id(&pool, reward.id).await.unwrap().unwrap().cost, 60);
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let pool = test_pool().await;
        let reward = create(&pool, tote_bag()).await.unwrap();
        let updated = update(
            &pool,
            reward.id,
            RewardUpdate {
                name: None,
                cost: Some(80),
                description: None,
                image_url: None,
                is_active: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.cost, 80);
        assert_eq!(updated.name, "Eco Tote Bag");
    }

    #[tokio::test]
    async fn test_update_missing_reward() {
        let pool = test_pool().await;
        let err = update(
            &pool,
            999,
            RewardUpdate {
                name: Some("Ghost".into()),
                cost: None,
                description: None,
                image_url: None,
                is_active: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_catalog() {
        let pool = test_pool().await;
        let reward = create(&pool, tote_bag()).await.unwrap();

        assert!(delete(&pool, reward.id).await.unwrap());
        assert!(find_all(&pool).await.unwrap().is_empty());
        assert!(find_active_by_id(&pool, reward.id).await.unwrap().is_none());
        // Row still present for the admin path
        assert!(find_by_id(&pool, reward.id).await.unwrap().is_some());

        // Second delete is a no-op
        assert!(!delete(&pool, reward.id).await.unwrap());
    }
}
