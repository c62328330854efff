//! Earning Trigger
//!
//! Credits points when an external event (e.g. an approved waste
//! report) says so. No sufficiency check applies; the account springs
//! into existence on first credit.

use crate::db::repository::{RepoResult, ledger};
use shared::models::{PointTransaction, TransactionType};
use sqlx::SqlitePool;

/// Credit `amount` points to `user_id`, returning the new balance and
/// the appended transaction.
pub async fn credit(
    pool: &SqlitePool,
    user_id: &str,
    amount: i64,
    description: &str,
    request_id: Option<&str>,
) -> RepoResult<(i64, PointTransaction)> {
    let (balance, record) = ledger::apply_delta(
        pool,
        user_id,
        TransactionType::Earned,
        amount,
        description,
        request_id,
    )
    .await?;
    tracing::info!(user_id = %user_id, amount, balance, "Points credited");
    Ok((balance, record))
}
