//! Points Ledger Repository
//!
//! The sole place where balance mutation occurs. [`apply_delta`] is
//! the only mutating primitive: it performs the guarded balance write
//! and the transaction-log append inside one SQLite transaction, so
//! concurrent calls for the same account linearize and no debit check
//! ever observes a stale balance.

use super::{RepoError, RepoResult};
use shared::models::{Account, PointTransaction, TransactionType};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const TRANSACTION_SELECT: &str = "SELECT id, user_id, tx_type, amount, description, request_id, created_at FROM point_transaction";

/// Cached balance row for a user, if it exists yet.
pub async fn find_account(pool: &SqlitePool, user_id: &str) -> RepoResult<Option<Account>> {
    let row = sqlx::query_as::<_, Account>(
        "SELECT user_id, balance, created_at, updated_at FROM account WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Current balance for a user. Unknown accounts read as 0 — absence
/// is never an error.
pub async fn get_balance(pool: &SqlitePool, user_id: &str) -> RepoResult<i64> {
    let account = find_account(pool, user_id).await?;
    Ok(account.map(|a| a.balance).unwrap_or(0))
}

/// Transaction history for a user, newest first. Empty for unknown
/// accounts.
pub async fn list_transactions(
    pool: &SqlitePool,
    user_id: &str,
) -> RepoResult<Vec<PointTransaction>> {
    let sql = format!("{TRANSACTION_SELECT} WHERE user_id = ? ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, PointTransaction>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Look up a transaction by its caller-supplied idempotency key.
pub async fn find_by_request_id(
    pool: &SqlitePool,
    request_id: &str,
) -> RepoResult<Option<PointTransaction>> {
    let sql = format!("{TRANSACTION_SELECT} WHERE request_id = ?");
    let row = sqlx::query_as::<_, PointTransaction>(&sql)
        .bind(request_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Apply a balance delta and append the explaining transaction as one
/// indivisible unit.
///
/// Contract:
/// - `amount` must be positive ([`RepoError::InvalidAmount`] otherwise,
///   rejected before touching the store)
/// - `Redeemed` debits only if `balance >= amount`
///   ([`RepoError::InsufficientBalance`] otherwise, no effect)
/// - `Earned` credits unconditionally, creating the account row with
///   balance 0 on first write
/// - a `request_id` seen before returns the previously committed
///   transaction and mutates nothing, provided the replay carries the
///   same user, type, and amount; reusing a key for a different
///   operation is a [`RepoError::Validation`]
///
/// The SQLite transaction issues the guarded write as its first
/// statement, taking the write lock before anything is read. Writers
/// for the same account therefore queue (WAL + busy_timeout) and the
/// debit CAS (`WHERE balance >= amount`) always evaluates against the
/// latest committed balance.
pub async fn apply_delta(
    pool: &SqlitePool,
    user_id: &str,
    tx_type: TransactionType,
    amount: i64,
    description: &str,
    request_id: Option<&str>,
) -> RepoResult<(i64, PointTransaction)> {
    if amount <= 0 {
        return Err(RepoError::InvalidAmount(amount));
    }

    // Duplicate-request short circuit. The unique index on request_id
    // backstops the race where two carriers of the same key arrive
    // together (handled below on insert).
    if let Some(key) = request_id
        && let Some(existing) = find_by_request_id(pool, key).await?
    {
        verify_replay(&existing, key, user_id, tx_type, amount)?;
        let balance = get_balance(pool, user_id).await?;
        tracing::info!(request_id = %key, user_id = %user_id, "Duplicate applyDelta ignored");
        return Ok((balance, existing));
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    // Write first: the guarded balance update is the transaction's
    // first statement, so the write lock is taken before any read.
    match tx_type {
        TransactionType::Earned => {
            sqlx::query(
                "INSERT INTO account (user_id, balance, created_at, updated_at) VALUES (?1, ?2, ?3, ?3) ON CONFLICT(user_id) DO UPDATE SET balance = balance + excluded.balance, updated_at = excluded.updated_at",
            )
            .bind(user_id)
            .bind(amount)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        TransactionType::Redeemed => {
            let result = sqlx::query(
                "UPDATE account SET balance = balance - ?1, updated_at = ?2 WHERE user_id = ?3 AND balance >= ?1",
            )
            .bind(amount)
            .bind(now)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // CAS miss: missing row (implicit balance 0) or balance < amount
                let balance: Option<i64> =
                    sqlx::query_scalar("SELECT balance FROM account WHERE user_id = ?")
                        .bind(user_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                tx.rollback().await?;
                return Err(RepoError::InsufficientBalance {
                    balance: balance.unwrap_or(0),
                    required: amount,
                });
            }
        }
    }

    let new_balance: i64 = sqlx::query_scalar("SELECT balance FROM account WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

    // Snowflake IDs carry 12 random bits per millisecond; on the rare
    // same-ms collision, retry with a fresh ID.
    let mut attempts = 0;
    loop {
        let record = PointTransaction {
            id: snowflake_id(),
            user_id: user_id.to_string(),
            tx_type,
            amount,
            description: description.to_string(),
            request_id: request_id.map(str::to_string),
            created_at: now,
        };

        let inserted = sqlx::query(
            "INSERT INTO point_transaction (id, user_id, tx_type, amount, description, request_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(record.id)
        .bind(&record.user_id)
        .bind(record.tx_type)
        .bind(record.amount)
        .bind(&record.description)
        .bind(record.request_id.as_deref())
        .bind(record.created_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {
                tx.commit().await?;
                return Ok((new_balance, record));
            }
            Err(err) if is_unique_violation(&err) => {
                if let Some(key) = request_id {
                    // Lost the dedup race: another writer committed this
                    // request_id after our pre-check. Undo our balance
                    // write and hand back theirs.
                    tx.rollback().await?;
                    if let Some(existing) = find_by_request_id(pool, key).await? {
                        verify_replay(&existing, key, user_id, tx_type, amount)?;
                        let balance = get_balance(pool, user_id).await?;
                        tracing::info!(request_id = %key, user_id = %user_id, "Duplicate applyDelta ignored (raced)");
                        return Ok((balance, existing));
                    }
                    return Err(RepoError::Database(
                        "Unique violation without a matching request id".into(),
                    ));
                }
                attempts += 1;
                if attempts >= 3 {
                    return Err(RepoError::Database("Transaction id collision".into()));
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// A replayed key must describe the exact operation it was first used
/// for. Honoring the stored transaction for a mismatched replay would
/// silently drop the new request while reporting success.
fn verify_replay(
    existing: &PointTransaction,
    key: &str,
    user_id: &str,
    tx_type: TransactionType,
    amount: i64,
) -> RepoResult<()> {
    if existing.user_id != user_id || existing.tx_type != tx_type || existing.amount != amount {
        tracing::warn!(request_id = %key, user_id = %user_id, "Request id reused for a different operation");
        return Err(RepoError::Validation(format!(
            "Request id {key} was already used by a different operation"
        )));
    }
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation),
        _ => false,
    }
}
