//! Account Model

use serde::{Deserialize, Serialize};

/// Per-user point balance row.
///
/// Accounts are never provisioned explicitly — they spring into
/// existence with balance 0 on the first credit. The balance is
/// always recomputable as the signed sum of the account's
/// transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub user_id: String,
    pub balance: i64,
    pub created_at: i64,
    pub updated_at: i64,
}
