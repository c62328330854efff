//! Point Transaction Model

use serde::{Deserialize, Serialize};

/// Direction of a balance-affecting event.
///
/// Stored as lowercase TEXT (`earned` / `redeemed`) and serialized the
/// same way on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TransactionType {
    Earned,
    Redeemed,
}

/// Immutable ledger entry. Once written it is never modified or
/// deleted — the transaction log is the source of truth for balance
/// reconstruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PointTransaction {
    pub id: i64,
    pub user_id: String,
    /// `earned` or `redeemed`
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Positive magnitude; sign comes from `tx_type`
    pub amount: i64,
    /// Frozen human-readable reason, e.g. "Redeemed: Eco Tote Bag"
    pub description: String,
    /// Caller-supplied idempotency key, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Epoch millis, immutable, display sort key (descending)
    pub created_at: i64,
}

impl PointTransaction {
    /// Amount signed by type: earned positive, redeemed negative.
    pub fn signed_amount(&self) -> i64 {
        match self.tx_type {
            TransactionType::Earned => self.amount,
            TransactionType::Redeemed => -self.amount,
        }
    }
}
