//! Rewards Overview Aggregate

use serde::{Deserialize, Serialize};

use super::{PointTransaction, Reward};

/// Dashboard snapshot: `{balance, transactions, rewards}`.
///
/// Best-effort aggregate of three independent reads — not a single
/// atomic snapshot, but each read reflects durable state at the time
/// it was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsOverview {
    pub balance: i64,
    /// Newest first
    pub transactions: Vec<PointTransaction>,
    /// Active catalog, ordered by name
    pub rewards: Vec<Reward>,
}
