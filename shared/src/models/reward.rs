//! Reward Catalog Model

use serde::{Deserialize, Serialize};

/// Redeemable catalog item. `cost > 0` is enforced at write time.
///
/// Deletion is soft (`is_active = 0`) so historical transactions,
/// which freeze the reward's name and cost at redemption time, never
/// reference a vanished row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reward {
    pub id: i64,
    pub name: String,
    /// Point cost, always positive
    pub cost: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reward payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCreate {
    pub name: String,
    pub cost: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Update reward payload — `None` fields are left untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardUpdate {
    pub name: Option<String>,
    pub cost: Option<i64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}
