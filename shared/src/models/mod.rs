//! Domain Models
//!
//! Wire-facing structs shared between the ledger service and its
//! consumers. JSON uses camelCase to match the web front end.

pub mod account;
pub mod overview;
pub mod reward;
pub mod transaction;

pub use account::Account;
pub use overview::RewardsOverview;
pub use reward::{Reward, RewardCreate, RewardUpdate};
pub use transaction::{PointTransaction, TransactionType};
