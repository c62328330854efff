//! Points Ledger Domain
//!
//! Thin domain layer over the repositories:
//!
//! - `earning`: credit points for external events (report approval)
//! - `redemption`: exchange points for a catalog reward
//! - `overview`: assemble the `{balance, transactions, rewards}`
//!   dashboard snapshot
//!
//! Earning and redemption are the only writers to the ledger; both go
//! through the repository's single atomic `apply_delta` primitive.

pub mod earning;
pub mod overview;
pub mod redemption;

pub use earning::credit;
pub use overview::overview;
pub use redemption::redeem;
