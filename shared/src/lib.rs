//! Shared types for the points ledger service.
//!
//! Wire/domain models live in [`models`]; ID and timestamp helpers in
//! [`util`]. Database derives (`sqlx::FromRow`, `sqlx::Type`) are
//! gated behind the `db` feature so pure consumers stay light.

pub mod models;
pub mod util;
