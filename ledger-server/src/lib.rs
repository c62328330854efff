//! Points Ledger Server
//!
//! Standalone points ledger and redemption service for the community
//! waste-reporting platform: users earn points for approved reports
//! and exchange them for catalog rewards.
//!
//! # Module structure
//!
//! ```text
//! ledger-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── db/            # SQLite pool + repositories (ledger, reward)
//! ├── ledger/        # earning, redemption, overview
//! ├── handler/       # HTTP handlers
//! ├── routes/        # routers + middleware stack
//! └── utils/         # errors, logging
//! ```
//!
//! The ledger repository's `apply_delta` is the single mutating
//! primitive: balance changes and the append-only transaction log
//! always commit together, per account, linearized.

pub mod core;
pub mod db;
pub mod handler;
pub mod ledger;
pub mod routes;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState, setup_environment};
pub use crate::utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};
