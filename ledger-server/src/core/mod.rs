//! Core Module
//!
//! Configuration, shared state and server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;

/// Set up the process environment: dotenv, then logging.
///
/// File logging activates when `LOG_DIR` points at an existing
/// directory; `LOG_LEVEL` overrides the default `info`.
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    crate::utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
