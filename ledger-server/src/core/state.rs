use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state — shared handle to configuration and the database.
///
/// Cloning is shallow (`Arc` + pool handle), so every request handler
/// gets its own cheap copy.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
}

impl ServerState {
    /// Create the working directory, open the database and run
    /// migrations.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::Internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.db_path()).await?;

        Ok(Self {
            config: Arc::new(config.clone()),
            db,
        })
    }

    /// Connection pool shorthand for repositories
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
