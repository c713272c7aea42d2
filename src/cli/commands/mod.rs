pub mod backup;
pub mod clear;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod rate;
pub mod start;
pub mod status;
pub mod stop;

use crate::config::Config;
use crate::core::controller::SessionController;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::utils::time::SystemClock;
use std::sync::Arc;

/// Open the configured database off the main thread and build a controller
/// whose state is recovered from it.
pub(crate) async fn open_controller(cfg: &Config) -> AppResult<SessionController<SqliteStore>> {
    let db_path = cfg.database.clone();
    let store = tokio::task::spawn_blocking(move || SqliteStore::open(&db_path)).await??;
    SessionController::new(store, Arc::new(SystemClock)).await
}
