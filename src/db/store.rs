//! Persistence seam for sleep nights.
//!
//! `SessionStore` is the contract the controller depends on; `SqliteStore`
//! is the production implementation over the `sleep_nights` table.

use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::sleep_night::SleepNight;

pub trait SessionStore: Send + 'static {
    /// Append a new night, returning its assigned id.
    fn insert(&mut self, night: &SleepNight) -> AppResult<i64>;

    fn get(&mut self, id: i64) -> AppResult<Option<SleepNight>>;

    /// The open night ("tonight"), if any. Absence is not an error.
    fn get_open(&mut self) -> AppResult<Option<SleepNight>>;

    /// Most recent closed night that has not been rated yet.
    fn latest_unrated(&mut self) -> AppResult<Option<SleepNight>>;

    /// Overwrite the record with `night.id`; `AppError::NotFound` if it is gone.
    fn update(&mut self, night: &SleepNight) -> AppResult<()>;

    /// All nights, most recent first.
    fn get_all(&mut self) -> AppResult<Vec<SleepNight>>;

    /// Remove every night. Clearing an empty table is not an error.
    fn clear(&mut self) -> AppResult<()>;

    /// Record an audit line for a user action. Stores without an audit trail
    /// may ignore it.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) {}
}

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }
}

impl SessionStore for SqliteStore {
    fn insert(&mut self, night: &SleepNight) -> AppResult<i64> {
        queries::insert_night(&self.pool.conn, night)
    }

    fn get(&mut self, id: i64) -> AppResult<Option<SleepNight>> {
        queries::get_night(&self.pool.conn, id)
    }

    fn get_open(&mut self) -> AppResult<Option<SleepNight>> {
        queries::get_open_night(&self.pool.conn)
    }

    fn latest_unrated(&mut self) -> AppResult<Option<SleepNight>> {
        queries::get_latest_unrated(&self.pool.conn)
    }

    fn update(&mut self, night: &SleepNight) -> AppResult<()> {
        queries::update_night(&self.pool.conn, night)
    }

    fn get_all(&mut self) -> AppResult<Vec<SleepNight>> {
        queries::load_all_nights(&self.pool.conn)
    }

    fn clear(&mut self) -> AppResult<()> {
        let removed = queries::clear_nights(&self.pool.conn)?;
        tracing::debug!(removed, "cleared sleep_nights");
        Ok(())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        ttlog_quiet(&self.pool.conn, operation, target, message);
    }
}
