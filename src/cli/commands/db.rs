use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, success};

pub fn handle(cfg: &Config, migrate: bool, check: bool, vacuum: bool, info: bool) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    //
    // 1) MIGRATE
    //
    if migrate {
        header("Running migrations");
        run_pending_migrations(&pool.conn)?;
        success("Migration completed.");
    }

    //
    // 2) INFO
    //
    if info {
        stats::print_db_info(&mut pool, &cfg.database, &cfg.date_format)?;
    }

    //
    // 3) CHECK
    //
    if check {
        header("Running integrity check");

        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        if integrity == "ok" {
            success("Integrity check passed.");
        } else {
            error(format!("Integrity check failed: {}", integrity));
        }
    }

    //
    // 4) VACUUM
    //
    if vacuum {
        header("Running VACUUM");
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}
