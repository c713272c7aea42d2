use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `sleep_nights` table exists.
fn sleep_nights_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='sleep_nights'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `sleep_nights` table.
fn create_sleep_nights_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sleep_nights (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            startTimeMillis INTEGER NOT NULL,
            endTimeMillis   INTEGER NOT NULL,
            sleepQuality    INTEGER NOT NULL DEFAULT -1
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Index used by the "tonight" lookup (start == end).
fn migrate_add_open_index(conn: &Connection) -> Result<()> {
    let version = "20260901_0001_open_night_index";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_sleep_nights_open
         ON sleep_nights(startTimeMillis, endTimeMillis);",
    )?;

    mark_applied(conn, version, "Added open-night index to sleep_nights")?;
    tracing::info!(version, "migration applied");

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create sleep_nights if missing
    if !sleep_nights_table_exists(conn)? {
        create_sleep_nights_table(conn)?;
        success("Created sleep_nights table.");
    }

    // 3) Incremental migrations, each recorded once in `log`
    migrate_add_open_index(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_applied(conn: &Connection) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn migrations_run_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        assert!(sleep_nights_table_exists(&conn).unwrap());
        assert_eq!(count_applied(&conn), 1);
    }
}
