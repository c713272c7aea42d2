use crate::errors::{AppError, AppResult};
use crate::models::quality::UNRATED;
use crate::models::sleep_night::SleepNight;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_NIGHT: &str =
    "SELECT id, startTimeMillis, endTimeMillis, sleepQuality FROM sleep_nights";

pub fn map_row(row: &Row) -> Result<SleepNight> {
    Ok(SleepNight {
        id: row.get("id")?,
        start_time_millis: row.get("startTimeMillis")?,
        end_time_millis: row.get("endTimeMillis")?,
        sleep_quality: row.get("sleepQuality")?,
    })
}

/// Append a night and return the id assigned by SQLite.
pub fn insert_night(conn: &Connection, night: &SleepNight) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sleep_nights (startTimeMillis, endTimeMillis, sleepQuality)
         VALUES (?1, ?2, ?3)",
        params![
            night.start_time_millis,
            night.end_time_millis,
            night.sleep_quality
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_night(conn: &Connection, id: i64) -> AppResult<Option<SleepNight>> {
    let night = conn
        .query_row(&format!("{SELECT_NIGHT} WHERE id = ?1"), [id], map_row)
        .optional()?;
    Ok(night)
}

/// The most recent night whose start and end are still equal.
pub fn get_open_night(conn: &Connection) -> AppResult<Option<SleepNight>> {
    let night = conn
        .query_row(
            &format!(
                "{SELECT_NIGHT}
                 WHERE startTimeMillis = endTimeMillis
                 ORDER BY id DESC
                 LIMIT 1"
            ),
            [],
            map_row,
        )
        .optional()?;
    Ok(night)
}

/// The most recent closed night still waiting for a rating.
pub fn get_latest_unrated(conn: &Connection) -> AppResult<Option<SleepNight>> {
    let night = conn
        .query_row(
            &format!(
                "{SELECT_NIGHT}
                 WHERE startTimeMillis <> endTimeMillis AND sleepQuality = ?1
                 ORDER BY id DESC
                 LIMIT 1"
            ),
            [UNRATED],
            map_row,
        )
        .optional()?;
    Ok(night)
}

/// Overwrite every column of the row matching `night.id`.
pub fn update_night(conn: &Connection, night: &SleepNight) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE sleep_nights
         SET startTimeMillis = ?1, endTimeMillis = ?2, sleepQuality = ?3
         WHERE id = ?4",
        params![
            night.start_time_millis,
            night.end_time_millis,
            night.sleep_quality,
            night.id
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(night.id));
    }
    Ok(())
}

/// All nights, most recent first.
pub fn load_all_nights(conn: &Connection) -> AppResult<Vec<SleepNight>> {
    let mut stmt = conn.prepare(&format!("{SELECT_NIGHT} ORDER BY id DESC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete every night; returns how many rows were removed.
pub fn clear_nights(conn: &Connection) -> AppResult<usize> {
    let removed = conn.execute("DELETE FROM sleep_nights", [])?;
    Ok(removed)
}
