use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::colors_enabled;
use ansi_term::Colour;
use rusqlite::Connection;

const MAX_OP_WIDTH: usize = 60;

/// One row of the internal `log` table.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// "operation (target)", or just the operation when there is no target.
    fn op_target(&self) -> String {
        if self.target.is_empty() {
            self.operation.clone()
        } else {
            format!("{} ({})", self.operation, self.target)
        }
    }
}

/// ANSI colour per operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" => Colour::Green,
        "stop" => Colour::Yellow,
        "rate" => Colour::Cyan,
        "clear" => Colour::Red,
        "backup" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max - 3).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn load_entries(conn: &Connection) -> AppResult<Vec<LogEntry>> {
        let mut stmt = conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = Self::load_entries(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| e.op_target().chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for entry in &entries {
            let visible = truncate(&entry.op_target(), MAX_OP_WIDTH);
            let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));

            // only the operation word is coloured
            let color = color_for_operation(&entry.operation);
            let colored = match visible.split_once(' ') {
                _ if !colors_enabled() => visible.clone(),
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                colored,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::log::ttlog;

    #[test]
    fn entries_come_back_in_insertion_order() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        ttlog(&conn, "start", "night #1", "Sleep tracking started").unwrap();
        ttlog(&conn, "stop", "night #1", "Sleep tracking stopped").unwrap();

        let entries = LogLogic::load_entries(&conn).unwrap();
        let ops: Vec<&str> = entries
            .iter()
            .filter(|e| e.operation != "migration_applied")
            .map(|e| e.operation.as_str())
            .collect();
        assert_eq!(ops, vec!["start", "stop"]);
        assert_eq!(entries.last().unwrap().op_target(), "stop (night #1)");
    }

    #[test]
    fn long_targets_are_truncated() {
        let long = "x".repeat(80);
        let t = truncate(&long, MAX_OP_WIDTH);
        assert_eq!(t.chars().count(), MAX_OP_WIDTH);
        assert!(t.ends_with("..."));
    }
}
