use crate::db::pool::DbPool;
use crate::ui::messages::colors_enabled;
use crate::utils::time::format_millis;
use ansi_term::{Colour, Style};
use std::fs;

/// Aggregate numbers shown by `db --info`.
#[derive(Debug, Default, PartialEq)]
pub struct NightStats {
    pub total: i64,
    pub open: i64,
    pub unrated: i64,
    pub first_start: Option<i64>,
    pub last_start: Option<i64>,
    pub avg_quality: Option<f64>,
}

pub fn collect(pool: &mut DbPool) -> rusqlite::Result<NightStats> {
    let conn = &pool.conn;

    let (total, open, unrated): (i64, i64, i64) = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(startTimeMillis = endTimeMillis), 0),
                COALESCE(SUM(startTimeMillis <> endTimeMillis AND sleepQuality = -1), 0)
         FROM sleep_nights",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let (first_start, last_start): (Option<i64>, Option<i64>) = conn.query_row(
        "SELECT MIN(startTimeMillis), MAX(startTimeMillis) FROM sleep_nights",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let avg_quality: Option<f64> = conn.query_row(
        "SELECT AVG(sleepQuality) FROM sleep_nights WHERE sleepQuality >= 0",
        [],
        |row| row.get(0),
    )?;

    Ok(NightStats {
        total,
        open,
        unrated,
        first_start,
        last_start,
        avg_quality,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str, date_format: &str) -> rusqlite::Result<()> {
    let label = if colors_enabled() {
        Style::new().fg(Colour::Cyan)
    } else {
        Style::new()
    };
    let value = |c: Colour| if colors_enabled() { Style::new().fg(c) } else { Style::new() };
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{} {}", label.paint("• File:"), value(Colour::Yellow).paint(db_path));
    println!("{} {:.1} KB", label.paint("• Size:"), file_kb);

    //
    // 2) COUNTS
    //
    let stats = collect(pool)?;
    println!(
        "{} {}",
        label.paint("• Nights:"),
        value(Colour::Green).paint(stats.total.to_string())
    );
    println!("{} {}", label.paint("• Open:"), stats.open);
    println!("{} {}", label.paint("• Unrated:"), stats.unrated);

    //
    // 3) RANGE
    //
    let fmt = |v: Option<i64>| {
        v.map(|m| format_millis(m, date_format))
            .unwrap_or_else(|| value(Colour::Fixed(8)).paint("--").to_string())
    };
    println!("{}", label.paint("• Range:"));
    println!("    from: {}", fmt(stats.first_start));
    println!("    to:   {}", fmt(stats.last_start));

    //
    // 4) AVERAGE QUALITY
    //
    if let Some(avg) = stats.avg_quality {
        println!("{} {:.2}", label.paint("• Average quality:"), avg);
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::insert_night;
    use crate::models::sleep_night::SleepNight;

    #[test]
    fn counts_open_unrated_and_average() {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();

        insert_night(&pool.conn, &SleepNight::open_at(9_000)).unwrap();
        let mut unrated = SleepNight::open_at(1_000);
        unrated.end_time_millis = 2_000;
        insert_night(&pool.conn, &unrated).unwrap();
        for q in [2, 4] {
            let mut n = SleepNight::open_at(3_000);
            n.end_time_millis = 4_000;
            n.sleep_quality = q;
            insert_night(&pool.conn, &n).unwrap();
        }

        let stats = collect(&mut pool).unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.unrated, 1);
        assert_eq!(stats.first_start, Some(1_000));
        assert_eq!(stats.last_start, Some(9_000));
        assert_eq!(stats.avg_quality, Some(3.0));
    }

    #[test]
    fn empty_table_has_no_range() {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();

        let stats = collect(&mut pool).unwrap();
        assert_eq!(stats, NightStats::default());
    }
}
