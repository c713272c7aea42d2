//! Human-readable history of recorded nights.

use crate::models::quality::describe_quality;
use crate::models::sleep_night::SleepNight;
use crate::utils::mins2readable;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_millis, millis_to_minutes};

pub struct HistoryLogic;

impl HistoryLogic {
    /// Render nights (most recent first) as a table; `limit == 0` means all.
    pub fn render(nights: &[SleepNight], date_format: &str, limit: usize) -> String {
        let mut table = Table::new(vec![
            Column::right("ID"),
            Column::left("Start"),
            Column::left("End"),
            Column::right("Slept"),
            Column::left("Quality"),
        ]);

        let take = if limit == 0 { nights.len() } else { limit };

        for night in nights.iter().take(take) {
            let (end, slept) = if night.is_open() {
                ("tracking…".to_string(), "--".to_string())
            } else {
                (
                    format_millis(night.end_time_millis, date_format),
                    mins2readable(millis_to_minutes(night.duration_millis())),
                )
            };

            table.add_row(vec![
                night.id.to_string(),
                format_millis(night.start_time_millis, date_format),
                end,
                slept,
                format!("{} ({})", describe_quality(night.sleep_quality), night.sleep_quality),
            ]);
        }

        table.render()
    }

    /// One-line description of the open night, if any.
    pub fn describe_tonight(tonight: Option<&SleepNight>, date_format: &str) -> String {
        match tonight {
            Some(n) => format!(
                "Tracking night #{} since {}",
                n.id,
                format_millis(n.start_time_millis, date_format)
            ),
            None => "Not tracking. Use `sleeplog start` to begin a night.".to_string(),
        }
    }
}
