// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::NightExport;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::models::sleep_night::SleepNight;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `nights` (already most-recent-first) to `file`.
    /// Returns the number of exported rows.
    pub fn export(
        nights: &[SleepNight],
        format: ExportFormat,
        file: &str,
        date_format: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        ensure_writable(path, force)?;

        if nights.is_empty() {
            warning("No nights recorded yet, nothing to export.");
            return Ok(0);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let rows: Vec<NightExport> = nights
            .iter()
            .map(|n| NightExport::from_night(n, date_format))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        tracing::debug!(format = format.as_str(), rows = rows.len(), "export written");
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nights() -> Vec<SleepNight> {
        vec![
            SleepNight {
                id: 2,
                start_time_millis: 10_000,
                end_time_millis: 10_000,
                sleep_quality: -1,
            },
            SleepNight {
                id: 1,
                start_time_millis: 1_000,
                end_time_millis: 3_601_000,
                sleep_quality: 4,
            },
        ]
    }

    #[test]
    fn csv_has_header_and_one_row_per_night() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nights.csv");
        let file = out.to_string_lossy().to_string();

        let n = ExportLogic::export(&nights(), ExportFormat::Csv, &file, "%Y-%m-%d", true).unwrap();
        assert_eq!(n, 2);

        let content = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,start,end,"));
        assert!(lines[2].contains("Pretty good"));
        assert!(lines[2].contains(",60,"));
    }

    #[test]
    fn json_marks_open_nights() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nights.json");
        let file = out.to_string_lossy().to_string();

        ExportLogic::export(&nights(), ExportFormat::Json, &file, "%Y-%m-%d", true).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed[0]["open"], true);
        assert_eq!(parsed[0]["quality_label"], "--");
        assert_eq!(parsed[1]["sleep_quality"], 4);
    }

    #[test]
    fn empty_history_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.csv");
        let file = out.to_string_lossy().to_string();

        let n = ExportLogic::export(&[], ExportFormat::Csv, &file, "%Y-%m-%d", true).unwrap();
        assert_eq!(n, 0);
        assert!(!out.exists());
    }
}
