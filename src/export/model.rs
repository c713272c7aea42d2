// src/export/model.rs

use crate::models::quality::describe_quality;
use crate::models::sleep_night::SleepNight;
use crate::utils::time::{format_millis, millis_to_minutes};
use serde::Serialize;

/// Flat, serializable row: one per night, shared by CSV and JSON.
#[derive(Debug, Clone, Serialize)]
pub struct NightExport {
    pub id: i64,
    pub start: String,
    pub end: String,
    pub start_time_millis: i64,
    pub end_time_millis: i64,
    pub duration_minutes: i64,
    pub sleep_quality: i32,
    pub quality_label: String,
    pub open: bool,
}

impl NightExport {
    pub fn from_night(night: &SleepNight, date_format: &str) -> Self {
        let open = night.is_open();
        Self {
            id: night.id,
            start: format_millis(night.start_time_millis, date_format),
            end: if open {
                String::new()
            } else {
                format_millis(night.end_time_millis, date_format)
            },
            start_time_millis: night.start_time_millis,
            end_time_millis: night.end_time_millis,
            duration_minutes: millis_to_minutes(night.duration_millis()),
            sleep_quality: night.sleep_quality,
            quality_label: describe_quality(night.sleep_quality).to_string(),
            open,
        }
    }
}
