use super::quality::{SleepQuality, UNRATED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepNight {
    pub id: i64,                // ⇔ sleep_nights.id (assigned by the store)
    pub start_time_millis: i64, // ⇔ sleep_nights.startTimeMillis
    pub end_time_millis: i64,   // ⇔ sleep_nights.endTimeMillis (== start while open)
    pub sleep_quality: i32,     // ⇔ sleep_nights.sleepQuality (-1 = unrated)
}

impl SleepNight {
    /// A freshly started night: end equals start, quality unrated.
    /// `id` stays 0 until the store assigns one.
    pub fn open_at(now_millis: i64) -> Self {
        Self {
            id: 0,
            start_time_millis: now_millis,
            end_time_millis: now_millis,
            sleep_quality: UNRATED,
        }
    }

    pub fn is_open(&self) -> bool {
        self.start_time_millis == self.end_time_millis
    }

    pub fn is_rated(&self) -> bool {
        self.sleep_quality != UNRATED
    }

    pub fn quality(&self) -> Option<SleepQuality> {
        SleepQuality::from_value(self.sleep_quality)
    }

    pub fn duration_millis(&self) -> i64 {
        self.end_time_millis - self.start_time_millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_night_has_equal_timestamps_and_no_rating() {
        let n = SleepNight::open_at(1_000);
        assert!(n.is_open());
        assert!(!n.is_rated());
        assert_eq!(n.quality(), None);
        assert_eq!(n.duration_millis(), 0);
    }

    #[test]
    fn closed_night_reports_duration() {
        let mut n = SleepNight::open_at(1_000);
        n.end_time_millis = 5_000;
        assert!(!n.is_open());
        assert_eq!(n.duration_millis(), 4_000);
    }
}
