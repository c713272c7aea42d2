use crate::errors::{AppError, AppResult};

/// Value stored in `sleepQuality` until the user rates the night.
pub const UNRATED: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepQuality {
    VeryBad,    // 0
    Poor,       // 1
    SoSo,       // 2
    Ok,         // 3
    PrettyGood, // 4
    Excellent,  // 5
}

impl SleepQuality {
    pub fn value(&self) -> i32 {
        match self {
            SleepQuality::VeryBad => 0,
            SleepQuality::Poor => 1,
            SleepQuality::SoSo => 2,
            SleepQuality::Ok => 3,
            SleepQuality::PrettyGood => 4,
            SleepQuality::Excellent => 5,
        }
    }

    pub fn from_value(v: i32) -> Option<Self> {
        match v {
            0 => Some(SleepQuality::VeryBad),
            1 => Some(SleepQuality::Poor),
            2 => Some(SleepQuality::SoSo),
            3 => Some(SleepQuality::Ok),
            4 => Some(SleepQuality::PrettyGood),
            5 => Some(SleepQuality::Excellent),
            _ => None,
        }
    }

    /// Validate a raw rating coming from the user.
    pub fn parse(v: i32) -> AppResult<Self> {
        Self::from_value(v).ok_or_else(|| {
            AppError::Validation(format!("sleep quality must be between 0 and 5, got {}", v))
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SleepQuality::VeryBad => "Very bad",
            SleepQuality::Poor => "Poor",
            SleepQuality::SoSo => "So-so",
            SleepQuality::Ok => "OK",
            SleepQuality::PrettyGood => "Pretty good",
            SleepQuality::Excellent => "Excellent",
        }
    }
}

/// Human label for a raw column value; unrated or unknown values render as "--".
pub fn describe_quality(v: i32) -> &'static str {
    SleepQuality::from_value(v).map(|q| q.label()).unwrap_or("--")
}
