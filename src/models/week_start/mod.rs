// Week start module
// First column of every month grid row

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ModelError;

/// Weekday shown in the first column of the month grid.
///
/// Uses the 1-based weekday numbering where Sunday is 1 and Saturday is 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

impl WeekStart {
    /// 1-based weekday index (Sunday = 1, Monday = 2).
    pub fn index(self) -> u32 {
        match self {
            WeekStart::Sunday => 1,
            WeekStart::Monday => 2,
        }
    }

    /// Build from a 1-based weekday index. Only Sunday and Monday are valid.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            1 => Some(WeekStart::Sunday),
            2 => Some(WeekStart::Monday),
            _ => None,
        }
    }

    pub fn to_chrono(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekStart {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(ModelError::UnknownWeekStart(other.to_string())),
        }
    }
}
