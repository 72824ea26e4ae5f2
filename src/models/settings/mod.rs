// Settings module
// Widget preferences persisted in the settings row

use serde::{Deserialize, Serialize};

use super::access::AccessStatus;
use super::week_start::WeekStart;

pub const DATE_FORMATS: [&str; 3] = ["MM/DD/YYYY", "DD/MM/YYYY", "YYYY/MM/DD"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: Option<i64>,
    pub first_day_of_week: WeekStart,
    pub date_format: String,
    /// How many days ahead to look for the next upcoming event
    pub upcoming_window_days: i64,
    pub event_access: AccessStatus,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Some(1),
            first_day_of_week: WeekStart::Monday,
            date_format: "MM/DD/YYYY".to_string(),
            upcoming_window_days: 7,
            event_access: AccessStatus::NotDetermined,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if !DATE_FORMATS.contains(&self.date_format.as_str()) {
            return Err(format!(
                "Date format must be one of {}",
                DATE_FORMATS.join(", ")
            ));
        }

        if !(1..=31).contains(&self.upcoming_window_days) {
            return Err("Upcoming window must be between 1 and 31 days".to_string());
        }

        Ok(())
    }
}
