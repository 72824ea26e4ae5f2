use serde::{Deserialize, Serialize};

/// A named collection of events in the local store.
///
/// Subscribed calendars are read-only feeds and never contribute events
/// to the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: Option<i64>,
    pub name: String,
    pub color: Option<String>,
    pub is_subscribed: bool,
    pub enabled: bool,
}

impl Calendar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Calendar name cannot be empty".to_string());
        }

        if let Some(ref color) = self.color {
            if !is_hex_color(color) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// Whether events of this calendar should be shown by the widget.
    pub fn is_visible(&self) -> bool {
        self.enabled && !self.is_subscribed
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            color: None,
            is_subscribed: false,
            enabled: true,
        }
    }
}

pub(crate) fn is_hex_color(color: &str) -> bool {
    color.starts_with('#')
        && (color.len() == 7 || color.len() == 4)
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_calendar() {
        let calendar = Calendar {
            color: Some("#3366FF".to_string()),
            ..Calendar::new("Personal")
        };
        assert!(calendar.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        assert!(Calendar::new("  ").validate().is_err());
    }

    #[test]
    fn test_validate_bad_color() {
        let calendar = Calendar {
            color: Some("#GGGGGG".to_string()),
            ..Calendar::new("Work")
        };
        assert!(calendar.validate().is_err());
    }

    #[test]
    fn test_visibility() {
        let mut calendar = Calendar::new("Holidays");
        assert!(calendar.is_visible());

        calendar.is_subscribed = true;
        assert!(!calendar.is_visible());

        calendar.is_subscribed = false;
        calendar.enabled = false;
        assert!(!calendar.is_visible());
    }
}
