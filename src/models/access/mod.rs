// Access module
// Authorization state for reading the event store

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ModelError;

/// Whether the widget may read events from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    #[default]
    NotDetermined,
    Denied,
    Restricted,
    FullAccess,
}

impl AccessStatus {
    /// Restricted access still allows reading events.
    pub fn is_granted(self) -> bool {
        matches!(self, AccessStatus::FullAccess | AccessStatus::Restricted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessStatus::NotDetermined => "not_determined",
            AccessStatus::Denied => "denied",
            AccessStatus::Restricted => "restricted",
            AccessStatus::FullAccess => "full_access",
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "not_determined" => Ok(AccessStatus::NotDetermined),
            "denied" => Ok(AccessStatus::Denied),
            "restricted" => Ok(AccessStatus::Restricted),
            "full_access" => Ok(AccessStatus::FullAccess),
            other => Err(ModelError::UnknownAccessStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(AccessStatus::NotDetermined, false; "not determined")]
    #[test_case(AccessStatus::Denied, false; "denied")]
    #[test_case(AccessStatus::Restricted, true; "restricted")]
    #[test_case(AccessStatus::FullAccess, true; "full access")]
    fn test_is_granted(status: AccessStatus, expected: bool) {
        assert_eq!(status.is_granted(), expected);
    }

    #[test]
    fn test_parse_display_round_trip() {
        for status in [
            AccessStatus::NotDetermined,
            AccessStatus::Denied,
            AccessStatus::Restricted,
            AccessStatus::FullAccess,
        ] {
            assert_eq!(status.to_string().parse::<AccessStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("granted".parse::<AccessStatus>().is_err());
    }
}
