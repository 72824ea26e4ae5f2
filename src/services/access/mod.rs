//! Event access capability.
//!
//! The widget only reads events once access has been granted. The status
//! lives in the settings row so it survives restarts.

use anyhow::Result;

use crate::models::access::AccessStatus;
use crate::services::database::Database;
use crate::services::settings::SettingsService;

pub struct AccessService<'a> {
    settings: SettingsService<'a>,
}

impl<'a> AccessService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            settings: SettingsService::new(db),
        }
    }

    pub fn status(&self) -> Result<AccessStatus> {
        Ok(self.settings.get()?.event_access)
    }

    /// Ask for access. Only an undecided status changes; an earlier
    /// decision is returned as it is.
    pub fn request(&self) -> Result<AccessStatus> {
        match self.status()? {
            AccessStatus::NotDetermined => self.set(AccessStatus::FullAccess),
            decided => {
                log::info!("Event access already decided: {}", decided);
                Ok(decided)
            }
        }
    }

    pub fn grant(&self) -> Result<AccessStatus> {
        self.set(AccessStatus::FullAccess)
    }

    pub fn deny(&self) -> Result<AccessStatus> {
        self.set(AccessStatus::Denied)
    }

    pub fn reset(&self) -> Result<AccessStatus> {
        self.set(AccessStatus::NotDetermined)
    }

    fn set(&self, status: AccessStatus) -> Result<AccessStatus> {
        let mut settings = self.settings.get()?;
        settings.event_access = status;
        self.settings.update(&settings)?;
        log::info!("Event access set to {}", status);
        Ok(status)
    }
}
