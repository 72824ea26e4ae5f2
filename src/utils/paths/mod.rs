// Default file locations under the platform's data and config directories

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const DATABASE_FILE: &str = "events.db";
const APPEARANCE_FILE: &str = "appearance.toml";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "DashCalendar", "DashCalendar")
        .ok_or_else(|| anyhow!("Unable to determine home directory"))
}

/// Path of the event store, creating its directory if needed.
pub fn default_database_path() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    Ok(data_dir.join(DATABASE_FILE))
}

/// Path of the appearance file. The file itself may not exist yet.
pub fn default_appearance_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(APPEARANCE_FILE))
}
