//! Loads and saves the presentation [`Appearance`] as TOML.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::appearance::Appearance;

pub struct AppearanceStore {
    path: PathBuf,
}

impl AppearanceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the appearance file, falling back to defaults when it is missing.
    pub fn load(&self) -> Result<Appearance> {
        if !self.path.exists() {
            log::debug!(
                "No appearance file at {}, using defaults",
                self.path.display()
            );
            return Ok(Appearance::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let appearance: Appearance = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        appearance
            .validate()
            .map_err(|e| anyhow!("Invalid appearance: {}", e))?;

        Ok(appearance)
    }

    pub fn save(&self, appearance: &Appearance) -> Result<()> {
        appearance
            .validate()
            .map_err(|e| anyhow!("Invalid appearance: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(appearance).context("Failed to serialize appearance")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        log::info!("Saved appearance to {}", self.path.display());
        Ok(())
    }
}
