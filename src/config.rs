//! Briefing configuration stored in ~/.dailyos/briefing.json

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::context::Personality;
use crate::error::{Result, ViewModelError};

/// Thresholds and presentation settings for the week and focus pages.
///
/// Every field has a default, so a partial (or missing) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub personality: Personality,
    /// Shortest free block that counts as deep work.
    #[serde(default = "default_deep_work_min_minutes")]
    pub deep_work_min_minutes: u32,
    /// Blocks starting at or after this local hour are not deep work.
    #[serde(default = "default_deep_work_cutoff_hour")]
    pub deep_work_cutoff_hour: u32,
    #[serde(default = "default_cap")]
    pub deep_work_block_cap: usize,
    #[serde(default = "default_cap")]
    pub other_priorities_cap: usize,
    /// Assumed length of a meeting with no usable end time.
    #[serde(default = "default_meeting_minutes")]
    pub default_meeting_minutes: u32,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_deep_work_min_minutes() -> u32 {
    60
}

fn default_deep_work_cutoff_hour() -> u32 {
    17
}

fn default_cap() -> usize {
    5
}

fn default_meeting_minutes() -> u32 {
    45
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            personality: Personality::default(),
            deep_work_min_minutes: default_deep_work_min_minutes(),
            deep_work_cutoff_hour: default_deep_work_cutoff_hour(),
            deep_work_block_cap: default_cap(),
            other_priorities_cap: default_cap(),
            default_meeting_minutes: default_meeting_minutes(),
        }
    }
}

impl BriefingConfig {
    /// Parse the configured IANA timezone name.
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ViewModelError::InvalidTimezone(self.timezone.clone()))
    }
}

/// Default location of the briefing config file.
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ViewModelError::HomeDirNotFound)?;
    Ok(home.join(".dailyos").join("briefing.json"))
}

/// Load config from ~/.dailyos/briefing.json, falling back to defaults
/// when the file does not exist.
pub fn load_config() -> Result<BriefingConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<BriefingConfig> {
    if !path.exists() {
        log::debug!("No briefing config at {}; using defaults", path.display());
        return Ok(BriefingConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ViewModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: BriefingConfig = serde_json::from_str(&content)
        .map_err(|e| ViewModelError::json("briefing config", e))?;

    // Unknown timezone names are rejected at load.
    config.timezone()?;

    log::info!("Loaded briefing config from {}", path.display());
    Ok(config)
}
