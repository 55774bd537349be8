// Settings module
// Calendar settings that influence layout, loadable from TOML

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "layout.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Settings a layout pass depends on.
///
/// Every field has a default so a partial TOML file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Zone events are displayed in
    pub time_zone: Tz,
    /// 0 = Sunday, 1 = Monday, ...
    pub first_day_of_week: u8,
    pub first_day_of_work_week: u8,
    pub last_day_of_work_week: u8,
    pub show_weekends: bool,
    /// "12h" or "24h"; drives event time labels and the CLI agenda
    pub time_format: String,
    /// Number of all-day lanes shown before events collapse into overflow
    pub min_visible_lanes: usize,
    /// Horizontal indent per secondary lane, as a fraction of the column
    pub lane_indent: f32,
    pub max_lane_indent: f32,
    /// Width of every lane after the first, as a fraction of the column
    pub secondary_lane_width: f32,
    /// Shortest visual duration of a timed event
    pub min_event_minutes: u32,
    /// Granularity for drag and resize snapping
    pub slot_minutes: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            time_zone: Tz::UTC,
            first_day_of_week: 0, // Sunday
            first_day_of_work_week: 1, // Monday
            last_day_of_work_week: 5, // Friday
            show_weekends: true,
            time_format: "12h".to_string(),
            min_visible_lanes: 3,
            lane_indent: 0.1,
            max_lane_indent: 0.5,
            secondary_lane_width: 0.9,
            min_event_minutes: 15,
            slot_minutes: 15,
        }
    }
}

impl LayoutSettings {
    /// Parse settings from a TOML document and validate them
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load settings from the platform config directory, falling back to
    /// defaults when no file exists there.
    pub fn load_default() -> Result<Self, SettingsError> {
        match default_config_path() {
            Some(path) if path.exists() => {
                log::debug!("Loading layout settings from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Serialize settings back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn use_24_hour(&self) -> bool {
        self.time_format == "24h"
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        if self.first_day_of_week > 6 {
            return invalid(format!(
                "first_day_of_week must be 0-6, got {}",
                self.first_day_of_week
            ));
        }
        if self.first_day_of_work_week > 6 || self.last_day_of_work_week > 6 {
            return invalid("work week days must be 0-6".to_string());
        }
        if self.first_day_of_work_week > self.last_day_of_work_week {
            return invalid(format!(
                "work week starts after it ends ({} > {})",
                self.first_day_of_work_week, self.last_day_of_work_week
            ));
        }
        if self.time_format != "12h" && self.time_format != "24h" {
            return invalid(format!(
                "time_format must be \"12h\" or \"24h\", got {:?}",
                self.time_format
            ));
        }
        if self.min_visible_lanes == 0 {
            return invalid("min_visible_lanes must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.lane_indent) {
            return invalid(format!("lane_indent out of range: {}", self.lane_indent));
        }
        if !(0.0..1.0).contains(&self.max_lane_indent) {
            return invalid(format!(
                "max_lane_indent out of range: {}",
                self.max_lane_indent
            ));
        }
        if !(self.secondary_lane_width > 0.0 && self.secondary_lane_width <= 1.0) {
            return invalid(format!(
                "secondary_lane_width out of range: {}",
                self.secondary_lane_width
            ));
        }
        if self.slot_minutes == 0 || 1440 % self.slot_minutes != 0 {
            return invalid(format!(
                "slot_minutes must divide a day evenly, got {}",
                self.slot_minutes
            ));
        }

        Ok(())
    }
}

/// Location of the settings file in the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "KenBoyle", "CalendarLayout")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
