//! User settings for fintrack
//!
//! Manages the default user, display currency, month label style and the
//! diagnostic log level.

use serde::{Deserialize, Serialize};

use super::paths::FinTrackPaths;
use crate::aggregate::MonthLabelFormat;
use crate::error::FinTrackError;
use crate::models::UserId;

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// User whose records are used when `--user` is not given
    #[serde(default = "default_user_id")]
    pub user_id: UserId,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Month bucket labels; month-only labels merge years
    #[serde(default)]
    pub month_labels: MonthLabelFormat,

    /// Number of entries shown in the recent activity feed
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Default tracing level; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_user_id() -> UserId {
    UserId::new(1)
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_recent_limit() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: default_user_id(),
            currency_symbol: default_currency(),
            month_labels: MonthLabelFormat::default(),
            recent_limit: default_recent_limit(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinTrackPaths) -> Result<Self, FinTrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinTrackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinTrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinTrackPaths) -> Result<(), FinTrackError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinTrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            FinTrackError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
