//! handpilot-config: TOML configuration for the gesture engine and runtime
//!
//! Every section is optional; missing keys fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use handpilot_core::{Controller, GestureConfig, SelectionMethod, Toggles};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Cursor destination size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub selection_method: SelectionMethod,
}

/// Initial state of the runtime switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    pub mouse: bool,
    pub click: bool,
    pub typing: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            click: true,
            typing: true,
        }
    }
}

impl From<ToggleConfig> for Toggles {
    fn from(t: ToggleConfig) -> Self {
        Toggles {
            mouse: t.mouse,
            click: t.click,
            typing: t.typing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub controller: Controller,
    pub screen: ScreenConfig,
    pub gesture: GestureConfig,
    pub keyboard: KeyboardConfig,
    pub toggles: ToggleConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Platform config location, e.g. `~/.config/handpilot/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "handpilot").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location if none is given.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen.width, self.screen.height)
    }

    /// Reject threshold combinations the channels cannot work with
    pub fn validate(&self) -> Result<()> {
        let g = &self.gesture;

        if g.pinch_on >= g.pinch_off {
            return Err(ConfigError::Invalid(format!(
                "pinch_on ({}) must be below pinch_off ({})",
                g.pinch_on, g.pinch_off
            )));
        }
        if g.right_on >= g.right_off {
            return Err(ConfigError::Invalid(format!(
                "right_on ({}) must be below right_off ({})",
                g.right_on, g.right_off
            )));
        }

        let positive = [
            ("drag_hold_threshold", g.drag_hold_threshold),
            ("click_max_duration", g.click_max_duration),
            ("click_debounce", g.click_debounce),
            ("right_click_hold_threshold", g.right_click_hold_threshold),
            ("right_click_debounce", g.right_click_debounce),
            ("dwell_threshold", g.dwell_threshold),
            ("select_debounce", g.select_debounce),
            ("gesture_debounce", g.gesture_debounce),
            ("mode_switch_hold", g.mode_switch_hold),
            ("mode_switch_cooldown", g.mode_switch_cooldown),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number of seconds, got {}",
                    name, value
                )));
            }
        }
        // 0 means frame-count confirmation only
        let min_duration = g.confirmation_min_duration;
        if !min_duration.is_finite() || min_duration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "confirmation_min_duration must be a non-negative number of seconds, got {}",
                min_duration
            )));
        }

        if g.required_confirmation == 0 {
            return Err(ConfigError::Invalid("required_confirmation must be at least 1".into()));
        }
        if g.smoothing_window == 0 {
            return Err(ConfigError::Invalid("smoothing_window must be at least 1".into()));
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.controller, Controller::Pointer);
        assert_eq!(config.screen_size(), (1920, 1080));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
controller = "keyboard"

[gesture]
pinch_on = 30.0
dwell_threshold = 1.2

[keyboard]
selection_method = "pinch"
"#,
        )
        .unwrap();

        assert_eq!(config.controller, Controller::Keyboard);
        assert_eq!(config.gesture.pinch_on, 30.0);
        assert_eq!(config.gesture.pinch_off, 45.0);
        assert_eq!(config.gesture.dwell_threshold, 1.2);
        assert_eq!(config.keyboard.selection_method, SelectionMethod::Pinch);
        assert!(config.toggles.mouse);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[screen]\nwidth = 2560\nheight = 1440\n\n[toggles]\nclick = false").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.screen_size(), (2560, 1440));
        let toggles: Toggles = config.toggles.into();
        assert!(!toggles.click);
        assert!(toggles.mouse);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(AppConfig::load(Some(&missing)), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            AppConfig::from_toml_str("controller = 12"),
            Err(ConfigError::Parse(_))
        ));
        assert!(AppConfig::from_toml_str("controller = \"joystick\"").is_err());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut config = AppConfig::default();
        config.gesture.pinch_on = 50.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.gesture.right_off = config.gesture.right_on;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.gesture.click_debounce = -1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.gesture.required_confirmation = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.screen.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_thresholds_rejected() {
        let mut config = AppConfig::default();
        config.gesture.dwell_threshold = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(msg)) if msg.contains("dwell_threshold")));

        let mut config = AppConfig::default();
        config.gesture.drag_hold_threshold = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.gesture.confirmation_min_duration = 0.0;
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.gesture.confirmation_min_duration = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_file_fails_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[gesture]\npinch_on = 60.0").unwrap();
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.controller = Controller::Typing;
        config.gesture.required_confirmation = 4;
        let raw = config.to_toml_string().unwrap();
        assert_eq!(AppConfig::from_toml_str(&raw).unwrap(), config);
    }
}
