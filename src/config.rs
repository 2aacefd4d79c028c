//! Widget configuration, loaded from an optional TOML file.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```rust
//! use countdown_ring::config::Config;
//!
//! let config = Config::from_toml_str("[timer]\ndefault_duration_secs = 300\n").unwrap();
//! assert_eq!(config.timer.default_duration_secs, 300);
//! assert_eq!(config.timer.tick_interval_ms, 100);
//! ```

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const MIN_RADIUS: u16 = 3;
const MAX_RADIUS: u16 = 40;

static INSTALLED: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("a configuration is already installed")]
    AlreadyInstalled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timer: TimerConfig,
    pub ring: RingConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Length of the countdown when the widget mounts.
    pub default_duration_secs: u64,
    /// Clock period; each tick subtracts exactly this much.
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Radius in terminal rows.
    pub radius: u16,
    pub track_color: String,
    pub normal_color: String,
    pub warning_color: String,
    pub text_color: String,
}

/// Spring driving the displayed progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub frequency: f64,
    pub damping: f64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: 120,
            tick_interval_ms: 100,
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: 8,
            track_color: "#808080".into(),
            normal_color: "#00FF00".into(),
            warning_color: "#FF0000".into(),
            text_color: "#FFFFFF".into(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        // Critically damped for the default stiffness: no overshoot.
        Self {
            enabled: true,
            frequency: 18.0,
            damping: 8.5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            ring: RingConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl TimerConfig {
    pub fn default_duration(&self) -> Duration {
        Duration::from_secs(self.default_duration_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Config {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer.default_duration_secs == 0 {
            return Err(ConfigError::Invalid(
                "timer.default_duration_secs must be greater than zero".into(),
            ));
        }
        if self.timer.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "timer.tick_interval_ms must be greater than zero".into(),
            ));
        }
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&self.ring.radius) {
            return Err(ConfigError::Invalid(format!(
                "ring.radius must be between {} and {}, got {}",
                MIN_RADIUS, MAX_RADIUS, self.ring.radius
            )));
        }

        let colors = [
            ("ring.track_color", &self.ring.track_color),
            ("ring.normal_color", &self.ring.normal_color),
            ("ring.warning_color", &self.ring.warning_color),
            ("ring.text_color", &self.ring.text_color),
        ];
        if let Some((name, _)) = colors.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
        }

        if self.animation.frequency <= 0.0 || self.animation.damping < 0.0 {
            return Err(ConfigError::Invalid(
                "animation.frequency must be positive and animation.damping non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Makes `self` the configuration new widgets mount with.
    ///
    /// bubbletea constructs the root model without arguments, so the binary
    /// installs its config here before starting the program. Only the first
    /// call succeeds.
    pub fn install(self) -> Result<(), ConfigError> {
        self.validate()?;
        INSTALLED
            .set(self)
            .map_err(|_| ConfigError::AlreadyInstalled)
    }

    /// The installed configuration, or the defaults.
    pub fn current() -> Config {
        INSTALLED.get().cloned().unwrap_or_default()
    }
}
