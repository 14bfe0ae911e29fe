#![forbid(unsafe_code)]

//! Tour configuration.
//!
//! [`TourConfig`] groups every tunable of a tour session: tooltip geometry,
//! presentation, tracking and launch behaviour. Defaults reproduce the
//! stock tour; with the `config` feature a partial TOML or JSON file
//! overrides just the fields it names.
//!
//! # Example (TOML)
//!
//! ```toml
//! [placement]
//! tooltip_width = 280.0
//!
//! [tracking]
//! rect_epsilon = 1.0
//!
//! [launch]
//! delay_ms = 0
//! flag_key = "docs_tour_done"
//! ```

#[cfg(feature = "config")]
use std::path::Path;

use tour_overlay::{OverlayBuilder, PlacementConfig, PresentationConfig};
use web_time::Duration;

use crate::tracker::DEFAULT_RECT_EPSILON;

/// Storage key used when none is configured.
pub const DEFAULT_FLAG_KEY: &str = "campus_pilot_tutorial_done";

/// Delay between page ready and tour launch when none is configured.
pub const DEFAULT_LAUNCH_DELAY_MS: u64 = 1000;

/// Target tracking settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TrackingConfig {
    /// Position delta at or below which a measurement is a no-op.
    pub rect_epsilon: f32,
    /// Scroll the target into view when a step is entered.
    pub scroll_into_view: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            rect_epsilon: DEFAULT_RECT_EPSILON,
            scroll_into_view: true,
        }
    }
}

/// When and whether to launch the tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LaunchConfig {
    /// Wait after page ready before mounting the tour.
    pub delay_ms: u64,
    /// Key of the "tour seen" flag.
    pub flag_key: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_LAUNCH_DELAY_MS,
            flag_key: DEFAULT_FLAG_KEY.to_owned(),
        }
    }
}

impl LaunchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// All tour settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TourConfig {
    pub placement: PlacementConfig,
    pub presentation: PresentationConfig,
    pub tracking: TrackingConfig,
    pub launch: LaunchConfig,
}

impl TourConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from `path`, picking the format by extension (`.json` or TOML
    /// otherwise), and reject invalid values.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validated()
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.placement.validate();
        errors.extend(self.presentation.validate());

        if !self.tracking.rect_epsilon.is_finite() || self.tracking.rect_epsilon < 0.0 {
            errors.push(format!(
                "tracking.rect_epsilon must be >= 0, got {}",
                self.tracking.rect_epsilon
            ));
        }

        if self.launch.flag_key.trim().is_empty() {
            errors.push("launch.flag_key must not be empty".into());
        }

        errors
    }

    /// `self` if valid, otherwise [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// View builder for these settings.
    pub fn overlay_builder(&self) -> OverlayBuilder {
        OverlayBuilder::new(self.placement.clone(), self.presentation.clone())
    }
}

/// Errors from loading or validating a [`TourConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
