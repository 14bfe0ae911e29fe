#![forbid(unsafe_code)]

//! Unified error model and graceful degradation.
//!
//! A guided tour is never essential to the page it decorates. Every error
//! therefore maps to a [`Degradation`] that tells the embedder how to keep
//! the page running: skip the tour, fall back to default settings, or stop.

use std::fmt;

use tour_core::CoreError;
use tour_runtime::{ConfigError, StoreError};

/// Top-level error type for tour embedders.
#[derive(Debug)]
pub enum Error {
    /// Invalid step list or viewport.
    Core(CoreError),
    /// The "tour seen" flag could not be read or written.
    Store(StoreError),
    /// Settings could not be loaded or failed validation.
    Config(ConfigError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
}

/// Standard result type for tour APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the embedder should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// Leave the page as is and do not show the tour.
    RunWithoutTour,
    /// Ignore the broken settings and use defaults.
    UseDefaults,
    /// Unrecoverable; stop.
    Abort,
}

impl Error {
    /// Recovery action for this error.
    pub fn degradation(&self) -> Degradation {
        match self {
            Self::Core(CoreError::EmptyTour) => Degradation::RunWithoutTour,
            Self::Core(CoreError::InvalidViewport { .. }) => Degradation::RunWithoutTour,
            Self::Store(_) => Degradation::RunWithoutTour,
            Self::Config(_) => Degradation::UseDefaults,
            Self::Io(_) => Degradation::Abort,
        }
    }

    /// Error type label for tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Core(_) => "core",
            Self::Store(_) => "store",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }

    /// Whether the page can carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.degradation(), Degradation::Abort)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunWithoutTour => write!(f, "run_without_tour"),
            Self::UseDefaults => write!(f, "use_defaults"),
            Self::Abort => write!(f, "abort"),
        }
    }
}
