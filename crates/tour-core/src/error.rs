#![forbid(unsafe_code)]

//! Core construction errors.
//!
//! A missing target element is deliberately absent from this list: it is a
//! normal tracking state, not a failure.

use std::fmt;

/// Errors raised while building tour inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A tour needs at least one step.
    EmptyTour,
    /// The host reported a viewport with negative or non-finite dimensions.
    InvalidViewport { width: f32, height: f32 },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTour => write!(f, "tour has no steps"),
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport size: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(CoreError::EmptyTour.to_string(), "tour has no steps");
        assert_eq!(
            CoreError::InvalidViewport {
                width: -1.0,
                height: 2.0
            }
            .to_string(),
            "invalid viewport size: -1x2"
        );
    }
}
