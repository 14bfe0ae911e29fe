#![forbid(unsafe_code)]

//! Core: geometry, step records and construction errors.
//!
//! # Role in the tour workspace
//! `tour-core` is the vocabulary shared by every other crate. It has no
//! knowledge of hosts, frames or rendering: placement math lives in
//! `tour-overlay`, tracking and the step state machine in `tour-runtime`.

pub mod error;
pub mod geometry;
pub mod step;

pub use error::CoreError;
pub use geometry::{Rect, Size};
pub use step::{Side, TourStep, TourSteps};
