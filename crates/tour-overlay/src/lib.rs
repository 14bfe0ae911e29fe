#![forbid(unsafe_code)]

//! Tooltip placement and step presentation for guided tours.
//!
//! Everything here is pure geometry over `tour-core` types: given a target
//! rectangle, a preferred side and the viewport, [`placement`] computes where
//! the tooltip goes, and [`view`] turns a step plus its tracked geometry into
//! either a spotlight tooltip or the centered fallback dialog.

pub mod placement;
pub mod view;

pub use placement::{Arrow, Placement, PlacementConfig, TooltipLayout};
pub use view::{
    FallbackView, MISSING_TARGET_NOTICE, OverlayBuilder, PresentationConfig, PrimaryAction,
    SpotlightView, StepChrome, TourView,
};
