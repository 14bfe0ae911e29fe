#![forbid(unsafe_code)]

//! Tour runtime: tracking, state machine and launch gating.
//!
//! # Key Components
//!
//! - [`TourEngine`] - Elm-style session driven by [`TourMsg`]s
//! - [`Host`] / [`ElementLocator`] - what the engine needs from its page
//! - [`HeadlessHost`] - deterministic host for tests and non-graphical use
//! - [`StepResources`] - RAII guard over a step's frame and listeners
//! - [`GeometryTracker`] - change filter for target rectangles
//! - [`TourGate`] / [`FlagStore`] - first-visit launch decision
//! - [`TourConfig`] - all settings, loadable with the `config` feature
//!
//! # Role in the tour workspace
//! `tour-runtime` ties `tour-core` data and `tour-overlay` geometry to a
//! live host. Hosts translate their callbacks into messages, call
//! [`TourEngine::update`], and render [`TourEngine::view`].

pub mod config;
pub mod engine;
pub mod gate;
pub mod headless;
pub mod host;
pub mod resources;
pub mod store;
pub mod tracker;

pub use config::{
    ConfigError, DEFAULT_FLAG_KEY, DEFAULT_LAUNCH_DELAY_MS, LaunchConfig, TourConfig,
    TrackingConfig,
};
pub use engine::{TourEngine, TourEvent, TourHooks, TourMsg, TourState};
pub use gate::TourGate;
pub use headless::{FrameClock, HeadlessHost, ListenerRegistry, pump_frame, pump_resize, pump_scroll};
pub use host::{ElementLocator, FrameHandle, Host, Interest, ListenerId, SharedHost};
pub use resources::StepResources;
#[cfg(feature = "file-store")]
pub use store::FileFlagStore;
pub use store::{FlagStore, MemoryFlagStore, StoreError};
pub use tracker::{GeometryTracker, TargetState};
