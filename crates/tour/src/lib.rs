#![forbid(unsafe_code)]

//! Guided tour overlay engine: public facade.
//!
//! This crate re-exports the stable surface of the tour workspace and adds
//! [`Tour`], a small builder that mounts a session and wires the "tour
//! seen" flag.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tour::prelude::*;
//!
//! let gate = Rc::new(RefCell::new(
//!     TourGate::open(MemoryFlagStore::new(), &LaunchConfig::default()).unwrap(),
//! ));
//! let host = HeadlessHost::shared(Size::new(1280.0, 800.0));
//! let locate = |id: &str| (id == "tour-filter").then(|| Rect::new(200.0, 150.0, 600.0, 40.0));
//!
//! let mut engine = Tour::new(vec![TourStep::new("tour-filter", "Smart Filters", "Narrow it down.")])
//!     .unwrap()
//!     .remember_in(gate.clone())
//!     .mount(locate, host)
//!     .unwrap();
//!
//! assert_eq!(engine.view().unwrap().chrome().primary_action(), PrimaryAction::Finish);
//! engine.update(TourMsg::Next);
//! assert!(!gate.borrow().should_launch());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::warn;
use web_time::Duration;

pub mod error;

pub use error::{Degradation, Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use tour_core::{CoreError, Rect, Side, Size, TourStep, TourSteps};

// --- Overlay re-exports ----------------------------------------------------

pub use tour_overlay::{
    Arrow, FallbackView, MISSING_TARGET_NOTICE, OverlayBuilder, Placement, PlacementConfig,
    PresentationConfig, PrimaryAction, SpotlightView, StepChrome, TooltipLayout, TourView,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "file-store")]
pub use tour_runtime::FileFlagStore;
pub use tour_runtime::{
    ConfigError, ElementLocator, FlagStore, FrameHandle, GeometryTracker, HeadlessHost, Host,
    Interest, LaunchConfig, ListenerId, MemoryFlagStore, SharedHost, StepResources, StoreError,
    TargetState, TourConfig, TourEngine, TourEvent, TourGate, TourHooks, TourMsg, TourState,
    TrackingConfig, pump_frame, pump_resize, pump_scroll,
};

// --- Tour builder ----------------------------------------------------------

type Hook = Box<dyn FnMut()>;
type Mark = Rc<dyn Fn()>;

/// Builder for a tour session.
pub struct Tour {
    steps: TourSteps,
    config: TourConfig,
    on_close: Option<Hook>,
    on_complete: Option<Hook>,
    remember: Option<Mark>,
}

impl fmt::Debug for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("steps", &self.steps.len())
            .field("config", &self.config)
            .field("remembers", &self.remember.is_some())
            .finish()
    }
}

impl Tour {
    /// Tour over `steps`. Fails if there are none.
    pub fn new(steps: Vec<TourStep>) -> Result<Self> {
        Ok(Self::from_steps(TourSteps::new(steps)?))
    }

    pub fn from_steps(steps: TourSteps) -> Self {
        Self {
            steps,
            config: TourConfig::default(),
            on_close: None,
            on_complete: None,
            remember: None,
        }
    }

    /// Use `config` instead of the defaults.
    #[must_use]
    pub fn config(mut self, config: TourConfig) -> Self {
        self.config = config;
        self
    }

    /// Called when the tour is dismissed.
    #[must_use]
    pub fn on_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Called when the tour is finished.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Mark the tour as seen in `gate` when it ends, whether dismissed or
    /// finished. The flag is written before the `on_close` / `on_complete`
    /// hooks run, regardless of the order they were set in.
    #[must_use]
    pub fn remember_in<S: FlagStore + 'static>(mut self, gate: Rc<RefCell<TourGate<S>>>) -> Self {
        self.remember = Some(Rc::new(move || mark_seen(&gate)));
        self
    }

    /// Mount the session and enter the first step.
    pub fn mount<L: ElementLocator>(self, locator: L, host: SharedHost) -> Result<TourEngine<L>> {
        let (on_close, on_complete) = match self.remember {
            Some(mark) => (
                Some(remembering(mark.clone(), self.on_close)),
                Some(remembering(mark, self.on_complete)),
            ),
            None => (self.on_close, self.on_complete),
        };
        let mut hooks = TourHooks::new();
        if let Some(f) = on_close {
            hooks = hooks.on_close(f);
        }
        if let Some(f) = on_complete {
            hooks = hooks.on_complete(f);
        }
        TourEngine::with_config(self.steps, locator, host, hooks, &self.config).map_err(Error::from)
    }

    /// Mount only if `gate` says the tour is due after `elapsed` since page
    /// ready.
    pub fn launch<L: ElementLocator, S: FlagStore>(
        self,
        gate: &TourGate<S>,
        elapsed: Duration,
        locator: L,
        host: SharedHost,
    ) -> Result<Option<TourEngine<L>>> {
        if !gate.is_due(elapsed) {
            return Ok(None);
        }
        self.mount(locator, host).map(Some)
    }
}

fn mark_seen<S: FlagStore>(gate: &RefCell<TourGate<S>>) {
    if let Err(err) = gate.borrow_mut().mark_seen() {
        let err = Error::from(err);
        warn!(
            error_type = err.error_type(),
            degradation = %err.degradation(),
            %err,
            "tour flag not saved"
        );
    }
}

/// Run `mark`, then `next`.
fn remembering(mark: Mark, next: Option<Hook>) -> Hook {
    let mut next = next;
    Box::new(move || {
        mark();
        if let Some(f) = next.as_mut() {
            f();
        }
    })
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Degradation, ElementLocator, Error, FlagStore, HeadlessHost, Host, LaunchConfig,
        MemoryFlagStore, PrimaryAction, Rect, Result, SharedHost, Side, Size, Tour, TourConfig,
        TourEngine, TourEvent, TourGate, TourMsg, TourState, TourStep, TourView,
    };
    pub use crate::{core, overlay, runtime};
}

pub use tour_core as core;
pub use tour_overlay as overlay;
pub use tour_runtime as runtime;
