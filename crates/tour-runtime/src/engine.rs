#![forbid(unsafe_code)]

//! Step state machine and per-step tracking loop.
//!
//! [`TourEngine`] is driven Elm style: the host feeds it [`TourMsg`]s from
//! user input, frame callbacks and resize/scroll listeners, and reads back
//! [`TourView`]s to render.
//!
//! # Lifecycle
//!
//! ```text
//!   mount ──► Step(0) ──Next──► Step(1) ──Next──► … ──Next──► Step(N-1) ──Next──► Completed
//!                │                 │                              │
//!                └──────Skip───────┴──────────────Skip────────────┴──────────────► Closed
//! ```
//!
//! Entering a step drops the previous step's [`StepResources`] (cancelling
//! its frame and removing its listeners), resets the tracker, scrolls the
//! target into view, measures it once and acquires fresh resources. Every
//! frame, resize or scroll re-measures; only measurements the tracker
//! accepts as changes bump [`TourEngine::revision`].
//!
//! # Invariants
//!
//! 1. The step index only increases, one at a time.
//! 2. Exactly one of `on_close` / `on_complete` fires, exactly once.
//! 3. While a step is active the engine holds one frame request and one
//!    listener per interest; in a terminal state it holds none.
//! 4. Messages carrying handles the engine no longer owns are ignored.

use std::fmt;

use tour_core::{CoreError, Rect, Size, TourStep, TourSteps};
use tour_overlay::{OverlayBuilder, TourView};
use tracing::{debug, info, trace, warn};

use crate::config::{TourConfig, TrackingConfig};
use crate::host::{ElementLocator, FrameHandle, Interest, ListenerId, SharedHost};
use crate::resources::StepResources;
use crate::tracker::{GeometryTracker, TargetState};

/// Input to [`TourEngine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourMsg {
    /// A requested frame callback fired.
    Frame(FrameHandle),
    /// A resize listener fired.
    Resize(ListenerId),
    /// A scroll listener fired.
    Scroll(ListenerId),
    /// Primary action: Next, or Finish on the last step.
    Next,
    /// Dismiss from any step.
    Skip,
}

/// Observable outcome of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    /// Moved to the next step.
    StepChanged { from: usize, to: usize },
    /// Finished from the last step.
    Completed,
    /// Dismissed before the end.
    Closed,
}

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourState {
    /// Showing the step at this index.
    Step(usize),
    /// Dismissed.
    Closed,
    /// Finished.
    Completed,
}

impl TourState {
    /// Whether the session has ended, dismissed or finished.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Step(_))
    }

    /// Current step index, if active.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Step(i) => Some(i),
            _ => None,
        }
    }
}

type Hook = Box<dyn FnMut()>;

/// Session end callbacks.
#[derive(Default)]
pub struct TourHooks {
    on_close: Option<Hook>,
    on_complete: Option<Hook>,
}

impl fmt::Debug for TourHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourHooks")
            .field("on_close", &self.on_close.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl TourHooks {
    /// Hooks that do nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when the tour is dismissed.
    #[must_use]
    pub fn on_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Called when the tour is finished from the last step.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    fn fire(&mut self, state: TourState) {
        let hook = match state {
            TourState::Closed => self.on_close.as_mut(),
            TourState::Completed => self.on_complete.as_mut(),
            TourState::Step(_) => None,
        };
        if let Some(hook) = hook {
            hook();
        }
    }
}

/// A mounted tour session.
pub struct TourEngine<L: ElementLocator> {
    steps: TourSteps,
    state: TourState,
    tracker: GeometryTracker,
    viewport: Size,
    locator: L,
    host: SharedHost,
    resources: Option<StepResources>,
    hooks: TourHooks,
    overlay: OverlayBuilder,
    tracking: TrackingConfig,
}

impl<L: ElementLocator> fmt::Debug for TourEngine<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourEngine")
            .field("state", &self.state)
            .field("steps", &self.steps.len())
            .field("target", &self.tracker.state())
            .field("viewport", &self.viewport)
            .field("resources", &self.resources)
            .finish()
    }
}

impl<L: ElementLocator> TourEngine<L> {
    /// Mount a tour with default settings and enter the first step.
    pub fn mount(
        steps: TourSteps,
        locator: L,
        host: SharedHost,
        hooks: TourHooks,
    ) -> Result<Self, CoreError> {
        Self::with_config(steps, locator, host, hooks, &TourConfig::default())
    }

    /// Mount a tour and enter the first step.
    ///
    /// Fails if the host reports an unusable viewport.
    pub fn with_config(
        steps: TourSteps,
        locator: L,
        host: SharedHost,
        hooks: TourHooks,
        config: &TourConfig,
    ) -> Result<Self, CoreError> {
        let viewport = host.borrow().viewport();
        if !viewport.is_valid() {
            return Err(CoreError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let mut engine = Self {
            steps,
            state: TourState::Step(0),
            tracker: GeometryTracker::new(config.tracking.rect_epsilon),
            viewport,
            locator,
            host,
            resources: None,
            hooks,
            overlay: config.overlay_builder(),
            tracking: config.tracking.clone(),
        };
        info!(steps = engine.steps.len(), "tour mounted");
        engine.enter_step(0);
        Ok(engine)
    }

    /// Apply one message.
    pub fn update(&mut self, msg: TourMsg) -> Option<TourEvent> {
        match msg {
            TourMsg::Frame(handle) => {
                self.on_frame(handle);
                None
            }
            TourMsg::Resize(id) => {
                self.on_resize(id);
                None
            }
            TourMsg::Scroll(id) => {
                self.on_scroll(id);
                None
            }
            TourMsg::Next => self.next(),
            TourMsg::Skip => self.skip(),
        }
    }

    /// Advance, or complete from the last step. No-op once terminal.
    pub fn next(&mut self) -> Option<TourEvent> {
        let TourState::Step(index) = self.state else {
            return None;
        };
        if index < self.steps.last_index() {
            self.enter_step(index + 1);
            Some(TourEvent::StepChanged {
                from: index,
                to: index + 1,
            })
        } else {
            self.finish(TourState::Completed);
            Some(TourEvent::Completed)
        }
    }

    /// Dismiss from any step. No-op once terminal.
    pub fn skip(&mut self) -> Option<TourEvent> {
        if self.state.is_terminal() {
            return None;
        }
        self.finish(TourState::Closed);
        Some(TourEvent::Closed)
    }

    /// Presentation of the current step.
    ///
    /// `None` when the session is over or the step has not been measured.
    pub fn view(&self) -> Option<TourView<'_>> {
        let index = self.state.index()?;
        let step = self.steps.get(index)?;
        let target = match self.tracker.state() {
            TargetState::Pending => return None,
            TargetState::Located(rect) => Some(rect),
            TargetState::Missing => None,
        };
        Some(
            self.overlay
                .build(step, index, self.steps.len(), target, self.viewport),
        )
    }

    /// Current position in the state machine.
    pub fn state(&self) -> TourState {
        self.state
    }

    /// Whether a step is being shown.
    pub fn is_active(&self) -> bool {
        !self.state.is_terminal()
    }

    /// Current step, if active.
    pub fn current_step(&self) -> Option<&TourStep> {
        self.state.index().and_then(|i| self.steps.get(i))
    }

    /// Number of steps in the tour.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Last measured rectangle of the current target.
    pub fn target_rect(&self) -> Option<Rect> {
        self.tracker.rect()
    }

    /// Tracking state of the current target: pending, located or missing.
    pub fn target_state(&self) -> TargetState {
        self.tracker.state()
    }

    /// Viewport as of the last resize.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Bumped on every accepted geometry change; hosts re-render when it
    /// moves.
    pub fn revision(&self) -> u64 {
        self.tracker.revision()
    }

    fn enter_step(&mut self, index: usize) {
        // Release before acquiring so at most one set is ever live.
        self.resources = None;
        self.state = TourState::Step(index);
        self.tracker.reset();

        let Some(step) = self.steps.get(index) else {
            return;
        };
        debug!(index, target = %step.target_id, "entering step");
        if self.tracking.scroll_into_view && self.locator.locate(&step.target_id).is_some() {
            self.locator.scroll_into_view(&step.target_id);
        }
        self.measure();
        self.resources = Some(StepResources::acquire(
            self.host.clone(),
            Interest::RESIZE | Interest::SCROLL,
        ));
    }

    fn on_frame(&mut self, handle: FrameHandle) {
        let ours = self
            .resources
            .as_mut()
            .is_some_and(|res| res.take_frame(handle));
        if !ours {
            trace!(%handle, "stale frame ignored");
            return;
        }
        self.measure();
        if let Some(res) = self.resources.as_mut() {
            res.rearm();
        }
    }

    fn on_resize(&mut self, id: ListenerId) {
        if !self.owns(id, Interest::RESIZE) {
            trace!(%id, "stale resize ignored");
            return;
        }
        let viewport = self.host.borrow().viewport();
        if viewport.is_valid() {
            self.viewport = viewport;
        } else {
            warn!(?viewport, "ignoring invalid viewport");
        }
        self.measure();
    }

    fn on_scroll(&mut self, id: ListenerId) {
        if !self.owns(id, Interest::SCROLL) {
            trace!(%id, "stale scroll ignored");
            return;
        }
        self.measure();
    }

    fn owns(&self, id: ListenerId, interest: Interest) -> bool {
        self.resources
            .as_ref()
            .is_some_and(|res| res.listens(id, interest))
    }

    /// Locate the current target and feed the tracker.
    fn measure(&mut self) -> bool {
        let Some(step) = self.state.index().and_then(|i| self.steps.get(i)) else {
            return false;
        };
        let measured = self.locator.locate(&step.target_id);
        let changed = self.tracker.observe(measured);
        if changed {
            debug!(
                target = %step.target_id,
                rect = ?measured,
                revision = self.tracker.revision(),
                "target geometry changed"
            );
        }
        changed
    }

    fn finish(&mut self, state: TourState) {
        let at = self.state.index();
        self.resources = None;
        self.state = state;
        self.tracker.reset();
        info!(?state, ?at, "tour ended");
        self.hooks.fire(state);
    }
}
