#![forbid(unsafe_code)]

//! Target geometry tracking.
//!
//! The tracker holds the last measured rectangle of the current step's
//! target and filters out measurements that do not change it. Callers feed
//! it the locator's answer on every frame, resize and scroll; only real
//! changes advance [`GeometryTracker::revision`], which is what drives a
//! re-render.
//!
//! # Invariants
//!
//! 1. A measurement within `epsilon` in position and with identical size is
//!    a no-op: state and revision are untouched.
//! 2. Every transition between `Pending`, `Located` and `Missing`, and every
//!    real rectangle change, advances the revision by exactly one.
//! 3. [`reset`](GeometryTracker::reset) returns to `Pending` without
//!    rewinding the revision.

use tour_core::Rect;

/// Default no-op threshold in logical units.
pub const DEFAULT_RECT_EPSILON: f32 = 0.5;

/// What the tracker knows about the current target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TargetState {
    /// Nothing measured yet for this step.
    #[default]
    Pending,
    /// Target found at this rectangle.
    Located(Rect),
    /// Target absent from the page.
    Missing,
}

impl TargetState {
    /// Rectangle, when located.
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::Located(rect) => Some(*rect),
            _ => None,
        }
    }
}

/// Change-filtering store for a target's rectangle.
#[derive(Debug, Clone)]
pub struct GeometryTracker {
    state: TargetState,
    revision: u64,
    epsilon: f32,
}

impl Default for GeometryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RECT_EPSILON)
    }
}

impl GeometryTracker {
    pub fn new(epsilon: f32) -> Self {
        Self {
            state: TargetState::Pending,
            revision: 0,
            epsilon,
        }
    }

    /// Forget the previous target.
    pub fn reset(&mut self) {
        self.state = TargetState::Pending;
    }

    /// Record a measurement. Returns `true` if it changed the state.
    pub fn observe(&mut self, measured: Option<Rect>) -> bool {
        let next = match (self.state, measured) {
            (TargetState::Located(prev), Some(rect)) if prev.same_box(&rect, self.epsilon) => {
                return false;
            }
            (TargetState::Missing, None) => return false,
            (_, Some(rect)) => TargetState::Located(rect),
            (_, None) => TargetState::Missing,
        };
        self.state = next;
        self.revision += 1;
        true
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    /// Last located rectangle.
    pub fn rect(&self) -> Option<Rect> {
        self.state.rect()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, TargetState::Pending)
    }

    /// Number of real changes observed so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }
}
