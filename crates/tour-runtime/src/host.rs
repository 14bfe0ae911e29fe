#![forbid(unsafe_code)]

//! Host capabilities the tour engine depends on.
//!
//! The engine never touches a real page. Everything it needs from its
//! environment goes through two seams:
//!
//! - [`Host`]: viewport size, one-shot frame callbacks and resize/scroll
//!   listener registration.
//! - [`ElementLocator`]: resolves a target id to its current rectangle.
//!
//! Hosts deliver the callbacks they promised by feeding
//! [`TourMsg`](crate::TourMsg) values into the engine. A handle that was
//! cancelled or unsubscribed may still arrive late; the engine ignores it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use tour_core::{Rect, Size};

/// Handle of a pending one-shot frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Identifier of a registered resize or scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

bitflags! {
    /// Notifications a step subscribes to while it is active.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Interest: u8 {
        /// Viewport resized.
        const RESIZE = 0b01;
        /// Any scroll, including nested scroll containers (capture phase).
        const SCROLL = 0b10;
    }
}

/// Environment the engine runs in.
///
/// All calls happen on the host's UI thread. Implementations must make
/// `cancel_frame` and `unsubscribe` idempotent.
pub trait Host {
    /// Current viewport size in logical units.
    fn viewport(&self) -> Size;

    /// Schedule one callback before the next paint.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending frame callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Register a listener for `interest`.
    fn subscribe(&mut self, interest: Interest) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: ListenerId);
}

/// Host shared between the engine and whoever drives it.
pub type SharedHost = Rc<RefCell<dyn Host>>;

/// Resolves target ids to rectangles in viewport coordinates.
pub trait ElementLocator {
    /// Current bounding rectangle of the element with `target_id`, or
    /// `None` if no such element exists right now.
    fn locate(&self, target_id: &str) -> Option<Rect>;

    /// Bring the element into view, centered when possible. Best effort.
    fn scroll_into_view(&self, target_id: &str) {
        let _ = target_id;
    }
}

impl<F> ElementLocator for F
where
    F: Fn(&str) -> Option<Rect>,
{
    fn locate(&self, target_id: &str) -> Option<Rect> {
        self(target_id)
    }
}

impl<L: ElementLocator + ?Sized> ElementLocator for Rc<L> {
    fn locate(&self, target_id: &str) -> Option<Rect> {
        (**self).locate(target_id)
    }

    fn scroll_into_view(&self, target_id: &str) {
        (**self).scroll_into_view(target_id);
    }
}
