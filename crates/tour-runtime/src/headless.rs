#![forbid(unsafe_code)]

//! Deterministic in-memory host.
//!
//! [`HeadlessHost`] implements [`Host`] with a manual frame clock and a
//! listener registry. Tests and the demo advance frames and fire
//! resize/scroll notifications explicitly, then feed the resulting
//! [`TourMsg`]s into the engine. Nothing here depends on wall time.

use std::cell::RefCell;
use std::rc::Rc;

use tour_core::Size;
use tracing::trace;

use crate::engine::{TourEngine, TourEvent, TourMsg};
use crate::host::{ElementLocator, FrameHandle, Host, Interest, ListenerId};

/// One-shot frame scheduler.
///
/// Requests made while a frame is being delivered land in the next frame.
#[derive(Debug, Default)]
pub struct FrameClock {
    next_id: u64,
    pending: Vec<FrameHandle>,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a callback for the next frame.
    pub fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    /// Drop a queued callback. Returns `false` if it was not pending.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        self.pending.len() != before
    }

    /// Advance one frame, returning the callbacks due in it.
    pub fn advance(&mut self) -> Vec<FrameHandle> {
        self.frames += 1;
        std::mem::take(&mut self.pending)
    }

    /// Callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Handles waiting for the next frame, oldest first.
    pub fn pending_handles(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Frames advanced so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

/// Registered resize/scroll listeners.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, Interest)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, interest: Interest) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, interest));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Listeners whose interest overlaps `interest`, in registration order.
    pub fn matching(&self, interest: Interest) -> Vec<ListenerId> {
        self.entries
            .iter()
            .filter(|(_, i)| i.intersects(interest))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of listeners whose interest overlaps `interest`.
    pub fn count(&self, interest: Interest) -> usize {
        self.entries
            .iter()
            .filter(|(_, i)| i.intersects(interest))
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// In-memory [`Host`] with a manual clock.
#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Size,
    frames: FrameClock,
    listeners: ListenerRegistry,
}

impl HeadlessHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            frames: FrameClock::new(),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Wrap in the shared handle the engine expects.
    pub fn shared(viewport: Size) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(viewport)))
    }

    /// Change the viewport and return the resize listeners to notify.
    pub fn resize(&mut self, viewport: Size) -> Vec<ListenerId> {
        self.viewport = viewport;
        self.listeners.matching(Interest::RESIZE)
    }

    /// Scroll listeners to notify for a scroll anywhere on the page.
    pub fn scroll(&self) -> Vec<ListenerId> {
        self.listeners.matching(Interest::SCROLL)
    }

    /// Advance the frame clock.
    pub fn advance_frame(&mut self) -> Vec<FrameHandle> {
        self.frames.advance()
    }

    /// Frame callbacks still pending.
    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    /// Handles of the pending frame callbacks.
    pub fn pending_frame_handles(&self) -> Vec<FrameHandle> {
        self.frames.pending_handles().to_vec()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }

    /// Registered listeners overlapping `interest`.
    pub fn listener_count(&self, interest: Interest) -> usize {
        self.listeners.count(interest)
    }

    /// Whether no frame or listener is outstanding.
    pub fn is_quiescent(&self) -> bool {
        self.frames.pending() == 0 && self.listeners.is_empty()
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.frames.request();
        trace!(%handle, "frame requested");
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frames.cancel(handle) {
            trace!(%handle, "frame cancelled");
        }
    }

    fn subscribe(&mut self, interest: Interest) -> ListenerId {
        let id = self.listeners.subscribe(interest);
        trace!(%id, ?interest, "listener added");
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        if self.listeners.unsubscribe(id) {
            trace!(%id, "listener removed");
        }
    }
}

/// Deliver one frame to `engine`. Returns the number of callbacks
/// dispatched.
///
/// The host borrow is released before the engine runs, so the engine may
/// re-arm its frame during the callback.
pub fn pump_frame<L: ElementLocator>(
    host: &Rc<RefCell<HeadlessHost>>,
    engine: &mut TourEngine<L>,
) -> usize {
    let due = host.borrow_mut().advance_frame();
    let count = due.len();
    for handle in due {
        let _ = engine.update(TourMsg::Frame(handle));
    }
    count
}

/// Resize the viewport and notify `engine`'s resize listeners.
pub fn pump_resize<L: ElementLocator>(
    host: &Rc<RefCell<HeadlessHost>>,
    engine: &mut TourEngine<L>,
    viewport: Size,
) -> Option<TourEvent> {
    let ids = host.borrow_mut().resize(viewport);
    ids.into_iter()
        .filter_map(|id| engine.update(TourMsg::Resize(id)))
        .last()
}

/// Notify `engine`'s scroll listeners.
pub fn pump_scroll<L: ElementLocator>(
    host: &Rc<RefCell<HeadlessHost>>,
    engine: &mut TourEngine<L>,
) -> Option<TourEvent> {
    let ids = host.borrow().scroll();
    ids.into_iter()
        .filter_map(|id| engine.update(TourMsg::Scroll(id)))
        .last()
}
