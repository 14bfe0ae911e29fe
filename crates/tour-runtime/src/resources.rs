#![forbid(unsafe_code)]

//! Per-step host resources.
//!
//! Each active step owns exactly one pending frame callback plus one
//! listener per [`Interest`]. [`StepResources`] holds them and gives them
//! back to the host when dropped, so leaving a step, finishing the tour or
//! dropping the engine all release everything synchronously, before the
//! next step acquires its own.

use std::fmt;

use tracing::{debug, warn};

use crate::host::{FrameHandle, Interest, ListenerId, SharedHost};

/// RAII guard over a step's frame callback and listeners.
pub struct StepResources {
    host: SharedHost,
    frame: Option<FrameHandle>,
    listeners: Vec<(ListenerId, Interest)>,
}

impl fmt::Debug for StepResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepResources")
            .field("frame", &self.frame)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl StepResources {
    /// Request the first frame and subscribe once per flag in `interests`.
    pub fn acquire(host: SharedHost, interests: Interest) -> Self {
        let (frame, listeners) = {
            let mut h = host.borrow_mut();
            let frame = h.request_frame();
            let listeners: Vec<_> = interests
                .iter()
                .map(|flag| (h.subscribe(flag), flag))
                .collect();
            (frame, listeners)
        };
        debug!(%frame, listeners = listeners.len(), "step resources acquired");
        Self {
            host,
            frame: Some(frame),
            listeners,
        }
    }

    /// Consume the pending frame if `handle` is it.
    ///
    /// The handle is also cancelled at the host, so a frame delivered before
    /// the host fired it cannot stay queued next to the re-armed one.
    /// Returns `false` for stale or foreign handles; the guard is unchanged.
    pub fn take_frame(&mut self, handle: FrameHandle) -> bool {
        if self.frame != Some(handle) {
            return false;
        }
        self.frame = None;
        self.host.borrow_mut().cancel_frame(handle);
        true
    }

    /// Request the next frame, replacing any pending one.
    pub fn rearm(&mut self) {
        let mut host = self.host.borrow_mut();
        if let Some(old) = self.frame.take() {
            host.cancel_frame(old);
        }
        self.frame = Some(host.request_frame());
    }

    /// Whether `id` is this step's listener for `interest`.
    pub fn listens(&self, id: ListenerId, interest: Interest) -> bool {
        self.listeners
            .iter()
            .any(|(own, flag)| *own == id && flag.intersects(interest))
    }

    /// Pending frame, if any.
    pub fn frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// Host the resources belong to.
    pub fn host(&self) -> &SharedHost {
        &self.host
    }
}

impl Drop for StepResources {
    fn drop(&mut self) {
        // Only reachable when a host call drops the engine re-entrantly.
        let Ok(mut host) = self.host.try_borrow_mut() else {
            warn!("host busy, step resources leaked");
            return;
        };
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        for (id, _) in self.listeners.drain(..) {
            host.unsubscribe(id);
        }
        debug!("step resources released");
    }
}
