#![forbid(unsafe_code)]

//! Launch gate for first-visit tours.
//!
//! [`TourGate`] reads the "tour seen" flag exactly once when it is opened.
//! If the flag is unset the tour should launch after the configured delay;
//! once the session ends, [`TourGate::mark_seen`] writes the flag, at most
//! once per gate.

use tracing::{debug, info, warn};
use web_time::Duration;

use crate::config::LaunchConfig;
use crate::store::{FlagStore, StoreError};

/// First-visit launch decision backed by a [`FlagStore`].
#[derive(Debug)]
pub struct TourGate<S: FlagStore> {
    store: S,
    key: String,
    delay: Duration,
    seen: bool,
    marked: bool,
}

impl<S: FlagStore> TourGate<S> {
    /// Read the flag named by `launch.flag_key` from `store`.
    pub fn open(store: S, launch: &LaunchConfig) -> Result<Self, StoreError> {
        let seen = store.get(&launch.flag_key).inspect_err(|err| {
            warn!(key = %launch.flag_key, %err, "failed to read tour flag");
        })?;
        debug!(key = %launch.flag_key, seen, "tour gate opened");
        Ok(Self {
            store,
            key: launch.flag_key.clone(),
            delay: launch.delay(),
            seen,
            marked: false,
        })
    }

    /// Whether the tour should be shown.
    pub fn should_launch(&self) -> bool {
        !self.seen
    }

    /// Delay before mounting, or `None` if the tour should not launch.
    pub fn launch_delay(&self) -> Option<Duration> {
        self.should_launch().then_some(self.delay)
    }

    /// Whether the tour should be mounted once `elapsed` has passed since
    /// page ready.
    pub fn is_due(&self, elapsed: Duration) -> bool {
        self.launch_delay().is_some_and(|delay| elapsed >= delay)
    }

    /// Persist the flag. Returns `Ok(false)` if this gate already wrote it.
    pub fn mark_seen(&mut self) -> Result<bool, StoreError> {
        if self.marked {
            return Ok(false);
        }
        self.store.set(&self.key).inspect_err(|err| {
            warn!(key = %self.key, %err, "failed to persist tour flag");
        })?;
        self.marked = true;
        self.seen = true;
        info!(key = %self.key, "tour marked as seen");
        Ok(true)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
