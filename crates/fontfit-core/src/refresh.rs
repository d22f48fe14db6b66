#![forbid(unsafe_code)]

//! Shared refresh broadcast for cross-instance recalculation.
//!
//! A host calls [`RefreshBus::refresh_all`] after an event that invalidates
//! every fitted surface at once, typically a web font finishing to load,
//! which changes glyph metrics everywhere. Each surface polls its own
//! [`RefreshObserver`] once per render pass; polling is a single atomic load
//! and never blocks the rendering thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Cloneable handle over a shared refresh epoch.
///
/// All clones observe the same epoch; dropping handles never resets it.
#[derive(Debug, Clone, Default)]
pub struct RefreshBus {
    epoch: Arc<AtomicU64>,
}

impl RefreshBus {
    /// Create a bus with a fresh epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the epoch, signalling every observer to recalculate.
    pub fn refresh_all(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(epoch, "refresh requested for all surfaces");
    }

    /// Current epoch value.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Create an observer that considers the current epoch already seen.
    #[must_use]
    pub fn observer(&self) -> RefreshObserver {
        RefreshObserver {
            epoch: Arc::clone(&self.epoch),
            seen: self.epoch(),
        }
    }
}

/// One surface's view of a [`RefreshBus`].
#[derive(Debug, Clone)]
pub struct RefreshObserver {
    epoch: Arc<AtomicU64>,
    seen: u64,
}

impl RefreshObserver {
    /// Poll for an epoch advance. Returns `true` exactly once per advance,
    /// however many advances happened since the last poll.
    pub fn poll(&mut self) -> bool {
        let current = self.epoch.load(Ordering::Acquire);
        if current == self.seen {
            return false;
        }
        self.seen = current;
        true
    }
}
