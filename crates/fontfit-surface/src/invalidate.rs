#![forbid(unsafe_code)]

//! Per-surface invalidation tracking.
//!
//! A surface re-fits only when something actually changed. The tracker owns
//! the dirty bit and the box-extent comparison; [`DeferredRecheck`] covers
//! the late reflow after a web font swaps in shortly after first paint.
//! Recomputation is strictly serialized with render passes: the tracker is
//! marked between passes, read once per pass, and settled right after a
//! search result is applied.

use fontfit_core::Extent;
use web_time::{Duration, Instant};

/// Why a surface was invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// The content box was resized by the host layout.
    BoxResized,
    /// The fitted content was replaced.
    ContentChanged,
    /// The shared refresh epoch advanced.
    RefreshTick,
    /// The post-first-fit settle deadline fired.
    FontSettle,
}

/// Dirty-bit state machine for one surface instance.
///
/// Starts dirty so the first commit always runs a fit. Any marked reason
/// keeps the tracker dirty until [`settle`](Self::settle) runs after a
/// search result has been applied.
#[derive(Debug, Clone)]
pub struct InvalidationTracker {
    dirty: bool,
    last_extent: Option<Extent>,
    reason: Option<InvalidationReason>,
}

impl Default for InvalidationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationTracker {
    /// Create a tracker in the dirty state with no extent seen yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: true,
            last_extent: None,
            reason: None,
        }
    }

    /// Compare the current box extent against the last one seen, marking
    /// [`InvalidationReason::BoxResized`] on change.
    ///
    /// Returns whether the extent changed.
    pub fn note_extent(&mut self, extent: Extent) -> bool {
        if self.last_extent == Some(extent) {
            return false;
        }
        self.last_extent = Some(extent);
        self.mark(InvalidationReason::BoxResized);
        true
    }

    /// Mark the tracker dirty for a reason. The first reason since the last
    /// settle is retained for observability.
    pub fn mark(&mut self, reason: InvalidationReason) {
        self.dirty = true;
        if self.reason.is_none() {
            self.reason = Some(reason);
        }
    }

    /// Mark dirty without recording a reason (teardown / re-mount).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a re-fit must run this pass.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// First reason the tracker went dirty since the last settle, if one
    /// was recorded.
    #[inline]
    #[must_use]
    pub const fn reason(&self) -> Option<InvalidationReason> {
        self.reason
    }

    /// Clear the dirty bit after a search completed and was applied.
    pub fn settle(&mut self) {
        self.dirty = false;
        self.reason = None;
    }
}

/// One-shot deferred re-fit, armed after the first successful fit.
///
/// Web fonts can swap in shortly after first paint and change glyph metrics;
/// a single recheck a short interval later corrects the fitted size. The
/// deadline is polled cooperatively from the render pass, never from a
/// callback thread, so firing merely dirties the tracker for the next pass.
/// Teardown cancels a pending deadline; a canceled or fired recheck is
/// inert.
#[derive(Debug, Clone)]
pub struct DeferredRecheck {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DeferredRecheck {
    /// Default settle delay after the first fit.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

    /// Create an unarmed recheck with the given delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Schedule the recheck `delay` from `now`. No-op while already armed.
    pub fn arm(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.delay);
        }
    }

    /// Cancel a pending recheck.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a recheck is pending.
    #[inline]
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire when due. Returns `true` at most once per arm.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for DeferredRecheck {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
