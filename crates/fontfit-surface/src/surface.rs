#![forbid(unsafe_code)]

//! The auto-fitting text surface.
//!
//! [`AutoFontSurface`] ties the pieces together once per render pass: run
//! the invalidation checks, and when dirty, sync content to the measurement
//! probe, search for the largest fitting font size (seeded with the cached
//! one), and apply the winner to the visible element. The surface holds its
//! measurement probe and receives the visible element's [`StyleSink`] on
//! each pass: composition over the widget inheritance the equivalent DOM
//! components use.

use crate::invalidate::{DeferredRecheck, InvalidationReason, InvalidationTracker};
use crate::measure::{MeasureProbe, StyleSink};
use crate::search::fit_font_size;
use fontfit_core::{
    ConfigError, Extent, FitBounds, FontSize, FontUnit, RefreshBus, RefreshObserver,
};
use tracing::{debug, trace_span};
use web_time::{Duration, Instant};

/// Surface construction options.
///
/// `font_size_range` is the only required field.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    /// Permissible `(min, max)` font-size range. Required.
    pub font_size_range: Option<(u32, u32)>,
    /// Unit the fitted size is expressed in.
    pub font_size_unit: FontUnit,
    /// Seed for the first search. Defaults to the range maximum.
    pub initial_font_size: Option<u32>,
    /// Delay before the one-shot post-first-fit recheck.
    pub settle_delay: Duration,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            font_size_range: None,
            font_size_unit: FontUnit::Px,
            initial_font_size: None,
            settle_delay: DeferredRecheck::DEFAULT_DELAY,
        }
    }
}

impl SurfaceOptions {
    /// Options with the given range and defaults everywhere else.
    #[must_use]
    pub fn with_range(min: u32, max: u32) -> Self {
        Self {
            font_size_range: Some((min, max)),
            ..Self::default()
        }
    }

    /// Validate into a [`SurfaceConfig`].
    ///
    /// # Errors
    /// [`ConfigError`] when the font-size range is missing or inverted.
    pub fn validate(self) -> Result<SurfaceConfig, ConfigError> {
        let (min, max) = self
            .font_size_range
            .ok_or(ConfigError::MissingFontSizeRange)?;
        let bounds = FitBounds::new(min, max)?;
        let initial = bounds.clamp(self.initial_font_size.unwrap_or(bounds.max()));
        Ok(SurfaceConfig {
            bounds,
            unit: self.font_size_unit,
            initial,
            settle_delay: self.settle_delay,
        })
    }
}

/// Validated surface configuration.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceConfig {
    bounds: FitBounds,
    unit: FontUnit,
    initial: u32,
    settle_delay: Duration,
}

impl SurfaceConfig {
    /// Permissible font-size range.
    #[must_use]
    pub const fn bounds(&self) -> FitBounds {
        self.bounds
    }

    /// Unit fitted sizes are expressed in.
    #[must_use]
    pub const fn unit(&self) -> FontUnit {
        self.unit
    }
}

/// A text surface that fits its content to the host-provided box by
/// adjusting the font size within configured bounds.
///
/// The search is synchronous and completes within the commit: every probe
/// is a blocking measurement read against the single shared probe, so two
/// in-flight searches can never interleave on one instance.
pub struct AutoFontSurface<M> {
    config: SurfaceConfig,
    content: String,
    probe: M,
    tracker: InvalidationTracker,
    refresh: RefreshObserver,
    recheck: DeferredRecheck,
    font_size: u32,
    applied: Option<FontSize>,
    committed_once: bool,
}

impl<M: MeasureProbe> AutoFontSurface<M> {
    /// Create a surface, validating `options`.
    ///
    /// # Errors
    /// [`ConfigError`] when the font-size range is missing or inverted.
    pub fn new(options: SurfaceOptions, refresh: &RefreshBus, probe: M) -> Result<Self, ConfigError> {
        let config = options.validate()?;
        Ok(Self {
            content: String::new(),
            probe,
            tracker: InvalidationTracker::new(),
            refresh: refresh.observer(),
            recheck: DeferredRecheck::new(config.settle_delay),
            font_size: config.initial,
            applied: None,
            committed_once: false,
            config,
        })
    }

    /// Replace the fitted content. Marks the surface dirty when the content
    /// actually changed.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content != self.content {
            self.content = content;
            self.tracker.mark(InvalidationReason::ContentChanged);
        }
    }

    /// Currently fitted content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The current fitted font size.
    #[must_use]
    pub fn font_size(&self) -> FontSize {
        FontSize::new(self.font_size, self.config.unit)
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Access the measurement probe.
    #[must_use]
    pub fn probe(&self) -> &M {
        &self.probe
    }

    /// Mutable access to the measurement probe.
    ///
    /// The surface does not watch the probe: a host that mutates it in a way
    /// that changes metrics is expected to refresh or re-commit dirty.
    pub fn probe_mut(&mut self) -> &mut M {
        &mut self.probe
    }

    /// Per-pass commit: decide whether a re-fit is needed and run it.
    ///
    /// `box_extent` is the content box the host laid out for this surface.
    /// Returns the font size in effect after this pass; it was pushed to
    /// `sink` only if it changed.
    pub fn commit(
        &mut self,
        sink: &mut impl StyleSink,
        box_extent: Extent,
        now: Instant,
    ) -> FontSize {
        let _span = trace_span!(
            "surface_commit",
            width = box_extent.width,
            height = box_extent.height
        )
        .entered();

        self.tracker.note_extent(box_extent);
        if self.refresh.poll() {
            self.tracker.mark(InvalidationReason::RefreshTick);
        }
        if self.recheck.fire_if_due(now) {
            self.tracker.mark(InvalidationReason::FontSettle);
        }

        if self.tracker.is_dirty() {
            self.refit(sink, box_extent);
            if !self.committed_once {
                self.committed_once = true;
                self.recheck.arm(now);
            }
        }
        self.font_size()
    }

    /// Teardown: clear the applied style, cancel the pending recheck, and
    /// re-dirty so a future re-mount fits again.
    pub fn recall(&mut self, sink: &mut impl StyleSink) {
        sink.apply_font_size(None);
        self.applied = None;
        self.recheck.cancel();
        self.tracker.mark_dirty();
    }

    fn refit(&mut self, sink: &mut impl StyleSink, target: Extent) {
        self.probe.set_content(&self.content);
        let unit = self.config.unit;
        let probe = &mut self.probe;
        let outcome = fit_font_size(target, self.font_size, self.config.bounds, &mut |size| {
            probe.set_font_size(FontSize::new(size, unit));
            probe.rendered_extent()
        });
        debug!(
            font_size = outcome.font_size,
            probes = outcome.probes,
            reason = ?self.tracker.reason(),
            "fit complete"
        );
        self.font_size = outcome.font_size;
        let fitted = FontSize::new(outcome.font_size, unit);
        if self.applied != Some(fitted) {
            sink.apply_font_size(Some(fitted));
            self.applied = Some(fitted);
        }
        self.tracker.settle();
    }
}
