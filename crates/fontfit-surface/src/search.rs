#![forbid(unsafe_code)]

//! Largest-fitting-font-size search.
//!
//! Given a target box and a measurement oracle, find the largest font size
//! within the configured bounds whose rendered text still fits the box.
//! Probes are expensive (each one forces a synchronous layout read of the
//! measurement element), so the search runs an exponential-step binary
//! search: the step doubles after every probe that moves a bound, covering a
//! wide window quickly, and the window then collapses like an ordinary
//! binary search. Probe count is `O(log R)` for a window of `R` candidate
//! sizes, against `O(R)` for a linear scan.
//!
//! The oracle is assumed monotonic: a larger font size never shrinks the
//! rendered box. That is a precondition of the measurement collaborator and
//! is not verified here; a non-monotonic oracle yields an in-range but
//! possibly suboptimal size.

use fontfit_core::{Extent, FitBounds};
use tracing::trace;

/// Whether a measured extent fits inside the target box.
///
/// Height must stay strictly below the target; width may reach the target's
/// ceiling, matching how layout engines round fractional box widths when
/// reporting overflow.
#[inline]
#[must_use]
pub fn extent_fits(measured: Extent, target: Extent) -> bool {
    measured.height < target.height && measured.width <= target.width.ceil()
}

/// Search window over candidate font sizes.
///
/// `lower` only rises and `upper` only falls; the window narrows until the
/// two meet. Both always stay inside the bounds the window was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitWindow {
    lower: u32,
    upper: u32,
}

impl FitWindow {
    /// Open a window spanning the whole permissible range.
    #[must_use]
    pub fn open(bounds: FitBounds) -> Self {
        Self {
            lower: bounds.min(),
            upper: bounds.max(),
        }
    }

    /// Smallest candidate still in the window.
    #[inline]
    #[must_use]
    pub const fn lower(&self) -> u32 {
        self.lower
    }

    /// Largest candidate still in the window.
    #[inline]
    #[must_use]
    pub const fn upper(&self) -> u32 {
        self.upper
    }

    /// Whether more than one candidate remains.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.lower < self.upper
    }

    /// Raise the lower bound to a size known to fit.
    fn raise_to(&mut self, size: u32) {
        debug_assert!(size >= self.lower && size <= self.upper);
        self.lower = self.lower.max(size);
    }

    /// Drop the upper bound below a size known not to fit.
    ///
    /// Returns `false` when the window collapsed onto the lower bound and
    /// the search must terminate there.
    fn shrink_below(&mut self, size: u32) -> bool {
        let cap = size.saturating_sub(1);
        if cap <= self.lower {
            self.upper = self.lower;
            return false;
        }
        self.upper = self.upper.min(cap);
        true
    }
}

/// Result of a fit search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOutcome {
    /// Largest fitting font size, within the configured bounds.
    pub font_size: u32,
    /// Number of oracle probes the search spent.
    pub probes: u32,
}

/// Find the largest font size in `bounds` whose rendered extent fits
/// `target`.
///
/// `hint` seeds the first probe and is clamped into the bounds; a hint near
/// the final answer (such as the previously fitted size) keeps the probe
/// count low. A single-size range returns immediately without probing. When
/// no size in the range fits, the result is `bounds.min()`, unprobed.
///
/// # Example
/// ```
/// use fontfit_core::{Extent, FitBounds};
/// use fontfit_surface::search::fit_font_size;
///
/// let bounds = FitBounds::new(8, 50)?;
/// let target = Extent::new(200.0, 24.0);
/// // Toy oracle: ten glyphs at half the font size each, one line high.
/// let outcome = fit_font_size(target, 50, bounds, &mut |size| {
///     Extent::new(f64::from(size) * 5.0, f64::from(size))
/// });
/// assert_eq!(outcome.font_size, 23);
/// # Ok::<(), fontfit_core::ConfigError>(())
/// ```
pub fn fit_font_size(
    target: Extent,
    hint: u32,
    bounds: FitBounds,
    measure: &mut impl FnMut(u32) -> Extent,
) -> FitOutcome {
    let mut window = FitWindow::open(bounds);
    if !window.is_open() {
        return FitOutcome {
            font_size: window.lower(),
            probes: 0,
        };
    }

    let mut font = bounds.clamp(hint);
    let mut step: u32 = 1;
    let mut probes = 0u32;

    loop {
        let measured = measure(font);
        probes += 1;
        let fits = extent_fits(measured, target);
        trace!(
            font_size = font,
            fits,
            lower = window.lower(),
            upper = window.upper(),
            step,
            "probe"
        );

        if fits {
            window.raise_to(font);
            if !window.is_open() {
                break;
            }
            let half = (window.upper() - window.lower()) / 2;
            font = window.lower() + half.clamp(1, step);
        } else {
            if !window.shrink_below(font) {
                break;
            }
            let half = (window.upper() - window.lower()).div_ceil(2);
            font = window.upper() - half.clamp(1, step);
        }
        step = step.saturating_mul(2);
    }

    FitOutcome {
        font_size: window.lower(),
        probes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Oracle that fits exactly the sizes at or below `threshold`.
    fn threshold_oracle(threshold: u32) -> impl FnMut(u32) -> Extent {
        move |size| {
            if size <= threshold {
                Extent::new(0.0, 0.0)
            } else {
                Extent::new(0.0, 1_000.0)
            }
        }
    }

    fn target() -> Extent {
        Extent::new(100.0, 500.0)
    }

    fn bounds(min: u32, max: u32) -> FitBounds {
        FitBounds::new(min, max).unwrap()
    }

    #[test]
    fn threshold_inside_range_is_found() {
        let outcome = fit_font_size(target(), 50, bounds(8, 50), &mut threshold_oracle(22));
        assert_eq!(outcome.font_size, 22);
    }

    #[test]
    fn nothing_fits_returns_min() {
        let outcome = fit_font_size(target(), 50, bounds(8, 50), &mut threshold_oracle(0));
        assert_eq!(outcome.font_size, 8);
    }

    #[test]
    fn everything_fits_returns_max() {
        let outcome = fit_font_size(target(), 8, bounds(8, 50), &mut threshold_oracle(u32::MAX));
        assert_eq!(outcome.font_size, 50);
    }

    #[test]
    fn single_size_range_skips_probing() {
        let mut probes = 0u32;
        let outcome = fit_font_size(target(), 42, bounds(10, 10), &mut |_| {
            probes += 1;
            Extent::new(0.0, 0.0)
        });
        assert_eq!(outcome.font_size, 10);
        assert_eq!(outcome.probes, 0);
        assert_eq!(probes, 0);
    }

    #[test]
    fn hint_below_range_is_clamped() {
        let outcome = fit_font_size(target(), 1, bounds(8, 50), &mut threshold_oracle(22));
        assert_eq!(outcome.font_size, 22);
    }

    #[test]
    fn hint_above_range_is_clamped() {
        let outcome = fit_font_size(target(), 999, bounds(8, 50), &mut threshold_oracle(22));
        assert_eq!(outcome.font_size, 22);
    }

    #[test]
    fn hint_at_answer_is_cheap() {
        // A hint already sitting on the answer needs one probe up (refused)
        // plus the confirming probe at the hint itself.
        let outcome = fit_font_size(target(), 22, bounds(8, 50), &mut threshold_oracle(22));
        assert_eq!(outcome.font_size, 22);
        assert!(outcome.probes <= 3, "spent {} probes", outcome.probes);
    }

    #[test]
    fn width_overflow_rejects_a_size() {
        // Height always fits; width crosses the ceiling at size 31.
        let target = Extent::new(300.4, 1_000.0);
        let mut oracle = |size: u32| Extent::new(f64::from(size) * 10.0, 0.0);
        let outcome = fit_font_size(target, 50, bounds(8, 50), &mut oracle);
        // ceil(300.4) = 301, so 30 (width 300) fits and 31 (width 310) does not.
        assert_eq!(outcome.font_size, 30);
    }

    #[test]
    fn height_at_target_does_not_fit() {
        // Height must stay strictly below the target.
        let target = Extent::new(1_000.0, 40.0);
        let mut oracle = |size: u32| Extent::new(0.0, f64::from(size));
        let outcome = fit_font_size(target, 50, bounds(8, 50), &mut oracle);
        assert_eq!(outcome.font_size, 39);
    }

    #[test]
    fn probe_count_is_logarithmic() {
        let bounds = bounds(1, 1_025);
        let bits = 32 - bounds.span().leading_zeros();
        for threshold in [1, 2, 100, 512, 513, 1_000, 1_024, 1_025] {
            for hint in [1, 512, 1_025] {
                let outcome =
                    fit_font_size(target(), hint, bounds, &mut threshold_oracle(threshold));
                assert_eq!(outcome.font_size, threshold.clamp(1, 1_025));
                assert!(
                    outcome.probes <= 2 * bits + 4,
                    "threshold {threshold} hint {hint}: {} probes for span {}",
                    outcome.probes,
                    bounds.span()
                );
            }
        }
    }

    #[test]
    fn search_is_idempotent() {
        let b = bounds(8, 50);
        let first = fit_font_size(target(), 50, b, &mut threshold_oracle(22));
        let second = fit_font_size(target(), 50, b, &mut threshold_oracle(22));
        assert_eq!(first, second);
    }

    #[test]
    fn window_raise_and_shrink() {
        let mut window = FitWindow::open(bounds(8, 50));
        window.raise_to(20);
        assert_eq!(window.lower(), 20);
        assert!(window.shrink_below(40));
        assert_eq!(window.upper(), 39);
        // Shrinking to the lower bound closes the window.
        assert!(!window.shrink_below(21));
        assert_eq!(window.lower(), 20);
        assert_eq!(window.upper(), 20);
        assert!(!window.is_open());
    }

    #[test]
    fn window_shrink_never_raises_upper() {
        let mut window = FitWindow::open(bounds(8, 50));
        assert!(window.shrink_below(30));
        assert_eq!(window.upper(), 29);
        assert!(window.shrink_below(45));
        assert_eq!(window.upper(), 29);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Reference answer for a threshold oracle: largest size `<= threshold`
        /// in the range, or `min` when nothing fits.
        fn reference(min: u32, max: u32, threshold: u32) -> u32 {
            if threshold >= max {
                max
            } else if threshold < min {
                min
            } else {
                threshold
            }
        }

        proptest! {
            #[test]
            fn result_stays_in_bounds(
                min in 1u32..200,
                span in 0u32..400,
                threshold in 0u32..700,
                hint in 0u32..800,
            ) {
                let b = FitBounds::new(min, min + span).unwrap();
                let outcome = fit_font_size(target(), hint, b, &mut threshold_oracle(threshold));
                prop_assert!(outcome.font_size >= b.min());
                prop_assert!(outcome.font_size <= b.max());
            }

            #[test]
            fn result_matches_linear_reference(
                min in 1u32..200,
                span in 0u32..400,
                threshold in 0u32..700,
                hint in 0u32..800,
            ) {
                let b = FitBounds::new(min, min + span).unwrap();
                let outcome = fit_font_size(target(), hint, b, &mut threshold_oracle(threshold));
                prop_assert_eq!(outcome.font_size, reference(min, min + span, threshold));
            }

            #[test]
            fn probe_count_within_logarithmic_bound(
                min in 1u32..200,
                span in 1u32..1024,
                threshold in 0u32..1500,
                hint in 0u32..1500,
            ) {
                let b = FitBounds::new(min, min + span).unwrap();
                let outcome = fit_font_size(target(), hint, b, &mut threshold_oracle(threshold));
                let bits = 32 - span.leading_zeros();
                prop_assert!(
                    outcome.probes <= 2 * bits + 4,
                    "{} probes for span {}",
                    outcome.probes,
                    span
                );
            }

            #[test]
            fn growing_target_never_shrinks_the_result(
                width in 10.0f64..400.0,
                height in 10.0f64..400.0,
                dw in 0.0f64..200.0,
                dh in 0.0f64..200.0,
                hint in 0u32..100,
            ) {
                // Linear oracle: twenty glyphs wide, one line high.
                let mut oracle = |size: u32| {
                    Extent::new(f64::from(size) * 0.6 * 20.0, f64::from(size) * 1.2)
                };
                let b = FitBounds::new(1, 300).unwrap();
                let small = fit_font_size(Extent::new(width, height), hint, b, &mut oracle);
                let grown = fit_font_size(Extent::new(width + dw, height + dh), hint, b, &mut oracle);
                prop_assert!(grown.font_size >= small.font_size);
            }

            #[test]
            fn repeated_search_is_stable(
                min in 1u32..100,
                span in 0u32..200,
                threshold in 0u32..400,
                hint in 0u32..400,
            ) {
                let b = FitBounds::new(min, min + span).unwrap();
                let first = fit_font_size(target(), hint, b, &mut threshold_oracle(threshold));
                let second = fit_font_size(target(), hint, b, &mut threshold_oracle(threshold));
                prop_assert_eq!(first, second);
            }
        }
    }
}
