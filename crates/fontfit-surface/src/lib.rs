#![forbid(unsafe_code)]

//! Auto-sizing text surface: the largest font size that still fits the box.
//!
//! The crate splits into:
//! - [`search`]: the fit search over an abstract measurement oracle
//! - [`invalidate`]: per-surface dirty tracking and the settle recheck
//! - [`measure`]: the probe/sink seams hosts implement
//! - [`surface`]: [`AutoFontSurface`], the per-pass component
//!
//! # Example
//! ```
//! use fontfit_core::{Extent, FontSize, RefreshBus};
//! use fontfit_surface::measure::{HeuristicProbe, StyleSink};
//! use fontfit_surface::surface::{AutoFontSurface, SurfaceOptions};
//! use web_time::Instant;
//!
//! struct Sink(Option<FontSize>);
//! impl StyleSink for Sink {
//!     fn apply_font_size(&mut self, size: Option<FontSize>) {
//!         self.0 = size;
//!     }
//! }
//!
//! let bus = RefreshBus::new();
//! let mut surface = AutoFontSurface::new(
//!     SurfaceOptions::with_range(8, 50),
//!     &bus,
//!     HeuristicProbe::new(),
//! )?;
//! surface.set_content("headline");
//!
//! let mut sink = Sink(None);
//! let fitted = surface.commit(&mut sink, Extent::new(300.0, 40.0), Instant::now());
//! assert_eq!(sink.0, Some(fitted));
//! # Ok::<(), fontfit_core::ConfigError>(())
//! ```

pub mod invalidate;
pub mod measure;
pub mod search;
pub mod surface;

pub use invalidate::{DeferredRecheck, InvalidationReason, InvalidationTracker};
pub use measure::{HeuristicProbe, MeasureProbe, StyleSink};
pub use search::{FitOutcome, FitWindow, extent_fits, fit_font_size};
pub use surface::{AutoFontSurface, SurfaceConfig, SurfaceOptions};
