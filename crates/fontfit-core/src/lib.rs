#![forbid(unsafe_code)]

//! Shared primitives for the fontfit workspace.
//!
//! `fontfit-core` holds the types the rest of the workspace agrees on:
//! measured [`Extent`]s, font units and sizes, the validated [`FitBounds`]
//! range, the configuration error model, and the [`RefreshBus`] used to
//! trigger recalculation across every live surface at once.

pub mod error;
pub mod font;
pub mod geometry;
pub mod refresh;

pub use error::ConfigError;
pub use font::{FitBounds, FontSize, FontUnit};
pub use geometry::Extent;
pub use refresh::{RefreshBus, RefreshObserver};
