#![forbid(unsafe_code)]

//! Configuration error model.

use std::fmt;

/// Errors raised while validating surface configuration.
///
/// Fatal at construction: a surface with an invalid font-size range is never
/// created, and nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No font-size range was supplied.
    MissingFontSizeRange,
    /// The supplied range is inverted (`min > max`).
    EmptyFontSizeRange {
        /// Requested lower bound.
        min: u32,
        /// Requested upper bound.
        max: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFontSizeRange => write!(f, "no font-size range specified"),
            Self::EmptyFontSizeRange { min, max } => {
                write!(f, "font-size range [{min}, {max}] is inverted")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
