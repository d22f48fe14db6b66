#![forbid(unsafe_code)]

//! Measurement and style-application seams.
//!
//! The surface never touches a layout engine. It talks to two small traits:
//! a [`MeasureProbe`] standing in for the hidden measurement element and a
//! [`StyleSink`] standing in for the visible one. Hosts adapt their render
//! framework behind these; tests and demos use [`HeuristicProbe`].

use fontfit_core::{Extent, FontSize};
use unicode_width::UnicodeWidthStr;

/// The hidden measurement element.
///
/// Implementations must reflect style mutations synchronously: after
/// [`set_font_size`](Self::set_font_size), the next
/// [`rendered_extent`](Self::rendered_extent) acts as a layout-forcing read
/// of the resulting box. The probe's content must match the content being
/// fitted before a search runs; the surface syncs it on every dirty commit.
///
/// The fit search additionally assumes the probe is monotonic: a larger
/// font size never yields a smaller rendered extent.
pub trait MeasureProbe {
    /// Replace the measured content.
    fn set_content(&mut self, content: &str);

    /// Apply a candidate font size to the measured content.
    fn set_font_size(&mut self, size: FontSize);

    /// Read the rendered box extent under the current content and size.
    fn rendered_extent(&mut self) -> Extent;
}

/// The visible element the fitted size is applied to.
pub trait StyleSink {
    /// Apply a font size, or clear the style with `None`.
    fn apply_font_size(&mut self, size: Option<FontSize>);
}

/// Heuristic measurer for demos and tests.
///
/// Approximates glyphs at 0.6 em advance and lines at 1.2 em, the classic
/// rough metrics for Latin text. Content lays out on explicit line breaks
/// only (no wrapping); display columns come from `unicode-width`, so wide
/// characters count double. Monotonic in font size by construction.
#[derive(Debug, Clone, Default)]
pub struct HeuristicProbe {
    line_cols: Vec<usize>,
    font_size: u32,
}

impl HeuristicProbe {
    /// Average glyph advance as a fraction of the font size.
    const GLYPH_ADVANCE_EM: f64 = 0.6;
    /// Line height as a fraction of the font size.
    const LINE_HEIGHT_EM: f64 = 1.2;

    /// Create an empty probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeasureProbe for HeuristicProbe {
    fn set_content(&mut self, content: &str) {
        self.line_cols = content.lines().map(UnicodeWidthStr::width).collect();
    }

    fn set_font_size(&mut self, size: FontSize) {
        self.font_size = size.value;
    }

    fn rendered_extent(&mut self) -> Extent {
        let size = f64::from(self.font_size);
        let widest = self.line_cols.iter().copied().max().unwrap_or(0);
        let lines = self.line_cols.len().max(1);
        Extent::new(
            widest as f64 * Self::GLYPH_ADVANCE_EM * size,
            lines as f64 * Self::LINE_HEIGHT_EM * size,
        )
    }
}
