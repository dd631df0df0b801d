//! The measurement contract between controls and the shaping engine.

use alder_core::geometry::Size;

use crate::error::TextError;

/// Font weight (CSS scale, 100-900).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::Normal
    }
}

/// Style inputs that affect measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub font_size: f32,
    /// Line height multiplier
    pub line_height: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Wrap width in pixels, None for single-line measurement
    pub max_width: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 1.2,
            weight: FontWeight::Normal,
            max_width: None,
        }
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Measurement contract implemented by a real shaping engine.
///
/// The control core never shapes text itself; it asks a shaper for the
/// bounds of a string under a style and caches the answer in a
/// [`crate::TextLayout`].
pub trait TextShaper {
    /// Measure the bounds of `text` under `style`.
    fn measure(&self, text: &str, style: &TextStyle) -> Result<Size<f32>, TextError>;
}

/// Estimation-only shaper used when no engine is attached.
///
/// Width is a rough per-character advance, height a line-height
/// multiple. Good enough for layout smoke tests and headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicShaper;

impl HeuristicShaper {
    const ADVANCE_FACTOR: f32 = 0.6;

    pub fn new() -> Self {
        Self
    }
}

impl TextShaper for HeuristicShaper {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<Size<f32>, TextError> {
        if !style.font_size.is_finite() || style.font_size <= 0.0 {
            return Err(TextError::InvalidFontSize(style.font_size));
        }

        let char_count = text.chars().count() as f32;
        let line_width = char_count * style.font_size * Self::ADVANCE_FACTOR;
        let line_height = style.font_size * style.line_height;

        let size = match style.max_width {
            Some(max_width) if max_width > 0.0 && line_width > max_width => {
                let lines = (line_width / max_width).ceil().max(1.0);
                Size::new(max_width, lines * line_height)
            }
            _ => Size::new(line_width, line_height),
        };
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_estimate() {
        let shaper = HeuristicShaper::new();
        let style = TextStyle::new().size(10.0);
        let size = shaper.measure("hello", &style).unwrap();
        assert_eq!(size.width, 5.0 * 10.0 * 0.6);
        assert_eq!(size.height, 12.0);
    }

    #[test]
    fn wrapping_grows_height() {
        let shaper = HeuristicShaper::new();
        let style = TextStyle::new().size(10.0).max_width(30.0);
        let size = shaper.measure("a longer run of text", &style).unwrap();
        assert_eq!(size.width, 30.0);
        assert!(size.height > 12.0);
    }

    #[test]
    fn rejects_bad_font_size() {
        let shaper = HeuristicShaper::new();
        let style = TextStyle::new().size(0.0);
        assert!(matches!(
            shaper.measure("x", &style),
            Err(TextError::InvalidFontSize(_))
        ));
    }

    #[test]
    fn empty_text_has_line_height() {
        let shaper = HeuristicShaper::new();
        let size = shaper.measure("", &TextStyle::new()).unwrap();
        assert_eq!(size.width, 0.0);
        assert!(size.height > 0.0);
    }
}
