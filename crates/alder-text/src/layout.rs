//! Version-based measurement cache.
//!
//! Caches the measured bounds of a control's text so that repeated
//! layout passes do not re-measure unchanged content. The owning
//! control calls [`TextLayout::invalidate`] after every text or font
//! mutation; the generation counter makes invalidation observable.

use alder_core::geometry::Size;

use crate::shaper::{TextShaper, TextStyle};

/// Cache key for a measurement result.
///
/// Content is identified by its fxhash, the same scheme the shaping
/// cache upstream uses, so the key stays cheap to compare for long
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MeasureKey {
    text_hash: u32,
    font_size_px: u16,
    wrap_width_px: u16,
}

impl MeasureKey {
    fn new(text: &str, style: &TextStyle) -> Self {
        Self {
            text_hash: fxhash::hash32(text),
            font_size_px: style.font_size.round() as u16,
            wrap_width_px: style.max_width.map(|w| w.round() as u16).unwrap_or(0),
        }
    }
}

/// Cached text measurement owned by a text-bearing control.
#[derive(Debug, Default, Clone)]
pub struct TextLayout {
    cached: Option<(MeasureKey, Size<f32>)>,
    generation: u32,
}

impl TextLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached measurement.
    ///
    /// Bumps the generation counter; callers that skipped work because
    /// nothing changed leave the counter untouched.
    pub fn invalidate(&mut self) {
        self.cached = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of invalidations so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether a measurement is currently cached.
    pub fn is_valid(&self) -> bool {
        self.cached.is_some()
    }

    /// Measure `text`, reusing the cache when the key matches.
    ///
    /// A failed measurement is not cached; the failure degrades to a
    /// zero size because the core has no error channel for layout.
    pub fn measure(&mut self, shaper: &dyn TextShaper, text: &str, style: &TextStyle) -> Size<f32> {
        let key = MeasureKey::new(text, style);
        if let Some((cached_key, size)) = self.cached
            && cached_key == key
        {
            return size;
        }

        match shaper.measure(text, style) {
            Ok(size) => {
                self.cached = Some((key, size));
                size
            }
            Err(err) => {
                tracing::warn!("text measurement failed: {err}");
                Size::new(0.0, 0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaper::HeuristicShaper;
    use std::cell::Cell;

    struct CountingShaper<'a> {
        inner: HeuristicShaper,
        calls: &'a Cell<u32>,
    }

    impl TextShaper for CountingShaper<'_> {
        fn measure(
            &self,
            text: &str,
            style: &TextStyle,
        ) -> Result<Size<f32>, crate::TextError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.measure(text, style)
        }
    }

    #[test]
    fn cache_hit_skips_shaper() {
        let calls = Cell::new(0);
        let shaper = CountingShaper {
            inner: HeuristicShaper::new(),
            calls: &calls,
        };
        let mut layout = TextLayout::new();
        let style = TextStyle::new();

        let first = layout.measure(&shaper, "hello", &style);
        let second = layout.measure(&shaper, "hello", &style);
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn invalidate_forces_remeasure() {
        let calls = Cell::new(0);
        let shaper = CountingShaper {
            inner: HeuristicShaper::new(),
            calls: &calls,
        };
        let mut layout = TextLayout::new();
        let style = TextStyle::new();

        layout.measure(&shaper, "hello", &style);
        assert_eq!(layout.generation(), 0);

        layout.invalidate();
        assert_eq!(layout.generation(), 1);
        assert!(!layout.is_valid());

        layout.measure(&shaper, "hello", &style);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn content_change_misses_cache() {
        let calls = Cell::new(0);
        let shaper = CountingShaper {
            inner: HeuristicShaper::new(),
            calls: &calls,
        };
        let mut layout = TextLayout::new();
        let style = TextStyle::new();

        layout.measure(&shaper, "hello", &style);
        layout.measure(&shaper, "world", &style);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn failed_measure_not_cached() {
        let mut layout = TextLayout::new();
        let style = TextStyle::new().size(0.0);
        let size = layout.measure(&HeuristicShaper::new(), "x", &style);
        assert_eq!(size, Size::new(0.0, 0.0));
        assert!(!layout.is_valid());
    }
}
