use crate::config::FontFitConfig;

use super::text::TextMeasure;

/// Largest font size in `[min_font_size, max_font_size]` at which `text`
/// fits a `target_width` x `target_height` box.
///
/// Width is allowed to run `width_slack` times past the target. The size
/// steps down by one unit at a time, so the loop runs at most
/// `max_font_size - min_font_size` times.
pub fn fit_font_size(
    text: &str,
    target_width: f32,
    target_height: f32,
    config: &FontFitConfig,
    measure: &dyn TextMeasure,
) -> f32 {
    let min_size = config.min_font_size;
    let mut font_size = config.max_font_size;
    if font_size <= min_size {
        return min_size;
    }
    let max_width = target_width * config.width_slack;
    while font_size > min_size
        && (measure.text_width(text, font_size) > max_width || font_size > target_height)
    {
        font_size -= 1.0;
    }
    font_size.max(min_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::text::CharWidthMeasure;
    use std::cell::Cell;

    struct CountingMeasure {
        calls: Cell<usize>,
        per_char: f32,
    }

    impl TextMeasure for CountingMeasure {
        fn text_width(&self, text: &str, font_size: f32) -> f32 {
            self.calls.set(self.calls.get() + 1);
            text.chars().count() as f32 * font_size * self.per_char
        }
    }

    #[test]
    fn roomy_box_keeps_max_size() {
        let config = FontFitConfig::default();
        let size = fit_font_size("joy", 160.0, 80.0, &config, &CharWidthMeasure::default());
        assert_eq!(size, 36.0);
    }

    #[test]
    fn short_box_limits_by_height() {
        let config = FontFitConfig::default();
        let size = fit_font_size("joy", 160.0, 24.0, &config, &CharWidthMeasure::default());
        assert_eq!(size, 24.0);
    }

    #[test]
    fn long_text_shrinks_to_fit_width() {
        let config = FontFitConfig::default();
        let measure = CountingMeasure {
            calls: Cell::new(0),
            per_char: 0.5,
        };
        // 10 chars * size * 0.5 <= 40 * 1.8 => size <= 14.4
        let size = fit_font_size("abcdefghij", 40.0, 100.0, &config, &measure);
        assert_eq!(size, 14.0);
    }

    #[test]
    fn impossible_fit_stops_at_min_within_bound() {
        let config = FontFitConfig::default();
        let measure = CountingMeasure {
            calls: Cell::new(0),
            per_char: 1.0,
        };
        let size = fit_font_size("a very long label indeed", 1.0, 1.0, &config, &measure);
        assert_eq!(size, 12.0);
        let steps = (config.max_font_size - config.min_font_size) as usize;
        assert!(measure.calls.get() <= steps + 1);
    }

    #[test]
    fn inverted_range_returns_min() {
        let config = FontFitConfig {
            min_font_size: 20.0,
            max_font_size: 10.0,
            width_slack: 1.8,
        };
        let size = fit_font_size("x", 100.0, 100.0, &config, &CharWidthMeasure::default());
        assert_eq!(size, 20.0);
    }
}
