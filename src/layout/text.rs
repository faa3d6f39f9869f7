use crate::text_metrics;

/// Width of a single line of text at a given font size.
///
/// Layout only sees text through this trait, so placement stays deterministic
/// whenever the measurer is.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Measures with an installed system font, falling back to the width table
/// when the family cannot be resolved.
#[derive(Debug, Clone)]
pub struct FontMeasure {
    pub font_family: String,
    pub bold: bool,
    pub fast: bool,
}

impl FontMeasure {
    pub fn new(font_family: impl Into<String>, bold: bool, fast: bool) -> Self {
        Self {
            font_family: font_family.into(),
            bold,
            fast,
        }
    }
}

impl TextMeasure for FontMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        if self.fast && text.is_ascii() {
            return table_width(text, font_size, self.bold);
        }
        text_metrics::measure_text_width(text, font_size, &self.font_family, self.bold)
            .unwrap_or_else(|| table_width(text, font_size, self.bold))
    }
}

/// Font-free measurer built on per-character width factors of a typical
/// sans-serif face.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharWidthMeasure {
    pub bold: bool,
}

impl TextMeasure for CharWidthMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        table_width(text, font_size, self.bold)
    }
}

fn table_width(text: &str, font_size: f32, bold: bool) -> f32 {
    let base: f32 = text
        .chars()
        .filter(|ch| *ch != '\n')
        .map(char_width_factor)
        .sum::<f32>()
        * font_size;
    if bold { base * 1.06 } else { base }
}

pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.278,
        '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.278,
        '(' | ')' | '[' | ']' | '{' | '}' | '-' => 0.333,
        'i' | 'j' | 'l' => 0.222,
        'f' | 't' | 'I' => 0.278,
        'r' => 0.333,
        'm' => 0.833,
        'w' => 0.722,
        'M' => 0.833,
        'W' => 0.944,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 0.667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 0.722,
        'G' | 'O' | 'Q' => 0.778,
        'F' | 'T' | 'Z' => 0.611,
        'J' => 0.5,
        'L' => 0.556,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 0.5,
        'a'..='z' | '0'..='9' => 0.556,
        '@' => 1.015,
        '#' | '%' | '&' => 0.889,
        _ if ch.is_ascii() => 0.584,
        // Wide scripts (CJK, emoji) take roughly a full em.
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_width_factor_returns_positive_values() {
        for ch in ['a', 'Z', ' ', '0', '@', '\u{4e2d}'] {
            assert!(char_width_factor(ch) > 0.0, "char {:?} has zero width", ch);
        }
    }

    #[test]
    fn table_width_scales_with_font_size() {
        let measure = CharWidthMeasure::default();
        let w16 = measure.text_width("Hello", 16.0);
        let w32 = measure.text_width("Hello", 32.0);
        assert!((w32 - w16 * 2.0).abs() < 0.01, "width should double with font size");
    }

    #[test]
    fn bold_is_wider() {
        let regular = CharWidthMeasure { bold: false }.text_width("joy", 20.0);
        let bold = CharWidthMeasure { bold: true }.text_width("joy", 20.0);
        assert!(bold > regular);
    }

    #[test]
    fn fast_font_measure_matches_table() {
        let measure = FontMeasure::new("sans-serif", false, true);
        let expected = CharWidthMeasure::default().text_width("Canvas", 25.0);
        assert_eq!(measure.text_width("Canvas", 25.0), expected);
    }

    #[test]
    fn font_measure_uses_resolved_face_for_non_ascii() {
        let text = "Überraschung мир";
        let Some(expected) = text_metrics::measure_text_width(text, 24.0, "sans-serif", false)
        else {
            return;
        };
        for fast in [true, false] {
            let measure = FontMeasure::new("sans-serif", false, fast);
            assert_eq!(measure.text_width(text, 24.0), expected);
        }
    }
}
