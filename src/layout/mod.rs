mod bubble;
mod font_fit;
mod spiral;
pub mod text;
mod types;

pub use font_fit::fit_font_size;
pub use types::*;

use crate::color::{ColorSource, CyclePalette, OsRandom, RandomPalette, RandomSource};
use crate::config::LayoutConfig;
use crate::ir::{CloudKind, Item};
use crate::theme::Theme;

use bubble::{BubbleContext, compute_bubble_layout};
use spiral::compute_word_cloud_layout;
use text::{FontMeasure, TextMeasure};

/// Colors used when the caller does not inject a source: a random palette
/// pick per word, palette order for bubbles.
pub fn default_colors(kind: CloudKind, theme: &Theme) -> Box<dyn ColorSource> {
    match kind {
        CloudKind::Words => Box::new(RandomPalette::new(theme.word_colors.clone(), OsRandom)),
        CloudKind::Bubbles => Box::new(CyclePalette::new(theme.bubble_colors.clone(), OsRandom)),
    }
}

/// Measurer matching the font each widget draws with.
pub fn default_measure(kind: CloudKind, theme: &Theme, config: &LayoutConfig) -> FontMeasure {
    match kind {
        CloudKind::Words => {
            FontMeasure::new(theme.font_family.clone(), false, config.fast_text_metrics)
        }
        CloudKind::Bubbles => {
            FontMeasure::new(theme.bubble_font_family.clone(), true, config.fast_text_metrics)
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn compute_layout(
    kind: CloudKind,
    items: &[Item],
    width: f32,
    height: f32,
    theme: &Theme,
    config: &LayoutConfig,
    colors: &mut dyn ColorSource,
    random: &mut dyn RandomSource,
) -> CloudLayout {
    let measure = default_measure(kind, theme, config);
    compute_layout_with_measure(kind, items, width, height, config, &measure, colors, random)
}

/// Full recomputation of a cloud; there is no incremental path.
///
/// No items or a canvas without area yields an empty layout.
#[allow(clippy::too_many_arguments)]
pub fn compute_layout_with_measure(
    kind: CloudKind,
    items: &[Item],
    width: f32,
    height: f32,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
    colors: &mut dyn ColorSource,
    random: &mut dyn RandomSource,
) -> CloudLayout {
    if items.is_empty() || !has_area(width, height) {
        log::debug!(
            "empty {} layout ({} items on {}x{})",
            kind.as_str(),
            items.len(),
            width,
            height
        );
        return CloudLayout::empty(kind, width.max(0.0), height.max(0.0));
    }

    match kind {
        CloudKind::Words => CloudLayout::Words(compute_word_cloud_layout(
            items,
            width,
            height,
            &config.spiral,
            measure,
            colors,
        )),
        CloudKind::Bubbles => {
            let ctx = BubbleContext {
                config: &config.bubble,
                font_fit: &config.font_fit,
                measure,
            };
            CloudLayout::Bubbles(compute_bubble_layout(
                items, width, height, &ctx, colors, random,
            ))
        }
    }
}

fn has_area(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}
