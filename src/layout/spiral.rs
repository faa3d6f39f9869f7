use crate::color::ColorSource;
use crate::config::SpiralConfig;
use crate::ir::Item;

use super::text::TextMeasure;
use super::{PlacedLabel, Rect, WordCloudLayout};

/// Places each label along an Archimedean spiral from the canvas center,
/// taking the first spot whose box clears every label placed so far.
///
/// Items are placed in input order, so earlier items claim the center. When
/// the spiral reaches `max_radius` without a free spot the label keeps its
/// last tried position and is flagged `exhausted`.
pub(super) fn compute_word_cloud_layout(
    items: &[Item],
    width: f32,
    height: f32,
    config: &SpiralConfig,
    measure: &dyn TextMeasure,
    colors: &mut dyn ColorSource,
) -> WordCloudLayout {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let mut labels: Vec<PlacedLabel> = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let font_size = (item.weight * config.font_scale).max(config.min_font_size);
        let text_width = measure.text_width(&item.label, font_size);
        let text_height = font_size;
        let color = colors.color_for(index);

        let (bounds, exhausted) = spiral_search(
            center_x,
            center_y,
            text_width,
            text_height,
            config,
            &labels,
        );
        if exhausted {
            log::debug!(
                "word '{}' found no free spot within radius {}, overlapping",
                item.label,
                config.max_radius
            );
        } else {
            log::trace!(
                "word '{}' placed at ({:.1}, {:.1})",
                item.label,
                bounds.x,
                bounds.y
            );
        }

        labels.push(PlacedLabel {
            item: item.clone(),
            bounds,
            font_size,
            color,
            exhausted,
        });
    }

    WordCloudLayout {
        width,
        height,
        labels,
    }
}

fn spiral_search(
    center_x: f32,
    center_y: f32,
    text_width: f32,
    text_height: f32,
    config: &SpiralConfig,
    placed: &[PlacedLabel],
) -> (Rect, bool) {
    let mut angle = 0.0f32;
    let mut radius = 0.0f32;
    let mut candidate = Rect::new(
        center_x - text_width / 2.0,
        center_y - text_height / 2.0,
        text_width,
        text_height,
    );
    // A non-advancing spiral would never reach the bound.
    if config.radius_step <= 0.0 {
        return (candidate, placed.iter().any(|p| p.bounds.intersects(&candidate)));
    }

    while radius < config.max_radius {
        angle += config.angle_step;
        radius += config.radius_step;
        candidate = Rect::new(
            center_x + radius * angle.cos() - text_width / 2.0,
            center_y + radius * angle.sin() - text_height / 2.0,
            text_width,
            text_height,
        );
        if !placed.iter().any(|p| p.bounds.intersects(&candidate)) {
            return (candidate, false);
        }
    }
    (candidate, true)
}
