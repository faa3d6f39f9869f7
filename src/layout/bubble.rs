use std::f32::consts::PI;

use crate::color::{ColorSource, RandomSource};
use crate::config::{BubbleConfig, FontFitConfig};
use crate::ir::Item;

use super::font_fit::fit_font_size;
use super::text::TextMeasure;
use super::{BubbleCloudLayout, Circle, PlacedBubble};

pub(super) struct BubbleContext<'a> {
    pub config: &'a BubbleConfig,
    pub font_fit: &'a FontFitConfig,
    pub measure: &'a dyn TextMeasure,
}

/// Greedy radial packing, heaviest bubble first.
///
/// The first bubble takes the canvas center. Each later bubble tries
/// `angle_samples` spots around every placed bubble and keeps the in-bounds
/// spot closest to its neighbours, as long as it does not sink deeper than
/// `overlap_tolerance * radius` into any of them.
pub(super) fn compute_bubble_layout(
    items: &[Item],
    width: f32,
    height: f32,
    ctx: &BubbleContext<'_>,
    colors: &mut dyn ColorSource,
    random: &mut dyn RandomSource,
) -> BubbleCloudLayout {
    let cfg = ctx.config;
    let mut sorted: Vec<&Item> = items.iter().collect();
    // Stable, so equal weights keep their input order.
    sorted.sort_by(|a, b| packing_weight(b).total_cmp(&packing_weight(a)));

    let max_weight = sorted.first().map(|item| packing_weight(item)).unwrap_or(0.0);
    let mut bubbles: Vec<PlacedBubble> = Vec::with_capacity(sorted.len());

    for (index, item) in sorted.into_iter().enumerate() {
        let radius = scaled_radius(packing_weight(item), max_weight, cfg);
        let color = colors.color_for(index);

        let (circle, fallback) = if index == 0 {
            (
                Circle {
                    cx: width / 2.0,
                    cy: height / 2.0,
                    r: radius,
                },
                false,
            )
        } else {
            match best_candidate(&bubbles, radius, width, height, cfg) {
                Some(circle) => (circle, false),
                None => {
                    log::debug!(
                        "bubble '{}' found no packed spot, placing at random",
                        item.label
                    );
                    (random_circle(radius, width, height, random), true)
                }
            }
        };

        let font_size = fit_font_size(
            &item.label,
            radius * cfg.text_width_ratio,
            radius * cfg.text_height_ratio,
            ctx.font_fit,
            ctx.measure,
        );
        log::trace!(
            "bubble '{}' r={:.1} at ({:.1}, {:.1}) font {}",
            item.label,
            radius,
            circle.cx,
            circle.cy,
            font_size
        );

        bubbles.push(PlacedBubble {
            item: item.clone(),
            circle,
            font_size,
            color,
            fallback,
        });
    }

    BubbleCloudLayout {
        width,
        height,
        bubbles,
    }
}

// Non-finite weights pack like a zero weight.
fn packing_weight(item: &Item) -> f32 {
    if item.weight.is_finite() { item.weight } else { 0.0 }
}

/// Linear in weight, shared by every bubble of one pass.
pub(super) fn scaled_radius(weight: f32, max_weight: f32, cfg: &BubbleConfig) -> f32 {
    let ratio = if max_weight > 0.0 {
        (weight / max_weight).max(0.0)
    } else {
        0.0
    };
    cfg.min_radius + ratio * (cfg.max_radius - cfg.min_radius)
}

fn best_candidate(
    placed: &[PlacedBubble],
    radius: f32,
    width: f32,
    height: f32,
    cfg: &BubbleConfig,
) -> Option<Circle> {
    let samples = cfg.angle_samples.max(1);
    let threshold = -radius * cfg.overlap_tolerance;
    let mut best: Option<(Circle, f32)> = None;

    for anchor in placed {
        let reach = anchor.circle.r + radius * cfg.contact_factor;
        for step in 0..samples {
            let angle = step as f32 * 2.0 * PI / samples as f32;
            let candidate = Circle {
                cx: anchor.circle.cx + angle.cos() * reach,
                cy: anchor.circle.cy + angle.sin() * reach,
                r: radius,
            };
            if !candidate.inside(width, height) {
                continue;
            }
            let gap = placed
                .iter()
                .map(|other| other.circle.rim_distance(candidate.cx, candidate.cy))
                .fold(f32::INFINITY, f32::min);
            if gap <= threshold {
                continue;
            }
            if best.is_none_or(|(_, best_gap)| gap < best_gap) {
                best = Some((candidate, gap));
            }
        }
    }

    best.map(|(circle, _)| circle)
}

fn random_circle(radius: f32, width: f32, height: f32, random: &mut dyn RandomSource) -> Circle {
    let axis = |extent: f32, unit: f32| {
        let span = extent - radius * 2.0;
        if span > 0.0 {
            unit * span + radius
        } else {
            extent / 2.0
        }
    };
    let cx = axis(width, random.next_unit());
    let cy = axis(height, random.next_unit());
    Circle { cx, cy, r: radius }
}
