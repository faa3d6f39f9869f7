use serde::Serialize;

use crate::layout::CloudLayout;

/// Index into the placement list of the first element under the pointer.
///
/// Labels hit inclusively on their box, bubbles when the pointer is within
/// the radius of the center. Storage order decides between overlapping hits.
pub fn hit_test(layout: &CloudLayout, x: f32, y: f32) -> Option<usize> {
    match layout {
        CloudLayout::Words(words) => words
            .labels
            .iter()
            .position(|label| label.bounds.contains(x, y)),
        CloudLayout::Bubbles(bubbles) => bubbles
            .bubbles
            .iter()
            .position(|bubble| bubble.circle.contains(x, y)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub color: String,
    /// Metadata pretty-printed as JSON; empty when the item has none.
    pub body: String,
    pub x: f32,
    pub y: f32,
}

impl Tooltip {
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines()
    }
}

pub fn tooltip_for(
    layout: &CloudLayout,
    index: usize,
    pointer: (f32, f32),
    offset: f32,
) -> Option<Tooltip> {
    let (item, color) = layout.element(index)?;
    let body = if item.metadata.is_empty() {
        String::new()
    } else {
        // Map<String, Value> always serializes.
        serde_json::to_string_pretty(&item.metadata).unwrap_or_default()
    };
    Some(Tooltip {
        title: item.label.clone(),
        color: color.to_string(),
        body,
        x: pointer.0 + offset,
        y: pointer.1 + offset,
    })
}
