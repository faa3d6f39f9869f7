use serde::Serialize;

use crate::ir::{CloudKind, Item};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Touching edges count as a collision.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.y + self.height < other.y
            || self.y > other.y + other.height)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

impl Circle {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        (px - self.cx).hypot(py - self.cy) <= self.r
    }

    /// Distance from `(px, py)` to this circle's rim; negative inside.
    pub fn rim_distance(&self, px: f32, py: f32) -> f32 {
        (px - self.cx).hypot(py - self.cy) - self.r
    }

    pub fn inside(&self, width: f32, height: f32) -> bool {
        self.cx - self.r >= 0.0
            && self.cx + self.r <= width
            && self.cy - self.r >= 0.0
            && self.cy + self.r <= height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    pub item: Item,
    pub bounds: Rect,
    pub font_size: f32,
    pub color: String,
    /// The spiral ran out before a free spot was found; the label may overlap.
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBubble {
    pub item: Item,
    pub circle: Circle,
    pub font_size: f32,
    pub color: String,
    /// Placed at a random position after every candidate was rejected.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudLayout {
    pub width: f32,
    pub height: f32,
    pub labels: Vec<PlacedLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleCloudLayout {
    pub width: f32,
    pub height: f32,
    pub bubbles: Vec<PlacedBubble>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CloudLayout {
    Words(WordCloudLayout),
    Bubbles(BubbleCloudLayout),
}

impl CloudLayout {
    pub fn empty(kind: CloudKind, width: f32, height: f32) -> Self {
        match kind {
            CloudKind::Words => CloudLayout::Words(WordCloudLayout {
                width,
                height,
                labels: Vec::new(),
            }),
            CloudKind::Bubbles => CloudLayout::Bubbles(BubbleCloudLayout {
                width,
                height,
                bubbles: Vec::new(),
            }),
        }
    }

    pub fn kind(&self) -> CloudKind {
        match self {
            CloudLayout::Words(_) => CloudKind::Words,
            CloudLayout::Bubbles(_) => CloudKind::Bubbles,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        match self {
            CloudLayout::Words(layout) => (layout.width, layout.height),
            CloudLayout::Bubbles(layout) => (layout.width, layout.height),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CloudLayout::Words(layout) => layout.labels.len(),
            CloudLayout::Bubbles(layout) => layout.bubbles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item and fill color of the element at `index`, in storage order.
    pub fn element(&self, index: usize) -> Option<(&Item, &str)> {
        match self {
            CloudLayout::Words(layout) => layout
                .labels
                .get(index)
                .map(|label| (&label.item, label.color.as_str())),
            CloudLayout::Bubbles(layout) => layout
                .bubbles
                .get(index)
                .map(|bubble| (&bubble.item, bubble.color.as_str())),
        }
    }
}
