use crate::layout::CloudLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub kind: String,
    pub width: f32,
    pub height: f32,
    pub elements: Vec<ElementDump>,
}

/// Flattened view of one placement: a box for labels, a circle for bubbles.
#[derive(Debug, Serialize)]
pub struct ElementDump {
    pub label: String,
    pub weight: f32,
    pub color: String,
    pub font_size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle: Option<[f32; 3]>,
    /// Spiral exhausted for labels, random fallback for bubbles.
    pub degraded: bool,
}

impl LayoutDump {
    pub fn from_layout(layout: &CloudLayout) -> Self {
        let (width, height) = layout.size();
        let elements = match layout {
            CloudLayout::Words(words) => words
                .labels
                .iter()
                .map(|label| ElementDump {
                    label: label.item.label.clone(),
                    weight: label.item.weight,
                    color: label.color.clone(),
                    font_size: label.font_size,
                    rect: Some([
                        label.bounds.x,
                        label.bounds.y,
                        label.bounds.width,
                        label.bounds.height,
                    ]),
                    circle: None,
                    degraded: label.exhausted,
                })
                .collect(),
            CloudLayout::Bubbles(bubbles) => bubbles
                .bubbles
                .iter()
                .map(|bubble| ElementDump {
                    label: bubble.item.label.clone(),
                    weight: bubble.item.weight,
                    color: bubble.color.clone(),
                    font_size: bubble.font_size,
                    rect: None,
                    circle: Some([bubble.circle.cx, bubble.circle.cy, bubble.circle.r]),
                    degraded: bubble.fallback,
                })
                .collect(),
        };
        Self {
            kind: layout.kind().as_str().to_string(),
            width,
            height,
            elements,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &CloudLayout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
