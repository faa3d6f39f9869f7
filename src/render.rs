use crate::config::RenderConfig;
use crate::hover::Tooltip;
use crate::layout::text::{CharWidthMeasure, TextMeasure};
use crate::layout::{BubbleCloudLayout, CloudLayout, WordCloudLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub color: String,
    pub blur: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle<'a> {
    pub font_family: &'a str,
    pub font_size: f32,
    pub bold: bool,
    pub color: &'a str,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    pub shadow: Option<Shadow>,
}

/// Immediate-mode 2D drawing surface.
pub trait DrawContext {
    fn clear(&mut self, width: f32, height: f32, background: &str);
    #[allow(clippy::too_many_arguments)]
    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: &str,
        stroke: Option<&str>,
        radius: f32,
    );
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, fill: &str, stroke: Option<&str>);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle<'_>);
}

/// Records drawing calls as SVG elements.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    width: f32,
    height: f32,
    body: String,
    shadows: Vec<Shadow>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn shadow_id(&mut self, shadow: &Shadow) -> usize {
        if let Some(idx) = self.shadows.iter().position(|known| known == shadow) {
            return idx;
        }
        self.shadows.push(shadow.clone());
        self.shadows.len() - 1
    }

    pub fn finish(self) -> String {
        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        ));
        if !self.shadows.is_empty() {
            svg.push_str("<defs>");
            for (idx, shadow) in self.shadows.iter().enumerate() {
                svg.push_str(&format!(
                    "<filter id=\"shadow-{idx}\" x=\"-20%\" y=\"-20%\" width=\"140%\" height=\"140%\"><feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"{:.2}\" flood-color=\"{}\"/></filter>",
                    shadow.blur / 2.0,
                    escape_xml(&shadow.color)
                ));
            }
            svg.push_str("</defs>");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }
}

impl DrawContext for SvgCanvas {
    fn clear(&mut self, width: f32, height: f32, background: &str) {
        self.width = width;
        self.height = height;
        self.body.clear();
        self.body.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(background)
        ));
    }

    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: &str,
        stroke: Option<&str>,
        radius: f32,
    ) {
        let stroke_attr = stroke
            .map(|color| format!(" stroke=\"{}\" stroke-width=\"1\"", escape_xml(color)))
            .unwrap_or_default();
        self.body.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{radius}\" ry=\"{radius}\" fill=\"{}\"{stroke_attr}/>",
            escape_xml(fill)
        ));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, fill: &str, stroke: Option<&str>) {
        let stroke_attr = stroke
            .map(|color| format!(" stroke=\"{}\" stroke-width=\"3\"", escape_xml(color)))
            .unwrap_or_default();
        self.body.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{}\"{stroke_attr}/>",
            escape_xml(fill)
        ));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle<'_>) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let baseline = match style.baseline {
            Baseline::Alphabetic => "alphabetic",
            Baseline::Middle => "central",
        };
        let weight = if style.bold { " font-weight=\"bold\"" } else { "" };
        let filter = match &style.shadow {
            Some(shadow) => format!(" filter=\"url(#shadow-{})\"", self.shadow_id(shadow)),
            None => String::new(),
        };
        self.body.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" dominant-baseline=\"{baseline}\" font-family=\"{}\" font-size=\"{}\"{weight} fill=\"{}\"{filter}>{}</text>",
            escape_xml(style.font_family),
            style.font_size,
            escape_xml(style.color),
            escape_xml(text)
        ));
    }
}

/// Draws a full frame: cloud, hover highlight, then the tooltip on top.
pub fn draw_cloud(
    ctx: &mut dyn DrawContext,
    layout: &CloudLayout,
    hovered: Option<usize>,
    tooltip: Option<&Tooltip>,
    theme: &Theme,
    render: &RenderConfig,
) {
    let (width, height) = layout.size();
    ctx.clear(width, height, &theme.background);
    match layout {
        CloudLayout::Words(words) => draw_words(ctx, words, hovered, theme),
        CloudLayout::Bubbles(bubbles) => draw_bubbles(ctx, bubbles, hovered, theme),
    }
    if let Some(tooltip) = tooltip {
        draw_tooltip(ctx, tooltip, theme, render);
    }
}

fn draw_words(
    ctx: &mut dyn DrawContext,
    layout: &WordCloudLayout,
    hovered: Option<usize>,
    theme: &Theme,
) {
    for (idx, label) in layout.labels.iter().enumerate() {
        let is_hovered = hovered == Some(idx);
        let (color, shadow) = if is_hovered {
            (theme.hover_text_color.as_str(), Shadow {
                color: theme.hover_shadow_color.clone(),
                blur: 5.0,
            })
        } else {
            (label.color.as_str(), Shadow {
                color: theme.shadow_color.clone(),
                blur: 2.0,
            })
        };
        let style = TextStyle {
            font_family: &theme.font_family,
            font_size: label.font_size,
            bold: false,
            color,
            anchor: TextAnchor::Start,
            baseline: Baseline::Alphabetic,
            shadow: Some(shadow),
        };
        ctx.fill_text(
            &label.item.label,
            label.bounds.x,
            label.bounds.y + label.font_size,
            &style,
        );
    }
}

fn draw_bubbles(
    ctx: &mut dyn DrawContext,
    layout: &BubbleCloudLayout,
    hovered: Option<usize>,
    theme: &Theme,
) {
    for (idx, bubble) in layout.bubbles.iter().enumerate() {
        let outline = (hovered == Some(idx)).then_some(theme.hover_outline_color.as_str());
        let circle = bubble.circle;
        ctx.fill_circle(circle.cx, circle.cy, circle.r, &bubble.color, outline);
        let style = TextStyle {
            font_family: &theme.bubble_font_family,
            font_size: bubble.font_size,
            bold: true,
            color: &theme.bubble_text_color,
            anchor: TextAnchor::Middle,
            baseline: Baseline::Middle,
            shadow: None,
        };
        ctx.fill_text(&bubble.item.label, circle.cx, circle.cy, &style);
    }
}

fn draw_tooltip(
    ctx: &mut dyn DrawContext,
    tooltip: &Tooltip,
    theme: &Theme,
    render: &RenderConfig,
) {
    let font_size = theme.tooltip_font_size;
    let line_height = font_size * 1.4;
    let padding = render.tooltip_padding;
    let measure = CharWidthMeasure::default();
    let body: Vec<&str> = tooltip.body_lines().collect();

    let content_width = body
        .iter()
        .map(|line| measure.text_width(line, font_size))
        .fold(CharWidthMeasure { bold: true }.text_width(&tooltip.title, font_size), f32::max);
    let width = (content_width + padding * 2.0).max(render.tooltip_min_width);
    let height = padding * 2.0 + line_height * (1 + body.len()) as f32;

    ctx.fill_rect(
        tooltip.x,
        tooltip.y,
        width,
        height,
        &theme.tooltip_background,
        Some(&theme.tooltip_border),
        8.0,
    );
    let mut baseline = tooltip.y + padding + font_size;
    let title_style = TextStyle {
        font_family: &theme.font_family,
        font_size,
        bold: true,
        color: &tooltip.color,
        anchor: TextAnchor::Start,
        baseline: Baseline::Alphabetic,
        shadow: None,
    };
    ctx.fill_text(&tooltip.title, tooltip.x + padding, baseline, &title_style);
    let body_style = TextStyle {
        font_family: "monospace",
        bold: false,
        color: &theme.tooltip_text_color,
        ..title_style
    };
    for line in body {
        baseline += line_height;
        // Leading spaces collapse in SVG text, so keep indentation visible.
        let line = line.replace(' ', "\u{a0}");
        ctx.fill_text(&line, tooltip.x + padding, baseline, &body_style);
    }
}

pub fn render_svg(
    layout: &CloudLayout,
    hovered: Option<usize>,
    tooltip: Option<&Tooltip>,
    theme: &Theme,
    render: &RenderConfig,
) -> String {
    let mut canvas = SvgCanvas::new();
    draw_cloud(&mut canvas, layout, hovered, tooltip, theme, render);
    canvas.finish()
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(family) = theme.font_family.split(',').next() {
        opt.font_family = family.trim().trim_matches('\'').trim_matches('"').to_string();
    }
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid canvas size {}x{}",
            render_cfg.width,
            render_cfg.height
        )
    })?;
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    opt.fontdb = std::sync::Arc::new(fontdb);

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(
    _svg: &str,
    _output: &Path,
    _render_cfg: &RenderConfig,
    _theme: &Theme,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Item;
    use crate::layout::{Circle, PlacedBubble, PlacedLabel, Rect};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DrawContext for Recorder {
        fn clear(&mut self, width: f32, height: f32, _background: &str) {
            self.calls.push(format!("clear {width}x{height}"));
        }
        fn fill_rect(
            &mut self,
            _x: f32,
            _y: f32,
            _w: f32,
            _h: f32,
            fill: &str,
            _s: Option<&str>,
            _r: f32,
        ) {
            self.calls.push(format!("rect {fill}"));
        }
        fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, fill: &str, stroke: Option<&str>) {
            self.calls
                .push(format!("circle {cx},{cy},{r} {fill} {}", stroke.unwrap_or("-")));
        }
        fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle<'_>) {
            self.calls.push(format!("text {text} {x},{y} {}", style.color));
        }
    }

    fn word_layout() -> CloudLayout {
        CloudLayout::Words(WordCloudLayout {
            width: 800.0,
            height: 600.0,
            labels: vec![
                PlacedLabel {
                    item: Item::new("React", 40.0),
                    bounds: Rect::new(100.0, 100.0, 120.0, 40.0),
                    font_size: 40.0,
                    color: "#FF6B6B".to_string(),
                    exhausted: false,
                },
                PlacedLabel {
                    item: Item::new("Rust & <Canvas>", 20.0),
                    bounds: Rect::new(300.0, 100.0, 120.0, 20.0),
                    font_size: 20.0,
                    color: "#4D96FF".to_string(),
                    exhausted: false,
                },
            ],
        })
    }

    #[test]
    fn words_draw_at_baseline_and_hover_recolors() {
        let theme = Theme::classic();
        let mut recorder = Recorder::default();
        draw_cloud(&mut recorder, &word_layout(), Some(1), None, &theme, &RenderConfig::default());
        assert_eq!(recorder.calls[0], "clear 800x600");
        assert_eq!(recorder.calls[1], "text React 100,140 #FF6B6B");
        assert_eq!(
            recorder.calls[2],
            format!("text Rust & <Canvas> 300,120 {}", theme.hover_text_color)
        );
    }

    #[test]
    fn bubbles_draw_circle_then_label() {
        let layout = CloudLayout::Bubbles(BubbleCloudLayout {
            width: 400.0,
            height: 300.0,
            bubbles: vec![PlacedBubble {
                item: Item::new("joy", 10.0),
                circle: Circle {
                    cx: 200.0,
                    cy: 150.0,
                    r: 60.0,
                },
                font_size: 30.0,
                color: "#4ECDC4".to_string(),
                fallback: false,
            }],
        });
        let theme = Theme::classic();
        let mut recorder = Recorder::default();
        draw_cloud(&mut recorder, &layout, Some(0), None, &theme, &RenderConfig::default());
        assert_eq!(recorder.calls[1], "circle 200,150,60 #4ECDC4 #222222");
        assert_eq!(recorder.calls[2], "text joy 200,150 white");
    }

    #[test]
    fn svg_escapes_text_and_defines_shadows() {
        let svg = render_svg(
            &word_layout(),
            None,
            None,
            &Theme::classic(),
            &RenderConfig::default(),
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Rust &amp; &lt;Canvas&gt;"));
        assert!(svg.contains("<filter id=\"shadow-0\""));
        assert!(!svg.contains("shadow-1"));
    }

    #[test]
    fn tooltip_draws_card_and_metadata_lines() {
        let tooltip = Tooltip {
            title: "React".to_string(),
            color: "#FF6B6B".to_string(),
            body: "{\n  \"type\": \"framework\"\n}".to_string(),
            x: 110.0,
            y: 110.0,
        };
        let mut recorder = Recorder::default();
        draw_cloud(
            &mut recorder,
            &word_layout(),
            Some(0),
            Some(&tooltip),
            &Theme::classic(),
            &RenderConfig::default(),
        );
        let tail = &recorder.calls[3..];
        assert!(tail[0].starts_with("rect"));
        assert!(tail[1].starts_with("text React"));
        assert_eq!(tail.len(), 5);
    }
}
