use crate::color::{ColorSource, OsRandom, RandomSource};
use crate::config::Config;
use crate::hover::{Tooltip, hit_test, tooltip_for};
use crate::ir::{CloudKind, Item};
use crate::layout::text::TextMeasure;
use crate::layout::{CloudLayout, compute_layout_with_measure, default_colors, default_measure};
use crate::render::{DrawContext, draw_cloud, render_svg};

/// A cloud widget bound to one canvas.
///
/// Owns the placement list. Data and size changes rebuild it from scratch;
/// pointer events only re-derive which element is hovered.
pub struct Surface {
    kind: CloudKind,
    items: Vec<Item>,
    width: f32,
    height: f32,
    config: Config,
    measure: Box<dyn TextMeasure>,
    colors: Box<dyn ColorSource>,
    random: Box<dyn RandomSource>,
    layout: CloudLayout,
    hovered: Option<usize>,
    pointer: (f32, f32),
}

impl Surface {
    pub fn new(kind: CloudKind, items: Vec<Item>, width: f32, height: f32, config: Config) -> Self {
        let colors = default_colors(kind, &config.theme);
        let measure = Box::new(default_measure(kind, &config.theme, &config.layout));
        Self::with_sources(kind, items, width, height, config, measure, colors, Box::new(OsRandom))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_sources(
        kind: CloudKind,
        items: Vec<Item>,
        width: f32,
        height: f32,
        config: Config,
        measure: Box<dyn TextMeasure>,
        colors: Box<dyn ColorSource>,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let mut surface = Self {
            kind,
            items,
            width,
            height,
            config,
            measure,
            colors,
            random,
            layout: CloudLayout::empty(kind, 0.0, 0.0),
            hovered: None,
            pointer: (0.0, 0.0),
        };
        surface.relayout();
        surface
    }

    pub fn kind(&self) -> CloudKind {
        self.kind
    }

    pub fn layout(&self) -> &CloudLayout {
        &self.layout
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.relayout();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.relayout();
    }

    /// Updates hover state for a pointer at `(x, y)` in canvas pixels.
    /// Returns true when the hovered element changed and a redraw is due.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.pointer = (x, y);
        let hit = hit_test(&self.layout, x, y);
        let changed = hit != self.hovered;
        self.hovered = hit;
        changed
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let index = self.hovered?;
        tooltip_for(
            &self.layout,
            index,
            self.pointer,
            self.config.render.tooltip_offset,
        )
    }

    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        let tooltip = self.tooltip();
        draw_cloud(
            ctx,
            &self.layout,
            self.hovered,
            tooltip.as_ref(),
            &self.config.theme,
            &self.config.render,
        );
    }

    pub fn to_svg(&self) -> String {
        let tooltip = self.tooltip();
        render_svg(
            &self.layout,
            self.hovered,
            tooltip.as_ref(),
            &self.config.theme,
            &self.config.render,
        )
    }

    fn relayout(&mut self) {
        self.layout = compute_layout_with_measure(
            self.kind,
            &self.items,
            self.width,
            self.height,
            &self.config.layout,
            self.measure.as_ref(),
            self.colors.as_mut(),
            self.random.as_mut(),
        );
        // Old indices point into the discarded placement list.
        self.hovered = None;
        log::debug!(
            "{} layout: {} elements on {}x{}",
            self.kind.as_str(),
            self.layout.len(),
            self.width,
            self.height
        );
    }
}
