#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod hover;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod surface;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig};
pub use hover::{Tooltip, hit_test};
pub use ir::{CloudKind, Item, SentimentReport};
pub use layout::{CloudLayout, compute_layout, compute_layout_with_measure};
pub use parser::{Dataset, DatasetError, parse_dataset};
pub use render::{DrawContext, SvgCanvas, render_svg};
pub use surface::Surface;
pub use theme::Theme;
