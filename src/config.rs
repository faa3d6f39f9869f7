use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralConfig {
    pub angle_step: f32,
    pub radius_step: f32,
    /// Search bound; labels that find no free spot before this radius are
    /// placed at their last tried position.
    pub max_radius: f32,
    pub font_scale: f32,
    pub min_font_size: f32,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            angle_step: 0.3,
            radius_step: 2.0,
            max_radius: 300.0,
            font_scale: 1.0,
            min_font_size: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleConfig {
    pub min_radius: f32,
    pub max_radius: f32,
    pub angle_samples: usize,
    pub contact_factor: f32,
    /// Fraction of the new radius a candidate may sink into its nearest neighbour.
    pub overlap_tolerance: f32,
    pub text_width_ratio: f32,
    pub text_height_ratio: f32,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            min_radius: 30.0,
            max_radius: 100.0,
            angle_samples: 16,
            contact_factor: 0.7,
            overlap_tolerance: 0.3,
            text_width_ratio: 1.6,
            text_height_ratio: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontFitConfig {
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub width_slack: f32,
}

impl Default for FontFitConfig {
    fn default() -> Self {
        Self {
            min_font_size: 12.0,
            max_font_size: 36.0,
            width_slack: 1.8,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub spiral: SpiralConfig,
    pub bubble: BubbleConfig,
    pub font_fit: FontFitConfig,
    /// Skip system font lookup and measure with the built-in width table.
    pub fast_text_metrics: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub tooltip_offset: f32,
    pub tooltip_padding: f32,
    pub tooltip_min_width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            tooltip_offset: 10.0,
            tooltip_padding: 12.0,
            tooltip_min_width: 150.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    bubble_font_family: Option<String>,
    background: Option<String>,
    word_colors: Option<Vec<String>>,
    bubble_colors: Option<Vec<String>>,
    bubble_text_color: Option<String>,
    hover_text_color: Option<String>,
    tooltip_background: Option<String>,
    tooltip_border: Option<String>,
    tooltip_font_size: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpiralConfigFile {
    angle_step: Option<f32>,
    radius_step: Option<f32>,
    max_radius: Option<f32>,
    font_scale: Option<f32>,
    min_font_size: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BubbleConfigFile {
    min_radius: Option<f32>,
    max_radius: Option<f32>,
    angle_samples: Option<usize>,
    contact_factor: Option<f32>,
    overlap_tolerance: Option<f32>,
    text_width_ratio: Option<f32>,
    text_height_ratio: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FontFitConfigFile {
    min_font_size: Option<f32>,
    max_font_size: Option<f32>,
    width_slack: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    word_cloud: Option<SpiralConfigFile>,
    bubble_cloud: Option<BubbleConfigFile>,
    font_fit: Option<FontFitConfigFile>,
    fast_text_metrics: Option<bool>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "pastel" => config.theme = Theme::pastel(),
            "default" | "classic" => config.theme = Theme::classic(),
            other => log::warn!("unknown theme '{other}', keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.bubble_font_family {
            theme.bubble_font_family = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.word_colors {
            theme.word_colors = v;
        }
        if let Some(v) = vars.bubble_colors {
            theme.bubble_colors = v;
        }
        if let Some(v) = vars.bubble_text_color {
            theme.bubble_text_color = v;
        }
        if let Some(v) = vars.hover_text_color {
            theme.hover_text_color = v;
        }
        if let Some(v) = vars.tooltip_background {
            theme.tooltip_background = v;
        }
        if let Some(v) = vars.tooltip_border {
            theme.tooltip_border = v;
        }
        if let Some(v) = vars.tooltip_font_size {
            theme.tooltip_font_size = v;
        }
    }

    if let Some(spiral) = parsed.word_cloud {
        let cfg = &mut config.layout.spiral;
        if let Some(v) = spiral.angle_step {
            cfg.angle_step = v;
        }
        if let Some(v) = spiral.radius_step {
            cfg.radius_step = v;
        }
        if let Some(v) = spiral.max_radius {
            cfg.max_radius = v;
        }
        if let Some(v) = spiral.font_scale {
            cfg.font_scale = v;
        }
        if let Some(v) = spiral.min_font_size {
            cfg.min_font_size = v;
        }
    }

    if let Some(bubble) = parsed.bubble_cloud {
        let cfg = &mut config.layout.bubble;
        if let Some(v) = bubble.min_radius {
            cfg.min_radius = v;
        }
        if let Some(v) = bubble.max_radius {
            cfg.max_radius = v;
        }
        if let Some(v) = bubble.angle_samples {
            cfg.angle_samples = v;
        }
        if let Some(v) = bubble.contact_factor {
            cfg.contact_factor = v;
        }
        if let Some(v) = bubble.overlap_tolerance {
            cfg.overlap_tolerance = v;
        }
        if let Some(v) = bubble.text_width_ratio {
            cfg.text_width_ratio = v;
        }
        if let Some(v) = bubble.text_height_ratio {
            cfg.text_height_ratio = v;
        }
    }

    if let Some(fit) = parsed.font_fit {
        let cfg = &mut config.layout.font_fit;
        if let Some(v) = fit.min_font_size {
            cfg.min_font_size = v;
        }
        if let Some(v) = fit.max_font_size {
            cfg.max_font_size = v;
        }
        if let Some(v) = fit.width_slack {
            cfg.width_slack = v;
        }
    }

    if let Some(v) = parsed.fast_text_metrics {
        config.layout.fast_text_metrics = v;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_constants() {
        let config = Config::default();
        assert_eq!(config.layout.spiral.max_radius, 300.0);
        assert_eq!(config.layout.bubble.overlap_tolerance, 0.3);
        assert_eq!(config.layout.bubble.angle_samples, 16);
        assert_eq!(config.layout.font_fit.max_font_size, 36.0);
        assert_eq!(config.render.width, 800.0);
    }

    #[test]
    fn overrides_layout_parameters() {
        let config = parse_config(
            r##"{
                "theme": "pastel",
                "themeVariables": { "fontFamily": "Inter", "bubbleColors": ["#111"] },
                "wordCloud": { "maxRadius": 450 },
                "bubbleCloud": { "overlapTolerance": 0.1, "angleSamples": 24 },
                "fontFit": { "minFontSize": 10 }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.font_family, "Inter");
        assert_eq!(config.theme.bubble_colors, vec!["#111".to_string()]);
        assert_eq!(config.theme.background, Theme::pastel().background);
        assert_eq!(config.layout.spiral.max_radius, 450.0);
        assert_eq!(config.layout.spiral.angle_step, 0.3);
        assert_eq!(config.layout.bubble.overlap_tolerance, 0.1);
        assert_eq!(config.layout.bubble.angle_samples, 24);
        assert_eq!(config.layout.font_fit.min_font_size, 10.0);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_config("{ not json").is_err());
    }
}
