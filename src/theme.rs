use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub bubble_font_family: String,
    pub background: String,
    pub border_color: String,
    pub word_colors: Vec<String>,
    pub bubble_colors: Vec<String>,
    pub bubble_text_color: String,
    pub hover_text_color: String,
    pub hover_outline_color: String,
    pub shadow_color: String,
    pub hover_shadow_color: String,
    pub tooltip_background: String,
    pub tooltip_border: String,
    pub tooltip_text_color: String,
    pub tooltip_font_size: f32,
}

fn colors(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "'Segoe UI', sans-serif".to_string(),
            bubble_font_family: "Arial, sans-serif".to_string(),
            background: "#FAFAFA".to_string(),
            border_color: "#EEEEEE".to_string(),
            word_colors: colors(&[
                "#FF6B6B", "#6BCB77", "#4D96FF", "#F7B801", "#A66DD4", "#FF922B",
            ]),
            bubble_colors: colors(&[
                "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F06292", "#7986CB",
                "#9575CD", "#64B5F6", "#81C784", "#FFD54F", "#BA68C8",
            ]),
            bubble_text_color: "white".to_string(),
            hover_text_color: "#222222".to_string(),
            hover_outline_color: "#222222".to_string(),
            shadow_color: "rgba(0,0,0,0.2)".to_string(),
            hover_shadow_color: "rgba(0,0,0,0.3)".to_string(),
            tooltip_background: "#FFFFFF".to_string(),
            tooltip_border: "#DDDDDD".to_string(),
            tooltip_text_color: "#333333".to_string(),
            tooltip_font_size: 14.0,
        }
    }

    /// Muted palette matching the sentiment dashboard (positive/neutral/negative first).
    pub fn pastel() -> Self {
        Self {
            font_family: "Inter, 'Segoe UI', system-ui, sans-serif".to_string(),
            bubble_font_family: "Inter, Arial, sans-serif".to_string(),
            background: "#F5F5F5".to_string(),
            border_color: "#E5E7EB".to_string(),
            word_colors: colors(&[
                "#34D399", "#FBBF24", "#EF4444", "#60A5FA", "#A78BFA", "#F472B6",
            ]),
            bubble_colors: colors(&[
                "#4CAF50", "#FFC107", "#F44336", "#60A5FA", "#8884D8", "#82CA9D", "#FFC658",
                "#FF8042", "#0088FE", "#00C49F",
            ]),
            bubble_text_color: "white".to_string(),
            hover_text_color: "#1F2937".to_string(),
            hover_outline_color: "#1F2937".to_string(),
            shadow_color: "rgba(0,0,0,0.15)".to_string(),
            hover_shadow_color: "rgba(0,0,0,0.3)".to_string(),
            tooltip_background: "#FFFFFF".to_string(),
            tooltip_border: "#D1D5DB".to_string(),
            tooltip_text_color: "#1F2937".to_string(),
            tooltip_font_size: 13.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
