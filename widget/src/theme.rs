use wheel_core::{AnimationConfig, Prize};

/// Default slice palette, cycled when a prize carries no color.
pub const DEFAULT_SEGMENT_COLORS: [&str; 8] = [
    "#EE4040", "#F0CF50", "#815CD1", "#3DA5E0", "#34A24F", "#F9AA1F", "#EC3F3F", "#FF9000",
];

/// Cosmetic knobs only; nothing here is part of the engine contract.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelTheme {
    pub size: u32,
    pub spin_up_ms: u32,
    pub spin_down_ms: u32,
    pub accent_color: String,
    pub text_color: String,
}

impl Default for WheelTheme {
    fn default() -> Self {
        Self {
            size: 240,
            spin_up_ms: 200,
            spin_down_ms: 1100,
            accent_color: "#6d28d9".to_string(),
            text_color: "#ffffff".to_string(),
        }
    }
}

impl WheelTheme {
    pub fn animation(&self) -> AnimationConfig {
        AnimationConfig {
            spin_up_ms: self.spin_up_ms,
            spin_down_ms: self.spin_down_ms,
            ..AnimationConfig::default()
        }
    }
}

pub fn segment_color(prize: &Prize, index: usize) -> String {
    prize
        .color
        .clone()
        .unwrap_or_else(|| DEFAULT_SEGMENT_COLORS[index % DEFAULT_SEGMENT_COLORS.len()].to_string())
}
