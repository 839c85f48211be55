//! Generation settings: model variant, aspect ratio, and tuning knobs.

use serde::{Deserialize, Serialize};

/// Which provider workflow a task uses.
///
/// `RunwayActTwo` is a single remote call; `SeedreamKling` chains an
/// image edit (Seedream 4 Edit) into a video synthesis (Kling 2.5 Pro).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    #[default]
    RunwayActTwo,
    SeedreamKling,
}

impl ModelVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::RunwayActTwo => "runway_act_two",
            ModelVariant::SeedreamKling => "seedream_kling",
        }
    }

    /// Whether this variant runs the two-step pipeline.
    pub fn is_two_step(&self) -> bool {
        matches!(self, ModelVariant::SeedreamKling)
    }
}

/// Output aspect ratios, in Freepik's `width:height` wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1280:720")]
    Widescreen16x9,
    #[serde(rename = "720:1280")]
    Portrait9x16,
    #[serde(rename = "1104:832")]
    Landscape4x3,
    #[serde(rename = "832:1104")]
    Portrait3x4,
    #[serde(rename = "960:960")]
    Square1x1,
    #[serde(rename = "1584:672")]
    Ultrawide21x9,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Widescreen16x9 => "1280:720",
            AspectRatio::Portrait9x16 => "720:1280",
            AspectRatio::Landscape4x3 => "1104:832",
            AspectRatio::Portrait3x4 => "832:1104",
            AspectRatio::Square1x1 => "960:960",
            AspectRatio::Ultrawide21x9 => "1584:672",
        }
    }
}

/// Caller-supplied knobs for a generation task.
///
/// Field defaults match the original client contract; `seed` is bounded
/// by its type (unsigned 32-bit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default)]
    pub model: ModelVariant,
    #[serde(default)]
    pub ratio: AspectRatio,
    #[serde(default = "default_expression_intensity")]
    pub expression_intensity: u8,
    #[serde(default = "default_body_control")]
    pub body_control: bool,
    #[serde(default)]
    pub seed: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: ModelVariant::default(),
            ratio: AspectRatio::default(),
            expression_intensity: default_expression_intensity(),
            body_control: default_body_control(),
            seed: None,
        }
    }
}

fn default_expression_intensity() -> u8 {
    3
}

fn default_body_control() -> bool {
    true
}
