use crate::foundation::error::{ChalkError, ChalkResult};

pub use kurbo::{Point, Vec2};

/// Straight-alpha RGBA8 color.
pub type Rgba8 = [u8; 4];

/// Chalkboard palette shared by the shipped choreographies.
pub mod palette {
    use super::Rgba8;

    pub const BLUE: Rgba8 = [88, 196, 221, 255];
    pub const RED: Rgba8 = [252, 98, 85, 255];
    pub const YELLOW: Rgba8 = [255, 255, 0, 255];
    pub const GREEN: Rgba8 = [131, 193, 103, 255];
    pub const ORANGE: Rgba8 = [255, 134, 47, 255];
    pub const WHITE: Rgba8 = [255, 255, 255, 255];
    pub const LIGHT_GRAY: Rgba8 = [187, 187, 187, 255];
    pub const GRAY: Rgba8 = [129, 129, 129, 255];
}

/// Stroke and fill styling shared by every drawable shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Stroke (and fill) color as straight-alpha RGBA8.
    pub color_rgba8: Rgba8,
    /// Stroke width in scene units.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Fill opacity in `[0, 1]`; `0` means stroke-only.
    #[serde(default)]
    pub fill_opacity: f64,
}

fn default_stroke_width() -> f64 {
    2.0
}

impl Default for Style {
    fn default() -> Self {
        Self::stroke(palette::WHITE)
    }
}

impl Style {
    /// Stroke-only style with the default width.
    pub fn stroke(color_rgba8: Rgba8) -> Self {
        Self {
            color_rgba8,
            stroke_width: default_stroke_width(),
            fill_opacity: 0.0,
        }
    }

    /// Replace the stroke width.
    pub fn with_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Replace the fill opacity.
    pub fn with_fill(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = fill_opacity;
        self
    }

    /// Validate style invariants.
    pub fn validate(&self) -> ChalkResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ChalkError::storyboard(
                "style stroke_width must be finite and >= 0",
            ));
        }
        if !self.fill_opacity.is_finite() || !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(ChalkError::storyboard(
                "style fill_opacity must be within [0, 1]",
            ));
        }
        Ok(())
    }
}
