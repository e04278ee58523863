use crate::{
    error::{EmberfarmError, EmberfarmResult},
    timeline::Timeline,
};

/// Number of discrete intensity levels (level 0 plus four positive buckets).
pub const LEVELS: usize = 5;

/// Geometry, palette, and timing for the farm scene. One immutable record per
/// render; defaults reproduce the stock card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    pub cell: f64,
    pub gap: f64,
    pub pad_x: f64,
    pub pad_y: f64,
    /// Forces a minimum canvas width in weeks; 0 keeps the calendar's own width.
    pub min_weeks: usize,
    pub greens: [String; LEVELS],
    pub burns: [String; LEVELS],
    pub glow_width: f64,
    pub timeline: Timeline,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cell: 12.0,
            gap: 3.0,
            pad_x: 36.0,
            pad_y: 28.0,
            min_weeks: 0,
            greens: [
                "#161b22".to_string(),
                "#0e4429".to_string(),
                "#006d32".to_string(),
                "#26a641".to_string(),
                "#39d353".to_string(),
            ],
            burns: [
                "#0e1319".to_string(),
                "#10151b".to_string(),
                "#11161c".to_string(),
                "#12171d".to_string(),
                "#13181e".to_string(),
            ],
            glow_width: 52.0,
            timeline: Timeline::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> EmberfarmResult<()> {
        if self.cell <= 0.0 {
            return Err(EmberfarmError::validation("cell size must be > 0"));
        }
        if self.gap < 0.0 {
            return Err(EmberfarmError::validation("gap must be >= 0"));
        }
        if self.glow_width <= 0.0 {
            return Err(EmberfarmError::validation("glow_width must be > 0"));
        }
        for color in self.greens.iter().chain(self.burns.iter()) {
            if color.trim().is_empty() {
                return Err(EmberfarmError::validation("palette colors must be non-empty"));
            }
        }
        self.timeline.validate()
    }

    pub fn step(&self) -> f64 {
        self.cell + self.gap
    }

    pub fn grid(&self, week_count: usize) -> GridGeometry {
        let weeks = week_count.max(self.min_weeks);
        GridGeometry {
            weeks,
            width: (weeks as f64 * self.step() - self.gap).max(0.0),
            height: 7.0 * self.step() - self.gap,
        }
    }
}

/// Derived day-grid dimensions, shared read-only by the composers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    pub weeks: usize,
    pub width: f64,
    pub height: f64,
}

/// Geometry for the stack panel's tile grid.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelConfig {
    pub tile_size: f64,
    pub tile_gap: f64,
    pub tile_radius: f64,
    pub icon_box: f64,
    pub pad_x: f64,
    pub section_gap: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            tile_size: 56.0,
            tile_gap: 12.0,
            tile_radius: 14.0,
            icon_box: 30.0,
            pad_x: 36.0,
            section_gap: 18.0,
        }
    }
}

impl PanelConfig {
    pub fn validate(&self) -> EmberfarmResult<()> {
        if self.tile_size <= 0.0 {
            return Err(EmberfarmError::validation("tile_size must be > 0"));
        }
        if self.tile_gap < 0.0 {
            return Err(EmberfarmError::validation("tile_gap must be >= 0"));
        }
        if self.icon_box <= 0.0 || self.icon_box > self.tile_size {
            return Err(EmberfarmError::validation(
                "icon_box must fit inside the tile",
            ));
        }
        Ok(())
    }

    /// Columns that fit a width budget, never fewer than one.
    pub fn columns_for(&self, available_width: f64) -> usize {
        let fit = ((available_width + self.tile_gap) / (self.tile_size + self.tile_gap)).floor();
        (fit as usize).max(1)
    }
}
