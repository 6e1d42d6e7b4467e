//! Gameplay tuning tiers
//!
//! Two parameter sets: desktop (keyboard) and touch-class layouts. Touch
//! layouts get a higher jump and wider level spacing so tiles stay reachable
//! under coarser input.

use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_GAP, VIEW_HEIGHT, VIEW_WIDTH};

/// Input/layout class the session was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutClass {
    #[default]
    Desktop,
    Touch,
}

impl LayoutClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutClass::Desktop => "Desktop",
            LayoutClass::Touch => "Touch",
        }
    }
}

/// Gameplay tuning for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub layout: LayoutClass,
    /// Horizontal run speed (pixels/s)
    pub player_speed: f32,
    /// Jump impulse (pixels/s, negative = up)
    pub jump_velocity: f32,
    /// Base vertical spacing between level rows (layout tier)
    pub tile_spacing: f32,
    /// Upward camera scroll per tick once the run has started
    pub auto_scroll_speed: f32,
    /// Starting lives
    pub lives: u8,
    /// Points per correct answer
    pub points_per_correct: u64,
    /// Playfield dimensions the layout was computed for
    pub view_width: f32,
    pub view_height: f32,
    /// Answer tile collision extents
    pub tile_width: f32,
    pub tile_height: f32,
    /// Player center height above a surface it stands on
    pub landing_offset: f32,
}

impl Tuning {
    pub fn desktop() -> Self {
        Self {
            layout: LayoutClass::Desktop,
            player_speed: 200.0,
            jump_velocity: -450.0,
            tile_spacing: 180.0,
            auto_scroll_speed: 0.8,
            lives: 3,
            points_per_correct: 10,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            tile_width: 140.0,
            tile_height: 60.0,
            landing_offset: 38.0,
        }
    }

    pub fn touch() -> Self {
        Self {
            layout: LayoutClass::Touch,
            jump_velocity: -600.0,
            tile_spacing: 280.0,
            tile_width: 180.0,
            tile_height: 85.0,
            landing_offset: 45.0,
            ..Self::desktop()
        }
    }

    pub fn for_layout(layout: LayoutClass) -> Self {
        match layout {
            LayoutClass::Desktop => Self::desktop(),
            LayoutClass::Touch => Self::touch(),
        }
    }

    /// Vertical distance between consecutive level rows
    pub fn level_spacing(&self) -> f32 {
        self.tile_spacing + LEVEL_GAP
    }

    /// Horizontal center of one of the four tile slots
    pub fn tile_slot_x(&self, slot: usize) -> f32 {
        let (spacing, start) = match self.layout {
            LayoutClass::Desktop => {
                let s = self.view_width / 5.0;
                (s, s)
            }
            LayoutClass::Touch => {
                let s = self.view_width / 5.2;
                (s, s * 0.8)
            }
        };
        start + spacing * slot as f32
    }

    /// Horizontal clamp for the player center
    pub fn player_bounds(&self) -> (f32, f32) {
        let margin: f32 = match self.layout {
            LayoutClass::Desktop => 30.0,
            LayoutClass::Touch => 40.0,
        };
        let left = margin.max(25.0);
        (left, self.view_width - left)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::desktop()
    }
}
