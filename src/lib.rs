//! Quiz Jump - level-progression engine for a vertical quiz platformer
//!
//! Core modules:
//! - `questions`: Fixed trivia bank and per-level option shuffling
//! - `sim`: Deterministic simulation (level track, player physics, landing
//!   resolution, session state machine)
//! - `highscore`: Best-score persistence behind an injected store
//! - `settings`: Layout/tuning tiers (desktop vs touch)
//!
//! The crate owns gameplay state only. Rendering, particles and screens are
//! external collaborators: they feed [`sim::TickInput`] in, drive
//! [`sim::tick`] once per frame, and drain [`sim::GameEvent`]s out.

pub mod highscore;
pub mod questions;
pub mod settings;
pub mod sim;

pub use highscore::{BestScore, ScoreStore};
pub use questions::{QuestionBank, QuizItem};
pub use settings::{LayoutClass, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Reference playfield dimensions
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Ground platform surface (world Y, +Y is down)
    pub const GROUND_Y: f32 = 520.0;
    /// Ground platform width, centered on the playfield
    pub const GROUND_WIDTH: f32 = 280.0;
    /// Falling this far below the ground counts as a fall
    pub const FALL_MARGIN: f32 = 100.0;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY: f32 = 300.0;
    /// Player collision half-height (landing probe extent)
    pub const PLAYER_HALF_HEIGHT: f32 = 15.0;

    /// Vertical band above a tile top that accepts a landing
    pub const LANDING_BAND: f32 = 16.0;
    /// Ticks after a landing before the next jump is allowed
    pub const LANDING_COOLDOWN_TICKS: u32 = 1;

    /// Levels needed to finish a session
    pub const TOTAL_LEVELS: usize = 20;
    /// Levels materialized up front
    pub const INITIAL_LEVELS: usize = 20;
    /// Levels added per lazy track extension
    pub const EXTENSION_BATCH: usize = 5;
    /// Extra vertical gap between level rows, on top of the tile spacing tier
    pub const LEVEL_GAP: f32 = 80.0;

    /// How far below the visible area the player may trail before the
    /// scroll pressure counts them as left behind
    pub const LEFT_BEHIND_MARGIN: f32 = 40.0;

    /// Grace period between losing the last life and the game-over transition
    pub const GAME_OVER_GRACE_TICKS: u32 = 90;
}

/// Initialize console logging for browser embedders (call once at startup).
#[cfg(target_arch = "wasm32")]
pub fn init_console_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
