//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (levels by index, tiles by slot)
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;
pub mod track;

pub use state::{
    AnswerTile, GameEvent, GameState, LevelGroup, Player, SessionPhase, TileState,
};
pub use tick::{Steer, TickInput, tick};
pub use track::LevelTrack;
