//! Game state and core simulation types
//!
//! All session state lives here; mutation happens exclusively inside
//! [`super::tick`] (single writer). Presentation reads derived fields and
//! drains the event queue.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::track::LevelTrack;
use crate::consts::*;
use crate::questions::QuestionBank;
use crate::settings::Tuning;

/// Session phase. `Completed` and `GameOver` are absorbing: once entered, the
/// simulation stops accepting updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// All levels solved
    Completed,
    /// Lives exhausted
    GameOver,
}

/// Lifecycle of one answer tile.
///
/// A single enum instead of destroyed/solid flag pairs, so a tile can never
/// be both broken and standable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TileState {
    /// Not yet resolved; landing on it answers the question
    #[default]
    Unsolved,
    /// Wrong tile broken by a landing; no longer collidable
    Destroyed,
    /// Promoted to permanent floor after its row was solved
    SolvedFloor,
}

/// One of the four answer tiles in a level row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerTile {
    pub text: String,
    pub is_correct: bool,
    /// Set on the first landing that resolved this tile
    pub has_been_hit: bool,
    pub state: TileState,
    /// While true, the floor collider is logically disabled so the player can
    /// re-ascend through a completed row from below
    pub allow_pass_through: bool,
    /// Tile center
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl AnswerTile {
    pub fn left(&self) -> f32 {
        self.pos.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == TileState::Destroyed
    }

    pub fn is_solid_platform(&self) -> bool {
        self.state == TileState::SolvedFloor
    }
}

/// The four answer tiles belonging to one question, sharing a vertical anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelGroup {
    /// 0-based level index (display "Level N/20" is index + 1)
    pub index: usize,
    /// Vertical anchor; decreases (rises) with the level index
    pub y: f32,
    /// Exactly four tiles, exactly one of them correct
    pub tiles: Vec<AnswerTile>,
    /// False → true exactly once, never reverts
    pub completed: bool,
    /// Slot of the correct tile within `tiles`
    pub correct_slot: usize,
}

impl LevelGroup {
    pub fn correct_tile(&self) -> &AnswerTile {
        &self.tiles[self.correct_slot]
    }
}

/// Player body state relevant to the progression core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Standing on a floor (ground or solid tile) as of the last tick
    pub grounded: bool,
    pub can_jump: bool,
    /// Ticks until jumping is re-enabled after a landing
    pub landing_cooldown: u32,
}

impl Player {
    pub fn at_start(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.view_width / 2.0, GROUND_Y - tuning.landing_offset),
            vel: Vec2::ZERO,
            grounded: true,
            can_jump: true,
            landing_cooldown: 0,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_HALF_HEIGHT
    }

    pub fn top(&self) -> f32 {
        self.pos.y - PLAYER_HALF_HEIGHT
    }

    /// Put the player back at the track start with zeroed velocity
    pub fn reset_to_start(&mut self, tuning: &Tuning) {
        *self = Self::at_start(tuning);
    }

    /// Snap onto a surface at `surface_y` and absorb the landing
    pub fn stand_on(&mut self, surface_y: f32, tuning: &Tuning) {
        self.pos.y = surface_y - tuning.landing_offset;
        self.vel = Vec2::ZERO;
        self.grounded = true;
        self.can_jump = false;
        self.landing_cooldown = LANDING_COOLDOWN_TICKS;
    }
}

/// Outbound notifications for presentation collaborators.
///
/// Fire-and-forget: the core never waits on, or reacts to, how these are
/// rendered. Collected during a tick, drained by the host each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    LivesChanged { lives: u8 },
    /// A new question is current; `index` counts completed levels
    LevelAdvanced { index: usize, prompt: String },
    CorrectLanding { level: usize, slot: usize },
    WrongLanding { level: usize, slot: usize },
    PlayerFell,
    PlayerLeftBehind,
    GameCompleted,
    GameOver,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed; option-shuffle streams derive from it
    pub seed: u64,
    pub tuning: Tuning,
    pub bank: QuestionBank,
    pub phase: SessionPhase,
    pub score: u64,
    pub lives: u8,
    /// Count of completed levels; also indexes the current question
    pub current_question: usize,
    /// Latched by the first jump; auto-scroll runs only afterwards
    pub started: bool,
    /// Top of the visible area (decreases as the view ascends)
    pub scroll_y: f32,
    pub player: Player,
    pub track: LevelTrack,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Countdown to the game-over transition once lives hit zero
    pub game_over_ticks: Option<u32>,
    /// Events produced since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session with the given seed and tuning tier.
    ///
    /// The initial batch of levels is materialized immediately; more are
    /// generated lazily as the view approaches the frontier.
    pub fn new(seed: u64, tuning: Tuning, bank: QuestionBank) -> Self {
        let track = LevelTrack::new(seed, &bank, &tuning, INITIAL_LEVELS);
        let player = Player::at_start(&tuning);
        let lives = tuning.lives;
        Self {
            seed,
            tuning,
            bank,
            phase: SessionPhase::Playing,
            score: 0,
            lives,
            current_question: 0,
            started: false,
            scroll_y: 0.0,
            player,
            track,
            time_ticks: 0,
            game_over_ticks: None,
            events: Vec::new(),
        }
    }

    /// Convenience constructor with the built-in bank
    pub fn with_default_bank(seed: u64, tuning: Tuning) -> Self {
        Self::new(seed, tuning, QuestionBank::default())
    }

    /// Prompt of the question the player is currently solving
    pub fn current_prompt(&self) -> &str {
        &self.bank.question(self.current_question).prompt
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_playing_with_full_lives() {
        let state = GameState::with_default_bank(7, Tuning::desktop());
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.current_question, 0);
        assert!(!state.started);
        assert_eq!(state.track.generated_levels(), INITIAL_LEVELS);
    }

    #[test]
    fn player_starts_on_the_ground() {
        let tuning = Tuning::desktop();
        let state = GameState::with_default_bank(7, tuning.clone());
        assert_eq!(
            state.player.pos.y,
            GROUND_Y - tuning.landing_offset
        );
        assert!(state.player.grounded);
    }

    #[test]
    fn drained_events_are_not_replayed() {
        let mut state = GameState::with_default_bank(7, Tuning::desktop());
        state.push_event(GameEvent::PlayerFell);
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerFell]);
        assert!(state.drain_events().is_empty());
    }
}
