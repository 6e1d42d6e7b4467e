//! Fixed timestep simulation tick
//!
//! Advances one simulation step: player physics, camera scroll, lazy
//! track extension, then the landing resolver that drives quiz
//! progression. Deterministic for a given seed and input sequence.

use glam::Vec2;

use crate::consts::{
    FALL_MARGIN, GAME_OVER_GRACE_TICKS, GRAVITY, GROUND_WIDTH, GROUND_Y, LANDING_BAND,
    LEFT_BEHIND_MARGIN, TOTAL_LEVELS,
};
use crate::sim::state::{GameEvent, GameState, SessionPhase, TileState};

/// Horizontal steering intent for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

/// Input sampled by the host shell and fed to [`tick`].
///
/// `steer` is level-triggered (held direction), `jump` is edge-triggered
/// and should be cleared by the shell once consumed.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub steer: Steer,
    pub jump: bool,
}

impl TickInput {
    pub fn move_left(&mut self) {
        self.steer = Steer::Left;
    }

    pub fn move_right(&mut self) {
        self.steer = Steer::Right;
    }

    pub fn stop(&mut self) {
        self.steer = Steer::None;
    }

    pub fn press_jump(&mut self) {
        self.jump = true;
    }

    /// Clears edge-triggered inputs after a tick has consumed them.
    pub fn clear_one_shot(&mut self) {
        self.jump = false;
    }
}

/// Advances the simulation by one fixed step of `dt` seconds.
///
/// Stage order is fixed: grace countdown, start latch, player physics,
/// auto-scroll, track extension, landing resolution, fall and
/// left-behind checks, pass-through refresh. Terminal phases absorb;
/// the state no longer changes once the session is over.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != SessionPhase::Playing {
        return;
    }
    state.time_ticks += 1;

    // Last life already spent: only the game-over countdown runs so the
    // shell gets a beat to play the death presentation.
    if let Some(remaining) = state.game_over_ticks {
        if remaining <= 1 {
            state.game_over_ticks = Some(0);
            state.phase = SessionPhase::GameOver;
            state.push_event(GameEvent::GameOver);
            log::info!("game over, final score {}", state.score);
        } else {
            state.game_over_ticks = Some(remaining - 1);
        }
        return;
    }

    if input.jump && !state.started {
        state.started = true;
        log::debug!("run started at tick {}", state.time_ticks);
    }

    integrate_player(state, input, dt);

    // Camera climbs once the run has started; world y decreases upward.
    if state.started {
        state.scroll_y -= state.tuning.auto_scroll_speed;
    }

    let scroll_top = state.scroll_y;
    state
        .track
        .extend_if_needed(&state.bank, &state.tuning, scroll_top);

    if let Some((level, slot)) = find_landing_tile(state) {
        resolve_landing(state, level, slot);
    }
    if state.phase != SessionPhase::Playing {
        return;
    }

    if state.player.pos.y > GROUND_Y + FALL_MARGIN {
        handle_fall(state);
    } else if state.started
        && state.player.pos.y > state.scroll_y + state.tuning.view_height + LEFT_BEHIND_MARGIN
    {
        handle_left_behind(state);
    }
    if state.phase != SessionPhase::Playing {
        return;
    }

    let player_y = state.player.pos.y;
    state.track.recompute_pass_through(player_y);
}

/// Horizontal steering, jump, gravity, integration and ground contact.
fn integrate_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let supported = state.player.grounded && support_below(state);
    let tuning = state.tuning.clone();
    let p = &mut state.player;

    p.vel.x = match input.steer {
        Steer::Left => -tuning.player_speed,
        Steer::Right => tuning.player_speed,
        Steer::None => 0.0,
    };

    if supported {
        p.vel.y = 0.0;
    } else {
        // Walked off an edge or the floor went pass-through.
        p.grounded = false;
    }

    if p.landing_cooldown > 0 {
        p.landing_cooldown -= 1;
    } else {
        p.can_jump = true;
    }

    if input.jump && p.grounded && p.can_jump {
        p.vel.y = tuning.jump_velocity;
        p.grounded = false;
        log::trace!("jump from y {:.1}", p.pos.y);
    }

    if !p.grounded {
        p.vel.y += GRAVITY * dt;
    }
    p.pos += p.vel * dt;

    let (min_x, max_x) = tuning.player_bounds();
    p.pos.x = p.pos.x.clamp(min_x, max_x);

    // Fresh landing on the ground platform, falling only.
    if !p.grounded && p.vel.y > 0.0 {
        let bottom = p.bottom();
        if (p.pos.x - tuning.view_width / 2.0).abs() <= GROUND_WIDTH / 2.0
            && bottom >= GROUND_Y
            && bottom <= GROUND_Y + LANDING_BAND
        {
            p.stand_on(GROUND_Y, &tuning);
        }
    }
}

/// Whether a solid surface still holds the player at the standing height.
///
/// Standing is continuous support, not a re-landing each tick: while a
/// surface is underneath, the player keeps zero vertical velocity and
/// the jump cooldown is allowed to elapse.
fn support_below(state: &GameState) -> bool {
    let p = &state.player;
    let t = &state.tuning;
    const EPS: f32 = 2.0;

    let ground_stand_y = GROUND_Y - t.landing_offset;
    if (p.pos.y - ground_stand_y).abs() <= EPS
        && (p.pos.x - t.view_width / 2.0).abs() <= GROUND_WIDTH / 2.0
    {
        return true;
    }

    state.track.groups().iter().any(|group| {
        group.tiles.iter().any(|tile| {
            tile.is_solid_platform()
                && !tile.allow_pass_through
                && p.pos.x >= tile.left()
                && p.pos.x <= tile.right()
                && (p.pos.y - (tile.pos.y - t.landing_offset)).abs() <= EPS
        })
    })
}

/// Scans the track for a tile the falling player lands on this tick.
///
/// Groups are visited in level order, tiles in slot order; the first
/// match wins. Destroyed tiles never collide, and solid floors in
/// pass-through mode are skipped entirely.
fn find_landing_tile(state: &GameState) -> Option<(usize, usize)> {
    let p = &state.player;
    if p.vel.y <= 0.0 {
        return None;
    }
    let bottom = p.bottom();
    let top = p.top();

    for group in state.track.groups() {
        for (slot, tile) in group.tiles.iter().enumerate() {
            if tile.is_destroyed() {
                continue;
            }
            if tile.is_solid_platform() && tile.allow_pass_through {
                continue;
            }
            let tile_top = tile.top();
            if p.pos.x >= tile.left()
                && p.pos.x <= tile.right()
                && bottom >= tile_top
                && bottom <= tile_top + LANDING_BAND
                && top < tile_top
            {
                return Some((group.index, slot));
            }
        }
    }
    None
}

/// Applies the outcome of landing on `slot` of level `level`.
fn resolve_landing(state: &mut GameState, level: usize, slot: usize) {
    let tuning = state.tuning.clone();
    let Some(group) = state.track.group(level) else {
        return;
    };
    let tile = &group.tiles[slot];
    let (tile_y, solid, is_correct, completed) = (
        tile.pos.y,
        tile.is_solid_platform(),
        tile.is_correct,
        group.completed,
    );

    // Solid floor from an earlier solved level: plain stand, no scoring.
    if solid {
        state.player.stand_on(tile_y, &tuning);
        return;
    }

    if completed {
        if is_correct {
            state.player.stand_on(tile_y, &tuning);
        } else {
            // Unsolved wrong tile inside a solved group stays a hazard.
            break_wrong_tile(state, level, slot);
        }
        return;
    }

    if is_correct {
        if let Some(group) = state.track.group_mut(level) {
            group.tiles[slot].has_been_hit = true;
        }
        state.player.stand_on(tile_y, &tuning);
        state.track.mark_completed(level);
        state.score += tuning.points_per_correct;
        let score = state.score;
        state.push_event(GameEvent::ScoreChanged { score });
        state.push_event(GameEvent::CorrectLanding { level, slot });
        state.current_question += 1;

        if state.current_question >= TOTAL_LEVELS {
            state.phase = SessionPhase::Completed;
            state.push_event(GameEvent::GameCompleted);
            log::info!("all {} levels cleared, score {}", TOTAL_LEVELS, score);
        } else {
            let index = state.current_question;
            let prompt = state.bank.question(index).prompt.clone();
            state.push_event(GameEvent::LevelAdvanced { index, prompt });
        }
    } else {
        break_wrong_tile(state, level, slot);
    }
}

/// Destroys a wrong tile under the player and charges a life.
fn break_wrong_tile(state: &mut GameState, level: usize, slot: usize) {
    if let Some(group) = state.track.group_mut(level) {
        let tile = &mut group.tiles[slot];
        tile.has_been_hit = true;
        tile.state = TileState::Destroyed;
    }
    // Impact kills momentum; the player drops from rest through the gap.
    state.player.vel = Vec2::ZERO;
    state.push_event(GameEvent::WrongLanding { level, slot });
    lose_life(state);
}

/// Decrements lives and arms the game-over grace countdown at zero.
fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    let lives = state.lives;
    state.push_event(GameEvent::LivesChanged { lives });
    if lives == 0 && state.game_over_ticks.is_none() {
        state.game_over_ticks = Some(GAME_OVER_GRACE_TICKS);
        log::info!("out of lives at tick {}", state.time_ticks);
    }
}

/// Player dropped past the ground platform into the pit.
fn handle_fall(state: &mut GameState) {
    state.push_event(GameEvent::PlayerFell);
    lose_life(state);
    let tuning = state.tuning.clone();
    state.player.reset_to_start(&tuning);
}

/// Camera left the player behind: charge a life and pull them back up
/// onto the nearest solved floor, or the start position if none exists.
fn handle_left_behind(state: &mut GameState) {
    state.push_event(GameEvent::PlayerLeftBehind);
    state.lives = state.lives.saturating_sub(1);
    let lives = state.lives;
    state.push_event(GameEvent::LivesChanged { lives });
    if lives == 0 {
        // No grace here: the camera has already moved on.
        state.game_over_ticks = Some(0);
        state.phase = SessionPhase::GameOver;
        state.push_event(GameEvent::GameOver);
        log::info!("left behind with no lives, final score {}", state.score);
        return;
    }

    let tuning = state.tuning.clone();
    let rescue = state
        .track
        .nearest_completed(state.player.pos.y)
        .map(|group| group.correct_tile().pos);
    match rescue {
        Some(tile_pos) => {
            let p = &mut state.player;
            p.pos = Vec2::new(tile_pos.x, tile_pos.y - tuning.landing_offset);
            p.vel = Vec2::ZERO;
            p.grounded = true;
            p.can_jump = true;
            p.landing_cooldown = 0;
        }
        None => state.player.reset_to_start(&tuning),
    }
}
