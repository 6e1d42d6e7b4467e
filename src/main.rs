//! Quiz Jump entry point
//!
//! The crate is a library first; browser embedders link the cdylib and
//! drive the simulation themselves. This binary is a native demo shell
//! that lets a simple autopilot play a full session and logs the event
//! stream.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use quiz_jump::consts::SIM_DT;
    use quiz_jump::highscore::{BestScore, MemoryStore};
    use quiz_jump::sim::{tick, GameState, SessionPhase, TickInput};
    use quiz_jump::Tuning;

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("quiz jump demo, seed {}", seed);

    let mut state = GameState::with_default_bank(seed, Tuning::desktop());
    let store = MemoryStore::new();
    let mut best = BestScore::load(&store);

    let mut input = TickInput::default();
    // Hard cap so a stuck autopilot cannot spin forever.
    let max_ticks = 60 * 300;

    for _ in 0..max_ticks {
        steer_toward_answer(&state, &mut input);
        tick(&mut state, &input, SIM_DT);
        input.clear_one_shot();

        for event in state.drain_events() {
            log::info!("{:?}", event);
        }
        if state.phase != SessionPhase::Playing {
            break;
        }
    }

    println!(
        "session over: phase {:?}, score {}, lives {}",
        state.phase, state.score, state.lives
    );
    if best.record(state.score, &store) {
        println!("new best score: {}", best.best);
    }
}

/// Walks under the correct tile of the current level, then jumps.
#[cfg(not(target_arch = "wasm32"))]
fn steer_toward_answer(state: &quiz_jump::sim::GameState, input: &mut quiz_jump::sim::TickInput) {
    let Some(group) = state.track.group(state.current_question) else {
        input.stop();
        return;
    };
    let target = group.correct_tile();
    let dx = target.pos.x - state.player.pos.x;

    if dx > 8.0 {
        input.move_right();
    } else if dx < -8.0 {
        input.move_left();
    } else {
        input.stop();
    }

    let aligned = dx.abs() < target.width / 2.0;
    if state.player.grounded && state.player.can_jump && aligned {
        input.press_jump();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser embedders link the library crate directly; this target
    // only sets up console logging.
    quiz_jump::init_console_logging();
}
