//! Per-frame simulation tick
//!
//! The host calls [`tick`] once per display refresh with the wall-clock delta.
//! Inputs are applied first, then the running world is stepped.

use super::physics;
use super::resolve::{Outcome, resolve};
use super::state::{GameEvent, GamePhase, GameState, SuspendReason};
use crate::clamp_dt;

/// Input intents collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a run (overlay play button)
    pub start: bool,
    /// Jump / flap
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Host-side force-pause signal
    pub suspend: Option<SuspendReason>,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt);

    if input.start {
        state.start();
    }
    if let Some(reason) = input.suspend {
        state.suspend(reason);
    }
    if input.pause {
        state.pause_toggle();
    }
    if input.jump {
        state.try_jump();
    }

    match state.phase {
        GamePhase::Running => step(state, dt),
        GamePhase::GameOver => state.advance_game_over(dt),
        GamePhase::Idle | GamePhase::Paused => {}
    }
}

/// One Running step: move, spawn, resolve contacts, cull, tick power-up
pub fn step(state: &mut GameState, dt: f32) {
    let dt = clamp_dt(dt);
    state.time += dt;

    let width = state.viewport.width;
    state.parallax.update(dt, width, &mut state.rng);

    let ground_y = state.ground_y();
    physics::integrate_player(
        &mut state.player,
        &state.tuning,
        ground_y,
        state.power.wings(),
        dt,
    );
    physics::scroll_world(
        &mut state.obstacles,
        &mut state.coins,
        &mut state.pickups,
        state.speed,
        dt,
    );

    state.replenish();

    let outcome = resolve(state);
    state.cull();

    if outcome == Outcome::Crash {
        state.crash();
        return;
    }

    if state.power.advance(dt) {
        state.events.push(GameEvent::PowerUpEnded);
        log::debug!("Power-up ended");
    }

    log::trace!(
        "t={:.2} y={:.1} vy={:.2} score={}",
        state.time,
        state.player.pos.y,
        state.player.vel_y,
        state.score
    );
}
