//! Demo pilot for headless runs
//!
//! Jumps when the next obstacle is about to reach the player and double-jumps
//! at the top of the arc while it is still underneath. Not smart, but it
//! exercises the whole loop the same way a player would.

use super::state::GameState;

/// Frames of lead time before an obstacle reaches the player
const LEAD_FRAMES: f32 = 7.0;

/// Whether a jump input should be sent this tick
pub fn wants_jump(state: &GameState) -> bool {
    if !state.is_running() || state.power.ghost() {
        return false;
    }

    let player_front = state.player.pos.x + state.player.size.x;
    let next_gap = state
        .obstacles
        .iter()
        .filter(|o| !o.passed && o.right() > state.player.pos.x)
        .map(|o| o.pos.x - player_front)
        .fold(f32::INFINITY, f32::min);

    let threat = next_gap <= state.speed * LEAD_FRAMES;

    if state.power.wings() {
        // One flap per arc: wait for the previous one to peak
        return threat && state.player.vel_y >= 0.0;
    }

    if state.player.on_ground {
        return threat;
    }

    // Stretch the jump with the second impulse once rising stops
    threat && state.player.can_double && state.player.vel_y >= 0.0
}
