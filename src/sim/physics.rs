//! Player integration, jumping and world scroll
//!
//! Semi-implicit Euler in 60 Hz frame units: velocity first, then position.

use super::state::{Coin, Obstacle, Player, PowerUpPickup};
use crate::frames;
use crate::tuning::Tuning;

/// What a jump input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    /// Grounded jump
    Single,
    /// Second jump in the air
    Double,
    /// Wings flap
    Flap,
}

/// Advance the player one step and clamp it between ceiling and ground
pub fn integrate_player(player: &mut Player, tuning: &Tuning, ground_y: f32, wings: bool, dt: f32) {
    let f = frames(dt);
    let gravity = if wings { tuning.wings_gravity } else { tuning.gravity };

    player.vel_y += gravity * f;
    player.pos.y += player.vel_y * f;

    // Ceiling: stop rising
    if player.pos.y <= 0.0 {
        player.pos.y = 0.0;
        player.vel_y = player.vel_y.max(0.0);
    }

    let floor = player.floor_y(ground_y);
    if player.pos.y >= floor {
        player.pos.y = floor;
        player.vel_y = 0.0;
        if !player.on_ground {
            player.on_ground = true;
            player.can_double = false;
        }
    } else {
        player.on_ground = false;
    }
}

/// Apply a jump input; `None` when no jump is available
pub fn jump(player: &mut Player, tuning: &Tuning, wings: bool) -> Option<Jump> {
    if wings {
        // Always at least the cap upward, plus the flap on top
        player.vel_y = player.vel_y.min(tuning.wings_flap_cap) + tuning.wings_flap_impulse;
        return Some(Jump::Flap);
    }

    if player.on_ground {
        player.vel_y = tuning.jump_impulse;
        player.on_ground = false;
        player.can_double = true;
        Some(Jump::Single)
    } else if player.can_double {
        player.vel_y = tuning.jump_impulse * tuning.double_jump_factor;
        player.can_double = false;
        Some(Jump::Double)
    } else {
        None
    }
}

/// Move every world entity left by the same scroll distance
pub fn scroll_world(
    obstacles: &mut [Obstacle],
    coins: &mut [Coin],
    pickups: &mut [PowerUpPickup],
    speed: f32,
    dt: f32,
) {
    let dx = speed * frames(dt);
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.x -= dx;
    }
    for coin in coins.iter_mut() {
        coin.pos.x -= dx;
    }
    for pickup in pickups.iter_mut() {
        pickup.pos.x -= dx;
    }
}
