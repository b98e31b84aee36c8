//! Collision outcomes and scoring
//!
//! Order within a tick: pass-through bonus, obstacle hits, coins, pickups.
//! A fatal obstacle hit stops the rest of the tick.

use super::collision::{circle_rect_hit, padded_overlap};
use super::state::{GameEvent, GameState};

/// Result of resolving one tick's contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Crash,
}

/// Apply all player contacts for the current positions
pub fn resolve(state: &mut GameState) -> Outcome {
    let player = state.player.rect();

    // Obstacles fully behind the player's leading edge score once
    for obstacle in state.obstacles.iter_mut() {
        if !obstacle.passed && obstacle.right() < player.pos.x {
            obstacle.passed = true;
            state.score += state.tuning.pass_bonus;
            state.events.push(GameEvent::ObstaclePassed);
        }
    }

    // Ghost skips the test entirely
    if !state.power.ghost() {
        let padding = state.tuning.collision_padding;
        let hit = state
            .obstacles
            .iter()
            .any(|o| padded_overlap(&player, &o.rect(), padding));
        if hit {
            return Outcome::Crash;
        }
    }

    let mut level_ups = 0;
    for coin in state.coins.iter_mut() {
        if coin.taken || !circle_rect_hit(&player, coin.pos, coin.radius) {
            continue;
        }
        coin.taken = true;
        state.coins_collected += 1;
        state.score += state.tuning.coin_bonus;
        state.events.push(GameEvent::CoinCollected);
        if state.coins_collected % state.tuning.coins_per_level == 0 {
            level_ups += 1;
        }
    }
    for _ in 0..level_ups {
        state.level_up();
    }

    let mut collected = None;
    for pickup in state.pickups.iter_mut() {
        if !pickup.taken && circle_rect_hit(&player, pickup.pos, pickup.radius) {
            pickup.taken = true;
            collected = Some(pickup.kind);
        }
    }
    if let Some(kind) = collected {
        state.activate_power(kind);
    }

    Outcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::power::PowerUp;
    use crate::sim::state::{Coin, Obstacle, ObstacleKind, PowerUpKind, PowerUpPickup};
    use glam::Vec2;

    /// Running state with an empty world
    fn bare() -> GameState {
        let mut state = GameState::new(1);
        state.start();
        state.obstacles.clear();
        state.coins.clear();
        state.pickups.clear();
        state.drain_events();
        state
    }

    fn obstacle_at(state: &GameState, x: f32) -> Obstacle {
        let size = ObstacleKind::Grill.size(&state.tuning);
        Obstacle {
            kind: ObstacleKind::Grill,
            pos: Vec2::new(x, state.ground_y() - size.y),
            size,
            passed: false,
        }
    }

    fn coin_on_player(state: &GameState) -> Coin {
        Coin {
            pos: state.player.rect().pos + state.player.size / 2.0,
            radius: 8.0,
            taken: false,
        }
    }

    #[test]
    fn test_pass_bonus_once() {
        let mut state = bare();
        let o = obstacle_at(&state, state.player.pos.x - 50.0);
        state.obstacles.push(o);

        assert_eq!(resolve(&mut state), Outcome::Continue);
        assert_eq!(state.score, 5);
        assert_eq!(resolve(&mut state), Outcome::Continue);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_obstacle_overlap_crashes() {
        let mut state = bare();
        let o = obstacle_at(&state, state.player.pos.x + 10.0);
        state.obstacles.push(o);
        assert_eq!(resolve(&mut state), Outcome::Crash);
    }

    #[test]
    fn test_ghost_ignores_obstacles() {
        let mut state = bare();
        let o = obstacle_at(&state, state.player.pos.x + 10.0);
        state.obstacles.push(o);
        state.power = PowerUp::activate(PowerUpKind::Ghost, 1.0);
        assert_eq!(resolve(&mut state), Outcome::Continue);

        state.power = PowerUp::Inactive;
        assert_eq!(resolve(&mut state), Outcome::Crash);
    }

    #[test]
    fn test_crash_short_circuits_coins() {
        let mut state = bare();
        let o = obstacle_at(&state, state.player.pos.x + 10.0);
        state.obstacles.push(o);
        let c = coin_on_player(&state);
        state.coins.push(c);

        assert_eq!(resolve(&mut state), Outcome::Crash);
        assert_eq!(state.coins_collected, 0);
        assert!(!state.coins[0].taken);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = bare();
        let c = coin_on_player(&state);
        state.coins.push(c);

        resolve(&mut state);
        assert_eq!(state.coins_collected, 1);
        assert_eq!(state.score, 3);
        assert!(state.coins[0].taken);

        // Still overlapping and not yet culled
        resolve(&mut state);
        assert_eq!(state.coins_collected, 1);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_every_tenth_coin_levels_up() {
        let mut state = bare();
        for n in 1..=30u32 {
            let c = coin_on_player(&state);
            state.coins.push(c);
            let level_before = state.level;
            let speed_before = state.speed;
            resolve(&mut state);
            state.cull();

            if n % 10 == 0 {
                assert_eq!(state.level, level_before + 1);
                assert!((state.speed - (speed_before + 0.4)).abs() < 1e-5);
            } else {
                assert_eq!(state.level, level_before);
            }
        }
        assert_eq!(state.level, 4);
    }

    #[test]
    fn test_many_coins_in_one_tick() {
        let mut state = bare();
        for _ in 0..20 {
            let c = coin_on_player(&state);
            state.coins.push(c);
        }
        resolve(&mut state);
        assert_eq!(state.coins_collected, 20);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_pickup_activates_and_replaces() {
        let mut state = bare();
        let center = state.player.rect().pos + state.player.size / 2.0;
        state.pickups.push(PowerUpPickup {
            kind: PowerUpKind::Wings,
            pos: center,
            radius: 12.0,
            taken: false,
        });
        resolve(&mut state);
        assert!(state.power.wings());

        state.power.advance(6.0);
        state.cull();
        state.pickups.push(PowerUpPickup {
            kind: PowerUpKind::Ghost,
            pos: center,
            radius: 12.0,
            taken: false,
        });
        resolve(&mut state);
        assert_eq!(state.power, PowerUp::Ghost { remaining: 10.0 });
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUpStarted {
                    kind: PowerUpKind::Ghost,
                    duration: 10.0,
                })
        );
    }
}
