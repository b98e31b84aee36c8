//! Procedural entity spawning and culling
//!
//! New entities always appear past the right edge of the viewport, so they
//! scroll in from the right and never start on top of the player.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, GameState, Obstacle, ObstacleKind, PowerUpKind, PowerUpPickup};
use crate::tuning::Span;

impl GameState {
    #[inline]
    fn roll(&mut self, span: Span) -> f32 {
        self.rng.random_range(span.0..=span.1)
    }

    /// Place one obstacle `offset_x` beyond the right edge
    ///
    /// `easy` adds an extra gap for new players.
    pub fn spawn_obstacle(&mut self, offset_x: f32, easy: bool) {
        let kind = if self.rng.random_bool(self.tuning.grill_chance) {
            ObstacleKind::Grill
        } else {
            ObstacleKind::Cone
        };
        let size = kind.size(&self.tuning);
        let gap = if easy { self.roll(self.tuning.easy_gap) } else { 0.0 };

        let ground_y = self.ground_y();
        self.obstacles.push(Obstacle {
            kind,
            pos: Vec2::new(self.viewport.width + offset_x + gap, ground_y - size.y),
            size,
            passed: false,
        });
    }

    /// Place a gently curved row of coins `offset_x` beyond the right edge
    pub fn spawn_coin_burst(&mut self, offset_x: f32) {
        let (min, max) = self.tuning.coin_burst;
        let count = self.rng.random_range(min..=max);
        let base_x = self.viewport.width + offset_x;
        let base_y = self.ground_y() - self.roll(self.tuning.coin_height);

        for i in 0..count {
            let i = i as f32;
            self.coins.push(Coin {
                pos: Vec2::new(
                    base_x + i * self.tuning.coin_spacing,
                    base_y - i.sin() * self.tuning.coin_wave_amplitude,
                ),
                radius: self.tuning.coin_radius,
                taken: false,
            });
        }
    }

    /// Place a pickup of a random kind `offset_x` beyond the right edge
    pub fn spawn_power_up(&mut self, offset_x: f32) {
        let kind = if self.rng.random_bool(0.5) {
            PowerUpKind::Wings
        } else {
            PowerUpKind::Ghost
        };
        let y = self.ground_y() - self.roll(self.tuning.power_height);
        self.pickups.push(PowerUpPickup {
            kind,
            pos: Vec2::new(self.viewport.width + offset_x, y),
            radius: self.tuning.power_radius,
            taken: false,
        });
    }

    /// Opening batch: spaced easy obstacles, coin bursts and one pickup
    pub fn spawn_initial(&mut self) {
        for i in 0..self.tuning.initial_batch {
            let stride = i as f32;
            let offset = self.roll(self.tuning.initial_obstacle_offset)
                + stride * self.tuning.initial_obstacle_stride;
            self.spawn_obstacle(offset, true);

            let offset = self.roll(self.tuning.initial_coin_offset)
                + stride * self.tuning.initial_coin_stride;
            self.spawn_coin_burst(offset);
        }
        let offset = self.roll(self.tuning.initial_power_offset);
        self.spawn_power_up(offset);
    }

    /// Top up entity lists; at most one spawn of each kind per tick
    pub fn replenish(&mut self) {
        let early = self.level < 2;
        if self.obstacles.len() < self.tuning.obstacle_target(self.level) {
            let offset = self.roll(self.tuning.obstacle_offset);
            self.spawn_obstacle(offset, early);
        }

        if self.coins.len() < self.tuning.coin_min {
            let offset = self.roll(self.tuning.coin_offset);
            self.spawn_coin_burst(offset);
        }

        if self.pickups.is_empty() && self.rng.random_bool(self.tuning.power_spawn_chance) {
            let offset = self.roll(self.tuning.power_offset);
            self.spawn_power_up(offset);
        }
    }

    /// Drop taken entities and those that scrolled past the left margin
    pub fn cull(&mut self) {
        let obstacle_margin = -self.tuning.obstacle_cull_margin;
        let pickup_margin = -self.tuning.pickup_cull_margin;

        self.obstacles.retain(|o| o.right() > obstacle_margin);
        self.coins
            .retain(|c| !c.taken && c.pos.x + c.radius > pickup_margin);
        self.pickups
            .retain(|p| !p.taken && p.pos.x + p.radius > pickup_margin);
    }
}
