//! Collision primitives
//!
//! Only two shapes exist in the world: axis-aligned rectangles (player,
//! obstacles) and circles (coins, power-up pickups).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Shrink on every side by `pad` (never below zero size)
    pub fn inset(&self, pad: f32) -> Rect {
        let size = (self.size - Vec2::splat(pad * 2.0)).max(Vec2::ZERO);
        Rect::new(self.pos + Vec2::splat(pad), size)
    }

    /// Strict overlap: rectangles that only touch edges do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Point of the rectangle nearest to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// Player vs obstacle with the obstacle's hitbox shrunk by `padding`
///
/// Near misses within the padding are forgiven.
pub fn padded_overlap(player: &Rect, obstacle: &Rect, padding: f32) -> bool {
    player.overlaps(&obstacle.inset(padding))
}

/// Circle vs rectangle: closest-point clamp, then squared distance test
///
/// Tangent contact counts as a hit.
pub fn circle_rect_hit(rect: &Rect, center: Vec2, radius: f32) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}
