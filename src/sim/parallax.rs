//! Background scenery layers
//!
//! Three bands scroll at fixed speeds independent of the world scroll. Items
//! that leave on the left are recycled past the rightmost item.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Items are recycled once their right edge is this far left of the screen
const RECYCLE_X: f32 = -120.0;
/// Layers are filled this far beyond the right edge
const FILL_AHEAD: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneryKind {
    Building,
    Palm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenery {
    pub kind: SceneryKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Pixels per second
    pub speed: f32,
    pub items: Vec<Scenery>,
}

impl Layer {
    fn update(&mut self, dt: f32, view_width: f32, rng: &mut Pcg32) {
        let mut right_edge = f32::NEG_INFINITY;
        for item in &mut self.items {
            item.pos.x -= self.speed * dt;
            right_edge = right_edge.max(item.pos.x + item.size.x);
        }

        let spawn_x = right_edge.max(view_width) + 40.0;
        for item in &mut self.items {
            if item.pos.x + item.size.x < RECYCLE_X {
                item.pos.x = spawn_x + rng.random_range(0.0..=80.0);
            }
        }
    }
}

/// Back buildings, palms, front buildings (far to near)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    pub layers: [Layer; 3],
}

impl Parallax {
    pub fn new(view_width: f32, view_height: f32, ground_y: f32, rng: &mut Pcg32) -> Self {
        let end = view_width + FILL_AHEAD;

        let mut back = Layer {
            speed: 18.0,
            items: Vec::new(),
        };
        let mut x = -50.0;
        while x < end {
            let size = Vec2::new(rng.random_range(70.0..=110.0), rng.random_range(90.0..=160.0));
            back.items.push(Scenery {
                kind: SceneryKind::Building,
                pos: Vec2::new(x, view_height - size.y - 150.0),
                size,
            });
            x += size.x + 60.0;
        }

        let mut palms = Layer {
            speed: 28.0,
            items: Vec::new(),
        };
        let mut x = -80.0;
        while x < end {
            let scale = rng.random_range(1.0..=1.2);
            palms.items.push(Scenery {
                kind: SceneryKind::Palm,
                pos: Vec2::new(x, ground_y - 100.0 - rng.random_range(0.0..=10.0)),
                size: Vec2::new(60.0, 100.0) * scale,
            });
            x += 140.0 + rng.random_range(0.0..=80.0);
        }

        let mut front = Layer {
            speed: 36.0,
            items: Vec::new(),
        };
        let mut x = -80.0;
        while x < end {
            let size = Vec2::new(rng.random_range(60.0..=100.0), rng.random_range(70.0..=130.0));
            front.items.push(Scenery {
                kind: SceneryKind::Building,
                pos: Vec2::new(x, view_height - size.y - 110.0),
                size,
            });
            x += size.x + 80.0;
        }

        Self {
            layers: [back, palms, front],
        }
    }

    pub fn update(&mut self, dt: f32, view_width: f32, rng: &mut Pcg32) {
        for layer in &mut self.layers {
            layer.update(dt, view_width, rng);
        }
    }
}
