//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is clamped before it reaches the integrator
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod parallax;
pub mod physics;
pub mod power;
pub mod resolve;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_hit, padded_overlap};
pub use physics::Jump;
pub use power::PowerUp;
pub use resolve::Outcome;
pub use state::{
    Coin, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player, PowerUpKind,
    PowerUpPickup, Summary, SuspendReason, Viewport,
};
pub use tick::{TickInput, step, tick};
