//! Game state and core simulation types
//!
//! The whole mutable world lives in [`GameState`]; every mutation funnels
//! through the session controller and the per-frame `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::parallax::Parallax;
use super::power::PowerUp;
use crate::consts::PLAYFIELD_ASPECT;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Overlay shown, world frozen as a preview
    Idle,
    /// Active gameplay
    Running,
    /// Frozen by the player or by a host suspension signal
    Paused,
    /// Crash happened; summary overlay follows after a short delay
    GameOver,
}

/// Why the host force-paused a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspendReason {
    /// Tab or window hidden
    Hidden,
    /// Window lost focus
    Blur,
    /// Device rotated to an unsupported orientation
    Orientation,
}

/// Visible playfield size in CSS pixels, as reported by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_width(360.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Portrait playfield whose height follows the fixed aspect ratio
    pub fn from_width(width: f32) -> Self {
        Self::new(width, (width * PLAYFIELD_ASPECT).floor())
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self, tuning: &Tuning) -> f32 {
        self.height - tuning.ground_margin
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in pixels per frame (positive = down)
    pub vel_y: f32,
    pub on_ground: bool,
    /// A second jump is available while airborne
    pub can_double: bool,
}

impl Player {
    /// Player standing on the ground line
    pub fn new(tuning: &Tuning, ground_y: f32) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new(tuning.player_x, (ground_y - size.y).max(0.0)),
            size,
            vel_y: 0.0,
            on_ground: true,
            can_double: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Lowest allowed top edge for the given ground line
    #[inline]
    pub fn floor_y(&self, ground_y: f32) -> f32 {
        (ground_y - self.size.y).max(0.0)
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Narrow and tall
    Cone,
    /// Wide and low
    Grill,
}

impl ObstacleKind {
    pub fn size(&self, tuning: &Tuning) -> Vec2 {
        let (w, h) = match self {
            ObstacleKind::Cone => tuning.cone_size,
            ObstacleKind::Grill => tuning.grill_size,
        };
        Vec2::new(w, h)
    }
}

/// A ground obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pass-through bonus already awarded
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub taken: bool,
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Low gravity, every jump input flaps
    Wings,
    /// Obstacles are ignored
    Ghost,
}

impl PowerUpKind {
    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Wings => "Wings",
            PowerUpKind::Ghost => "Ghost",
        }
    }
}

/// A power-up pickup floating in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpPickup {
    pub kind: PowerUpKind,
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub taken: bool,
}

/// End-of-run numbers shown on the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub score: u64,
    pub coins: u32,
    pub level: u32,
    pub best: u64,
}

/// Events emitted during a tick, drained by the host for toasts/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Suspended(SuspendReason),
    Jumped,
    DoubleJumped,
    Flapped,
    ObstaclePassed,
    CoinCollected,
    LevelUp(u32),
    /// Pickup collected; `duration` in seconds
    PowerUpStarted { kind: PowerUpKind, duration: f32 },
    PowerUpEnded,
    Crashed,
    /// Best score beaten; the host persists it
    NewBest(u64),
    GameOver { summary: Summary, new_best: bool },
    /// Overlay delay elapsed, session is back to Idle
    ShowSummary(Summary),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Simulated seconds since the session started
    pub time: f32,
    /// World scroll speed in pixels per frame
    pub speed: f32,
    pub level: u32,
    pub score: u64,
    pub coins_collected: u32,
    /// Persisted best score; only raised at game over
    pub best: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub pickups: Vec<PowerUpPickup>,
    pub power: PowerUp,
    /// Background scenery (not gameplay-affecting)
    pub parallax: Parallax,
    /// Seconds left before the GameOver overlay appears
    pub game_over_timer: f32,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Viewport::default())
    }

    /// Create a new idle session; the world is pre-populated as a preview
    ///
    /// An invalid tuning table is replaced by the defaults.
    pub fn with_config(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let tuning = tuning.or_default();
        let ground_y = viewport.ground_y(&tuning);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            phase: GamePhase::Idle,
            time: 0.0,
            speed: tuning.start_speed,
            level: 1,
            score: 0,
            coins_collected: 0,
            best: 0,
            player: Player::new(&tuning, ground_y),
            obstacles: Vec::new(),
            coins: Vec::new(),
            pickups: Vec::new(),
            power: PowerUp::Inactive,
            parallax: Parallax::default(),
            game_over_timer: 0.0,
            events: Vec::new(),
            tuning,
        };

        state.reset();

        state
    }

    /// Y coordinate of the ground line for the current viewport
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.viewport.ground_y(&self.tuning)
    }

    /// Host reports a new playfield size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        // Keep a grounded player glued to the moved ground line
        let floor = self.player.floor_y(self.ground_y());
        if self.player.on_ground || self.player.pos.y > floor {
            self.player.pos.y = floor;
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current run totals
    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            coins: self.coins_collected,
            level: self.level,
            best: self.best,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
