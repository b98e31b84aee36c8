//! Data-driven game balance
//!
//! Every gameplay constant lives in one table so balance changes never touch
//! simulation code. Distances are in CSS pixels, velocities in pixels per
//! 1/60 s frame, durations in seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive numeric range used for randomized spawn parameters
pub type Span = (f32, f32);

/// Gameplay balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Fixed horizontal lane of the player
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Upward impulse of a grounded jump (negative = up)
    pub jump_impulse: f32,
    /// Second jump impulse as a fraction of `jump_impulse`
    pub double_jump_factor: f32,
    /// Gravity per frame²
    pub gravity: f32,

    // === Wings ===
    pub wings_gravity: f32,
    /// Velocity is clamped to at most this before a flap
    pub wings_flap_cap: f32,
    pub wings_flap_impulse: f32,

    // === World ===
    /// Distance from the bottom of the viewport to the ground line
    pub ground_margin: f32,
    pub start_speed: f32,
    pub speed_step: f32,
    pub max_speed: f32,
    pub coins_per_level: u32,

    // === Obstacles ===
    pub grill_size: (f32, f32),
    pub cone_size: (f32, f32),
    /// Probability that a new obstacle is a grill
    pub grill_chance: f64,
    /// Extra forward gap for obstacles spawned before level 2
    pub easy_gap: Span,
    pub obstacle_min_early: usize,
    pub obstacle_min: usize,
    pub obstacle_offset: Span,
    pub initial_obstacle_offset: Span,
    pub initial_obstacle_stride: f32,
    pub initial_batch: usize,

    // === Coins ===
    pub coin_min: usize,
    pub coin_radius: f32,
    pub coin_spacing: f32,
    /// Coins per burst (inclusive)
    pub coin_burst: (u32, u32),
    /// Burst baseline height above the ground
    pub coin_height: Span,
    pub coin_wave_amplitude: f32,
    pub coin_offset: Span,
    pub initial_coin_offset: Span,
    pub initial_coin_stride: f32,

    // === Power-ups ===
    pub power_radius: f32,
    pub power_height: Span,
    /// Chance per tick of spawning a pickup when none exists
    pub power_spawn_chance: f64,
    pub power_offset: Span,
    pub initial_power_offset: Span,
    pub power_duration: f32,

    // === Scoring ===
    pub pass_bonus: u64,
    pub coin_bonus: u64,
    /// Inward padding on obstacle hitboxes
    pub collision_padding: f32,
    pub obstacle_cull_margin: f32,
    pub pickup_cull_margin: f32,

    // === Session ===
    /// Time between a crash and the summary overlay
    pub game_over_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x: 48.0,
            player_width: 38.0,
            player_height: 30.0,
            jump_impulse: -12.5,
            double_jump_factor: 0.92,
            gravity: 1.0,

            wings_gravity: 0.5,
            wings_flap_cap: -6.5,
            wings_flap_impulse: -2.2,

            ground_margin: 64.0,
            start_speed: 3.0,
            speed_step: 0.4,
            max_speed: 8.5,
            coins_per_level: 10,

            grill_size: (40.0, 28.0),
            cone_size: (22.0, 30.0),
            grill_chance: 0.55,
            easy_gap: (90.0, 140.0),
            obstacle_min_early: 3,
            obstacle_min: 5,
            obstacle_offset: (420.0, 900.0),
            initial_obstacle_offset: (900.0, 1500.0),
            initial_obstacle_stride: 380.0,
            initial_batch: 3,

            coin_min: 12,
            coin_radius: 8.0,
            coin_spacing: 28.0,
            coin_burst: (3, 6),
            coin_height: (110.0, 170.0),
            coin_wave_amplitude: 10.0,
            coin_offset: (480.0, 1080.0),
            initial_coin_offset: (650.0, 1050.0),
            initial_coin_stride: 300.0,

            power_radius: 12.0,
            power_height: (140.0, 200.0),
            power_spawn_chance: 0.012,
            power_offset: (1000.0, 1700.0),
            initial_power_offset: (1400.0, 2200.0),
            power_duration: 10.0,

            pass_bonus: 5,
            coin_bonus: 3,
            collision_padding: 3.0,
            obstacle_cull_margin: 60.0,
            pickup_cull_margin: 40.0,

            game_over_delay: 0.22,
        }
    }
}

/// Reasons a tuning table is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A value that must be strictly positive was not
    NotPositive(&'static str),
    /// A jump/flap impulse that must point upward did not
    NotUpward(&'static str),
    /// A range whose lower bound exceeds its upper bound
    BadRange(&'static str),
    /// A probability outside [0, 1]
    BadChance(&'static str),
    /// A distance that must be zero or more was negative
    Negative(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::NotPositive(field) => write!(f, "`{field}` must be positive"),
            TuningError::NotUpward(field) => write!(f, "`{field}` must be negative (upward)"),
            TuningError::BadRange(field) => write!(f, "`{field}` has min greater than max"),
            TuningError::BadChance(field) => write!(f, "`{field}` must be within [0, 1]"),
            TuningError::Negative(field) => write!(f, "`{field}` must not be negative"),
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Parse a (possibly partial) tuning table; missing fields keep defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Check internal consistency of the table
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("wings_gravity", self.wings_gravity),
            ("start_speed", self.start_speed),
            ("coin_radius", self.coin_radius),
            ("power_radius", self.power_radius),
            ("power_duration", self.power_duration),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive(field));
            }
        }
        if self.coins_per_level == 0 {
            return Err(TuningError::NotPositive("coins_per_level"));
        }
        if self.coin_burst.0 == 0 {
            return Err(TuningError::NotPositive("coin_burst"));
        }

        for (field, value) in [
            ("jump_impulse", self.jump_impulse),
            ("wings_flap_cap", self.wings_flap_cap),
            ("wings_flap_impulse", self.wings_flap_impulse),
        ] {
            if value >= 0.0 {
                return Err(TuningError::NotUpward(field));
            }
        }

        let spans = [
            ("easy_gap", self.easy_gap),
            ("obstacle_offset", self.obstacle_offset),
            ("initial_obstacle_offset", self.initial_obstacle_offset),
            ("coin_height", self.coin_height),
            ("coin_offset", self.coin_offset),
            ("initial_coin_offset", self.initial_coin_offset),
            ("power_height", self.power_height),
            ("power_offset", self.power_offset),
            ("initial_power_offset", self.initial_power_offset),
            ("speed", (self.start_speed, self.max_speed)),
        ];
        for (field, (min, max)) in spans {
            if min > max {
                return Err(TuningError::BadRange(field));
            }
        }
        if self.coin_burst.0 > self.coin_burst.1 {
            return Err(TuningError::BadRange("coin_burst"));
        }

        // Spawns must land past the right edge and culling must stay off-screen
        let distances = [
            ("easy_gap", self.easy_gap.0),
            ("obstacle_offset", self.obstacle_offset.0),
            ("initial_obstacle_offset", self.initial_obstacle_offset.0),
            ("initial_obstacle_stride", self.initial_obstacle_stride),
            ("coin_offset", self.coin_offset.0),
            ("initial_coin_offset", self.initial_coin_offset.0),
            ("initial_coin_stride", self.initial_coin_stride),
            ("coin_spacing", self.coin_spacing),
            ("power_offset", self.power_offset.0),
            ("initial_power_offset", self.initial_power_offset.0),
            ("collision_padding", self.collision_padding),
            ("obstacle_cull_margin", self.obstacle_cull_margin),
            ("pickup_cull_margin", self.pickup_cull_margin),
            ("game_over_delay", self.game_over_delay),
        ];
        for (field, value) in distances {
            if value < 0.0 {
                return Err(TuningError::Negative(field));
            }
        }

        for (field, chance) in [
            ("grill_chance", self.grill_chance),
            ("power_spawn_chance", self.power_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(TuningError::BadChance(field));
            }
        }

        Ok(())
    }

    /// Self if valid, otherwise the defaults
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Ignoring tuning override: {e}");
                Self::default()
            }
        }
    }

    /// Parse and validate, falling back to defaults on any problem
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning.or_default(),
            Err(e) => {
                log::warn!("Ignoring unparseable tuning override: {e}");
                Self::default()
            }
        }
    }

    /// Minimum obstacles in flight at the given level
    pub fn obstacle_target(&self, level: u32) -> usize {
        if level < 2 {
            self.obstacle_min_early
        } else {
            self.obstacle_min
        }
    }

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(crate::consts::TUNING_KEY) {
                log::info!("Applying tuning override from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
