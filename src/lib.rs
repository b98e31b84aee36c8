//! Roast Runner - A side-scrolling arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session)
//! - `platform`: Browser/native platform abstraction (clock, input, storage)
//! - `persistence`: Best score load/save
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `ui`: HUD and toast text derived from simulation state

pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use persistence::BestScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Engine configuration constants (gameplay balance lives in `tuning`)
pub mod consts {
    /// Physics constants are tuned per 1/60 s frame
    pub const FRAME_RATE: f32 = 60.0;
    /// Largest simulated step; longer stalls are treated as exactly this long
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield aspect: height = width * 16 / 9 (portrait)
    pub const PLAYFIELD_ASPECT: f32 = 16.0 / 9.0;

    /// Storage keys
    pub const BEST_SCORE_KEY: &str = "car_best";
    pub const SETTINGS_KEY: &str = "car_settings";
    pub const TUNING_KEY: &str = "car_tuning";
}

/// Convert elapsed seconds to 60 Hz frame units
#[inline]
pub fn frames(dt: f32) -> f32 {
    dt * consts::FRAME_RATE
}

/// Clamp a wall-clock delta into a safe simulation step
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, consts::MAX_FRAME_DT)
}
