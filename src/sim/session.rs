//! Session lifecycle: Idle → Running ⇄ Paused → GameOver → Idle
//!
//! Every transition checks the current phase first, so a transition can only
//! fire from the phase it leaves. GameOver is entered only from Running,
//! which makes a second crash in the same tick impossible.

use super::parallax::Parallax;
use super::physics::{self, Jump};
use super::power::PowerUp;
use super::state::{GameEvent, GamePhase, GameState, Player, PowerUpKind, SuspendReason};

impl GameState {
    /// Put every run value back to its initial state and spawn the opening batch
    pub fn reset(&mut self) {
        let ground_y = self.ground_y();
        self.time = 0.0;
        self.speed = self.tuning.start_speed;
        self.level = 1;
        self.score = 0;
        self.coins_collected = 0;
        self.power = PowerUp::Inactive;
        self.game_over_timer = 0.0;
        self.player = Player::new(&self.tuning, ground_y);
        self.obstacles.clear();
        self.coins.clear();
        self.pickups.clear();
        self.parallax = Parallax::new(
            self.viewport.width,
            self.viewport.height,
            ground_y,
            &mut self.rng,
        );
        self.spawn_initial();
    }

    /// Idle → Running with a fresh world
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.reset();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Run started (best {})", self.best);
        true
    }

    /// Running ⇄ Paused; ignored in any other phase
    pub fn pause_toggle(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    /// External force-pause (tab hidden, bad orientation); never resumes
    pub fn suspend(&mut self, reason: SuspendReason) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Suspended(reason));
            log::info!("Auto-paused ({reason:?})");
        }
    }

    /// Jump input; only has an effect while Running
    pub fn try_jump(&mut self) -> Option<Jump> {
        if self.phase != GamePhase::Running {
            return None;
        }
        let jump = physics::jump(&mut self.player, &self.tuning, self.power.wings())?;
        self.events.push(match jump {
            Jump::Single => GameEvent::Jumped,
            Jump::Double => GameEvent::DoubleJumped,
            Jump::Flap => GameEvent::Flapped,
        });
        Some(jump)
    }

    /// Raise level and scroll speed (capped)
    pub fn level_up(&mut self) {
        self.level += 1;
        self.speed = (self.speed + self.tuning.speed_step).min(self.tuning.max_speed);
        self.events.push(GameEvent::LevelUp(self.level));
        log::info!("Level {} (speed {:.1})", self.level, self.speed);
    }

    /// Start (or replace) the active power-up
    pub fn activate_power(&mut self, kind: PowerUpKind) {
        self.power = PowerUp::activate(kind, self.tuning.power_duration);
        self.events.push(GameEvent::PowerUpStarted {
            kind,
            duration: self.tuning.power_duration,
        });
        log::debug!("{} for {}s", kind.name(), self.tuning.power_duration);
    }

    /// Running → GameOver; returns false if the run already ended
    pub fn crash(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_timer = self.tuning.game_over_delay;
        self.events.push(GameEvent::Crashed);

        let new_best = self.score > self.best;
        if new_best {
            self.best = self.score;
            self.events.push(GameEvent::NewBest(self.best));
            log::info!("New best score: {}", self.best);
        }

        let summary = self.summary();
        self.events.push(GameEvent::GameOver { summary, new_best });
        log::info!(
            "Game over: score {} coins {} level {}",
            summary.score,
            summary.coins,
            summary.level
        );
        true
    }

    /// Count down the overlay delay, then GameOver → Idle
    pub fn advance_game_over(&mut self, dt: f32) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.game_over_timer -= dt;
        if self.game_over_timer <= 0.0 {
            self.game_over_timer = 0.0;
            self.phase = GamePhase::Idle;
            self.events.push(GameEvent::ShowSummary(self.summary()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> GameState {
        let mut state = GameState::new(1);
        assert!(state.start());
        state.drain_events();
        state
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut state = GameState::new(1);
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.start());

        state.pause_toggle();
        assert!(!state.start());
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_start_resets_world() {
        let mut state = running();
        state.score = 99;
        state.coins_collected = 14;
        state.level = 2;
        state.speed = 3.4;
        state.power = PowerUp::activate(PowerUpKind::Wings, 4.0);
        state.crash();
        state.advance_game_over(1.0);
        assert_eq!(state.phase, GamePhase::Idle);

        assert!(state.start());
        assert_eq!(state.score, 0);
        assert_eq!(state.coins_collected, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.speed, 3.0);
        assert_eq!(state.power, PowerUp::Inactive);
        assert_eq!(state.obstacles.len(), 3);
        // Best survives the reset
        assert_eq!(state.best, 99);
    }

    #[test]
    fn test_pause_toggle_round_trip() {
        let mut state = running();
        state.pause_toggle();
        assert_eq!(state.phase, GamePhase::Paused);
        state.pause_toggle();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::Paused, GameEvent::Resumed]);
    }

    #[test]
    fn test_pause_ignored_when_idle() {
        let mut state = GameState::new(1);
        state.pause_toggle();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_suspend_keeps_progress() {
        let mut state = running();
        state.score = 42;
        state.level = 3;
        state.suspend(SuspendReason::Orientation);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.score, 42);
        assert_eq!(state.level, 3);

        // A second signal while paused is a no-op
        state.suspend(SuspendReason::Hidden);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Suspended(SuspendReason::Orientation)]
        );
    }

    #[test]
    fn test_jump_requires_running() {
        let mut state = GameState::new(1);
        assert_eq!(state.try_jump(), None);
        state.start();
        state.pause_toggle();
        assert_eq!(state.try_jump(), None);
        state.pause_toggle();
        assert_eq!(state.try_jump(), Some(Jump::Single));
    }

    #[test]
    fn test_crash_fires_once() {
        let mut state = running();
        state.score = 10;
        assert!(state.crash());
        assert!(!state.crash());

        let events = state.drain_events();
        let crashes = events.iter().filter(|e| **e == GameEvent::Crashed).count();
        let bests = events
            .iter()
            .filter(|e| matches!(e, GameEvent::NewBest(_)))
            .count();
        assert_eq!(crashes, 1);
        assert_eq!(bests, 1);
        assert_eq!(state.best, 10);
    }

    #[test]
    fn test_best_not_lowered() {
        let mut state = running();
        state.best = 50;
        state.score = 20;
        state.crash();
        assert_eq!(state.best, 50);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewBest(_)))
        );
    }

    #[test]
    fn test_game_over_delay_then_idle() {
        let mut state = running();
        state.crash();
        state.drain_events();

        state.advance_game_over(0.1);
        assert_eq!(state.phase, GamePhase::GameOver);
        state.advance_game_over(0.15);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::ShowSummary(_)]
        ));

        // No further summaries once idle
        state.advance_game_over(1.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_level_up_caps_speed() {
        let mut state = running();
        for _ in 0..30 {
            state.level_up();
        }
        assert_eq!(state.level, 31);
        assert_eq!(state.speed, 8.5);
    }
}
