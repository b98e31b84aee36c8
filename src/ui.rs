//! HUD and toast text
//!
//! Pure formatting of simulation state for the DOM layer. Exact wording is
//! cosmetic.

use crate::sim::{GameEvent, GameState, Summary, SuspendReason};

/// Values shown in the heads-up display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: String,
    pub best: String,
    pub level: String,
    pub coins: String,
    pub power_name: String,
    pub power_time: String,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let (power_name, power_time) = match state.power.kind() {
            Some(kind) => (
                kind.name().to_string(),
                format!("({}s)", state.power.remaining().ceil() as u32),
            ),
            None => ("—".to_string(), String::new()),
        };
        Self {
            score: state.score.to_string(),
            best: state.best.to_string(),
            level: state.level.to_string(),
            coins: state.coins_collected.to_string(),
            power_name,
            power_time,
        }
    }
}

/// A short-lived notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub duration_ms: u32,
}

impl Toast {
    fn new(text: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            text: text.into(),
            duration_ms,
        }
    }
}

/// Toast for a game event, if it deserves one
pub fn toast_for(event: &GameEvent, default_ms: u32) -> Option<Toast> {
    let toast = match event {
        GameEvent::Started => Toast::new("Go Ctrl-Alt-Roast! 🐷", default_ms),
        GameEvent::Paused => Toast::new("Paused", default_ms),
        GameEvent::Resumed => Toast::new("Resumed", default_ms),
        GameEvent::Suspended(SuspendReason::Orientation) => rotate_notice(default_ms),
        GameEvent::Suspended(_) => Toast::new("Paused", default_ms),
        GameEvent::LevelUp(level) => Toast::new(format!("Level {level}!"), default_ms),
        GameEvent::PowerUpStarted { kind, duration } => {
            Toast::new(format!("{}! {}s", kind.name(), duration.ceil() as u32), 800)
        }
        GameEvent::PowerUpEnded => Toast::new("Power-up ended", default_ms),
        GameEvent::NewBest(_) => Toast::new("New Best! 🎉", default_ms),
        GameEvent::GameOver {
            new_best: false, ..
        } => Toast::new("Oink! Try again 🐽", default_ms),
        _ => return None,
    };
    Some(toast)
}

/// Shown when the device is held in landscape
pub fn rotate_notice(default_ms: u32) -> Toast {
    Toast::new("Rotate to portrait to keep playing", default_ms * 2)
}

/// Toast for a runtime error surfaced by the host
pub fn error_toast(message: &str) -> Toast {
    Toast::new(format!("Error: {message}"), 4000)
}

/// Controls reminder for the "How to play" button
pub fn how_to_play(default_ms: u32) -> Toast {
    Toast::new("Snappy jumps • Double-jump • 10 coins = level up", default_ms * 3)
}

/// Overlay text after a run
pub fn summary_line(summary: &Summary) -> String {
    format!(
        "Score: {} • Coins: {} • Best: {}",
        summary.score, summary.coins, summary.best
    )
}

/// Single-slot toast display: a new toast replaces the current one
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    current: Option<(Toast, f64)>,
}

impl ToastQueue {
    pub fn show(&mut self, toast: Toast, now_ms: f64) {
        let until = now_ms + toast.duration_ms as f64;
        self.current = Some((toast, until));
    }

    /// Toast to display at `now_ms`, dropping it once expired
    pub fn visible(&mut self, now_ms: f64) -> Option<&Toast> {
        if matches!(self.current, Some((_, until)) if now_ms >= until) {
            self.current = None;
        }
        self.current.as_ref().map(|(toast, _)| toast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PowerUp, PowerUpKind};

    #[test]
    fn test_hud_without_power() {
        let state = GameState::new(1);
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.score, "0");
        assert_eq!(hud.level, "1");
        assert_eq!(hud.power_name, "—");
        assert_eq!(hud.power_time, "");
    }

    #[test]
    fn test_hud_rounds_power_time_up() {
        let mut state = GameState::new(1);
        state.power = PowerUp::activate(PowerUpKind::Wings, 3.2);
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.power_name, "Wings");
        assert_eq!(hud.power_time, "(4s)");
    }

    #[test]
    fn test_toast_selection() {
        assert_eq!(
            toast_for(&GameEvent::LevelUp(3), 900).map(|t| t.text),
            Some("Level 3!".to_string())
        );
        assert_eq!(toast_for(&GameEvent::CoinCollected, 900), None);
        let wings = GameEvent::PowerUpStarted {
            kind: PowerUpKind::Wings,
            duration: 6.0,
        };
        assert_eq!(
            toast_for(&wings, 900).map(|t| t.text),
            Some("Wings! 6s".to_string())
        );
        assert_eq!(toast_for(&GameEvent::Jumped, 900), None);

        let summary = Summary {
            score: 50,
            coins: 4,
            level: 1,
            best: 50,
        };
        // New best has its own toast
        let beaten = GameEvent::GameOver {
            summary,
            new_best: true,
        };
        assert_eq!(toast_for(&beaten, 900), None);
        let tied = GameEvent::GameOver {
            summary,
            new_best: false,
        };
        assert!(toast_for(&tied, 900).is_some());
    }

    #[test]
    fn test_toast_expires() {
        let mut queue = ToastQueue::default();
        queue.show(Toast::new("hi", 500), 1000.0);
        assert!(queue.visible(1200.0).is_some());
        assert!(queue.visible(1500.0).is_none());
        assert!(queue.visible(1600.0).is_none());
    }

    #[test]
    fn test_how_to_play_outlasts_default() {
        assert!(how_to_play(900).duration_ms > 900);
    }

    #[test]
    fn test_summary_line() {
        let summary = Summary {
            score: 12,
            coins: 3,
            level: 1,
            best: 40,
        };
        assert_eq!(summary_line(&summary), "Score: 12 • Coins: 3 • Best: 40");
    }
}
