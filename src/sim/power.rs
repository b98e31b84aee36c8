//! Active power-up state machine
//!
//! At most one power-up runs at a time. Collecting another replaces it and
//! restarts the timer; durations never stack.

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PowerUp {
    #[default]
    Inactive,
    Wings {
        remaining: f32,
    },
    Ghost {
        remaining: f32,
    },
}

impl PowerUp {
    /// Fresh power-up of the given kind
    pub fn activate(kind: PowerUpKind, duration: f32) -> Self {
        match kind {
            PowerUpKind::Wings => PowerUp::Wings {
                remaining: duration,
            },
            PowerUpKind::Ghost => PowerUp::Ghost {
                remaining: duration,
            },
        }
    }

    pub fn kind(&self) -> Option<PowerUpKind> {
        match self {
            PowerUp::Inactive => None,
            PowerUp::Wings { .. } => Some(PowerUpKind::Wings),
            PowerUp::Ghost { .. } => Some(PowerUpKind::Ghost),
        }
    }

    pub fn remaining(&self) -> f32 {
        match *self {
            PowerUp::Inactive => 0.0,
            PowerUp::Wings { remaining } | PowerUp::Ghost { remaining } => remaining,
        }
    }

    /// Wings with time left
    #[inline]
    pub fn wings(&self) -> bool {
        matches!(*self, PowerUp::Wings { remaining } if remaining > 0.0)
    }

    /// Ghost with time left
    #[inline]
    pub fn ghost(&self) -> bool {
        matches!(*self, PowerUp::Ghost { remaining } if remaining > 0.0)
    }

    /// Count down; returns true exactly once, on the tick the power-up ends
    pub fn advance(&mut self, dt: f32) -> bool {
        match self {
            PowerUp::Inactive => false,
            PowerUp::Wings { remaining } | PowerUp::Ghost { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    *self = PowerUp::Inactive;
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_expire_once() {
        let mut power = PowerUp::activate(PowerUpKind::Ghost, 0.05);
        assert!(power.ghost());
        assert!(!power.wings());

        assert!(!power.advance(0.03));
        assert!(power.ghost());
        assert!(power.advance(0.03));
        assert_eq!(power, PowerUp::Inactive);
        // Already inactive: no second notification
        assert!(!power.advance(0.03));
    }

    #[test]
    fn test_replace_resets_duration() {
        let mut power = PowerUp::activate(PowerUpKind::Wings, 10.0);
        power.advance(7.0);
        assert!((power.remaining() - 3.0).abs() < 1e-5);

        power = PowerUp::activate(PowerUpKind::Ghost, 10.0);
        assert_eq!(power.kind(), Some(PowerUpKind::Ghost));
        assert_eq!(power.remaining(), 10.0);
    }

    #[test]
    fn test_inactive_has_no_effects() {
        let power = PowerUp::Inactive;
        assert_eq!(power.kind(), None);
        assert_eq!(power.remaining(), 0.0);
        assert!(!power.wings());
        assert!(!power.ghost());
    }
}
