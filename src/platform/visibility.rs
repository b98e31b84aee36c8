//! Visibility and orientation gate
//!
//! Turns host signals into a force-pause reason for a running session.

use crate::settings::Settings;
use crate::sim::SuspendReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn from_size(width: f32, height: f32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Decides when the host must pause the simulation
#[derive(Debug, Clone, Copy)]
pub struct SuspendGate {
    pub pause_on_hidden: bool,
    pub pause_on_blur: bool,
    pub pause_on_landscape: bool,
}

impl SuspendGate {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            pause_on_hidden: settings.pause_on_hidden,
            pause_on_blur: settings.pause_on_blur,
            pause_on_landscape: settings.pause_on_landscape,
        }
    }

    /// Document visibility changed
    pub fn visibility(&self, hidden: bool) -> Option<SuspendReason> {
        (hidden && self.pause_on_hidden).then_some(SuspendReason::Hidden)
    }

    /// Window lost focus
    pub fn blur(&self) -> Option<SuspendReason> {
        self.pause_on_blur.then_some(SuspendReason::Blur)
    }

    /// Window resized or rotated; `touch` limits the check to handheld devices
    pub fn orientation(&self, width: f32, height: f32, touch: bool) -> Option<SuspendReason> {
        let bad = touch
            && self.pause_on_landscape
            && Orientation::from_size(width, height) == Orientation::Landscape;
        bad.then_some(SuspendReason::Orientation)
    }

    /// Whether the playfield may be played at this size
    pub fn orientation_ok(&self, width: f32, height: f32, touch: bool) -> bool {
        self.orientation(width, height, touch).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SuspendGate {
        SuspendGate::from_settings(&Settings::default())
    }

    #[test]
    fn test_hidden_pauses() {
        assert_eq!(gate().visibility(true), Some(SuspendReason::Hidden));
        assert_eq!(gate().visibility(false), None);
    }

    #[test]
    fn test_landscape_only_matters_on_touch() {
        let gate = gate();
        assert_eq!(
            gate.orientation(800.0, 400.0, true),
            Some(SuspendReason::Orientation)
        );
        assert_eq!(gate.orientation(800.0, 400.0, false), None);
        assert!(gate.orientation_ok(400.0, 800.0, true));
    }

    #[test]
    fn test_disabled_signals() {
        let gate = SuspendGate {
            pause_on_hidden: false,
            pause_on_blur: false,
            pause_on_landscape: false,
        };
        assert_eq!(gate.visibility(true), None);
        assert_eq!(gate.blur(), None);
        assert_eq!(gate.orientation(800.0, 400.0, true), None);
    }
}
