//! Keyboard jump de-duplication
//!
//! A held key jumps once. Auto-repeat only flaps while Wings is active.

use std::collections::HashSet;

/// Key codes that trigger a jump
pub const JUMP_KEYS: [&str; 2] = ["Space", "ArrowUp"];

#[inline]
pub fn is_jump_key(code: &str) -> bool {
    JUMP_KEYS.contains(&code)
}

#[inline]
pub fn is_pause_key(key: &str) -> bool {
    key.eq_ignore_ascii_case("p")
}

/// Held jump keys
#[derive(Debug, Clone, Default)]
pub struct JumpKeys {
    held: HashSet<String>,
    /// Let auto-repeat flap while Wings is active
    pub hold_to_flap: bool,
}

impl JumpKeys {
    pub fn new(hold_to_flap: bool) -> Self {
        Self {
            held: HashSet::new(),
            hold_to_flap,
        }
    }

    /// Key pressed; returns true if this press should jump
    pub fn key_down(&mut self, code: &str, repeat: bool, wings: bool) -> bool {
        if !is_jump_key(code) {
            return false;
        }
        if repeat {
            return wings && self.hold_to_flap;
        }
        self.held.insert(code.to_string())
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Forget all held keys (run ended) so nothing carries into the next run
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_key_jumps_once() {
        let mut keys = JumpKeys::new(true);
        assert!(keys.key_down("Space", false, false));
        assert!(!keys.key_down("Space", false, false));
        keys.key_up("Space");
        assert!(keys.key_down("Space", false, false));
    }

    #[test]
    fn test_repeat_only_flaps_with_wings() {
        let mut keys = JumpKeys::new(true);
        keys.key_down("ArrowUp", false, false);
        assert!(!keys.key_down("ArrowUp", true, false));
        assert!(keys.key_down("ArrowUp", true, true));

        let mut keys = JumpKeys::new(false);
        keys.key_down("ArrowUp", false, true);
        assert!(!keys.key_down("ArrowUp", true, true));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut keys = JumpKeys::new(true);
        assert!(!keys.key_down("KeyA", false, false));
        assert!(is_pause_key("P"));
        assert!(!is_pause_key("o"));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut keys = JumpKeys::new(true);
        keys.key_down("Space", false, false);
        keys.clear();
        assert!(keys.key_down("Space", false, false));
    }
}
