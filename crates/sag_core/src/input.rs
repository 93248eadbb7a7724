//! Keyboard state tracking.
//!
//! The window layer reports raw press/release events, which include OS key
//! auto-repeat. `key_down` and `key_up` return whether the call was a real
//! transition so callers can react to edges only.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    F3,
}

impl Key {
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::F3 => "f3",
        }
    }
}

pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    /// Returns true if the key was not already held.
    pub fn key_down(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    /// Returns true if the key was held before this call.
    pub fn key_up(&mut self, key: Key) -> bool {
        self.held.remove(&key)
    }

    #[cfg(test)]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Held keys sorted by name, for display.
    pub fn held_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.held.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names
    }

    /// Forget every held key, e.g. after the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_reports_transition_once() {
        let mut input = InputState::new();
        assert!(input.key_down(Key::Left));
        // Auto-repeat delivers another press while the key is still held.
        assert!(!input.key_down(Key::Left));
        assert!(input.is_held(Key::Left));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        assert!(!input.key_up(Key::Up));
        assert!(!input.is_held(Key::Up));
    }

    #[test]
    fn test_key_up_clears_held() {
        let mut input = InputState::new();
        input.key_down(Key::Down);
        assert!(input.key_up(Key::Down));
        assert!(!input.is_held(Key::Down));
    }

    #[test]
    fn test_multiple_keys_independent() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Up);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        assert!(input.is_held(Key::Up));
    }

    #[test]
    fn test_held_names_sorted() {
        let mut input = InputState::new();
        input.key_down(Key::Up);
        input.key_down(Key::Left);
        assert_eq!(input.held_names(), vec!["left", "up"]);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.key_down(Key::F3);
        input.clear();
        assert!(input.held_names().is_empty());
    }
}
