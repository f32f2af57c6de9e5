use std::collections::HashSet;

use super::types::{Key, KeyEvent, KeyState, Modifiers};

/// Keyboard state as seen by the frame loop.
///
/// Updated from the queued key events at the start of every iteration, before the
/// key hooks run, so `is_down` already reflects the event being delivered.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub modifiers: Modifiers,
    keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies one event. Returns `true` if the held-key set changed.
    pub fn apply(&mut self, ev: &KeyEvent) -> bool {
        self.modifiers = ev.modifiers;
        match ev.state {
            KeyState::Pressed => self.keys_down.insert(ev.key),
            KeyState::Released => self.keys_down.remove(&ev.key),
        }
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys_down.iter().copied()
    }

    /// Releases everything, e.g. when the window loses focus mid-press.
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.modifiers = Modifiers::default();
    }

    /// `+1.0` when only `positive` is held, `-1.0` when only `negative` is held.
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        let mut v = 0.0;
        if self.is_down(negative) {
            v -= 1.0;
        }
        if self.is_down(positive) {
            v += 1.0;
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_held_keys() {
        let mut input = InputState::default();
        assert!(input.apply(&KeyEvent::pressed(Key::A)));
        assert!(!input.apply(&KeyEvent::pressed(Key::A)));
        assert!(input.is_down(Key::A));

        assert!(input.apply(&KeyEvent::released(Key::A)));
        assert!(!input.is_down(Key::A));
        assert!(!input.apply(&KeyEvent::released(Key::A)));
    }

    #[test]
    fn axis_cancels_out() {
        let mut input = InputState::default();
        input.apply(&KeyEvent::pressed(Key::ArrowLeft));
        assert_eq!(input.axis(Key::ArrowLeft, Key::ArrowRight), -1.0);

        input.apply(&KeyEvent::pressed(Key::ArrowRight));
        assert_eq!(input.axis(Key::ArrowLeft, Key::ArrowRight), 0.0);

        input.clear();
        assert_eq!(input.keys_down().count(), 0);
    }
}
