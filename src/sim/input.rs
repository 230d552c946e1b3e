//! Control keys and the held-key latch

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Ascend,
    /// Latched, but has no effect on the vehicle
    Descend,
    Pause,
}

impl Key {
    /// Map a browser-style key code (arrow up/down, `P`)
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            38 => Some(Key::Ascend),
            40 => Some(Key::Descend),
            80 => Some(Key::Pause),
            _ => None,
        }
    }

    /// Whether the key is a movement key tracked by the latch
    pub fn is_movement(&self) -> bool {
        matches!(self, Key::Ascend | Key::Descend)
    }
}

/// Set of movement keys currently held down, read once per tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputLatch {
    held: HashSet<Key>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if key.is_movement() {
            self.held.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}
