//! Keyboard flap source with rising-edge detection.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Live "is the flap key down" state, written by the event pump and sampled
/// by [`KeyboardInput`].
#[derive(Debug, Clone, Default)]
pub struct KeyHandle {
    down: Rc<Cell<bool>>,
    last_seen: Rc<Cell<Option<Instant>>>,
}

impl KeyHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self) -> bool {
        self.down.get()
    }

    /// Record a press or auto-repeat at `now`.
    pub fn press(&self, now: Instant) {
        self.down.set(true);
        self.last_seen.set(Some(now));
    }

    pub fn release(&self) {
        self.down.set(false);
        self.last_seen.set(None);
    }

    /// Release the key if no press/repeat arrived within `timeout`. Needed on
    /// terminals that never report key releases.
    pub fn expire(&self, now: Instant, timeout: Duration) {
        if let Some(seen) = self.last_seen.get() {
            if now.saturating_duration_since(seen) >= timeout {
                self.release();
            }
        }
    }
}

/// Fires once per press, never while the key is held.
#[derive(Debug, Clone)]
pub struct KeyboardInput {
    key: KeyHandle,
    prev: bool,
}

impl KeyboardInput {
    pub fn new(key: KeyHandle) -> Self {
        Self { key, prev: false }
    }

    pub fn flap_edge(&mut self) -> bool {
        let now = self.key.is_down();
        let fired = now && !self.prev;
        self.prev = now;
        fired
    }
}
