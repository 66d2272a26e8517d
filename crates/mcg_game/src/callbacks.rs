//! Frame-delayed callbacks.
//!
//! Callbacks are keyed by the absolute frame on which they become due. The
//! game drains the queue once per tick after the scene has rendered; every
//! callback runs exactly once.

use std::collections::BTreeMap;

pub struct DeferredQueue<F> {
    pending: BTreeMap<u64, Vec<F>>,
}

impl<F> DeferredQueue<F> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }

    /// Queue `callback` for frame `current_frame + frames_from_now` and
    /// return that frame. Zero means the drain at the end of the current
    /// tick. Callbacks sharing a frame keep scheduling order.
    pub fn schedule(&mut self, current_frame: u64, frames_from_now: u64, callback: F) -> u64 {
        let target = current_frame.saturating_add(frames_from_now);
        self.pending.entry(target).or_default().push(callback);
        target
    }

    /// Remove and return every callback due at or before `frame`, oldest
    /// target first, each target's callbacks in scheduling order.
    ///
    /// Entries older than `frame` only exist when something was scheduled
    /// with zero delay after that frame's drain already ran; they fire on the
    /// next drain instead of being lost.
    pub fn drain(&mut self, frame: u64) -> Vec<F> {
        let later = match frame.checked_add(1) {
            Some(next) => self.pending.split_off(&next),
            None => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.pending, later);
        due.into_values().flatten().collect()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.keys().next().copied()
    }

    /// Number of queued callbacks across all frames.
    pub fn len(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<F> Default for DeferredQueue<F> {
    fn default() -> Self {
        Self::new()
    }
}
