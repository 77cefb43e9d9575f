//! `TimerQueue` — sparse tick-keyed timers with cancellable handles.
//!
//! # Why this exists
//!
//! The original control flow chained fixed delays through nested callbacks,
//! which made "cancel everything on disconnect" a matter of luck.  Here
//! every pending continuation is an entry in one queue, keyed by the tick it
//! fires at: stopping the scheduler is `clear()`, and an individual timer
//! can be revoked through the handle returned at scheduling time.
//!
//! Cancellation is lazy — a tombstone set marks revoked handles and
//! `pop_due` drops them on drain — so `cancel` is O(1) and never rebuilds
//! the map.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use ot_core::{Tick, TimerId};

/// A queue mapping future ticks → tasks that fire at that tick.
pub struct TimerQueue<T> {
    inner: BTreeMap<Tick, Vec<(TimerId, T)>>,
    /// Handles that are still live (scheduled, not yet fired or cancelled).
    pending: FxHashSet<TimerId>,
    /// Cancelled handles awaiting lazy removal.
    cancelled: FxHashSet<TimerId>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            inner: BTreeMap::new(),
            pending: FxHashSet::default(),
            cancelled: FxHashSet::default(),
            next_id: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `tick`.  Returns a handle for [`cancel`].
    ///
    /// [`cancel`]: TimerQueue::cancel
    pub fn schedule(&mut self, tick: Tick, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id);
        self.inner.entry(tick).or_default().push((id, task));
        id
    }

    /// Revoke a pending timer.  Returns `false` if it already fired or was
    /// already cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.pending.remove(&id) {
            self.cancelled.insert(id);
            true
        } else {
            false
        }
    }

    /// Remove and return every live task scheduled at or before `now`, in
    /// tick order (insertion order within one tick).
    pub fn pop_due(&mut self, now: Tick) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(&tick) = self.inner.keys().next() {
            if tick > now {
                break;
            }
            let entries = self.inner.remove(&tick).unwrap_or_default();
            for (id, task) in entries {
                if self.cancelled.remove(&id) {
                    continue;
                }
                self.pending.remove(&id);
                due.push(task);
            }
        }
        due
    }

    /// Drop every pending timer at once.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.pending.clear();
        self.cancelled.clear();
    }

    /// The earliest tick with a live timer, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        // Skip ticks whose entries were all cancelled.
        self.inner
            .iter()
            .find(|(_, entries)| entries.iter().any(|(id, _)| self.pending.contains(id)))
            .map(|(&tick, _)| tick)
    }

    /// Number of live (scheduled, uncancelled) timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
