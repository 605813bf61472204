//! One-shot timer queue for the animation loop
//!
//! Timers are armed with a delay and delivered by the host event loop: it
//! sleeps until [`AnimationScheduler::next_deadline`], then hands every
//! handle from [`AnimationScheduler::take_due`] back to the owner. Nothing
//! here runs on another thread.
//!
//! There is no repeating timer. A periodic action re-arms from inside each
//! delivery, which keeps "at most one pending handle" easy to check.

use std::time::{Duration, Instant};

/// Identifies one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Cooperative one-shot timers
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    next_id: u64,
    /// Armed timers, unordered
    pending: Vec<(TimerHandle, Instant)>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot delivery `delay` from now
    pub fn arm(&mut self, delay: Duration) -> TimerHandle {
        self.arm_at(Instant::now() + delay)
    }

    /// Schedule a one-shot delivery at `deadline`
    pub fn arm_at(&mut self, deadline: Instant) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push((handle, deadline));
        handle
    }

    /// Cancel a pending timer
    ///
    /// Returns false if the handle already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        self.pending.len() != before
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut due: Vec<(TimerHandle, Instant)> = Vec::new();
        self.pending.retain(|&(handle, deadline)| {
            if deadline <= now {
                due.push((handle, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(_, deadline)| deadline);
        due.into_iter().map(|(handle, _)| handle).collect()
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|&(_, deadline)| deadline).min()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
