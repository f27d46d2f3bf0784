//! Delay-and-coalesce scheduling for search input.
//!
//! # Design
//! The debouncer is a cancellable delayed task expressed as data. Callers
//! pass the current `Instant` in, so nothing here sleeps or spawns; a host
//! asks for [`Debouncer::deadline`] and wakes itself up in time to call
//! [`Debouncer::fire`].

use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before a search goes out.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace whatever is pending and restart the quiet period.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drop the pending value, if any. Returns whether something was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Time left until the pending value is due, zero if overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|at| at.saturating_duration_since(now))
    }

    /// Take the pending value once its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, at)) if now >= at => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
