// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-shot deadlines on a caller-supplied millisecond clock.

/// A one-shot timer.
///
/// The timer does not run by itself: the host calls [`Deadline::fire`] from
/// its event loop with the current time.
///
/// ```
/// use understory_tooltip::Deadline;
///
/// let mut timer = Deadline::default();
/// timer.arm(1_000, 250);
/// assert!(!timer.fire(1_100));
/// assert!(timer.fire(1_250));
/// // Fires once.
/// assert!(!timer.fire(2_000));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deadline {
    due: Option<u64>,
}

impl Deadline {
    /// Schedules the timer `delay_ms` after `now`, replacing any earlier
    /// schedule.
    pub fn arm(&mut self, now: u64, delay_ms: u64) {
        self.due = Some(now.saturating_add(delay_ms));
    }

    /// Drops the schedule.
    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// Returns `true` while scheduled and not yet fired.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// The scheduled time, if any.
    #[must_use]
    pub fn due(&self) -> Option<u64> {
        self.due
    }

    /// Returns `true` exactly once, on the first call at or after the
    /// scheduled time.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
