#![forbid(unsafe_code)]

//! Repeating-timer abstraction behind carousel autoplay.
//!
//! The carousel never talks to a platform timer directly. It holds at most one
//! [`TimerHandle`] and asks a [`TimerHost`] to schedule or cancel intervals.
//! The browser adapter backs the host with `setInterval`; [`ManualTimerHost`]
//! is a deterministic host whose clock only moves when [`ManualTimerHost::advance`]
//! is called, which is what tests and native embedders use.
//!
//! # Example
//! ```
//! use landing_core::autoplay::{ManualTimerHost, TimerHost};
//! use std::time::Duration;
//!
//! let mut host = ManualTimerHost::new();
//! let handle = host.schedule(Duration::from_millis(100)).unwrap();
//! assert_eq!(host.advance(Duration::from_millis(250)), vec![handle, handle]);
//! host.cancel(handle);
//! assert!(host.advance(Duration::from_secs(1)).is_empty());
//! ```

use std::time::Duration;

/// Opaque identifier of one scheduled repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Platform service that runs repeating timers on behalf of a controller.
///
/// Implementations deliver each expiry of a scheduled timer back to the
/// controller (for the carousel: `Carousel::on_autoplay_tick`). Cancelling an
/// unknown or already-cancelled handle must be a no-op.
pub trait TimerHost {
    /// Arm a repeating timer. `None` means the platform refused to schedule.
    fn schedule(&mut self, interval: Duration) -> Option<TimerHandle>;

    /// Disarm a previously scheduled timer.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledInterval {
    handle: TimerHandle,
    interval: Duration,
    next_due: Duration,
}

/// Upper bound on expiries one timer reports from a single
/// [`ManualTimerHost::advance`] call.
pub const MAX_EXPIRIES_PER_ADVANCE: u32 = 10_000;

/// Deterministic, host-driven [`TimerHost`].
///
/// Time starts at zero and only advances through [`Self::advance`]. Intervals
/// shorter than one millisecond are clamped to one millisecond.
#[derive(Debug, Default, Clone)]
pub struct ManualTimerHost {
    now: Duration,
    next_handle: u64,
    live: Vec<ScheduledInterval>,
    scheduled_total: u64,
    cancelled_total: u64,
}

impl ManualTimerHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current deterministic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers currently armed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Whether `handle` is still armed.
    #[must_use]
    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.live.iter().any(|timer| timer.handle == handle)
    }

    /// Total number of successful `schedule` calls.
    #[must_use]
    pub const fn scheduled_total(&self) -> u64 {
        self.scheduled_total
    }

    /// Total number of `cancel` calls that disarmed a live timer.
    #[must_use]
    pub const fn cancelled_total(&self) -> u64 {
        self.cancelled_total
    }

    /// Advance time by `dt` and return every expiry in due order.
    ///
    /// A timer whose period fits several times into `dt` appears once per
    /// expiry, up to [`MAX_EXPIRIES_PER_ADVANCE`] per timer. Expiries past
    /// that bound are dropped and the timer resumes at its first due time
    /// after the new clock. Ties are broken by handle so the order is
    /// reproducible.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerHandle> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;
        let mut fired: Vec<(Duration, TimerHandle)> = Vec::new();
        for timer in &mut self.live {
            if timer.next_due > now {
                continue;
            }
            let period = timer.interval.as_nanos();
            let due = (now - timer.next_due).as_nanos() / period + 1;
            let emitted = u32::try_from(due).map_or(MAX_EXPIRIES_PER_ADVANCE, |due| {
                due.min(MAX_EXPIRIES_PER_ADVANCE)
            });
            for k in 0..emitted {
                let at = timer
                    .next_due
                    .saturating_add(timer.interval.saturating_mul(k));
                fired.push((at, timer.handle));
            }
            let skipped = u64::try_from(period.saturating_mul(due))
                .map_or(Duration::MAX, Duration::from_nanos);
            timer.next_due = timer.next_due.saturating_add(skipped);
        }
        fired.sort_unstable();
        fired.into_iter().map(|(_, handle)| handle).collect()
    }
}

impl TimerHost for ManualTimerHost {
    fn schedule(&mut self, interval: Duration) -> Option<TimerHandle> {
        let interval = interval.max(Duration::from_millis(1));
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.live.push(ScheduledInterval {
            handle,
            interval,
            next_due: self.now.saturating_add(interval),
        });
        self.scheduled_total += 1;
        Some(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let before = self.live.len();
        self.live.retain(|timer| timer.handle != handle);
        if self.live.len() != before {
            self.cancelled_total += 1;
        }
    }
}
