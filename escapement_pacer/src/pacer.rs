// Copyright 2025 the Escapement Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The update pacer: a rate-limited, single-shot scheduling state machine.

use crate::host::{DeadlineTimer, MonotonicClock};

/// Minimum spacing between consecutive fires, in milliseconds, unless
/// overridden with [`UpdatePacer::with_min_interval`].
pub const DEFAULT_MIN_INTERVAL_MILLIS: i64 = 20_000;

/// Receives the "update now" decision.
///
/// Invoked synchronously, on the owning thread, whenever the pacer decides
/// an update should happen. The listener is expected to be fast or to hand
/// off to asynchronous work of its own; it is passed `&mut` into each pacer
/// entry point that can fire, so inside `on_update` the pacer itself is
/// quiesced (no schedule recorded) and can be re-driven as soon as the
/// entry point returns.
pub trait UpdateListener {
    /// Called when an update should happen now.
    fn on_update(&mut self);
}

/// Rate-limited scheduler for "refresh now" triggers.
///
/// `UpdatePacer` wraps a host-supplied single-shot [`DeadlineTimer`] and
/// [`MonotonicClock`] to guarantee a minimum spacing between consecutive
/// update fires while preserving eventual delivery: a request that arrives
/// too soon after the previous fire is deferred to the earliest permitted
/// instant rather than dropped. This protects a downstream expensive
/// refresh (re-fetching and re-rendering content) from rapid successive
/// expiry events or manual refresh requests.
///
/// At most one wake-up is outstanding at any time; every new schedule or
/// update request supersedes the previous one. Disabling the pacer cancels
/// the platform arm but *retains* the recorded target, so a later
/// [`enable`](Self::enable) resumes exactly where it left off. That
/// distinguishes "not right now" from the "forget it entirely" of
/// [`cancel_scheduled`](Self::cancel_scheduled).
///
/// All entry points must be called from the single thread that owns the
/// pacer; nothing here blocks, suspends, or locks.
///
/// # Example
///
/// ```
/// use escapement_pacer::{DeadlineTimer, MonotonicClock, UpdateListener, UpdatePacer};
///
/// struct FakeClock(i64);
/// impl MonotonicClock for FakeClock {
///     fn now_millis(&self) -> i64 {
///         self.0
///     }
/// }
///
/// #[derive(Default)]
/// struct FakeTimer(Option<i64>);
/// impl DeadlineTimer for FakeTimer {
///     fn arm_at(&mut self, deadline_millis: i64) {
///         self.0 = Some(deadline_millis);
///     }
///     fn cancel(&mut self) {
///         self.0 = None;
///     }
/// }
///
/// struct Refresh(u32);
/// impl UpdateListener for Refresh {
///     fn on_update(&mut self) {
///         self.0 += 1;
///     }
/// }
///
/// let mut refresh = Refresh(0);
/// let mut pacer = UpdatePacer::new(FakeTimer::default(), FakeClock(5_000));
///
/// // Too soon after start-of-time: deferred to the earliest permitted instant.
/// pacer.update_now(false, &mut refresh);
/// assert_eq!(refresh.0, 0);
/// assert_eq!(pacer.scheduled_at(), Some(20_000));
///
/// // A forced update bypasses the rate limit.
/// pacer.update_now(true, &mut refresh);
/// assert_eq!(refresh.0, 1);
/// ```
#[derive(Debug)]
pub struct UpdatePacer<T, C>
where
    T: DeadlineTimer,
    C: MonotonicClock,
{
    timer: T,
    clock: C,
    min_interval_millis: i64,
    enabled: bool,
    /// Target instant of the pending update, if any. Survives `disable`.
    scheduled_at_millis: Option<i64>,
    /// Instant of the last actual fire; only ever advances.
    last_fire_millis: i64,
    /// Timer fires that arrived with nothing scheduled (or while disabled).
    stale_fires: u64,
}

impl<T, C> UpdatePacer<T, C>
where
    T: DeadlineTimer,
    C: MonotonicClock,
{
    /// Creates a pacer with [`DEFAULT_MIN_INTERVAL_MILLIS`] spacing.
    ///
    /// The pacer starts enabled, with nothing scheduled.
    #[must_use]
    pub fn new(timer: T, clock: C) -> Self {
        Self::with_min_interval(timer, clock, DEFAULT_MIN_INTERVAL_MILLIS)
    }

    /// Creates a pacer with a custom minimum spacing between fires.
    #[must_use]
    pub fn with_min_interval(timer: T, clock: C, min_interval_millis: i64) -> Self {
        Self {
            timer,
            clock,
            min_interval_millis,
            enabled: true,
            scheduled_at_millis: None,
            last_fire_millis: 0,
            stale_fires: 0,
        }
    }

    /// Schedules an update at `target_millis`, superseding any pending one.
    ///
    /// The target is clamped to no earlier than the last fire plus the
    /// minimum interval. When enabled, the host timer is armed for the
    /// clamped instant; when disabled, the target is only recorded, to be
    /// armed (or fired, if already past) by a later [`enable`](Self::enable).
    pub fn schedule_at(&mut self, target_millis: i64) {
        let earliest = self.last_fire_millis.saturating_add(self.min_interval_millis);
        let target = target_millis.max(earliest);
        self.scheduled_at_millis = Some(target);
        if self.enabled {
            self.timer.arm_at(target);
        }
    }

    /// Requests an update now, superseding any pending schedule.
    ///
    /// When enabled, fires immediately if `force` is set or the minimum
    /// interval has elapsed since the last fire; otherwise the request is
    /// deferred to the earliest permitted instant (clamp-and-defer, never
    /// drop). When disabled, the current instant is recorded so the update
    /// fires as soon as the pacer is re-enabled.
    pub fn update_now(&mut self, force: bool, listener: &mut impl UpdateListener) {
        self.timer.cancel();
        self.scheduled_at_millis = None;

        let now = self.clock.now_millis();
        if !self.enabled {
            self.scheduled_at_millis = Some(now);
            return;
        }
        if force || now.saturating_sub(self.last_fire_millis) >= self.min_interval_millis {
            self.fire(listener);
        } else {
            self.schedule_at(self.last_fire_millis.saturating_add(self.min_interval_millis));
        }
    }

    /// Enables update delivery. No-op if already enabled.
    ///
    /// A target recorded while disabled is honored on the transition: if it
    /// has already passed it fires immediately, otherwise the host timer is
    /// armed for it.
    pub fn enable(&mut self, listener: &mut impl UpdateListener) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        if let Some(target) = self.scheduled_at_millis {
            if target <= self.clock.now_millis() {
                self.fire(listener);
            } else {
                self.timer.arm_at(target);
            }
        }
    }

    /// Disables update delivery. No-op if already disabled.
    ///
    /// Cancels the host timer arm but keeps the recorded target, so a later
    /// [`enable`](Self::enable) resumes it. Use
    /// [`cancel_scheduled`](Self::cancel_scheduled) to drop the target
    /// entirely.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.timer.cancel();
    }

    /// Unconditionally drops any pending schedule, armed or merely
    /// recorded. Leaves the enabled state untouched. Idempotent.
    pub fn cancel_scheduled(&mut self) {
        self.scheduled_at_millis = None;
        self.timer.cancel();
    }

    /// Delivers a host timer fire.
    ///
    /// The host calls this when the deadline armed via [`DeadlineTimer`]
    /// elapses. A fire that arrives with nothing scheduled, or while
    /// disabled, is a race in the host primitive (a cancel crossing an
    /// in-flight fire): it is counted in
    /// [`stale_fire_count`](Self::stale_fire_count) and otherwise ignored.
    pub fn on_timer_fired(&mut self, listener: &mut impl UpdateListener) {
        if !self.enabled || self.scheduled_at_millis.is_none() {
            self.stale_fires += 1;
            return;
        }
        self.fire(listener);
    }

    /// Returns `true` while updates are enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the pending update target, armed or merely recorded.
    #[must_use]
    pub fn scheduled_at(&self) -> Option<i64> {
        self.scheduled_at_millis
    }

    /// Returns the instant of the last fire, or 0 if none happened yet.
    #[must_use]
    pub fn last_fire_millis(&self) -> i64 {
        self.last_fire_millis
    }

    /// Returns the minimum spacing between fires.
    #[must_use]
    pub fn min_interval_millis(&self) -> i64 {
        self.min_interval_millis
    }

    /// Returns how many stale timer fires have been observed.
    ///
    /// Stale fires are recoverable and ignorable; the counter exists so the
    /// host can surface them in whatever logging it owns.
    #[must_use]
    pub fn stale_fire_count(&self) -> u64 {
        self.stale_fires
    }

    /// Returns a reference to the host timer handle.
    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Returns a reference to the host clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The shared fire sequence: quiesce, stamp, notify.
    ///
    /// The schedule is cleared *before* the listener runs, so the listener
    /// observes (and can immediately re-drive) a pacer with no pending
    /// update once the entry point returns.
    fn fire(&mut self, listener: &mut impl UpdateListener) {
        self.scheduled_at_millis = None;
        self.last_fire_millis = self.clock.now_millis();
        listener.on_update();
    }
}

impl<T, C> Drop for UpdatePacer<T, C>
where
    T: DeadlineTimer,
    C: MonotonicClock,
{
    fn drop(&mut self) {
        self.timer.cancel();
    }
}
