// Copyright 2025 the Escapement Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Escapement Pacer: rate-limited update scheduling for glanceable UI hosts.
//!
//! A host that displays time-varying content has several reasons to
//! re-evaluate it: the shown entry expires, the producer pushes fresh
//! content, or the user asks for a refresh. None of those triggers should be
//! allowed to stampede an expensive downstream refresh. This crate provides
//! the small state machine that sits between the triggers and the refresh:
//!
//! - [`UpdatePacer`]: enforces a minimum spacing between consecutive fires,
//!   defers (never drops) requests that arrive too soon, and supports
//!   pausing delivery without losing the pending target.
//! - [`MonotonicClock`] and [`DeadlineTimer`]: the two narrow capabilities
//!   the host supplies, reading non-decreasing time and arming a single-shot
//!   wake-up at an absolute instant.
//! - [`UpdateListener`]: the callback the pacer drives when an update
//!   should happen now.
//!
//! The crate does not assume any particular platform, event loop, or alarm
//! facility. Everything is synchronous and single-threaded: the host calls
//! in, the pacer either fires the listener or arms the timer, and the host
//! routes the timer's eventual fire back into
//! [`UpdatePacer::on_timer_fired`].
//!
//! ## Pairing with a timeline
//!
//! The typical cycle with `escapement_timeline`: select the active entry,
//! render it, compute its expiry, and hand that instant to
//! [`UpdatePacer::schedule_at`]; when the pacer fires, repeat.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod host;
mod pacer;

pub use host::{DeadlineTimer, MonotonicClock};
pub use pacer::{DEFAULT_MIN_INTERVAL_MILLIS, UpdateListener, UpdatePacer};
