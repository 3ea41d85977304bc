// Copyright 2025 the Escapement Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Escapement Timeline: validity-window selection for glanceable UI content.
//!
//! This crate provides a small, host-agnostic core for content that changes
//! over time without being re-fetched: a producer hands over an ordered
//! snapshot of entries, each carrying an opaque payload and an optional
//! validity window, and the host asks which entry should be displayed at a
//! given instant. The core concepts are:
//!
//! - [`TimeInterval`]: a half-open `[start, end)` window in milliseconds.
//! - [`TimelineEntry`]: one payload plus an optional validity window.
//!   Entries without a window are *defaults*, selected only when nothing
//!   more specific matches.
//! - [`Timeline`]: an immutable, ordered snapshot of entries, with the
//!   selection operations [`active_at`](Timeline::active_at),
//!   [`closest_to`](Timeline::closest_to), and
//!   [`expiry_after`](Timeline::expiry_after).
//!
//! Overlapping windows resolve to the *shortest* one covering the query
//! time, ties to the earlier entry. This lets producers layer narrow,
//! specific windows over broad fallback ones without editing the latter.
//!
//! This crate deliberately does **not** render anything, talk to a clock,
//! or schedule wake-ups. Hosts are responsible for:
//!
//! - Feeding each freshly fetched snapshot in as a new [`Timeline`].
//! - Calling [`Timeline::active_at`] with their notion of "now" and
//!   rendering the returned payload.
//! - Forwarding [`Timeline::expiry_after`] into whatever re-evaluation
//!   scheduling they use (for example `escapement_pacer`).
//!
//! ## Minimal example
//!
//! ```rust
//! use escapement_timeline::{TimeInterval, Timeline, TimelineEntry};
//!
//! let timeline = Timeline::from_entries(vec![
//!     TimelineEntry::always("agenda"),
//!     TimelineEntry::during("standup", TimeInterval::new(9_000, 9_900)),
//! ]);
//!
//! // During the standup window, the narrower entry wins.
//! assert_eq!(timeline.active_at(9_300).unwrap().payload(), &"standup");
//!
//! // The host should re-evaluate when the window closes.
//! let active = timeline.active_at(9_300).unwrap();
//! assert_eq!(timeline.expiry_after(active, 9_300), 9_900);
//!
//! // Outside it, the default applies and never expires on its own.
//! assert_eq!(timeline.active_at(10_000).unwrap().payload(), &"agenda");
//! ```
//!
//! All operations are pure, synchronous, and allocation-free; absence is an
//! empty result, never an error. Entries with an empty window
//! (`end <= start`) are accepted but can never be selected.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod entry;
mod interval;
mod timeline;

pub use entry::TimelineEntry;
pub use interval::TimeInterval;
pub use timeline::{NEVER_MILLIS, Timeline};
