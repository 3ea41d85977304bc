// Copyright 2025 the Escapement Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable timeline snapshots and the selection operations over them.

use alloc::vec::Vec;

use crate::entry::TimelineEntry;

/// Sentinel instant meaning "never": the maximum representable millisecond.
///
/// Returned by [`Timeline::expiry_after`] when the active entry can never be
/// displaced (it has no validity window and no future entry outranks it).
pub const NEVER_MILLIS: i64 = i64::MAX;

/// An immutable, ordered snapshot of timeline entries.
///
/// A `Timeline` is created atomically whenever new content arrives and is
/// superseded, never mutated, by the next snapshot. Entry order is
/// significant: when two entries tie under a selection rule, the earlier
/// entry wins. This lets a producer list a broad "default-ish" window first
/// and override it with narrower, more specific windows without editing it.
///
/// Hosts own the snapshot and drive the cycle themselves: select the entry
/// active now with [`active_at`](Self::active_at), render its payload, ask
/// [`expiry_after`](Self::expiry_after) when that choice stops being right,
/// and schedule a re-evaluation at that instant.
///
/// # Example
///
/// ```
/// use escapement_timeline::{TimeInterval, Timeline, TimelineEntry};
///
/// let timeline = Timeline::from_entries(vec![
///     TimelineEntry::always("idle"),
///     TimelineEntry::during("lunch", TimeInterval::new(12_000, 13_000)),
/// ]);
///
/// assert_eq!(timeline.active_at(8_000).unwrap().payload(), &"idle");
/// assert_eq!(timeline.active_at(12_500).unwrap().payload(), &"lunch");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<P> {
    entries: Vec<TimelineEntry<P>>,
}

impl<P> Default for Timeline<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Timeline<P> {
    /// Creates an empty timeline.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a timeline from an ordered list of entries.
    #[must_use]
    pub fn from_entries(entries: Vec<TimelineEntry<P>>) -> Self {
        Self { entries }
    }

    /// Returns the entries in input order.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry<P>] {
        &self.entries
    }

    /// Returns an iterator over the entries in input order.
    pub fn iter(&self) -> core::slice::Iter<'_, TimelineEntry<P>> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the timeline holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry that should be displayed at `time_millis`.
    ///
    /// Among the entries whose validity window contains the query time, the
    /// one with the shortest window wins; ties go to the earlier entry.
    /// When no window-bound entry covers the time, the first default entry
    /// (one with no validity window) is returned instead. Returns `None`
    /// when nothing qualifies; absence is an empty result, not an error.
    ///
    /// Empty windows (`end <= start`) never match.
    #[must_use]
    pub fn active_at(&self, time_millis: i64) -> Option<&TimelineEntry<P>> {
        let mut best: Option<&TimelineEntry<P>> = None;
        let mut best_duration = i64::MAX;
        let mut default: Option<&TimelineEntry<P>> = None;

        for entry in &self.entries {
            match entry.validity() {
                None => {
                    if default.is_none() {
                        default = Some(entry);
                    }
                }
                Some(window) => {
                    if window.contains(time_millis) {
                        let duration = window.duration_millis();
                        // Strict comparison keeps the earliest entry on ties.
                        if duration < best_duration {
                            best = Some(entry);
                            best_duration = duration;
                        }
                    }
                }
            }
        }

        best.or(default)
    }

    /// Returns the window-bound entry whose bounds lie nearest to
    /// `time_millis`, ignoring whether the window actually contains it.
    ///
    /// This is a degraded fallback for hosts that could not use the result
    /// of [`active_at`](Self::active_at) (for example, its payload failed
    /// to inflate): it should not be consulted while `active_at` has a
    /// usable answer. Default entries do not participate in the search;
    /// ties go to the earlier entry. Returns `None` when the timeline holds
    /// no window-bound entries.
    #[must_use]
    pub fn closest_to(&self, time_millis: i64) -> Option<&TimelineEntry<P>> {
        let mut best: Option<&TimelineEntry<P>> = None;
        let mut best_distance = u64::MAX;

        for entry in &self.entries {
            let Some(window) = entry.validity() else {
                continue;
            };
            let distance = window.distance_to(time_millis);
            if distance < best_distance {
                best = Some(entry);
                best_distance = distance;
            }
        }

        best
    }
}

impl<P: PartialEq> Timeline<P> {
    /// Returns the earliest instant at or after `from_millis` at which
    /// `active` stops being the answer of [`active_at`](Self::active_at).
    ///
    /// That is the sooner of the end of `active`'s own validity window and
    /// the start of the nearest future entry that would outrank it: one
    /// with a strictly shorter window, or any window-bound entry when
    /// `active` is a default. Returns [`NEVER_MILLIS`] when neither bound
    /// exists. The result is clamped to `from_millis`, never earlier.
    ///
    /// `active` is matched against the snapshot's entries by equality, so
    /// an entry equal to `active` elsewhere in the snapshot is also skipped.
    #[must_use]
    pub fn expiry_after(&self, active: &TimelineEntry<P>, from_millis: i64) -> i64 {
        let mut expiry = match active.validity() {
            Some(window) => window.end_millis,
            None => NEVER_MILLIS,
        };
        let active_duration = active
            .validity()
            .map_or(i64::MAX, |window| window.duration_millis());

        for entry in &self.entries {
            if entry == active {
                continue;
            }
            let Some(window) = entry.validity() else {
                continue;
            };
            if window.is_empty() {
                continue;
            }
            let outranks = match active.validity() {
                // Any window-bound entry displaces a default while it matches.
                None => true,
                Some(_) => window.duration_millis() < active_duration,
            };
            if outranks && window.start_millis >= from_millis && window.start_millis < expiry {
                expiry = window.start_millis;
            }
        }

        expiry.max(from_millis)
    }
}

impl<P> FromIterator<TimelineEntry<P>> for Timeline<P> {
    fn from_iter<I: IntoIterator<Item = TimelineEntry<P>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, P> IntoIterator for &'a Timeline<P> {
    type Item = &'a TimelineEntry<P>;
    type IntoIter = core::slice::Iter<'a, TimelineEntry<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
