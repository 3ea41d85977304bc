// Copyright 2025 the Escapement Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `escapement_timeline` crate.
//!
//! These exercise the selection contract end to end: overlap resolution,
//! default fallback, the closest-entry degraded path, and expiry
//! computation, on timelines shaped like real producer output.

use escapement_timeline::{NEVER_MILLIS, TimeInterval, Timeline, TimelineEntry};

fn at(hours: i64, minutes: i64) -> i64 {
    (hours * 60 + minutes) * 60_000
}

fn during(payload: &str, start: i64, end: i64) -> TimelineEntry<&str> {
    TimelineEntry::during(payload, TimeInterval::new(start, end))
}

#[test]
fn narrow_override_beats_broad_default_window() {
    // A broad 10:00-11:00 entry overlaid with a narrow 10:30-10:45 one.
    let timeline = Timeline::from_entries(vec![
        during("broad", at(10, 0), at(11, 0)),
        during("narrow", at(10, 30), at(10, 45)),
    ]);

    let active = timeline.active_at(at(10, 35)).unwrap();
    assert_eq!(active.payload(), &"narrow");

    // Before and after the narrow window, the broad entry is back.
    assert_eq!(
        timeline.active_at(at(10, 12)).unwrap().payload(),
        &"broad"
    );
    assert_eq!(
        timeline.active_at(at(10, 54)).unwrap().payload(),
        &"broad"
    );
}

#[test]
fn default_fallback_outside_all_windows() {
    let timeline = Timeline::from_entries(vec![
        TimelineEntry::always("default"),
        during("morning", at(9, 0), at(10, 0)),
    ]);

    assert_eq!(
        timeline.active_at(at(8, 0)).unwrap().payload(),
        &"default"
    );
    assert_eq!(
        timeline.active_at(at(9, 30)).unwrap().payload(),
        &"morning"
    );
}

#[test]
fn no_match_and_no_default_is_empty() {
    let timeline = Timeline::from_entries(vec![during("morning", at(9, 0), at(10, 0))]);

    assert!(timeline.active_at(at(11, 0)).is_none());
}

#[test]
fn lone_default_answers_every_query_time() {
    let timeline = Timeline::from_entries(vec![TimelineEntry::always("only")]);

    for t in [i64::MIN, -1, 0, 1, at(13, 0), i64::MAX] {
        assert_eq!(timeline.active_at(t).unwrap().payload(), &"only");
    }
}

#[test]
fn expiry_is_window_end_for_a_lone_entry() {
    let entry = during("x", 1_000, 4_000);
    let timeline = Timeline::from_entries(vec![entry.clone()]);

    assert_eq!(timeline.expiry_after(&entry, 1_000), 4_000);
}

#[test]
fn expiry_never_precedes_from_time() {
    let entry = during("x", 1_000, 4_000);
    let timeline = Timeline::from_entries(vec![entry.clone()]);

    assert_eq!(timeline.expiry_after(&entry, 4_000), 4_000);
    assert_eq!(timeline.expiry_after(&entry, 9_999), 9_999);
}

#[test]
fn expiry_tracks_the_next_override_chain() {
    // The host walks the timeline the way a renderer would: select, compute
    // expiry, re-select at the expiry, and so on.
    let timeline = Timeline::from_entries(vec![
        during("all-day", 0, at(24, 0)),
        during("lunch", at(12, 0), at(13, 0)),
    ]);

    let mut now = 0;
    let mut shown = Vec::new();
    loop {
        let Some(active) = timeline.active_at(now) else {
            break;
        };
        shown.push(*active.payload());
        let expiry = timeline.expiry_after(active, now);
        if expiry == NEVER_MILLIS || expiry >= at(24, 0) {
            break;
        }
        now = expiry;
    }

    assert_eq!(shown, vec!["all-day", "lunch", "all-day"]);
}

#[test]
fn closest_picks_nearest_bound_when_nothing_matches() {
    let timeline = Timeline::from_entries(vec![
        during("early", at(9, 0), at(10, 0)),
        during("late", at(14, 0), at(15, 0)),
    ]);

    assert_eq!(
        timeline.closest_to(at(11, 0)).unwrap().payload(),
        &"early"
    );
    assert_eq!(
        timeline.closest_to(at(13, 30)).unwrap().payload(),
        &"late"
    );
}

#[test]
fn closest_returns_none_without_window_bound_entries() {
    let timeline = Timeline::from_entries(vec![TimelineEntry::always("default")]);
    assert!(timeline.closest_to(0).is_none());
}

#[test]
fn inverted_window_never_matches_but_still_has_bounds() {
    let timeline = Timeline::from_entries(vec![during("inverted", 4_000, 1_000)]);

    // Never active, at any probe point.
    for t in [0, 1_000, 2_500, 4_000, 5_000] {
        assert!(timeline.active_at(t).is_none());
    }
    // Still reachable through the degraded closest-entry path.
    assert_eq!(timeline.closest_to(900).unwrap().payload(), &"inverted");
}

#[test]
fn snapshot_replacement_is_whole_not_incremental() {
    let first = Timeline::from_entries(vec![during("a", 0, 100)]);
    let second = Timeline::from_entries(vec![during("b", 0, 100)]);

    assert_eq!(first.active_at(50).unwrap().payload(), &"a");
    // The next fetch supersedes the previous snapshot entirely.
    assert_eq!(second.active_at(50).unwrap().payload(), &"b");
    assert_eq!(first.active_at(50).unwrap().payload(), &"a");
}
