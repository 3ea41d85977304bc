// Copyright 2025 the Escapement Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A day on a simulated glanceable display.
//!
//! Demonstrate the full host cycle on virtual time: select the active
//! timeline entry, "render" it, ask when that choice expires, hand the
//! expiry to the pacer, and jump the clock to the next armed wake-up.
//!
//! Run:
//! - `cargo run -p escapement_demos --example glance_loop`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use escapement_pacer::{DeadlineTimer, MonotonicClock, UpdateListener, UpdatePacer};
use escapement_timeline::{NEVER_MILLIS, TimeInterval, Timeline, TimelineEntry};

/// Virtual milliseconds, advanced by hand.
#[derive(Clone, Default)]
struct SimClock(Rc<Cell<i64>>);

impl MonotonicClock for SimClock {
    fn now_millis(&self) -> i64 {
        self.0.get()
    }
}

/// Records the armed deadline so the loop knows where to jump next.
#[derive(Clone, Default)]
struct SimTimer(Rc<Cell<Option<i64>>>);

impl DeadlineTimer for SimTimer {
    fn arm_at(&mut self, deadline_millis: i64) {
        self.0.set(Some(deadline_millis));
    }

    fn cancel(&mut self) {
        self.0.set(None);
    }
}

/// Flags that the host should re-run its render pass.
#[derive(Clone, Default)]
struct RenderRequest(Rc<RefCell<bool>>);

impl UpdateListener for RenderRequest {
    fn on_update(&mut self) {
        *self.0.borrow_mut() = true;
    }
}

fn hm(hours: i64, minutes: i64) -> i64 {
    (hours * 60 + minutes) * 60_000
}

fn clock_time(millis: i64) -> String {
    let minutes = millis / 60_000;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn main() {
    // The producer's snapshot: a broad fallback, a day-wide agenda, and two
    // narrow windows layered on top of it.
    let timeline = Timeline::from_entries(vec![
        TimelineEntry::always("watch face"),
        TimelineEntry::during("today: 2 meetings", TimeInterval::new(hm(8, 0), hm(18, 0))),
        TimelineEntry::during("standup in room 4", TimeInterval::new(hm(9, 0), hm(9, 30))),
        TimelineEntry::during("lunch with Sam", TimeInterval::new(hm(12, 0), hm(13, 0))),
    ]);

    let clock = SimClock::default();
    let timer = SimTimer::default();
    let mut render = RenderRequest::default();
    // A short quiet period so the narrow windows stay visible in the log.
    let mut pacer = UpdatePacer::with_min_interval(timer.clone(), clock.clone(), 60_000);

    clock.0.set(hm(7, 30));
    loop {
        let now = clock.0.get();
        match timeline.active_at(now) {
            Some(active) => {
                println!("{}  showing: {}", clock_time(now), active.payload());
                let expiry = timeline.expiry_after(active, now);
                if expiry == NEVER_MILLIS {
                    println!("{}  nothing left to wait for", clock_time(now));
                    break;
                }
                pacer.schedule_at(expiry);
            }
            None => {
                println!("{}  nothing to show", clock_time(now));
                break;
            }
        }

        // Jump virtual time to the armed wake-up and deliver the fire.
        let Some(deadline) = timer.0.get() else {
            break;
        };
        clock.0.set(deadline);
        pacer.on_timer_fired(&mut render);
        assert!(render.0.replace(false), "armed wake-up should re-render");
    }
}
