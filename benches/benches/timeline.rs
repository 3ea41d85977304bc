// Copyright 2025 the Escapement Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use escapement_timeline::{TimeInterval, Timeline, TimelineEntry};

/// Builds a timeline of `len` hour-long entries laid end to end, each
/// overlaid by a shorter entry in its second half, plus one default.
fn layered_timeline(len: usize) -> Timeline<u32> {
    let mut entries = vec![TimelineEntry::always(u32::MAX)];
    for i in 0..len as u32 {
        let start = i64::from(i) * 3_600_000;
        entries.push(TimelineEntry::during(
            i,
            TimeInterval::new(start, start + 3_600_000),
        ));
        entries.push(TimelineEntry::during(
            i | 0x8000_0000,
            TimeInterval::new(start + 1_800_000, start + 3_600_000),
        ));
    }
    Timeline::from_entries(entries)
}

fn bench_active_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline/active_at");

    for len in [10_usize, 100, 1_000] {
        let timeline = layered_timeline(len);
        let mid = (len as i64) * 3_600_000 / 2;
        group.throughput(Throughput::Elements(timeline.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &timeline, |b, timeline| {
            b.iter(|| black_box(timeline.active_at(black_box(mid))));
        });
    }

    group.finish();
}

fn bench_expiry_after(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline/expiry_after");

    for len in [10_usize, 100, 1_000] {
        let timeline = layered_timeline(len);
        let mid = (len as i64) * 3_600_000 / 2;
        let active = timeline.active_at(mid).unwrap().clone();
        group.throughput(Throughput::Elements(timeline.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &timeline, |b, timeline| {
            b.iter(|| black_box(timeline.expiry_after(black_box(&active), black_box(mid))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_active_at, bench_expiry_after);
criterion_main!(benches);
