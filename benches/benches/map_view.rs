// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect, Size, Vec2};
use understory_map_view::ViewportController;
use understory_map_view::clamp::clamp_translation;

const MAP: Size = Size::new(463.0, 1355.0);
const VIEWPORT: Rect = Rect::new(0.0, 0.0, 463.0, 700.0);

fn bench_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_view/clamp");

    // Mix of overflowing and centered axes across the scale range.
    let cases: Vec<(Vec2, f64)> = (0..1_024)
        .map(|i| {
            let f = f64::from(i);
            (
                Vec2::new((f * 37.0) % 900.0 - 600.0, (f * 53.0) % 2_000.0 - 1_500.0),
                0.8 + (f % 92.0) * 0.1,
            )
        })
        .collect();
    group.throughput(Throughput::Elements(cases.len() as u64));

    group.bench_function("clamp_translation", |b| {
        b.iter(|| {
            for &(translate, scale) in &cases {
                let _ = black_box(clamp_translation(
                    black_box(translate),
                    scale,
                    MAP,
                    VIEWPORT.size(),
                    0.0,
                ));
            }
        });
    });

    group.finish();
}

fn bench_gesture_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_view/gestures");

    // A drag followed by alternating wheel zooms, as a long trackpad session.
    for len in [64usize, 512, 4_096] {
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("drag", len), &len, |b, &len| {
            b.iter_batched(
                || ViewportController::new(MAP, VIEWPORT),
                |mut map| {
                    map.on_pointer_down(Point::new(200.0, 350.0), false);
                    for i in 0..len {
                        let y = 350.0 + ((i % 200) as f64 - 100.0);
                        black_box(map.on_pointer_move(Point::new(200.0, y)));
                    }
                    black_box(map.on_pointer_up());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("wheel_zoom", len), &len, |b, &len| {
            b.iter_batched(
                || ViewportController::new(MAP, VIEWPORT),
                |mut map| {
                    for i in 0..len {
                        let delta = if i % 2 == 0 { -60.0 } else { 45.0 };
                        black_box(map.on_wheel(
                            Vec2::new(0.0, delta),
                            Point::new(230.0, 300.0),
                            true,
                            VIEWPORT,
                        ));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clamp, bench_gesture_stream);
criterion_main!(benches);
