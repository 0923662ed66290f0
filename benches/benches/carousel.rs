// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use understory_carousel::{CarouselController, CarouselOptions, InputEvent};

fn sources(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("img/{i}.jpg")).collect()
}

fn loaded(len: usize, options: CarouselOptions) -> CarouselController {
    let mut carousel = CarouselController::new(options);
    carousel.set_images(sources(len));
    carousel
}

fn bench_navigation_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/navigation");

    // Each step re-derives the load window; materialization is keyed by id.
    for len in [16usize, 256, 4_096] {
        let steps = 1_000_u64;
        group.throughput(Throughput::Elements(steps));

        group.bench_with_input(BenchmarkId::new("next_loop", len), &len, |b, &len| {
            b.iter_batched(
                || loaded(len, CarouselOptions::default()),
                |mut carousel| {
                    for _ in 0..steps {
                        black_box(carousel.next());
                    }
                    black_box(carousel);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("go_to_jumps", len), &len, |b, &len| {
            let stride = isize::try_from(len / 3 + 1).unwrap();
            b.iter_batched(
                || loaded(len, CarouselOptions::default()),
                |mut carousel| {
                    let mut target = 0_isize;
                    for _ in 0..steps {
                        target += stride;
                        black_box(carousel.go_to(target));
                    }
                    black_box(carousel);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_set_images(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/set_images");

    for len in [64usize, 1_024, 16_384] {
        let batch = sources(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("lazy", len), &batch, |b, batch| {
            b.iter_batched(
                || (CarouselController::default(), batch.clone()),
                |(mut carousel, batch)| {
                    black_box(carousel.set_images(batch));
                    black_box(carousel);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("eager", len), &batch, |b, batch| {
            b.iter_batched(
                || {
                    let options = CarouselOptions::default().with_lazy_load(false);
                    (CarouselController::new(options), batch.clone())
                },
                |(mut carousel, batch)| {
                    black_box(carousel.set_images(batch));
                    black_box(carousel);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_drag_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/drag");

    // A swipe with many intermediate moves, as reported by a high-rate pointer.
    for moves in [8usize, 120] {
        group.throughput(Throughput::Elements(moves as u64));
        group.bench_with_input(BenchmarkId::new("swipe", moves), &moves, |b, &moves| {
            b.iter_batched(
                || {
                    let mut carousel = loaded(32, CarouselOptions::default());
                    carousel.dispatch(InputEvent::Resize { width: 1280.0 });
                    carousel
                },
                |mut carousel| {
                    carousel.dispatch(InputEvent::PointerDown(Point::new(900.0, 300.0)));
                    for step in 0..moves {
                        let x = 900.0 - 600.0 * (step as f64) / (moves as f64);
                        black_box(carousel.dispatch(InputEvent::PointerMove(Point::new(x, 300.0))));
                    }
                    black_box(carousel.dispatch(InputEvent::PointerUp(None)));
                    black_box(carousel);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_navigation_churn,
    bench_set_images,
    bench_drag_gesture
);
criterion_main!(benches);
