// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use std::cell::Cell;
use std::rc::Rc;
use understory_velocity::{
    CallbackRegistry, Container, DragTracker, PointerEvent, PointerEventKind, PointerSource,
    TrackerOptions,
};

struct NullSource;

impl PointerSource for NullSource {
    fn attach(&mut self, _kind: PointerEventKind) {}
    fn detach(&mut self, _kind: PointerEventKind) {}
    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, 1920.0, 1080.0)
    }
}

fn drag_path(len: usize) -> Vec<PointerEvent> {
    let mut events = Vec::with_capacity(len + 2);
    events.push(PointerEvent::Down {
        position: Point::new(10.0, 10.0),
    });
    for i in 0..len {
        let t = i as f64;
        events.push(PointerEvent::Move {
            position: Point::new(10.0 + t, 10.0 + (t * 0.1).sin() * 20.0),
            time: 1_000 + i as u64 * 8,
        });
    }
    events.push(PointerEvent::Up {
        position: Point::new(10.0 + len as f64, 10.0),
    });
    events
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity/dispatch");

    for len in [64usize, 1_024, 16_384] {
        let events = drag_path(len);
        group.throughput(Throughput::Elements(events.len() as u64));

        group.bench_with_input(BenchmarkId::new("drag", len), &events, |b, events| {
            let sum = Rc::new(Cell::new(0.0));
            let mut tracker = DragTracker::new(
                NullSource,
                TrackerOptions::default()
                    .with_container(Container::Element(Rect::new(0.0, 0.0, 500.0, 500.0))),
            );
            let sink = sum.clone();
            tracker.on_velocity(Rc::new(move |v: f64| sink.set(sink.get() + v)));

            b.iter(|| {
                for event in events {
                    tracker.dispatch(black_box(event));
                }
            });
            black_box(sum.get());
        });
    }

    group.finish();
}

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity/registry");

    // Every callback is registered twice; the second pass must be rejected by identity.
    for len in [8usize, 128, 1_024] {
        let callbacks: Vec<Rc<dyn Fn(f64)>> = (0..len)
            .map(|_| Rc::new(|_: f64| {}) as Rc<dyn Fn(f64)>)
            .collect();
        group.throughput(Throughput::Elements(2 * len as u64));

        group.bench_with_input(
            BenchmarkId::new("insert_twice", len),
            &callbacks,
            |b, callbacks| {
                b.iter_batched(
                    CallbackRegistry::<dyn Fn(f64)>::new,
                    |mut reg| {
                        for cb in callbacks.iter().chain(callbacks) {
                            reg.insert(cb.clone());
                        }
                        black_box(reg);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_registration);
criterion_main!(benches);
