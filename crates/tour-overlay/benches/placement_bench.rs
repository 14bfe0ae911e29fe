//! Benchmarks for tooltip placement and view building.
//!
//! Placement runs on every frame tick that changes the target rectangle, so
//! it must stay far below a frame budget.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tour_core::{Rect, Side, Size, TourStep};
use tour_overlay::{OverlayBuilder, TooltipLayout};

fn bench_resolve_side(c: &mut Criterion) {
    let viewport = Size::new(1280.0, 800.0);
    let targets = [
        (Rect::new(10.0, 100.0, 50.0, 20.0), Side::Left),
        (Rect::new(1100.0, 300.0, 80.0, 30.0), Side::Right),
        (Rect::new(400.0, 20.0, 200.0, 40.0), Side::Top),
        (Rect::new(400.0, 760.0, 200.0, 40.0), Side::Bottom),
    ];

    c.bench_function("placement/resolve_side", |b| {
        b.iter(|| {
            for (target, side) in targets {
                black_box(TooltipLayout::new(target, side).resolve_side(black_box(viewport)));
            }
        });
    });

    c.bench_function("placement/compute", |b| {
        b.iter(|| {
            for (target, side) in targets {
                black_box(TooltipLayout::new(target, side).compute(black_box(viewport)));
            }
        });
    });
}

fn bench_build_view(c: &mut Criterion) {
    let builder = OverlayBuilder::default();
    let step = TourStep::new("tour-filter", "Smart Filters", "Use these filters.");
    let viewport = Size::new(1280.0, 800.0);
    let target = Rect::new(240.0, 180.0, 640.0, 48.0);

    c.bench_function("view/spotlight", |b| {
        b.iter(|| black_box(builder.build(&step, 2, 6, Some(black_box(target)), viewport)));
    });

    c.bench_function("view/fallback", |b| {
        b.iter(|| black_box(builder.build(&step, 2, 6, None, viewport)));
    });
}

criterion_group!(benches, bench_resolve_side, bench_build_view);
criterion_main!(benches);
