use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use placard_core::{Aabb, AngleRange, CollisionIndex, GlyphBox, Point};

/// Generate N single-glyph labels scattered across the tile in a grid.
fn generate_labels(n: usize) -> Vec<(Point, Vec<GlyphBox>)> {
    let cols = 60;
    (0..n)
        .map(|i| {
            let row = i / cols;
            let col = i % cols;
            let x = 40.0 + col as f64 * 66.0;
            let y = 40.0 + (row % 60) as f64 * 66.0;
            let anchor = Point::new(x.min(4056.0), y.min(4056.0));
            let glyph = GlyphBox {
                padding: 2.0,
                ..GlyphBox::new(Aabb::new(-28.0, -9.0, 28.0, 9.0), anchor)
            };
            (anchor, vec![glyph])
        })
        .collect()
}

/// A tile with every generated label committed at its solved scale.
fn populated_tile(labels: &[(Point, Vec<GlyphBox>)]) -> CollisionIndex {
    let mut tile = CollisionIndex::new(10.0, 4096.0, 512.0).unwrap();
    for (anchor, glyphs) in labels {
        if let Some(scale) = tile.placement_scale(glyphs, 1.0) {
            tile.insert(glyphs, *anchor, scale, AngleRange::empty(), true);
        }
    }
    tile
}

fn bench_placement_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_scale");

    for size in [100, 1_000, 3_000] {
        let labels = generate_labels(size);
        let tile = populated_tile(&labels);
        let probe = vec![GlyphBox {
            padding: 2.0,
            ..GlyphBox::new(Aabb::new(-28.0, -9.0, 28.0, 9.0), Point::new(2011.0, 2007.0))
        }];

        group.bench_with_input(BenchmarkId::from_parameter(size), &tile, |b, tile| {
            b.iter(|| tile.placement_scale(black_box(&probe), 1.0))
        });
    }
    group.finish();
}

fn bench_placement_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_pass");

    for size in [100, 1_000, 3_000] {
        let labels = generate_labels(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &labels, |b, labels| {
            b.iter(|| populated_tile(black_box(labels)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_placement_scale, bench_placement_pass);
criterion_main!(benches);
