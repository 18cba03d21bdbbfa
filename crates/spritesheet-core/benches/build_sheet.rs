use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};
use spritesheet_core::prelude::*;

fn generate_items(count: usize, min_size: u32, max_size: u32) -> Vec<Item> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            Item::from_rgba(format!("sprite_{}", i), RgbaImage::from_pixel(w, h, Rgba([i as u8, 0, 0, 255])))
        })
        .collect()
}

fn bench_build_sheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_sheet");
    let cfg = SheetConfig::builder()
        .with_max_dimensions(u32::MAX, 4096)
        .border(1)
        .build();

    for count in [50, 100, 200] {
        let items = generate_items(count, 16, 64);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("layout_only", count), &items, |b, items| {
            b.iter(|| black_box(layout_items(items, &cfg)))
        });
        group.bench_with_input(BenchmarkId::new("composite", count), &items, |b, items| {
            b.iter(|| black_box(build_sheet(items, &cfg)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_sheet);
criterion_main!(benches);
