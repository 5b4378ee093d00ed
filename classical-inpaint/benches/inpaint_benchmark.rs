use classical_inpaint::{Method, inpaint};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Benchmark both algorithms on a gradient image with a square hole.
pub fn inpaint_benchmarks(c: &mut Criterion) {
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(128, 128, |x, y| {
        Rgb([(x * 2) as u8, (y * 2) as u8, 128])
    }));
    let mask = GrayImage::from_fn(128, 128, |x, y| {
        if (48..80).contains(&x) && (48..80).contains(&y) {
            Luma([255])
        } else {
            Luma([0])
        }
    });

    let mut group = c.benchmark_group("inpaint");
    group.sample_size(10);

    group.bench_function("telea_128", |b| {
        b.iter(|| inpaint(black_box(&image), black_box(&mask), 3, Method::Telea).unwrap());
    });

    group.bench_function("ns_128", |b| {
        b.iter(|| inpaint(black_box(&image), black_box(&mask), 3, Method::NavierStokes).unwrap());
    });

    group.finish();
}

criterion_group!(benches, inpaint_benchmarks);
criterion_main!(benches);
