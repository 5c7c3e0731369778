use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use strided_nd::{astype, format, full, ElementKind, FormatOptions, Scalar, StridedArray};

fn bench_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("full");
    for size in [10usize, 100, 300] {
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("float64", size), &size, |b, &size| {
            b.iter(|| {
                full(&[size, size], black_box(1.5), ElementKind::Float64)
                    .unwrap_or_else(|err| panic!("full failed: {err}"))
            })
        });
        group.bench_with_input(BenchmarkId::new("int32", size), &size, |b, &size| {
            b.iter(|| {
                full(&[size, size], black_box(7), ElementKind::Int32)
                    .unwrap_or_else(|err| panic!("full failed: {err}"))
            })
        });
    }
    group.finish();
}

fn bench_astype(c: &mut Criterion) {
    let mut group = c.benchmark_group("astype");
    let mut rng = StdRng::seed_from_u64(0);
    for size in [10usize, 100, 300] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let src = StridedArray::from_fn(&[size, size], ElementKind::Float64, |_| {
            Scalar::Number(rng.gen_range(-1000.0..1000.0))
        })
        .unwrap_or_else(|err| panic!("from_fn failed: {err}"));

        for kind in [ElementKind::Int32, ElementKind::Float32, ElementKind::Uint8Clamped] {
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &src, |b, src| {
                b.iter(|| astype(src, kind).unwrap_or_else(|err| panic!("astype failed: {err}")))
            });
        }
    }
    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    let mut rng = StdRng::seed_from_u64(1);
    let options = FormatOptions::default();
    for size in [4usize, 16, 31] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let ints = StridedArray::from_fn(&[size, size], ElementKind::Int32, |_| {
            Scalar::from(rng.gen_range(-100i32..100))
        })
        .unwrap_or_else(|err| panic!("from_fn failed: {err}"));
        let floats = StridedArray::from_fn(&[size, size], ElementKind::Float64, |_| {
            Scalar::Number(rng.gen::<f64>())
        })
        .unwrap_or_else(|err| panic!("from_fn failed: {err}"));

        group.bench_with_input(BenchmarkId::new("int32", size), &ints, |b, a| {
            b.iter(|| format(a, &options))
        });
        group.bench_with_input(BenchmarkId::new("float64", size), &floats, |b, a| {
            b.iter(|| format(a, &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full, bench_astype, bench_format);
criterion_main!(benches);
