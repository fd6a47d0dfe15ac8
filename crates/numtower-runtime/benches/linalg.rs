use criterion::{black_box, criterion_group, criterion_main, Criterion};
use numtower_runtime::{det, inverse, mul, NumberValue};

fn square(n: usize) -> NumberValue {
    let elements = (0..n * n)
        .map(|k| {
            let (r, c) = (k / n, k % n);
            if r == c {
                NumberValue::Integer(n as i64)
            } else {
                NumberValue::Real(((r * 7 + c * 3) % 5) as f64 * 0.5)
            }
        })
        .collect();
    NumberValue::matrix(n, n, elements)
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinant");
    for n in [3, 5, 7] {
        let m = square(n);
        group.bench_function(format!("{n}x{n}"), |b| b.iter(|| det(black_box(m.clone()))));
    }
    group.finish();
}

fn bench_inverse(c: &mut Criterion) {
    let m = square(4);
    c.bench_function("inverse 4x4", |b| b.iter(|| inverse(black_box(m.clone()))));
}

fn bench_product(c: &mut Criterion) {
    let a = square(16);
    let b = square(16);
    c.bench_function("product 16x16", |bench| {
        bench.iter(|| mul(black_box(a.clone()), black_box(b.clone())))
    });
}

criterion_group!(benches, bench_determinant, bench_inverse, bench_product);
criterion_main!(benches);
