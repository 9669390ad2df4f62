use criterion::{Criterion, black_box, criterion_group, criterion_main};
use miqat_math::{calendar_to_jd, dmath, sun_position};

fn trig_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("dmath");
    group.bench_function("arccos_clamped", |b| {
        b.iter(|| dmath::arccos(black_box(1.0001)))
    });
    group.bench_function("fix_hour_negative", |b| {
        b.iter(|| dmath::fix_hour(black_box(-37.25)))
    });
    group.finish();
}

fn solar_bench(c: &mut Criterion) {
    let jd = calendar_to_jd(2014, 4, 24.5);

    let mut group = c.benchmark_group("solar");
    group.bench_function("sun_position", |b| {
        b.iter(|| sun_position(black_box(jd)))
    });
    group.bench_function("calendar_to_jd", |b| {
        b.iter(|| calendar_to_jd(black_box(2018), black_box(1), black_box(19.0)))
    });
    group.finish();
}

criterion_group!(benches, trig_bench, solar_bench);
criterion_main!(benches);
