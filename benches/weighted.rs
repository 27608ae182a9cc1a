use criterion::{criterion_group, criterion_main, Criterion};
use lutable::table::Level;
use lutable::utilities::float::lerp;
use lutable::weighted::{weighted_interpolate, weighted_interpolate_batch};

fn build_three_d_table() -> Level<f64>
{
    let axis: Vec<f64> = (0..16).map(|index| index as f64 / 15.0).collect();
    let f = |x: f64, y: f64, z: f64| libm::erf(x) + y * y + z;
    Level::Table(axis.iter().map(|&x|
    {
        (x, Level::Table(axis.iter().map(|&y|
        {
            (y, Level::Table(axis.iter().map(|&z| (z, Level::Leaf(f(x, y, z)))).collect()))
        }).collect()))
    }).collect())
}

fn blend(_: f64, factor: f64, lower: &f64, upper: &f64) -> f64
{
    lerp(factor, *lower, *upper)
}

fn run_three_d(c: &mut Criterion)
{
    let table = build_three_d_table();
    let probe = [0.3, 0.1, 0.7];
    c.bench_function("3d", |b| b.iter(|| weighted_interpolate(&probe, &table, blend).unwrap()));
}

fn run_three_d_batch(c: &mut Criterion)
{
    let table = build_three_d_table();
    let probes = vec![vec![0.3, 0.1, 0.7]; 1000];
    c.bench_function("3d_batch", |b| b.iter(|| weighted_interpolate_batch(&probes, &table, blend).unwrap()));
}

criterion_group!(benches, run_three_d, run_three_d_batch);
criterion_main!(benches);
