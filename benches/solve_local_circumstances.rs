use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use umbra::observer::ObserverConstants;
use umbra::LocalCircumstances;

/// Regular latitude/longitude grid over North America, inside the penumbral path.
fn north_america_grid() -> Vec<ObserverConstants> {
    let mut grid = Vec::new();
    for lat in (0..10).map(|i| 25.0 + 2.5 * i as f64) {
        for lon in (0..10).map(|i| -125.0 + 5.5 * i as f64) {
            if let Ok(observer) = ObserverConstants::new(lat, lon, None, None) {
                grid.push(observer);
            }
        }
    }
    grid
}

/// Single location inside the path of totality: all four contacts are solved.
fn bench_total(c: &mut Criterion) {
    let calc = LocalCircumstances::default();

    c.bench_function("solve_local_circumstances/total_35N_83W", |b| {
        b.iter(|| calc.solve_at(black_box(35.0), black_box(-83.0)))
    });
}

/// Single location outside the penumbra: only the mid-eclipse iteration runs.
fn bench_no_eclipse(c: &mut Criterion) {
    let calc = LocalCircumstances::default();

    c.bench_function("solve_local_circumstances/none_cape_town", |b| {
        b.iter(|| calc.solve_at(black_box(-33.9), black_box(18.4)))
    });
}

/// Sweep over a 10x10 grid of precomputed observers.
fn bench_grid(c: &mut Criterion) {
    let calc = LocalCircumstances::default();

    c.bench_function("solve_local_circumstances/grid_100", |b| {
        b.iter_batched(
            north_america_grid,
            |grid| {
                for observer in &grid {
                    let _ = black_box(calc.solve(observer));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_total, bench_no_eclipse, bench_grid);
criterion_main!(benches);
