//! Benchmarks for the automaton step and fitness evaluation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use methuselah::{
    compute::{Grid, Simulation, evolution::GeneticSearch},
    schema::{SearchConfig, pattern_of},
};

/// R-pentomino centered on a grid of the given size.
fn r_pentomino(grid_size: usize) -> Grid {
    let c = grid_size / 2;
    let seed = pattern_of([(c - 1, c), (c - 1, c + 1), (c, c - 1), (c, c), (c + 1, c)]);
    Grid::new(seed, grid_size).expect("seed fits the grid")
}

fn bench_grid_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_evolve");

    for size in [20, 64, 128] {
        // Advance into the chaotic phase so each step touches many cells.
        let mut life = r_pentomino(size);
        for _ in 0..100 {
            life.evolve();
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size + 1, size + 1)),
            &size,
            |b, _| {
                b.iter(|| {
                    let mut next = life.clone();
                    next.evolve();
                    black_box(next);
                });
            },
        );
    }

    group.finish();
}

fn bench_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation");

    for limit in [100, 400] {
        let life = r_pentomino(20);
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.iter(|| black_box(Simulation::new(&life, limit).simulate().max_size()));
        });
    }

    group.finish();
}

fn bench_next_generation(c: &mut Criterion) {
    let config = SearchConfig {
        pop_size: 20,
        random_seed: Some(42),
        ..Default::default()
    };
    let mut search = GeneticSearch::new(config).expect("valid config");
    search.init_population();

    c.bench_function("next_generation_pop20", |b| {
        b.iter(|| search.next_generation());
    });
}

criterion_group!(
    benches,
    bench_grid_evolve,
    bench_simulation,
    bench_next_generation
);
criterion_main!(benches);
