//! Benchmarks for the simulation step and fitness evaluation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use life_forge::{
    compute::{Board, Construct, FitnessEvaluator},
    schema::SearchConfig,
};

fn bench_board_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_step");

    for size in [50, 100, 200] {
        let mut rng = StdRng::seed_from_u64(42);
        let construct = Construct::random(6, 6, 0.2, &mut rng);
        let mut board = Board::new(size, size);
        board.place_centered(&construct.grid);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    black_box(&mut board).step();
                });
            },
        );
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for budget in [100, 300] {
        let config = SearchConfig {
            iteration_budget: budget,
            ..Default::default()
        };
        let evaluator = FitnessEvaluator::new(&config).expect("valid configuration");

        let mut rng = StdRng::seed_from_u64(7);
        let construct = Construct::random(
            config.construct_width,
            config.construct_height,
            config.alive_probability,
            &mut rng,
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("budget_{}", budget)),
            &budget,
            |b, _| {
                b.iter(|| evaluator.evaluate(black_box(&construct)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_board_step, bench_evaluate);
criterion_main!(benches);
