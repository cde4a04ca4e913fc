//! Full-game benchmarks using Criterion.rs.

use bb_core::data::{sample_away_team, sample_home_team};
use bb_core::{simulate, simulate_batch, simulate_game_json, GameRequest, SimulationOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_single_game(c: &mut Criterion) {
    let home = sample_home_team();
    let away = sample_away_team();
    let options = SimulationOptions::new(42);

    c.bench_function("simulate_game", |b| {
        b.iter(|| black_box(simulate(&home, &away, &options)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let home = sample_home_team();
    let away = sample_away_team();
    let options = SimulationOptions::new(0);

    let mut group = c.benchmark_group("simulate_batch");
    for games in [10u64, 100] {
        let seeds: Vec<u64> = (0..games).collect();
        group.bench_with_input(BenchmarkId::from_parameter(games), &seeds, |b, seeds| {
            b.iter(|| black_box(simulate_batch(&home, &away, seeds, &options)))
        });
    }
    group.finish();
}

fn bench_json_api(c: &mut Criterion) {
    let request = GameRequest::new(42, sample_home_team(), sample_away_team());
    let json = serde_json::to_string(&request).unwrap_or_default();

    c.bench_function("simulate_game_json", |b| {
        b.iter(|| black_box(simulate_game_json(&json)))
    });
}

criterion_group!(benches, bench_single_game, bench_batch, bench_json_api);
criterion_main!(benches);
