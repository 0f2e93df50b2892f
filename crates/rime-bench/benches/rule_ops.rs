//! Criterion benchmarks for transition rules.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rime_bench::{cascade_profile, cave_profile, valley_profile};
use rime_rules::{
    run_cascade_simulation, run_dispersal, run_settling_simulation, run_until_cycle, CascadeRule,
    DisperseRule, FloorMode, PatrolRule, TransitionRule,
};
use rime_test_utils::{elf_grove, guard_lab, octopus_grid};

/// Benchmark: the canonical 100-tick cascade.
fn bench_cascade_canonical(c: &mut Criterion) {
    c.bench_function("cascade_canonical_100", |b| {
        b.iter_batched(
            octopus_grid,
            |g| black_box(run_cascade_simulation(g, 9, 100).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: single cascade ticks on a 100x100 field.
fn bench_cascade_tick_10k(c: &mut Criterion) {
    let grid = cascade_profile(100, 100).unwrap();
    let rule = CascadeRule::default();

    c.bench_function("cascade_tick_10k", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut g| black_box(rule.tick(&mut g).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: fill a floored 204x100 cave until the spawn blocks.
fn bench_settle_floored(c: &mut Criterion) {
    let (grid, rule) = cave_profile(204, 100, FloorMode::Solid).unwrap();

    c.bench_function("settle_floored_204x100", |b| {
        b.iter_batched(
            || grid.clone(),
            |g| black_box(run_settling_simulation(g, &rule).unwrap()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: one full drift period of a 60x20 valley.
fn bench_drift_period(c: &mut Criterion) {
    let (state, rule) = valley_profile(60, 20).unwrap();
    let period = rule.period();
    let transition = TransitionRule::Drift(rule);

    c.bench_function("drift_period_60x20", |b| {
        b.iter_batched(
            || state.clone(),
            |mut s| {
                for _ in 0..period {
                    s.step(&transition).unwrap();
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: canonical dispersal until still.
fn bench_dispersal_canonical(c: &mut Criterion) {
    c.bench_function("dispersal_canonical", |b| {
        b.iter_batched(
            elf_grove,
            |s| black_box(run_dispersal(s, &DisperseRule::default(), 1_000).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: canonical guard patrol with state memoisation.
fn bench_patrol_until_exit(c: &mut Criterion) {
    let rule = TransitionRule::Patrol(PatrolRule::default());

    c.bench_function("patrol_canonical_until_exit", |b| {
        b.iter_batched(
            guard_lab,
            |s| black_box(run_until_cycle(s, &rule, 10_000).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_cascade_canonical,
    bench_cascade_tick_10k,
    bench_settle_floored,
    bench_drift_period,
    bench_dispersal_canonical,
    bench_patrol_until_exit
);
criterion_main!(benches);
