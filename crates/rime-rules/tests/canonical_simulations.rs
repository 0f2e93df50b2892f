use rime_core::{coord2, CellState, SimError, TickId};
use rime_rules::{
    run_cascade, run_cascade_simulation, run_dispersal, run_settling_simulation, run_until_cycle,
    CascadeOptions, CascadeRule, DisperseRule, FloorMode, PatrolRule, SettleOutcome, Termination,
    TickReport, TransitionRule,
};
use rime_test_utils::{elf_grove, guard_lab, octopus_grid, rock_cave};

// ── Cascade ─────────────────────────────────────────────────────

#[test]
fn octopus_hundred_ticks_trigger_1656() {
    let result = run_cascade_simulation(octopus_grid(), 9, 100).unwrap();
    assert_eq!(result.total_triggers, 1656);
    assert_eq!(result.ticks_completed, 100);
    assert_eq!(result.termination, Termination::TickLimit);
    assert_eq!(result.first_all_triggered_tick, None);
}

#[test]
fn octopus_ten_ticks_trigger_204() {
    let result = run_cascade_simulation(octopus_grid(), 9, 10).unwrap();
    assert_eq!(result.total_triggers, 204);
}

#[test]
fn octopus_synchronise_at_195() {
    let result = run_cascade(
        octopus_grid(),
        &CascadeRule::default(),
        CascadeOptions {
            max_ticks: 1_000,
            stop_on_synchronized: true,
        },
    )
    .unwrap();
    assert_eq!(result.first_all_triggered_tick, Some(195));
    assert_eq!(result.ticks_completed, 195);
    assert_eq!(result.termination, Termination::Synchronized);
    assert!(result.grid.cells().iter().all(|c| *c == CellState::Value(0)));
}

// ── Settling ────────────────────────────────────────────────────

#[test]
fn sand_without_floor_settles_24() {
    let (grid, rule) = rock_cave(FloorMode::Open);
    let result = run_settling_simulation(grid, &rule).unwrap();
    assert_eq!(result.ticks_completed, 24);
    assert!(matches!(result.termination, Termination::Escaped { .. }));
    assert_eq!(result.grid.count(|c| *c == CellState::Occupied), 24);
}

#[test]
fn sand_with_floor_settles_93() {
    let (grid, rule) = rock_cave(FloorMode::Solid);
    let result = run_settling_simulation(grid, &rule).unwrap();
    assert_eq!(result.ticks_completed, 93);
    assert_eq!(result.termination, Termination::SpawnBlocked);
    assert_eq!(result.grid.get(rule.spawn()), Ok(&CellState::Occupied));
}

#[test]
fn termination_repeats_on_stored_grid() {
    for floor in [FloorMode::Open, FloorMode::Solid] {
        let (grid, rule) = rock_cave(floor);
        let result = run_settling_simulation(grid, &rule).unwrap();
        let mut replay = result.grid.clone();
        for _ in 0..3 {
            assert_eq!(
                rule.tick(&mut replay),
                Ok(SettleOutcome::Terminated(result.termination.clone()))
            );
        }
        assert_eq!(replay, result.grid);
    }
}

#[test]
fn settling_through_transition_rule() {
    let (grid, rule) = rock_cave(FloorMode::Open);
    let mut state = rime_rules::SimulationState::new(grid);
    let transition = TransitionRule::from(rule);
    let mut settled = 0;
    loop {
        match state.step(&transition).unwrap() {
            TickReport::Settled { .. } => settled += 1,
            TickReport::Terminated(_) => break,
            other => panic!("unexpected report {other:?}"),
        }
    }
    assert_eq!(settled, 24);
    assert_eq!(state.tick, TickId(25));
}

#[test]
fn prefilled_spawn_is_malformed() {
    let (mut grid, rule) = rock_cave(FloorMode::Solid);
    grid.set(rule.spawn(), CellState::Wall).unwrap();
    assert!(matches!(
        run_settling_simulation(grid, &rule),
        Err(SimError::MalformedState { .. })
    ));
}

// ── Dispersal ───────────────────────────────────────────────────

#[test]
fn elves_ten_rounds_leave_110_empty() {
    let report = run_dispersal(elf_grove(), &DisperseRule::default(), 10).unwrap();
    assert_eq!(report.rounds, 10);
    assert_eq!(report.termination, Termination::TickLimit);
    assert_eq!(report.empty_ground, 110);
}

#[test]
fn elves_still_at_round_20() {
    let report = run_dispersal(elf_grove(), &DisperseRule::default(), 1_000).unwrap();
    assert_eq!(report.first_still_round, Some(20));
    assert_eq!(report.rounds, 20);
    assert_eq!(report.termination, Termination::Stable);
    assert_eq!(
        report.state.grid.count(|c| *c == CellState::Occupied),
        report.state.movers.len()
    );
}

#[test]
fn disperse_does_not_disturb_prior_snapshot() {
    let start = elf_grove();
    let rule = TransitionRule::Disperse(DisperseRule::default());
    let (after, report) = start.next(&rule).unwrap();
    assert_eq!(report, TickReport::Dispersed { moved: 22 - count_still(&start, &after) });
    assert_eq!(start.tick, TickId(0));
    assert_ne!(start.grid, after.grid);
    assert_eq!(start.grid.get(&coord2(29, 25)), Ok(&CellState::Occupied));
}

fn count_still(a: &rime_rules::SimulationState, b: &rime_rules::SimulationState) -> usize {
    a.movers
        .iter()
        .zip(&b.movers)
        .filter(|(x, y)| x.position == y.position)
        .count()
}

// ── Patrol and cycles ───────────────────────────────────────────

#[test]
fn guard_patrols_41_cells_then_leaves() {
    let rule = TransitionRule::Patrol(PatrolRule::default());
    let report = run_until_cycle(guard_lab(), &rule, 10_000).unwrap();
    assert_eq!(
        report.termination,
        Termination::Escaped {
            at: coord2(7, 10)
        }
    );
    assert_eq!(report.visited.len(), 41);
    assert_eq!(report.visited.first(), Some(&coord2(4, 6)));
}

#[test]
fn six_single_obstructions_trap_the_guard() {
    let start = guard_lab();
    let rule = TransitionRule::Patrol(PatrolRule::default());
    let route = run_until_cycle(start.clone(), &rule, 10_000).unwrap().visited;

    let mut trapping = Vec::new();
    for cell in route.iter().skip(1) {
        let mut blocked = start.clone();
        blocked.grid.set(cell, CellState::Wall).unwrap();
        let report = run_until_cycle(blocked, &rule, 10_000).unwrap();
        assert_ne!(report.termination, Termination::TickLimit, "{cell:?}");
        if let Termination::Cycle { period, .. } = report.termination {
            assert!(period > 0);
            trapping.push(cell.clone());
        }
    }
    assert_eq!(trapping.len(), 6);
    assert!(trapping.contains(&coord2(3, 6)));
}
