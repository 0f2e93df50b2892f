//! Canonical worked examples and the parsers that load them.

use crate::FixtureError;
use rime_core::{coord2, coord3, CellState, Coord};
use rime_rules::{DriftRule, FloorMode, Heading, Mover, SettleRule, SimulationState};
use rime_space::{EdgeBehavior, Extent, Grid};

// ── Canonical texts ─────────────────────────────────────────────

pub const OCTOPUS_EXAMPLE: &str = "\
5483143223
2745854711
5264556173
6141336146
6357385478
4167524645
2176841721
6882881134
4846848554
5283751526";

pub const ROCK_EXAMPLE: &str = "\
498,4 -> 498,6 -> 496,6
503,4 -> 502,4 -> 502,9 -> 494,9";

pub const VALLEY_EXAMPLE: &str = "\
#.######
#>>.<^<#
#.<..<<#
#>v.><>#
#<^v^^>#
######.#";

pub const ELVES_EXAMPLE: &str = "\
....#..
..###.#
#...#.#
.#...##
#.###..
##.#.##
.#..#..";

pub const GUARD_EXAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...";

pub const CHITON_EXAMPLE: &str = "\
1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581";

pub const HEIGHTMAP_EXAMPLE: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi";

pub const DROPLET_EXAMPLE: &str = "\
2,2,2
1,2,2
3,2,2
2,1,2
2,3,2
2,2,1
2,2,3
2,2,4
2,2,6
1,2,5
3,2,5
2,1,5
2,3,5";

// ── Shared helpers ──────────────────────────────────────────────

fn lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Parse a rectangular character map, calling `cell` with each glyph.
fn parse_chars<T>(
    text: &str,
    mut cell: impl FnMut(Coord, char) -> Result<T, FixtureError>,
) -> Result<Grid<T>, FixtureError> {
    let rows = lines(text);
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut cells = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(FixtureError::Parse {
                line: y + 1,
                reason: format!("expected {width} columns"),
            });
        }
        for (x, ch) in row.chars().enumerate() {
            cells.push(cell(coord2(x as i32, y as i32), ch)?);
        }
    }
    let extent = Extent::new_2d(width as u32, rows.len() as u32)?;
    Ok(Grid::from_cells(extent, EdgeBehavior::Absorb, cells)?)
}

fn bad_glyph(at: &Coord, ch: char) -> FixtureError {
    FixtureError::Parse {
        line: at[1] as usize + 1,
        reason: format!("unexpected {ch:?} at column {}", at[0] + 1),
    }
}

fn parse_ints<const N: usize>(line: usize, text: &str) -> Result<[i32; N], FixtureError> {
    let mut out = [0; N];
    let mut parts = text.split(',');
    for slot in &mut out {
        let part = parts.next().ok_or_else(|| FixtureError::Parse {
            line,
            reason: format!("expected {N} comma-separated integers"),
        })?;
        *slot = part.trim().parse().map_err(|_| FixtureError::Parse {
            line,
            reason: format!("bad integer {part:?}"),
        })?;
    }
    Ok(out)
}

// ── Digit grids (cascade, weighted search) ──────────────────────

/// Each digit becomes a [`CellState::Value`].
pub fn parse_digit_grid(text: &str) -> Result<Grid<CellState>, FixtureError> {
    parse_chars(text, |at, ch| {
        ch.to_digit(10)
            .map(CellState::Value)
            .ok_or_else(|| bad_glyph(&at, ch))
    })
}

/// The 10×10 energy-level example (1656 triggers in 100 ticks).
pub fn octopus_grid() -> Grid<CellState> {
    parse_digit_grid(OCTOPUS_EXAMPLE).expect("canonical octopus example parses")
}

/// The 10×10 risk-level example (lowest total risk 40).
pub fn chiton_risk() -> Grid<CellState> {
    parse_digit_grid(CHITON_EXAMPLE).expect("canonical risk example parses")
}

// ── Rock cave (settling) ────────────────────────────────────────

/// Draw rock paths and return the cave plus a sand rule spawning at
/// `(spawn_x, 0)`.
///
/// The grid is shifted so its left column is 0 and is wide enough for the
/// sand pile to reach either side of the floor. With [`FloorMode::Open`]
/// the bottom row is the lowest rock; with [`FloorMode::Solid`] the grid
/// gets one more empty row and the floor sits just below it.
pub fn parse_rock_paths(
    text: &str,
    spawn_x: i32,
    floor: FloorMode,
) -> Result<(Grid<CellState>, SettleRule), FixtureError> {
    let mut paths = Vec::new();
    for (i, line) in lines(text).into_iter().enumerate() {
        let points = line
            .split("->")
            .map(|p| parse_ints::<2>(i + 1, p))
            .collect::<Result<Vec<_>, _>>()?;
        paths.push(points);
    }
    let all = paths.iter().flatten();
    let max_y = all.clone().map(|p| p[1]).max().unwrap_or(0);
    let height = match floor {
        FloorMode::Open => max_y + 1,
        FloorMode::Solid => max_y + 2,
    };
    let lo = all.clone().map(|p| p[0]).min().unwrap_or(spawn_x).min(spawn_x - height) - 1;
    let hi = all.map(|p| p[0]).max().unwrap_or(spawn_x).max(spawn_x + height) + 1;

    let mut grid = Grid::create_2d(
        (hi - lo + 1) as u32,
        height as u32,
        EdgeBehavior::Absorb,
        CellState::Empty,
    )?;
    for (i, path) in paths.iter().enumerate() {
        for pair in path.windows(2) {
            let [a, b] = [pair[0], pair[1]];
            if a[0] != b[0] && a[1] != b[1] {
                return Err(FixtureError::Parse {
                    line: i + 1,
                    reason: format!("segment {a:?} -> {b:?} is not axis-aligned"),
                });
            }
            for x in a[0].min(b[0])..=a[0].max(b[0]) {
                for y in a[1].min(b[1])..=a[1].max(b[1]) {
                    grid.set(&coord2(x - lo, y), CellState::Wall)?;
                }
            }
        }
    }
    let rule = SettleRule::sand(coord2(spawn_x - lo, 0), floor)?;
    Ok((grid, rule))
}

/// The two-formation cave with sand entering at x = 500
/// (24 settle before one escapes; 93 with a floor).
pub fn rock_cave(floor: FloorMode) -> (Grid<CellState>, SettleRule) {
    parse_rock_paths(ROCK_EXAMPLE, 500, floor).expect("canonical rock example parses")
}

// ── Windy valley (temporal search) ──────────────────────────────

/// A walled valley with drifting obstacles.
#[derive(Clone, Debug)]
pub struct Valley {
    /// Walls and floor; obstacles are movers, not cells.
    pub state: SimulationState,
    /// Drift interior (everything inside the walls).
    pub rule: DriftRule,
    /// The gap in the top wall.
    pub start: Coord,
    /// The gap in the bottom wall.
    pub goal: Coord,
}

/// `#` wall, `.` floor, `^ v < >` an obstacle drifting that way.
pub fn parse_valley(text: &str) -> Result<Valley, FixtureError> {
    let mut movers = Vec::new();
    let grid = parse_chars(text, |at, ch| {
        let heading = match ch {
            '#' => return Ok(CellState::Wall),
            '.' => return Ok(CellState::Empty),
            '^' => Heading::North,
            'v' => Heading::South,
            '<' => Heading::West,
            '>' => Heading::East,
            _ => return Err(bad_glyph(&at, ch)),
        };
        movers.push(Mover::heading(movers.len() as u32, at, heading));
        Ok(CellState::Empty)
    })?;
    if grid.width() < 3 || grid.height() < 3 {
        return Err(FixtureError::Parse {
            line: 1,
            reason: "valley needs walls around a non-empty interior".into(),
        });
    }
    let gap = |y: i32| {
        (0..grid.width() as i32)
            .map(|x| coord2(x, y))
            .find(|c| grid.get(c).is_ok_and(|s| s.is_open()))
            .ok_or_else(|| FixtureError::Parse {
                line: y as usize + 1,
                reason: "no gap in the wall".into(),
            })
    };
    let start = gap(0)?;
    let goal = gap(grid.height() as i32 - 1)?;
    let interior = Extent::new_2d(grid.width() - 2, grid.height() - 2)?;
    let rule = DriftRule::new(coord2(1, 1), interior)?;
    Ok(Valley {
        state: SimulationState::with_movers(grid, movers),
        rule,
        start,
        goal,
    })
}

/// The 6×4-interior valley (18 one way, 54 for three legs).
pub fn windy_valley() -> Valley {
    parse_valley(VALLEY_EXAMPLE).expect("canonical valley example parses")
}

// ── Elf grove (dispersal) ───────────────────────────────────────

/// `#` is an elf, `.` open ground; the map is surrounded by `pad` empty
/// cells on every side.
pub fn parse_elves(text: &str, pad: u32) -> Result<SimulationState, FixtureError> {
    let map = parse_chars(text, |at, ch| match ch {
        '#' => Ok(true),
        '.' => Ok(false),
        _ => Err(bad_glyph(&at, ch)),
    })?;
    let mut grid = Grid::create_2d(
        map.width() + 2 * pad,
        map.height() + 2 * pad,
        EdgeBehavior::Absorb,
        CellState::Empty,
    )?;
    let mut movers = Vec::new();
    for (at, &elf) in map.iter() {
        if elf {
            let pos = coord2(at[0] + pad as i32, at[1] + pad as i32);
            grid.set(&pos, CellState::Occupied)?;
            movers.push(Mover::stationary(movers.len() as u32, pos));
        }
    }
    Ok(SimulationState::with_movers(grid, movers))
}

/// The 7×7 grove padded for 20 rounds (110 empty after 10; still at 20).
pub fn elf_grove() -> SimulationState {
    parse_elves(ELVES_EXAMPLE, 25).expect("canonical elves example parses")
}

// ── Guard lab (patrol, cycle detection) ─────────────────────────

/// `#` obstruction, `.` floor, `^ v < >` a guard facing that way.
pub fn parse_patrol(text: &str) -> Result<SimulationState, FixtureError> {
    let mut movers = Vec::new();
    let grid = parse_chars(text, |at, ch| {
        let heading = match ch {
            '#' => return Ok(CellState::Wall),
            '.' => return Ok(CellState::Empty),
            '^' => Heading::North,
            'v' => Heading::South,
            '<' => Heading::West,
            '>' => Heading::East,
            _ => return Err(bad_glyph(&at, ch)),
        };
        movers.push(Mover::heading(movers.len() as u32, at, heading));
        Ok(CellState::Empty)
    })?;
    Ok(SimulationState::with_movers(grid, movers))
}

/// The 10×10 lab (41 cells patrolled; 6 single obstructions cause a loop).
pub fn guard_lab() -> SimulationState {
    parse_patrol(GUARD_EXAMPLE).expect("canonical guard example parses")
}

// ── Heightmap (static BFS) ──────────────────────────────────────

/// Heights `a..=z` as `Value(0..=25)` with marked endpoints.
#[derive(Clone, Debug)]
pub struct Heightmap {
    pub grid: Grid<CellState>,
    /// `S`, height `a`.
    pub start: Coord,
    /// `E`, height `z`.
    pub goal: Coord,
}

pub fn parse_heightmap(text: &str) -> Result<Heightmap, FixtureError> {
    let (mut start, mut goal) = (None, None);
    let grid = parse_chars(text, |at, ch| {
        let h = match ch {
            'S' => {
                start = Some(at);
                'a'
            }
            'E' => {
                goal = Some(at);
                'z'
            }
            'a'..='z' => ch,
            _ => return Err(bad_glyph(&at, ch)),
        };
        Ok(CellState::Value(h as u32 - 'a' as u32))
    })?;
    let missing = |what: &str| FixtureError::Parse {
        line: 1,
        reason: format!("no {what} marker"),
    };
    Ok(Heightmap {
        grid,
        start: start.ok_or_else(|| missing("S"))?,
        goal: goal.ok_or_else(|| missing("E"))?,
    })
}

/// The 8×5 hill (31 steps from S, 29 from the best `a`).
pub fn heightmap() -> Heightmap {
    parse_heightmap(HEIGHTMAP_EXAMPLE).expect("canonical heightmap parses")
}

// ── Lava droplet (3-D surface) ──────────────────────────────────

/// One `x,y,z` unit cube per line, as [`CellState::Occupied`] cells in a
/// 3-D grid with one empty layer on every side.
pub fn parse_droplet(text: &str) -> Result<Grid<CellState>, FixtureError> {
    let cubes = lines(text)
        .into_iter()
        .enumerate()
        .map(|(i, l)| parse_ints::<3>(i + 1, l))
        .collect::<Result<Vec<_>, _>>()?;
    let mut lo = [i32::MAX; 3];
    let mut hi = [i32::MIN; 3];
    for c in &cubes {
        for axis in 0..3 {
            lo[axis] = lo[axis].min(c[axis]);
            hi[axis] = hi[axis].max(c[axis]);
        }
    }
    if cubes.is_empty() {
        (lo, hi) = ([0; 3], [0; 3]);
    }
    let size = |axis: usize| (hi[axis] - lo[axis] + 3) as u32;
    let mut grid = Grid::create_3d(
        size(0),
        size(1),
        size(2),
        EdgeBehavior::Absorb,
        CellState::Empty,
    )?;
    for c in &cubes {
        let at = coord3(c[0] - lo[0] + 1, c[1] - lo[1] + 1, c[2] - lo[2] + 1);
        grid.set(&at, CellState::Occupied)?;
    }
    Ok(grid)
}

/// The 13-cube droplet (64 exposed faces, 58 on the exterior).
pub fn lava_droplet() -> Grid<CellState> {
    parse_droplet(DROPLET_EXAMPLE).expect("canonical droplet parses")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octopus_shape() {
        let g = octopus_grid();
        assert_eq!((g.width(), g.height()), (10, 10));
        assert_eq!(g.get(&coord2(0, 0)), Ok(&CellState::Value(5)));
        assert_eq!(g.get(&coord2(9, 9)), Ok(&CellState::Value(6)));
    }

    #[test]
    fn rock_cave_walls() {
        let (g, rule) = rock_cave(FloorMode::Open);
        assert_eq!(g.height(), 10);
        assert_eq!(g.count(|c| *c == CellState::Wall), 20);
        let spawn = rule.spawn().clone();
        assert_eq!(g.get(&spawn), Ok(&CellState::Empty));
        let (solid, _) = rock_cave(FloorMode::Solid);
        assert_eq!(solid.height(), 11);
    }

    #[test]
    fn valley_parts() {
        let v = windy_valley();
        assert_eq!(v.start, coord2(1, 0));
        assert_eq!(v.goal, coord2(6, 5));
        assert_eq!(v.state.movers.len(), 19);
        assert_eq!(v.rule.period(), 12);
    }

    #[test]
    fn elves_are_cells_and_movers() {
        let s = elf_grove();
        assert_eq!(s.movers.len(), 22);
        assert_eq!(s.grid.count(|c| *c == CellState::Occupied), 22);
    }

    #[test]
    fn guard_starts_facing_north() {
        let s = guard_lab();
        assert_eq!(s.movers.len(), 1);
        assert_eq!(s.movers[0].position, coord2(4, 6));
        assert_eq!(s.movers[0].heading, Some(Heading::North));
        assert_eq!(s.grid.count(|c| *c == CellState::Wall), 8);
    }

    #[test]
    fn heightmap_markers() {
        let h = heightmap();
        assert_eq!(h.start, coord2(0, 0));
        assert_eq!(h.goal, coord2(5, 2));
        assert_eq!(h.grid.get(&h.goal), Ok(&CellState::Value(25)));
    }

    #[test]
    fn droplet_padding() {
        let g = lava_droplet();
        assert_eq!((g.width(), g.height(), g.depth()), (5, 5, 8));
        assert_eq!(g.count(|c| *c == CellState::Occupied), 13);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = parse_digit_grid("123\n45").unwrap_err();
        assert!(matches!(err, FixtureError::Parse { line: 2, .. }));
    }
}
