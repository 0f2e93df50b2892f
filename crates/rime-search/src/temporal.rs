//! Breadth-first search over `(position, time)`.

use crate::config::SearchConfig;
use crate::metrics::SearchMetrics;
use crate::provider::TimeIndexedGridProvider;
use indexmap::IndexSet;
use rime_core::{ConfigError, Coord, SearchError};

/// A minimum-time route, one position per tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedPath {
    /// Absolute time of `positions[0]`.
    pub start_time: u64,
    /// Position at `start_time + i`. Starts at the start, ends at the goal.
    pub positions: Vec<Coord>,
    /// Work done finding it.
    pub metrics: SearchMetrics,
}

impl TimedPath {
    /// Ticks from start to goal.
    pub fn duration(&self) -> u64 {
        self.positions.len().saturating_sub(1) as u64
    }

    /// Absolute time the goal is reached.
    ///
    /// Saturates at `u64::MAX`; paths returned by a search never do.
    pub fn arrival_time(&self) -> u64 {
        self.start_time.saturating_add(self.duration())
    }
}

/// Shortest-time search against a [`TimeIndexedGridProvider`].
///
/// Every move, including waiting, takes one tick, so level-order BFS
/// yields minimum arrival time. Nodes are deduplicated on
/// `(cell, t mod period)`; revisiting a cell at the same phase later can
/// never arrive sooner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemporalSearch {
    config: SearchConfig,
}

impl TemporalSearch {
    /// A search with the given configuration.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find a minimum-time path from `start` (occupied at `start_time`) to
    /// `goal`.
    ///
    /// Fails with [`SearchError::Grid`] if either endpoint is outside the
    /// provider's grid, and with [`SearchError::Unreachable`] if the start
    /// is blocked at `start_time` or the goal is not reached within the
    /// configured bound. Time never wraps: a search that would need a tick
    /// past `u64::MAX` is unreachable after the levels explored so far.
    pub fn shortest_path<P>(
        &self,
        provider: &P,
        start: &Coord,
        goal: &Coord,
        start_time: u64,
    ) -> Result<TimedPath, SearchError>
    where
        P: TimeIndexedGridProvider + ?Sized,
    {
        let period = provider.period();
        if period == 0 {
            return Err(ConfigError::InvalidSearch {
                reason: "provider period must be at least 1".into(),
            }
            .into());
        }
        let base = provider.snapshot_at(start_time);
        self.config.validate_for(base.ndim())?;
        let start = base.normalize(start)?;
        let goal = base.normalize(goal)?;
        let bound = self.config.bound(period, base.cell_count());
        let mut metrics = SearchMetrics {
            period,
            ..SearchMetrics::default()
        };
        let unreachable = |bound| SearchError::Unreachable {
            start: start.clone(),
            goal: goal.clone(),
            bound,
        };

        if !*base.get(&start)? {
            return Err(unreachable(0));
        }
        if start == goal {
            return Ok(TimedPath {
                start_time,
                positions: vec![start.clone()],
                metrics,
            });
        }

        // Node id = index in `visited`; `parents[id]` is the node it was
        // discovered from.
        let mut visited: IndexSet<(usize, u64)> = IndexSet::new();
        let mut parents: Vec<Option<usize>> = Vec::new();
        visited.insert((base.index_of(&start)?, start_time % period));
        parents.push(None);

        let mut frontier = vec![0usize];
        let mut time = start_time;
        while !frontier.is_empty() && metrics.levels < bound {
            let Some(next_time) = time.checked_add(1) else {
                break;
            };
            let phase = next_time % period;
            let snap = provider.snapshot_at(next_time);
            let mut next = Vec::new();
            for &id in &frontier {
                metrics.nodes_expanded += 1;
                let here = snap.coord_at(visited[id].0);
                let mut moves = snap.neighbours(&here, self.config.connectivity)?;
                if self.config.allow_wait {
                    moves.push(here);
                }
                for cand in moves {
                    if !*snap.get(&cand)? {
                        continue;
                    }
                    let (nid, fresh) = visited.insert_full((snap.index_of(&cand)?, phase));
                    if !fresh {
                        continue;
                    }
                    parents.push(Some(id));
                    metrics.nodes_enqueued += 1;
                    if cand == goal {
                        metrics.levels += 1;
                        metrics.peak_frontier = metrics.peak_frontier.max(frontier.len());
                        let positions = replay(&visited, &parents, nid, |rank| snap.coord_at(rank));
                        return Ok(TimedPath {
                            start_time,
                            positions,
                            metrics,
                        });
                    }
                    next.push(nid);
                }
            }
            metrics.levels += 1;
            metrics.peak_frontier = metrics.peak_frontier.max(frontier.len());
            frontier = next;
            time = next_time;
        }
        Err(unreachable(metrics.levels))
    }

    /// Chain searches through `waypoints`; each leg starts at the previous
    /// leg's arrival time. Fewer than two waypoints yield no legs.
    pub fn traverse_legs<P>(
        &self,
        provider: &P,
        waypoints: &[Coord],
        start_time: u64,
    ) -> Result<Vec<TimedPath>, SearchError>
    where
        P: TimeIndexedGridProvider + ?Sized,
    {
        let mut legs = Vec::with_capacity(waypoints.len().saturating_sub(1));
        let mut time = start_time;
        for pair in waypoints.windows(2) {
            let leg = self.shortest_path(provider, &pair[0], &pair[1], time)?;
            time = leg.arrival_time();
            legs.push(leg);
        }
        Ok(legs)
    }
}

fn replay(
    visited: &IndexSet<(usize, u64)>,
    parents: &[Option<usize>],
    last: usize,
    coord_at: impl Fn(usize) -> Coord,
) -> Vec<Coord> {
    let mut out = Vec::new();
    let mut cur = Some(last);
    while let Some(id) = cur {
        out.push(coord_at(visited[id].0));
        cur = parents[id];
    }
    out.reverse();
    out
}

/// Minimum ticks from `start` to `goal`, leaving at `start_time`, under
/// the default configuration (4-connected, waiting allowed).
pub fn find_shortest_time<P>(
    provider: &P,
    start: &Coord,
    goal: &Coord,
    start_time: u64,
) -> Result<u64, SearchError>
where
    P: TimeIndexedGridProvider + ?Sized,
{
    TemporalSearch::default()
        .shortest_path(provider, start, goal, start_time)
        .map(|p| p.duration())
}

/// Total ticks to visit `waypoints` in order, leaving at `start_time`.
///
/// Each leg's arrival tick is counted once and is the next leg's start.
pub fn total_traversal_time<P>(
    provider: &P,
    waypoints: &[Coord],
    start_time: u64,
) -> Result<u64, SearchError>
where
    P: TimeIndexedGridProvider + ?Sized,
{
    let legs = TemporalSearch::default().traverse_legs(provider, waypoints, start_time)?;
    Ok(legs.iter().map(TimedPath::duration).sum())
}
