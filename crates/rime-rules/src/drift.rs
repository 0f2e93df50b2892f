//! Movers drifting along fixed headings inside a wrapping rectangle.

use crate::state::Mover;
use rime_core::{ConfigError, Coord, SimError};
use rime_space::Extent;
use smallvec::smallvec;

/// A rectangular interior, offset by `origin`, inside which every mover
/// with a heading advances one cell per tick and wraps at the interior's
/// edges.
///
/// The configuration repeats every [`period`](Self::period) ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriftRule {
    origin: Coord,
    extent: Extent,
}

impl DriftRule {
    /// A drift interior whose top-left cell is `origin`.
    ///
    /// The bottom-right cell must also be representable as a coordinate.
    pub fn new(origin: Coord, extent: Extent) -> Result<Self, ConfigError> {
        if origin.len() != 2 || extent.ndim() != 2 {
            return Err(ConfigError::InvalidRule {
                reason: format!(
                    "drift interior must be 2D (origin {}D, extent {}D)",
                    origin.len(),
                    extent.ndim()
                ),
            });
        }
        let far_x = origin[0].checked_add(extent.width() as i32 - 1);
        let far_y = origin[1].checked_add(extent.height() as i32 - 1);
        if far_x.is_none() || far_y.is_none() {
            return Err(ConfigError::InvalidRule {
                reason: format!(
                    "drift interior at {origin:?} of {}x{} exceeds the coordinate range",
                    extent.width(),
                    extent.height()
                ),
            });
        }
        Ok(Self { origin, extent })
    }

    /// Top-left interior cell.
    pub fn origin(&self) -> &Coord {
        &self.origin
    }

    /// Interior size.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Whether `coord` lies in the interior.
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.len() == 2
            && self
                .local(coord)
                .is_some_and(|local| self.extent.contains(&local))
    }

    /// Ticks after which every mover is back where it started:
    /// `lcm(width, height)`.
    pub fn period(&self) -> u64 {
        lcm(self.extent.width() as u64, self.extent.height() as u64)
    }

    fn local(&self, coord: &Coord) -> Option<Coord> {
        Some(smallvec![
            coord[0].checked_sub(self.origin[0])?,
            coord[1].checked_sub(self.origin[1])?
        ])
    }

    /// Advance every mover with a heading by one cell.
    ///
    /// Returns the number of movers that moved. Fails with
    /// [`SimError::MalformedState`] if a drifting mover is outside the
    /// interior.
    pub fn tick(&self, movers: &mut [Mover]) -> Result<usize, SimError> {
        let w = self.extent.width() as i32;
        let h = self.extent.height() as i32;
        let mut moved = 0;
        for mover in movers.iter_mut() {
            let Some(heading) = mover.heading else {
                continue;
            };
            let local = match self.local(&mover.position) {
                Some(local) if mover.position.len() == 2 && self.extent.contains(&local) => local,
                _ => {
                    return Err(SimError::MalformedState {
                        reason: format!(
                            "mover {} at {:?} is outside the drift interior",
                            mover.id, mover.position
                        ),
                    })
                }
            };
            let [dx, dy] = heading.delta();
            let x = (local[0] + dx).rem_euclid(w);
            let y = (local[1] + dy).rem_euclid(h);
            mover.position = smallvec![x + self.origin[0], y + self.origin[1]];
            moved += 1;
        }
        Ok(moved)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Heading;
    use proptest::prelude::*;
    use rime_core::coord2;

    fn interior(w: u32, h: u32) -> DriftRule {
        DriftRule::new(coord2(1, 1), Extent::new_2d(w, h).unwrap()).unwrap()
    }

    #[test]
    fn period_is_lcm() {
        assert_eq!(interior(6, 4).period(), 12);
        assert_eq!(interior(120, 25).period(), 600);
        assert_eq!(interior(5, 5).period(), 5);
    }

    #[test]
    fn movers_wrap_inside_interior() {
        let rule = interior(3, 2);
        let mut movers = vec![
            Mover::heading(0u32, coord2(3, 1), Heading::East),
            Mover::heading(1u32, coord2(1, 1), Heading::North),
            Mover::stationary(2u32, coord2(0, 0)),
        ];
        assert_eq!(rule.tick(&mut movers), Ok(2));
        assert_eq!(movers[0].position, coord2(1, 1));
        assert_eq!(movers[1].position, coord2(1, 2));
        assert_eq!(movers[2].position, coord2(0, 0));
    }

    #[test]
    fn drifting_mover_outside_interior_is_malformed() {
        let rule = interior(3, 3);
        let mut movers = vec![Mover::heading(0u32, coord2(0, 0), Heading::South)];
        assert!(matches!(
            rule.tick(&mut movers),
            Err(SimError::MalformedState { .. })
        ));
    }

    #[test]
    fn far_away_mover_is_malformed_not_overflow() {
        let rule = interior(3, 3);
        let mut movers = vec![Mover::heading(0u32, coord2(i32::MIN, 2), Heading::East)];
        assert!(!rule.contains(&coord2(i32::MIN, 2)));
        assert!(matches!(
            rule.tick(&mut movers),
            Err(SimError::MalformedState { .. })
        ));
    }

    #[test]
    fn rejects_interior_past_coordinate_range() {
        let extent = Extent::new_2d(2, 2).unwrap();
        let err = DriftRule::new(coord2(i32::MAX, 0), extent).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { .. }));
        assert!(DriftRule::new(coord2(i32::MAX - 1, 0), extent).is_ok());
    }

    #[test]
    fn rejects_3d_interior() {
        let err = DriftRule::new(coord2(0, 0), Extent::new_3d(2, 2, 2).unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { .. }));
    }

    fn arb_heading() -> impl Strategy<Value = Heading> {
        prop_oneof![
            Just(Heading::North),
            Just(Heading::South),
            Just(Heading::West),
            Just(Heading::East),
        ]
    }

    proptest! {
        #[test]
        fn positions_repeat_after_period(
            w in 1u32..8,
            h in 1u32..8,
            seeds in proptest::collection::vec((0i32..8, 0i32..8, arb_heading()), 1..12),
        ) {
            let rule = interior(w, h);
            let start: Vec<Mover> = seeds
                .iter()
                .enumerate()
                .map(|(i, &(x, y, hd))| {
                    Mover::heading(i as u32, coord2(1 + x % w as i32, 1 + y % h as i32), hd)
                })
                .collect();
            let mut movers = start.clone();
            for _ in 0..rule.period() {
                rule.tick(&mut movers).unwrap();
            }
            prop_assert_eq!(movers, start);
        }
    }
}
