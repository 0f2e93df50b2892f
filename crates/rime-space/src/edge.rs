//! Boundary topology for grids.

/// How a grid treats coordinates that fall past its edges.
///
/// There is deliberately no clamping mode: a bounded grid either rejects
/// the coordinate outright or, when built toroidal, folds it back in.
///
/// # Examples
///
/// ```
/// use rime_core::{coord2, CellState};
/// use rime_space::{Connectivity, EdgeBehavior, Grid};
///
/// // Absorb: a corner has 2 orthogonal neighbours, an interior cell has 4.
/// let absorb = Grid::create_2d(4, 4, EdgeBehavior::Absorb, CellState::Empty).unwrap();
/// assert_eq!(absorb.neighbours(&coord2(0, 0), Connectivity::Orthogonal4).unwrap().len(), 2);
/// assert_eq!(absorb.neighbours(&coord2(1, 1), Connectivity::Orthogonal4).unwrap().len(), 4);
///
/// // Wrap: every cell has exactly 4 (torus).
/// let wrap = Grid::create_2d(4, 4, EdgeBehavior::Wrap, CellState::Empty).unwrap();
/// assert_eq!(wrap.neighbours(&coord2(0, 0), Connectivity::Orthogonal4).unwrap().len(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds coordinates are rejected; edge cells have fewer
    /// neighbours.
    #[default]
    Absorb,
    /// Coordinates wrap to the opposite side (periodic / toroidal).
    Wrap,
}

impl EdgeBehavior {
    /// Whether this edge behavior makes the grid toroidal.
    pub fn is_toroidal(self) -> bool {
        matches!(self, Self::Wrap)
    }
}

/// Resolve a single axis value under the given edge behavior.
///
/// Returns `Some(v)` with `v` in `[0, len)`, or `None` when an absorbing
/// edge drops the value.
pub(crate) fn resolve_axis(val: i32, len: u32, edge: EdgeBehavior) -> Option<i32> {
    let n = len as i32;
    if (0..n).contains(&val) {
        return Some(val);
    }
    match edge {
        EdgeBehavior::Absorb => None,
        EdgeBehavior::Wrap => Some(val.rem_euclid(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn absorb_drops_out_of_range() {
        assert_eq!(resolve_axis(-1, 5, EdgeBehavior::Absorb), None);
        assert_eq!(resolve_axis(5, 5, EdgeBehavior::Absorb), None);
        assert_eq!(resolve_axis(4, 5, EdgeBehavior::Absorb), Some(4));
    }

    #[test]
    fn wrap_folds_both_directions() {
        assert_eq!(resolve_axis(-1, 5, EdgeBehavior::Wrap), Some(4));
        assert_eq!(resolve_axis(5, 5, EdgeBehavior::Wrap), Some(0));
        assert_eq!(resolve_axis(-11, 5, EdgeBehavior::Wrap), Some(4));
    }

    #[test]
    fn default_is_bounded() {
        assert!(!EdgeBehavior::default().is_toroidal());
        assert!(EdgeBehavior::Wrap.is_toroidal());
    }

    proptest! {
        #[test]
        fn wrap_is_periodic(val in -10_000i32..10_000, len in 1u32..64) {
            let a = resolve_axis(val, len, EdgeBehavior::Wrap);
            let b = resolve_axis(val + len as i32, len, EdgeBehavior::Wrap);
            prop_assert_eq!(a, b);
            let v = a.unwrap();
            prop_assert!(v >= 0 && v < len as i32);
        }
    }
}
