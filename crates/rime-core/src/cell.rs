//! Per-cell state stored in a grid.

use std::fmt;

/// Contents of a single grid cell.
///
/// `Value` carries a domain scalar such as an energy level, a risk
/// weight, or a height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Nothing here; entities and agents may enter.
    #[default]
    Empty,
    /// Permanent obstacle.
    Wall,
    /// Filled by a settled entity.
    Occupied,
    /// A domain-specific scalar.
    Value(u32),
}

impl CellState {
    /// Whether an entity or agent may enter this cell.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether the cell is a wall or holds a settled entity.
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::Occupied)
    }

    /// The scalar carried by a `Value` cell.
    pub fn value(self) -> Option<u32> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "."),
            Self::Wall => write!(f, "#"),
            Self::Occupied => write!(f, "o"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}
