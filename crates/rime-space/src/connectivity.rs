//! Adjacency policies and their fixed enumeration order.

/// Which cells count as adjacent.
///
/// Offsets are enumerated in a fixed order so that every consumer that
/// breaks ties by enumeration order (BFS expansion, proposal scans)
/// produces reproducible results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// 2-D von Neumann: north, south, west, east.
    #[default]
    Orthogonal4,
    /// 2-D Moore: the four orthogonal offsets, then NW, NE, SW, SE.
    Diagonal8,
    /// 3-D face adjacency: -x, +x, -y, +y, -z, +z.
    Orthogonal6,
}

// ── Offset tables ───────────────────────────────────────────────
//
// 2-D entries are `[dx, dy]`; `y` grows downward, so north is `dy = -1`.

const ORTHOGONAL_4: [[i32; 3]; 4] = [[0, -1, 0], [0, 1, 0], [-1, 0, 0], [1, 0, 0]];

const DIAGONAL_8: [[i32; 3]; 8] = [
    [0, -1, 0],
    [0, 1, 0],
    [-1, 0, 0],
    [1, 0, 0],
    [-1, -1, 0],
    [1, -1, 0],
    [-1, 1, 0],
    [1, 1, 0],
];

const ORTHOGONAL_6: [[i32; 3]; 6] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];

impl Connectivity {
    /// Relative offsets in enumeration order. Only the first
    /// [`ndim`](Self::ndim) components of each entry are meaningful.
    pub fn offsets(self) -> &'static [[i32; 3]] {
        match self {
            Self::Orthogonal4 => &ORTHOGONAL_4,
            Self::Diagonal8 => &DIAGONAL_8,
            Self::Orthogonal6 => &ORTHOGONAL_6,
        }
    }

    /// Dimensionality this policy is defined on.
    pub fn ndim(self) -> usize {
        match self {
            Self::Orthogonal4 | Self::Diagonal8 => 2,
            Self::Orthogonal6 => 3,
        }
    }

    /// Maximum number of neighbours per cell.
    pub fn degree(self) -> usize {
        self.offsets().len()
    }

    /// Short name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Orthogonal4 => "orthogonal-4",
            Self::Diagonal8 => "diagonal-8",
            Self::Orthogonal6 => "orthogonal-6",
        }
    }
}
