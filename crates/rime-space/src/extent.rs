//! Grid dimensions, rank arithmetic, and canonical ordering.

use crate::edge::{resolve_axis, EdgeBehavior};
use rime_core::{ConfigError, Coord, GridError};
use smallvec::smallvec;

/// The declared bounds of a 2-D or 3-D grid.
///
/// Cells are stored in canonical order: `x` fastest, then `y`, then `z`.
/// For a 2-D extent the rank of `[x, y]` is `y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    width: u32,
    height: u32,
    depth: u32,
    ndim: usize,
}

impl Extent {
    /// Largest accepted value for any single dimension.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// A `width × height` planar extent.
    ///
    /// Returns `Err(ConfigError::EmptyDimension)` if either dimension is
    /// zero.
    pub fn new_2d(width: u32, height: u32) -> Result<Self, ConfigError> {
        Self::build(width, height, 1, 2)
    }

    /// A `width × height × depth` volumetric extent.
    pub fn new_3d(width: u32, height: u32, depth: u32) -> Result<Self, ConfigError> {
        Self::build(width, height, depth, 3)
    }

    fn build(width: u32, height: u32, depth: u32, ndim: usize) -> Result<Self, ConfigError> {
        for (axis, value) in [("width", width), ("height", height), ("depth", depth)] {
            if value == 0 {
                return Err(ConfigError::EmptyDimension { axis });
            }
            if value > Self::MAX_DIM {
                return Err(ConfigError::DimensionTooLarge {
                    axis,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(depth as usize))
            .ok_or(ConfigError::CellCountOverflow)?;
        Ok(Self {
            width,
            height,
            depth,
            ndim,
        })
    }

    /// Number of axes (2 or 3).
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Size along `x`.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Size along `y`.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size along `z` (1 for planar extents).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize) * (self.depth as usize)
    }

    /// Size of the given axis (0 = x, 1 = y, 2 = z).
    pub fn axis_len(&self, axis: usize) -> u32 {
        match axis {
            0 => self.width,
            1 => self.height,
            _ => self.depth,
        }
    }

    /// Whether `coord` has the right axis count and lies inside the bounds.
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.len() == self.ndim
            && coord
                .iter()
                .enumerate()
                .all(|(axis, &v)| v >= 0 && (v as u32) < self.axis_len(axis))
    }

    /// Canonical rank of an in-bounds coordinate, `None` otherwise.
    pub fn rank(&self, coord: &Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let x = coord[0] as usize;
        let y = coord[1] as usize;
        let z = if self.ndim == 3 { coord[2] as usize } else { 0 };
        Some((z * self.height as usize + y) * self.width as usize + x)
    }

    /// Inverse of [`rank`](Self::rank). `rank` must be below
    /// [`cell_count`](Self::cell_count).
    pub fn coord_at(&self, rank: usize) -> Coord {
        let w = self.width as usize;
        let h = self.height as usize;
        let x = (rank % w) as i32;
        let y = ((rank / w) % h) as i32;
        if self.ndim == 3 {
            smallvec![x, y, (rank / (w * h)) as i32]
        } else {
            smallvec![x, y]
        }
    }

    /// Every coordinate in rank order.
    pub fn canonical_ordering(&self) -> Vec<Coord> {
        (0..self.cell_count()).map(|r| self.coord_at(r)).collect()
    }

    /// Human-readable description of the valid range, used in
    /// [`GridError::OutOfBounds`].
    pub fn describe(&self) -> String {
        let mut out = format!("x in [0, {}), y in [0, {})", self.width, self.height);
        if self.ndim == 3 {
            out.push_str(&format!(", z in [0, {})", self.depth));
        }
        out
    }

    /// Map `coord` onto a stored cell under `edge`.
    ///
    /// Absorbing extents reject anything outside the bounds; wrapping
    /// extents fold every axis back in with modulo arithmetic.
    pub fn normalize(&self, coord: &Coord, edge: EdgeBehavior) -> Result<Coord, GridError> {
        if coord.len() != self.ndim {
            return Err(GridError::DimensionMismatch {
                expected: self.ndim,
                got: coord.len(),
            });
        }
        let mut out = Coord::with_capacity(self.ndim);
        for (axis, &v) in coord.iter().enumerate() {
            match resolve_axis(v, self.axis_len(axis), edge) {
                Some(r) => out.push(r),
                None => {
                    return Err(GridError::OutOfBounds {
                        coord: coord.clone(),
                        bounds: self.describe(),
                    })
                }
            }
        }
        Ok(out)
    }
}
