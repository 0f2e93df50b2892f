//! Owned cell storage over an [`Extent`].

use crate::connectivity::Connectivity;
use crate::edge::{resolve_axis, EdgeBehavior};
use crate::extent::Extent;
use rime_core::{ConfigError, Coord, GridError};
use smallvec::SmallVec;

/// A fixed-size lattice holding one `T` per cell.
///
/// Every coordinate inside the extent has exactly one value. On an
/// absorbing grid any access outside the bounds is a
/// [`GridError::OutOfBounds`]; a wrapping grid normalises coordinates
/// with modulo arithmetic instead. Clone is a deep copy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    extent: Extent,
    edge: EdgeBehavior,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// A grid over `extent` with every cell set to `fill`.
    pub fn new(extent: Extent, edge: EdgeBehavior, fill: T) -> Self {
        Self {
            extent,
            edge,
            cells: vec![fill; extent.cell_count()],
        }
    }

    /// A `width × height` grid filled with `fill`.
    ///
    /// Returns `Err(ConfigError)` if a dimension is zero or too large.
    pub fn create_2d(
        width: u32,
        height: u32,
        edge: EdgeBehavior,
        fill: T,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(Extent::new_2d(width, height)?, edge, fill))
    }

    /// A `width × height × depth` grid filled with `fill`.
    pub fn create_3d(
        width: u32,
        height: u32,
        depth: u32,
        edge: EdgeBehavior,
        fill: T,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(Extent::new_3d(width, height, depth)?, edge, fill))
    }
}

impl<T> Grid<T> {
    /// Wrap an existing buffer laid out in canonical order.
    pub fn from_cells(
        extent: Extent,
        edge: EdgeBehavior,
        cells: Vec<T>,
    ) -> Result<Self, ConfigError> {
        if cells.len() != extent.cell_count() {
            return Err(ConfigError::CellCountMismatch {
                expected: extent.cell_count(),
                got: cells.len(),
            });
        }
        Ok(Self {
            extent,
            edge,
            cells,
        })
    }

    /// Build a grid by evaluating `f` at every coordinate in canonical order.
    pub fn from_fn(extent: Extent, edge: EdgeBehavior, mut f: impl FnMut(&Coord) -> T) -> Self {
        let cells = (0..extent.cell_count())
            .map(|r| f(&extent.coord_at(r)))
            .collect();
        Self {
            extent,
            edge,
            cells,
        }
    }

    /// A grid with the same shape as `self` whose cells are `f` of ours.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            extent: self.extent,
            edge: self.edge,
            cells: self.cells.iter().map(&mut f).collect(),
        }
    }

    /// The grid's bounds.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The grid's boundary topology.
    pub fn edge_behavior(&self) -> EdgeBehavior {
        self.edge
    }

    /// Whether coordinates wrap at the edges.
    pub fn is_toroidal(&self) -> bool {
        self.edge.is_toroidal()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.extent.ndim()
    }

    /// Size along `x`.
    pub fn width(&self) -> u32 {
        self.extent.width()
    }

    /// Size along `y`.
    pub fn height(&self) -> u32 {
        self.extent.height()
    }

    /// Size along `z` (1 for planar grids).
    pub fn depth(&self) -> u32 {
        self.extent.depth()
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `coord` lies inside the declared bounds, ignoring wrap.
    pub fn in_bounds(&self, coord: &Coord) -> bool {
        self.extent.contains(coord)
    }

    /// The stored coordinate `coord` refers to (identity on an absorbing
    /// grid, modulo on a wrapping one).
    pub fn normalize(&self, coord: &Coord) -> Result<Coord, GridError> {
        self.extent.normalize(coord, self.edge)
    }

    /// Canonical rank of the cell `coord` refers to.
    pub fn index_of(&self, coord: &Coord) -> Result<usize, GridError> {
        let c = self.normalize(coord)?;
        self.extent.rank(&c).ok_or_else(|| GridError::OutOfBounds {
            coord: coord.clone(),
            bounds: self.extent.describe(),
        })
    }

    /// Coordinate of the cell at canonical `rank`.
    pub fn coord_at(&self, rank: usize) -> Coord {
        self.extent.coord_at(rank)
    }

    /// Read a cell.
    pub fn get(&self, coord: &Coord) -> Result<&T, GridError> {
        let i = self.index_of(coord)?;
        Ok(&self.cells[i])
    }

    /// Mutable access to a cell.
    pub fn get_mut(&mut self, coord: &Coord) -> Result<&mut T, GridError> {
        let i = self.index_of(coord)?;
        Ok(&mut self.cells[i])
    }

    /// Overwrite a cell, returning its previous value.
    pub fn set(&mut self, coord: &Coord, value: T) -> Result<T, GridError> {
        let slot = self.get_mut(coord)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Cells in canonical order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Mutable cells in canonical order.
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// `(coord, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(r, v)| (self.extent.coord_at(r), v))
    }

    /// Number of cells satisfying `pred`.
    pub fn count(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.cells.iter().filter(|v| pred(v)).count()
    }

    /// First coordinate (in canonical order) whose cell satisfies `pred`.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Coord> {
        self.cells
            .iter()
            .position(|v| pred(v))
            .map(|r| self.extent.coord_at(r))
    }

    /// The cell reached by stepping `delta` from `coord`.
    ///
    /// `coord` itself must be addressable. Returns `Ok(None)` when the step
    /// leaves an absorbing grid; a wrapping grid always yields a cell.
    pub fn step(&self, coord: &Coord, delta: &[i32]) -> Result<Option<Coord>, GridError> {
        let from = self.normalize(coord)?;
        if delta.len() < from.len() {
            return Err(GridError::DimensionMismatch {
                expected: from.len(),
                got: delta.len(),
            });
        }
        let mut out = Coord::with_capacity(from.len());
        for (axis, &v) in from.iter().enumerate() {
            let len = self.extent.axis_len(axis);
            let target = i64::from(v) + i64::from(delta[axis]);
            let resolved = match i32::try_from(target) {
                Ok(t) => resolve_axis(t, len, self.edge),
                Err(_) => self
                    .is_toroidal()
                    .then(|| target.rem_euclid(i64::from(len)) as i32),
            };
            match resolved {
                Some(r) => out.push(r),
                None => return Ok(None),
            }
        }
        Ok(Some(out))
    }

    /// Neighbours of `coord` under `connectivity`, in the policy's fixed
    /// enumeration order.
    ///
    /// On an absorbing grid neighbours past the edge are omitted; on a
    /// wrapping grid they are normalised. Wrapping grids narrower than
    /// three cells along an axis can list the same neighbour twice.
    ///
    /// Fails with [`GridError::OutOfBounds`] for an out-of-bounds `coord`
    /// on an absorbing grid and [`GridError::ConnectivityMismatch`] when
    /// the policy's dimensionality differs from the grid's.
    pub fn neighbours(
        &self,
        coord: &Coord,
        connectivity: Connectivity,
    ) -> Result<SmallVec<[Coord; 8]>, GridError> {
        if connectivity.ndim() != self.ndim() {
            return Err(GridError::ConnectivityMismatch {
                connectivity: connectivity.name(),
                ndim: self.ndim(),
            });
        }
        let mut out = SmallVec::new();
        for off in connectivity.offsets() {
            if let Some(nb) = self.step(coord, off)? {
                out.push(nb);
            }
        }
        Ok(out)
    }
}
