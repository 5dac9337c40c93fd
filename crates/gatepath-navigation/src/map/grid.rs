//! Occupancy grid built over the region spanned by the detected objects.
//!
//! The grid is padded by `spacing` cells on every side so objects that stick
//! out of the detected bounding region still land on cells. Cells are stored
//! row-major and never handed out mutably.

#![warn(missing_docs)]

use super::cell::{CellCoord, GridCell, Occupancy};
use crate::error::NavigationError;
use gatepath_geometry::{Bounds, Point2, RotatedRect};
use std::fmt;
use tracing::{debug, trace};

/// Candidate offsets for 4-directional neighbors: right, up, left, down.
const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// Upper bound on the number of cells in one grid.
pub const MAX_CELLS: usize = 1 << 24;

/// Cells along one axis: `floor(|extent| / cell_size) + 2 * spacing`.
fn cells_along(extent: f64, cell_size: f64, spacing: usize) -> Result<usize, NavigationError> {
    let too_large = NavigationError::InvalidDimensions("Grid dimensions too large, would cause overflow");
    let quotient = (extent / cell_size).abs().floor();
    // Stay well inside both usize and i64 so signed indices never wrap.
    if !quotient.is_finite() || quotient >= MAX_CELLS as f64 {
        return Err(too_large);
    }
    spacing
        .checked_mul(2)
        .and_then(|margin| (quotient as usize).checked_add(margin))
        .filter(|&count| count <= MAX_CELLS)
        .ok_or(too_large)
}

/// A uniform grid of square cells covering a bounding region plus a margin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyGrid {
    /// Top-left corner of the bounding region (before padding).
    origin: Point2,
    /// Width of the bounding region.
    width: f64,
    /// Height of the bounding region.
    height: f64,
    /// Side length of a cell.
    cell_size: f64,
    /// Padding in cells added on every side.
    spacing: usize,
    /// Number of cells along x.
    columns: usize,
    /// Number of cells along y.
    rows: usize,
    /// Cells in row-major order.
    cells: Vec<GridCell>,
}

impl OccupancyGrid {
    /// Creates a grid of free cells over the given region.
    ///
    /// # Arguments
    /// * `origin` - Top-left corner of the bounding region
    /// * `width` - Width of the bounding region
    /// * `height` - Height of the bounding region
    /// * `cell_size` - Side length of a cell
    /// * `spacing` - Extra cells added beyond the region on each side
    ///
    /// # Returns
    /// * `Result<Self, NavigationError>` - The grid, or an error if the geometry is degenerate
    pub fn new(
        origin: Point2,
        width: f64,
        height: f64,
        cell_size: f64,
        spacing: usize,
    ) -> Result<Self, NavigationError> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(NavigationError::InvalidCellSize("Cell size must be positive"));
        }
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(NavigationError::InvalidDimensions(
                "Width and height must be positive",
            ));
        }
        if !origin.x.is_finite() || !origin.y.is_finite() {
            return Err(NavigationError::InvalidDimensions("Origin must be finite"));
        }

        let columns = cells_along(width, cell_size, spacing)?;
        let rows = cells_along(height, cell_size, spacing)?;
        if columns == 0 || rows == 0 {
            return Err(NavigationError::InvalidDimensions(
                "Region is smaller than one cell and has no spacing",
            ));
        }

        // Check for potential overflow in cell allocation
        let total_cells = columns
            .checked_mul(rows)
            .filter(|&total| total <= MAX_CELLS)
            .ok_or(NavigationError::InvalidDimensions(
                "Grid dimensions too large, would cause overflow",
            ))?;

        let offset = spacing as f64 * cell_size;
        let left = origin.x - offset;
        let top = origin.y - offset;

        let mut cells = Vec::with_capacity(total_cells);
        for row in 0..rows {
            for col in 0..columns {
                let center = Point2::new(
                    left + col as f64 * cell_size + cell_size / 2.0,
                    top + row as f64 * cell_size + cell_size / 2.0,
                );
                cells.push(GridCell::new(center, cell_size, CellCoord::new(col, row)));
            }
        }

        debug!(columns, rows, cell_size, spacing, "Built occupancy grid");

        Ok(OccupancyGrid {
            origin,
            width,
            height,
            cell_size,
            spacing,
            columns,
            rows,
            cells,
        })
    }

    /// Creates a grid covering `bounds`.
    pub fn from_bounds(
        bounds: &Bounds,
        cell_size: f64,
        spacing: usize,
    ) -> Result<Self, NavigationError> {
        Self::new(
            bounds.top_left(),
            bounds.width(),
            bounds.height(),
            cell_size,
            spacing,
        )
    }

    /// Number of cells along x.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cells along y.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Side length of a cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Padding in cells on every side.
    pub fn spacing(&self) -> usize {
        self.spacing
    }

    /// Top-left corner of the bounding region the grid was built for.
    pub fn origin(&self) -> Point2 {
        self.origin
    }

    /// Size of the bounding region the grid was built for.
    pub fn region_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Distance between the bounding region and the grid's outer edge.
    pub fn offset(&self) -> f64 {
        self.spacing as f64 * self.cell_size
    }

    /// Top-left corner of cell (0, 0).
    fn grid_origin(&self) -> Point2 {
        let offset = self.offset();
        Point2::new(self.origin.x - offset, self.origin.y - offset)
    }

    /// Converts a plane position to a `(col, row)` pair.
    ///
    /// This is the inverse of the formula placing cell centers, so every
    /// point of a cell maps back to that cell. A point exactly on the edge
    /// between two cells belongs to the cell right of / below the edge. The
    /// result may lie outside the grid; check it with [`Self::in_bounds`].
    pub fn position_to_index(&self, x: f64, y: f64) -> (i64, i64) {
        let corner = self.grid_origin();
        let col = ((x - corner.x) / self.cell_size).floor() as i64;
        let row = ((y - corner.y) / self.cell_size).floor() as i64;
        (col, row)
    }

    /// Whether `(col, row)` names a cell of this grid.
    pub fn in_bounds(&self, col: i64, row: i64) -> bool {
        0 <= row && row < self.rows as i64 && 0 <= col && col < self.columns as i64
    }

    /// The cell containing a plane position, if it lies on the grid.
    pub fn coord_at(&self, x: f64, y: f64) -> Option<CellCoord> {
        let (col, row) = self.position_to_index(x, y);
        self.in_bounds(col, row)
            .then(|| CellCoord::new(col as usize, row as usize))
    }

    /// Row-major index of an in-bounds coordinate.
    fn index_of(&self, coord: CellCoord) -> usize {
        coord.row * self.columns + coord.col
    }

    /// Row-major index of `coord`, or `None` when it is off the grid.
    pub(crate) fn linear_index(&self, coord: CellCoord) -> Option<usize> {
        (coord.col < self.columns && coord.row < self.rows).then(|| self.index_of(coord))
    }

    /// Gets the cell at `coord`.
    pub fn cell(&self, coord: CellCoord) -> Option<&GridCell> {
        self.linear_index(coord).map(|i| &self.cells[i])
    }

    /// Gets the cell at signed `(col, row)`, as returned by [`Self::position_to_index`].
    pub fn cell_at(&self, col: i64, row: i64) -> Option<&GridCell> {
        if self.in_bounds(col, row) {
            self.cell(CellCoord::new(col as usize, row as usize))
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cells of one row, left to right.
    pub fn row_cells(&self, row: usize) -> Option<&[GridCell]> {
        (row < self.rows).then(|| &self.cells[row * self.columns..(row + 1) * self.columns])
    }

    /// Number of cells currently holding `occupancy`.
    pub fn count(&self, occupancy: Occupancy) -> usize {
        self.cells
            .iter()
            .filter(|c| c.occupancy() == occupancy)
            .count()
    }

    /// Marks every cell intersecting `object` with `occupancy`.
    ///
    /// Instead of testing the whole grid, the scan starts `max_steps / 2`
    /// cells up and left of the cell under the object's center and walks
    /// rows downward. A row stops after `max_steps` consecutive misses, both
    /// before its first hit and after its last one. Rows stop at the first
    /// row without a hit once an earlier row had one.
    ///
    /// `max_steps` is a search radius in cells, not a guarantee: parts of an
    /// object further than `max_steps / 2` cells above or left of its center
    /// are not scanned. A `max_steps` of zero is treated as one.
    ///
    /// Marks overwrite whatever occupancy a cell had before.
    ///
    /// # Returns
    /// * `usize` - Number of cells marked
    pub fn mark_occupied(
        &mut self,
        object: &RotatedRect,
        occupancy: Occupancy,
        max_steps: usize,
    ) -> usize {
        let max_steps = max_steps.max(1);
        let (est_col, est_row) = self.position_to_index(object.x, object.y);
        let half = (max_steps / 2) as i64;
        let start_row = est_row.saturating_sub(half).max(0);
        let start_col = est_col.saturating_sub(half).max(0);

        if start_col >= self.columns as i64 || start_row >= self.rows as i64 {
            debug!(est_col, est_row, "Object scan window lies outside the grid");
            return 0;
        }
        let (start_col, start_row) = (start_col as usize, start_row as usize);

        let mut marked = 0;
        let mut rows_started = false;
        for row in start_row..self.rows {
            let mut row_started = false;
            let mut misses = 0;
            for col in start_col..self.columns {
                let index = self.index_of(CellCoord::new(col, row));
                let cell = &mut self.cells[index];
                trace!(row, col, "Checking cell");
                if cell.rect().intersects(object) {
                    cell.set_occupancy(occupancy);
                    trace!(row, col, %occupancy, "Occupying cell");
                    marked += 1;
                    row_started = true;
                    misses = 0;
                } else {
                    misses += 1;
                    if misses >= max_steps {
                        break;
                    }
                }
            }

            if row_started {
                rows_started = true;
            } else if rows_started {
                break;
            }
        }

        debug!(%object, %occupancy, marked, "Rasterized object");
        marked
    }

    /// Passable 4-directional neighbors of `cell`.
    ///
    /// Candidates are right, up, left, down; the order is reversed when
    /// `col + row` is even so that straight runs alternate their turns.
    pub fn neighbors_of_cell(&self, cell: &GridCell) -> Vec<&GridCell> {
        let coord = cell.coord();
        self.neighbors_of_index(coord.col as i64, coord.row as i64)
    }

    /// Passable 4-directional neighbors of the cell under a plane position.
    ///
    /// The position itself does not have to be on the grid; any of its
    /// neighbors that are on it are still returned.
    pub fn neighbors_of_position(&self, x: f64, y: f64) -> Vec<&GridCell> {
        let (col, row) = self.position_to_index(x, y);
        self.neighbors_of_index(col, row)
    }

    pub(crate) fn neighbors_of_index(&self, col: i64, row: i64) -> Vec<&GridCell> {
        let mut candidates =
            NEIGHBOR_OFFSETS.map(|(dc, dr)| col.checked_add(dc).zip(row.checked_add(dr)));
        if (col.rem_euclid(2) + row.rem_euclid(2)) % 2 == 0 {
            candidates.reverse();
        }

        candidates
            .into_iter()
            .flatten()
            .filter(|&(c, r)| self.in_bounds(c, r))
            .filter_map(|(c, r)| self.cell_at(c, r))
            .filter(|cell| cell.is_passable())
            .collect()
    }

    /// Renders the grid with `path` cells drawn as `*`.
    pub fn render_path(&self, path: &[CellCoord]) -> String {
        let mut on_path = vec![false; self.cells.len()];
        for coord in path {
            if let Some(i) = self.linear_index(*coord) {
                on_path[i] = true;
            }
        }

        let mut out = String::with_capacity((self.columns + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.columns {
                let i = self.index_of(CellCoord::new(col, row));
                out.push(if on_path[i] { '*' } else { self.cells[i].occupancy().symbol() });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "OccupancyGrid ({}x{}, cell size: {:.2}, spacing: {})",
            self.columns, self.rows, self.cell_size, self.spacing
        )?;
        writeln!(f, "Origin: {}", self.origin)?;
        write!(f, "{}", self.render_path(&[]))
    }
}
