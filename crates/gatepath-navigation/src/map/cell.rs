//! Cells of the occupancy grid and what can occupy them.

#![warn(missing_docs)]

use gatepath_geometry::{Point2, RotatedRect};
use std::fmt;

/// What a grid cell is covered by.
/// Only `Free` and `Waypoint` cells can be traversed.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupancy {
    /// Nothing detected in this cell
    #[default]
    Free = 0,
    /// Cell overlaps a cone
    Cone = 10,
    /// Cell overlaps an obstacle that is not a cone
    Obstacle = 20,
    /// Cell overlaps a gate waypoint
    Waypoint = 30,
}

impl Occupancy {
    /// Converts the occupancy to its u8 representation
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Whether a path may pass through a cell with this occupancy.
    pub fn is_passable(&self) -> bool {
        matches!(self, Occupancy::Free | Occupancy::Waypoint)
    }

    /// Single character used when printing a grid.
    pub fn symbol(&self) -> char {
        match self {
            Occupancy::Free => '.',
            Occupancy::Cone => 'c',
            Occupancy::Obstacle => '#',
            Occupancy::Waypoint => 'w',
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupancy::Free => write!(f, "Free"),
            Occupancy::Cone => write!(f, "Cone"),
            Occupancy::Obstacle => write!(f, "Obstacle"),
            Occupancy::Waypoint => write!(f, "Waypoint"),
        }
    }
}

/// Column/row index of a cell inside a grid.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// Column index, growing with x.
    pub col: usize,
    /// Row index, growing with y.
    pub row: usize,
}

impl CellCoord {
    /// Creates a new `CellCoord`.
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Number of 4-directional steps between two cells.
    pub fn manhattan_distance(&self, other: &CellCoord) -> usize {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// One square of an [`OccupancyGrid`](super::OccupancyGrid).
///
/// The cell's rectangle is fixed when the grid is built; only the occupancy
/// changes, and only while objects are being rasterized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    rect: RotatedRect,
    coord: CellCoord,
    occupancy: Occupancy,
}

impl GridCell {
    pub(crate) fn new(center: Point2, size: f64, coord: CellCoord) -> Self {
        GridCell {
            rect: RotatedRect::axis_aligned(center.x, center.y, size, size),
            coord,
            occupancy: Occupancy::Free,
        }
    }

    /// The square this cell covers in the image plane.
    pub fn rect(&self) -> &RotatedRect {
        &self.rect
    }

    /// Center of the cell in the image plane.
    pub fn center(&self) -> Point2 {
        self.rect.center()
    }

    /// Index of the cell inside its grid.
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Current occupancy.
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    /// Whether a path may pass through this cell.
    pub fn is_passable(&self) -> bool {
        self.occupancy.is_passable()
    }

    pub(crate) fn set_occupancy(&mut self, occupancy: Occupancy) {
        self.occupancy = occupancy;
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} at {} [{}]", self.coord, self.center(), self.occupancy)
    }
}
