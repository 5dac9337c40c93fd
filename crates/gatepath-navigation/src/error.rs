//! This module defines the error types used by the `gatepath-navigation` crate.

#![warn(missing_docs)]

use gatepath_geometry::GeometryError;
use thiserror::Error;

/// Error type for grid construction and planning.
///
/// Only precondition violations are errors. An unreachable goal or a frame
/// with fewer than two waypoints are ordinary outcomes and are reported through
/// [`crate::bfs::PlanOutcome`] instead.
#[derive(Debug, Error, PartialEq)]
pub enum NavigationError {
    /// Error for a cell size that is zero, negative or not a number.
    #[error("Invalid cell size: {0}")]
    InvalidCellSize(&'static str),
    /// Error for a bounding region that cannot hold a single cell.
    #[error("Invalid grid dimensions: {0}")]
    InvalidDimensions(&'static str),
    /// A waypoint resolved to a cell outside the grid.
    #[error("Waypoint at ({x:.2}, {y:.2}) maps to cell ({col}, {row}) outside the grid")]
    WaypointOutOfBounds {
        /// Waypoint center x.
        x: f64,
        /// Waypoint center y.
        y: f64,
        /// Column the waypoint resolved to.
        col: i64,
        /// Row the waypoint resolved to.
        row: i64,
    },
    /// A detected object could not describe a rectangle.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
