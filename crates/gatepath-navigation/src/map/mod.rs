//! Grid-related functionality for navigation.
//!
//! This module provides the occupancy grid that detected objects are
//! rasterized into, and the cells it is made of.

pub mod cell;
pub mod grid;

pub use cell::{CellCoord, GridCell, Occupancy};
pub use grid::OccupancyGrid;
