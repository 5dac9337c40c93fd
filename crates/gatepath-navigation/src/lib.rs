//! Grid planning between gates of traffic cones.
//!
//! Detected cones and obstacles are rasterized into an [`map::OccupancyGrid`],
//! cones are paired into [`gates::Gate`]s, and a breadth-first search finds
//! the shortest 4-connected path from the first gate to the second.

pub mod bfs;
pub mod error;
pub mod frame;
pub mod gates;
pub mod map;

pub use bfs::{PlanOutcome, Predecessor, SearchTree, breadth_first_search, plan_between_waypoints};
pub use error::NavigationError;
pub use frame::{Frame, FrameParams, plan_frame};
pub use gates::{Gate, gate_waypoints, pair_gates};
pub use map::{CellCoord, GridCell, Occupancy, OccupancyGrid};
