//! One planning cycle: detected cones and obstacles in, grid and path out.
//!
//! Every call builds a fresh grid. Nothing is carried between frames.

use crate::bfs::{PlanOutcome, plan_between_waypoints};
use crate::error::NavigationError;
use crate::gates::{Gate, gate_waypoints, pair_gates};
use crate::map::{CellCoord, Occupancy, OccupancyGrid};
use gatepath_geometry::{Bounds, RotatedRect};
use tracing::{debug, info, warn};

/// Tuning for a planning frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrameParams {
    /// Cells of padding around the detected objects.
    pub spacing: usize,
    /// Search radius in cells used when rasterizing each object.
    pub max_steps: usize,
    /// Whether to search for a path at all.
    pub pathfinding: bool,
    /// Cell size used when no cone gives a usable size.
    pub fallback_cell_size: f64,
    /// Minimum gate width as a multiple of the average cone size.
    pub gate_min_factor: f64,
    /// Maximum gate width as a multiple of the average cone size.
    pub gate_max_factor: f64,
    /// Side length of the square waypoint placed in each gate.
    pub waypoint_size: f64,
}

impl Default for FrameParams {
    fn default() -> Self {
        FrameParams {
            spacing: 2,
            max_steps: 15,
            pathfinding: true,
            fallback_cell_size: 7.0,
            gate_min_factor: 4.0,
            gate_max_factor: 7.0,
            waypoint_size: 2.0,
        }
    }
}

/// Everything produced for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The rasterized grid, absent when there were no objects.
    pub grid: Option<OccupancyGrid>,
    /// Cone pairs found in this frame.
    pub gates: Vec<Gate>,
    /// One waypoint per gate, in gate order.
    pub waypoints: Vec<RotatedRect>,
    /// Search result between the first two waypoints.
    pub plan: PlanOutcome,
}

impl Frame {
    fn empty() -> Self {
        Frame {
            grid: None,
            gates: Vec::new(),
            waypoints: Vec::new(),
            plan: PlanOutcome::NotRequested,
        }
    }

    /// Path from the first waypoint to the second, empty if there is none.
    pub fn path(&self) -> Vec<CellCoord> {
        self.plan.path()
    }

    /// The grid drawn as text with the path overlaid.
    pub fn render(&self) -> Option<String> {
        self.grid.as_ref().map(|grid| grid.render_path(&self.path()))
    }
}

/// Mean of `(width + height) / 2` over the cones, or `None` for no cones.
pub fn average_cone_size(cones: &[RotatedRect]) -> Option<f64> {
    if cones.is_empty() {
        return None;
    }
    let total: f64 = cones.iter().map(|c| (c.width + c.height) / 2.0).sum();
    Some(total / cones.len() as f64)
}

/// Axis-aligned bounds of every corner of every cone and obstacle.
pub fn bounding_region(cones: &[RotatedRect], obstacles: &[RotatedRect]) -> Option<Bounds> {
    Bounds::enclosing(cones.iter().chain(obstacles))
}

fn validate(objects: &[RotatedRect]) -> Result<(), NavigationError> {
    for o in objects {
        RotatedRect::try_new(o.x, o.y, o.width, o.height, o.rotation)?;
    }
    Ok(())
}

/// Searches between the first two waypoints, if asked to.
///
/// A waypoint off the grid leaves the frame without a path instead of
/// failing it, so the grid is still available for display.
fn plan_on_grid(grid: &OccupancyGrid, waypoints: &[RotatedRect], pathfinding: bool) -> PlanOutcome {
    if !pathfinding {
        return PlanOutcome::NotRequested;
    }
    match plan_between_waypoints(grid, waypoints) {
        Ok(plan) => plan,
        Err(e) => {
            warn!(error = %e, "Skipping path search for this frame");
            PlanOutcome::NotRequested
        }
    }
}

/// Runs one planning cycle.
///
/// Cones are paired into gates, every object is rasterized (cones, then
/// obstacles, then gate waypoints, later marks winning), and when
/// `params.pathfinding` is set a path is searched from the first gate to the
/// second.
///
/// # Errors
/// Returns an error if an object has a non-finite or negative value, or if the
/// grid cannot be built over the objects. A gate waypoint outside the grid is
/// not an error; the frame then carries its grid and no path.
pub fn plan_frame(
    cones: &[RotatedRect],
    obstacles: &[RotatedRect],
    params: &FrameParams,
) -> Result<Frame, NavigationError> {
    if cones.is_empty() && obstacles.is_empty() {
        debug!("No objects detected, skipping frame");
        return Ok(Frame::empty());
    }
    validate(cones)?;
    validate(obstacles)?;

    let average = average_cone_size(cones);
    let cell_size = match average.map(|a| (a / 2.0).floor()) {
        Some(size) if size > 0.0 => size,
        _ => {
            warn!(
                fallback = params.fallback_cell_size,
                "No usable cone size, using fallback cell size"
            );
            params.fallback_cell_size
        }
    };

    let gates = match average {
        Some(avg) => pair_gates(cones, params.gate_min_factor * avg, params.gate_max_factor * avg),
        None => Vec::new(),
    };
    let waypoints = gate_waypoints(&gates, cones, params.waypoint_size);

    let Some(region) = bounding_region(cones, obstacles) else {
        return Ok(Frame::empty());
    };
    let mut grid = OccupancyGrid::from_bounds(&region, cell_size, params.spacing)?;

    let layers = [
        (cones, Occupancy::Cone),
        (obstacles, Occupancy::Obstacle),
        (waypoints.as_slice(), Occupancy::Waypoint),
    ];
    for (objects, occupancy) in layers {
        let marked: usize = objects
            .iter()
            .map(|o| grid.mark_occupied(o, occupancy, params.max_steps))
            .sum();
        debug!(%occupancy, objects = objects.len(), marked, "Marked layer");
    }

    let plan = plan_on_grid(&grid, &waypoints, params.pathfinding);

    info!(
        cones = cones.len(),
        obstacles = obstacles.len(),
        gates = gates.len(),
        cell_size,
        columns = grid.columns(),
        rows = grid.rows(),
        path_len = plan.path().len(),
        "Frame planned"
    );

    Ok(Frame {
        grid: Some(grid),
        gates,
        waypoints,
        plan,
    })
}
