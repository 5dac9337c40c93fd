/*

Breadth-first search over the occupancy grid.

Initialize:
    - record start with the Start sentinel
    - queue = [start]

Loop:
    - pop the oldest cell from the queue
    - if it is the goal, stop
    - for each passable neighbor not recorded yet:
        - record the current cell as its predecessor
        - push it to the back of the queue

Every edge costs the same, so the first time a cell is recorded is along a
shortest path. Cells are recorded once and never expanded twice.

*/

use crate::error::NavigationError;
use crate::map::{CellCoord, GridCell, OccupancyGrid};
use gatepath_geometry::RotatedRect;
use std::collections::VecDeque;
use tracing::{debug, info, trace};

/// How a cell was reached during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predecessor {
    /// The cell the search started from.
    Start,
    /// The cell was discovered while expanding this one.
    Cell(CellCoord),
}

/// Predecessor map produced by [`breadth_first_search`].
///
/// Stored densely, one slot per grid cell in row-major order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchTree {
    columns: usize,
    rows: usize,
    came_from: Vec<Option<Predecessor>>,
    expanded: usize,
}

impl SearchTree {
    fn empty(grid: &OccupancyGrid) -> Self {
        SearchTree {
            columns: grid.columns(),
            rows: grid.rows(),
            came_from: vec![None; grid.cells().len()],
            expanded: 0,
        }
    }

    fn slot(&self, coord: CellCoord) -> Option<usize> {
        (coord.col < self.columns && coord.row < self.rows)
            .then(|| coord.row * self.columns + coord.col)
    }

    fn record(&mut self, coord: CellCoord, predecessor: Predecessor) {
        if let Some(i) = self.slot(coord) {
            self.came_from[i] = Some(predecessor);
        }
    }

    /// How `coord` was reached, or `None` if the search never recorded it.
    pub fn predecessor(&self, coord: CellCoord) -> Option<Predecessor> {
        self.slot(coord).and_then(|i| self.came_from[i])
    }

    /// Whether the search recorded `coord`.
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.predecessor(coord).is_some()
    }

    /// Number of recorded cells, including the start.
    pub fn visited_count(&self) -> usize {
        self.came_from.iter().filter(|p| p.is_some()).count()
    }

    /// Number of cells taken off the queue.
    pub fn expanded_count(&self) -> usize {
        self.expanded
    }

    /// Walks predecessors from `goal` back to the start.
    ///
    /// The result runs goal to start. It is empty when `goal` was never
    /// recorded.
    pub fn backtrack(&self, goal: CellCoord) -> Vec<CellCoord> {
        let mut path = Vec::new();
        let mut current = goal;
        // A tree over n cells has no chain longer than n.
        for _ in 0..self.came_from.len() {
            match self.predecessor(current) {
                None => return Vec::new(),
                Some(Predecessor::Start) => {
                    path.push(current);
                    return path;
                }
                Some(Predecessor::Cell(previous)) => {
                    path.push(current);
                    current = previous;
                }
            }
        }
        Vec::new()
    }

    /// Path from the start to `goal`, both included. Empty if `goal` is unreachable.
    pub fn path_to(&self, goal: CellCoord) -> Vec<CellCoord> {
        let mut path = self.backtrack(goal);
        path.reverse();
        path
    }
}

/// Runs a breadth-first search from `start`, stopping once `goal` is dequeued.
///
/// Passing `None` as the goal explores everything reachable from `start`.
/// A start outside the grid yields an empty tree. The start cell itself is
/// recorded even when it is not passable; only its neighbors are filtered.
pub fn breadth_first_search(
    grid: &OccupancyGrid,
    start: CellCoord,
    goal: Option<CellCoord>,
) -> SearchTree {
    let mut tree = SearchTree::empty(grid);
    let Some(start_cell) = grid.cell(start) else {
        debug!(%start, "Search start is outside the grid");
        return tree;
    };

    let mut frontier: VecDeque<&GridCell> = VecDeque::new();
    tree.record(start, Predecessor::Start);
    frontier.push_back(start_cell);

    while let Some(current) = frontier.pop_front() {
        tree.expanded += 1;
        let coord = current.coord();
        trace!(col = coord.col, row = coord.row, "Expanding cell");
        if Some(coord) == goal {
            debug!(%coord, expanded = tree.expanded, "Reached goal");
            break;
        }

        for next in grid.neighbors_of_cell(current) {
            let next_coord = next.coord();
            if !tree.contains(next_coord) {
                tree.record(next_coord, Predecessor::Cell(coord));
                frontier.push_back(next);
            }
        }
    }

    tree
}

/// Result of planning between the first two waypoints of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Fewer than two waypoints were supplied.
    NotRequested,
    /// A search ran from the first waypoint towards the second.
    Planned {
        /// Predecessor map of the search.
        tree: SearchTree,
        /// Cell under the first waypoint.
        start: CellCoord,
        /// Cell under the second waypoint.
        goal: CellCoord,
    },
}

impl PlanOutcome {
    /// Path from start to goal. Empty when nothing was planned or the goal is unreachable.
    pub fn path(&self) -> Vec<CellCoord> {
        match self {
            PlanOutcome::NotRequested => Vec::new(),
            PlanOutcome::Planned { tree, goal, .. } => tree.path_to(*goal),
        }
    }

    /// Whether a search ran and found its goal.
    pub fn is_reachable(&self) -> bool {
        match self {
            PlanOutcome::NotRequested => false,
            PlanOutcome::Planned { tree, goal, .. } => tree.contains(*goal),
        }
    }
}

fn waypoint_cell(grid: &OccupancyGrid, waypoint: &RotatedRect) -> Result<CellCoord, NavigationError> {
    let (col, row) = grid.position_to_index(waypoint.x, waypoint.y);
    grid.cell_at(col, row)
        .map(GridCell::coord)
        .ok_or(NavigationError::WaypointOutOfBounds {
            x: waypoint.x,
            y: waypoint.y,
            col,
            row,
        })
}

/// Plans from the first waypoint to the second.
///
/// Waypoints past the second are ignored.
///
/// # Errors
/// Returns `NavigationError::WaypointOutOfBounds` if either of the first two
/// waypoint centers lies outside the grid.
pub fn plan_between_waypoints(
    grid: &OccupancyGrid,
    waypoints: &[RotatedRect],
) -> Result<PlanOutcome, NavigationError> {
    let [first, second, ..] = waypoints else {
        debug!(waypoints = waypoints.len(), "Not enough waypoints to plan");
        return Ok(PlanOutcome::NotRequested);
    };

    let start = waypoint_cell(grid, first)?;
    let goal = waypoint_cell(grid, second)?;
    let tree = breadth_first_search(grid, start, Some(goal));
    let reachable = tree.contains(goal);
    info!(
        %start,
        %goal,
        reachable,
        visited = tree.visited_count(),
        "Planned between waypoints"
    );

    Ok(PlanOutcome::Planned { tree, start, goal })
}
