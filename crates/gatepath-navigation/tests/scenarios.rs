use gatepath_geometry::{Point2, RotatedRect};
use gatepath_navigation::bfs::{PlanOutcome, breadth_first_search, plan_between_waypoints};
use gatepath_navigation::frame::{FrameParams, plan_frame};
use gatepath_navigation::map::{CellCoord, Occupancy, OccupancyGrid};

fn unit_grid(columns: usize, rows: usize) -> OccupancyGrid {
    OccupancyGrid::new(Point2::new(0.0, 0.0), columns as f64, rows as f64, 1.0, 0).unwrap()
}

fn cell_waypoint(col: usize, row: usize) -> RotatedRect {
    RotatedRect::axis_aligned(col as f64 + 0.5, row as f64 + 0.5, 0.5, 0.5)
}

#[test]
fn open_grid_corner_to_corner() {
    let grid = unit_grid(10, 10);
    let waypoints = [cell_waypoint(0, 0), cell_waypoint(9, 9)];
    let outcome = plan_between_waypoints(&grid, &waypoints).unwrap();
    let path = outcome.path();

    assert_eq!(path.len(), 19);
    assert_eq!(path[0], CellCoord::new(0, 0));
    assert_eq!(path[18], CellCoord::new(9, 9));
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
    }
}

#[test]
fn full_wall_blocks_then_gap_detours() {
    let mut grid = unit_grid(10, 10);
    // Row 5 fully covered.
    let wall = RotatedRect::axis_aligned(5.0, 5.5, 10.0, 0.5);
    assert_eq!(grid.mark_occupied(&wall, Occupancy::Obstacle, 15), 10);

    let start = CellCoord::new(5, 0);
    let goal = CellCoord::new(5, 9);
    let tree = breadth_first_search(&grid, start, Some(goal));
    assert!(tree.path_to(goal).is_empty());

    // Same wall with a gap at column 0.
    let mut grid = unit_grid(10, 10);
    let wall = RotatedRect::axis_aligned(5.5, 5.5, 9.0, 0.5);
    assert_eq!(grid.mark_occupied(&wall, Occupancy::Obstacle, 15), 9);
    assert!(grid.cell(CellCoord::new(0, 5)).unwrap().is_passable());

    let tree = breadth_first_search(&grid, start, Some(goal));
    let path = tree.path_to(goal);
    assert!(path.contains(&CellCoord::new(0, 5)));
    assert!(path.len() - 1 > start.manhattan_distance(&goal));
    // Five columns over to the gap and five back.
    assert_eq!(path.len() - 1, 9 + 2 * 5);
}

#[test]
fn fewer_than_two_waypoints_requests_nothing() {
    let grid = unit_grid(5, 5);
    assert_eq!(plan_between_waypoints(&grid, &[]).unwrap(), PlanOutcome::NotRequested);
    assert_eq!(
        plan_between_waypoints(&grid, &[cell_waypoint(2, 2)]).unwrap(),
        PlanOutcome::NotRequested
    );

    // A frame with a single gate has one waypoint and so no plan.
    let cones = [
        RotatedRect::axis_aligned(0.0, 0.0, 10.0, 10.0),
        RotatedRect::axis_aligned(50.0, 0.0, 10.0, 10.0),
    ];
    let frame = plan_frame(&cones, &[], &FrameParams::default()).unwrap();
    assert_eq!(frame.waypoints.len(), 1);
    assert_eq!(frame.plan, PlanOutcome::NotRequested);
    assert!(frame.path().is_empty());
}

#[test]
fn waypoint_on_cell_boundary_resolves_to_one_cell() {
    let grid = unit_grid(10, 10);
    // (4.0, 6.0) is the shared corner of four cells.
    let (col, row) = grid.position_to_index(4.0, 6.0);
    assert_eq!((col, row), (4, 6));
    assert_eq!(grid.coord_at(4.0, 6.0), Some(CellCoord::new(4, 6)));

    let containing: Vec<_> = grid
        .cells()
        .iter()
        .filter(|c| grid.position_to_index(4.0, 6.0) == (c.coord().col as i64, c.coord().row as i64))
        .collect();
    assert_eq!(containing.len(), 1);

    let waypoints = [RotatedRect::axis_aligned(4.0, 6.0, 2.0, 2.0), cell_waypoint(9, 9)];
    match plan_between_waypoints(&grid, &waypoints).unwrap() {
        PlanOutcome::Planned { start, .. } => assert_eq!(start, CellCoord::new(4, 6)),
        PlanOutcome::NotRequested => panic!("expected a plan"),
    }
}
