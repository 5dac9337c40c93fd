use gatepath_geometry::{Point2, RotatedRect};
use gatepath_navigation::map::{CellCoord, Occupancy, OccupancyGrid};
use gatepath_navigation::bfs::breadth_first_search;

fn main() {
    // 20x10 grid with 1.0 cells and no padding
    let mut grid = OccupancyGrid::new(Point2::new(0.0, 0.0), 20.0, 10.0, 1.0, 0).unwrap();

    // A wall with a single gap near the bottom
    let wall = RotatedRect::axis_aligned(10.0, 4.0, 1.0, 8.0);
    let marked = grid.mark_occupied(&wall, Occupancy::Obstacle, 15);
    println!("Wall covers {} cells", marked);

    // A tilted obstacle on the right
    let slab = RotatedRect::new(15.0, 6.0, 6.0, 1.5, 35.0);
    grid.mark_occupied(&slab, Occupancy::Obstacle, 15);

    let start = CellCoord::new(2, 2);
    let goal = CellCoord::new(18, 2);
    let tree = breadth_first_search(&grid, start, Some(goal));
    let path = tree.path_to(goal);

    println!(
        "Visited {} cells, expanded {}",
        tree.visited_count(),
        tree.expanded_count()
    );
    if path.is_empty() {
        println!("No path from {} to {}", start, goal);
    } else {
        println!(
            "Path from {} to {}: {} cells (Manhattan distance {})",
            start,
            goal,
            path.len(),
            start.manhattan_distance(&goal)
        );
    }

    println!("\n{}", grid.render_path(&path));
}
