use gatepath_geometry::RotatedRect;
use gatepath_navigation::frame::{FrameParams, plan_frame};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    // Two gates, one above the other, roughly 60 px wide
    let cones = vec![
        RotatedRect::new(100.0, 50.0, 12.0, 14.0, 5.0),
        RotatedRect::new(160.0, 52.0, 12.0, 14.0, -3.0),
        RotatedRect::new(95.0, 200.0, 13.0, 15.0, 0.0),
        RotatedRect::new(158.0, 205.0, 12.0, 14.0, 10.0),
    ];

    // Scatter a few obstacles between the gates
    let mut rng = StdRng::seed_from_u64(42);
    let obstacles: Vec<RotatedRect> = (0..4)
        .map(|_| {
            RotatedRect::new(
                rng.random_range(90.0..170.0),
                rng.random_range(80.0..170.0),
                rng.random_range(8.0..25.0),
                rng.random_range(8.0..25.0),
                rng.random_range(0.0..90.0),
            )
        })
        .collect();

    let frame = plan_frame(&cones, &obstacles, &FrameParams::default()).unwrap();

    println!("Gates: {:?}", frame.gates);
    for (i, waypoint) in frame.waypoints.iter().enumerate() {
        println!("Waypoint {}: {}", i, waypoint);
    }
    if let Some(grid) = &frame.grid {
        println!("{}x{} cells of size {}", grid.columns(), grid.rows(), grid.cell_size());
    }

    let path = frame.path();
    println!("Path length: {}", path.len());
    if let Some(rendered) = frame.render() {
        println!("\n{}", rendered);
    }
}
