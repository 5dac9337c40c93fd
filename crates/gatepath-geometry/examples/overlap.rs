use gatepath_geometry::*;

fn main() {
    let cone = RotatedRect::new(10.0, 10.0, 4.0, 6.0, 30.0);
    let cell_size = 2.0;

    println!("Cone: {}", cone);
    println!("  Corners:");
    for (i, corner) in cone.corners().iter().enumerate() {
        println!("    {}: {}", i, corner);
    }
    let bounds = cone.bounding_box();
    println!(
        "  Bounding box: {} -> ({:.2}, {:.2}), {:.2} x {:.2}",
        bounds.top_left(),
        bounds.max_x,
        bounds.max_y,
        bounds.width(),
        bounds.height()
    );

    println!("\nCells of size {} overlapping the cone:", cell_size);
    let mut hits = 0;
    for row in 0..10 {
        for col in 0..10 {
            let cell = RotatedRect::axis_aligned(
                col as f64 * cell_size + cell_size / 2.0,
                row as f64 * cell_size + cell_size / 2.0,
                cell_size,
                cell_size,
            );
            if cone.intersects(&cell) {
                hits += 1;
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
    println!("{} cells hit", hits);

    let other = RotatedRect::axis_aligned(12.0, 12.0, 4.0, 4.0);
    println!("\nOther: {}", other);
    println!("  Distance:     {:.3}", cone.distance(&other));
    println!("  Overlap area: {:.3}", cone.overlap_area(&other));

    match RotatedRect::try_new(0.0, 0.0, -1.0, 2.0, 0.0) {
        Ok(rect) => println!("\nUnexpectedly built {}", rect),
        Err(e) => println!("\nRejected rectangle: {}", e),
    }
}
