mod config; // brings `config.rs` in as `crate::config`
mod scene; // brings `scene.rs` in as `crate::scene`

use anyhow::Context;
use gatepath_navigation::{PlanOutcome, plan_frame};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config_path = std::env::args().nth(1);
    let config = config::load_config(config_path.as_deref()).context("Failed to load configuration")?;
    let scene = scene::build_scene(&config.scene)?;

    let frame = plan_frame(&scene.cones, &scene.obstacles, &config.planner)
        .context("Failed to plan frame")?;

    for (gate, waypoint) in frame.gates.iter().zip(&frame.waypoints) {
        info!(left = gate.left, right = gate.right, %waypoint, "Gate");
    }

    match &frame.plan {
        PlanOutcome::NotRequested => {
            info!(waypoints = frame.waypoints.len(), "No path requested");
        }
        PlanOutcome::Planned { start, goal, .. } if frame.plan.is_reachable() => {
            info!(%start, %goal, cells = frame.path().len(), "Path found");
        }
        PlanOutcome::Planned { start, goal, .. } => {
            warn!(%start, %goal, "Goal is unreachable");
        }
    }

    match &frame.grid {
        Some(grid) => {
            println!(
                "{}x{} grid, cell size {:.1}, origin {}",
                grid.columns(),
                grid.rows(),
                grid.cell_size(),
                grid.origin()
            );
            println!("{}", grid.render_path(&frame.path()));
        }
        None => println!("No objects detected"),
    }

    Ok(())
}
