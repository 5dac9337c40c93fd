//! Detected objects for one frame, read from the config or generated.

use crate::config::{ObjectConfig, RandomSceneConfig, SceneConfig, SceneMode};
use anyhow::{Context, Result, ensure};
use gatepath_geometry::RotatedRect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Gate width as a multiple of cone size for generated gates.
/// Sits inside the planner's default `[4, 7]` gate range.
const GATE_WIDTH_FACTOR: f64 = 5.5;

/// Classified objects handed to the planner.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub cones: Vec<RotatedRect>,
    pub obstacles: Vec<RotatedRect>,
}

/// Builds the scene selected by `config.mode`, rejecting invalid objects.
pub fn build_scene(config: &SceneConfig) -> Result<Scene> {
    let scene = match config.mode {
        SceneMode::File => Scene {
            cones: to_rects(&config.cones).context("Invalid cone in scene config")?,
            obstacles: to_rects(&config.obstacles).context("Invalid obstacle in scene config")?,
        },
        SceneMode::Random => random_scene(&config.random)?,
    };
    info!(
        mode = ?config.mode,
        cones = scene.cones.len(),
        obstacles = scene.obstacles.len(),
        "Scene ready"
    );
    Ok(scene)
}

fn to_rects(objects: &[ObjectConfig]) -> Result<Vec<RotatedRect>> {
    objects
        .iter()
        .enumerate()
        .map(|(i, o)| {
            RotatedRect::try_new(o.x, o.y, o.width, o.height, o.rotation)
                .with_context(|| format!("object #{} ({:?})", i, o))
        })
        .collect()
}

/// Generates cones as gates stacked top to bottom, plus scattered obstacles.
///
/// Cones come in pairs about [`GATE_WIDTH_FACTOR`] cone sizes apart; an odd
/// cone out is placed anywhere. Obstacles are placed uniformly in the area.
pub fn random_scene(config: &RandomSceneConfig) -> Result<Scene> {
    ensure!(
        config.width > 0.0 && config.height > 0.0,
        "Random scene area must be positive, got {}x{}",
        config.width,
        config.height
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let cone_size = (config.width.min(config.height) / 40.0).max(1.0);
    let gate_width = GATE_WIDTH_FACTOR * cone_size;
    let gate_count = config.cones / 2;

    let mut cones = Vec::with_capacity(config.cones);
    let row_height = config.height / (gate_count.max(1) as f64);
    for gate in 0..gate_count {
        let center_x = rng.random_range(gate_width..(config.width - gate_width).max(gate_width + 1.0));
        let center_y = (gate as f64 + 0.5) * row_height;
        for side in [-0.5, 0.5] {
            let jitter = rng.random_range(-0.2..0.2) * cone_size;
            cones.push(random_cone(
                &mut rng,
                center_x + side * gate_width + jitter,
                center_y + jitter,
                cone_size,
            ));
        }
        debug!(gate, center_x, center_y, "Generated gate");
    }
    if config.cones % 2 == 1 {
        let x = rng.random_range(0.0..config.width);
        let y = rng.random_range(0.0..config.height);
        cones.push(random_cone(&mut rng, x, y, cone_size));
    }

    let obstacles = (0..config.obstacles)
        .map(|_| {
            RotatedRect::new(
                rng.random_range(0.0..config.width),
                rng.random_range(0.0..config.height),
                rng.random_range(cone_size..cone_size * 4.0),
                rng.random_range(cone_size..cone_size * 4.0),
                rng.random_range(0.0..180.0),
            )
        })
        .collect();

    Ok(Scene { cones, obstacles })
}

fn random_cone(rng: &mut StdRng, x: f64, y: f64, size: f64) -> RotatedRect {
    RotatedRect::new(
        x,
        y,
        size * rng.random_range(0.9..1.1),
        size * rng.random_range(0.9..1.1),
        rng.random_range(-10.0..10.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatepath_navigation::{FrameParams, plan_frame};

    fn random_config(seed: u64) -> RandomSceneConfig {
        RandomSceneConfig {
            seed,
            cones: 5,
            obstacles: 3,
            width: 400.0,
            height: 400.0,
        }
    }

    #[test]
    fn test_file_scene() {
        let config = SceneConfig {
            mode: SceneMode::File,
            cones: vec![ObjectConfig { x: 1.0, y: 2.0, width: 3.0, height: 4.0, rotation: 10.0 }],
            obstacles: vec![],
            random: RandomSceneConfig::default(),
        };
        let scene = build_scene(&config).unwrap();
        assert_eq!(scene.cones, vec![RotatedRect::new(1.0, 2.0, 3.0, 4.0, 10.0)]);
        assert!(scene.obstacles.is_empty());
    }

    #[test]
    fn test_file_scene_rejects_negative_size() {
        let config = SceneConfig {
            obstacles: vec![ObjectConfig { x: 0.0, y: 0.0, width: -1.0, height: 4.0, rotation: 0.0 }],
            ..SceneConfig::default()
        };
        assert!(build_scene(&config).is_err());
    }

    #[test]
    fn test_random_scene_is_seeded() {
        let a = random_scene(&random_config(3)).unwrap();
        let b = random_scene(&random_config(3)).unwrap();
        assert_eq!(a.cones, b.cones);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.cones.len(), 5);
        assert_eq!(a.obstacles.len(), 3);
    }

    #[test]
    fn test_random_scene_rejects_empty_area() {
        let config = RandomSceneConfig {
            width: 0.0,
            ..random_config(1)
        };
        assert!(random_scene(&config).is_err());
    }

    #[test]
    fn test_random_gates_pair_up() {
        let config = RandomSceneConfig {
            obstacles: 0,
            ..random_config(11)
        };
        let scene = random_scene(&config).unwrap();
        let frame = plan_frame(&scene.cones, &scene.obstacles, &FrameParams::default()).unwrap();
        assert!(frame.gates.len() >= 2);
        assert!(frame.grid.is_some());
    }
}
