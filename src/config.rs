use config::{Config, ConfigError, Environment, File, FileFormat};
use gatepath_navigation::FrameParams;
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Everything the planner binary reads from its configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub planner: FrameParams,
    #[serde(default)]
    pub scene: SceneConfig,
}

/// Where the detected objects come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneMode {
    /// Objects listed under `[scene]`.
    #[default]
    File,
    /// Objects generated from `[scene.random]`.
    Random,
}

/// The `[scene]` section: which objects one frame is planned over.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub mode: SceneMode,
    #[serde(default)]
    pub cones: Vec<ObjectConfig>,
    #[serde(default)]
    pub obstacles: Vec<ObjectConfig>,
    #[serde(default)]
    pub random: RandomSceneConfig,
}

/// A detected object as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ObjectConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees.
    #[serde(default)]
    pub rotation: f64,
}

/// The `[scene.random]` section: seed, object counts and image size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RandomSceneConfig {
    pub seed: u64,
    pub cones: usize,
    pub obstacles: usize,
    pub width: f64,
    pub height: f64,
}

impl Default for RandomSceneConfig {
    fn default() -> Self {
        RandomSceneConfig {
            seed: 0,
            cones: 4,
            obstacles: 3,
            width: 640.0,
            height: 480.0,
        }
    }
}

/// Loads the configuration from `path` (or the default path) and `GATEPATH_*` variables.
///
/// Nested keys use a double underscore, e.g. `GATEPATH_PLANNER__MAX_STEPS=20`.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix("GATEPATH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|config| config.try_deserialize::<AppConfig>());

    match settings {
        Ok(config) => {
            info!(planner = ?config.planner, mode = ?config.scene.mode, "Successfully loaded configuration");
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
