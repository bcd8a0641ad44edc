use config::{Config, ConfigError, File, FileFormat};
use drift_montecarlo::{ExecutionStrategy, SimulationConfig};
use serde::Deserialize;
use std::path::Path;
use tracing::{error, info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// One named experiment.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Scenario {
    fn preset(name: &str, simulation: SimulationConfig) -> Self {
        Scenario {
            name: name.to_string(),
            simulation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub execution: ExecutionStrategy,
    pub scenario: Vec<Scenario>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            execution: ExecutionStrategy::default(),
            scenario: vec![
                Scenario::preset("straight-line-clean", SimulationConfig::straight_line_clean()),
                Scenario::preset("straight-line-noisy", SimulationConfig::straight_line_noisy()),
                Scenario::preset("circular-noisy", SimulationConfig::circular_noisy()),
                Scenario::preset("circular-correction", SimulationConfig::circular_correction()),
            ],
        }
    }
}

/// Loads the scenario file at `path`. A missing file yields the built-in presets.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    if !Path::new(path).exists() {
        warn!("Configuration file {} not found, using built-in scenarios", path);
        return Ok(AppConfig::default());
    }
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .build()
        .and_then(|config| config.try_deserialize::<AppConfig>());

    match settings {
        Ok(app) => {
            info!(scenarios = app.scenario.len(), execution = ?app.execution, "Successfully loaded configuration");
            Ok(app)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_montecarlo::OdometryStrategy;

    #[test]
    fn test_missing_file_uses_presets() {
        let app = load_config("does/not/exist.toml").unwrap();
        assert_eq!(app.scenario.len(), 4);
        assert_eq!(app.execution, ExecutionStrategy::Parallel);
    }

    #[test]
    fn test_shipped_scenarios_are_valid() {
        let app = load_config(DEFAULT_CONFIG_PATH).unwrap();
        let presets = AppConfig::default();
        assert_eq!(app.scenario.len(), presets.scenario.len());
        for (loaded, preset) in app.scenario.iter().zip(&presets.scenario) {
            assert_eq!(loaded.name, preset.name);
            assert_eq!(loaded.simulation, preset.simulation);
        }
    }

    #[test]
    fn test_parse_scenarios() {
        let toml = r#"
            execution = "serial"

            [[scenario]]
            name = "short-circle"

            [scenario.simulation]
            vl = 0.0
            vr = 1.0
            num_steps = 64
            num_runs = 10
            sigma_velocity = 0.05
            sigma_odometry_left = 0.1
            sigma_odometry_right = 0.1
            strategies = ["no-correction", "noisy-correction"]
            seed = 42

            [[scenario]]
            name = "defaults"
        "#;
        let app: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(app.execution, ExecutionStrategy::Serial);
        assert_eq!(app.scenario.len(), 2);

        let circle = &app.scenario[0].simulation;
        assert_eq!(app.scenario[0].name, "short-circle");
        assert_eq!((circle.vl, circle.vr), (0.0, 1.0));
        assert_eq!(circle.b, 1.0);
        assert_eq!(circle.num_runs, 10);
        assert_eq!(circle.seed, Some(42));
        assert_eq!(
            circle.strategies,
            vec![OdometryStrategy::NoCorrection, OdometryStrategy::NoisyCorrection]
        );
        assert!(circle.validate().is_ok());

        assert_eq!(app.scenario[1].simulation, SimulationConfig::default());
    }
}
