#![warn(missing_docs)]
#![doc = "Monte Carlo engine for differential-drive odometry error."]
#![doc = ""]
#![doc = "Each run drives a robot from the origin with noisy wheel velocities, integrates"]
#![doc = "one or more odometry estimates alongside it, and records the terminal poses."]
#![doc = "Runs are independent and individually seeded, so they may execute in parallel"]
#![doc = "without changing the result."]
#![doc = ""]
#![doc = "```"]
#![doc = "use drift_montecarlo::{MonteCarloEngine, OdometryStrategy, SimulationConfig};"]
#![doc = ""]
#![doc = "let config = SimulationConfig::circular_correction().with_runs(10).with_seed(42);"]
#![doc = "let output = MonteCarloEngine::new(&config)?.run();"]
#![doc = "assert_eq!(output.truth().len(), 10);"]
#![doc = "let drift = output.mean_position_error(OdometryStrategy::NoCorrection);"]
#![doc = "assert!(drift.is_some());"]
#![doc = "# Ok::<(), drift_montecarlo::SimulationError>(())"]
#![doc = "```"]

pub mod config;
pub mod engine;
pub mod error;
pub mod noise;
pub mod result;
pub mod stats;
pub mod strategy;

pub use config::SimulationConfig;
pub use engine::{ExecutionStrategy, MonteCarloEngine};
pub use error::SimulationError;
pub use noise::{NoiseModel, NoiseParams, NoiseSite};
pub use result::{MonteCarloOutput, ResultSet, RunResult};
pub use stats::{PositionStats, correlation};
pub use strategy::{OdometryStrategy, StepReadings, TrackedPose};

pub use drift_kinematics::{DifferentialDrive, Pose, TimeStep, WheelDisplacement, WheelSpeeds};
