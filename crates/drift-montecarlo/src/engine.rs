//! The run orchestrator.

use std::time::Instant;

use drift_kinematics::{DifferentialDrive, Pose, TimeStep, WheelSpeeds};
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::noise::{NoiseModel, NoiseParams};
use crate::result::{MonteCarloOutput, RunResult};
use crate::strategy::{OdometryStrategy, StepReadings};

/// Controls how runs are scheduled.
///
/// Runs are seeded by index, so both strategies produce identical output.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Distribute runs over the global Rayon thread pool.
    #[default]
    Parallel,
    /// Run sequentially on the current thread.
    Serial,
}

/// A validated Monte Carlo experiment, ready to run.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    drive: DifferentialDrive,
    dt: TimeStep,
    command: WheelSpeeds,
    noise: NoiseParams,
    num_steps: usize,
    num_runs: usize,
    strategies: Vec<OdometryStrategy>,
    base_seed: u64,
    execution: ExecutionStrategy,
}

impl MonteCarloEngine {
    /// Validates `config` and builds an engine from it.
    ///
    /// # Errors
    ///
    /// Any [`SimulationError`] reported by [`SimulationConfig::validate`].
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let (drive, dt) = config.validate()?;
        let noise = config.noise_params();
        let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());

        if noise.is_noiseless() && config.num_runs > 1 {
            warn!(
                num_runs = config.num_runs,
                "All noise sources are disabled; every run will produce the same terminal poses"
            );
        }

        Ok(Self {
            drive,
            dt,
            command: config.wheel_speeds(),
            noise,
            num_steps: config.num_steps,
            num_runs: config.num_runs,
            strategies: config.strategies.clone(),
            base_seed,
            execution: ExecutionStrategy::default(),
        })
    }

    /// Sets how runs are scheduled.
    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }

    /// Base seed every run's generator is derived from.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Number of runs [`MonteCarloEngine::run`] performs.
    pub fn num_runs(&self) -> usize {
        self.num_runs
    }

    /// Number of steps in every run.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Tracked odometry strategies.
    pub fn strategies(&self) -> &[OdometryStrategy] {
        &self.strategies
    }

    /// Performs every run and collects the terminal poses in run order.
    pub fn run(&self) -> MonteCarloOutput {
        info!(
            num_runs = self.num_runs,
            num_steps = self.num_steps,
            dt = self.dt.seconds(),
            axle_length = self.drive.axle_length(),
            command = %self.command,
            chassis = %self.drive.forward_kinematics(self.command),
            seed = self.base_seed,
            strategies = ?self.strategies,
            execution = ?self.execution,
            "Starting Monte Carlo simulation"
        );
        let started = Instant::now();

        let runs: Vec<RunResult> = match self.execution {
            ExecutionStrategy::Serial => (0..self.num_runs).map(|i| self.run_trial(i)).collect(),
            ExecutionStrategy::Parallel => (0..self.num_runs).into_par_iter().map(|i| self.run_trial(i)).collect(),
        };

        info!(elapsed = ?started.elapsed(), num_runs = runs.len(), "Monte Carlo simulation finished");
        MonteCarloOutput::new(self.strategies.clone(), runs)
    }

    /// Performs run `run_index` alone.
    ///
    /// The result depends only on the configuration, the base seed and the
    /// index, never on which other runs were executed.
    pub fn run_trial(&self, run_index: usize) -> RunResult {
        let mut noise = NoiseModel::for_run(self.noise, self.base_seed, run_index);
        let nominal = self.command.displacement(self.dt);
        let needs_measurement = self.strategies.iter().any(|s| s.uses_measurement());

        let mut truth = Pose::origin();
        let mut estimates: [Option<Pose>; 3] = [None; 3];
        for strategy in &self.strategies {
            estimates[strategy.index()] = Some(Pose::origin());
        }

        for _ in 0..self.num_steps {
            let (noise_left, noise_right) = noise.velocity_noise();
            let actual = self.command.perturbed(noise_left, noise_right);
            truth = self.drive.advance_with_speeds(truth, actual, self.dt);

            let measured = if needs_measurement {
                let (left, right) = noise.odometry_noise();
                nominal.perturbed(left, right)
            } else {
                nominal
            };
            let readings = StepReadings { nominal, measured };

            for &strategy in &self.strategies {
                if let Some(pose) = estimates[strategy.index()].as_mut() {
                    let displacement = strategy.displacement(&readings, &mut noise);
                    *pose = self.drive.advance(*pose, displacement);
                }
            }
        }

        debug!(run = run_index, truth = %truth, "Run complete");
        RunResult::new(run_index, self.num_steps, truth, estimates)
    }
}
