//! Simulation configuration and the presets reproducing the reference experiments.

use drift_kinematics::{DifferentialDrive, TimeStep, WheelSpeeds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::noise::NoiseParams;
use crate::strategy::OdometryStrategy;

/// Parameters of one Monte Carlo experiment.
///
/// Field names follow the usual notation: `b` is the axle length, `vl`/`vr`
/// the commanded wheel speeds. `sigma_velocity` perturbs both wheel speeds
/// unless `sigma_velocity_left`/`sigma_velocity_right` override it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Axle length (m).
    pub b: f64,
    /// Commanded left wheel speed (m/s).
    pub vl: f64,
    /// Commanded right wheel speed (m/s).
    pub vr: f64,
    /// Integration time step (s).
    pub dt: f64,
    /// Steps per run.
    pub num_steps: usize,
    /// Independent runs.
    pub num_runs: usize,
    /// Wheel velocity noise applied to both wheels (m/s).
    pub sigma_velocity: f64,
    /// Left wheel velocity noise, overriding `sigma_velocity` (m/s).
    pub sigma_velocity_left: Option<f64>,
    /// Right wheel velocity noise, overriding `sigma_velocity` (m/s).
    pub sigma_velocity_right: Option<f64>,
    /// Left wheel displacement measurement noise (m).
    pub sigma_odometry_left: f64,
    /// Right wheel displacement measurement noise (m).
    pub sigma_odometry_right: f64,
    /// Odometry estimates to integrate alongside the true motion.
    pub strategies: Vec<OdometryStrategy>,
    /// Base seed; drawn from OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::straight_line_clean()
    }
}

impl SimulationConfig {
    /// Straight line, no noise anywhere, one perfect odometry estimate.
    pub fn straight_line_clean() -> Self {
        SimulationConfig {
            b: 1.0,
            vl: 1.0,
            vr: 1.0,
            dt: 0.1,
            num_steps: 100,
            num_runs: 100,
            sigma_velocity: 0.0,
            sigma_velocity_left: None,
            sigma_velocity_right: None,
            sigma_odometry_left: 0.0,
            sigma_odometry_right: 0.0,
            strategies: vec![OdometryStrategy::PerfectCorrection],
            seed: None,
        }
    }

    /// Short straight line with noisy wheel velocities and clean odometry.
    pub fn straight_line_noisy() -> Self {
        SimulationConfig {
            num_steps: 10,
            sigma_velocity: 0.1,
            ..Self::straight_line_clean()
        }
    }

    /// One loop of a circle (left wheel stopped) with noisy wheel velocities
    /// and clean odometry.
    pub fn circular_noisy() -> Self {
        SimulationConfig {
            vl: 0.0,
            vr: 1.0,
            num_steps: 64,
            ..Self::straight_line_noisy()
        }
    }

    /// One loop of a circle comparing no, perfect and noisy odometry correction.
    pub fn circular_correction() -> Self {
        SimulationConfig {
            sigma_velocity: 0.05,
            sigma_odometry_left: 0.1,
            sigma_odometry_right: 0.1,
            strategies: OdometryStrategy::ALL.to_vec(),
            ..Self::circular_noisy()
        }
    }

    /// Sets the axle length.
    pub fn with_axle_length(mut self, b: f64) -> Self {
        self.b = b;
        self
    }

    /// Sets the commanded wheel speeds.
    pub fn with_wheel_speeds(mut self, vl: f64, vr: f64) -> Self {
        self.vl = vl;
        self.vr = vr;
        self
    }

    /// Sets the time step.
    pub fn with_time_step(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Sets the number of steps per run.
    pub fn with_steps(mut self, num_steps: usize) -> Self {
        self.num_steps = num_steps;
        self
    }

    /// Sets the number of runs.
    pub fn with_runs(mut self, num_runs: usize) -> Self {
        self.num_runs = num_runs;
        self
    }

    /// Sets the velocity noise of both wheels and clears per-wheel overrides.
    pub fn with_velocity_noise(mut self, sigma: f64) -> Self {
        self.sigma_velocity = sigma;
        self.sigma_velocity_left = None;
        self.sigma_velocity_right = None;
        self
    }

    /// Sets separate velocity noise for each wheel.
    pub fn with_wheel_velocity_noise(mut self, left: f64, right: f64) -> Self {
        self.sigma_velocity_left = Some(left);
        self.sigma_velocity_right = Some(right);
        self
    }

    /// Sets the odometry measurement noise for each wheel.
    pub fn with_odometry_noise(mut self, left: f64, right: f64) -> Self {
        self.sigma_odometry_left = left;
        self.sigma_odometry_right = right;
        self
    }

    /// Replaces the tracked odometry strategies.
    pub fn with_strategies(mut self, strategies: impl Into<Vec<OdometryStrategy>>) -> Self {
        self.strategies = strategies.into();
        self
    }

    /// Fixes the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Commanded wheel speeds.
    pub fn wheel_speeds(&self) -> WheelSpeeds {
        WheelSpeeds::new(self.vl, self.vr)
    }

    /// Effective standard deviation of every noise site.
    pub fn noise_params(&self) -> NoiseParams {
        NoiseParams {
            velocity_left: self.sigma_velocity_left.unwrap_or(self.sigma_velocity),
            velocity_right: self.sigma_velocity_right.unwrap_or(self.sigma_velocity),
            odometry_left: self.sigma_odometry_left,
            odometry_right: self.sigma_odometry_right,
        }
    }

    /// Checks every parameter and returns the validated drive and time step.
    ///
    /// # Errors
    ///
    /// The first invalid parameter found, checked in field order.
    pub fn validate(&self) -> Result<(DifferentialDrive, TimeStep), SimulationError> {
        let drive = DifferentialDrive::new(self.b).map_err(|_| SimulationError::InvalidAxleLength(self.b))?;
        let dt = TimeStep::new(self.dt).map_err(|_| SimulationError::InvalidTimeStep(self.dt))?;

        if self.num_steps == 0 {
            return Err(SimulationError::ZeroSteps);
        }
        if self.num_runs == 0 {
            return Err(SimulationError::ZeroRuns);
        }
        for (wheel, value) in [("left", self.vl), ("right", self.vr)] {
            if !value.is_finite() {
                return Err(SimulationError::NonFiniteWheelSpeed { wheel, value });
            }
        }
        self.noise_params().validate()?;

        for (i, strategy) in self.strategies.iter().enumerate() {
            if self.strategies[..i].contains(strategy) {
                return Err(SimulationError::DuplicateStrategy(*strategy));
            }
        }

        Ok((drive, dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseSite;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            SimulationConfig::straight_line_clean(),
            SimulationConfig::straight_line_noisy(),
            SimulationConfig::circular_noisy(),
            SimulationConfig::circular_correction(),
        ] {
            assert!(config.validate().is_ok(), "{:?}", config);
        }
    }

    #[test]
    fn test_preset_values() {
        let config = SimulationConfig::circular_correction();
        assert_eq!((config.vl, config.vr), (0.0, 1.0));
        assert_eq!(config.num_steps, 64);
        assert_eq!(config.num_runs, 100);
        assert_eq!(config.strategies.len(), 3);
        let noise = config.noise_params();
        assert_eq!(noise.velocity_left, 0.05);
        assert_eq!(noise.odometry_right, 0.1);
    }

    #[test]
    fn test_invalid_axle_length() {
        for b in [0.0, -1.0, f64::NAN] {
            let err = SimulationConfig::default().with_axle_length(b).validate().unwrap_err();
            assert!(matches!(err, SimulationError::InvalidAxleLength(_)));
        }
    }

    #[test]
    fn test_invalid_time_step() {
        let err = SimulationConfig::default().with_time_step(0.0).validate().unwrap_err();
        assert_eq!(err, SimulationError::InvalidTimeStep(0.0));
        let err = SimulationConfig::default().with_time_step(-0.1).validate().unwrap_err();
        assert_eq!(err, SimulationError::InvalidTimeStep(-0.1));
    }

    #[test]
    fn test_kinematics_errors_keep_rejected_value() {
        let err = SimulationConfig::default().with_axle_length(-2.5).validate().unwrap_err();
        assert_eq!(err, SimulationError::InvalidAxleLength(-2.5));
        assert_eq!(err.to_string(), "axle length must be positive and finite, got -2.5");

        let err = SimulationConfig::default().with_time_step(f64::INFINITY).validate().unwrap_err();
        assert_eq!(err.to_string(), "time step must be positive and finite, got inf");
    }

    #[test]
    fn test_zero_counts() {
        assert_eq!(
            SimulationConfig::default().with_steps(0).validate().unwrap_err(),
            SimulationError::ZeroSteps
        );
        assert_eq!(
            SimulationConfig::default().with_runs(0).validate().unwrap_err(),
            SimulationError::ZeroRuns
        );
    }

    #[test]
    fn test_non_finite_speed() {
        let err = SimulationConfig::default()
            .with_wheel_speeds(1.0, f64::INFINITY)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimulationError::NonFiniteWheelSpeed { wheel: "right", .. }));
    }

    #[test]
    fn test_negative_noise() {
        let err = SimulationConfig::default()
            .with_odometry_noise(-0.1, 0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvalidNoise {
                site: NoiseSite::OdometryLeft,
                value: -0.1
            }
        );
    }

    #[test]
    fn test_duplicate_strategy() {
        let err = SimulationConfig::default()
            .with_strategies([OdometryStrategy::NoCorrection, OdometryStrategy::NoCorrection])
            .validate()
            .unwrap_err();
        assert_eq!(err, SimulationError::DuplicateStrategy(OdometryStrategy::NoCorrection));
    }

    #[test]
    fn test_velocity_noise_overrides() {
        let config = SimulationConfig::default()
            .with_velocity_noise(0.2)
            .with_wheel_velocity_noise(0.0, 0.3);
        let noise = config.noise_params();
        assert_eq!(noise.velocity_left, 0.0);
        assert_eq!(noise.velocity_right, 0.3);

        let reset = config.with_velocity_noise(0.1).noise_params();
        assert_eq!((reset.velocity_left, reset.velocity_right), (0.1, 0.1));
    }
}
