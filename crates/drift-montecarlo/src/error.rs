//! This module defines the error types used by the `drift-montecarlo` crate.

#![warn(missing_docs)]

use thiserror::Error;

use crate::noise::NoiseSite;
use crate::strategy::OdometryStrategy;

/// Error type for simulation setup.
///
/// Every variant is raised while validating a [`crate::SimulationConfig`];
/// once an engine has been built, running it cannot fail.
#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    /// The axle length is zero, negative or not finite.
    #[error("axle length must be positive and finite, got {0}")]
    InvalidAxleLength(f64),

    /// The time step is zero, negative or not finite.
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    /// A run must integrate at least one step.
    #[error("num_steps must be > 0")]
    ZeroSteps,

    /// At least one run must be requested.
    #[error("num_runs must be > 0")]
    ZeroRuns,

    /// A commanded wheel speed is NaN or infinite.
    #[error("{wheel} wheel speed must be finite, got {value}")]
    NonFiniteWheelSpeed {
        /// Which wheel, `"left"` or `"right"`.
        wheel: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A noise standard deviation is negative or not finite.
    #[error("standard deviation for {site} must be finite and >= 0, got {value}")]
    InvalidNoise {
        /// The noise site the sigma belongs to.
        site: NoiseSite,
        /// The offending value.
        value: f64,
    },

    /// The same odometry strategy was requested more than once.
    #[error("odometry strategy {0} is listed more than once")]
    DuplicateStrategy(OdometryStrategy),
}
