//! Gaussian noise for wheel velocities and odometry readings.
//!
//! Every run owns one [`NoiseModel`], seeded from the base seed of the
//! simulation and the run index, so runs never share generator state.

use core::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Where in the step a perturbation is injected.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseSite {
    /// Commanded left wheel velocity, before it drives the true motion.
    VelocityLeft,
    /// Commanded right wheel velocity, before it drives the true motion.
    VelocityRight,
    /// Left wheel displacement reading fed to odometry.
    OdometryLeft,
    /// Right wheel displacement reading fed to odometry.
    OdometryRight,
}

impl fmt::Display for NoiseSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoiseSite::VelocityLeft => "sigma_velocity_left",
            NoiseSite::VelocityRight => "sigma_velocity_right",
            NoiseSite::OdometryLeft => "sigma_odometry_left",
            NoiseSite::OdometryRight => "sigma_odometry_right",
        };
        f.write_str(name)
    }
}

/// Standard deviations for the four noise sites. A zero sigma disables the site.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoiseParams {
    /// Left wheel velocity noise (m/s).
    pub velocity_left: f64,
    /// Right wheel velocity noise (m/s).
    pub velocity_right: f64,
    /// Left wheel displacement measurement noise (m).
    pub odometry_left: f64,
    /// Right wheel displacement measurement noise (m).
    pub odometry_right: f64,
}

impl NoiseParams {
    /// No noise at any site.
    pub const fn none() -> Self {
        NoiseParams {
            velocity_left: 0.0,
            velocity_right: 0.0,
            odometry_left: 0.0,
            odometry_right: 0.0,
        }
    }

    /// Standard deviation configured for `site`.
    pub fn sigma(&self, site: NoiseSite) -> f64 {
        match site {
            NoiseSite::VelocityLeft => self.velocity_left,
            NoiseSite::VelocityRight => self.velocity_right,
            NoiseSite::OdometryLeft => self.odometry_left,
            NoiseSite::OdometryRight => self.odometry_right,
        }
    }

    /// Returns `true` if every site is disabled.
    pub fn is_noiseless(&self) -> bool {
        self.velocity_left == 0.0
            && self.velocity_right == 0.0
            && self.odometry_left == 0.0
            && self.odometry_right == 0.0
    }

    /// Checks that every sigma is finite and non-negative.
    pub fn validate(&self) -> Result<(), SimulationError> {
        const SITES: [NoiseSite; 4] = [
            NoiseSite::VelocityLeft,
            NoiseSite::VelocityRight,
            NoiseSite::OdometryLeft,
            NoiseSite::OdometryRight,
        ];
        for site in SITES {
            let value = self.sigma(site);
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidNoise { site, value });
            }
        }
        Ok(())
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derives the generator seed of run `run_index` from the simulation's base seed.
///
/// The base seed is mixed before the index is added, so nearby base seeds do
/// not share shifted run streams. The mapping does not depend on execution order.
pub fn run_seed(base_seed: u64, run_index: usize) -> u64 {
    let base = splitmix64(base_seed);
    splitmix64(base.wrapping_add((run_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}

/// Per-run source of zero-mean Gaussian perturbations.
#[derive(Debug, Clone)]
pub struct NoiseModel {
    params: NoiseParams,
    rng: StdRng,
}

impl NoiseModel {
    /// Create a noise model with an explicit seed.
    pub fn new(params: NoiseParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create the noise model of one run of a simulation.
    pub fn for_run(params: NoiseParams, base_seed: u64, run_index: usize) -> Self {
        Self::new(params, run_seed(base_seed, run_index))
    }

    /// One sample from `N(0, sigma²)`. A zero sigma returns exactly `0.0`
    /// without touching the generator.
    #[inline]
    pub fn gaussian(&mut self, sigma: f64) -> f64 {
        if sigma == 0.0 {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * sigma
    }

    /// One fresh sample for `site`.
    #[inline]
    pub fn sample(&mut self, site: NoiseSite) -> f64 {
        self.gaussian(self.params.sigma(site))
    }

    /// Fresh `(left, right)` perturbation of the commanded wheel velocities.
    pub fn velocity_noise(&mut self) -> (f64, f64) {
        let left = self.sample(NoiseSite::VelocityLeft);
        let right = self.sample(NoiseSite::VelocityRight);
        (left, right)
    }

    /// Fresh `(left, right)` perturbation of a wheel displacement reading.
    pub fn odometry_noise(&mut self) -> (f64, f64) {
        let left = self.sample(NoiseSite::OdometryLeft);
        let right = self.sample(NoiseSite::OdometryRight);
        (left, right)
    }
}
