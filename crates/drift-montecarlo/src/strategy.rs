//! Odometry correction strategies.
//!
//! A strategy decides which wheel displacement an odometry estimate is fed at
//! every step. All tracked estimates of a run see the same step readings.

use core::fmt;

use drift_kinematics::WheelDisplacement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::noise::NoiseModel;

/// How an odometry estimate obtains its per-step wheel displacement.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OdometryStrategy {
    /// Integrates the raw measured displacement, including encoder noise.
    NoCorrection,
    /// Integrates the error-free nominal displacement `v · dt`.
    PerfectCorrection,
    /// Integrates the measured displacement after a correction that itself
    /// adds a fresh, independent odometry-noise draw.
    NoisyCorrection,
}

impl OdometryStrategy {
    /// Every strategy, in result-slot order.
    pub const ALL: [OdometryStrategy; 3] = [
        OdometryStrategy::NoCorrection,
        OdometryStrategy::PerfectCorrection,
        OdometryStrategy::NoisyCorrection,
    ];

    /// Slot of this strategy in fixed-size per-run storage.
    pub const fn index(self) -> usize {
        match self {
            OdometryStrategy::NoCorrection => 0,
            OdometryStrategy::PerfectCorrection => 1,
            OdometryStrategy::NoisyCorrection => 2,
        }
    }

    /// Whether this strategy reads the noisy measured displacement.
    pub const fn uses_measurement(self) -> bool {
        !matches!(self, OdometryStrategy::PerfectCorrection)
    }

    /// Displacement fed to this strategy's estimate for one step.
    ///
    /// Only [`OdometryStrategy::NoisyCorrection`] draws from `noise`.
    pub fn displacement(self, readings: &StepReadings, noise: &mut NoiseModel) -> WheelDisplacement {
        match self {
            OdometryStrategy::NoCorrection => readings.measured,
            OdometryStrategy::PerfectCorrection => readings.nominal,
            OdometryStrategy::NoisyCorrection => {
                let (left, right) = noise.odometry_noise();
                readings.measured.perturbed(left, right)
            }
        }
    }
}

impl fmt::Display for OdometryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OdometryStrategy::NoCorrection => "no-correction",
            OdometryStrategy::PerfectCorrection => "perfect-correction",
            OdometryStrategy::NoisyCorrection => "noisy-correction",
        };
        f.write_str(name)
    }
}

/// Wheel displacements available to the odometry estimators during one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReadings {
    /// Commanded speed times `dt`, free of any noise.
    pub nominal: WheelDisplacement,
    /// Nominal displacement plus this step's encoder noise.
    pub measured: WheelDisplacement,
}

/// Which pose of a run a result set was taken from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedPose {
    /// The true pose driven by the noisy wheel velocities.
    Truth,
    /// An odometry estimate.
    Estimate(OdometryStrategy),
}

impl fmt::Display for TrackedPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackedPose::Truth => f.write_str("true"),
            TrackedPose::Estimate(strategy) => fmt::Display::fmt(strategy, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseParams;

    fn readings() -> StepReadings {
        StepReadings {
            nominal: WheelDisplacement::new(0.0, 0.1),
            measured: WheelDisplacement::new(0.02, 0.09),
        }
    }

    #[test]
    fn test_slots_are_distinct() {
        for (i, strategy) in OdometryStrategy::ALL.iter().enumerate() {
            assert_eq!(strategy.index(), i);
        }
    }

    #[test]
    fn test_clean_strategies_ignore_noise() {
        let mut noise = NoiseModel::new(
            NoiseParams {
                odometry_left: 1.0,
                odometry_right: 1.0,
                ..NoiseParams::none()
            },
            5,
        );
        assert_eq!(
            OdometryStrategy::PerfectCorrection.displacement(&readings(), &mut noise),
            readings().nominal
        );
        assert_eq!(
            OdometryStrategy::NoCorrection.displacement(&readings(), &mut noise),
            readings().measured
        );
    }

    #[test]
    fn test_noisy_correction_builds_on_measurement() {
        let params = NoiseParams {
            odometry_left: 0.1,
            odometry_right: 0.1,
            ..NoiseParams::none()
        };
        let mut noise = NoiseModel::new(params, 11);
        let mut reference = NoiseModel::new(params, 11);

        let corrected = OdometryStrategy::NoisyCorrection.displacement(&readings(), &mut noise);
        let (left, right) = reference.odometry_noise();
        assert_eq!(corrected, readings().measured.perturbed(left, right));
    }

    #[test]
    fn test_noisy_correction_without_noise_equals_measurement() {
        let mut noise = NoiseModel::new(NoiseParams::none(), 0);
        assert_eq!(
            OdometryStrategy::NoisyCorrection.displacement(&readings(), &mut noise),
            readings().measured
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(OdometryStrategy::NoCorrection.to_string(), "no-correction");
        assert_eq!(TrackedPose::Truth.to_string(), "true");
        assert_eq!(
            TrackedPose::Estimate(OdometryStrategy::NoisyCorrection).to_string(),
            "noisy-correction"
        );
        assert!(OdometryStrategy::NoCorrection.uses_measurement());
        assert!(!OdometryStrategy::PerfectCorrection.uses_measurement());
    }
}
