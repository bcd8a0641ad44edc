#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for 2D differential-drive dead-reckoning."]
#![doc = ""]
#![doc = "This crate provides the robot pose, wheel speed and wheel displacement types,"]
#![doc = "and the first-order odometry update used to advance a pose one step at a time."]

use core::f64::consts::PI;
use core::fmt;
use libm::{cos, fabs, round, sin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::KinematicsError;

/// A 2‑D pose `(x, y, θ)` in meters and radians (θ measured counter‑clockwise
/// from the x‑axis in the world frame).
///
/// The heading is accumulated, not wrapped: a robot that drives one full
/// circle ends with `θ ≈ 2π`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World‑frame x position (m).
    pub x: f64,
    /// World‑frame y position (m).
    pub y: f64,
    /// Accumulated heading (rad).
    pub theta: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: World-frame x position in meters.
    /// * `y`: World-frame y position in meters.
    /// * `theta`: Heading in radians.
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    /// The pose every run starts from, `(0, 0, 0)`.
    pub const fn origin() -> Self {
        Pose::new(0.0, 0.0, 0.0)
    }

    /// The `(x, y)` position of this pose.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean distance between the positions of two poses, ignoring heading.
    pub fn distance_to(&self, other: &Pose) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        sqrt(dx * dx + dy * dy)
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.3}, y: {:.3}, θ: {:.3} rad)", self.x, self.y, self.theta)
    }
}

/// Left and right wheel linear velocities.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    /// Left wheel linear velocity (m/s).
    pub left: f64,
    /// Right wheel linear velocity (m/s).
    pub right: f64,
}

impl WheelSpeeds {
    /// Construct wheel speeds.
    ///
    /// # Arguments
    ///
    /// * `left`: Left wheel linear velocity (m/s).
    /// * `right`: Right wheel linear velocity (m/s).
    pub const fn new(left: f64, right: f64) -> Self {
        WheelSpeeds { left, right }
    }

    /// Distance each wheel covers when these speeds are held for `dt`.
    pub fn displacement(&self, dt: TimeStep) -> WheelDisplacement {
        WheelDisplacement::new(self.left * dt.seconds(), self.right * dt.seconds())
    }

    /// Returns these speeds with the given per-wheel offsets added.
    pub fn perturbed(&self, delta_left: f64, delta_right: f64) -> Self {
        WheelSpeeds::new(self.left + delta_left, self.right + delta_right)
    }
}

impl fmt::Display for WheelSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(vL: {:.2} m/s, vR: {:.2} m/s)", self.left, self.right)
    }
}

/// Distance travelled by each wheel during one step.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelDisplacement {
    /// Left wheel displacement (m).
    pub left: f64,
    /// Right wheel displacement (m).
    pub right: f64,
}

impl WheelDisplacement {
    /// Construct a wheel displacement pair.
    ///
    /// # Arguments
    ///
    /// * `left`: Left wheel displacement (m).
    /// * `right`: Right wheel displacement (m).
    pub const fn new(left: f64, right: f64) -> Self {
        WheelDisplacement { left, right }
    }

    /// Displacement of the axle midpoint.
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Returns this displacement with the given per-wheel offsets added.
    pub fn perturbed(&self, delta_left: f64, delta_right: f64) -> Self {
        WheelDisplacement::new(self.left + delta_left, self.right + delta_right)
    }
}

impl fmt::Display for WheelDisplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(dL: {:.4} m, dR: {:.4} m)", self.left, self.right)
    }
}

/// Linear and angular chassis velocities.
/// These represent the overall motion of the robot's chassis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisSpeeds {
    /// Linear speed of the chassis center (m/s).
    pub v: f64,
    /// Angular speed of the chassis (rad/s).
    pub omega: f64,
}

impl ChassisSpeeds {
    /// Construct chassis speeds.
    ///
    /// # Arguments
    ///
    /// * `v`: Linear speed of the chassis center (m/s).
    /// * `omega`: Angular speed of the chassis (rad/s).
    pub const fn new(v: f64, omega: f64) -> Self {
        ChassisSpeeds { v, omega }
    }
}

impl fmt::Display for ChassisSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(v: {:.2} m/s, ω: {:.2} rad/s)", self.v, self.omega)
    }
}

/// A validated, strictly positive integration time step.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStep(f64);

impl TimeStep {
    /// Construct a time step.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidTimeStep)` if `dt` is not positive and finite.
    pub fn new(dt: f64) -> Result<Self, KinematicsError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(KinematicsError::InvalidTimeStep("must be positive and finite"));
        }
        Ok(TimeStep(dt))
    }

    /// The step length in seconds.
    pub fn seconds(&self) -> f64 {
        self.0
    }
}

/// Differential‑drive odometry integrator.
///
/// Holds the axle length of the robot and advances poses with the discrete
/// first-order update: the translation of a step is projected onto the heading
/// held *before* the step, and the heading change is added afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialDrive {
    /// Axle length (m).
    axle_length: f64,
}

impl DifferentialDrive {
    /// Construct a new differential‑drive integrator.
    ///
    /// # Arguments
    ///
    /// * `axle_length`: The distance between the two wheel contact points in meters.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidAxleLength)` if `axle_length` is not positive and finite.
    pub fn new(axle_length: f64) -> Result<Self, KinematicsError> {
        if !axle_length.is_finite() || axle_length <= 0.0 {
            return Err(KinematicsError::InvalidAxleLength("must be positive and finite"));
        }
        Ok(DifferentialDrive { axle_length })
    }

    /// Returns the axle length.
    pub fn axle_length(&self) -> f64 {
        self.axle_length
    }

    /// Calculates the chassis speeds (linear and angular velocity) produced by
    /// the given wheel speeds.
    pub fn forward_kinematics(&self, wheel_speeds: WheelSpeeds) -> ChassisSpeeds {
        let v = (wheel_speeds.right + wheel_speeds.left) / 2.0;
        let omega = (wheel_speeds.right - wheel_speeds.left) / self.axle_length;
        ChassisSpeeds::new(v, omega)
    }

    /// Advances `pose` by one step in which the wheels travelled `displacement`.
    ///
    /// ```text
    /// d_center = (d_left + d_right) / 2
    /// x' = x + d_center * cos(θ)
    /// y' = y + d_center * sin(θ)
    /// θ' = θ + (d_right - d_left) / b
    /// ```
    pub fn advance(&self, pose: Pose, displacement: WheelDisplacement) -> Pose {
        let d_center = displacement.center();
        let delta_theta = (displacement.right - displacement.left) / self.axle_length;

        Pose {
            x: pose.x + d_center * cos(pose.theta),
            y: pose.y + d_center * sin(pose.theta),
            theta: pose.theta + delta_theta,
        }
    }

    /// Advances `pose` by holding `wheel_speeds` for one step of length `dt`.
    ///
    /// The speeds are converted to displacements first and the result is
    /// identical to [`DifferentialDrive::advance`] on those displacements.
    pub fn advance_with_speeds(&self, pose: Pose, wheel_speeds: WheelSpeeds, dt: TimeStep) -> Pose {
        self.advance(pose, wheel_speeds.displacement(dt))
    }

    /// Number of steps after which a robot driving at `wheel_speeds` has turned
    /// through one full revolution, `round(2π / (|ω| · dt))`.
    ///
    /// Returns `None` when the speeds produce no rotation.
    pub fn steps_per_revolution(&self, wheel_speeds: WheelSpeeds, dt: TimeStep) -> Option<usize> {
        let omega = fabs(self.forward_kinematics(wheel_speeds).omega);
        if omega == 0.0 || !omega.is_finite() {
            return None;
        }
        let steps = round(2.0 * PI / (omega * dt.seconds()));
        if steps < 1.0 {
            return Some(1);
        }
        Some(steps as usize)
    }
}

impl fmt::Display for DifferentialDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DifferentialDrive (b: {:.2} m)", self.axle_length)
    }
}
