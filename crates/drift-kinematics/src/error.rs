#![warn(missing_docs)]

//! Error types for the kinematics library.
//!
//! Only the physical parameters of the drive can be invalid; the pose update
//! itself is closed-form arithmetic and never fails.

use core::fmt;

/// Errors that can occur when constructing kinematic parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Error for invalid axle length.
    /// This variant is returned when an axle length is not positive and finite.
    InvalidAxleLength(&'static str),
    /// Error for invalid time step.
    /// This variant is returned when a time step is not positive and finite.
    InvalidTimeStep(&'static str),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidAxleLength(msg) => write!(f, "Invalid axle length: {}", msg),
            KinematicsError::InvalidTimeStep(msg) => write!(f, "Invalid time step: {}", msg),
        }
    }
}

impl core::error::Error for KinematicsError {}
