//! Error type for the simulation core
//!
//! The core has very few failure modes: construction can reject unusable dimensions or
//! configuration, and rendering can reject a buffer of the wrong size. Stepping and the
//! control setters never fail.

use std::fmt;

/// Errors reported by [`ConvectionSimulation`](crate::ConvectionSimulation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Render buffer length differs from `width * height * 4`
    SizeMismatch {
        /// Required buffer length in bytes
        expected: usize,
        /// Length of the buffer actually supplied
        actual: usize,
    },
    /// Grid needs at least one interior cell in each direction
    InvalidDimensions { width: usize, height: usize },
    /// A configuration constant is outside its usable range
    InvalidConfig(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "render buffer size mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "invalid grid dimensions {width}x{height}: both must be at least 3"
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}
