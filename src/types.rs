//! Shared types and constants for the orrery.

use bevy::prelude::*;

/// Gravitational strength of the central mass.
///
/// Calibrated against millisecond timestamps: with this value the innermost
/// planet (a = 20) completes an orbit in roughly 5.6 seconds of wall time.
pub const MEAN_MOTION_SCALE: f64 = 0.01;

/// Milliseconds per real-world second.
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// System sets for ordering the per-frame picking pipeline.
///
/// Input systems only record pointer state; resolution runs once afterwards.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PickingSet {
    /// Pointer and label-hover bookkeeping.
    Input,
    /// Ray test and emphasis transfer (exactly once per frame).
    Resolve,
}

/// Simulation clock driving the orbit solver.
#[derive(Resource, Clone, Debug)]
pub struct SimulationTime {
    /// Elapsed simulation time in milliseconds.
    pub current: f64,
    /// Simulation milliseconds per real millisecond.
    pub scale: f64,
    /// Whether the clock is frozen.
    pub paused: bool,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            current: 0.0,
            scale: 1.0,
            paused: false,
        }
    }
}
