//! Kepler orbit solver using Newton's method for the Kepler equation.
//!
//! Positions are expressed in the orbit's local frame: the ellipse lies in
//! the XZ plane, centered on the frame origin, with its major axis along X.
//! The orbit frame itself is placed so the central mass sits on the near
//! focus (see [`super::orbit_frame`]).

use bevy::math::DVec3;

use super::data::PlanetDescriptor;

/// Newton iteration stops once a step is smaller than this.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Hard cap on Newton iterations before reporting a convergence failure.
pub const MAX_ITERATIONS: u32 = 50;

/// Errors produced while building or solving an orbit.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum KeplerError {
    #[error(
        "invalid orbit (semi-major axis {semi_major_axis}, focus distance {focus_distance}): {reason}"
    )]
    InvalidOrbit {
        semi_major_axis: f64,
        focus_distance: f64,
        reason: &'static str,
    },

    #[error(
        "Kepler solver did not converge after {iterations} iterations (M = {mean_anomaly}, e = {eccentricity}, last step {last_step})"
    )]
    Convergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: u32,
        last_step: f64,
    },
}

/// Focus-based ellipse parameters for one orbiting body.
///
/// Immutable once built; the derived semi-minor axis and eccentricity are
/// computed a single time at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitParameters {
    semi_major_axis: f64,
    semi_minor_axis: f64,
    focus_distance: f64,
    eccentricity: f64,
    mean_motion_scale: f64,
}

impl OrbitParameters {
    /// Build orbit parameters from the semi-major axis and the distance
    /// between the two foci.
    ///
    /// # Errors
    /// [`KeplerError::InvalidOrbit`] when `semi_major_axis <= 0`,
    /// `focus_distance < 0`, the derived eccentricity leaves `[0, 1)`, or the
    /// mean motion scale is not positive.
    pub fn new(
        semi_major_axis: f64,
        focus_distance: f64,
        mean_motion_scale: f64,
    ) -> Result<Self, KeplerError> {
        let invalid = |reason| KeplerError::InvalidOrbit {
            semi_major_axis,
            focus_distance,
            reason,
        };

        if !semi_major_axis.is_finite() || !focus_distance.is_finite() {
            return Err(invalid("orbit dimensions must be finite"));
        }
        if semi_major_axis <= 0.0 {
            return Err(invalid("semi-major axis must be positive"));
        }
        if focus_distance < 0.0 {
            return Err(invalid("focus distance must not be negative"));
        }
        if !(mean_motion_scale.is_finite() && mean_motion_scale > 0.0) {
            return Err(invalid("mean motion scale must be positive"));
        }

        let eccentricity = focus_distance / (2.0 * semi_major_axis);
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(invalid("eccentricity must lie in [0, 1)"));
        }

        let half_focus = focus_distance / 2.0;
        let semi_minor_axis = (semi_major_axis.powi(2) - half_focus.powi(2)).sqrt();

        Ok(Self {
            semi_major_axis,
            semi_minor_axis,
            focus_distance,
            eccentricity,
            mean_motion_scale,
        })
    }

    /// Derive orbit parameters from a planet descriptor.
    ///
    /// The focus distance is the length of the descriptor's second-focus
    /// vector, since the central mass sits on the first focus at the origin.
    pub fn from_descriptor(
        descriptor: &PlanetDescriptor,
        mean_motion_scale: f64,
    ) -> Result<Self, KeplerError> {
        Self::new(
            descriptor.semi_major_axis,
            descriptor.orbit_focus.length(),
            mean_motion_scale,
        )
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    pub fn focus_distance(&self) -> f64 {
        self.focus_distance
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn mean_motion_scale(&self) -> f64 {
        self.mean_motion_scale
    }

    /// Mean motion n = sqrt(GM / a³), in radians per time unit.
    pub fn mean_motion(&self) -> f64 {
        (self.mean_motion_scale / self.semi_major_axis.powi(3)).sqrt()
    }

    /// Mean anomaly M = n·t. Not wrapped; the trig functions handle that.
    pub fn mean_anomaly(&self, time: f64) -> f64 {
        self.mean_motion() * time
    }

    /// Time for one full revolution.
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.mean_motion()
    }

    /// Point on the ellipse for a given eccentric anomaly.
    ///
    /// Both terms are negated so that E = 0 lands on the perihelion side,
    /// where the body then moves fastest.
    pub fn position_on_ellipse(&self, eccentric_anomaly: f64) -> DVec3 {
        DVec3::new(
            -self.semi_major_axis * eccentric_anomaly.cos(),
            0.0,
            -self.semi_minor_axis * eccentric_anomaly.sin(),
        )
    }

    /// The focus the central mass occupies, in orbit-frame coordinates.
    ///
    /// It lies on the same side as E = 0, so that point is the perihelion.
    pub fn near_focus(&self) -> DVec3 {
        DVec3::new(-0.5 * self.focus_distance, 0.0, 0.0)
    }

    /// Solve Kepler's equation for this orbit's eccentricity.
    pub fn solve_eccentric_anomaly(
        &self,
        mean_anomaly: f64,
    ) -> Result<KeplerSolution, KeplerError> {
        solve_kepler(mean_anomaly, self.eccentricity)
    }
}

/// Result of a successful Kepler solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly E in radians.
    pub eccentric_anomaly: f64,
    /// Newton steps taken to reach the tolerance.
    pub iterations: u32,
}

/// Solve Kepler's equation M = E - e*sin(E) for eccentric anomaly E
/// with the default tolerance and iteration cap.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<KeplerSolution, KeplerError> {
    solve_kepler_bounded(
        mean_anomaly,
        eccentricity,
        CONVERGENCE_TOLERANCE,
        MAX_ITERATIONS,
    )
}

/// Newton–Raphson solve of Kepler's equation starting from E₀ = M.
///
/// # Errors
/// [`KeplerError::Convergence`] if no step drops below `tolerance` within
/// `max_iterations`, or if an iterate stops being finite.
pub fn solve_kepler_bounded(
    mean_anomaly: f64,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: u32,
) -> Result<KeplerSolution, KeplerError> {
    let mut e_anomaly = mean_anomaly;
    let mut last_step = f64::INFINITY;

    for iteration in 1..=max_iterations {
        // f(E) = E - e*sin(E) - M
        let f = e_anomaly - eccentricity * e_anomaly.sin() - mean_anomaly;
        // f'(E) = 1 - e*cos(E)
        let f_prime = 1.0 - eccentricity * e_anomaly.cos();

        let delta = f / f_prime;
        e_anomaly -= delta;
        last_step = delta;

        if !e_anomaly.is_finite() {
            break;
        }
        if delta.abs() < tolerance {
            return Ok(KeplerSolution {
                eccentric_anomaly: e_anomaly,
                iterations: iteration,
            });
        }
    }

    Err(KeplerError::Convergence {
        mean_anomaly,
        eccentricity,
        iterations: max_iterations,
        last_step,
    })
}

/// Position of a body at `time` on the orbit described by `params`.
///
/// Pure: no state is read or written, so bodies may be solved in any order
/// or in parallel.
pub fn position_at(time: f64, params: &OrbitParameters) -> Result<DVec3, KeplerError> {
    let mean_anomaly = params.mean_anomaly(time);
    let solution = params.solve_eccentric_anomaly(mean_anomaly)?;
    Ok(params.position_on_ellipse(solution.eccentric_anomaly))
}
