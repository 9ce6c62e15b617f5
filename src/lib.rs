//! # Table-driven Keplerian Orbits
//! This library crate moves celestial bodies along fixed Keplerian ellipses,
//! the way a planetarium or a space game would.
//!
//! Instead of solving Kepler's equation every frame, each orbit integrates the
//! true anomaly over half a period once, at construction time, and stores the
//! result in a small lookup table. Every later query is a table lookup, a
//! linear interpolation and a bit of trigonometry. The second half of the
//! orbit is recovered by symmetry, since an ellipse traced from its pericenter
//! is mirrored about its major axis.
//!
//! Orbits are independent from each other: there is no gravitational coupling
//! between bodies, and each one circles a single fixed focus at the origin.
//! Orbits are flat; the out-of-plane `y` axis of every position is always zero.
//!
//! ## Getting started
//! This crate provides these main structs:
//! - [`OrbitParameters`]: The immutable description of an orbit and of the
//!   body travelling along it.
//! - [`OrbitSolver`]: Owns the angle table and the simulation clock, and
//!   answers position and velocity queries.
//! - [`Scales`]: The unit provider, converting parameter units into the
//!   solver's internal units and back into display units.
//! - [`System`]: A collection of named [`Body`]s that are advanced together.
//!
//! We also provide a [`presets`] module with the planets of the Solar System.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//!
//! use keplerian_table::{OrbitParameters, OrbitSolver, TickContext};
//!
//! # fn main() {
//! // A circular orbit with a radius and period of 1
//! let params = OrbitParameters::new(0.0, 1.0, 1.0, 0.0);
//! let mut solver = OrbitSolver::new(params, 0.0).unwrap();
//!
//! let mut position = DVec3::ZERO;
//! solver.advance(0.25, &TickContext::default(), &mut position);
//!
//! assert!((position - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-9);
//! # }
//! ```

#![warn(missing_docs)]

mod angle_table;
mod body;
mod parameters;
pub mod presets;
mod scales;
mod solver;
mod system;

pub use angle_table::AngleTable;
pub use body::Body;
pub use parameters::OrbitParameters;
pub use scales::Scales;
pub use solver::{OrbitSolver, PositionSink, SolverConfig, TickContext};
pub use system::{BodyAddError, System};

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of angle samples stored for half an orbit, unless configured
/// otherwise through [`SolverConfig`].
pub const DEFAULT_SAMPLES: usize = 300;

/// The largest angle, in radians, a single RK4 sub-step is allowed to sweep
/// while building an angle table.
///
/// Above roughly a tenth of a radian, RK4 starts overshooting near the
/// pericenter of very eccentric orbits.
const MAX_STEP_ANGLE: f64 = 0.05;

/// The maximum number of RK4 sub-steps per table interval.
///
/// This bounds construction time for orbits with an eccentricity
/// extremely close to 1.
const MAX_SUBSTEPS: usize = 1024;

/// A struct representing a 3x2 matrix.
///
/// This struct is used to store the transformation matrix
/// for transforming a 2D vector in the orbital plane into a 3D vector.
///
/// Namely, it is used by [`OrbitSolver::get_position_at_true_anomaly`]
/// to turn the planar position by the longitude of ascending node.
///
/// Each element is named `eXY`, where `X` is the row and `Y` is the column.
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
///
/// use keplerian_table::Matrix3x2;
///
/// let matrix = Matrix3x2 {
///    e11: 1.0, e12: 0.0,
///    e21: 0.0, e22: 0.0,
///    e31: 0.0, e32: 1.0,
/// };
///
/// let vec = DVec2::new(1.0, 2.0);
///
/// let result = matrix.dot_vec(vec);
///
/// assert_eq!(result, DVec3::new(1.0, 0.0, 2.0));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix3x2 {
    // Element XY
    pub e11: f64,
    pub e12: f64,
    pub e21: f64,
    pub e22: f64,
    pub e31: f64,
    pub e32: f64,
}

impl Matrix3x2 {
    /// Creates the matrix that maps a planar `(x, z)` vector onto the
    /// horizontal `xz` plane of 3D space, turned by `angle` radians.
    ///
    /// # Example
    /// ```
    /// use glam::{DVec2, DVec3};
    ///
    /// use keplerian_table::Matrix3x2;
    ///
    /// let matrix = Matrix3x2::flat_rotation(std::f64::consts::FRAC_PI_2);
    /// let result = matrix.dot_vec(DVec2::new(1.0, 0.0));
    ///
    /// assert!((result - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-15);
    /// ```
    pub fn flat_rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();

        Self {
            e11: cos,
            e12: -sin,
            e21: 0.0,
            e22: 0.0,
            e31: sin,
            e32: cos,
        }
    }

    /// Computes a dot product between this matrix and a 2D vector.
    ///
    /// # Example
    /// ```
    /// use glam::{DVec2, DVec3};
    ///
    /// use keplerian_table::Matrix3x2;
    ///
    /// let matrix = Matrix3x2 {
    ///     e11: 1.0, e12: 0.0,
    ///     e21: 0.0, e22: 1.0,
    ///     e31: 1.0, e32: 1.0,
    /// };
    ///
    /// let vec = DVec2::new(1.0, 2.0);
    ///
    /// let result = matrix.dot_vec(vec);
    ///
    /// assert_eq!(result, DVec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn dot_vec(&self, vec: DVec2) -> DVec3 {
        DVec3::new(
            vec.x * self.e11 + vec.y * self.e12,
            vec.x * self.e21 + vec.y * self.e22,
            vec.x * self.e31 + vec.y * self.e32,
        )
    }
}

/// An error to describe why an orbit could not be built.
///
/// Every check happens once, when the [`OrbitSolver`] is constructed.
/// Once a solver exists, all of its queries are total.
#[derive(thiserror::Error, PartialEq, Debug, Clone, Copy)]
pub enum ConstructionError {
    /// ### The eccentricity is outside of `[0, 1)`.
    /// The angle table only describes closed, elliptic orbits.
    /// Parabolic and hyperbolic trajectories never come back to their
    /// pericenter, so they have no period to tabulate.
    #[error("eccentricity {0} is outside of the elliptic range [0, 1)")]
    EccentricityOutOfRange(f64),

    /// ### The pericenter distance is zero or negative.
    #[error("pericenter distance {0} must be positive")]
    NonPositivePericenter(f64),

    /// ### The orbital period is zero or negative.
    /// This is checked after unit conversion.
    #[error("orbital period {0} must be positive")]
    NonPositivePeriod(f64),

    /// ### The time between two table samples is not a finite, positive number.
    /// Only [`AngleTable::integrate`] reports this; solvers derive the step
    /// from a period that was already checked.
    #[error("angle table step {0} must be finite and positive")]
    NonPositiveStep(f64),

    /// ### The angle table needs at least its two pinned samples.
    #[error("angle table needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    /// ### A parameter is NaN or infinite.
    #[error("parameter `{0}` is not a finite number")]
    NonFiniteParameter(&'static str),

    /// ### The derived anomaly rate is not a finite, positive number.
    /// This happens when the period is so small, or the eccentricity
    /// so close to 1, that the rate overflows.
    #[error("derived anomaly rate {0} is not finite and positive")]
    DegenerateRate(f64),
}
