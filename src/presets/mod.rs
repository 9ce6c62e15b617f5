//! This module contains presets for real celestial bodies.
//!
//! Presets are plain [`OrbitParameters`][crate::OrbitParameters], in the
//! units of the array form: distances in astronomical units, periods in
//! years, radii in Earth radii, angles in radians and masses in Earth masses.
//! Pair them with [`Scales`][crate::Scales] to pick the simulation's units.

pub mod planets;

/// The number of days in a Julian year, for converting rotation periods.
pub(crate) const DAYS_PER_YEAR: f64 = 365.25;
