#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conversion factors between parameter units, the solver's internal
/// units, and display units.
///
/// The defaults are all 1, so parameters are used as-is.
///
/// # Example
/// ```
/// use keplerian_table::Scales;
///
/// // Periods are given in years, the simulation ticks in days
/// let scales = Scales {
///     years_to_time: 365.25,
///     ..Scales::default()
/// };
///
/// assert_eq!(scales.time_from_years(2.0), 730.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scales {
    /// Multiplies a parameter mass into a display mass.
    pub mass_scale: f64,

    /// Multiplies an internal velocity into kilometers per second.
    pub velocity_to_kms: f64,

    /// Multiplies a parameter period into internal time units.
    pub years_to_time: f64,
}

impl Scales {
    /// Converts a period from parameter units into internal time units.
    #[inline]
    pub fn time_from_years(&self, years: f64) -> f64 {
        years * self.years_to_time
    }

    /// Converts an internal speed into kilometers per second.
    #[inline]
    pub fn speed_in_kms(&self, speed: f64) -> f64 {
        speed * self.velocity_to_kms
    }

    /// Converts a parameter mass into a display mass.
    #[inline]
    pub fn scaled_mass(&self, mass: f64) -> f64 {
        mass * self.mass_scale
    }
}

impl Default for Scales {
    fn default() -> Self {
        Self {
            mass_scale: 1.0,
            velocity_to_kms: 1.0,
            years_to_time: 1.0,
        }
    }
}
