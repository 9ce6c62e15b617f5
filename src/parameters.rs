#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ConstructionError;

/// The fixed description of an orbit, and of the body that travels along it.
///
/// Distances and periods are in whatever units the host chooses; the
/// [`Scales`][crate::Scales] given to the solver converts periods into
/// internal time units and the mass into display units.
///
/// # Example
/// ```
/// use keplerian_table::OrbitParameters;
///
/// let params = OrbitParameters::from_array([
///     0.0167, // Eccentricity
///     0.9833, // Pericenter
///     1.0,    // Orbital period
///     1.0,    // Radius
///     0.4091, // Axial tilt
///     0.0027, // Rotation period
///     -0.1965, // Longitude of ascending node
///     1.0,    // Mass
/// ]);
///
/// assert_eq!(params.eccentricity, 0.0167);
/// assert_eq!(params.to_array()[6], -0.1965);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitParameters {
    /// The eccentricity of the orbit, in `[0, 1)`.
    pub eccentricity: f64,

    /// The distance between the focus and the pericenter.
    pub pericenter: f64,

    /// The time it takes to go around the orbit once.
    pub orbital_period: f64,

    /// The radius of the body itself.
    pub radius: f64,

    /// The tilt of the body's spin axis, in radians.
    pub axial_tilt: f64,

    /// The time it takes the body to spin once around its axis.
    ///
    /// Zero means the body doesn't spin. Negative values spin backwards.
    pub rotation_period: f64,

    /// The longitude of ascending node, in radians.
    ///
    /// As orbits are flat, this only turns the major axis around
    /// the vertical axis.
    pub long_asc_node: f64,

    /// The mass of the body, before scaling.
    pub mass: f64,
}

impl OrbitParameters {
    /// Creates parameters for an orbit, leaving the body's own
    /// properties (radius, tilt, rotation, mass) at zero.
    ///
    /// # Parameters
    /// - `eccentricity`: The eccentricity of the orbit.
    /// - `pericenter`: The pericenter distance of the orbit.
    /// - `orbital_period`: The period of the orbit.
    /// - `long_asc_node`: The longitude of ascending node, in radians.
    pub fn new(
        eccentricity: f64,
        pericenter: f64,
        orbital_period: f64,
        long_asc_node: f64,
    ) -> Self {
        Self {
            eccentricity,
            pericenter,
            orbital_period,
            radius: 0.0,
            axial_tilt: 0.0,
            rotation_period: 0.0,
            long_asc_node,
            mass: 0.0,
        }
    }

    /// Creates parameters from a flat array, in the order:
    /// eccentricity, pericenter, orbital period, radius, axial tilt,
    /// rotation period, longitude of ascending node, mass.
    pub fn from_array(values: [f64; 8]) -> Self {
        let [eccentricity, pericenter, orbital_period, radius, axial_tilt, rotation_period, long_asc_node, mass] =
            values;

        Self {
            eccentricity,
            pericenter,
            orbital_period,
            radius,
            axial_tilt,
            rotation_period,
            long_asc_node,
            mass,
        }
    }

    /// Returns the parameters as a flat array, in the same order
    /// as [`OrbitParameters::from_array`].
    pub fn to_array(&self) -> [f64; 8] {
        [
            self.eccentricity,
            self.pericenter,
            self.orbital_period,
            self.radius,
            self.axial_tilt,
            self.rotation_period,
            self.long_asc_node,
            self.mass,
        ]
    }

    /// Returns the pericenter distance, squared.
    #[inline]
    pub fn squared_pericenter(&self) -> f64 {
        self.pericenter * self.pericenter
    }

    /// Returns the apocenter distance, `rp (1 + e) / (1 - e)`.
    pub fn apocenter(&self) -> f64 {
        self.pericenter * (1.0 + self.eccentricity) / (1.0 - self.eccentricity)
    }

    /// Returns the area enclosed by the orbit.
    ///
    /// This is `π a b` written in terms of the pericenter:
    /// `sqrt((1 + e) / (1 - e)^3) π rp²`.
    pub fn ellipse_area(&self) -> f64 {
        let e = self.eccentricity;
        (-(1.0 + e) / (e - 1.0).powi(3)).sqrt() * std::f64::consts::PI * self.squared_pericenter()
    }

    /// Checks everything that doesn't depend on unit scaling.
    pub(crate) fn validate(&self) -> Result<(), ConstructionError> {
        let named = [
            ("eccentricity", self.eccentricity),
            ("pericenter", self.pericenter),
            ("orbital_period", self.orbital_period),
            ("radius", self.radius),
            ("axial_tilt", self.axial_tilt),
            ("rotation_period", self.rotation_period),
            ("long_asc_node", self.long_asc_node),
            ("mass", self.mass),
        ];

        if let Some((name, _)) = named.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConstructionError::NonFiniteParameter(*name));
        }

        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(ConstructionError::EccentricityOutOfRange(
                self.eccentricity,
            ));
        }

        if self.pericenter <= 0.0 {
            return Err(ConstructionError::NonPositivePericenter(self.pericenter));
        }

        if self.orbital_period <= 0.0 {
            return Err(ConstructionError::NonPositivePeriod(self.orbital_period));
        }

        Ok(())
    }
}

impl Default for OrbitParameters {
    /// A circular orbit with a pericenter and period of 1.
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0, 0.0)
    }
}
