//! This module contains presets for the planets of the Solar System,
//! plus Pluto.
//!
//! Orbital elements are rounded J2000 values from the
//! [NASA planetary fact sheets](https://nssdc.gsfc.nasa.gov/planetary/factsheet/).
//! Negative rotation periods are retrograde.

use super::DAYS_PER_YEAR;
use crate::OrbitParameters;

#[allow(clippy::too_many_arguments)]
fn planet(
    eccentricity: f64,
    pericenter_au: f64,
    period_years: f64,
    radius_earths: f64,
    axial_tilt_deg: f64,
    rotation_days: f64,
    long_asc_node_deg: f64,
    mass_earths: f64,
) -> OrbitParameters {
    OrbitParameters::from_array([
        eccentricity,
        pericenter_au,
        period_years,
        radius_earths,
        axial_tilt_deg.to_radians(),
        rotation_days / DAYS_PER_YEAR,
        long_asc_node_deg.to_radians(),
        mass_earths,
    ])
}

/// Returns Mercury.
pub fn mercury() -> OrbitParameters {
    planet(0.2056, 0.3075, 0.2408, 0.383, 0.034, 58.646, 48.331, 0.0553)
}

/// Returns Venus.
pub fn venus() -> OrbitParameters {
    planet(0.0068, 0.7184, 0.6152, 0.949, 177.36, -243.025, 76.680, 0.815)
}

/// Returns the Earth.
pub fn earth() -> OrbitParameters {
    planet(0.0167, 0.9833, 1.0, 1.0, 23.44, 0.99727, -11.26064, 1.0)
}

/// Returns Mars.
pub fn mars() -> OrbitParameters {
    planet(0.0934, 1.3814, 1.8808, 0.532, 25.19, 1.02596, 49.558, 0.107)
}

/// Returns Jupiter.
pub fn jupiter() -> OrbitParameters {
    planet(0.0489, 4.9501, 11.862, 11.209, 3.13, 0.41354, 100.464, 317.8)
}

/// Returns Saturn.
pub fn saturn() -> OrbitParameters {
    planet(0.0565, 9.0412, 29.457, 9.449, 26.73, 0.44401, 113.665, 95.2)
}

/// Returns Uranus.
pub fn uranus() -> OrbitParameters {
    planet(0.0457, 18.33, 84.011, 4.007, 97.77, -0.71833, 74.006, 14.5)
}

/// Returns Neptune.
pub fn neptune() -> OrbitParameters {
    planet(0.0113, 29.81, 164.79, 3.883, 28.32, 0.67125, 131.784, 17.1)
}

/// Returns Pluto.
///
/// Its orbit is inclined by about 17°, which is flattened away here.
pub fn pluto() -> OrbitParameters {
    planet(0.2488, 29.658, 247.94, 0.1868, 122.53, -6.387, 110.299, 0.0022)
}

/// Returns every preset in this module, by name, in order from the Sun.
pub fn all() -> [(&'static str, OrbitParameters); 9] {
    [
        ("Mercury", mercury()),
        ("Venus", venus()),
        ("Earth", earth()),
        ("Mars", mars()),
        ("Jupiter", jupiter()),
        ("Saturn", saturn()),
        ("Uranus", uranus()),
        ("Neptune", neptune()),
        ("Pluto", pluto()),
    ]
}
