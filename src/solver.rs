use glam::{DVec2, DVec3};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AngleTable, ConstructionError, Matrix3x2, OrbitParameters, Scales, DEFAULT_SAMPLES};

use core::f64::consts::{PI, TAU};

/// How an [`OrbitSolver`] is built.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// The number of angle samples over half an orbit, including both ends.
    pub samples: usize,

    /// The unit provider.
    pub scales: Scales,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            scales: Scales::default(),
        }
    }
}

/// A snapshot of the host's state for one tick.
///
/// The solver only ever reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickContext {
    /// Whether the simulation is paused. Paused ticks don't move anything.
    pub paused: bool,
}

impl TickContext {
    /// A context for a running simulation.
    pub const RUNNING: TickContext = TickContext { paused: false };

    /// A context for a paused simulation.
    pub const PAUSED: TickContext = TickContext { paused: true };
}

/// Something that receives the position of a body after each tick.
///
/// The solver doesn't own it; hosts usually implement this on their own
/// transform or scene node type.
pub trait PositionSink {
    /// Places the body at the given position.
    fn place(&mut self, position: DVec3);
}

impl PositionSink for DVec3 {
    fn place(&mut self, position: DVec3) {
        *self = position;
    }
}

impl PositionSink for Option<DVec3> {
    fn place(&mut self, position: DVec3) {
        *self = Some(position);
    }
}

/// A Keplerian orbit driven by a precomputed angle table.
///
/// The solver owns its parameters, its angle table and its own clock.
/// Solvers don't share anything, so many of them can be evaluated on
/// separate threads.
///
/// # Example
/// ```
/// use keplerian_table::{OrbitParameters, OrbitSolver};
///
/// let solver = OrbitSolver::new(
///     OrbitParameters::new(
///         // Eccentricity
///         0.5,
///
///         // Pericenter
///         1.0,
///
///         // Orbital period
///         10.0,
///
///         // Longitude of ascending node
///         0.0,
///     ),
///     // Initial time
///     0.0,
/// ).unwrap();
///
/// // At the pericenter
/// assert_eq!(solver.get_true_anomaly(), 0.0);
///
/// // Half a period later, at the apocenter
/// let apocenter = solver.get_position_after(5.0);
/// assert!((apocenter.x + 3.0).abs() < 1e-9);
/// ```
///
/// # Serialization
/// With the `serde` feature, a solver is saved as its parameters, its
/// configuration and its clock. Loading one runs the same checks as
/// [`OrbitSolver::with_config`] and integrates the angle table again.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SolverState", into = "SolverState"))]
pub struct OrbitSolver {
    params: OrbitParameters,
    scales: Scales,

    /// The orbital period, in internal time units.
    orbital_period: f64,

    /// The rotation period, in internal time units.
    rotation_period: f64,

    /// The time elapsed since the pericenter passage, in `[0, orbital_period)`.
    time: f64,

    table: AngleTable,
    cache: SolverCachedCalculations,
}

// -------- MEMO --------
// When updating this struct, please review `OrbitSolver::with_config()`.
#[derive(Clone, Debug, PartialEq)]
struct SolverCachedCalculations {
    /// `rp (1 + e)`, the numerator of the polar orbit equation.
    semi_latus_rectum: f64,

    /// The area enclosed by the orbit.
    surface: f64,

    /// The `k` constant of the anomaly rate equation.
    rate_constant: f64,

    /// The transformation matrix to turn the planar orbit by
    /// the longitude of ascending node.
    transformation_matrix: Matrix3x2,
}

// Initialization
impl OrbitSolver {
    /// Creates a solver with the default configuration, starting at
    /// `initial_time`.
    ///
    /// The initial time is wrapped into one orbital period.
    ///
    /// # Errors
    /// Fails when the parameters don't describe a valid elliptic orbit.
    pub fn new(params: OrbitParameters, initial_time: f64) -> Result<Self, ConstructionError> {
        Self::with_config(params, &SolverConfig::default(), initial_time)
    }

    /// Creates a solver starting at a random time within its first period.
    ///
    /// # Errors
    /// Fails when the parameters don't describe a valid elliptic orbit.
    ///
    /// # Example
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// use keplerian_table::{OrbitParameters, OrbitSolver, SolverConfig};
    ///
    /// let params = OrbitParameters::new(0.2, 1.0, 3.0, 0.0);
    /// let config = SolverConfig::default();
    ///
    /// let a = OrbitSolver::with_rng(params, &config, &mut StdRng::seed_from_u64(7)).unwrap();
    /// let b = OrbitSolver::with_rng(params, &config, &mut StdRng::seed_from_u64(7)).unwrap();
    ///
    /// assert_eq!(a.get_time(), b.get_time());
    /// assert!((0.0..3.0).contains(&a.get_time()));
    /// ```
    pub fn with_rng<R: Rng>(
        params: OrbitParameters,
        config: &SolverConfig,
        rng: &mut R,
    ) -> Result<Self, ConstructionError> {
        let mut solver = Self::with_config(params, config, 0.0)?;
        let time = rng.random_range(0.0..solver.orbital_period);
        solver.set_time(time);
        Ok(solver)
    }

    /// Creates a solver with the given configuration, starting at
    /// `initial_time`.
    ///
    /// # Errors
    /// Fails when the parameters don't describe a valid elliptic orbit,
    /// or when the configuration asks for fewer than 2 samples.
    pub fn with_config(
        params: OrbitParameters,
        config: &SolverConfig,
        initial_time: f64,
    ) -> Result<Self, ConstructionError> {
        params.validate()?;

        if config.samples < 2 {
            return Err(ConstructionError::TooFewSamples(config.samples));
        }

        let scales = config.scales;
        let orbital_period = scales.time_from_years(params.orbital_period);
        let rotation_period = scales.time_from_years(params.rotation_period);

        if !(orbital_period.is_finite() && orbital_period > 0.0) {
            return Err(ConstructionError::NonPositivePeriod(orbital_period));
        }
        if !rotation_period.is_finite() {
            return Err(ConstructionError::NonFiniteParameter("rotation_period"));
        }
        if !initial_time.is_finite() {
            return Err(ConstructionError::NonFiniteParameter("initial_time"));
        }

        let e = params.eccentricity;

        // Equating the areal velocity to the ellipse area swept per period,
        // `k = 2 S / ((1 + e)² T rp²)`, with `rp²` cancelled out of `S`.
        let surface = params.ellipse_area();
        let rate_constant = TAU * ((1.0 + e) / (1.0 - e).powi(3)).sqrt()
            / ((1.0 + e).powi(2) * orbital_period);

        let step = orbital_period / (2 * (config.samples - 1)) as f64;
        let table = AngleTable::integrate(e, rate_constant, step, config.samples)?;

        tracing::debug!(
            eccentricity = e,
            orbital_period,
            samples = config.samples,
            rate_constant,
            "built orbit angle table"
        );

        let cache = SolverCachedCalculations {
            semi_latus_rectum: params.pericenter * (1.0 + e),
            surface,
            rate_constant,
            transformation_matrix: Matrix3x2::flat_rotation(params.long_asc_node),
        };

        Ok(OrbitSolver {
            params,
            scales,
            orbital_period,
            rotation_period,
            time: wrap_time(initial_time, orbital_period),
            table,
            cache,
        })
    }
}

// Ticking and the clock
impl OrbitSolver {
    /// Advances the solver's clock by `dt` and places the body at its new
    /// position.
    ///
    /// When `ctx` says the simulation is paused, nothing happens and the
    /// sink is left alone.
    ///
    /// # Example
    /// ```
    /// use glam::DVec3;
    ///
    /// use keplerian_table::{OrbitParameters, OrbitSolver, TickContext};
    ///
    /// let mut solver = OrbitSolver::new(OrbitParameters::default(), 0.0).unwrap();
    /// let mut position: Option<DVec3> = None;
    ///
    /// solver.advance(0.1, &TickContext::PAUSED, &mut position);
    /// assert_eq!(position, None);
    /// assert_eq!(solver.get_time(), 0.0);
    ///
    /// solver.advance(0.1, &TickContext::RUNNING, &mut position);
    /// assert!(position.is_some());
    /// assert_eq!(solver.get_time(), 0.1);
    /// ```
    pub fn advance<S: PositionSink + ?Sized>(
        &mut self,
        dt: f64,
        ctx: &TickContext,
        sink: &mut S,
    ) {
        if ctx.paused {
            return;
        }

        self.set_time(self.time + dt);
        let position = self.get_position();

        tracing::trace!(time = self.time, ?position, "advanced orbit");

        sink.place(position);
    }

    /// Sets the solver's clock, wrapping it into one orbital period.
    ///
    /// Non-finite times are ignored.
    pub fn set_time(&mut self, time: f64) {
        if time.is_finite() {
            self.time = wrap_time(time, self.orbital_period);
        }
    }

    /// Gets the time elapsed since the last pericenter passage.
    pub fn get_time(&self) -> f64 {
        self.time
    }
}

// Anomaly, position and velocity
impl OrbitSolver {
    /// Gets the true anomaly at a given time, in `[0, 2π)`.
    ///
    /// The time is wrapped into one period first. The first half of the
    /// period is read straight from the angle table; the second half
    /// mirrors it, since `θ(T - t) = 2π - θ(t)`.
    ///
    /// # Example
    /// ```
    /// use keplerian_table::{OrbitParameters, OrbitSolver};
    ///
    /// let solver = OrbitSolver::new(OrbitParameters::new(0.3, 1.0, 2.0, 0.0), 0.0).unwrap();
    ///
    /// assert_eq!(solver.get_true_anomaly_at_time(0.0), 0.0);
    /// assert_eq!(solver.get_true_anomaly_at_time(2.0), 0.0);
    /// assert!((solver.get_true_anomaly_at_time(1.0) - std::f64::consts::PI).abs() < 1e-12);
    /// ```
    pub fn get_true_anomaly_at_time(&self, t: f64) -> f64 {
        let period = self.orbital_period;
        let t = wrap_time(t, period);

        if t <= period / 2.0 {
            return self.table.lookup(t);
        }

        let mirrored = TAU - self.table.lookup(period - t);

        // Only reachable when the mirrored lookup rounds down to zero.
        if mirrored >= TAU {
            0.0
        } else {
            mirrored
        }
    }

    /// Gets the true anomaly at the solver's current time.
    pub fn get_true_anomaly(&self) -> f64 {
        self.get_true_anomaly_at_time(self.time)
    }

    /// Gets the position in the orbital plane at a given true anomaly,
    /// before the longitude of ascending node is applied.
    ///
    /// `x` points towards the pericenter.
    pub fn get_planar_position_at_true_anomaly(&self, theta: f64) -> DVec2 {
        let (sin, cos) = theta.sin_cos();
        let radius = self.cache.semi_latus_rectum / (1.0 + self.params.eccentricity * cos);

        DVec2::new(radius * cos, radius * sin)
    }

    /// Gets the position at a given true anomaly.
    ///
    /// The `y` component is always zero.
    ///
    /// # Example
    /// ```
    /// use glam::DVec3;
    ///
    /// use keplerian_table::{OrbitParameters, OrbitSolver};
    ///
    /// let solver = OrbitSolver::new(OrbitParameters::new(0.5, 2.0, 1.0, 0.0), 0.0).unwrap();
    ///
    /// assert_eq!(solver.get_position_at_true_anomaly(0.0), DVec3::new(2.0, 0.0, 0.0));
    /// ```
    pub fn get_position_at_true_anomaly(&self, theta: f64) -> DVec3 {
        self.cache
            .transformation_matrix
            .dot_vec(self.get_planar_position_at_true_anomaly(theta))
    }

    /// Gets the position at a given time.
    pub fn get_position_at_time(&self, t: f64) -> DVec3 {
        self.get_position_at_true_anomaly(self.get_true_anomaly_at_time(t))
    }

    /// Gets the position `t` time units after the solver's current time,
    /// without moving the solver.
    pub fn get_position_after(&self, t: f64) -> DVec3 {
        self.get_position_at_time(self.time + t)
    }

    /// Gets the position at the solver's current time.
    pub fn get_position(&self) -> DVec3 {
        self.get_position_at_time(self.time)
    }

    /// Gets the velocity at a given time.
    ///
    /// This is a central difference over two table steps on either side,
    /// so it carries an error proportional to the table step, squared.
    pub fn get_velocity_at_time(&self, t: f64) -> DVec3 {
        let h = 2.0 * self.table.step();
        let ahead = self.get_position_at_time(t + h);
        let behind = self.get_position_at_time(t - h);

        (ahead - behind) / (2.0 * h)
    }

    /// Gets the velocity at the solver's current time.
    pub fn get_velocity(&self) -> DVec3 {
        self.get_velocity_at_time(self.time)
    }

    /// Gets the speed at the solver's current time, in kilometers per second.
    pub fn get_velocity_magnitude(&self) -> f64 {
        self.scales.speed_in_kms(self.get_velocity().length())
    }

    /// Gets the distance from the focus at a given true anomaly.
    pub fn get_radius_at_true_anomaly(&self, theta: f64) -> f64 {
        self.cache.semi_latus_rectum / (1.0 + self.params.eccentricity * theta.cos())
    }
}

// Rotation of the body
impl OrbitSolver {
    /// Gets how far the body has spun around its own axis at a given time,
    /// in `[0, 2π)`.
    ///
    /// Bodies with a rotation period of zero don't spin.
    pub fn get_rotation_angle_at_time(&self, t: f64) -> f64 {
        if self.rotation_period == 0.0 {
            return 0.0;
        }

        let angle = (TAU * t / self.rotation_period).rem_euclid(TAU);
        if angle >= TAU {
            0.0
        } else {
            angle
        }
    }

    /// Gets the direction of the body's spin axis.
    ///
    /// The vertical axis is tilted towards the pericenter by the axial tilt,
    /// then turned by the longitude of ascending node along with the orbit.
    pub fn get_spin_axis(&self) -> DVec3 {
        let (sin, cos) = self.params.axial_tilt.sin_cos();
        let tilted = self.cache.transformation_matrix.dot_vec(DVec2::new(sin, 0.0));

        DVec3::new(tilted.x, cos, tilted.z)
    }
}

// Getters
impl OrbitSolver {
    /// Gets the parameters this solver was built from.
    pub fn get_parameters(&self) -> &OrbitParameters {
        &self.params
    }

    /// Gets the unit provider this solver was built with.
    pub fn get_scales(&self) -> &Scales {
        &self.scales
    }

    /// Gets the angle table.
    pub fn get_angle_table(&self) -> &AngleTable {
        &self.table
    }

    /// Gets the orbital period, in internal time units.
    pub fn get_orbital_period(&self) -> f64 {
        self.orbital_period
    }

    /// Gets the rotation period, in internal time units.
    pub fn get_rotation_period(&self) -> f64 {
        self.rotation_period
    }

    /// Gets the mass of the body, scaled into display units.
    pub fn get_mass(&self) -> f64 {
        self.scales.scaled_mass(self.params.mass)
    }

    /// Gets the area enclosed by the orbit.
    pub fn get_surface(&self) -> f64 {
        self.cache.surface
    }

    /// Gets the `k` constant of the anomaly rate equation.
    pub fn get_rate_constant(&self) -> f64 {
        self.cache.rate_constant
    }

    /// Gets the area swept per unit of time by the line between the focus
    /// and the body. This is constant along the orbit.
    pub fn get_areal_velocity(&self) -> f64 {
        self.cache.surface / self.orbital_period
    }

    /// Gets the distance between the focus and the apocenter.
    pub fn get_apocenter(&self) -> f64 {
        self.get_radius_at_true_anomaly(PI)
    }
}

/// The saved form of an [`OrbitSolver`].
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct SolverState {
    params: OrbitParameters,
    config: SolverConfig,
    time: f64,
}

#[cfg(feature = "serde")]
impl From<OrbitSolver> for SolverState {
    fn from(solver: OrbitSolver) -> Self {
        SolverState {
            params: solver.params,
            config: SolverConfig {
                samples: solver.table.len(),
                scales: solver.scales,
            },
            time: solver.time,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<SolverState> for OrbitSolver {
    type Error = ConstructionError;

    fn try_from(state: SolverState) -> Result<Self, Self::Error> {
        OrbitSolver::with_config(state.params, &state.config, state.time)
    }
}

/// Wraps a time into `[0, period)`.
#[inline]
fn wrap_time(t: f64, period: f64) -> f64 {
    let wrapped = t.rem_euclid(period);

    // `rem_euclid` rounds up to `period` for tiny negative inputs.
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}
