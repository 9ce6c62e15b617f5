use core::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{ConstructionError, MAX_STEP_ANGLE, MAX_SUBSTEPS};

/// The true anomaly of an orbit, sampled at equal time steps over
/// the first half of its period.
///
/// The first sample is always `0` (the body sits at its pericenter) and the
/// last is always `π` (it reaches the apocenter after exactly half a period),
/// no matter how much the integration drifted in between.
///
/// The table is written once, when it's integrated, and only read afterwards.
/// It can be serialized for inspection, but never deserialized: a table
/// only comes out of [`AngleTable::integrate`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AngleTable {
    /// True anomaly samples, in radians.
    samples: Vec<f64>,

    /// The time between two samples, in internal time units.
    step: f64,
}

impl AngleTable {
    /// Integrates the true anomaly over half an orbit.
    ///
    /// The anomaly obeys `dθ/dt = k (1 + e cos θ)²`, which is Kepler's second
    /// law (constant areal velocity) rewritten for the polar form of the
    /// ellipse. It is integrated from `θ(0) = 0` with the classical
    /// fourth-order Runge-Kutta method:
    ///
    /// ```text
    /// k1 = h f(w)
    /// k2 = h f(w + k1 / 2)
    /// k3 = h f(w + k2 / 2)
    /// k4 = h f(w + k3)
    /// w += (k1 + 2 k2 + 2 k3 + k4) / 6
    /// ```
    ///
    /// # Sub-steps
    /// Near the pericenter of a very eccentric orbit, the anomaly can sweep
    /// several radians in one table step, which a single RK4 step can't
    /// follow. Each table step is therefore split into as many equal RK4
    /// sub-steps as needed to keep the fastest sweep under a small angle.
    /// For orbits up to an eccentricity of about 0.6 with the default
    /// table size, there's exactly one sub-step.
    ///
    /// Samples are clamped to `π`, so the table never decreases even when
    /// the sub-step budget runs out.
    ///
    /// # Parameters
    /// - `eccentricity`: The eccentricity of the orbit.
    /// - `rate_constant`: The `k` constant of the rate equation.
    /// - `step`: The time between two samples.
    /// - `samples`: The number of samples, including both pinned ends.
    ///
    /// # Errors
    /// Fails when there are fewer than 2 samples, when the eccentricity is
    /// outside of `[0, 1)`, or when the step or the rate constant isn't a
    /// finite positive number.
    ///
    /// # Example
    /// ```
    /// use keplerian_table::AngleTable;
    ///
    /// // A circular orbit with a period of 1 has a constant rate of 2π
    /// let table = AngleTable::integrate(0.0, std::f64::consts::TAU, 0.5 / 4.0, 5).unwrap();
    ///
    /// assert_eq!(table.len(), 5);
    /// assert_eq!(table.samples()[0], 0.0);
    /// assert_eq!(table.samples()[4], std::f64::consts::PI);
    /// assert!((table.samples()[2] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    /// ```
    pub fn integrate(
        eccentricity: f64,
        rate_constant: f64,
        step: f64,
        samples: usize,
    ) -> Result<AngleTable, ConstructionError> {
        if samples < 2 {
            return Err(ConstructionError::TooFewSamples(samples));
        }

        // NaN fails this too.
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ConstructionError::EccentricityOutOfRange(eccentricity));
        }

        if !(step.is_finite() && step > 0.0) {
            return Err(ConstructionError::NonPositiveStep(step));
        }

        if !(rate_constant.is_finite() && rate_constant > 0.0) {
            return Err(ConstructionError::DegenerateRate(rate_constant));
        }

        let substeps = Self::substeps(eccentricity, rate_constant, step);
        let h = step / substeps as f64;
        let rate = |theta: f64| anomaly_rate(rate_constant, eccentricity, theta);

        let mut table = Vec::with_capacity(samples);
        table.push(0.0);

        let mut w = 0.0;
        for _ in 0..samples - 2 {
            for _ in 0..substeps {
                let k1 = h * rate(w);
                let k2 = h * rate(w + k1 / 2.0);
                let k3 = h * rate(w + k2 / 2.0);
                let k4 = h * rate(w + k3);
                w += (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;
            }
            w = w.min(PI);
            table.push(w);
        }

        // The apocenter is reached after exactly half a period.
        table.push(PI);

        Ok(AngleTable {
            samples: table,
            step,
        })
    }

    /// The number of RK4 sub-steps needed per table step.
    fn substeps(eccentricity: f64, rate_constant: f64, step: f64) -> usize {
        // The rate peaks at the pericenter, where cos θ = 1.
        let max_rate = rate_constant * (1.0 + eccentricity).powi(2);
        let wanted = (max_rate * step / MAX_STEP_ANGLE).ceil();

        if wanted > MAX_SUBSTEPS as f64 {
            tracing::warn!(
                eccentricity,
                wanted,
                budget = MAX_SUBSTEPS,
                "orbit too eccentric for the RK4 sub-step budget, angle table will be coarse"
            );
            MAX_SUBSTEPS
        } else {
            (wanted as usize).max(1)
        }
    }

    /// Gets the true anomaly at a time since the pericenter passage.
    ///
    /// The time is turned into a fractional sample index, both neighbouring
    /// indices are clamped into the table, and the anomaly is linearly
    /// interpolated between them. When both indices land on the same
    /// sample, that sample is returned as-is.
    ///
    /// Times outside of the first half-period are clamped to the table's
    /// ends; use [`OrbitSolver::get_true_anomaly_at_time`][crate::OrbitSolver::get_true_anomaly_at_time]
    /// for times anywhere in the orbit.
    pub fn lookup(&self, time: f64) -> f64 {
        let last = (self.samples.len() - 1) as f64;
        let index = time / self.step;
        let i0 = index.floor().clamp(0.0, last);
        let i1 = index.ceil().clamp(0.0, last);

        let lower = self.samples[i0 as usize];

        if i0 == i1 {
            return lower;
        }

        let upper = self.samples[i1 as usize];
        lower + (upper - lower) * (index - i0)
    }

    /// Gets the samples of this table.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Gets the time between two samples.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Gets the number of samples in this table.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: a table holds at least its two pinned samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Gets the time covered by this table, which is half an orbital period.
    pub fn half_period(&self) -> f64 {
        self.step * (self.samples.len() - 1) as f64
    }
}

/// The rate of change of the true anomaly, `k (1 + e cos θ)²`.
#[inline]
pub(crate) fn anomaly_rate(rate_constant: f64, eccentricity: f64, theta: f64) -> f64 {
    let factor = 1.0 + eccentricity * theta.cos();
    rate_constant * factor * factor
}
