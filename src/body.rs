use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{OrbitSolver, TickContext};

/// A struct representing a celestial body moving along its own orbit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// The name of the celestial body.
    pub name: String,

    /// The solver driving this body's orbit.
    pub solver: OrbitSolver,

    /// The position the body was last placed at.
    pub position: DVec3,
}

impl Body {
    /// Creates a new `Body` instance, placed at the solver's current position.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the celestial body.
    /// * `solver` - The solver driving its orbit.
    pub fn new(name: String, solver: OrbitSolver) -> Self {
        let position = solver.get_position();

        Self {
            name,
            solver,
            position,
        }
    }

    /// Advances this body's orbit by `dt`, updating its position.
    pub fn advance(&mut self, dt: f64, ctx: &TickContext) {
        let Body {
            solver, position, ..
        } = self;
        solver.advance(dt, ctx, position);
    }

    /// Gets the mass of the body, in display units.
    pub fn mass(&self) -> f64 {
        self.solver.get_mass()
    }

    /// Gets the radius of the body.
    pub fn radius(&self) -> f64 {
        self.solver.get_parameters().radius
    }
}
