use core::fmt;
use std::collections::HashMap;

use glam::DVec3;

use super::Body;
use crate::TickContext;

type Id = u64;

/// A collection of independent bodies that are ticked together.
///
/// Every body circles its own fixed focus; the system doesn't couple them.
/// It only owns the pause flag and hands a read-only snapshot of it to
/// each body on every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct System {
    /// The bodies in the system.
    bodies: HashMap<Id, Body>,

    /// The next ID to assign to a body.
    next_id: Id,

    /// Whether ticks are currently ignored.
    paused: bool,

    /// The time elapsed while the system was running.
    pub time: f64,
}

/// An error to describe why a body couldn't be added to a system.
#[non_exhaustive]
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum BodyAddError {
    /// Another body in the system already has this name.
    #[error("a body named `{0}` is already in the system")]
    DuplicateName(String),
}

impl System {
    /// Creates an empty, running system.
    pub fn new() -> System {
        System {
            bodies: HashMap::new(),
            next_id: 0,
            paused: false,
            time: 0.0,
        }
    }

    /// Adds a body to the system.
    ///
    /// `body`: The body to add into the system.
    ///
    /// Returns: The ID of the newly-added body, or the body itself if its
    /// name is already taken.
    pub fn add_body(&mut self, body: Body) -> Result<Id, (BodyAddError, Body)> {
        if self.get_body_index_with_name(&body.name).is_some() {
            return Err((BodyAddError::DuplicateName(body.name.clone()), body));
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        tracing::info!(id, name = %body.name, "added body to system");
        self.bodies.insert(id, body);

        Ok(id)
    }

    /// Removes a body from the system.
    ///
    /// Returns: The removed body, if there was one with this ID.
    pub fn remove_body(&mut self, id: Id) -> Option<Body> {
        let body = self.bodies.remove(&id)?;
        tracing::info!(id, name = %body.name, "removed body from system");
        Some(body)
    }

    /// Gets a Vec of all bodies in the system.
    pub fn get_bodies(&self) -> Vec<&Body> {
        self.bodies.values().collect()
    }

    /// Gets a mutable reference to a body in the system.
    pub fn get_body_mut(&mut self, id: Id) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    /// Gets an immutable reference to a body in the system.
    pub fn get_body(&self, id: Id) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Gets the ID of a body with a given name.
    pub fn get_body_index_with_name(&self, name: &str) -> Option<Id> {
        self.bodies
            .iter()
            .find(|(_, body)| body.name == name)
            .map(|(id, _)| *id)
    }

    /// Gets the number of bodies in the system.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the system has no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Stops the following ticks from moving anything.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Lets the following ticks move bodies again.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the system is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances every body in the system by `dt`.
    ///
    /// Does nothing while the system is paused.
    pub fn tick(&mut self, dt: f64) {
        let ctx = TickContext {
            paused: self.paused,
        };

        if ctx.paused {
            return;
        }

        self.time += dt;
        for body in self.bodies.values_mut() {
            body.advance(dt, &ctx);
        }
    }

    /// Advances the system by `ticks` steps of `dt`.
    pub fn warp(&mut self, ticks: u64, dt: f64) {
        for _ in 0..ticks {
            self.tick(dt);
        }
    }

    /// Gets where every body will be `t` time units from now, by ID.
    ///
    /// Nothing is moved.
    pub fn positions_after(&self, t: f64) -> HashMap<Id, DVec3> {
        self.bodies
            .iter()
            .map(|(id, body)| (*id, body.solver.get_position_after(t)))
            .collect()
    }

    /// Gets the position a body was last placed at.
    pub fn get_body_position(&self, id: Id) -> Option<DVec3> {
        self.bodies.get(&id).map(|body| body.position)
    }
}

impl Default for System {
    fn default() -> Self {
        System::new()
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "System with {} bodies, t={}{}",
            self.bodies.len(),
            self.time,
            if self.paused { " (paused)" } else { "" }
        )
    }
}
