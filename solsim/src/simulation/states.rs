//! Core state types for the simulation.
//!
//! - `Body` is the single entity record for stars, planets and satellites,
//!   tagged with a `BodyKind` and a `MotionMode`
//! - `System` owns the ordered body arena plus the physical time `t`
//!
//! Parent links are `BodyId` arena indices into the owning `System`, resolved
//! once by name when the system is built. They never own the parent.

use nalgebra::Vector2;

use crate::error::{SimError, SimResult};

pub type NVec2 = Vector2<f64>;

/// Index of a body inside its `System`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Role of a body in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Star,
    Planet,
    Satellite,
}

impl BodyKind {
    /// Infer the kind from the naming convention (`Star*`, `Planet*`, `Satellite*`)
    pub fn from_name(name: &str) -> Option<Self> {
        if name.starts_with("Star") {
            Some(BodyKind::Star)
        } else if name.starts_with("Planet") {
            Some(BodyKind::Planet)
        } else if name.starts_with("Satellite") {
            Some(BodyKind::Satellite)
        } else {
            None
        }
    }

    /// Kind a parent must have for this kind, `None` for stars
    pub fn parent_kind(self) -> Option<Self> {
        match self {
            BodyKind::Star => None,
            BodyKind::Planet => Some(BodyKind::Star),
            BodyKind::Satellite => Some(BodyKind::Planet),
        }
    }

    /// Depth in the star -> planet -> satellite hierarchy
    pub fn depth(self) -> u8 {
        match self {
            BodyKind::Star => 0,
            BodyKind::Planet => 1,
            BodyKind::Satellite => 2,
        }
    }
}

/// Circular orbit parameters for kinematic motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub radius: f64, // distance to parent when the orbit was established
    pub angle: f64, // current phase (rad)
    pub angular_speed: f64, // magnitude (rad / time unit)
    pub clockwise: bool,
}

impl OrbitParams {
    /// -1 for clockwise, +1 otherwise
    pub fn direction(&self) -> f64 {
        if self.clockwise { -1.0 } else { 1.0 }
    }

    /// Time to complete one revolution, infinite for a stalled orbit
    pub fn period(&self) -> f64 {
        if self.angular_speed > 0.0 {
            std::f64::consts::TAU / self.angular_speed
        } else {
            f64::INFINITY
        }
    }
}

/// How a body's state is advanced each step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotionMode {
    #[default]
    Free, // force + integrator
    Kinematic(OrbitParams), // analytic circular orbit around the parent
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub f: NVec2, // accumulated force, transient
    pub m: f64, // mass
    pub radius: f64, // display radius, collision threshold only
    pub color: String, // passed through untouched
    pub parent: Option<BodyId>,
    pub mode: MotionMode,
}

impl Body {
    pub fn new(name: impl Into<String>, kind: BodyKind, m: f64, radius: f64, x: NVec2, v: NVec2) -> Self {
        Self {
            name: name.into(),
            kind,
            x,
            v,
            f: NVec2::zeros(),
            m,
            radius,
            color: String::from("white"),
            parent: None,
            mode: MotionMode::Free,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn is_kinematic(&self) -> bool {
        matches!(self.mode, MotionMode::Kinematic(_))
    }

    pub fn orbit(&self) -> Option<&OrbitParams> {
        match &self.mode {
            MotionMode::Kinematic(orbit) => Some(orbit),
            MotionMode::Free => None,
        }
    }

    /// Mass usable for force and integration
    pub fn has_valid_mass(&self) -> bool {
        self.m.is_finite() && self.m > 0.0
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.x - other.x).norm()
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // insertion ordered arena
    pub t: f64, // physical time
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Append a body, rejecting a name that is already taken
    pub fn push(&mut self, body: Body) -> SimResult<BodyId> {
        if self.find(&body.name).is_some() {
            return Err(SimError::DuplicateName { name: body.name });
        }
        self.bodies.push(body);
        Ok(BodyId(self.bodies.len() - 1))
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Parent of `id`, if the link is set and still points inside the arena
    pub fn parent_of(&self, id: BodyId) -> Option<&Body> {
        self.get(id)?.parent.and_then(|p| self.get(p))
    }

    /// Link `child` to `parent` after checking the kind pairing
    pub fn set_parent(&mut self, child: BodyId, parent: BodyId) -> SimResult<()> {
        let (Some(c), Some(p)) = (self.get(child), self.get(parent)) else {
            return Err(SimError::InvalidParent {
                child: format!("#{}", child.0),
                parent: format!("#{}", parent.0),
            });
        };
        if child == parent || c.kind.parent_kind() != Some(p.kind) {
            return Err(SimError::InvalidParent {
                child: c.name.clone(),
                parent: p.name.clone(),
            });
        }
        self.bodies[child.0].parent = Some(parent);
        Ok(())
    }

    /// Put a parented body into kinematic mode. Returns false (body stays free)
    /// when the body has no resolvable parent
    pub fn set_kinematic(&mut self, id: BodyId, orbit: OrbitParams) -> bool {
        if self.parent_of(id).is_none() {
            return false;
        }
        match self.get_mut(id) {
            Some(body) => {
                body.mode = MotionMode::Kinematic(orbit);
                true
            }
            None => false,
        }
    }

    /// Kinematic bodies ordered parents-first, so a satellite always sees its
    /// planet's already-advanced state
    pub fn kinematic_order(&self) -> Vec<BodyId> {
        let mut ids: Vec<BodyId> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_kinematic())
            .map(|(i, _)| BodyId(i))
            .collect();
        ids.sort_by_key(|id| self.bodies[id.0].kind.depth());
        ids
    }
}
