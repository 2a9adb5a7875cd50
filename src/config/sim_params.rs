use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::error::ParamsError;
use crate::math::Real;

/// Immutable bundle of physical and scene constants for the simulation.
///
/// Units are "per tick": the integrator uses a unit timestep and unit mass,
/// so `gravity` is the velocity gained per tick and forces are velocity deltas.
///
/// `radius` always equals `RADIUS_PER_SPACING * spacing`; change the spacing
/// through [`SimulationParams::with_spacing`] to keep them together.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSimulationParams")]
pub struct SimulationParams {
    /// Number of particles in the run
    pub particle_count: usize,

    /// Domain spans `[-half_width, half_width]` horizontally
    pub half_width: Real,

    /// Floor level
    pub ground: Real,

    /// Dam x-position while the dam is intact
    pub dam_x: Real,

    /// Frame at which the caller breaks the dam
    pub dam_break_frame: u64,

    /// Gravity magnitude (downward)
    pub gravity: Real,

    /// Rest spacing the stiffnesses and radius derive from
    pub spacing: Real,

    /// Pressure stiffness `K`
    pub stiffness: Real,

    /// Near-pressure stiffness `K_NEAR`, must exceed `K`
    pub near_stiffness: Real,

    pub rest_density: Real,

    /// Neighbor radius `R`
    pub radius: Real,

    /// Viscosity coefficient `SIGMA`
    pub viscosity: Real,

    /// Speed above which velocity is damped
    pub max_velocity: Real,

    /// Spring factor of the walls, dam and floor
    pub wall_damping: Real,

    /// Velocity scale applied once speed exceeds `max_velocity`
    pub velocity_damping: Real,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::from_spacing(SPACING)
    }
}

impl SimulationParams {
    /// Derive `K`, `K_NEAR` and `R` from a rest spacing, everything else at its default.
    pub fn from_spacing(spacing: Real) -> Self {
        let stiffness = spacing * STIFFNESS_PER_SPACING;
        Self {
            particle_count: PARTICLE_COUNT,
            half_width: HALF_WIDTH,
            ground: GROUND,
            dam_x: DAM_X,
            dam_break_frame: DAM_BREAK_FRAME,
            gravity: GRAVITY,
            spacing,
            stiffness,
            near_stiffness: stiffness * NEAR_STIFFNESS_RATIO,
            rest_density: REST_DENSITY,
            radius: spacing * RADIUS_PER_SPACING,
            viscosity: VISCOSITY,
            max_velocity: MAX_VELOCITY,
            wall_damping: WALL_DAMPING,
            velocity_damping: VELOCITY_DAMPING,
        }
    }

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_gravity(mut self, gravity: Real) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_dam_break_frame(mut self, frame: u64) -> Self {
        self.dam_break_frame = frame;
        self
    }

    pub fn with_viscosity(mut self, viscosity: Real) -> Self {
        self.viscosity = viscosity;
        self
    }

    /// Change the rest spacing, re-deriving `K`, `K_NEAR` and `R` from it.
    pub fn with_spacing(mut self, spacing: Real) -> Self {
        let derived = Self::from_spacing(spacing);
        self.spacing = spacing;
        self.stiffness = derived.stiffness;
        self.near_stiffness = derived.near_stiffness;
        self.radius = derived.radius;
        self
    }

    pub fn with_stiffness(mut self, stiffness: Real, near_stiffness: Real) -> Self {
        self.stiffness = stiffness;
        self.near_stiffness = near_stiffness;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: Real, velocity_damping: Real) -> Self {
        self.max_velocity = max_velocity;
        self.velocity_damping = velocity_damping;
        self
    }

    #[inline]
    pub fn radius_squared(&self) -> Real {
        self.radius * self.radius
    }

    /// Reject bundles the solver cannot run with.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let reals = [
            ("half_width", self.half_width),
            ("ground", self.ground),
            ("dam_x", self.dam_x),
            ("gravity", self.gravity),
            ("spacing", self.spacing),
            ("stiffness", self.stiffness),
            ("near_stiffness", self.near_stiffness),
            ("rest_density", self.rest_density),
            ("radius", self.radius),
            ("viscosity", self.viscosity),
            ("max_velocity", self.max_velocity),
            ("wall_damping", self.wall_damping),
            ("velocity_damping", self.velocity_damping),
        ];
        if let Some(&(name, _)) = reals.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParamsError::NonFinite { name });
        }

        if self.particle_count == 0 {
            return Err(ParamsError::EmptyParticleSet);
        }

        for (name, value) in [
            ("half_width", self.half_width),
            ("spacing", self.spacing),
            ("radius", self.radius),
            ("max_velocity", self.max_velocity),
        ] {
            if value <= 0.0 {
                return Err(ParamsError::NonPositive { name, value });
            }
        }

        for (name, value) in [
            ("gravity", self.gravity),
            ("stiffness", self.stiffness),
            ("rest_density", self.rest_density),
            ("viscosity", self.viscosity),
            ("wall_damping", self.wall_damping),
            ("velocity_damping", self.velocity_damping),
        ] {
            if value < 0.0 {
                return Err(ParamsError::Negative { name, value });
            }
        }

        let derived_radius = self.spacing * RADIUS_PER_SPACING;
        if (self.radius - derived_radius).abs() > derived_radius * RADIUS_TOLERANCE {
            return Err(ParamsError::RadiusMismatch {
                radius: self.radius,
                spacing: self.spacing,
            });
        }

        if self.near_stiffness <= self.stiffness {
            return Err(ParamsError::NearStiffnessTooLow {
                stiffness: self.stiffness,
                near_stiffness: self.near_stiffness,
            });
        }

        if self.dam_x <= -self.half_width || self.dam_x >= self.half_width {
            return Err(ParamsError::DamOutsideDomain {
                dam_x: self.dam_x,
                half_width: self.half_width,
            });
        }

        Ok(())
    }

    /// Parse a JSON parameter bundle. Absent fields keep their defaults, and
    /// absent `stiffness`, `near_stiffness` and `radius` follow `spacing`.
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

const RADIUS_TOLERANCE: Real = 1e-5;

/// Wire form of [`SimulationParams`]; the spacing-derived fields are optional.
#[derive(Deserialize)]
#[serde(default)]
struct RawSimulationParams {
    particle_count: usize,
    half_width: Real,
    ground: Real,
    dam_x: Real,
    dam_break_frame: u64,
    gravity: Real,
    spacing: Real,
    stiffness: Option<Real>,
    near_stiffness: Option<Real>,
    rest_density: Real,
    radius: Option<Real>,
    viscosity: Real,
    max_velocity: Real,
    wall_damping: Real,
    velocity_damping: Real,
}

impl Default for RawSimulationParams {
    fn default() -> Self {
        let params = SimulationParams::default();
        Self {
            particle_count: params.particle_count,
            half_width: params.half_width,
            ground: params.ground,
            dam_x: params.dam_x,
            dam_break_frame: params.dam_break_frame,
            gravity: params.gravity,
            spacing: params.spacing,
            stiffness: None,
            near_stiffness: None,
            rest_density: params.rest_density,
            radius: None,
            viscosity: params.viscosity,
            max_velocity: params.max_velocity,
            wall_damping: params.wall_damping,
            velocity_damping: params.velocity_damping,
        }
    }
}

impl From<RawSimulationParams> for SimulationParams {
    fn from(raw: RawSimulationParams) -> Self {
        let derived = SimulationParams::from_spacing(raw.spacing);
        let stiffness = raw.stiffness.unwrap_or(derived.stiffness);
        Self {
            particle_count: raw.particle_count,
            half_width: raw.half_width,
            ground: raw.ground,
            dam_x: raw.dam_x,
            dam_break_frame: raw.dam_break_frame,
            gravity: raw.gravity,
            spacing: raw.spacing,
            stiffness,
            near_stiffness: raw
                .near_stiffness
                .unwrap_or(stiffness * NEAR_STIFFNESS_RATIO),
            rest_density: raw.rest_density,
            radius: raw.radius.unwrap_or(derived.radius),
            viscosity: raw.viscosity,
            max_velocity: raw.max_velocity,
            wall_damping: raw.wall_damping,
            velocity_damping: raw.velocity_damping,
        }
    }
}
