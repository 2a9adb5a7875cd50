//! Error types for sph2d.

use thiserror::Error;

use crate::math::Real;

/// Rejected parameter bundles, raised before the first tick.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("parameter `{name}` is not finite")]
    NonFinite { name: &'static str },

    #[error("parameter `{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: Real },

    #[error("parameter `{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: Real },

    #[error("near stiffness {near_stiffness} must exceed stiffness {stiffness}")]
    NearStiffnessTooLow { stiffness: Real, near_stiffness: Real },

    #[error("radius {radius} does not follow spacing {spacing}")]
    RadiusMismatch { radius: Real, spacing: Real },

    #[error("dam position {dam_x} lies outside the domain (-{half_width}, {half_width})")]
    DamOutsideDomain { dam_x: Real, half_width: Real },

    #[error("particle count must be non-zero")]
    EmptyParticleSet,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a simulation, at construction or while ticking.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("expected {expected} particles, got {actual}")]
    ParticleCountMismatch { expected: usize, actual: usize },

    #[error("particle {index} became non-finite at tick {tick}")]
    NonFinite { index: usize, tick: u64 },
}
