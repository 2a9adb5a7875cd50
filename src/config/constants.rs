// Default constants for the dam-break scenario
use crate::math::Real;

// Scene
pub const PARTICLE_COUNT: usize = 250;
pub const HALF_WIDTH: Real = 0.5;
pub const GROUND: Real = 0.0;
pub const DAM_X: Real = -0.3;
pub const DAM_BREAK_FRAME: u64 = 200;
pub const DEFAULT_FRAME_COUNT: u64 = 300;

// Initial lattice fill
pub const LATTICE_SPACING: Real = 0.03;

// Physics
pub const GRAVITY: Real = 0.02 * 0.25;
pub const SPACING: Real = 0.08;
pub const STIFFNESS_PER_SPACING: Real = 1.0 / 1000.0;
pub const NEAR_STIFFNESS_RATIO: Real = 10.0;
pub const REST_DENSITY: Real = 3.0;
pub const RADIUS_PER_SPACING: Real = 1.25;
pub const VISCOSITY: Real = 0.2;
pub const MAX_VELOCITY: Real = 2.0;
pub const WALL_DAMPING: Real = 0.05;
pub const VELOCITY_DAMPING: Real = 0.5;

// Pairs closer than this have no usable direction for pressure or viscosity
pub const MIN_PAIR_DISTANCE: Real = 1.0e-6;

pub const STATS_LOG_PERIOD: u64 = 30;
