use bevy::math::Vec2;

pub type Real = f32;

pub type Vector = Vec2;
pub type Point = Vec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec2::ZERO
}

#[inline(always)]
pub fn vector(x: Real, y: Real) -> Vector {
    Vec2::new(x, y)
}

/// Downward gravity force for a single unit-mass particle.
#[inline(always)]
pub fn gravity_force(gravity: Real) -> Vector {
    Vec2::new(0.0, -gravity)
}

#[inline(always)]
pub fn vector_is_finite(v: Vector) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
