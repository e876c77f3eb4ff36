//! Planar center-of-mass state.

use core::ops::{Add, Mul, Neg, Sub};

/// Planar vector in the horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Forward component.
    pub x: f64,
    /// Lateral component.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Components as `[x, y]`, indexable by axis.
    #[inline]
    pub const fn axes(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(self) -> f64 {
        libm::hypot(self.x, self.y)
    }

    /// Check that both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(axes: [f64; 2]) -> Self {
        Self::new(axes[0], axes[1])
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

/// Position, velocity and acceleration of one scalar axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisState {
    /// Position.
    pub pos: f64,
    /// Velocity.
    pub vel: f64,
    /// Acceleration.
    pub acc: f64,
}

/// Center-of-mass position, velocity and acceleration in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComState {
    /// Position.
    pub pos: Vec2,
    /// Velocity.
    pub vel: Vec2,
    /// Acceleration.
    pub acc: Vec2,
}

impl ComState {
    /// Assemble a planar state from its x and y axis states.
    #[inline]
    pub fn from_axes(x: AxisState, y: AxisState) -> Self {
        Self {
            pos: Vec2::new(x.pos, y.pos),
            vel: Vec2::new(x.vel, y.vel),
            acc: Vec2::new(x.acc, y.acc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::from([3.0, -1.0]);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(b - a, Vec2::new(2.0, -3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert!((Vec2::new(3.0, 4.0).norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_axes() {
        let x = AxisState { pos: 1.0, vel: 2.0, acc: 3.0 };
        let y = AxisState { pos: 4.0, vel: 5.0, acc: 6.0 };
        let state = ComState::from_axes(x, y);
        assert_eq!(state.pos, Vec2::new(1.0, 4.0));
        assert_eq!(state.vel, Vec2::new(2.0, 5.0));
        assert_eq!(state.acc, Vec2::new(3.0, 6.0));
    }
}
