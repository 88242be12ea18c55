//! Planar positions in arena pixels.

use serde::{Deserialize, Serialize};

/// 2D position or direction. The y axis grows toward the south (Blue's) edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > f32::EPSILON {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }

    /// Angle of this direction in radians, measured from +x.
    #[must_use]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Move toward `target` by at most `max_step`, never overshooting.
    #[must_use]
    pub fn move_toward(self, target: Self, max_step: f32) -> Self {
        let delta = target - self;
        let dist = delta.length();
        if dist <= max_step || dist <= f32::EPSILON {
            target
        } else {
            self + delta * (max_step / dist)
        }
    }

    /// Linear interpolation, `t = 0` gives `self`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Midpoint between two positions.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

/// Gap between two circles; zero or negative when they overlap.
#[must_use]
pub fn edge_distance(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> f32 {
    a.distance(b) - a_radius - b_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_move_toward_stops_at_target() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        assert_eq!(a.move_toward(b, 4.0), Vec2::new(4.0, 0.0));
        assert_eq!(a.move_toward(b, 40.0), b);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
        let n = Vec2::new(0.0, -5.0).normalize_or_zero();
        assert_eq!(n, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_edge_distance() {
        let gap = edge_distance(Vec2::new(0.0, 0.0), 10.0, Vec2::new(30.0, 0.0), 5.0);
        assert_eq!(gap, 15.0);
        assert!(edge_distance(Vec2::ZERO, 10.0, Vec2::new(5.0, 0.0), 10.0) < 0.0);
    }
}
