//! Shared motion model for asteroids, projectiles and the ship
//!
//! Positions are in screen pixels with +y pointing down. Rotation is in degrees
//! because that is what the renderer consumes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::wrap_degrees;

/// Fixed screen rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen center
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Smaller of the two dimensions
    #[inline]
    pub fn min_dim(&self) -> f32 {
        self.width.min(self.height)
    }

    /// True if `pos` lies inside the screen grown by `margin` on every side.
    ///
    /// Edges count as inside.
    pub fn contains(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }

    /// Clamp a point onto the screen rectangle
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }
}

/// Position/rotation/velocity triple integrated once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per second
    pub rotation_speed: f32,
}

impl Motion {
    /// Straight-line motion with no spin
    pub fn linear(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    /// Advance position and rotation by `dt` seconds
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        if self.rotation_speed != 0.0 {
            self.rotation = wrap_degrees(self.rotation + self.rotation_speed * dt);
        }
    }
}

/// Circle overlap test used by every collision pair (strict less-than)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_moves_and_spins() {
        let mut m = Motion {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(100.0, -50.0),
            rotation: 350.0,
            rotation_speed: 120.0,
        };
        m.integrate(0.5);
        assert!((m.pos.x - 60.0).abs() < 1e-4);
        assert!((m.pos.y - -15.0).abs() < 1e-4);
        // 350 + 60 wraps to 50
        assert!((m.rotation - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_bounds_margin() {
        let b = Bounds::new(800.0, 600.0);
        assert!(b.contains(Vec2::new(0.0, 600.0), 0.0));
        assert!(!b.contains(Vec2::new(-1.0, 300.0), 0.0));
        assert!(b.contains(Vec2::new(-1.0, 300.0), 16.0));
        assert!(!b.contains(Vec2::new(400.0, 617.0), 16.0));
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!(circles_overlap(a, 5.0, b, 5.1));
        assert!(!circles_overlap(a, 5.0, b, 5.0));
    }
}
