//! Asteroids: spawn placement, shape/size capabilities and damage

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::assets::AssetRegistry;
use super::motion::{Bounds, Motion};
use crate::polar_to_cartesian;

/// Base radius per size unit for the polygon shapes
pub const POLYGON_RADIUS_PER_SIZE: f32 = 16.0;
/// Hit points per size unit
pub const HP_PER_SIZE: i32 = 20;
/// Aim jitter as a fraction of the smaller screen dimension
pub const AIM_JITTER_FRACTION: f32 = 0.1;

pub const SPEED_MIN: f32 = 125.0;
pub const SPEED_MAX: f32 = 250.0;
/// Rotation speed range (deg/s); always positive, asteroids spin one way
pub const ROT_SPEED_MIN: f32 = 50.0;
pub const ROT_SPEED_MAX: f32 = 240.0;

/// Size class, doubles as the multiplier for radius, hp and damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    pub fn multiplier(self) -> i32 {
        match self {
            SizeClass::Small => 1,
            SizeClass::Medium => 2,
            SizeClass::Large => 4,
        }
    }

    /// Uniform pick among the three classes (`1 << roll`)
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match 1 << rng.random_range(0..=2u32) {
            1 => SizeClass::Small,
            2 => SizeClass::Medium,
            _ => SizeClass::Large,
        }
    }
}

/// Asteroid shape variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidShape {
    Triangle,
    Square,
    Pentagon,
    /// Textured sprite with a texture-derived radius
    Geeble,
}

impl AsteroidShape {
    /// Shapes eligible for random selection
    pub const POLYGONS: [AsteroidShape; 3] = [
        AsteroidShape::Triangle,
        AsteroidShape::Square,
        AsteroidShape::Pentagon,
    ];

    /// Contact damage per size unit
    pub fn base_damage(self) -> i32 {
        match self {
            AsteroidShape::Triangle => 5,
            AsteroidShape::Square => 10,
            AsteroidShape::Pentagon => 15,
            AsteroidShape::Geeble => 15,
        }
    }

    /// Polygon side count (None for the textured shape)
    pub fn sides(self) -> Option<u32> {
        match self {
            AsteroidShape::Triangle => Some(3),
            AsteroidShape::Square => Some(4),
            AsteroidShape::Pentagon => Some(5),
            AsteroidShape::Geeble => None,
        }
    }

    pub fn radius(self, size: SizeClass, assets: &AssetRegistry) -> f32 {
        let size = size.multiplier() as f32;
        match self {
            AsteroidShape::Geeble => assets.geeble_radius(size),
            _ => POLYGON_RADIUS_PER_SIZE * size,
        }
    }
}

/// Which shape the spawner produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeSelection {
    Fixed(AsteroidShape),
    /// Uniform among the polygon shapes, rolled per spawn
    Random,
}

impl Default for ShapeSelection {
    fn default() -> Self {
        ShapeSelection::Fixed(AsteroidShape::Geeble)
    }
}

impl ShapeSelection {
    /// Cycle order: Triangle -> Square -> Pentagon -> Random -> Geeble -> Triangle
    pub fn next(self) -> Self {
        match self {
            ShapeSelection::Fixed(AsteroidShape::Triangle) => {
                ShapeSelection::Fixed(AsteroidShape::Square)
            }
            ShapeSelection::Fixed(AsteroidShape::Square) => {
                ShapeSelection::Fixed(AsteroidShape::Pentagon)
            }
            ShapeSelection::Fixed(AsteroidShape::Pentagon) => ShapeSelection::Random,
            ShapeSelection::Random => ShapeSelection::Fixed(AsteroidShape::Geeble),
            ShapeSelection::Fixed(AsteroidShape::Geeble) => {
                ShapeSelection::Fixed(AsteroidShape::Triangle)
            }
        }
    }

    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> AsteroidShape {
        match self {
            ShapeSelection::Fixed(shape) => shape,
            ShapeSelection::Random => {
                AsteroidShape::POLYGONS[rng.random_range(0..AsteroidShape::POLYGONS.len())]
            }
        }
    }
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub motion: Motion,
    pub size: SizeClass,
    pub shape: AsteroidShape,
    pub hp: i32,
    pub radius: f32,
    alive: bool,
}

impl Asteroid {
    pub fn new(
        id: u32,
        shape: AsteroidShape,
        size: SizeClass,
        motion: Motion,
        assets: &AssetRegistry,
    ) -> Self {
        Self {
            id,
            motion,
            size,
            shape,
            hp: HP_PER_SIZE * size.multiplier(),
            radius: shape.radius(size, assets),
            alive: true,
        }
    }

    /// Spawn just off a random screen edge, aimed near the center
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        shape: AsteroidShape,
        bounds: &Bounds,
        assets: &AssetRegistry,
        rng: &mut R,
    ) -> Self {
        let size = SizeClass::roll(rng);
        let radius = shape.radius(size, assets);

        let pos = match rng.random_range(0..4u32) {
            0 => Vec2::new(rng.random_range(0.0..=bounds.width), -radius),
            1 => Vec2::new(bounds.width + radius, rng.random_range(0.0..=bounds.height)),
            2 => Vec2::new(rng.random_range(0.0..=bounds.width), bounds.height + radius),
            _ => Vec2::new(-radius, rng.random_range(0.0..=bounds.height)),
        };

        // Aim at the center with some scatter
        let max_offset = bounds.min_dim() * AIM_JITTER_FRACTION;
        let angle = rng.random_range(0.0..TAU);
        let offset = rng.random_range(0.0..=max_offset);
        let aim = bounds.center() + polar_to_cartesian(offset, angle);

        let dir = (aim - pos).normalize_or_zero();
        let motion = Motion {
            pos,
            vel: dir * rng.random_range(SPEED_MIN..=SPEED_MAX),
            rotation: rng.random_range(0.0..360.0),
            rotation_speed: rng.random_range(ROT_SPEED_MIN..=ROT_SPEED_MAX),
        };

        Self::new(id, shape, size, motion, assets)
    }

    /// Advance motion. Returns false once the asteroid has left the screen
    /// (bounds grown by its own radius).
    pub fn update(&mut self, dt: f32, bounds: &Bounds) -> bool {
        self.motion.integrate(dt);
        bounds.contains(self.motion.pos, self.radius)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.motion.pos
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Damage dealt to the ship on contact
    pub fn damage(&self) -> i32 {
        self.shape.base_damage() * self.size.multiplier()
    }

    /// Apply damage. Returns true only on the hit that kills it; dead
    /// asteroids ignore further damage.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp -= amount;
        if self.hp <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}
