//! GPU-ready instance data for draw requests

use bytemuck::{Pod, Zeroable};

use super::draw::{DrawKind, DrawRequest};
use crate::sim::ProjectileKind;

/// Packed per-instance record, ready for a vertex buffer upload
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DrawInstance {
    pub position: [f32; 2],
    pub rotation: f32,
    pub radius: f32,
    pub color: [f32; 4],
    /// Polygon side count, 0 for circles/sprites
    pub sides: u32,
    /// `DrawKind` discriminant, see [`kind_code`]
    pub kind: u32,
    pub _pad: [u32; 2],
}

/// Colors for game elements
pub mod colors {
    pub const ASTEROID: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LASER: [f32; 4] = [0.9, 0.16, 0.22, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const MISSILE: [f32; 4] = [0.0, 0.47, 0.95, 1.0];
    pub const GRENADE: [f32; 4] = [0.0, 0.89, 0.19, 1.0];
    pub const SHRAPNEL: [f32; 4] = [0.9, 0.16, 0.22, 1.0];
    /// Flame sprite tint for blasts and explosions
    pub const RESIDUE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SPRITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

fn projectile_color(kind: ProjectileKind) -> [f32; 4] {
    match kind {
        ProjectileKind::Laser => colors::LASER,
        ProjectileKind::Bullet => colors::BULLET,
        ProjectileKind::Missile => colors::MISSILE,
        ProjectileKind::Grenade => colors::GRENADE,
        ProjectileKind::Shrapnel => colors::SHRAPNEL,
        ProjectileKind::MissileBlast | ProjectileKind::Explosion => colors::RESIDUE,
    }
}

/// Stable numeric code for a draw kind
pub fn kind_code(kind: &DrawKind) -> u32 {
    match kind {
        DrawKind::Asteroid { .. } => 0,
        DrawKind::Projectile(_) => 1,
        DrawKind::Ship { .. } => 2,
        DrawKind::AdOverlay { .. } => 3,
    }
}

impl DrawRequest {
    pub fn instance(&self) -> DrawInstance {
        let (color, sides) = match self.kind {
            DrawKind::Asteroid { shape, .. } => (colors::ASTEROID, shape.sides().unwrap_or(0)),
            DrawKind::Projectile(kind) => (projectile_color(kind), 0),
            DrawKind::Ship { .. } | DrawKind::AdOverlay { .. } => (colors::SPRITE, 0),
        };
        DrawInstance {
            position: self.pos.to_array(),
            rotation: self.rotation,
            radius: self.radius,
            color,
            sides,
            kind: kind_code(&self.kind),
            _pad: [0; 2],
        }
    }
}

/// Pack a whole draw list into bytes for upload
pub fn instance_bytes(requests: &[DrawRequest]) -> Vec<u8> {
    let instances: Vec<DrawInstance> = requests.iter().map(DrawRequest::instance).collect();
    bytemuck::cast_slice::<DrawInstance, u8>(&instances).to_vec()
}
