//! Draw requests built from the post-resolution game state
//!
//! The simulation never draws. An external renderer walks the list produced
//! here each frame and decides how each kind looks on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{AsteroidShape, Character, GameState, ProjectileKind, SizeClass};

/// Dead ship blink period (seconds); hidden for the second half
const BLINK_PERIOD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawKind {
    /// Outline polygon, or the textured Geeble when `shape` says so
    Asteroid {
        shape: AsteroidShape,
        size: SizeClass,
    },
    Projectile(ProjectileKind),
    Ship {
        character: Character,
        alive: bool,
        /// Sprite scale that keeps every character (and the sleepy sprite)
        /// at the same footprint
        scale: f32,
    },
    /// Full-screen ad image (0 or 1)
    AdOverlay {
        image: u32,
    },
}

/// One visible entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub kind: DrawKind,
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    pub radius: f32,
}

/// Build the frame's draw list: projectiles, then asteroids, then the ship on
/// top. While an ad plays only the overlay is drawn.
pub fn draw_list(state: &GameState) -> Vec<DrawRequest> {
    if state.ad_gate.is_paused() {
        return vec![DrawRequest {
            kind: DrawKind::AdOverlay {
                image: state.ad_gate.frame(),
            },
            pos: Vec2::ZERO,
            rotation: 0.0,
            radius: 0.0,
        }];
    }

    let mut list = Vec::with_capacity(state.projectiles.len() + state.asteroids.len() + 1);

    list.extend(state.projectiles.iter().map(|p| DrawRequest {
        kind: DrawKind::Projectile(p.kind),
        pos: p.pos(),
        rotation: p.heading(),
        radius: p.radius,
    }));

    list.extend(state.asteroids.iter().map(|a| DrawRequest {
        kind: DrawKind::Asteroid {
            shape: a.shape,
            size: a.size,
        },
        pos: a.pos(),
        rotation: a.motion.rotation,
        radius: a.radius,
    }));

    let ship = &state.ship;
    let blink_hidden =
        !ship.is_alive() && state.elapsed.rem_euclid(BLINK_PERIOD) > BLINK_PERIOD * 0.5;
    if !blink_hidden {
        list.push(DrawRequest {
            kind: DrawKind::Ship {
                character: ship.character,
                alive: ship.is_alive(),
                scale: state.assets.ship_scale(ship.character, ship.is_alive()),
            },
            pos: ship.pos,
            rotation: 0.0,
            radius: ship.radius,
        });
    }

    list
}
