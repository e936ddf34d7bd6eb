//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (collection order, never hash order)
//! - No rendering or platform dependencies

pub mod ad_gate;
pub mod assets;
pub mod asteroid;
pub mod collision;
pub mod motion;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;
pub mod weapon;

pub use ad_gate::AdGate;
pub use assets::{AssetRegistry, TextureInfo};
pub use asteroid::{Asteroid, AsteroidShape, ShapeSelection, SizeClass};
pub use collision::{
    AsteroidExit, Impact, ImpactReport, ShipReport, resolve_projectile_asteroid,
    resolve_ship_asteroid,
};
pub use motion::{Bounds, Motion, circles_overlap};
pub use projectile::{Fate, Projectile, ProjectileKind, ProjectileSpawn};
pub use ship::{Character, Ship};
pub use state::{GameEvent, GameState, Snapshot};
pub use tick::{TickInput, tick};
pub use weapon::{FireControl, WeaponKind};
