//! Collision resolution between projectiles, asteroids and the ship
//!
//! Both passes are brute force circle tests. Removal is mark-and-sweep: entities
//! are flagged during the pass and compacted with a single `retain` afterwards,
//! so nothing is erased while it is being iterated.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::motion::{Bounds, circles_overlap};
use super::projectile::{Projectile, ProjectileSpawn};
use super::ship::Ship;

/// A projectile striking an asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub projectile_id: u32,
    pub asteroid_id: u32,
    pub damage: i32,
    pub killed: bool,
    pub pos: Vec2,
}

/// Result of the projectile-asteroid pass
#[derive(Debug, Clone, Default)]
pub struct ImpactReport {
    pub impacts: Vec<Impact>,
    /// Residues spawned by exploding projectiles (missiles)
    pub spawns: Vec<ProjectileSpawn>,
}

/// Resolve every collidable projectile against the live asteroids.
///
/// Each projectile hits at most one asteroid per frame: the first overlapping
/// one in collection order. Killed asteroids drop out of the pass immediately
/// and both collections are compacted at the end.
pub fn resolve_projectile_asteroid(
    projectiles: &mut Vec<Projectile>,
    asteroids: &mut Vec<Asteroid>,
) -> ImpactReport {
    let mut report = ImpactReport::default();

    for projectile in projectiles.iter_mut() {
        if !projectile.collidable() {
            continue;
        }

        let hit = asteroids.iter_mut().find(|a| {
            a.is_alive() && circles_overlap(projectile.pos(), projectile.radius, a.pos(), a.radius)
        });
        let Some(asteroid) = hit else {
            continue;
        };

        let killed = asteroid.take_damage(projectile.damage);
        report.impacts.push(Impact {
            projectile_id: projectile.id,
            asteroid_id: asteroid.id,
            damage: projectile.damage,
            killed,
            pos: projectile.pos(),
        });

        if let Some(residue) = projectile.impact_residue() {
            report.spawns.push(residue);
        }
        projectile.mark_spent();
    }

    projectiles.retain(|p| !p.is_spent());
    asteroids.retain(|a| a.is_alive());
    report
}

/// Why an asteroid left play during the ship pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidExit {
    /// Rammed the ship
    Rammed { asteroid_id: u32, damage: i32 },
    /// Drifted past the grown screen bounds
    Drifted { asteroid_id: u32 },
}

/// Result of the ship-asteroid pass
#[derive(Debug, Clone, Default)]
pub struct ShipReport {
    pub exits: Vec<AsteroidExit>,
    /// The ship died during this pass
    pub ship_destroyed: bool,
}

/// Ram test and asteroid motion in one pass.
///
/// An overlapping asteroid damages a live ship and is consumed. Otherwise the
/// asteroid moves and is dropped if it left the grown bounds. Only the first
/// removal cause applies to each asteroid.
pub fn resolve_ship_asteroid(
    ship: &mut Ship,
    asteroids: &mut Vec<Asteroid>,
    dt: f32,
    bounds: &Bounds,
) -> ShipReport {
    let mut report = ShipReport::default();

    asteroids.retain_mut(|asteroid| {
        if ship.is_alive()
            && circles_overlap(ship.pos, ship.radius, asteroid.pos(), asteroid.radius)
        {
            let damage = asteroid.damage();
            if ship.take_damage(damage) {
                report.ship_destroyed = true;
            }
            report.exits.push(AsteroidExit::Rammed {
                asteroid_id: asteroid.id,
                damage,
            });
            return false;
        }

        if !asteroid.update(dt, bounds) {
            report.exits.push(AsteroidExit::Drifted {
                asteroid_id: asteroid.id,
            });
            return false;
        }
        true
    });

    report
}
