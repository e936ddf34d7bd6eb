//! Projectiles and their lifetime state machine
//!
//! Grenades burst into shrapnel, shrapnel fizzles into an explosion, missiles
//! turn into a growing blast. The residue kinds (blast, explosion) are purely
//! visual: they never damage asteroids.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::motion::{Bounds, Motion};
use super::weapon::WeaponKind;
use crate::polar_to_cartesian;

/// Grenade and shrapnel fuse (seconds)
pub const FUSE_TIME: f32 = 0.5;
/// Shrapnel pieces per grenade burst
pub const SHRAPNEL_COUNT: usize = 6;
/// First shrapnel heads straight up
pub const SHRAPNEL_BASE_ANGLE: f32 = -FRAC_PI_2;

/// Missile blast starts at the missile's size and grows until the cap
pub const MISSILE_BLAST_START_RADIUS: f32 = 5.0;
pub const MISSILE_BLAST_GROWTH: f32 = 60.0;
pub const MISSILE_BLAST_MAX_RADIUS: f32 = 150.0;

/// Grenade/shrapnel explosion: fixed size, short life
pub const EXPLOSION_RADIUS: f32 = 45.0;
pub const EXPLOSION_TTL: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Laser,
    Bullet,
    Missile,
    Grenade,
    Shrapnel,
    /// Growing residue left by a missile
    MissileBlast,
    /// Residue left by grenades and shrapnel
    Explosion,
}

impl ProjectileKind {
    pub fn damage(self) -> i32 {
        match self {
            ProjectileKind::Laser => 20,
            ProjectileKind::Bullet => 10,
            ProjectileKind::Missile => 45,
            ProjectileKind::Grenade => 30,
            ProjectileKind::Shrapnel => 30,
            ProjectileKind::MissileBlast | ProjectileKind::Explosion => 0,
        }
    }

    /// Visual-only leftovers that skip collision
    pub fn is_residue(self) -> bool {
        matches!(self, ProjectileKind::MissileBlast | ProjectileKind::Explosion)
    }

    pub fn initial_radius(self) -> f32 {
        match self {
            ProjectileKind::Bullet => 2.0,
            ProjectileKind::MissileBlast => MISSILE_BLAST_START_RADIUS,
            ProjectileKind::Explosion => EXPLOSION_RADIUS,
            _ => 5.0,
        }
    }

    /// Fixed time-to-live, if the kind has one
    pub fn ttl(self) -> Option<f32> {
        match self {
            ProjectileKind::Grenade | ProjectileKind::Shrapnel => Some(FUSE_TIME),
            ProjectileKind::Explosion => Some(EXPLOSION_TTL),
            _ => None,
        }
    }
}

/// Request to create a projectile; ids are assigned by the game state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds already in flight when created (catch-up shots)
    pub age: f32,
}

impl ProjectileSpawn {
    pub fn new(kind: ProjectileKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            kind,
            pos,
            vel,
            age: 0.0,
        }
    }

    /// Stationary residue
    pub fn residue(kind: ProjectileKind, pos: Vec2) -> Self {
        Self::new(kind, pos, Vec2::ZERO)
    }
}

/// Outcome of one projectile update
#[derive(Debug, Clone, PartialEq)]
pub enum Fate {
    Alive,
    /// Remove without a trace
    Gone,
    /// Remove and spawn these in its place
    Expired(Vec<ProjectileSpawn>),
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub motion: Motion,
    pub damage: i32,
    pub radius: f32,
    /// Seconds since spawn
    pub age: f32,
    #[serde(skip)]
    spent: bool,
}

impl Projectile {
    pub fn new(id: u32, spawn: ProjectileSpawn) -> Self {
        Self {
            id,
            kind: spawn.kind,
            motion: Motion::linear(spawn.pos, spawn.vel),
            damage: spawn.kind.damage(),
            radius: spawn.kind.initial_radius(),
            age: spawn.age,
            spent: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.motion.pos
    }

    /// Marked for removal by collision or detonation
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.spent
    }

    pub fn mark_spent(&mut self) {
        self.spent = true;
    }

    /// Residues never take part in collisions
    pub fn collidable(&self) -> bool {
        !self.spent && !self.kind.is_residue()
    }

    /// Move, age and decide whether this projectile survives the frame
    pub fn update(&mut self, dt: f32, bounds: &Bounds) -> Fate {
        self.motion.integrate(dt);
        self.age += dt;

        if !bounds.contains(self.motion.pos, 0.0) {
            return Fate::Gone;
        }

        match self.kind {
            ProjectileKind::MissileBlast => {
                self.radius = MISSILE_BLAST_START_RADIUS + MISSILE_BLAST_GROWTH * self.age;
                if self.radius >= MISSILE_BLAST_MAX_RADIUS {
                    return Fate::Gone;
                }
            }
            ProjectileKind::Grenade if self.age >= FUSE_TIME => {
                let mut spawns = shrapnel_burst(self.pos(), WeaponKind::Grenade.launch_speed());
                spawns.push(ProjectileSpawn::residue(ProjectileKind::Explosion, self.pos()));
                return Fate::Expired(spawns);
            }
            ProjectileKind::Shrapnel if self.age >= FUSE_TIME => {
                return Fate::Expired(vec![ProjectileSpawn::residue(
                    ProjectileKind::Explosion,
                    self.pos(),
                )]);
            }
            ProjectileKind::Explosion if self.age >= EXPLOSION_TTL => return Fate::Gone,
            _ => {}
        }

        Fate::Alive
    }

    /// Residue left behind when this projectile hits something or is
    /// detonated. Only missiles leave one.
    pub fn impact_residue(&self) -> Option<ProjectileSpawn> {
        match self.kind {
            ProjectileKind::Missile => Some(ProjectileSpawn::residue(
                ProjectileKind::MissileBlast,
                self.pos(),
            )),
            _ => None,
        }
    }

    /// Heading in degrees, 0 = pointing up the screen
    pub fn heading(&self) -> f32 {
        let vel = self.motion.vel;
        if vel == Vec2::ZERO {
            return 0.0;
        }
        crate::wrap_degrees(vel.x.atan2(-vel.y).to_degrees())
    }
}

/// Shrapnel ring: evenly spaced, first piece straight up
pub fn shrapnel_burst(pos: Vec2, speed: f32) -> Vec<ProjectileSpawn> {
    let step = TAU / SHRAPNEL_COUNT as f32;
    (0..SHRAPNEL_COUNT)
        .map(|i| {
            let vel = polar_to_cartesian(speed, SHRAPNEL_BASE_ANGLE + i as f32 * step);
            ProjectileSpawn::new(ProjectileKind::Shrapnel, pos, vel)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 800.0)
    }

    fn spawn(kind: ProjectileKind, vel: Vec2) -> Projectile {
        Projectile::new(1, ProjectileSpawn::new(kind, Vec2::new(400.0, 400.0), vel))
    }

    /// Run until the projectile stops being Alive; returns (frames, fate)
    fn run_until_done(p: &mut Projectile, dt: f32) -> (u32, Fate) {
        for frame in 1..10_000 {
            match p.update(dt, &bounds()) {
                Fate::Alive => {}
                fate => return (frame, fate),
            }
        }
        panic!("projectile never expired");
    }

    #[test]
    fn test_laser_leaves_screen() {
        let mut p = spawn(ProjectileKind::Laser, Vec2::new(0.0, -720.0));
        let (frames, fate) = run_until_done(&mut p, 1.0 / 60.0);
        assert_eq!(fate, Fate::Gone);
        // 400px at 12px/frame
        assert_eq!(frames, 34);
    }

    #[test]
    fn test_grenade_bursts_into_six_shrapnel() {
        let mut p = spawn(ProjectileKind::Grenade, Vec2::new(10.0, -10.0));
        let (_, fate) = run_until_done(&mut p, 1.0 / 60.0);
        let Fate::Expired(spawns) = fate else {
            panic!("grenade should expire with spawns");
        };
        let shrapnel: Vec<_> = spawns
            .iter()
            .filter(|s| s.kind == ProjectileKind::Shrapnel)
            .collect();
        assert_eq!(shrapnel.len(), 6);
        assert_eq!(
            spawns.iter().filter(|s| s.kind == ProjectileKind::Explosion).count(),
            1
        );
        for (i, s) in shrapnel.iter().enumerate() {
            assert_eq!(s.pos, p.pos());
            let angle = s.vel.y.atan2(s.vel.x);
            let expected = -FRAC_PI_2 + i as f32 * TAU / 6.0;
            let diff = (angle - expected).rem_euclid(TAU);
            assert!(diff < 1e-4 || TAU - diff < 1e-4, "shard {i} at {angle}");
            assert!((s.vel.length() - 300.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_fixed_ttl_never_early() {
        for kind in [
            ProjectileKind::Grenade,
            ProjectileKind::Shrapnel,
            ProjectileKind::Explosion,
        ] {
            let Some(ttl) = kind.ttl() else {
                panic!("{kind:?} has a ttl");
            };
            for dt in [1.0 / 30.0, 1.0 / 60.0, 1.0 / 144.0] {
                let mut p = spawn(kind, Vec2::ZERO);
                let (frames, _) = run_until_done(&mut p, dt);
                let removed_at = frames as f32 * dt;
                assert!(removed_at >= ttl - 1e-4, "{kind:?} removed early");
                assert!(removed_at <= ttl + dt + 1e-4, "{kind:?} removed late");
            }
        }
    }

    #[test]
    fn test_missile_blast_grows_to_cap() {
        let mut p = spawn(ProjectileKind::MissileBlast, Vec2::ZERO);
        p.update(1.0, &bounds());
        assert!((p.radius - 65.0).abs() < 1e-4);
        assert_eq!(p.update(1.5, &bounds()), Fate::Gone);
    }

    #[test]
    fn test_only_missiles_leave_impact_residue() {
        let missile = spawn(ProjectileKind::Missile, Vec2::new(0.0, -300.0));
        let residue = missile.impact_residue().map(|r| r.kind);
        assert_eq!(residue, Some(ProjectileKind::MissileBlast));
        assert!(spawn(ProjectileKind::Bullet, Vec2::ZERO).impact_residue().is_none());
        assert!(!spawn(ProjectileKind::Explosion, Vec2::ZERO).collidable());
    }

    #[test]
    fn test_heading_points_along_velocity() {
        assert_eq!(spawn(ProjectileKind::Laser, Vec2::new(0.0, -1.0)).heading(), 0.0);
        let right = spawn(ProjectileKind::Shrapnel, Vec2::new(1.0, 0.0)).heading();
        assert!((right - 90.0).abs() < 1e-4);
    }
}
