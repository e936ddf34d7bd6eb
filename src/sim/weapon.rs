//! Weapon table and the fire accumulator
//!
//! Every weapon fires at a fixed rate with a fixed muzzle spacing; the launch
//! speed is `spacing * rate`, so consecutive shots land evenly spaced on screen
//! no matter how fast the weapon fires.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

use super::projectile::{ProjectileKind, ProjectileSpawn};
use super::ship::Character;

/// Slack for shots that land exactly on a frame boundary (seconds)
const FIRE_EPSILON: f32 = 1e-4;

/// Grenade pair launch angle, measured from vertical
pub const GRENADE_SPREAD: f32 = FRAC_PI_4;

/// Player-selectable weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Laser,
    Bullet,
    Missile,
    /// Only available to (and forced on) the Gmail character
    Grenade,
}

impl WeaponKind {
    /// Shots per second
    pub fn fire_rate(self) -> f32 {
        match self {
            WeaponKind::Laser => 18.0,
            WeaponKind::Bullet => 22.0,
            WeaponKind::Missile => 3.0,
            WeaponKind::Grenade => 3.0,
        }
    }

    /// Distance between consecutive shots (px)
    pub fn spacing(self) -> f32 {
        match self {
            WeaponKind::Laser => 40.0,
            WeaponKind::Bullet => 20.0,
            WeaponKind::Missile => 100.0,
            WeaponKind::Grenade => 100.0,
        }
    }

    /// Seconds between shots
    #[inline]
    pub fn interval(self) -> f32 {
        1.0 / self.fire_rate()
    }

    #[inline]
    pub fn launch_speed(self) -> f32 {
        self.spacing() * self.fire_rate()
    }

    pub fn projectile_kind(self) -> ProjectileKind {
        match self {
            WeaponKind::Laser => ProjectileKind::Laser,
            WeaponKind::Bullet => ProjectileKind::Bullet,
            WeaponKind::Missile => ProjectileKind::Missile,
            WeaponKind::Grenade => ProjectileKind::Grenade,
        }
    }

    /// Next weapon in the cycle. Gmail is locked to grenades and the others
    /// rotate through laser, bullet and missile.
    pub fn next(self, character: Character) -> Self {
        if character == Character::Gmail {
            return WeaponKind::Grenade;
        }
        match self {
            WeaponKind::Laser => WeaponKind::Bullet,
            WeaponKind::Bullet => WeaponKind::Missile,
            WeaponKind::Missile | WeaponKind::Grenade => WeaponKind::Laser,
        }
    }

    /// Projectiles for one shot fired from `muzzle`, `lag` seconds ago.
    ///
    /// Lagged shots are pushed along their velocity so a burst of catch-up
    /// shots in a long frame keeps the regular spacing.
    pub fn volley(self, muzzle: Vec2, lag: f32) -> Vec<ProjectileSpawn> {
        let speed = self.launch_speed();
        let kind = self.projectile_kind();
        let velocities: Vec<Vec2> = match self {
            WeaponKind::Grenade => {
                let (sin, cos) = GRENADE_SPREAD.sin_cos();
                vec![
                    Vec2::new(-sin * speed, -cos * speed),
                    Vec2::new(sin * speed, -cos * speed),
                ]
            }
            _ => vec![Vec2::new(0.0, -speed)],
        };
        velocities
            .into_iter()
            .map(|vel| ProjectileSpawn {
                kind,
                pos: muzzle + vel * lag,
                vel,
                age: lag,
            })
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Laser => "Laser",
            WeaponKind::Bullet => "Bullet",
            WeaponKind::Missile => "Missile",
            WeaponKind::Grenade => "Grenades",
        }
    }
}

/// Fractional shot timer carried across frames
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireControl {
    accumulator: f32,
}

impl FireControl {
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Fire is held for `dt`. Returns the lag of each shot that came due,
    /// oldest first.
    pub fn hold(&mut self, dt: f32, weapon: WeaponKind) -> Vec<f32> {
        let interval = weapon.interval();
        self.accumulator += dt;

        let mut lags = Vec::new();
        while self.accumulator + FIRE_EPSILON >= interval {
            self.accumulator -= interval;
            lags.push(self.accumulator.max(0.0));
        }
        lags
    }

    /// Fire released: keep the phase but never bank more than one interval
    pub fn release(&mut self, weapon: WeaponKind) {
        let interval = weapon.interval();
        if self.accumulator > interval {
            self.accumulator %= interval;
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::motion::Bounds;
    use crate::sim::projectile::{Fate, Projectile};
    use proptest::{prop_assert, proptest};

    #[test]
    fn test_launch_speeds() {
        assert_eq!(WeaponKind::Laser.launch_speed(), 720.0);
        assert_eq!(WeaponKind::Bullet.launch_speed(), 440.0);
        assert_eq!(WeaponKind::Missile.launch_speed(), 300.0);
        assert_eq!(WeaponKind::Grenade.launch_speed(), 300.0);
    }

    #[test]
    fn test_laser_one_second_is_eighteen_even_shots() {
        let mut fire = FireControl::default();
        let dt = 1.0 / 60.0;
        let mut shot_times = Vec::new();
        for frame in 1..=60 {
            let frame_end = frame as f32 * dt;
            for lag in fire.hold(dt, WeaponKind::Laser) {
                shot_times.push(frame_end - lag);
            }
        }
        assert_eq!(shot_times.len(), 18);
        for pair in shot_times.windows(2) {
            assert!((pair[1] - pair[0] - 1.0 / 18.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_one_long_frame_catches_up() {
        let mut fire = FireControl::default();
        let lags = fire.hold(1.0, WeaponKind::Laser);
        assert_eq!(lags.len(), 18);
        // Oldest shot first, newest has (almost) no lag
        assert!(lags[0] > lags[17]);
        assert!(lags[17] < 1e-3);
    }

    #[test]
    fn test_release_keeps_phase() {
        let mut fire = FireControl::default();
        fire.hold(0.02, WeaponKind::Missile);
        fire.release(WeaponKind::Missile);
        // Below one interval: untouched
        assert!((fire.accumulator() - 0.02).abs() < 1e-6);

        let mut banked = FireControl { accumulator: 0.75 };
        banked.release(WeaponKind::Missile);
        assert!((banked.accumulator() - 0.75 % (1.0 / 3.0)).abs() < 1e-5);
    }

    #[test]
    fn test_grenade_pair_diverges() {
        let spawns = WeaponKind::Grenade.volley(Vec2::new(100.0, 100.0), 0.0);
        assert_eq!(spawns.len(), 2);
        assert!(spawns[0].vel.x < 0.0 && spawns[1].vel.x > 0.0);
        assert!(spawns.iter().all(|s| s.vel.y < 0.0));
        assert!((spawns[0].vel.length() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_lagged_grenade_keeps_fuse_schedule() {
        let bounds = Bounds::new(800.0, 800.0);
        let spawns = WeaponKind::Grenade.volley(Vec2::new(400.0, 700.0), 0.25);
        assert!(spawns.iter().all(|s| s.age == 0.25));

        // Launched a quarter second ago, so the fuse has a quarter left
        let mut grenade = Projectile::new(1, spawns[0]);
        assert_eq!(grenade.update(0.125, &bounds), Fate::Alive);
        assert!(matches!(grenade.update(0.125, &bounds), Fate::Expired(_)));
    }

    #[test]
    fn test_gmail_locks_grenades() {
        assert_eq!(WeaponKind::Laser.next(Character::Gmail), WeaponKind::Grenade);
        assert_eq!(WeaponKind::Missile.next(Character::Pibble), WeaponKind::Laser);
    }

    proptest! {
        #[test]
        fn prop_shot_count_independent_of_frame_rate(steps in 1usize..240, seconds in 0.1f32..3.0) {
            let weapon = WeaponKind::Bullet;
            let mut coarse = FireControl::default();
            let big = coarse.hold(seconds, weapon).len() as i64;

            let mut fine = FireControl::default();
            let dt = seconds / steps as f32;
            let small: i64 = (0..steps).map(|_| fine.hold(dt, weapon).len() as i64).sum();

            prop_assert!((big - small).abs() <= 1);
        }
    }
}
