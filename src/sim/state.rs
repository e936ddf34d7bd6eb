//! Game state and entity ownership
//!
//! `GameState` owns every entity collection; only the frame driver mutates it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ad_gate::AdGate;
use super::assets::AssetRegistry;
use super::asteroid::{Asteroid, ShapeSelection};
use super::motion::Bounds;
use super::projectile::{Projectile, ProjectileKind, ProjectileSpawn};
use super::ship::{Character, Ship};
use super::weapon::{FireControl, WeaponKind};
use crate::consts::*;

/// Things that happened during a tick (cleared at the start of every tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { weapon: WeaponKind },
    AsteroidSpawned { id: u32 },
    AsteroidDestroyed { id: u32 },
    ShipHit { damage: i32, hp: i32 },
    ShipDestroyed,
    GrenadeBurst { pos: Vec2 },
    MissileDetonated { pos: Vec2 },
    WeaponChanged { weapon: WeaponKind },
    CharacterChanged { character: Character },
    ShapeChanged { selection: ShapeSelection },
    AdStarted,
    AdFinished,
    Restarted,
}

/// Serializable view of the entities, for debugging and logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub elapsed: f64,
    pub ship: Ship,
    pub weapon: WeaponKind,
    pub shape: ShapeSelection,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub bounds: Bounds,
    pub assets: AssetRegistry,
    /// Simulated frames (ad pauses excluded)
    pub time_ticks: u64,
    /// Simulated seconds (ad pauses excluded)
    pub elapsed: f64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub weapon: WeaponKind,
    pub fire: FireControl,
    pub shape: ShapeSelection,
    /// Seconds since the last asteroid spawn
    pub spawn_timer: f32,
    pub spawn_interval: f32,
    pub ad_gate: AdGate,
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with the default screen and sprite metrics
    pub fn new(seed: u64) -> Self {
        Self::with_bounds(
            seed,
            Bounds::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            AssetRegistry::default(),
        )
    }

    pub fn with_bounds(seed: u64, bounds: Bounds, assets: AssetRegistry) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn_interval = rng.random_range(SPAWN_INTERVAL_MIN..=SPAWN_INTERVAL_MAX);
        let ship = Ship::new(&bounds, &assets);

        Self {
            seed,
            rng,
            bounds,
            assets,
            time_ticks: 0,
            elapsed: 0.0,
            ship,
            asteroids: Vec::with_capacity(MAX_ASTEROIDS),
            projectiles: Vec::with_capacity(1024),
            weapon: WeaponKind::default(),
            fire: FireControl::default(),
            shape: ShapeSelection::default(),
            spawn_timer: 0.0,
            spawn_interval,
            ad_gate: AdGate::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add projectiles, skipping any that would exceed the cap.
    /// Returns how many were added.
    pub fn spawn_projectiles(
        &mut self,
        spawns: impl IntoIterator<Item = ProjectileSpawn>,
    ) -> usize {
        let mut added = 0;
        for spawn in spawns {
            if self.projectiles.len() >= MAX_PROJECTILES {
                log::debug!("Projectile cap reached, skipping {:?}", spawn.kind);
                continue;
            }
            let id = self.next_entity_id();
            self.projectiles.push(Projectile::new(id, spawn));
            added += 1;
        }
        added
    }

    /// Spawn one asteroid using the current shape selection. Returns its id,
    /// or None at the cap.
    pub fn spawn_asteroid(&mut self) -> Option<u32> {
        if self.asteroids.len() >= MAX_ASTEROIDS {
            log::debug!("Asteroid cap reached, skipping spawn");
            return None;
        }
        let id = self.next_entity_id();
        let shape = self.shape.resolve(&mut self.rng);
        let asteroid = Asteroid::spawn(id, shape, &self.bounds, &self.assets, &mut self.rng);
        log::debug!(
            "Spawned {:?} {:?} asteroid {} at ({:.0}, {:.0})",
            asteroid.size,
            asteroid.shape,
            id,
            asteroid.pos().x,
            asteroid.pos().y
        );
        self.asteroids.push(asteroid);
        Some(id)
    }

    /// Pick the delay until the next asteroid
    pub fn roll_spawn_interval(&mut self) {
        self.spawn_interval = self.rng.random_range(SPAWN_INTERVAL_MIN..=SPAWN_INTERVAL_MAX);
    }

    /// Force every in-flight missile into its blast. Returns how many went off.
    pub fn detonate_missiles(&mut self) -> usize {
        let mut blasts = Vec::new();
        for projectile in self.projectiles.iter_mut() {
            if projectile.kind == ProjectileKind::Missile && !projectile.is_spent() {
                if let Some(residue) = projectile.impact_residue() {
                    blasts.push(residue);
                }
                projectile.mark_spent();
            }
        }
        self.projectiles.retain(|p| !p.is_spent());

        for blast in &blasts {
            self.events.push(GameEvent::MissileDetonated { pos: blast.pos });
        }
        let count = blasts.len();
        self.spawn_projectiles(blasts);
        count
    }

    /// Replace the ship and wipe the field in one step
    pub fn restart(&mut self) {
        self.ship = Ship::new(&self.bounds, &self.assets);
        self.asteroids.clear();
        self.projectiles.clear();
        self.spawn_timer = 0.0;
        self.roll_spawn_interval();
        self.fire.reset();
        self.weapon = WeaponKind::default();
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted (seed {})", self.seed);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            elapsed: self.elapsed,
            ship: self.ship.clone(),
            weapon: self.weapon,
            shape: self.shape,
            asteroids: self.asteroids.clone(),
            projectiles: self.projectiles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42);
        assert!(state.asteroids.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.ship.pos, Vec2::new(400.0, 400.0));
        assert!((SPAWN_INTERVAL_MIN..=SPAWN_INTERVAL_MAX).contains(&state.spawn_interval));
    }

    #[test]
    fn test_asteroid_cap() {
        let mut state = GameState::new(1);
        for _ in 0..MAX_ASTEROIDS {
            assert!(state.spawn_asteroid().is_some());
        }
        assert!(state.spawn_asteroid().is_none());
        assert_eq!(state.asteroids.len(), MAX_ASTEROIDS);
    }

    #[test]
    fn test_projectile_cap() {
        let mut state = GameState::new(1);
        let laser = ProjectileSpawn::new(
            ProjectileKind::Laser,
            Vec2::new(400.0, 300.0),
            Vec2::new(0.0, -720.0),
        );
        let added = state.spawn_projectiles(std::iter::repeat_n(laser, MAX_PROJECTILES + 5));
        assert_eq!(added, MAX_PROJECTILES);
        assert_eq!(state.projectiles.len(), MAX_PROJECTILES);
        assert_eq!(state.spawn_projectiles([laser]), 0);
    }

    #[test]
    fn test_grenade_pair_straddling_the_cap() {
        let mut state = GameState::new(1);
        let laser = ProjectileSpawn::new(ProjectileKind::Laser, Vec2::ZERO, Vec2::ZERO);
        state.spawn_projectiles(std::iter::repeat_n(laser, MAX_PROJECTILES - 1));

        let pair = WeaponKind::Grenade.volley(Vec2::new(400.0, 700.0), 0.0);
        assert_eq!(state.spawn_projectiles(pair), 1);
        assert_eq!(state.projectiles.len(), MAX_PROJECTILES);
        assert_eq!(state.projectiles.last().map(|p| p.kind), Some(ProjectileKind::Grenade));
    }

    #[test]
    fn test_detonate_only_missiles() {
        let mut state = GameState::new(1);
        let vel = Vec2::new(0.0, -300.0);
        state.spawn_projectiles([
            ProjectileSpawn::new(ProjectileKind::Missile, Vec2::new(100.0, 100.0), vel),
            ProjectileSpawn::new(ProjectileKind::Laser, Vec2::new(200.0, 100.0), vel),
            ProjectileSpawn::new(ProjectileKind::Missile, Vec2::new(300.0, 100.0), vel),
        ]);

        assert_eq!(state.detonate_missiles(), 2);
        let kinds: Vec<_> = state.projectiles.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ProjectileKind::Laser,
                ProjectileKind::MissileBlast,
                ProjectileKind::MissileBlast
            ]
        );
        assert!(state.projectiles.iter().all(|p| p.motion.vel == vel || p.kind.is_residue()));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for _ in 0..10 {
            a.spawn_asteroid();
            b.spawn_asteroid();
        }
        for (x, y) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(x.pos(), y.pos());
            assert_eq!(x.motion.vel, y.motion.vel);
            assert_eq!(x.size, y.size);
        }
    }
}
