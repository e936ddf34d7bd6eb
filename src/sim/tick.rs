//! Frame driver
//!
//! Advances the whole simulation by one frame. Order matters and is fixed:
//! ad gate, ship movement, restart/shape/weapon/character changes, firing,
//! detonation, asteroid spawning, projectile expiry, projectile-asteroid hits,
//! then the ship-asteroid pass (which also moves the asteroids).

use glam::Vec2;

use super::asteroid::ShapeSelection;
use super::collision::{AsteroidExit, resolve_projectile_asteroid, resolve_ship_asteroid};
use super::projectile::{Fate, ProjectileKind};
use super::ship::Character;
use super::state::{GameEvent, GameState};
use super::weapon::WeaponKind;

/// Input for a single frame. Movement and fire are "held" flags, the rest
/// are "pressed this frame" edges.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub cycle_weapon: bool,
    pub cycle_shape: bool,
    /// Direct shape pick (overrides `cycle_shape`)
    pub select_shape: Option<ShapeSelection>,
    pub cycle_character: bool,
    /// Blow up every missile in flight
    pub detonate: bool,
    /// Only honoured once the ship is dead
    pub restart: bool,
    pub watch_ad: bool,
}

impl TickInput {
    /// Movement direction, one unit per pressed axis
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Ad break: the only thing that runs while it plays
    if input.watch_ad && !state.ad_gate.is_paused() && state.ship.is_alive() {
        state.ad_gate.start();
        let buff = state.ad_gate.hp_buff();
        state.ship.buff_hp(buff);
        state.events.push(GameEvent::AdStarted);
        log::info!("Ad break started, ship hp now {}", state.ship.hp);
    }
    if state.ad_gate.is_paused() {
        if state.ad_gate.update(dt) {
            state.events.push(GameEvent::AdFinished);
            log::info!("Ad break finished after {:.1}s", state.ad_gate.elapsed());
        }
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt as f64;

    let bounds = state.bounds;
    state.ship.update(input.direction(), dt, &bounds);

    if !state.ship.is_alive() && input.restart {
        state.restart();
        return;
    }

    apply_selections(state, input);

    // Firing
    if state.ship.is_alive() && input.fire {
        let weapon = state.weapon;
        let muzzle = state.ship.muzzle();
        for lag in state.fire.hold(dt, weapon) {
            state.spawn_projectiles(weapon.volley(muzzle, lag));
            state.events.push(GameEvent::ShotFired { weapon });
        }
    } else {
        state.fire.release(state.weapon);
    }

    if input.detonate {
        state.detonate_missiles();
    }

    // Asteroid spawn timer; at the cap the timer keeps running
    state.spawn_timer += dt;
    if state.spawn_timer >= state.spawn_interval
        && let Some(id) = state.spawn_asteroid()
    {
        state.spawn_timer = 0.0;
        state.roll_spawn_interval();
        state.events.push(GameEvent::AsteroidSpawned { id });
    }

    // Projectile motion and expiry
    let mut chained = Vec::new();
    let mut bursts = Vec::new();
    state.projectiles.retain_mut(|projectile| match projectile.update(dt, &bounds) {
        Fate::Alive => true,
        Fate::Gone => false,
        Fate::Expired(spawns) => {
            if projectile.kind == ProjectileKind::Grenade {
                bursts.push(projectile.pos());
            }
            chained.extend(spawns);
            false
        }
    });
    state.spawn_projectiles(chained);
    state
        .events
        .extend(bursts.into_iter().map(|pos| GameEvent::GrenadeBurst { pos }));

    // Projectile vs asteroid
    let report = resolve_projectile_asteroid(&mut state.projectiles, &mut state.asteroids);
    for impact in report.impacts.iter().filter(|i| i.killed) {
        state.events.push(GameEvent::AsteroidDestroyed {
            id: impact.asteroid_id,
        });
    }
    state.spawn_projectiles(report.spawns);

    // Asteroid vs ship, plus asteroid motion
    let report = resolve_ship_asteroid(&mut state.ship, &mut state.asteroids, dt, &bounds);
    for exit in &report.exits {
        if let AsteroidExit::Rammed { damage, .. } = *exit {
            state.events.push(GameEvent::ShipHit {
                damage,
                hp: state.ship.hp,
            });
        }
    }
    if report.ship_destroyed {
        state.events.push(GameEvent::ShipDestroyed);
        log::info!(
            "Ship destroyed after {:.1}s as {}",
            state.elapsed,
            state.ship.character.as_str()
        );
    }
}

/// Shape, weapon and character switches
fn apply_selections(state: &mut GameState, input: &TickInput) {
    let shape = match input.select_shape {
        Some(selection) => Some(selection),
        None if input.cycle_shape => Some(state.shape.next()),
        None => None,
    };
    if let Some(selection) = shape.filter(|s| *s != state.shape) {
        state.shape = selection;
        state.events.push(GameEvent::ShapeChanged { selection });
    }

    if input.cycle_weapon && state.ship.character != Character::Gmail {
        state.weapon = state.weapon.next(state.ship.character);
        state.events.push(GameEvent::WeaponChanged {
            weapon: state.weapon,
        });
    }

    if input.cycle_character && state.ship.is_alive() {
        let previous = state.ship.character;
        let character = previous.next();
        state.ship.set_character(character, &state.assets);

        let weapon = if character == Character::Gmail {
            Some(WeaponKind::Grenade)
        } else if previous == Character::Gmail {
            Some(WeaponKind::Laser)
        } else {
            None
        };
        if let Some(weapon) = weapon {
            state.weapon = weapon;
            state.events.push(GameEvent::WeaponChanged { weapon });
        }
        state.events.push(GameEvent::CharacterChanged { character });
        log::info!("Switched to {} ({} hp)", character.as_str(), state.ship.hp);
    }
}
