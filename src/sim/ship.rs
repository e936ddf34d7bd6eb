//! The player's ship and its character variants

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::assets::AssetRegistry;
use super::motion::Bounds;

/// Playable characters - each has its own hp/speed and sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Character {
    #[default]
    Pibble,
    Washington,
    /// Locked to grenades
    Gmail,
}

impl Character {
    pub fn next(self) -> Self {
        match self {
            Character::Pibble => Character::Washington,
            Character::Washington => Character::Gmail,
            Character::Gmail => Character::Pibble,
        }
    }

    pub fn base_hp(self) -> i32 {
        match self {
            Character::Pibble => 100,
            Character::Washington => 50,
            Character::Gmail => 75,
        }
    }

    /// Movement speed (px/s)
    pub fn speed(self) -> f32 {
        match self {
            Character::Pibble => 250.0,
            Character::Washington => 400.0,
            Character::Gmail => 350.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Character::Pibble => "Pibble",
            Character::Washington => "Washington",
            Character::Gmail => "Gmail",
        }
    }
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub hp: i32,
    pub speed: f32,
    pub character: Character,
    pub radius: f32,
    alive: bool,
}

impl Ship {
    /// Fresh Pibble ship centered on screen
    pub fn new(bounds: &Bounds, assets: &AssetRegistry) -> Self {
        let character = Character::default();
        Self {
            pos: bounds.center(),
            hp: character.base_hp(),
            speed: character.speed(),
            character,
            radius: assets.ship_footprint() * 0.5,
            alive: true,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Move by a direction (each axis in -1..=1). Dead ships ignore input and
    /// sink toward the bottom of the screen.
    pub fn update(&mut self, direction: Vec2, dt: f32, bounds: &Bounds) {
        if self.alive {
            self.pos = bounds.clamp(self.pos + direction * self.speed * dt);
        } else {
            self.pos.y += self.speed * dt;
        }
    }

    /// Muzzle position: top edge of the sprite
    pub fn muzzle(&self) -> Vec2 {
        self.pos - Vec2::new(0.0, self.radius)
    }

    /// Apply damage. Returns true on the hit that kills the ship.
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

    pub fn buff_hp(&mut self, amount: i32) {
        self.hp += amount;
    }

    /// Swap character; resets hp and speed to the new character's base values
    pub fn set_character(&mut self, character: Character, assets: &AssetRegistry) {
        self.character = character;
        self.hp = character.base_hp();
        self.speed = character.speed();
        self.radius = assets.ship_footprint() * 0.5;
    }
}
