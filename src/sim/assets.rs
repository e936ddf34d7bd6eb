//! Sprite metrics registry
//!
//! Collision radii for textured entities depend on texture dimensions. The
//! registry is built once before the loop (from the real textures, or from the
//! defaults below in headless runs) and passed by reference to the spawn and
//! draw paths.

use serde::{Deserialize, Serialize};

use super::ship::Character;

/// Scale applied to the Geeble texture
pub const GEEBLE_SCALE: f32 = 0.2;
/// Scale applied to the Pibble texture; defines the ship footprint
pub const SHIP_SCALE: f32 = 0.25;

/// Pixel dimensions of a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

impl TextureInfo {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Texture dimensions the simulation and draw path need
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRegistry {
    pub geeble: TextureInfo,
    pub pibble: TextureInfo,
    pub washington: TextureInfo,
    pub gmail: TextureInfo,
    /// Shown in place of the character sprite once the ship is dead
    pub sleepy: TextureInfo,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self {
            geeble: TextureInfo::new(512, 512),
            pibble: TextureInfo::new(256, 256),
            washington: TextureInfo::new(400, 480),
            gmail: TextureInfo::new(320, 240),
            sleepy: TextureInfo::new(300, 300),
        }
    }
}

impl AssetRegistry {
    pub fn character(&self, character: Character) -> TextureInfo {
        match character {
            Character::Pibble => self.pibble,
            Character::Washington => self.washington,
            Character::Gmail => self.gmail,
        }
    }

    /// On-screen width shared by every character sprite
    pub fn ship_footprint(&self) -> f32 {
        self.pibble.width as f32 * SHIP_SCALE
    }

    /// Draw scale for a character so its width matches the footprint
    pub fn character_scale(&self, character: Character) -> f32 {
        match character {
            Character::Pibble => SHIP_SCALE,
            other => self.ship_footprint() / self.character(other).width.max(1) as f32,
        }
    }

    /// Draw scale for the ship sprite; a dead ship shows the sleepy sprite at
    /// the same width
    pub fn ship_scale(&self, character: Character, alive: bool) -> f32 {
        if alive {
            self.character_scale(character)
        } else {
            self.ship_footprint() / self.sleepy.width.max(1) as f32
        }
    }

    /// Geeble collision radius for a size multiplier
    pub fn geeble_radius(&self, size: f32) -> f32 {
        self.geeble.width as f32 * GEEBLE_SCALE * size * 0.25
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics() {
        let assets = AssetRegistry::default();
        assert_eq!(assets.ship_footprint(), 64.0);
        // 512 * 0.2 * 2 / 4
        assert!((assets.geeble_radius(2.0) - 51.2).abs() < 1e-4);
    }

    #[test]
    fn test_character_scale_matches_footprint() {
        let assets = AssetRegistry::default();
        for c in [Character::Pibble, Character::Washington, Character::Gmail] {
            let drawn = assets.character(c).width as f32 * assets.character_scale(c);
            assert!((drawn - assets.ship_footprint()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_dead_ship_uses_sleepy_scale() {
        let assets = AssetRegistry::default();
        assert_eq!(
            assets.ship_scale(Character::Washington, true),
            assets.character_scale(Character::Washington)
        );
        let drawn = assets.sleepy.width as f32 * assets.ship_scale(Character::Washington, false);
        assert!((drawn - assets.ship_footprint()).abs() < 1e-3);
    }
}
