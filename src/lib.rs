//! Pibble Asteroids - survive the asteroid field with a bag of silly weapons
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, weapons, collisions)
//! - `renderer`: Draw descriptors handed to an external renderer
//! - `settings`: Runtime settings for the headless runner
//! - `error`: Settings loading errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Entity caps - spawns past these are skipped for the frame
    pub const MAX_ASTEROIDS: usize = 150;
    pub const MAX_PROJECTILES: usize = 10_000;

    /// Asteroid spawn interval range (seconds)
    pub const SPAWN_INTERVAL_MIN: f32 = 0.5;
    pub const SPAWN_INTERVAL_MAX: f32 = 3.0;

    /// Ad break length (seconds) and the hp reward for sitting through it
    pub const AD_DURATION: f32 = 5.0;
    pub const AD_HP_BUFF: i32 = 20;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}
