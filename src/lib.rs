//! Sky Raid - a pointer-driven vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (ship, bullets, enemies, input classification)
//! - `renderer`: Engine/asset contracts and the per-frame render binder
//! - `game`: Render-thread game object and the cross-thread command handle
//! - `spawn_timer`: Periodic enemy spawn task
//! - `settings`: Spawn policy and asset configuration

pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod spawn_timer;

pub use error::GameError;
pub use game::{Game, GameHandle};
pub use settings::Settings;

/// All positions and destinations, in device-independent screen units.
/// `y` grows toward the bottom of the screen.
pub type Point = glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Animation ticks per second of wall-clock time
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Ship movement per axis per frame
    pub const SHIP_STEP: f32 = 1.2;

    /// Bullet spawn correction above the ship center (nose of the sprite)
    pub const MUZZLE_OFFSET_Y: f32 = 20.0;
    /// Bullet movement per frame (upward)
    pub const BULLET_SPEED: f32 = 3.0;
    /// Bullet sprite is drawn at 1/BULLET_SCALE of its image size
    pub const BULLET_SCALE: f32 = 4.0;

    /// Time between timer-driven enemy spawns
    pub const SPAWN_INTERVAL: Duration = Duration::from_secs(2);
    /// Enemies spawned on the first frame, before the timer contributes
    pub const INITIAL_ENEMY_BURST: u32 = 5;
    /// Spawn height of new enemies
    pub const TOP_MARGIN: f32 = 20.0;
    /// Enemy movement per frame (downward)
    pub const ENEMY_SPEED: f32 = 0.7;
    /// Enemy sprite is drawn at 1/ENEMY_SCALE of its image size
    pub const ENEMY_SCALE: f32 = 4.0;

    /// Bottom 1/FIRE_ZONE_DIVISOR of the screen is the fire zone
    pub const FIRE_ZONE_DIVISOR: f32 = 8.0;
}
