//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One `tick` per render frame, no wall-clock dependence
//! - Seeded RNG only
//! - No threads, rendering or platform dependencies

pub mod clock;
pub mod input;
pub mod state;
pub mod tick;
pub mod transform;

pub use clock::{FrameClock, Tick};
pub use input::{PointerAction, classify_pointer, fire_zone_top};
pub use state::{
    Bullet, Enemy, ScreenSize, Ship, SimSnapshot, SimState, SpriteSizes, enemy_spawn_x,
};
pub use tick::{FrameInput, SimCommand, apply_command, tick};
pub use transform::{Affine, EntityRef};
