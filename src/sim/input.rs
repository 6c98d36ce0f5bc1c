//! Pointer input classification
//!
//! The bottom 1/8 of the screen fires; anywhere else steers the ship.

use super::state::ScreenSize;
use crate::Point;
use crate::consts::FIRE_ZONE_DIVISOR;

/// What a pointer press asks the ship to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Set the ship's destination to this point
    MoveTo(Point),
    /// Shoot from the ship's current position
    Fire,
}

/// Top edge of the fire zone. Points strictly below it (greater `y`) fire.
#[inline]
pub fn fire_zone_top(screen: ScreenSize) -> f32 {
    screen.height - screen.height / FIRE_ZONE_DIVISOR
}

/// Classify a single pointer press by screen region
pub fn classify_pointer(loc: Point, screen: ScreenSize) -> PointerAction {
    if loc.y > fire_zone_top(screen) {
        PointerAction::Fire
    } else {
        PointerAction::MoveTo(loc)
    }
}
