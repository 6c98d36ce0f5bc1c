//! Per-frame simulation step
//!
//! Applies the commands gathered since the last frame, then advances the
//! ship, bullets and enemies by exactly one frame.

use super::input::PointerAction;
use super::state::{ScreenSize, SimState};

/// A mutation requested from outside the render thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    /// Classified pointer press
    Pointer(PointerAction),
    /// Host reported a new screen size
    Resize(ScreenSize),
    /// Spawn timer fired
    SpawnEnemy,
}

/// Everything a single frame consumes
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Screen size reported with this frame
    pub screen: Option<ScreenSize>,
    /// Commands in arrival order
    pub commands: Vec<SimCommand>,
}

/// Apply one command. Returns `false` if it had to be dropped.
pub fn apply_command(state: &mut SimState, command: SimCommand) -> bool {
    match command {
        SimCommand::Resize(screen) => {
            state.set_screen(screen);
            true
        }
        SimCommand::SpawnEnemy => state.spawn_enemy(),
        SimCommand::Pointer(action) => {
            let Some(ship) = state.ship.as_mut() else {
                log::debug!("Pointer {:?} dropped: ship not created yet", action);
                return false;
            };
            match action {
                PointerAction::MoveTo(dest) => ship.set_destination(dest),
                PointerAction::Fire => {
                    let from = ship.pos;
                    state.fire(from);
                }
            }
            true
        }
    }
}

/// Advance the simulation by one render frame
pub fn tick(state: &mut SimState, input: &FrameInput) {
    if let Some(screen) = input.screen {
        state.set_screen(screen);
    }
    state.ensure_scene();

    for &command in &input.commands {
        apply_command(state, command);
    }

    if let Some(ship) = state.ship.as_mut() {
        ship.step();
    }
    state.step_bullets();
    state.step_enemies();

    state.frame += 1;
}
