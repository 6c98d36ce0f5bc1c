//! Simulation state and entity records
//!
//! One ship, plus append-only bullet and enemy collections. Entities are never
//! retired, even far off-screen.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::Point;
use crate::consts::*;

/// Screen dimensions in device-independent units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Image dimensions of the three sprites, fixed after startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteSizes {
    pub ship: Vec2,
    pub bullet: Vec2,
    pub enemy: Vec2,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ship {
    pub pos: Point,
    /// Where the ship is heading; `None` while holding still
    pub destination: Option<Point>,
    pub sprite_size: Vec2,
}

impl Ship {
    pub fn new(pos: Point, sprite_size: Vec2) -> Self {
        Self {
            pos,
            destination: None,
            sprite_size,
        }
    }

    /// Replace the destination (last write wins). Targeting the current
    /// position cancels any pending move.
    pub fn set_destination(&mut self, dest: Point) {
        self.destination = if dest == self.pos { None } else { Some(dest) };
    }

    /// Advance one frame toward the destination, each axis independently
    pub fn step(&mut self) {
        let Some(dest) = self.destination else {
            return;
        };

        self.pos.x = step_axis(self.pos.x, dest.x);
        self.pos.y = step_axis(self.pos.y, dest.y);

        if self.pos == dest {
            self.destination = None;
        }
    }
}

/// Move `current` by at most `SHIP_STEP` toward `target`, landing exactly on it
fn step_axis(current: f32, target: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= SHIP_STEP {
        target
    } else if delta > 0.0 {
        current + SHIP_STEP
    } else {
        current - SHIP_STEP
    }
}

/// A projectile travelling up the screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Point,
    pub sprite_size: Vec2,
}

impl Bullet {
    pub fn step(&mut self) {
        self.pos.y -= BULLET_SPEED;
    }
}

/// A descending enemy. Position is derived from the spawn point and the
/// number of frames lived so the descent never accumulates rounding error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    pub id: u32,
    pub spawn: Point,
    pub frames: u32,
    pub sprite_size: Vec2,
}

impl Enemy {
    pub fn new(id: u32, spawn: Point, sprite_size: Vec2) -> Self {
        Self {
            id,
            spawn,
            frames: 0,
            sprite_size,
        }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.spawn.x, self.spawn.y + self.frames as f32 * ENEMY_SPEED)
    }

    pub fn step(&mut self) {
        self.frames += 1;
    }
}

/// Random spawn column so the enemy sprite fits inside the screen
pub fn enemy_spawn_x(rng: &mut impl Rng, screen_width: f32, sprite_width: f32) -> f32 {
    let max_x = (screen_width - sprite_width).max(0.0);
    rng.random_range(0.0..=max_x)
}

/// Complete simulation state, owned by the render thread
#[derive(Debug, Clone)]
pub struct SimState {
    /// Last reported screen size; `None` until the host reports one
    pub screen: Option<ScreenSize>,
    pub sprites: SpriteSizes,
    /// Created on the first frame with a known screen size
    pub ship: Option<Ship>,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// Frames stepped so far
    pub frame: u64,
    /// Enemies spawned alongside the ship
    pub initial_burst: u32,
    rng: Pcg32,
    next_id: u32,
}

impl SimState {
    pub fn new(seed: u64, sprites: SpriteSizes, initial_burst: u32) -> Self {
        Self {
            screen: None,
            sprites,
            ship: None,
            bullets: Vec::new(),
            enemies: Vec::new(),
            frame: 0,
            initial_burst,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Record a host resize. Existing entity positions are left untouched.
    pub fn set_screen(&mut self, screen: ScreenSize) {
        self.screen = Some(screen);
    }

    /// First-frame scene setup: ship at the lower middle and the initial burst
    /// of enemies. No-op once the ship exists or while the screen is unknown.
    pub fn ensure_scene(&mut self) {
        if self.ship.is_some() {
            return;
        }
        let Some(screen) = self.screen else {
            return;
        };

        let start = Point::new(screen.width / 2.0, screen.height * 3.0 / 4.0);
        self.ship = Some(Ship::new(start, self.sprites.ship));
        log::info!("Ship created at ({}, {})", start.x, start.y);

        for _ in 0..self.initial_burst {
            self.spawn_enemy();
        }
        if self.initial_burst > 0 {
            log::info!("Spawned initial burst of {} enemies", self.initial_burst);
        }
    }

    /// Append a bullet at the muzzle of a ship centered on `from`.
    /// No rate limit: every call adds exactly one bullet.
    pub fn fire(&mut self, from: Point) {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos: Point::new(from.x, from.y - MUZZLE_OFFSET_Y),
            sprite_size: self.sprites.bullet,
        });
    }

    /// Move every bullet up by `BULLET_SPEED`
    pub fn step_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.step();
        }
    }

    /// Spawn one enemy at a random column along the top margin.
    /// Returns `false` if the screen size is not known yet.
    pub fn spawn_enemy(&mut self) -> bool {
        let Some(screen) = self.screen else {
            log::debug!("Enemy spawn dropped: screen size unknown");
            return false;
        };

        let sprite = self.sprites.enemy;
        let x = enemy_spawn_x(&mut self.rng, screen.width, sprite.x);
        let id = self.next_entity_id();
        self.enemies
            .push(Enemy::new(id, Point::new(x, TOP_MARGIN), sprite));
        true
    }

    /// Move every enemy down by `ENEMY_SPEED`
    pub fn step_enemies(&mut self) {
        for enemy in &mut self.enemies {
            enemy.step();
        }
    }

    /// Serializable summary for logging and debugging
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            frame: self.frame,
            screen: self.screen,
            ship: self.ship.clone(),
            bullets: self.bullets.iter().map(|b| b.pos).collect(),
            enemies: self.enemies.iter().map(Enemy::pos).collect(),
        }
    }
}

/// Point-in-time view of the simulation
#[derive(Debug, Clone, Serialize)]
pub struct SimSnapshot {
    pub frame: u64,
    pub screen: Option<ScreenSize>,
    pub ship: Option<Ship>,
    pub bullets: Vec<Point>,
    pub enemies: Vec<Point>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sprites() -> SpriteSizes {
        SpriteSizes {
            ship: Vec2::new(48.0, 48.0),
            bullet: Vec2::new(16.0, 32.0),
            enemy: Vec2::new(64.0, 64.0),
        }
    }

    fn state_with_screen() -> SimState {
        let mut state = SimState::new(12345, sprites(), 0);
        state.set_screen(ScreenSize::new(640.0, 480.0));
        state
    }

    #[test]
    fn test_ship_scenario_reaches_destination() {
        let mut ship = Ship::new(Point::new(320.0, 100.0), sprites().ship);
        ship.set_destination(Point::new(320.0, 300.0));

        for _ in 0..200 {
            ship.step();
        }

        assert_eq!(ship.pos, Point::new(320.0, 300.0));
        assert_eq!(ship.destination, None);
    }

    #[test]
    fn test_ship_set_destination_to_current_clears() {
        let mut ship = Ship::new(Point::new(50.0, 50.0), sprites().ship);
        ship.set_destination(Point::new(200.0, 10.0));
        assert!(ship.destination.is_some());

        ship.set_destination(Point::new(50.0, 50.0));
        assert_eq!(ship.destination, None);

        ship.step();
        assert_eq!(ship.pos, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_ship_moves_per_axis() {
        // Bang-bang per axis: both axes move a full step even when deltas differ
        let mut ship = Ship::new(Point::new(0.0, 0.0), sprites().ship);
        ship.set_destination(Point::new(10.0, -3.0));
        ship.step();
        assert_eq!(ship.pos, Point::new(SHIP_STEP, -SHIP_STEP));

        ship.step();
        ship.step();
        // y axis has arrived, x axis keeps going
        assert_eq!(ship.pos.y, -3.0);
        assert!(ship.pos.x < 10.0);
        assert!(ship.destination.is_some());
    }

    #[test]
    fn test_ship_without_destination_holds() {
        let mut ship = Ship::new(Point::new(7.0, 9.0), sprites().ship);
        for _ in 0..10 {
            ship.step();
        }
        assert_eq!(ship.pos, Point::new(7.0, 9.0));
    }

    #[test]
    fn test_fire_appends_at_muzzle() {
        let mut state = state_with_screen();
        let from = Point::new(100.0, 400.0);
        for _ in 0..5 {
            state.fire(from);
        }

        assert_eq!(state.bullets.len(), 5);
        for bullet in &state.bullets {
            assert_eq!(bullet.pos, Point::new(100.0, 400.0 - MUZZLE_OFFSET_Y));
            assert_eq!(bullet.sprite_size, sprites().bullet);
        }
    }

    #[test]
    fn test_bullets_never_removed() {
        let mut state = state_with_screen();
        state.fire(Point::new(10.0, 30.0));
        for _ in 0..1000 {
            state.step_bullets();
        }
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets[0].pos.y < -2900.0);
    }

    #[test]
    fn test_enemy_spawn_range() {
        let mut state = state_with_screen();
        for _ in 0..500 {
            assert!(state.spawn_enemy());
        }
        for enemy in &state.enemies {
            assert!(enemy.spawn.x >= 0.0 && enemy.spawn.x <= 576.0);
            assert_eq!(enemy.spawn.y, TOP_MARGIN);
        }
    }

    #[test]
    fn test_enemy_spawn_narrow_screen() {
        let mut state = SimState::new(1, sprites(), 0);
        state.set_screen(ScreenSize::new(32.0, 480.0));
        assert!(state.spawn_enemy());
        assert_eq!(state.enemies[0].spawn.x, 0.0);
    }

    #[test]
    fn test_enemy_spawn_without_screen_dropped() {
        let mut state = SimState::new(1, sprites(), 0);
        assert!(!state.spawn_enemy());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_enemy_descent_exact() {
        let mut enemy = Enemy::new(1, Point::new(33.3, TOP_MARGIN), sprites().enemy);
        for k in 0..2000u32 {
            assert_eq!(enemy.pos().y, TOP_MARGIN + k as f32 * ENEMY_SPEED);
            assert_eq!(enemy.pos().x, 33.3);
            enemy.step();
        }
    }

    #[test]
    fn test_ensure_scene_spawns_ship_and_burst() {
        let mut state = SimState::new(7, sprites(), INITIAL_ENEMY_BURST);
        state.ensure_scene();
        assert!(state.ship.is_none(), "no ship before the screen is known");

        state.set_screen(ScreenSize::new(640.0, 480.0));
        state.ensure_scene();
        let ship = state.ship.as_ref().unwrap();
        assert_eq!(ship.pos, Point::new(320.0, 360.0));
        assert_eq!(state.enemies.len(), INITIAL_ENEMY_BURST as usize);

        // Second call is a no-op
        state.ensure_scene();
        assert_eq!(state.enemies.len(), INITIAL_ENEMY_BURST as usize);
    }

    #[test]
    fn test_resize_keeps_positions() {
        let mut state = state_with_screen();
        state.spawn_enemy();
        let before = state.enemies[0].pos();
        state.set_screen(ScreenSize::new(100.0, 100.0));
        assert_eq!(state.enemies[0].pos(), before);
    }

    #[test]
    fn test_spawn_determinism() {
        let mut a = state_with_screen();
        let mut b = state_with_screen();
        for _ in 0..20 {
            a.spawn_enemy();
            b.spawn_enemy();
        }
        assert_eq!(a.enemies, b.enemies);
    }

    proptest! {
        #[test]
        fn prop_ship_converges(
            px in -200.0f32..200.0, py in -200.0f32..200.0,
            dx in -200.0f32..200.0, dy in -200.0f32..200.0,
        ) {
            let start = Point::new(px, py);
            let dest = Point::new(dx, dy);
            prop_assume!(start != dest);

            let mut ship = Ship::new(start, Vec2::ONE);
            ship.set_destination(dest);

            let delta = (dest - start).abs();
            let bound = delta.x.max(delta.y) / SHIP_STEP + 1.0;
            let mut steps = 0u32;
            while ship.pos != dest {
                prop_assert_eq!(ship.destination, Some(dest));
                ship.step();
                steps += 1;
                prop_assert!(steps as f32 <= bound + 1e-2, "took {} steps, bound {}", steps, bound);
            }
            prop_assert_eq!(ship.destination, None);
        }

        #[test]
        fn prop_step_bullets_moves_all_up(
            origins in proptest::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 0..40),
        ) {
            let mut state = state_with_screen();
            for &(x, y) in &origins {
                state.fire(Point::new(x, y));
            }
            let before: Vec<Point> = state.bullets.iter().map(|b| b.pos).collect();

            state.step_bullets();

            prop_assert_eq!(state.bullets.len(), origins.len());
            for (bullet, old) in state.bullets.iter().zip(&before) {
                prop_assert_eq!(bullet.pos.x, old.x);
                prop_assert_eq!(bullet.pos.y, old.y - BULLET_SPEED);
            }
        }
    }
}
