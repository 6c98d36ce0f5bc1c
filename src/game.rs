//! Render-thread game object
//!
//! `Game` owns the simulation state, the engine and the render binder. Other
//! threads (input delivery, spawn timer) reach it only through a command
//! channel, drained once at the start of every frame.

use std::sync::mpsc;

use crate::Point;
use crate::error::GameError;
use crate::renderer::{AssetLoader, Engine, GameSprites, RenderBinder, SpriteCache, Viewport};
use crate::settings::Settings;
use crate::sim::{
    FrameClock, FrameInput, ScreenSize, SimCommand, SimSnapshot, SimState, Tick,
    classify_pointer, tick,
};
use crate::spawn_timer::SpawnTimer;

/// Number of frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Frame rate over the last `FPS_WINDOW` frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame at `time` seconds since launch
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest is the oldest once the window is full
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Cloneable, `Send` entry point for host input threads
#[derive(Debug, Clone)]
pub struct GameHandle {
    commands: mpsc::Sender<SimCommand>,
}

impl GameHandle {
    /// Classify a pointer press and queue it for the next frame.
    /// Returns `false` once the game has shut down.
    pub fn on_pointer_down(&self, loc: Point, screen: ScreenSize) -> bool {
        self.send(SimCommand::Pointer(classify_pointer(loc, screen)))
    }

    /// Queue a screen size change for the next frame
    pub fn on_resize(&self, screen: ScreenSize) -> bool {
        self.send(SimCommand::Resize(screen))
    }

    fn send(&self, command: SimCommand) -> bool {
        match self.commands.send(command) {
            Ok(()) => true,
            Err(mpsc::SendError(command)) => {
                log::debug!("Dropped {:?}: game shut down", command);
                false
            }
        }
    }
}

pub struct Game<E: Engine> {
    engine: E,
    state: SimState,
    binder: RenderBinder,
    clock: FrameClock,
    commands_tx: mpsc::Sender<SimCommand>,
    commands_rx: mpsc::Receiver<SimCommand>,
    spawn_timer: Option<SpawnTimer>,
    fps: FpsCounter,
    show_fps: bool,
    last_fps_second: u64,
}

impl<E: Engine> Game<E> {
    /// Load all sprites and start the spawn timer. Asset or upload failures
    /// abort startup.
    ///
    /// A `spawn_interval_ms` of 0 disables the spawn timer.
    pub fn new(
        mut engine: E,
        loader: &mut impl AssetLoader,
        settings: &Settings,
    ) -> Result<Self, GameError> {
        let mut cache = SpriteCache::new();
        let sprites = GameSprites::load(&settings.sprites, &mut cache, loader, &mut engine)?;

        let state = SimState::new(settings.seed, sprites.sizes(), settings.initial_enemy_burst);
        let binder = RenderBinder::new(&mut engine, sprites);

        let (commands_tx, commands_rx) = mpsc::channel();
        let spawn_timer = if settings.spawn_interval_ms > 0 {
            Some(SpawnTimer::start(settings.spawn_interval(), commands_tx.clone())?)
        } else {
            log::info!("Spawn timer disabled");
            None
        };

        Ok(Self {
            engine,
            state,
            binder,
            clock: FrameClock::new(),
            commands_tx,
            commands_rx,
            spawn_timer,
            fps: FpsCounter::default(),
            show_fps: settings.show_fps,
            last_fps_second: 0,
        })
    }

    /// Handle for input threads
    pub fn handle(&self) -> GameHandle {
        GameHandle {
            commands: self.commands_tx.clone(),
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn binder(&self) -> &RenderBinder {
        &self.binder
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Step and render one frame at the current clock tick
    pub fn run_frame(&mut self, screen: ScreenSize) {
        let now = self.clock.now();
        self.on_frame(now, screen);
    }

    /// Step and render one frame: drain commands, advance the simulation,
    /// push transforms, render.
    pub fn on_frame(&mut self, now: Tick, screen: ScreenSize) {
        let input = FrameInput {
            screen: Some(screen),
            commands: self.commands_rx.try_iter().collect(),
        };
        tick(&mut self.state, &input);

        self.binder
            .render_frame(&mut self.engine, &self.state, now, Viewport { screen });

        self.fps.record(self.clock.elapsed().as_secs_f64());
        let second = now.0 / crate::consts::TICKS_PER_SECOND;
        if self.show_fps && second > self.last_fps_second {
            self.last_fps_second = second;
            log::info!(
                "FPS: {} (bullets: {}, enemies: {})",
                self.fps.fps(),
                self.state.bullets.len(),
                self.state.enemies.len()
            );
        }
    }

    /// Stop the spawn timer and stop accepting input
    pub fn shutdown(mut self) -> SimSnapshot {
        if let Some(mut timer) = self.spawn_timer.take() {
            timer.stop();
        }
        log::info!("Game stopped after {} frames", self.state.frame);
        self.state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{MemoryAssetLoader, RecordingEngine};
    use std::time::{Duration, Instant};

    const SCREEN: ScreenSize = ScreenSize::new(640.0, 480.0);

    fn loader() -> MemoryAssetLoader {
        MemoryAssetLoader::new()
            .with_blank("player_ship.png", 48, 48)
            .with_blank("bullet.png", 16, 32)
            .with_blank("enemy.png", 64, 64)
    }

    fn quiet_settings() -> Settings {
        Settings {
            spawn_interval_ms: 0,
            show_fps: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_sprite_aborts_startup() {
        let mut loader = MemoryAssetLoader::new().with_blank("player_ship.png", 48, 48);
        let result = Game::new(RecordingEngine::new(), &mut loader, &quiet_settings());
        assert!(matches!(result, Err(GameError::AssetNotFound(_))));
    }

    #[test]
    fn test_first_frame_builds_scene() {
        let mut game = Game::new(RecordingEngine::new(), &mut loader(), &quiet_settings()).unwrap();
        game.on_frame(Tick(0), SCREEN);

        assert!(game.state().ship.is_some());
        assert_eq!(game.state().enemies.len(), INITIAL_ENEMY_BURST as usize);
        assert_eq!(game.engine().render_count(), 1);
        assert_eq!(game.engine().texture_count(), 3);
        // root + ship + burst
        assert_eq!(game.engine().node_count(), 2 + INITIAL_ENEMY_BURST as usize);
    }

    #[test]
    fn test_input_from_other_thread_visible_next_frame() {
        let mut game = Game::new(RecordingEngine::new(), &mut loader(), &quiet_settings()).unwrap();
        game.on_frame(Tick(0), SCREEN);
        let ship_pos = game.state().ship.as_ref().unwrap().pos;

        let handle = game.handle();
        std::thread::spawn(move || {
            assert!(handle.on_pointer_down(Point::new(10.0, 470.0), SCREEN));
            assert!(handle.on_pointer_down(Point::new(100.0, 100.0), SCREEN));
        })
        .join()
        .unwrap();

        game.on_frame(Tick(1), SCREEN);

        let state = game.state();
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, ship_pos.x);
        let ship = state.ship.as_ref().unwrap();
        assert_eq!(ship.destination, Some(Point::new(100.0, 100.0)));
        assert_eq!(ship.pos, ship_pos + Point::new(-SHIP_STEP, -SHIP_STEP));
        assert_eq!(game.binder().bullet_nodes().len(), 1);
    }

    #[test]
    fn test_resize_via_handle() {
        let mut game = Game::new(RecordingEngine::new(), &mut loader(), &quiet_settings()).unwrap();
        let small = ScreenSize::new(320.0, 240.0);
        game.on_frame(Tick(0), SCREEN);
        assert!(game.handle().on_resize(small));
        game.on_frame(Tick(1), SCREEN);
        // Frame-reported size is applied first, the queued resize after it
        assert_eq!(game.state().screen, Some(small));
    }

    #[test]
    fn test_spawn_timer_feeds_frames() {
        let settings = Settings {
            spawn_interval_ms: 5,
            initial_enemy_burst: 0,
            show_fps: false,
            ..Default::default()
        };
        let mut game = Game::new(RecordingEngine::new(), &mut loader(), &settings).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while game.state().enemies.len() < 2 && Instant::now() < deadline {
            game.run_frame(SCREEN);
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(game.state().enemies.len() >= 2);
        for enemy in &game.state().enemies {
            assert!(enemy.spawn.x >= 0.0 && enemy.spawn.x <= 576.0);
        }
        game.shutdown();
    }

    #[test]
    fn test_shutdown_stops_input() {
        let mut game = Game::new(RecordingEngine::new(), &mut loader(), &quiet_settings()).unwrap();
        game.on_frame(Tick(0), SCREEN);
        let handle = game.handle();

        let snapshot = game.shutdown();
        assert_eq!(snapshot.frame, 1);
        assert!(!handle.on_pointer_down(Point::new(1.0, 1.0), SCREEN));
        assert!(!handle.on_resize(SCREEN));
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
