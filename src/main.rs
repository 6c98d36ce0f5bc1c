//! Sky Raid headless driver
//!
//! Runs the simulation against the recording engine for a few seconds with a
//! scripted input thread, then prints the final state as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::time::{Duration, Instant};

    use sky_raid::renderer::{FileAssetLoader, RecordingEngine};
    use sky_raid::sim::ScreenSize;
    use sky_raid::{Game, GameHandle, Point, Settings};

    /// One frame at 60 Hz
    const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / 60);
    /// Length of the headless run
    const RUN_TIME: Duration = Duration::from_secs(6);
    const SCREEN: ScreenSize = ScreenSize::new(640.0, 480.0);

    pub fn run() -> i32 {
        env_logger::init();
        log::info!("Sky Raid (headless) starting...");

        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(Path::new(&path)),
            None => Settings::default(),
        };

        let mut loader = FileAssetLoader::new(&settings.asset_dir);
        let mut game = match Game::new(RecordingEngine::new(), &mut loader, &settings) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Startup failed: {}", e);
                return 1;
            }
        };

        let handle = game.handle();
        let input = match std::thread::Builder::new()
            .name("sky-raid-input".into())
            .spawn(move || scripted_input(&handle))
        {
            Ok(thread) => thread,
            Err(e) => {
                log::error!("Failed to spawn input thread: {}", e);
                return 1;
            }
        };

        let start = Instant::now();
        let mut next_frame = start;
        while start.elapsed() < RUN_TIME {
            game.run_frame(SCREEN);

            next_frame += FRAME_DURATION;
            let now = Instant::now();
            if next_frame > now {
                std::thread::sleep(next_frame - now);
            } else if now - next_frame > FRAME_DURATION * 2 {
                // Too far behind - reset to avoid catch-up spiral
                next_frame = now;
            }
        }

        log::info!(
            "Rendered {} frames, {} scene nodes",
            game.engine().render_count(),
            game.engine().node_count()
        );
        let snapshot = game.shutdown();
        if input.join().is_err() {
            log::warn!("Input thread panicked");
        }

        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                log::error!("Failed to serialize snapshot: {}", e);
                1
            }
        }
    }

    /// Stand-in for a touch screen: steer, shoot a burst, steer again
    fn scripted_input(handle: &GameHandle) {
        let script: [(u64, Point); 8] = [
            (300, Point::new(120.0, 300.0)),
            (1500, Point::new(120.0, 470.0)),
            (100, Point::new(300.0, 470.0)),
            (100, Point::new(500.0, 475.0)),
            (500, Point::new(520.0, 200.0)),
            (1500, Point::new(10.0, 479.0)),
            (100, Point::new(10.0, 479.0)),
            (100, Point::new(320.0, 360.0)),
        ];

        for (delay_ms, loc) in script {
            std::thread::sleep(Duration::from_millis(delay_ms));
            if !handle.on_pointer_down(loc, SCREEN) {
                log::info!("Input closed, stopping script");
                return;
            }
            log::debug!("Pointer down at ({}, {})", loc.x, loc.y);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    std::process::exit(native::run());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless driver is native-only
}
