//! Periodic enemy spawn task
//!
//! Runs on its own thread and only ever sends `SimCommand::SpawnEnemy` to the
//! render thread; it never touches simulation state itself.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::sim::SimCommand;

pub struct SpawnTimer {
    stop_tx: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl SpawnTimer {
    /// Start sending one spawn request per `interval` on `commands`.
    /// The timer ends on `stop`, on drop, or when the receiver goes away.
    pub fn start(interval: Duration, commands: mpsc::Sender<SimCommand>) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("sky-raid-spawn-timer".into())
            .spawn(move || run_timer(interval, &stop_rx, &commands))?;

        log::info!("Spawn timer started ({:?} interval)", interval);
        Ok(Self {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }

    /// Stop the timer and wait for its thread to exit
    pub fn stop(&mut self) {
        // Dropping the sender disconnects the stop channel
        self.stop_tx.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Spawn timer thread panicked");
            }
            log::info!("Spawn timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for SpawnTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_timer(
    interval: Duration,
    stop_rx: &mpsc::Receiver<()>,
    commands: &mpsc::Sender<SimCommand>,
) {
    loop {
        match stop_rx.recv_timeout(interval) {
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if commands.send(SimCommand::SpawnEnemy).is_err() {
                    log::debug!("Spawn timer exiting: game gone");
                    return;
                }
            }
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => return,
        }
    }
}
