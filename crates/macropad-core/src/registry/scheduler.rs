use crate::{model::MacroDocument, player::MacroPlayer};

use std::{path::PathBuf, sync::Arc};

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{error, info};
use uuid::Uuid;

/// A matched trigger's document, ready to play.
#[derive(Debug, Clone)]
pub struct PlaybackRequest {
    /// File the armed document came from.
    pub origin: PathBuf,
    /// Snapshot of the document at arming time.
    pub document: Arc<MacroDocument>,
}

/// Runs trigger-launched playbacks off the hook delivery thread.
///
/// `schedule` must return immediately. Playbacks are independent: no
/// ordering and no mutual exclusion between them.
pub trait PlaybackScheduler: Send + Sync {
    /// Queue one playback.
    fn schedule(&self, request: PlaybackRequest);
}

/// Scheduler running each playback as a blocking task on a tokio runtime.
pub struct TaskScheduler {
    runtime: Handle,
    player: Arc<MacroPlayer>,
}

impl TaskScheduler {
    /// Scheduler spawning onto `runtime`. Callable from threads outside it.
    pub fn new(runtime: Handle, player: Arc<MacroPlayer>) -> Self {
        Self { runtime, player }
    }

    /// Start a playback and return its task handle.
    ///
    /// Faults are logged inside the task; the handle only reports panics.
    pub fn spawn(&self, request: PlaybackRequest) -> JoinHandle<()> {
        let player = Arc::clone(&self.player);
        let playback_id = Uuid::new_v4();

        self.runtime.spawn_blocking(move || {
            info!(playback_id = %playback_id, origin = ?request.origin, "Triggered playback started");

            if let Err(e) = player.play(&request.document) {
                error!(
                    playback_id = %playback_id,
                    origin = ?request.origin,
                    error = ?e,
                    "Triggered playback failed"
                );
            }
        })
    }
}

impl PlaybackScheduler for TaskScheduler {
    fn schedule(&self, request: PlaybackRequest) {
        // Detached: the task owns everything it needs.
        drop(self.spawn(request));
    }
}
