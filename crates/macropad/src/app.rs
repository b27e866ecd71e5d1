//! Command execution: wires the configuration, OS backends and engine
//! components together for each subcommand.

use crate::{AppError, AppResult, Command, config::Config};

use macropad_core::{
    ArmedMacroStore, CoreResult, GlobalInputHook, HookInterest, HookListener, InputInjector,
    KeySymbolCatalog, MacroDocument, MacroLibrary, MacroPlayer, PlaybackRequest, PlaybackScheduler,
    Recorder, SubscriptionId, TaskScheduler, TriggerRegistry,
};

use std::{panic::Location, path::PathBuf, sync::Arc};

use error_location::ErrorLocation;
use tokio::{runtime::Handle, sync::oneshot};
use tracing::{info, instrument, warn};

/// Hook for one-shot commands: accepts subscriptions and never delivers.
pub(crate) struct InertHook;

impl GlobalInputHook for InertHook {
    fn subscribe(
        &self,
        _interest: HookInterest,
        _listener: Arc<dyn HookListener>,
    ) -> CoreResult<SubscriptionId> {
        Ok(SubscriptionId(0))
    }

    fn unsubscribe(&self, _id: SubscriptionId) -> CoreResult<()> {
        Ok(())
    }
}

/// Armed state of one macro in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MacroListing {
    pub(crate) name: String,
    pub(crate) armed: bool,
}

/// Application state shared by every subcommand.
pub struct App {
    pub(crate) config: Config,
    pub(crate) catalog: Arc<KeySymbolCatalog>,
    pub(crate) library: MacroLibrary,
    pub(crate) hook: Arc<dyn GlobalInputHook>,
    pub(crate) injector: Arc<dyn InputInjector>,
}

impl App {
    /// Build the application around the given OS backends.
    pub fn new(
        config: Config,
        catalog: Arc<KeySymbolCatalog>,
        hook: Arc<dyn GlobalInputHook>,
        injector: Arc<dyn InputInjector>,
    ) -> Self {
        let library = MacroLibrary::new(config.macros.directory.clone());

        Self {
            config,
            catalog,
            library,
            hook,
            injector,
        }
    }

    /// Run one subcommand to completion.
    #[instrument(skip(self))]
    pub async fn execute(&self, command: Command) -> AppResult<()> {
        match command {
            Command::Run => self.run().await,
            Command::Record { name } => self.record(&name).await,
            Command::Play { name, from } => self.play(&name, from).await,
            Command::Type { text } => self.type_text(text).await,
            Command::Arm { name } => {
                let path = self.arm(&name)?;
                println!("armed {}", path.display());
                Ok(())
            }
            Command::Disarm { name } => {
                self.disarm(&name);
                println!("disarmed {}", name);
                Ok(())
            }
            Command::List => {
                for listing in self.list()? {
                    let marker = if listing.armed { '*' } else { ' ' };
                    println!("{} {}", marker, listing.name);
                }
                Ok(())
            }
            Command::Runnable { name, client_id } => {
                match self.runnable(&name, &client_id) {
                    Some(json) => println!("{}", json),
                    None => println!("not runnable"),
                }
                Ok(())
            }
        }
    }

    async fn run(&self) -> AppResult<()> {
        let scheduler: Arc<dyn PlaybackScheduler> =
            Arc::new(TaskScheduler::new(Handle::current(), Arc::new(self.player())));
        let registry = self.registry(Arc::clone(&self.hook), scheduler);

        info!(
            armed = registry.armed_paths().len(),
            "Listening for macro hotkeys, press Ctrl-C to exit"
        );

        tokio::signal::ctrl_c().await?;

        registry.shutdown();
        info!("Shutting down");

        Ok(())
    }

    async fn record(&self, name: &str) -> AppResult<()> {
        let recorder = Recorder::new(Arc::clone(&self.hook), Arc::clone(&self.catalog));
        let (events_tx, mut events_rx) = oneshot::channel();

        recorder.start(
            self.config.recording.settings(),
            Box::new(move |events| {
                let _ = events_tx.send(events);
            }),
        )?;

        info!(
            stop_keys = ?self.config.recording.stop_keys,
            "Recording, release the stop keys or press Ctrl-C to finish"
        );

        let finished = tokio::select! {
            events = &mut events_rx => Some(events),
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!(error = ?e, "Ctrl-C handler failed, stopping recording");
                }
                None
            }
        };

        let delivered = match finished {
            Some(delivered) => delivered,
            None => {
                recorder.stop(false);
                events_rx.await
            }
        };

        let events = delivered.map_err(|e| AppError::RecordingAborted {
            reason: format!("Recorder stopped without delivering events: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let path = self.library.save(name, &MacroDocument::new(events))?;
        println!("saved {}", path.display());

        Ok(())
    }

    async fn play(&self, name: &str, from: usize) -> AppResult<()> {
        let document = self.load(name)?;
        let player = self.player();

        tokio::task::spawn_blocking(move || player.play_from(&document, from))
            .await
            .map_err(|e| AppError::TaskFailed {
                reason: format!("Playback task panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        Ok(())
    }

    async fn type_text(&self, text: String) -> AppResult<()> {
        let player = self.player();

        tokio::task::spawn_blocking(move || player.type_text(&text))
            .await
            .map_err(|e| AppError::TaskFailed {
                reason: format!("Typing task panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        Ok(())
    }

    /// Arm `name` and return its file path.
    #[track_caller]
    pub(crate) fn arm(&self, name: &str) -> AppResult<PathBuf> {
        let document = self.load(name)?;
        let path = self.library.path_for(name);

        self.offline_registry().add_active_macro(&path, document);

        Ok(path)
    }

    pub(crate) fn disarm(&self, name: &str) {
        let registry = self.offline_registry();
        let path = self.library.path_for(name);

        if !registry.is_macro_active(&path) {
            warn!(macro_name = name, "Macro was not armed");
        }

        registry.remove_active_macro(&path);
    }

    #[track_caller]
    pub(crate) fn list(&self) -> AppResult<Vec<MacroListing>> {
        let registry = self.offline_registry();

        Ok(self
            .library
            .list()?
            .into_iter()
            .map(|name| {
                let armed = registry.is_macro_active(&self.library.path_for(&name));
                MacroListing { name, armed }
            })
            .collect())
    }

    pub(crate) fn runnable(&self, name: &str, client_id: &str) -> Option<String> {
        self.offline_registry().runnable_macro_json(name, client_id)
    }

    #[track_caller]
    fn load(&self, name: &str) -> AppResult<MacroDocument> {
        if !self.library.contains(name) {
            return Err(AppError::UnknownMacro {
                name: name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(self.library.load(name)?)
    }

    fn player(&self) -> MacroPlayer {
        MacroPlayer::new(
            Arc::clone(&self.injector),
            Arc::clone(&self.catalog),
            self.library.clone(),
            self.config.playback.options(),
        )
    }

    fn registry(
        &self,
        hook: Arc<dyn GlobalInputHook>,
        scheduler: Arc<dyn PlaybackScheduler>,
    ) -> TriggerRegistry {
        TriggerRegistry::new(
            hook,
            Arc::clone(&self.catalog),
            self.library.clone(),
            ArmedMacroStore::new(self.config.macros.armed_list.clone()),
            scheduler,
        )
    }

    /// Registry for editing the armed list without listening for hotkeys.
    fn offline_registry(&self) -> TriggerRegistry {
        self.registry(Arc::new(InertHook), Arc::new(NoPlayback))
    }
}

/// Scheduler for registries that never see hook events.
struct NoPlayback;

impl PlaybackScheduler for NoPlayback {
    fn schedule(&self, request: PlaybackRequest) {
        warn!(origin = ?request.origin, "Playback requested on an offline registry, ignoring");
    }
}
