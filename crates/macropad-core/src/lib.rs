//! Macropad Core Library
//!
//! Input automation engine: record keyboard and mouse input into JSON macro
//! documents, arm documents as global hotkeys, and replay them as synthetic
//! input. OS services sit behind the [`GlobalInputHook`] and
//! [`InputInjector`] traits.
//!
//! # Example
//!
//! ```no_run
//! use macropad_core::{
//!     CoreResult, InputInjector, KeySymbolCatalog, MacroDocument, MacroLibrary, MacroPlayer,
//!     PlaybackOptions,
//! };
//!
//! use std::sync::Arc;
//!
//! fn replay(injector: Arc<dyn InputInjector>) -> CoreResult<()> {
//!     let library = MacroLibrary::new("macros");
//!     let player = MacroPlayer::new(
//!         injector,
//!         Arc::new(KeySymbolCatalog::standard()),
//!         library.clone(),
//!         PlaybackOptions::default(),
//!     );
//!
//!     let document: MacroDocument = library.load("login")?;
//!     player.play(&document)
//! }
//! ```

mod atomic_write;
mod catalog;
mod error;
mod hook;
mod injector;
mod library;
mod model;
mod player;
mod recorder;
mod registry;

pub use {
    catalog::{HookCode, InjectorCode, KeySymbolCatalog},
    error::{MacroError, Result as CoreResult},
    hook::{GlobalInputHook, HookEvent, HookInterest, HookListener, MouseButton, SubscriptionId},
    injector::{Direction, InjectorSession, InputInjector},
    library::MacroLibrary,
    model::{
        KeyCommand, KeySymbol, MacroDocument, MacroEvent, MouseAction, ON_RELEASE, TriggerSpec,
    },
    player::{DEFAULT_ANIMATION_STEP_DELAY, DEFAULT_ANIMATION_STEPS, MacroPlayer, PlaybackOptions},
    recorder::{Recorder, RecordingComplete, RecordingLevel, RecordingSettings},
    registry::{
        ArmedMacroStore, PlaybackRequest, PlaybackScheduler, PressedKeySnapshot, TaskScheduler,
        TriggerRegistry,
    },
};

#[cfg(test)]
mod tests;
