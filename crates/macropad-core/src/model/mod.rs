//! Macro document schema shared by the recorder, trigger registry and player.

mod document;
mod event;
mod key_symbol;
mod trigger;

pub use {
    document::MacroDocument,
    event::{KeyCommand, MacroEvent, MouseAction},
    key_symbol::KeySymbol,
    trigger::{ON_RELEASE, TriggerSpec},
};
