use clap::{Parser, Subcommand};

/// Record, arm and replay keyboard and mouse macros.
#[derive(Debug, Parser)]
#[command(name = "macropad")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Arm persisted macros and listen for their hotkeys until Ctrl-C
    Run,
    /// Record a new macro until the stop keys or Ctrl-C
    Record {
        /// Macro name, saved as <name>.json in the macro directory
        name: String,
    },
    /// Play a macro now
    Play {
        /// Macro name
        name: String,
        /// Index of the first event to play
        #[arg(long, default_value_t = 0)]
        from: usize,
    },
    /// Type literal text as key strokes
    Type {
        /// Text to type
        text: String,
    },
    /// Arm a macro's hotkey
    Arm {
        /// Macro name
        name: String,
    },
    /// Disarm a macro's hotkey
    Disarm {
        /// Macro name
        name: String,
    },
    /// List macros, marking armed ones with '*'
    List,
    /// Print an armed macro's JSON if the client may run it
    Runnable {
        /// Macro name
        name: String,
        /// Remote client identifier
        client_id: String,
    },
}
