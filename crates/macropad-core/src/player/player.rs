use crate::{
    CoreResult, MacroError,
    catalog::KeySymbolCatalog,
    injector::{Direction, InjectorSession, InputInjector},
    library::MacroLibrary,
    model::{KeyCommand, KeySymbol, MacroDocument, MacroEvent, MouseAction},
    player::{PlaybackOptions, typing::key_stroke_for},
};

use std::{collections::BTreeSet, panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Names of the macros entered during one playback, used to stop
/// `run_macro` recursion.
type CallStack = BTreeSet<String>;

/// Interprets macro documents against the synthetic input injector.
///
/// Blocking: run it on a background thread, never on the hook delivery
/// thread or a UI thread.
pub struct MacroPlayer {
    injector: Arc<dyn InputInjector>,
    catalog: Arc<KeySymbolCatalog>,
    library: MacroLibrary,
    options: PlaybackOptions,
}

impl MacroPlayer {
    /// Create a player that resolves `run_macro` names inside `library`.
    pub fn new(
        injector: Arc<dyn InputInjector>,
        catalog: Arc<KeySymbolCatalog>,
        library: MacroLibrary,
        options: PlaybackOptions,
    ) -> Self {
        Self {
            injector,
            catalog,
            library,
            options,
        }
    }

    /// Play a whole document in a fresh injector session.
    ///
    /// # Errors
    ///
    /// Only `PlaybackFault`, when the injector itself fails. Unknown keys,
    /// missing sub-macros and cycles are logged and skipped.
    pub fn play(&self, document: &MacroDocument) -> CoreResult<()> {
        self.play_from(document, 0)
    }

    /// Play a document starting at `start_index` with an empty call stack.
    #[instrument(skip(self, document), fields(events = document.events.len()))]
    pub fn play_from(&self, document: &MacroDocument, start_index: usize) -> CoreResult<()> {
        let mut session = self.open_session()?;

        let result = self.play_sequence(session.as_mut(), document, start_index, &CallStack::new());

        match &result {
            Ok(()) => info!("Playback complete"),
            Err(e) => error!(error = ?e, "Playback aborted"),
        }

        result
    }

    /// Type `text` as key strokes, wrapping Shift around characters that
    /// need it. Characters the layout cannot produce are skipped.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn type_text(&self, text: &str) -> CoreResult<()> {
        let mut session = self.open_session()?;
        let shift = self.catalog.injector_code(&KeySymbol::new("SHIFT"))?;

        for c in text.chars() {
            let Some(stroke) = key_stroke_for(c, &self.catalog) else {
                continue;
            };
            let Ok(code) = self.catalog.injector_code(&stroke.key) else {
                continue;
            };

            if stroke.shift {
                session.key(shift, Direction::Press)?;
            }

            session.key(code, Direction::Press)?;
            session.key(code, Direction::Release)?;

            if stroke.shift {
                session.key(shift, Direction::Release)?;
            }
        }

        debug!("Text typed");

        Ok(())
    }

    fn open_session(&self) -> CoreResult<Box<dyn InjectorSession>> {
        let mut session = self.injector.open_session()?;
        session.set_auto_delay(self.options.baseline_delay);
        Ok(session)
    }

    fn play_sequence(
        &self,
        session: &mut dyn InjectorSession,
        document: &MacroDocument,
        start_index: usize,
        call_stack: &CallStack,
    ) -> CoreResult<()> {
        for event in document.events.iter().skip(start_index) {
            match event {
                MacroEvent::Key { command, key } => {
                    let code = match self.catalog.injector_code(key) {
                        Ok(code) => code,
                        Err(e) => {
                            warn!(error = %e, "Skipping key event");
                            continue;
                        }
                    };

                    let direction = match command {
                        KeyCommand::Press => Direction::Press,
                        KeyCommand::Release => Direction::Release,
                    };
                    session.key(code, direction)?;
                }
                MacroEvent::Mouse(action) => self.play_mouse(session, *action)?,
                MacroEvent::RunMacro { macro_name } => {
                    self.run_sub_macro(session, macro_name, call_stack)?;
                }
                MacroEvent::SetAutoWait { value_ms } => {
                    debug!(value_ms, "Auto-wait changed");
                    session.set_auto_delay(Duration::from_millis(*value_ms));
                }
            }
        }

        Ok(())
    }

    fn play_mouse(&self, session: &mut dyn InjectorSession, action: MouseAction) -> CoreResult<()> {
        match action {
            MouseAction::Press => session.mouse_button(Direction::Press),
            MouseAction::Release => session.mouse_button(Direction::Release),
            MouseAction::Click => {
                session.mouse_button(Direction::Press)?;
                session.mouse_button(Direction::Release)
            }
            MouseAction::SnapTo { x, y } | MouseAction::Drag { x, y } => session.move_to(x, y),
            MouseAction::AnimateTo { x, y } => self.animate_to(session, x, y),
        }
    }

    /// Glide the pointer in equal linear steps; the last step lands exactly
    /// on the target.
    fn animate_to(&self, session: &mut dyn InjectorSession, x: i32, y: i32) -> CoreResult<()> {
        let (x0, y0) = session.pointer_position()?;
        let steps = i64::from(self.options.animation_steps.max(1));

        for step in 1..=steps {
            let cx = i64::from(x0) + (i64::from(x) - i64::from(x0)) * step / steps;
            let cy = i64::from(y0) + (i64::from(y) - i64::from(y0)) * step / steps;

            // Interpolated values always lie between two i32 endpoints.
            session.move_to(cx as i32, cy as i32)?;
            session.pause(self.options.animation_step_delay);
        }

        Ok(())
    }

    fn run_sub_macro(
        &self,
        session: &mut dyn InjectorSession,
        macro_name: &str,
        call_stack: &CallStack,
    ) -> CoreResult<()> {
        let canonical = MacroLibrary::canonical_name(macro_name);

        if call_stack.contains(canonical) {
            let cycle = MacroError::CycleDetected {
                macro_name: macro_name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
            warn!(error = %cycle, "Skipping recursive run_macro");
            return Ok(());
        }

        let sub_document = match self.library.load(macro_name) {
            Ok(document) => document,
            Err(e) => {
                warn!(macro_name, error = %e, "Skipping run_macro, macro could not be loaded");
                return Ok(());
            }
        };

        let mut nested = call_stack.clone();
        nested.insert(canonical.to_string());

        debug!(macro_name, depth = nested.len(), "Entering sub-macro");
        self.play_sequence(session, &sub_document, 0, &nested)
    }
}
