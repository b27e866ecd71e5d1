use crate::{
    catalog::{HookCode, KeySymbolCatalog},
    hook::{GlobalInputHook, HookEvent, HookInterest, HookListener, SubscriptionId},
    library::MacroLibrary,
    model::{MacroDocument, TriggerSpec},
    registry::{ArmedMacroStore, PlaybackRequest, PlaybackScheduler},
};

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, Weak},
};

use tracing::{debug, error, info, instrument, warn};

/// Key codes held at one instant, copied out of the live pressed-key set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressedKeySnapshot(HashSet<HookCode>);

impl PressedKeySnapshot {
    /// Snapshot of exactly `codes`.
    pub fn new(codes: impl IntoIterator<Item = HookCode>) -> Self {
        Self(codes.into_iter().collect())
    }

    /// Whether `code` was held.
    pub fn contains(&self, code: HookCode) -> bool {
        self.0.contains(&code)
    }
}

/// The armed-macro set: global hotkey matching, persistence of what is
/// armed, and the authorization check for remote clients.
pub struct TriggerRegistry {
    hook: Arc<dyn GlobalInputHook>,
    shared: Arc<RegistryShared>,
    subscription: Mutex<Option<SubscriptionId>>,
}

struct RegistryShared {
    catalog: Arc<KeySymbolCatalog>,
    library: MacroLibrary,
    store: ArmedMacroStore,
    scheduler: Arc<dyn PlaybackScheduler>,
    armed: Mutex<BTreeMap<PathBuf, Arc<MacroDocument>>>,
    pressed: Mutex<HashSet<HookCode>>,
    /// Held across "mutate armed set, snapshot, save" so the store always
    /// ends up with the latest set.
    write_through: Mutex<()>,
}

struct TriggerListener {
    shared: Weak<RegistryShared>,
}

impl TriggerRegistry {
    /// Subscribe to the hook and re-arm every macro in the persisted list.
    ///
    /// A hook failure is logged and the registry keeps working without
    /// hotkeys. Listed files that are missing or unparseable are dropped.
    #[instrument(skip_all, fields(store = ?store.path()))]
    pub fn new(
        hook: Arc<dyn GlobalInputHook>,
        catalog: Arc<KeySymbolCatalog>,
        library: MacroLibrary,
        store: ArmedMacroStore,
        scheduler: Arc<dyn PlaybackScheduler>,
    ) -> Self {
        let shared = Arc::new(RegistryShared {
            catalog,
            library,
            store,
            scheduler,
            armed: Mutex::new(BTreeMap::new()),
            pressed: Mutex::new(HashSet::new()),
            write_through: Mutex::new(()),
        });

        let listener = Arc::new(TriggerListener {
            shared: Arc::downgrade(&shared),
        });

        let subscription = match hook.subscribe(HookInterest::ALL, listener) {
            Ok(id) => Some(id),
            Err(e) => {
                error!(error = ?e, "Failed to subscribe trigger registry, hotkeys disabled");
                None
            }
        };

        shared.load_persisted();

        Self {
            hook,
            shared,
            subscription: Mutex::new(subscription),
        }
    }

    /// Arm `document` under its file path and persist the armed list.
    #[instrument(skip(self, document))]
    pub fn add_active_macro(&self, path: &Path, document: MacroDocument) {
        let key = absolute(path);
        let _write = self.shared.lock_write_through();
        self.shared.lock_armed().insert(key.clone(), Arc::new(document));
        info!(path = ?key, "Macro armed");
        self.shared.persist();
    }

    /// Disarm the macro backed by `path` and persist the armed list.
    #[instrument(skip(self))]
    pub fn remove_active_macro(&self, path: &Path) {
        let key = absolute(path);
        let _write = self.shared.lock_write_through();
        if self.shared.lock_armed().remove(&key).is_some() {
            info!(path = ?key, "Macro disarmed");
        }
        self.shared.persist();
    }

    /// Whether the macro backed by `path` is armed.
    pub fn is_macro_active(&self, path: &Path) -> bool {
        self.shared.lock_armed().contains_key(&absolute(path))
    }

    /// Paths of every armed macro, sorted.
    pub fn armed_paths(&self) -> Vec<PathBuf> {
        self.shared.lock_armed().keys().cloned().collect()
    }

    /// JSON of the armed macro `macro_name`, if `client_id` may run it.
    ///
    /// `None` when the macro is not armed or the client is not in a
    /// non-empty `allowed_clients` list. A macro without a trigger has no
    /// client restriction.
    #[instrument(skip(self))]
    pub fn runnable_macro_json(&self, macro_name: &str, client_id: &str) -> Option<String> {
        let key = absolute(&self.shared.library.path_for(macro_name));
        let document = self.shared.lock_armed().get(&key).cloned();

        let Some(document) = document else {
            debug!("Macro is not armed");
            return None;
        };

        let permitted = document
            .trigger
            .as_ref()
            .is_none_or(|trigger| trigger.permits(client_id));

        if !permitted {
            warn!("Client is not authorized to run macro");
            return None;
        }

        match document.to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                error!(error = ?e, "Failed to serialize armed macro");
                None
            }
        }
    }

    /// Unsubscribe from the hook. Errors are logged, never returned.
    pub fn shutdown(&self) {
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(id) = subscription {
            match self.hook.unsubscribe(id) {
                Ok(()) => info!("Trigger registry unsubscribed"),
                Err(e) => error!(error = ?e, "Failed to unsubscribe trigger registry"),
            }
        }
    }
}

impl Drop for TriggerRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl RegistryShared {
    fn lock_armed(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Arc<MacroDocument>>> {
        self.armed.lock().unwrap_or_else(|e| {
            error!("Armed macro lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }

    fn lock_pressed(&self) -> MutexGuard<'_, HashSet<HookCode>> {
        self.pressed.lock().unwrap_or_else(|e| {
            error!("Pressed key lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }

    fn lock_write_through(&self) -> MutexGuard<'_, ()> {
        self.write_through.lock().unwrap_or_else(|e| {
            error!("Armed list write lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }

    fn load_persisted(&self) {
        let paths = match self.store.load() {
            Ok(paths) => paths,
            Err(e) => {
                error!(error = ?e, "Failed to load armed macro list");
                return;
            }
        };

        let mut armed = self.lock_armed();
        for path in paths {
            if !path.is_file() {
                debug!(path = ?path, "Armed macro file no longer exists, dropping");
                continue;
            }

            match MacroDocument::from_path(&path) {
                Ok(document) => {
                    armed.insert(path, Arc::new(document));
                }
                Err(e) => warn!(path = ?path, error = ?e, "Dropping unreadable armed macro"),
            }
        }

        info!(count = armed.len(), "Armed macros loaded");
    }

    /// Callers hold the write-through lock.
    fn persist(&self) {
        let paths: Vec<PathBuf> = self.lock_armed().keys().cloned().collect();

        if let Err(e) = self.store.save(&paths) {
            error!(error = ?e, "Failed to persist armed macro list");
        }
    }

    fn handle(&self, event: &HookEvent) {
        match *event {
            HookEvent::KeyPressed(code) => {
                self.lock_pressed().insert(code);
            }
            HookEvent::KeyReleased(code) => {
                let snapshot = {
                    let mut pressed = self.lock_pressed();
                    let snapshot = PressedKeySnapshot::new(pressed.iter().copied());
                    pressed.remove(&code);
                    snapshot
                };
                self.dispatch_matches(code, &snapshot);
            }
            HookEvent::MousePressed(_)
            | HookEvent::MouseReleased(_)
            | HookEvent::MouseMoved { .. } => {}
        }
    }

    fn dispatch_matches(&self, released: HookCode, snapshot: &PressedKeySnapshot) {
        let matched: Vec<PlaybackRequest> = self
            .lock_armed()
            .iter()
            .filter(|(_, document)| {
                document
                    .trigger
                    .as_ref()
                    .is_some_and(|trigger| trigger_fires(&self.catalog, trigger, released, snapshot))
            })
            .map(|(origin, document)| PlaybackRequest {
                origin: origin.clone(),
                document: Arc::clone(document),
            })
            .collect();

        for request in matched {
            info!(origin = ?request.origin, "Trigger matched, scheduling playback");
            self.scheduler.schedule(request);
        }
    }
}

/// A trigger fires when the released key is one of its keys and every other
/// key was held just before the release. Generic CTRL/SHIFT/ALT are satisfied
/// by either physical side. Unknown key names are skipped with a warning.
pub(crate) fn trigger_fires(
    catalog: &KeySymbolCatalog,
    trigger: &TriggerSpec,
    released: HookCode,
    snapshot: &PressedKeySnapshot,
) -> bool {
    let resolved: Vec<_> = trigger
        .keys()
        .iter()
        .filter_map(|key| match catalog.hook_code(key) {
            Ok(code) => Some((key, code)),
            Err(e) => {
                warn!(error = %e, "Ignoring unknown trigger key");
                None
            }
        })
        .collect();

    if !resolved.iter().any(|&(_, code)| code == released) {
        return false;
    }

    resolved
        .iter()
        .filter(|&&(_, code)| code != released)
        .all(|&(key, code)| match catalog.modifier_sides(key) {
            Some(sides) => sides.iter().any(|&side| snapshot.contains(side)),
            None => snapshot.contains(code),
        })
}

impl HookListener for TriggerListener {
    fn on_event(&self, event: &HookEvent) {
        if let Some(shared) = self.shared.upgrade() {
            shared.handle(event);
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
