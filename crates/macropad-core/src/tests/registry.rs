use crate::{
    ArmedMacroStore, KeySymbol, MacroDocument, MacroEvent, MacroLibrary, PressedKeySnapshot,
    Recorder, RecordingComplete, RecordingLevel, RecordingSettings, TriggerRegistry, TriggerSpec,
    registry::trigger_fires,
    tests::support::{FakeHook, RecordingScheduler, catalog, hook_code},
};

use std::{
    fs,
    path::PathBuf,
    sync::{
        Arc,
        mpsc::{self, Receiver},
    },
    thread,
};

use tempfile::TempDir;

struct Fixture {
    hook: Arc<FakeHook>,
    scheduler: Arc<RecordingScheduler>,
    library: MacroLibrary,
    store_path: PathBuf,
    registry: TriggerRegistry,
    _dir: TempDir,
}

#[allow(clippy::unwrap_used)]
fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let hook = FakeHook::new();
    let scheduler = RecordingScheduler::new();
    let library = MacroLibrary::new(dir.path().join("Macros"));
    let store_path = dir.path().join("active_macros.json");
    let registry = registry_for(&hook, &scheduler, &library, &store_path);

    Fixture {
        hook,
        scheduler,
        library,
        store_path,
        registry,
        _dir: dir,
    }
}

fn registry_for(
    hook: &Arc<FakeHook>,
    scheduler: &Arc<RecordingScheduler>,
    library: &MacroLibrary,
    store_path: &std::path::Path,
) -> TriggerRegistry {
    TriggerRegistry::new(
        hook.clone(),
        catalog(),
        library.clone(),
        ArmedMacroStore::new(store_path),
        scheduler.clone(),
    )
}

#[allow(clippy::unwrap_used)]
fn triggered(keys: &[&str], clients: &[&str]) -> MacroDocument {
    MacroDocument {
        trigger: Some(TriggerSpec::new(keys.iter().copied(), clients.iter().copied()).unwrap()),
        events: vec![MacroEvent::key_press("A"), MacroEvent::key_release("A")],
    }
}

#[allow(clippy::unwrap_used)]
fn arm(fixture: &Fixture, name: &str, document: MacroDocument) -> PathBuf {
    let path = fixture.library.save(name, &document).unwrap();
    fixture.registry.add_active_macro(&path, document);
    path
}

/// WHAT: Releasing K while Ctrl and Shift are held fires Ctrl+Shift+K
/// WHY: Core hotkey behaviour
#[test]
fn given_ctrl_shift_k_trigger_when_releasing_k_with_modifiers_held_then_scheduled_once() {
    // Given
    let fixture = fixture();
    let path = arm(&fixture, "greet", triggered(&["CTRL", "SHIFT", "K"], &[]));

    // When
    fixture.hook.press("CTRL");
    fixture.hook.press("SHIFT");
    fixture.hook.press("K");
    fixture.hook.release("K");

    // Then
    let requests = fixture.scheduler.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].origin, path);
}

/// WHAT: Releasing a modifier first means the combination is no longer held
/// WHY: Partial combinations must never fire
#[test]
fn given_ctrl_shift_k_trigger_when_shift_released_before_k_then_nothing_scheduled() {
    // Given
    let fixture = fixture();
    arm(&fixture, "greet", triggered(&["CTRL", "SHIFT", "K"], &[]));

    // When
    fixture.hook.press("CTRL");
    fixture.hook.press("SHIFT");
    fixture.hook.press("K");
    fixture.hook.release("SHIFT");
    fixture.hook.release("K");

    // Then
    assert!(fixture.scheduler.requests().is_empty());
}

/// WHAT: The right-hand Ctrl satisfies a generic CTRL trigger key
/// WHY: Users press whichever side is closer
#[test]
fn given_ctrl_k_trigger_when_right_ctrl_held_then_fires() {
    // Given
    let fixture = fixture();
    arm(&fixture, "copy", triggered(&["CTRL", "K"], &[]));

    // When
    fixture.hook.press("RIGHT_CTRL");
    fixture.hook.tap("K");

    // Then
    assert_eq!(fixture.scheduler.requests().len(), 1);
}

/// WHAT: Released keys no longer count as held
/// WHY: Stale pressed state would fire triggers on a single key
#[test]
fn given_fired_trigger_when_tapping_last_key_alone_then_no_second_fire() {
    // Given
    let fixture = fixture();
    arm(&fixture, "copy", triggered(&["CTRL", "K"], &[]));
    fixture.hook.press("CTRL");
    fixture.hook.tap("K");
    fixture.hook.release("CTRL");

    // When
    fixture.hook.tap("K");

    // Then
    assert_eq!(fixture.scheduler.requests().len(), 1);
}

/// WHAT: Unknown trigger key names are ignored rather than blocking the trigger
/// WHY: One bad name should not disarm the rest of the combination
#[test]
fn given_trigger_with_unknown_key_when_rest_is_held_then_fires() {
    // Given
    let fixture = fixture();
    arm(&fixture, "odd", triggered(&["CTRL", "NOT_A_KEY", "K"], &[]));

    // When
    fixture.hook.press("CTRL");
    fixture.hook.tap("K");

    // Then
    assert_eq!(fixture.scheduler.requests().len(), 1);
}

/// WHAT: Documents without a trigger are armed but never hotkey-fired
/// WHY: They exist only for remote clients
#[test]
#[allow(clippy::unwrap_used)]
fn given_untriggered_macro_when_keys_pressed_then_never_scheduled_but_runnable() {
    // Given
    let fixture = fixture();
    arm(
        &fixture,
        "remote",
        MacroDocument::new(vec![MacroEvent::key_press("A")]),
    );

    // When
    fixture.hook.tap("A");

    // Then
    assert!(fixture.scheduler.requests().is_empty());
    let json = fixture.registry.runnable_macro_json("remote", "anyone").unwrap();
    assert_eq!(
        MacroDocument::from_json(&json).unwrap(),
        MacroDocument::new(vec![MacroEvent::key_press("A")])
    );
}

/// WHAT: allowed_clients restricts who may fetch an armed macro
/// WHY: Remote clients must be authorized per macro
#[test]
fn given_restricted_macro_when_clients_ask_then_only_listed_client_served() {
    // Given
    let fixture = fixture();
    arm(&fixture, "m", triggered(&["F5"], &["abc"]));

    // When
    let allowed = fixture.registry.runnable_macro_json("m", "abc");
    let with_extension = fixture.registry.runnable_macro_json("m.json", "abc");
    let denied = fixture.registry.runnable_macro_json("m", "xyz");
    let unknown = fixture.registry.runnable_macro_json("other", "abc");

    // Then
    assert!(allowed.is_some());
    assert!(with_extension.is_some());
    assert!(denied.is_none());
    assert!(unknown.is_none());
}

/// WHAT: The armed list survives a restart and drops deleted files
/// WHY: Arming is persistent but must tolerate files removed meanwhile
#[test]
#[allow(clippy::unwrap_used)]
fn given_persisted_list_when_restarting_then_existing_macros_rearmed_and_missing_dropped() {
    // Given: Three macros armed, one deleted and one corrupted afterwards
    let fixture = fixture();
    let kept = arm(&fixture, "kept", triggered(&["F1"], &[]));
    let deleted = arm(&fixture, "deleted", triggered(&["F2"], &[]));
    let corrupted = arm(&fixture, "corrupted", triggered(&["F3"], &[]));
    fs::remove_file(&deleted).unwrap();
    fs::write(&corrupted, "not json").unwrap();

    // When: A new registry loads the same store
    let hook = FakeHook::new();
    let scheduler = RecordingScheduler::new();
    let restarted = registry_for(&hook, &scheduler, &fixture.library, &fixture.store_path);

    // Then: Only the intact macro is armed, and its trigger works
    assert_eq!(restarted.armed_paths(), vec![kept.clone()]);
    assert!(restarted.is_macro_active(&kept));
    hook.tap("F1");
    assert_eq!(scheduler.requests().len(), 1);
}

/// WHAT: Disarming is persisted immediately
/// WHY: A crash after disarm must not resurrect the hotkey
#[test]
#[allow(clippy::unwrap_used)]
fn given_armed_macro_when_removed_then_store_no_longer_lists_it() {
    // Given
    let fixture = fixture();
    let path = arm(&fixture, "gone", triggered(&["F9"], &[]));
    assert!(fixture.registry.is_macro_active(&path));

    // When
    fixture.registry.remove_active_macro(&path);

    // Then
    assert!(!fixture.registry.is_macro_active(&path));
    let stored = ArmedMacroStore::new(&fixture.store_path).load().unwrap();
    assert!(stored.is_empty());
    fixture.hook.tap("F9");
    assert!(fixture.scheduler.requests().is_empty());
}

/// WHAT: Arming from several threads leaves the store equal to the armed set
/// WHY: Racing write-throughs must never lose entries or corrupt the list
#[test]
#[allow(clippy::unwrap_used)]
fn given_parallel_arms_when_reloading_store_then_every_macro_listed() {
    for _ in 0..20 {
        // Given
        let fixture = fixture();

        // When: Eight threads arm four macros each
        thread::scope(|scope| {
            for worker in 0..8 {
                let fixture = &fixture;
                scope.spawn(move || {
                    for n in 0..4 {
                        arm(fixture, &format!("m{worker}_{n}"), triggered(&["F1"], &[]));
                    }
                });
            }
        });

        // Then: The persisted list parses and matches memory
        let armed = fixture.registry.armed_paths();
        assert_eq!(armed.len(), 32);
        let mut stored = ArmedMacroStore::new(&fixture.store_path).load().unwrap();
        stored.sort();
        assert_eq!(stored, armed);
    }
}

/// WHAT: Arming and disarming in parallel persists the final set
/// WHY: An older snapshot must never overwrite a newer one
#[test]
#[allow(clippy::unwrap_used)]
fn given_parallel_arm_and_disarm_when_reloading_store_then_matches_memory() {
    // Given: Half the macros armed up front
    let fixture = fixture();
    let doomed: Vec<PathBuf> = (0..8)
        .map(|n| arm(&fixture, &format!("old{n}"), triggered(&["F2"], &[])))
        .collect();

    // When: Disarm the old ones while arming new ones
    thread::scope(|scope| {
        for (n, path) in doomed.iter().enumerate() {
            let fixture = &fixture;
            scope.spawn(move || fixture.registry.remove_active_macro(path));
            scope.spawn(move || {
                arm(fixture, &format!("new{n}"), triggered(&["F3"], &[]));
            });
        }
    });

    // Then
    let armed = fixture.registry.armed_paths();
    assert_eq!(armed.len(), 8);
    assert!(doomed.iter().all(|path| !fixture.registry.is_macro_active(path)));
    let mut stored = ArmedMacroStore::new(&fixture.store_path).load().unwrap();
    stored.sort();
    assert_eq!(stored, armed);
}

#[allow(clippy::unwrap_used)]
fn start_recording(hook: &Arc<FakeHook>) -> (Recorder, Receiver<Vec<MacroEvent>>) {
    let recorder = Recorder::new(hook.clone(), catalog());
    let (tx, rx) = mpsc::channel();
    let on_complete: RecordingComplete = Box::new(move |events| {
        let _ = tx.send(events);
    });
    let settings = RecordingSettings {
        level: RecordingLevel::KeysOnly,
        animate_mouse_moves: false,
        stop_keys: vec![KeySymbol::new("ESCAPE")],
    };
    recorder.start(settings, on_complete).unwrap();
    (recorder, rx)
}

/// WHAT: A hotkey fired during a recording is both scheduled and recorded
/// WHY: Recorder and registry share the hook without stealing events
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_in_progress_when_trigger_fires_then_both_see_the_keys() {
    // Given: Ctrl+K armed and a recording running on the same hook
    let fixture = fixture();
    arm(&fixture, "greet", triggered(&["CTRL", "K"], &[]));
    let (recorder, rx) = start_recording(&fixture.hook);
    assert_eq!(fixture.hook.subscriber_count(), 2);

    // When
    fixture.hook.press("CTRL");
    fixture.hook.tap("K");
    fixture.hook.release("CTRL");

    // Then: Trigger fired, recording keeps going
    assert_eq!(fixture.scheduler.requests().len(), 1);
    assert!(recorder.is_recording());

    // When: Stop key
    fixture.hook.tap("ESCAPE");

    // Then: The recording holds exactly the hotkey keys
    assert_eq!(
        rx.try_recv().unwrap(),
        vec![
            MacroEvent::key_press("CTRL"),
            MacroEvent::key_press("K"),
            MacroEvent::key_release("K"),
            MacroEvent::key_release("CTRL"),
        ]
    );
    assert_eq!(fixture.scheduler.requests().len(), 1);
}

/// WHAT: A recorder stopping itself by key leaves the registry subscribed
/// WHY: Unsubscribing inside a callback must not disturb other listeners
#[test]
#[allow(clippy::unwrap_used)]
fn given_recorder_stopped_by_key_when_trigger_completed_then_registry_still_fires() {
    // Given: Ctrl already held when a recording starts
    let fixture = fixture();
    arm(&fixture, "greet", triggered(&["CTRL", "K"], &[]));
    fixture.hook.press("CTRL");
    let (recorder, rx) = start_recording(&fixture.hook);

    // When: Escape stops the recorder, then K completes the hotkey
    fixture.hook.tap("ESCAPE");
    fixture.hook.tap("K");

    // Then: Only the registry remains and it remembered Ctrl is down
    assert!(!recorder.is_recording());
    assert!(rx.try_recv().unwrap().is_empty());
    assert_eq!(fixture.hook.subscriber_count(), 1);
    assert_eq!(fixture.scheduler.requests().len(), 1);
}

/// WHAT: Shutdown and drop release the hook subscription exactly once
/// WHY: A dropped registry must not keep receiving global input
#[test]
fn given_registry_when_shut_down_then_unsubscribed() {
    // Given
    let fixture = fixture();
    assert_eq!(fixture.hook.subscriber_count(), 1);

    // When
    fixture.registry.shutdown();
    fixture.registry.shutdown();

    // Then
    assert_eq!(fixture.hook.subscriber_count(), 0);
}

/// WHAT: A failing hook still leaves arming and authorization usable
/// WHY: Remote clients do not depend on the hook
#[test]
#[allow(clippy::unwrap_used)]
fn given_failing_hook_when_creating_registry_then_arming_still_works() {
    // Given
    let dir = TempDir::new().unwrap();
    let library = MacroLibrary::new(dir.path());
    let registry = TriggerRegistry::new(
        FakeHook::failing(),
        catalog(),
        library.clone(),
        ArmedMacroStore::new(dir.path().join("active.json")),
        RecordingScheduler::new(),
    );

    // When
    registry.add_active_macro(&library.path_for("m"), triggered(&["A"], &[]));

    // Then
    assert!(registry.runnable_macro_json("m", "c").is_some());
}

/// WHAT: A trigger fires iff the released key is in the set and the rest were held
/// WHY: Exhaustive check of the matching rule over a small key universe
#[test]
#[allow(clippy::unwrap_used)]
fn given_every_held_subset_when_checking_trigger_then_matches_rule() {
    // Given
    let catalog = catalog();
    let trigger = TriggerSpec::new(["A", "B", "C"], Vec::<String>::new()).unwrap();
    let universe = ["A", "B", "C", "D"];

    for mask in 0u8..16 {
        let held: Vec<&str> = universe
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, &k)| k)
            .collect();
        let snapshot = PressedKeySnapshot::new(held.iter().map(|&k| hook_code(k)));

        for released in universe {
            // When
            let fires = trigger_fires(&catalog, &trigger, hook_code(released), &snapshot);

            // Then
            let expected = trigger.keys().contains(&KeySymbol::new(released))
                && trigger
                    .keys()
                    .iter()
                    .filter(|k| k.as_str() != released)
                    .all(|k| held.contains(&k.as_str()));
            assert_eq!(fires, expected, "held {held:?}, released {released}");
        }
    }
}
