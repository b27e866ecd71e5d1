use crate::{HookCode, KeySymbol, KeySymbolCatalog, MacroError};

/// WHAT: Key names resolve regardless of case and surrounding whitespace
/// WHY: Hand-written documents mix "ctrl", "Ctrl" and "CTRL"
#[test]
#[allow(clippy::unwrap_used)]
fn given_mixed_case_name_when_resolving_then_same_codes() {
    // Given
    let catalog = KeySymbolCatalog::standard();

    // When
    let lower = catalog.hook_code(&KeySymbol::new("ctrl")).unwrap();
    let upper = catalog.hook_code(&KeySymbol::new(" CTRL ")).unwrap();

    // Then
    assert_eq!(lower, upper);
    assert_eq!(lower, HookCode::new(0x1D));
}

/// WHAT: Aliases resolve to their canonical key
/// WHY: ESC and ESCAPE must arm and stop the same way
#[test]
#[allow(clippy::unwrap_used)]
fn given_alias_when_resolving_then_matches_canonical_key() {
    // Given
    let catalog = KeySymbolCatalog::standard();

    // When
    let alias = catalog.injector_code(&KeySymbol::new("ESC")).unwrap();
    let canonical = catalog.injector_code(&KeySymbol::new("ESCAPE")).unwrap();

    // Then
    assert_eq!(alias, canonical);
}

/// WHAT: Unknown names fail with SymbolResolution
/// WHY: Callers decide whether to skip or abort
#[test]
fn given_unknown_name_when_resolving_then_symbol_resolution_error() {
    // Given
    let catalog = KeySymbolCatalog::standard();

    // When
    let result = catalog.hook_code(&KeySymbol::new("HYPER"));

    // Then
    assert!(matches!(
        result,
        Err(MacroError::SymbolResolution { ref symbol, .. }) if symbol == "HYPER"
    ));
}

/// WHAT: Hook codes map back to canonical names, never aliases
/// WHY: Recorded documents should use one spelling per key
#[test]
#[allow(clippy::unwrap_used)]
fn given_hook_code_when_naming_then_canonical_name() {
    // Given
    let catalog = KeySymbolCatalog::standard();
    let code = catalog.hook_code(&KeySymbol::new("esc")).unwrap();

    // When
    let name = catalog.name_for_hook(code);

    // Then
    assert_eq!(name, Some(KeySymbol::new("ESCAPE")));
    assert_eq!(catalog.name_for_hook(HookCode::new(0x7FFF)), None);
}

/// WHAT: Generic modifiers expose both physical sides
/// WHY: A CTRL trigger must fire with either Ctrl key held
#[test]
fn given_modifier_names_when_querying_sides_then_left_and_right_codes() {
    // Given
    let catalog = KeySymbolCatalog::standard();

    // When/Then
    assert_eq!(
        catalog.modifier_sides(&KeySymbol::new("CONTROL")),
        Some([HookCode::new(0x1D), HookCode::new(0x0E1D)])
    );
    assert_eq!(
        catalog.modifier_sides(&KeySymbol::new("shift")),
        Some([HookCode::new(0x2A), HookCode::new(0x36)])
    );
    assert_eq!(catalog.modifier_sides(&KeySymbol::new("K")), None);
    assert_eq!(catalog.modifier_sides(&KeySymbol::new("RIGHT_CTRL")), None);
}

/// WHAT: Literal characters map to the key that types them
/// WHY: Text typing goes through the same name table as macros
#[test]
fn given_characters_when_looking_up_keys_then_unshifted_key_returned() {
    // Given
    let catalog = KeySymbolCatalog::standard();

    // When/Then
    assert_eq!(catalog.key_for_char('q'), Some(KeySymbol::new("Q")));
    assert_eq!(catalog.key_for_char('7'), Some(KeySymbol::new("7")));
    assert_eq!(catalog.key_for_char(' '), Some(KeySymbol::new("SPACE")));
    assert_eq!(catalog.key_for_char('/'), Some(KeySymbol::new("SLASH")));
    assert_eq!(catalog.key_for_char('é'), None);
}
