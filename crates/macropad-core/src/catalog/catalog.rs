use crate::{
    CoreResult, MacroError,
    catalog::{
        HookCode, InjectorCode,
        table::{ALIASES, KEYS, MODIFIER_SIDES, UNSHIFTED_CHARS},
    },
    model::KeySymbol,
};

use std::{
    collections::{HashMap, HashSet},
    panic::Location,
};

use error_location::ErrorLocation;

/// Bidirectional mapping between key names and the hook and injector code
/// spaces, plus the literal-character table used for typing text.
///
/// Built once and shared behind an `Arc`; all lookups are read-only.
#[derive(Debug, Clone)]
pub struct KeySymbolCatalog {
    by_name: HashMap<String, (HookCode, InjectorCode)>,
    names_by_hook: HashMap<HookCode, &'static str>,
}

impl KeySymbolCatalog {
    /// Catalog for a standard US keyboard layout.
    pub fn standard() -> Self {
        let mut by_name = HashMap::with_capacity(KEYS.len() + ALIASES.len());
        let mut names_by_hook = HashMap::with_capacity(KEYS.len());

        for &(name, hook, injector) in KEYS {
            let codes = (HookCode::new(hook), InjectorCode::new(injector));
            by_name.insert(name.to_string(), codes);
            names_by_hook.entry(codes.0).or_insert(name);
        }

        for &(alias, canonical) in ALIASES {
            if let Some(&codes) = by_name.get(canonical) {
                by_name.insert(alias.to_string(), codes);
            }
        }

        Self {
            by_name,
            names_by_hook,
        }
    }

    /// Hook-space code for `symbol`.
    #[track_caller]
    pub fn hook_code(&self, symbol: &KeySymbol) -> CoreResult<HookCode> {
        self.lookup(symbol).map(|(hook, _)| hook)
    }

    /// Injector-space code for `symbol`.
    #[track_caller]
    pub fn injector_code(&self, symbol: &KeySymbol) -> CoreResult<InjectorCode> {
        self.lookup(symbol).map(|(_, injector)| injector)
    }

    /// Resolve every symbol to its hook code. Fails on the first unknown name.
    #[track_caller]
    pub fn hook_codes<'a, I>(&self, symbols: I) -> CoreResult<HashSet<HookCode>>
    where
        I: IntoIterator<Item = &'a KeySymbol>,
    {
        symbols
            .into_iter()
            .map(|symbol| self.hook_code(symbol))
            .collect()
    }

    /// Canonical name for a code delivered by the hook.
    pub fn name_for_hook(&self, code: HookCode) -> Option<KeySymbol> {
        self.names_by_hook
            .get(&code)
            .map(|&name| KeySymbol::new(name))
    }

    /// Left and right hook codes when `symbol` is a generic modifier
    /// (`CTRL`, `SHIFT` or `ALT`, including aliases).
    pub fn modifier_sides(&self, symbol: &KeySymbol) -> Option<[HookCode; 2]> {
        let left = self.hook_code(symbol).ok()?;

        MODIFIER_SIDES
            .iter()
            .find(|&&(_, l, _)| HookCode::new(l) == left)
            .map(|&(_, l, r)| [HookCode::new(l), HookCode::new(r)])
    }

    /// Key that types `c` without Shift, if the layout has one.
    ///
    /// Letters map regardless of case; callers decide whether Shift is needed.
    pub fn key_for_char(&self, c: char) -> Option<KeySymbol> {
        if c.is_ascii_alphanumeric() {
            return Some(KeySymbol::new(c.to_ascii_uppercase().to_string()));
        }

        UNSHIFTED_CHARS
            .iter()
            .find(|&&(ch, _)| ch == c)
            .map(|&(_, name)| KeySymbol::new(name))
    }

    #[track_caller]
    fn lookup(&self, symbol: &KeySymbol) -> CoreResult<(HookCode, InjectorCode)> {
        self.by_name
            .get(&symbol.normalized())
            .copied()
            .ok_or_else(|| MacroError::SymbolResolution {
                symbol: symbol.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl Default for KeySymbolCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
