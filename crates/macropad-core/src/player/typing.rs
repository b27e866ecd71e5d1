use crate::{catalog::KeySymbolCatalog, model::KeySymbol};

/// Symbols on the shift layer of a US layout and the key beneath each.
const SHIFTED_SYMBOLS: &[(char, &str)] = &[
    ('~', "BACK_QUOTE"),
    ('!', "1"),
    ('@', "2"),
    ('#', "3"),
    ('$', "4"),
    ('%', "5"),
    ('^', "6"),
    ('&', "7"),
    ('*', "8"),
    ('(', "9"),
    (')', "0"),
    ('_', "MINUS"),
    ('+', "EQUALS"),
    ('{', "OPEN_BRACKET"),
    ('}', "CLOSE_BRACKET"),
    ('|', "BACK_SLASH"),
    (':', "SEMICOLON"),
    ('"', "QUOTE"),
    ('<', "COMMA"),
    ('>', "PERIOD"),
    ('?', "SLASH"),
];

/// A single character expressed as a key plus an optional Shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyStroke {
    pub(crate) key: KeySymbol,
    pub(crate) shift: bool,
}

/// Key stroke that types `c`, or `None` when the layout cannot produce it.
pub(crate) fn key_stroke_for(c: char, catalog: &KeySymbolCatalog) -> Option<KeyStroke> {
    let shifted = SHIFTED_SYMBOLS.iter().find(|&&(ch, _)| ch == c);
    let shift = c.is_uppercase() || shifted.is_some();

    let key = catalog
        .key_for_char(c.to_lowercase().next().unwrap_or(c))
        .or_else(|| shifted.map(|&(_, name)| KeySymbol::new(name)))?;

    Some(KeyStroke { key, shift })
}
