//! Static key tables: canonical name, hook scan code, injector virtual-key.

pub(crate) const KEYS: &[(&str, u16, u16)] = &[
    // Letters
    ("A", 0x1E, 0x41),
    ("B", 0x30, 0x42),
    ("C", 0x2E, 0x43),
    ("D", 0x20, 0x44),
    ("E", 0x12, 0x45),
    ("F", 0x21, 0x46),
    ("G", 0x22, 0x47),
    ("H", 0x23, 0x48),
    ("I", 0x17, 0x49),
    ("J", 0x24, 0x4A),
    ("K", 0x25, 0x4B),
    ("L", 0x26, 0x4C),
    ("M", 0x32, 0x4D),
    ("N", 0x31, 0x4E),
    ("O", 0x18, 0x4F),
    ("P", 0x19, 0x50),
    ("Q", 0x10, 0x51),
    ("R", 0x13, 0x52),
    ("S", 0x1F, 0x53),
    ("T", 0x14, 0x54),
    ("U", 0x16, 0x55),
    ("V", 0x2F, 0x56),
    ("W", 0x11, 0x57),
    ("X", 0x2D, 0x58),
    ("Y", 0x15, 0x59),
    ("Z", 0x2C, 0x5A),
    // Digits
    ("1", 0x02, 0x31),
    ("2", 0x03, 0x32),
    ("3", 0x04, 0x33),
    ("4", 0x05, 0x34),
    ("5", 0x06, 0x35),
    ("6", 0x07, 0x36),
    ("7", 0x08, 0x37),
    ("8", 0x09, 0x38),
    ("9", 0x0A, 0x39),
    ("0", 0x0B, 0x30),
    // Function keys
    ("F1", 0x3B, 0x70),
    ("F2", 0x3C, 0x71),
    ("F3", 0x3D, 0x72),
    ("F4", 0x3E, 0x73),
    ("F5", 0x3F, 0x74),
    ("F6", 0x40, 0x75),
    ("F7", 0x41, 0x76),
    ("F8", 0x42, 0x77),
    ("F9", 0x43, 0x78),
    ("F10", 0x44, 0x79),
    ("F11", 0x57, 0x7A),
    ("F12", 0x58, 0x7B),
    // Modifiers. The generic names are the left-hand keys.
    ("CTRL", 0x1D, 0x11),
    ("SHIFT", 0x2A, 0x10),
    ("ALT", 0x38, 0x12),
    ("META", 0x0E5B, 0x5B),
    ("RIGHT_CTRL", 0x0E1D, 0xA3),
    ("RIGHT_SHIFT", 0x36, 0xA1),
    ("RIGHT_ALT", 0x0E38, 0xA5),
    ("RIGHT_META", 0x0E5C, 0x5C),
    // Navigation and editing
    ("SPACE", 0x39, 0x20),
    ("ENTER", 0x1C, 0x0D),
    ("ESCAPE", 0x01, 0x1B),
    ("BACK_SPACE", 0x0E, 0x08),
    ("TAB", 0x0F, 0x09),
    ("CAPS_LOCK", 0x3A, 0x14),
    ("NUM_LOCK", 0x45, 0x90),
    ("SCROLL_LOCK", 0x46, 0x91),
    ("INSERT", 0x0E52, 0x2D),
    ("DELETE", 0x0E53, 0x2E),
    ("HOME", 0x0E47, 0x24),
    ("END", 0x0E4F, 0x23),
    ("PAGE_UP", 0x0E49, 0x21),
    ("PAGE_DOWN", 0x0E51, 0x22),
    ("UP", 0x0E48, 0x26),
    ("DOWN", 0x0E50, 0x28),
    ("LEFT", 0x0E4B, 0x25),
    ("RIGHT", 0x0E4D, 0x27),
    ("PRINTSCREEN", 0x0E37, 0x2C),
    ("PAUSE", 0x0E45, 0x13),
    ("CONTEXT_MENU", 0x0E5D, 0x5D),
    // Punctuation
    ("COMMA", 0x33, 0xBC),
    ("PERIOD", 0x34, 0xBE),
    ("SLASH", 0x35, 0xBF),
    ("SEMICOLON", 0x27, 0xBA),
    ("EQUALS", 0x0D, 0xBB),
    ("MINUS", 0x0C, 0xBD),
    ("OPEN_BRACKET", 0x1A, 0xDB),
    ("BACK_SLASH", 0x2B, 0xDC),
    ("CLOSE_BRACKET", 0x1B, 0xDD),
    ("QUOTE", 0x28, 0xDE),
    ("BACK_QUOTE", 0x29, 0xC0),
];

/// Alternate spellings and the canonical name they stand for.
pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("ESC", "ESCAPE"),
    ("CONTROL", "CTRL"),
    ("WINDOWS", "META"),
    ("TILDE", "BACK_QUOTE"),
    ("CONTEXT", "CONTEXT_MENU"),
];

/// Generic modifiers satisfied by either physical side: (name, left, right).
pub(crate) const MODIFIER_SIDES: &[(&str, u16, u16)] = &[
    ("CTRL", 0x1D, 0x0E1D),
    ("SHIFT", 0x2A, 0x36),
    ("ALT", 0x38, 0x0E38),
];

/// Characters typed without Shift and the key that produces them.
pub(crate) const UNSHIFTED_CHARS: &[(char, &str)] = &[
    (' ', "SPACE"),
    ('\n', "ENTER"),
    ('\t', "TAB"),
    ('.', "PERIOD"),
    (',', "COMMA"),
    ('/', "SLASH"),
    (';', "SEMICOLON"),
    ('=', "EQUALS"),
    ('-', "MINUS"),
    ('[', "OPEN_BRACKET"),
    ('\\', "BACK_SLASH"),
    (']', "CLOSE_BRACKET"),
    ('\'', "QUOTE"),
    ('`', "BACK_QUOTE"),
];
