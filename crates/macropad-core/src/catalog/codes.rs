use std::fmt;

/// Key code in the global hook's address space (set-1 scan codes).
///
/// Never compared with [`InjectorCode`]; the catalog is the only bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookCode(u16);

impl HookCode {
    /// Wrap a raw scan code.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw scan code.
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for HookCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hook:0x{:04X}", self.0)
    }
}

/// Key code in the synthetic injector's address space (virtual-key codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InjectorCode(u16);

impl InjectorCode {
    /// Wrap a raw virtual-key code.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw virtual-key code.
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for InjectorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vk:0x{:02X}", self.0)
    }
}
