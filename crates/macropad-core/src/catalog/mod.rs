//! Key symbol catalog: name to code lookups for both input address spaces.

#[allow(clippy::module_inception)]
mod catalog;
mod codes;
mod table;

pub use {
    catalog::KeySymbolCatalog,
    codes::{HookCode, InjectorCode},
};
