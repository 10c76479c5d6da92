//! Module table applied to the runtime before initialization

use crate::api::ModuleInit;
use crate::error::{BootstrapError, Result};
use std::ffi::CStr;
use std::fmt;

/// One built-in module: import name and initializer
#[derive(Clone, Copy)]
pub struct ModuleEntry {
    pub name: &'static CStr,
    pub init: ModuleInit,
}

impl fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleEntry").field("name", &self.name).finish()
    }
}

/// Ordered, duplicate-free set of built-in modules. Frozen once the
/// interpreter has started.
#[derive(Debug, Default)]
pub struct ModuleTable {
    entries: Vec<ModuleEntry>,
    frozen: bool,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &'static CStr, init: ModuleInit) -> Result<()> {
        let display = name.to_string_lossy().into_owned();

        if self.is_frozen() {
            return Err(BootstrapError::RegistrationClosed(display));
        }
        if !is_module_name(name) {
            return Err(BootstrapError::InvalidModuleName(display));
        }
        if self.contains(&display) {
            return Err(BootstrapError::DuplicateModule(display));
        }

        self.entries.push(ModuleEntry { name, init });
        Ok(())
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.name.to_string_lossy().into_owned())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.name.to_bytes() == name.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

/// Dotted identifiers: `a`, `a_b`, `pkg.mod`.
fn is_module_name(name: &CStr) -> bool {
    let Ok(name) = name.to_str() else {
        return false;
    };
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
