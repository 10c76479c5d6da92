//! Built-in modules registered with the embedded runtime
//!
//! Each initializer creates an empty module object through the runtime's
//! module constructor. The constructor is only reachable while a runtime
//! library is loaded, so the bootstrap installs it before start and clears it
//! before the library is closed.

use crate::api::{ModuleInit, ModuleNewFn};
use crate::error::Result;
use crate::inittab::ModuleTable;
use libc::c_void;
use std::ffi::CStr;
use std::ptr;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Names of the built-in modules, in registration order
pub const MODULE_NAMES: [&str; 4] = ["filter", "lexer", "processor", "serializer"];

static MODULE_FACTORY: Mutex<Option<ModuleNewFn>> = Mutex::new(None);

pub fn install_module_factory(factory: Option<ModuleNewFn>) {
    if factory.is_none() {
        warn!("Runtime has no module constructor; built-in modules will fail to import");
    }
    set_factory(factory);
}

pub fn clear_module_factory() {
    set_factory(None);
}

fn set_factory(factory: Option<ModuleNewFn>) {
    let mut slot = MODULE_FACTORY
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = factory;
}

fn create_module(name: &CStr) -> *mut c_void {
    let factory = *MODULE_FACTORY
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    match factory {
        Some(module_new) => {
            debug!("Initializing built-in module {:?}", name);
            // SAFETY: the factory is only installed while its library is loaded.
            unsafe { module_new(name.as_ptr()) }
        }
        None => ptr::null_mut(),
    }
}

macro_rules! module_initializer {
    ($($init:ident => $name:literal),* $(,)?) => {
        $(
            pub extern "C" fn $init() -> *mut c_void {
                create_module($name)
            }
        )*

        const INITIALIZERS: [(&CStr, ModuleInit); MODULE_NAMES.len()] = [
            $(($name, $init)),*
        ];
    };
}

module_initializer! {
    init_filter => c"filter",
    init_lexer => c"lexer",
    init_processor => c"processor",
    init_serializer => c"serializer",
}

/// Module table holding every built-in module.
pub fn builtin_table() -> Result<ModuleTable> {
    let mut table = ModuleTable::new();
    for (name, init) in INITIALIZERS {
        table.register(name, init)?;
    }
    Ok(table)
}
