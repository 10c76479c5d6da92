//! Embedded runtime host
//!
//! Loads the scripting runtime's shared library, registers the libcsv
//! built-in modules in its module table and drives one interpreter lifecycle.
//! No script code is executed and the registered modules are never imported.
//!
//! Tests that need a real runtime library are ignored by default. Run them
//! against an installed runtime with:
//!
//! ```text
//! LIBCSV_TEST_LIBRARY=/usr/lib/x86_64-linux-gnu/libpython3.10.so \
//!     cargo test --workspace -- --ignored
//! ```

pub mod api;
pub mod bootstrap;
pub mod error;
pub mod inittab;
pub mod interpreter;
pub mod library;
pub mod modules;

#[cfg(test)]
mod fake;

pub use api::{DynamicApi, EmbeddingApi, ModuleInit, ProgramName};
pub use bootstrap::{run, run_with, BootstrapReport, LifecycleReport};
pub use error::{BootstrapError, Result};
pub use inittab::{ModuleEntry, ModuleTable};
pub use interpreter::{Interpreter, InterpreterState};
pub use library::RuntimeLibrary;
pub use modules::{builtin_table, MODULE_NAMES};
