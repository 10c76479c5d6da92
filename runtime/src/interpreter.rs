//! Embedded interpreter lifecycle

use crate::api::{EmbeddingApi, ProgramName};
use crate::error::{BootstrapError, Result};
use crate::inittab::ModuleTable;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterState {
    Uninitialized,
    Initialized,
    Finalized,
}

/// A running interpreter. Finalized on drop unless [`Interpreter::finalize`]
/// was called; the program name is released after finalization.
pub struct Interpreter<'a> {
    api: &'a dyn EmbeddingApi,
    state: InterpreterState,
    modules: Vec<String>,
    // Dropped after `Drop::drop` has finalized the runtime.
    program_name: ProgramName<'a>,
}

impl<'a> Interpreter<'a> {
    /// Register every module in `modules`, then initialize the runtime once.
    ///
    /// Once registration begins the table stays frozen, even if startup fails.
    pub fn start(
        api: &'a dyn EmbeddingApi,
        program_name: ProgramName<'a>,
        modules: &mut ModuleTable,
        install_signal_handlers: bool,
    ) -> Result<Self> {
        if api.is_initialized() {
            return Err(BootstrapError::AlreadyInitialized);
        }

        let mut interpreter = Self {
            api,
            state: InterpreterState::Uninitialized,
            modules: Vec::with_capacity(modules.len()),
            program_name,
        };

        api.set_program_name(&interpreter.program_name);

        modules.freeze();
        for entry in modules.entries() {
            let name = entry.name.to_string_lossy().into_owned();
            if !api.append_inittab(entry.name, entry.init) {
                return Err(BootstrapError::InittabRejected(name));
            }
            debug!("Registered built-in module {}", name);
            interpreter.modules.push(name);
        }

        api.initialize(install_signal_handlers);
        if !api.is_initialized() {
            return Err(BootstrapError::InitializeFailed);
        }
        interpreter.state = InterpreterState::Initialized;

        info!(
            "Interpreter initialized with {} built-in module(s)",
            interpreter.modules.len()
        );
        Ok(interpreter)
    }

    pub fn state(&self) -> InterpreterState {
        self.state
    }

    pub fn registered_modules(&self) -> &[String] {
        &self.modules
    }

    /// Shut the interpreter down and return the runtime's status code.
    pub fn finalize(mut self) -> i32 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> i32 {
        if self.state != InterpreterState::Initialized {
            return 0;
        }

        let status = self.api.finalize();
        self.state = InterpreterState::Finalized;

        if status == 0 {
            info!("Interpreter finalized");
        } else {
            warn!("Interpreter finalization reported status {}", status);
        }
        status
    }
}

impl Drop for Interpreter<'_> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
