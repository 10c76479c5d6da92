//! Host bootstrap: load the runtime, start and stop the interpreter

use crate::api::{DynamicApi, EmbeddingApi, ProgramName};
use crate::error::{BootstrapError, Result};
use crate::inittab::ModuleTable;
use crate::interpreter::Interpreter;
use crate::library::RuntimeLibrary;
use crate::modules;
use libcsv_shared::RuntimeConfig;
use std::ffi::{CString, OsStr, OsString};
use std::path::PathBuf;
use tracing::{debug, info};

/// What one bootstrap run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub library_path: PathBuf,
    pub lifecycle: LifecycleReport,
}

/// Outcome of one interpreter lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Built-in modules registered before initialization
    pub modules: Vec<String>,

    /// Status returned by finalization; non-zero is reported, not fatal
    pub finalize_status: i32,
}

/// Run the full bootstrap against the library named in `config`.
///
/// `argv0` is the host's program name as passed on the command line.
pub fn run(config: &RuntimeConfig, argv0: Option<OsString>) -> Result<BootstrapReport> {
    let library = RuntimeLibrary::open(&config.library_path)?;

    let lifecycle = {
        let api = DynamicApi::load(&library)?;
        modules::install_module_factory(api.module_factory());

        let result = modules::builtin_table().and_then(|table| {
            run_with(
                &api,
                argv0.as_deref(),
                table,
                config.install_signal_handlers,
            )
        });

        modules::clear_module_factory();
        result
    };

    let library_path = library.path().to_path_buf();
    library.close();

    Ok(BootstrapReport {
        library_path,
        lifecycle: lifecycle?,
    })
}

/// Drive one interpreter lifecycle through `api`: decode the program name,
/// register `table`, initialize, finalize, release the name.
pub fn run_with(
    api: &dyn EmbeddingApi,
    argv0: Option<&OsStr>,
    mut table: ModuleTable,
    install_signal_handlers: bool,
) -> Result<LifecycleReport> {
    let program_name = decode_program_name(api, argv0)?;
    debug!("Decoded program name");

    let interpreter = Interpreter::start(api, program_name, &mut table, install_signal_handlers)?;
    let modules = interpreter.registered_modules().to_vec();
    let finalize_status = interpreter.finalize();

    info!("Bootstrap complete");
    Ok(LifecycleReport {
        modules,
        finalize_status,
    })
}

/// Decode `argv0` with the runtime's locale decoder.
pub fn decode_program_name<'a>(
    api: &'a dyn EmbeddingApi,
    argv0: Option<&OsStr>,
) -> Result<ProgramName<'a>> {
    let argv0 = argv0.ok_or(BootstrapError::ProgramNameDecode)?;
    let raw = CString::new(os_bytes(argv0)).map_err(|_| BootstrapError::ProgramNameDecode)?;

    let ptr = api
        .decode_locale(&raw)
        .ok_or(BootstrapError::ProgramNameDecode)?;

    // SAFETY: `ptr` was just returned by this api's decoder.
    Ok(unsafe { ProgramName::from_raw(api, ptr) })
}

#[cfg(unix)]
fn os_bytes(arg: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    arg.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_bytes(arg: &OsStr) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}
