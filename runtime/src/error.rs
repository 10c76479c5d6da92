//! Error types for the runtime host

use std::path::PathBuf;
use thiserror::Error;

/// Result type for bootstrap operations
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Errors that can occur while hosting the embedded runtime
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The runtime shared library could not be opened
    #[error("Failed to load {}: {source}", path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The library lacks part of the embedding API
    #[error("Runtime library does not export `{symbol}`: {source}")]
    MissingSymbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// argv[0] is absent or the runtime could not decode it
    #[error("Fatal error: cannot decode argv[0]")]
    ProgramNameDecode,

    /// The runtime was initialized before this host started it
    #[error("Interpreter is already initialized")]
    AlreadyInitialized,

    /// Initialization returned but the runtime reports it is not running
    #[error("Interpreter failed to initialize")]
    InitializeFailed,

    /// Module names must be dotted identifiers
    #[error("Invalid module name: '{0}'")]
    InvalidModuleName(String),

    /// A module name was registered twice
    #[error("Module '{0}' is already registered")]
    DuplicateModule(String),

    /// Registration attempted after the interpreter started
    #[error("Module table is frozen; cannot register '{0}' after interpreter start")]
    RegistrationClosed(String),

    /// The runtime refused an inittab entry
    #[error("Runtime rejected module '{0}'")]
    InittabRejected(String),
}
