//! Runtime shared library handle

use crate::error::{BootstrapError, Result};
use libloading::{Library, Symbol};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// An open runtime library. Closing happens on drop or via [`RuntimeLibrary::close`].
#[derive(Debug)]
pub struct RuntimeLibrary {
    path: PathBuf,
    library: Library,
}

impl RuntimeLibrary {
    /// Open `path` with immediate binding and global symbol visibility, so
    /// extension code loaded later by the runtime can resolve its symbols.
    pub fn open(path: &Path) -> Result<Self> {
        info!("Loading runtime library: {}", path.display());

        let library = open_global(path).map_err(|source| BootstrapError::LibraryLoad {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Runtime library loaded");
        Ok(Self {
            path: path.to_path_buf(),
            library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a required symbol.
    ///
    /// # Safety
    /// `T` must match the symbol's real type.
    pub unsafe fn symbol<T>(&self, name: &'static str) -> Result<Symbol<'_, T>> {
        self.library
            .get(name.as_bytes())
            .map_err(|source| BootstrapError::MissingSymbol {
                symbol: name,
                source,
            })
    }

    /// Resolve a symbol that older or newer runtimes may not export.
    ///
    /// # Safety
    /// `T` must match the symbol's real type.
    pub unsafe fn optional_symbol<T>(&self, name: &'static str) -> Option<Symbol<'_, T>> {
        match self.library.get(name.as_bytes()) {
            Ok(symbol) => Some(symbol),
            Err(e) => {
                debug!("Optional symbol {} unavailable: {}", name, e);
                None
            }
        }
    }

    /// Unload the library. Failures are reported, not returned.
    pub fn close(self) {
        let path = self.path;
        match self.library.close() {
            Ok(()) => debug!("Closed runtime library {}", path.display()),
            Err(e) => warn!("Failed to close runtime library {}: {}", path.display(), e),
        }
    }
}

#[cfg(unix)]
fn open_global(path: &Path) -> std::result::Result<Library, libloading::Error> {
    use libloading::os::unix::{Library as UnixLibrary, RTLD_GLOBAL, RTLD_NOW};

    // SAFETY: loading runs the library's initializers; the runtime library is
    // trusted configuration input.
    unsafe { UnixLibrary::open(Some(path), RTLD_NOW | RTLD_GLOBAL) }.map(Library::from)
}

#[cfg(not(unix))]
fn open_global(path: &Path) -> std::result::Result<Library, libloading::Error> {
    // SAFETY: see the unix variant.
    unsafe { Library::new(path) }
}
