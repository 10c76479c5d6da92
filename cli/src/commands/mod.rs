pub mod bootstrap;
pub mod process;

use anyhow::{Context, Result};
use libcsv_shared::LibcsvConfig;
use std::path::Path;

/// Load configuration from `path` (or the default file), apply the
/// command-line library override, then validate.
pub fn load_config(path: Option<&Path>, library: Option<&Path>) -> Result<LibcsvConfig> {
    let mut config = LibcsvConfig::load(path).context("Failed to load configuration")?;

    if let Some(library) = library {
        config.runtime.library_path = library.to_path_buf();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
