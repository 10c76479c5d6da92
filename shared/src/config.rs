//! Configuration for the runtime host and the CSV pipeline
//!
//! Values are layered: built-in defaults, then an optional `libcsv.toml`
//! (or an explicit file), then `LIBCSV_*` environment variables using `__`
//! between sections, e.g. `LIBCSV_RUNTIME__LIBRARY_PATH`.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "libcsv";

/// Runtime library loaded by the bootstrap when nothing overrides it.
pub const DEFAULT_LIBRARY_PATH: &str = "./build/libpython3.10.so";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibcsvConfig {
    /// Embedded runtime settings
    pub runtime: RuntimeConfig,

    /// CSV pipeline settings
    pub processor: ProcessorConfig,
}

/// Embedded runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Path of the runtime shared library
    pub library_path: PathBuf,

    /// Let the interpreter install its own signal handlers on initialize
    pub install_signal_handlers: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY_PATH),
            install_signal_handlers: true,
        }
    }
}

/// CSV pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Separator between fields of a record (also used for column selections)
    pub field_delimiter: String,

    /// Separator between records of in-memory input
    pub line_delimiter: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            field_delimiter: ",".to_string(),
            line_delimiter: "\n".to_string(),
        }
    }
}

impl LibcsvConfig {
    /// Load configuration from defaults, an optional file, and the environment.
    ///
    /// An explicit `path` must exist; the default `libcsv.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder();

        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix("LIBCSV")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.runtime.library_path.as_os_str().is_empty() {
            anyhow::bail!("Runtime library path must not be empty");
        }

        if self.processor.field_delimiter.is_empty() {
            anyhow::bail!("Field delimiter must not be empty");
        }

        if self.processor.line_delimiter.is_empty() {
            anyhow::bail!("Line delimiter must not be empty");
        }

        if self.processor.field_delimiter == self.processor.line_delimiter {
            anyhow::bail!(
                "Field and line delimiters must differ (both are {:?})",
                self.processor.field_delimiter
            );
        }

        Ok(())
    }
}
