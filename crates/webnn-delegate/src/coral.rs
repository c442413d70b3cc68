//! Coral Edge TPU delegate.
//!
//! The Edge TPU runtime is installed system-wide, so the table holds bare
//! library names for the dynamic loader's search path rather than paths under
//! a bundled root.

use std::path::{Path, PathBuf};

use crate::config::coral;
use crate::descriptor::{DelegateConfig, DelegatePlugin, OptionPair};
use crate::error::Result;
use crate::library::LibraryPathTable;
use crate::platform::{OsFamily, SUPPORTED_PLATFORMS};

/// Table of Edge TPU runtime library names.
pub fn library_table() -> LibraryPathTable {
    LibraryPathTable::from_entries(SUPPORTED_PLATFORMS.iter().filter_map(|platform| {
        let name = match platform.os_family()? {
            OsFamily::Linux => coral::LINUX_LIBRARY,
            OsFamily::MacOs => coral::MACOS_LIBRARY,
            OsFamily::Windows => coral::WINDOWS_LIBRARY,
        };
        Some((platform.clone(), name))
    }))
}

/// Coral Edge TPU delegate descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoralDelegate {
    options: Vec<OptionPair>,
    native_path: PathBuf,
}

impl CoralDelegate {
    pub fn new<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_config(DelegateConfig::new().with_options(options))
    }

    pub fn with_config(cfg: DelegateConfig) -> Result<Self> {
        let native_path = cfg.resolve_native_path(coral::NAME, &library_table())?;
        tracing::debug!("{} resolved native library {}", coral::NAME, native_path.display());

        Ok(Self {
            options: cfg.options,
            native_path,
        })
    }
}

impl DelegatePlugin for CoralDelegate {
    fn name(&self) -> &str {
        coral::NAME
    }

    fn version(&self) -> &str {
        coral::TFLITE_VERSION
    }

    fn options(&self) -> &[OptionPair] {
        &self.options
    }

    fn native_path(&self) -> &Path {
        &self.native_path
    }
}
