//! WebNN external delegate.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config;
use crate::descriptor::{DelegateConfig, DelegatePlugin, OptionPair};
use crate::error::Result;
use crate::library::LibraryPathTable;

/// Device the WebNN delegate runs on, passed as the `webnn_device` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WebNnDevice {
    #[default]
    Default,
    Gpu,
    Cpu,
}

impl WebNnDevice {
    /// Numeric code the native delegate expects.
    pub fn code(&self) -> u8 {
        match self {
            WebNnDevice::Default => 0,
            WebNnDevice::Gpu => 1,
            WebNnDevice::Cpu => 2,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" | "0" => Some(WebNnDevice::Default),
            "gpu" | "1" => Some(WebNnDevice::Gpu),
            "cpu" | "2" => Some(WebNnDevice::Cpu),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WebNnDevice::Default => "default",
            WebNnDevice::Gpu => "gpu",
            WebNnDevice::Cpu => "cpu",
        }
    }

    /// The `("webnn_device", "<code>")` option selecting this device.
    pub fn to_option(self) -> OptionPair {
        (config::webnn::DEVICE_OPTION.to_string(), self.code().to_string())
    }
}

impl fmt::Display for WebNnDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Table of WebNN delegate builds under `root`.
pub fn library_table(root: impl AsRef<Path>) -> LibraryPathTable {
    LibraryPathTable::build(config::webnn::LIBRARY_NAME, root)
}

/// WebNN delegate descriptor.
///
/// Resolves `webnn_external_delegate_obj` for the effective platform at
/// construction and keeps the caller's options verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebNnDelegate {
    options: Vec<OptionPair>,
    native_path: PathBuf,
}

impl WebNnDelegate {
    /// Create a delegate for the running platform with the default library root.
    pub fn new<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_config(DelegateConfig::new().with_options(options))
    }

    /// Create a delegate with no options for the running platform.
    pub fn without_options() -> Result<Self> {
        Self::with_config(DelegateConfig::new())
    }

    /// Create a delegate from `cfg` with the default library root.
    pub fn with_config(cfg: DelegateConfig) -> Result<Self> {
        Self::with_config_in(cfg, config::default_lib_root())
    }

    /// Create a delegate from `cfg`, resolving libraries under `root`.
    pub fn with_config_in(cfg: DelegateConfig, root: impl AsRef<Path>) -> Result<Self> {
        let native_path = cfg.resolve_native_path(config::webnn::NAME, &library_table(root))?;
        tracing::debug!(
            "{} resolved native library {} ({} options)",
            config::webnn::NAME,
            native_path.display(),
            cfg.options.len()
        );

        Ok(Self {
            options: cfg.options,
            native_path,
        })
    }
}

impl DelegatePlugin for WebNnDelegate {
    fn name(&self) -> &str {
        config::webnn::NAME
    }

    fn version(&self) -> &str {
        config::webnn::TFLITE_VERSION
    }

    fn options(&self) -> &[OptionPair] {
        &self.options
    }

    fn native_path(&self) -> &Path {
        &self.native_path
    }
}
