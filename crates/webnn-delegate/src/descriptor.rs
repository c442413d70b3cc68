//! Delegate plugin contract.
//!
//! A delegate is handed to the model-loading host, which loads the native
//! library at [`DelegatePlugin::native_path`] and forwards
//! [`DelegatePlugin::options`] to it untouched. Delegates never load the
//! library themselves.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DelegateError, Result};
use crate::library::LibraryPathTable;
use crate::platform::{self, PlatformId};
use crate::webnn::WebNnDevice;

/// Opaque key/value option forwarded to the native delegate.
pub type OptionPair = (String, String);

/// Capabilities the host requires from a delegate.
///
/// Implementations are immutable once constructed, so repeated calls return
/// the values observed at construction.
pub trait DelegatePlugin: Send + Sync {
    /// Fixed delegate name.
    fn name(&self) -> &str;

    /// TFLite version the native library was built against.
    fn version(&self) -> &str;

    /// Options exactly as supplied by the caller.
    fn options(&self) -> &[OptionPair];

    /// Resolved path of the native library.
    fn native_path(&self) -> &Path;

    fn native_library(&self) -> NativeLibrary {
        NativeLibrary {
            path: self.native_path().to_path_buf(),
        }
    }

    /// Snapshot in the shape the host consumes.
    fn to_record(&self) -> DelegateRecord {
        DelegateRecord {
            name: self.name().to_string(),
            tflite_version: self.version().to_string(),
            options: self.options().to_vec(),
            node: self.native_library(),
        }
    }
}

/// Reference to the native library the host should load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeLibrary {
    pub path: PathBuf,
}

/// Serializable delegate record handed to the host.
///
/// ```json
/// {"name": "WebNNDelegate", "tfliteVersion": "2.7",
///  "options": [["webnn_device", "1"]], "node": {"path": "..."}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateRecord {
    pub name: String,
    pub tflite_version: String,
    pub options: Vec<OptionPair>,
    pub node: NativeLibrary,
}

/// Construction inputs shared by every delegate kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegateConfig {
    /// Options forwarded verbatim, in order
    pub options: Vec<OptionPair>,
    /// Explicit library path; skips platform resolution when set
    pub library_path: Option<PathBuf>,
    /// Platform override; the running platform is detected when unset
    pub platform: Option<PlatformId>,
}

impl DelegateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }

    /// Append options in iteration order.
    pub fn with_options<I, K, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Append the `webnn_device` option selecting `device`.
    pub fn with_device(mut self, device: WebNnDevice) -> Self {
        self.options.push(device.to_option());
        self
    }

    /// Use `path` as the native library instead of the platform table entry.
    pub fn with_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = Some(path.into());
        self
    }

    /// Resolve against `platform` instead of the running platform.
    pub fn with_platform(mut self, platform: PlatformId) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Parse and set a platform override.
    ///
    /// Fails with [`DelegateError::InvalidPlatform`] if `platform` is not an
    /// `<os>_<arch>` identifier.
    pub fn with_platform_str(self, platform: &str) -> Result<Self> {
        Ok(self.with_platform(PlatformId::parse(platform)?))
    }

    /// Resolve the native library path for a delegate using `table`.
    pub(crate) fn resolve_native_path(&self, name: &str, table: &LibraryPathTable) -> Result<PathBuf> {
        if let Some(path) = &self.library_path {
            tracing::debug!("{} using explicit library path {}", name, path.display());
            return Ok(path.clone());
        }

        let platform = platform::resolve(self.platform.clone());
        match table.lookup(&platform) {
            Some(path) => Ok(path.to_path_buf()),
            None => Err(DelegateError::UnsupportedPlatform(platform)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LibraryPathTable {
        LibraryPathTable::build("test_delegate", "/libs")
    }

    #[test]
    fn test_config_builder_keeps_order() {
        let config = DelegateConfig::new()
            .with_option("b", "1")
            .with_options([("a", "2"), ("b", "3")])
            .with_option("a", "2");

        assert_eq!(
            config.options,
            vec![
                ("b".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string()),
                ("b".to_string(), "3".to_string()),
                ("a".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_with_device_appends_option() {
        let config = DelegateConfig::new()
            .with_option("a", "1")
            .with_device(WebNnDevice::Gpu)
            .with_device(WebNnDevice::Default);

        assert_eq!(
            config.options,
            vec![
                ("a".to_string(), "1".to_string()),
                ("webnn_device".to_string(), "1".to_string()),
                ("webnn_device".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_with_platform_override() {
        let config = DelegateConfig::new().with_platform(PlatformId::WIN32_X64);
        let path = config.resolve_native_path("Test", &table()).unwrap();
        assert_eq!(path, Path::new("/libs/win32_x64/test_delegate.dll"));
    }

    #[test]
    fn test_resolve_unsupported_platform() {
        let config = DelegateConfig::new().with_platform(PlatformId::new("unknown_os_arch"));
        let err = config.resolve_native_path("Test", &table()).unwrap_err();
        assert_eq!(
            err,
            DelegateError::UnsupportedPlatform(PlatformId::new("unknown_os_arch"))
        );
    }

    #[test]
    fn test_explicit_library_path_skips_lookup() {
        let config = DelegateConfig::new()
            .with_library_path("some lib path")
            .with_platform(PlatformId::new("unknown_os_arch"));
        let path = config.resolve_native_path("Test", &table()).unwrap();
        assert_eq!(path, PathBuf::from("some lib path"));
    }

    #[test]
    fn test_with_platform_str_rejects_malformed() {
        let err = DelegateConfig::new().with_platform_str("not a platform").unwrap_err();
        assert_eq!(err, DelegateError::InvalidPlatform("not a platform".to_string()));

        let config = DelegateConfig::new().with_platform_str("darwin_arm64").unwrap();
        assert_eq!(config.platform, Some(PlatformId::DARWIN_ARM64));
    }

    #[test]
    fn test_record_json_shape() {
        let record = DelegateRecord {
            name: "WebNNDelegate".to_string(),
            tflite_version: "2.7".to_string(),
            options: vec![("foo".to_string(), "bar".to_string())],
            node: NativeLibrary {
                path: PathBuf::from("/libs/linux_x64/test_delegate.so"),
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "WebNNDelegate",
                "tfliteVersion": "2.7",
                "options": [["foo", "bar"]],
                "node": {"path": "/libs/linux_x64/test_delegate.so"}
            })
        );
    }
}
