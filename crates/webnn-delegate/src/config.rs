//! Delegate configuration defaults.
//!
//! Fixed identity constants and the location of the bundled native libraries.

use std::ffi::OsString;
use std::path::PathBuf;

/// WebNN delegate constants
pub mod webnn {
    /// Delegate name reported to the host
    pub const NAME: &str = "WebNNDelegate";
    /// TFLite version the native library was built against
    pub const TFLITE_VERSION: &str = "2.7";
    /// Native library base name, without extension
    pub const LIBRARY_NAME: &str = "webnn_external_delegate_obj";
    /// Option key selecting the WebNN device
    pub const DEVICE_OPTION: &str = "webnn_device";
}

/// Coral Edge TPU delegate constants
pub mod coral {
    /// Delegate name reported to the host
    pub const NAME: &str = "CoralDelegate";
    /// TFLite version the Edge TPU runtime was built against
    pub const TFLITE_VERSION: &str = "2.7";
    /// Edge TPU runtime on Linux, resolved by the system loader
    pub const LINUX_LIBRARY: &str = "libedgetpu.so.1";
    /// Edge TPU runtime on macOS, resolved by the system loader
    pub const MACOS_LIBRARY: &str = "libedgetpu.1.dylib";
    /// Edge TPU runtime on Windows, resolved by the system loader
    pub const WINDOWS_LIBRARY: &str = "edgetpu.dll";
}

/// Environment variable names
pub mod env_vars {
    /// Overrides the directory holding the per-platform native libraries
    pub const LIB_ROOT: &str = "WEBNN_DELEGATE_LIB_ROOT";
}

/// Name of the bundled library directory
pub const LIB_DIR_NAME: &str = "cc_lib";

/// Library root shipped with this crate.
pub fn bundled_lib_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(LIB_DIR_NAME)
}

/// Library root used when the caller does not supply one.
///
/// `WEBNN_DELEGATE_LIB_ROOT` wins when set and non-empty, otherwise the bundled
/// `cc_lib` directory. The result is always absolute.
pub fn default_lib_root() -> PathBuf {
    lib_root_from(std::env::var_os(env_vars::LIB_ROOT))
}

/// Library root for an optional `WEBNN_DELEGATE_LIB_ROOT` value.
///
/// A relative value is anchored at the current directory.
pub fn lib_root_from(value: Option<OsString>) -> PathBuf {
    match value {
        Some(root) if !root.is_empty() => {
            let root = PathBuf::from(root);
            std::path::absolute(&root).unwrap_or(root)
        }
        _ => bundled_lib_root(),
    }
}
