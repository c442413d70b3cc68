//! TFLite external delegate descriptors.
//!
//! A delegate descriptor tells a model-loading host which native library to
//! load for the current platform and which options to pass to it. Platform
//! detection, the platform to library table and the descriptor contract live
//! here; loading the library is the host's job.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use webnn_delegate::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let delegate = WebNnDelegate::with_config(
//!         DelegateConfig::new()
//!             .with_device(WebNnDevice::Gpu)
//!             .with_platform(PlatformId::LINUX_X64),
//!     )?;
//!
//!     println!("{} -> {}", delegate.name(), delegate.native_path().display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod coral;
pub mod descriptor;
pub mod error;
pub mod library;
pub mod platform;
pub mod webnn;

pub use coral::CoralDelegate;
pub use descriptor::{DelegateConfig, DelegatePlugin, DelegateRecord, NativeLibrary, OptionPair};
pub use error::{DelegateError, Result};
pub use library::LibraryPathTable;
pub use platform::{OsFamily, PlatformId, SUPPORTED_PLATFORMS};
pub use webnn::{WebNnDelegate, WebNnDevice};

/// Prelude module with common imports
pub mod prelude {
    pub use crate::coral::CoralDelegate;
    pub use crate::descriptor::{
        DelegateConfig, DelegatePlugin, DelegateRecord, NativeLibrary, OptionPair,
    };
    pub use crate::error::{DelegateError, Result};
    pub use crate::library::LibraryPathTable;
    pub use crate::platform::{OsFamily, PlatformId};
    pub use crate::webnn::{WebNnDelegate, WebNnDevice};
}
