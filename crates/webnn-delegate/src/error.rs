//! Delegate error types.

use thiserror::Error;

use crate::platform::PlatformId;

/// Errors raised while constructing a delegate.
///
/// Both kinds are fatal to the constructing call. The caller decides whether to
/// continue without acceleration or propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelegateError {
    /// No native library is shipped for the effective platform.
    #[error("Platform {0} is not supported")]
    UnsupportedPlatform(PlatformId),

    /// The platform override is not an `<os>_<arch>` identifier at all.
    #[error("Invalid platform identifier: {0:?}")]
    InvalidPlatform(String),
}

impl DelegateError {
    /// The platform identifier that failed lookup, if this is a lookup failure.
    pub fn platform(&self) -> Option<&PlatformId> {
        match self {
            DelegateError::UnsupportedPlatform(platform) => Some(platform),
            DelegateError::InvalidPlatform(_) => None,
        }
    }
}

/// Delegate result type
pub type Result<T> = std::result::Result<T, DelegateError>;
