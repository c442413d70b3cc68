//! Platform identification.
//!
//! A platform is identified by an `<os>_<arch>` tag using the Node.js naming
//! convention (`linux_x64`, `win32_x64`, `darwin_arm64`, ...), which is also
//! the name of the per-platform directory under a delegate's library root.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DelegateError, Result};

/// Canonical `<os>_<arch>` platform identifier.
///
/// Any well-shaped identifier can be held, including ones no delegate ships a
/// library for. Whether a platform is supported is decided by table lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(Cow<'static, str>);

impl PlatformId {
    pub const LINUX_X64: PlatformId = PlatformId(Cow::Borrowed("linux_x64"));
    pub const LINUX_ARM64: PlatformId = PlatformId(Cow::Borrowed("linux_arm64"));
    pub const LINUX_ARM: PlatformId = PlatformId(Cow::Borrowed("linux_arm"));
    pub const WIN32_X64: PlatformId = PlatformId(Cow::Borrowed("win32_x64"));
    pub const DARWIN_X64: PlatformId = PlatformId(Cow::Borrowed("darwin_x64"));
    pub const DARWIN_ARM64: PlatformId = PlatformId(Cow::Borrowed("darwin_arm64"));

    /// Create an identifier without checking its shape.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Parse an identifier, rejecting strings that are not `<os>_<arch>`.
    ///
    /// Unknown but well-shaped identifiers such as `freebsd_riscv64` are
    /// accepted; they fail later as unsupported platforms.
    pub fn parse(id: &str) -> Result<Self> {
        let well_formed = id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
            && matches!(id.split_once('_'), Some((os, arch)) if !os.is_empty() && !arch.is_empty());

        if !well_formed {
            return Err(DelegateError::InvalidPlatform(id.to_string()));
        }
        Ok(Self::new(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Operating system part (`linux`, `win32`, `darwin`, ...).
    pub fn os(&self) -> &str {
        let id = self.as_str();
        id.split_once('_').map_or(id, |(os, _)| os)
    }

    /// Architecture part (`x64`, `arm64`, ...).
    pub fn arch(&self) -> &str {
        self.as_str().split_once('_').map_or("", |(_, arch)| arch)
    }

    /// The OS family, if the OS part is one native libraries are built for.
    pub fn os_family(&self) -> Option<OsFamily> {
        OsFamily::from_os(self.os())
    }

    /// Whether this identifier is in [`SUPPORTED_PLATFORMS`].
    pub fn is_supported(&self) -> bool {
        SUPPORTED_PLATFORMS.contains(self)
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlatformId {
    type Err = DelegateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Platforms native delegate libraries are built for.
pub static SUPPORTED_PLATFORMS: [PlatformId; 6] = [
    PlatformId::DARWIN_ARM64,
    PlatformId::DARWIN_X64,
    PlatformId::LINUX_ARM,
    PlatformId::LINUX_ARM64,
    PlatformId::LINUX_X64,
    PlatformId::WIN32_X64,
];

/// Operating system family, which fixes the shared library file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Linux,
    Windows,
    MacOs,
}

impl OsFamily {
    /// Map the OS part of a platform identifier to its family.
    pub fn from_os(os: &str) -> Option<Self> {
        match os {
            "linux" => Some(OsFamily::Linux),
            "win32" => Some(OsFamily::Windows),
            "darwin" => Some(OsFamily::MacOs),
            _ => None,
        }
    }

    /// Shared library extension, including the leading dot.
    pub fn library_extension(&self) -> &'static str {
        match self {
            OsFamily::Linux => ".so",
            OsFamily::Windows => ".dll",
            OsFamily::MacOs => ".dylib",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::Windows => "win32",
            OsFamily::MacOs => "darwin",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a Rust target OS/architecture pair to a platform identifier.
///
/// Names without a Node.js counterpart pass through unchanged, so an
/// unrecognized host yields an identifier that is distinguishable rather than
/// a guess at the closest supported one.
pub fn platform_for(os: &str, arch: &str) -> PlatformId {
    let os = match os {
        "linux" => "linux",
        "windows" => "win32",
        "macos" => "darwin",
        other => other,
    };
    let arch = match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        other => other,
    };
    PlatformId::new(format!("{}_{}", os, arch))
}

/// Detect the platform the current process is running on.
pub fn detect() -> PlatformId {
    platform_for(std::env::consts::OS, std::env::consts::ARCH)
}

/// Effective platform: the override when given, otherwise the detected one.
///
/// The override is returned as is. An override nobody ships a library for is
/// reported by the table lookup, not here.
pub fn resolve(platform_override: Option<PlatformId>) -> PlatformId {
    match platform_override {
        Some(platform) => {
            tracing::debug!("Using platform override: {}", platform);
            platform
        }
        None => {
            let platform = detect();
            tracing::debug!("Detected platform: {}", platform);
            platform
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_for_known_pairs() {
        assert_eq!(platform_for("linux", "x86_64"), PlatformId::LINUX_X64);
        assert_eq!(platform_for("linux", "aarch64"), PlatformId::LINUX_ARM64);
        assert_eq!(platform_for("linux", "arm"), PlatformId::LINUX_ARM);
        assert_eq!(platform_for("windows", "x86_64"), PlatformId::WIN32_X64);
        assert_eq!(platform_for("macos", "x86_64"), PlatformId::DARWIN_X64);
        assert_eq!(platform_for("macos", "aarch64"), PlatformId::DARWIN_ARM64);
    }

    #[test]
    fn test_platform_for_unknown_pairs_pass_through() {
        assert_eq!(platform_for("freebsd", "x86_64").as_str(), "freebsd_x64");
        assert_eq!(platform_for("windows", "x86").as_str(), "win32_ia32");
        assert_eq!(platform_for("linux", "riscv64").as_str(), "linux_riscv64");
        assert!(!platform_for("linux", "riscv64").is_supported());
    }

    #[test]
    fn test_detect_matches_consts() {
        assert_eq!(
            detect(),
            platform_for(std::env::consts::OS, std::env::consts::ARCH)
        );
    }

    #[test]
    fn test_resolve_override_is_unchanged() {
        let unknown = PlatformId::new("unknown_os_arch");
        assert_eq!(resolve(Some(unknown.clone())), unknown);
        assert_eq!(resolve(None), detect());
    }

    #[test]
    fn test_parse_shape() {
        assert_eq!(PlatformId::parse("linux_x64").unwrap(), PlatformId::LINUX_X64);
        assert!(PlatformId::parse("unknown_os_arch").is_ok());

        for bad in ["", "linux", "_x64", "linux_", "Linux_x64", "linux x64", "linux-x64"] {
            assert_eq!(
                PlatformId::parse(bad),
                Err(DelegateError::InvalidPlatform(bad.to_string())),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_os_and_arch_parts() {
        let platform = PlatformId::new("unknown_os_arch");
        assert_eq!(platform.os(), "unknown");
        assert_eq!(platform.arch(), "os_arch");
        assert_eq!(platform.os_family(), None);

        assert_eq!(PlatformId::DARWIN_ARM64.os_family(), Some(OsFamily::MacOs));
        assert_eq!(PlatformId::WIN32_X64.arch(), "x64");
    }

    #[test]
    fn test_library_extension() {
        assert_eq!(OsFamily::Linux.library_extension(), ".so");
        assert_eq!(OsFamily::Windows.library_extension(), ".dll");
        assert_eq!(OsFamily::MacOs.library_extension(), ".dylib");
    }

    #[test]
    fn test_supported_platforms_have_family() {
        for platform in SUPPORTED_PLATFORMS.iter() {
            assert!(platform.os_family().is_some(), "{}", platform);
            assert!(platform.is_supported());
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&PlatformId::LINUX_X64).unwrap();
        assert_eq!(json, "\"linux_x64\"");

        let back: PlatformId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlatformId::LINUX_X64);
    }
}
