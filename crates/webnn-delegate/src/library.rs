//! Platform to native library path table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::platform::{PlatformId, SUPPORTED_PLATFORMS};

/// Maps each supported platform to its build of a native library.
///
/// Paths are constructed, never checked on disk. Whether the file exists is for the host
/// to find out when it loads the library. There is no fallback between
/// platforms: a platform missing from the table has no library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryPathTable {
    paths: BTreeMap<PlatformId, PathBuf>,
}

impl LibraryPathTable {
    /// Build the table for `base_name` under `root`.
    ///
    /// Every supported platform maps to `root/<platform>/<base_name><ext>`,
    /// with the extension fixed by the platform's OS family.
    pub fn build(base_name: &str, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let paths = SUPPORTED_PLATFORMS
            .iter()
            .filter_map(|platform| {
                let family = platform.os_family()?;
                let file_name = format!("{}{}", base_name, family.library_extension());
                let path = root.join(platform.as_str()).join(file_name);
                Some((platform.clone(), path))
            })
            .collect();

        Self { paths }
    }

    /// Build a table from explicit entries.
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PlatformId, P)>,
        P: Into<PathBuf>,
    {
        Self {
            paths: entries
                .into_iter()
                .map(|(platform, path)| (platform, path.into()))
                .collect(),
        }
    }

    /// Path for `platform`, or `None` if no library is shipped for it.
    pub fn lookup(&self, platform: &PlatformId) -> Option<&Path> {
        let path = self.paths.get(platform).map(PathBuf::as_path);
        tracing::debug!(
            "Library lookup for {}: {}",
            platform,
            path.map_or_else(|| "not found".to_string(), |p| p.display().to_string())
        );
        path
    }

    /// Platforms in the table, in sorted order.
    pub fn platforms(&self) -> impl Iterator<Item = &PlatformId> {
        self.paths.keys()
    }

    /// All entries, in sorted platform order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlatformId, &Path)> {
        self.paths.iter().map(|(platform, path)| (platform, path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_covers_supported_platforms() {
        let table = LibraryPathTable::build("delegate", "/opt/lib");
        assert_eq!(table.len(), SUPPORTED_PLATFORMS.len());
        for platform in SUPPORTED_PLATFORMS.iter() {
            assert!(table.lookup(platform).is_some(), "{}", platform);
        }
    }

    #[test]
    fn test_build_paths() {
        let table = LibraryPathTable::build("delegate", "/opt/lib");

        assert_eq!(
            table.lookup(&PlatformId::LINUX_ARM64),
            Some(Path::new("/opt/lib/linux_arm64/delegate.so"))
        );
        assert_eq!(
            table.lookup(&PlatformId::WIN32_X64),
            Some(Path::new("/opt/lib/win32_x64/delegate.dll"))
        );
        assert_eq!(
            table.lookup(&PlatformId::DARWIN_ARM64),
            Some(Path::new("/opt/lib/darwin_arm64/delegate.dylib"))
        );
    }

    #[test]
    fn test_lookup_unknown_platform() {
        let table = LibraryPathTable::build("delegate", "/opt/lib");
        assert_eq!(table.lookup(&PlatformId::new("unknown_os_arch")), None);
        assert_eq!(table.lookup(&PlatformId::new("win32_arm64")), None);
    }

    #[test]
    fn test_from_entries() {
        let table = LibraryPathTable::from_entries([(PlatformId::LINUX_X64, "libfoo.so.1")]);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup(&PlatformId::LINUX_X64),
            Some(Path::new("libfoo.so.1"))
        );
        assert_eq!(table.lookup(&PlatformId::LINUX_ARM64), None);
        assert!(LibraryPathTable::default().is_empty());
    }

    #[test]
    fn test_platforms_sorted() {
        let table = LibraryPathTable::build("delegate", "/opt/lib");
        let platforms: Vec<_> = table.platforms().map(PlatformId::as_str).collect();
        let mut sorted = platforms.clone();
        sorted.sort();
        assert_eq!(platforms, sorted);
    }
}
