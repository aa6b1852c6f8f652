//! Extraction configuration.

use crate::AssetPath;

/// What to do with a source directory that has no children.
///
/// A namespace that cannot classify its nodes makes an empty directory
/// indistinguishable from a file; the extractor then attempts a file copy,
/// fails to open the source and skips it. For namespaces that do report
/// node kinds this policy decides the outcome explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyDirPolicy {
    /// Leave no trace of empty source directories at the destination.
    #[default]
    Skip,

    /// Create an empty directory at the mirrored destination path.
    Create,
}

/// Configuration for a single extraction.
///
/// # Examples
///
/// ```
/// use assetmirror_core::AssetPath;
/// use assetmirror_core::EmptyDirPolicy;
/// use assetmirror_core::ExtractConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Skip existing files, mirror the whole namespace
/// let config = ExtractConfig::default();
/// assert!(!config.force);
///
/// // Overwrite everything under "data/"
/// let custom = ExtractConfig {
///     force: true,
///     empty_dirs: EmptyDirPolicy::Create,
///     source_root: AssetPath::parse("data")?,
/// };
/// assert!(custom.force);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Overwrite files that already exist at the destination.
    pub force: bool,

    /// Handling of empty source directories.
    pub empty_dirs: EmptyDirPolicy,

    /// Namespace node the walk starts from; it maps onto the destination
    /// root. Defaults to the namespace root.
    pub source_root: AssetPath,
}

impl ExtractConfig {
    /// Creates a configuration with the given force flag and defaults for
    /// everything else.
    #[must_use]
    pub fn with_force(force: bool) -> Self {
        Self {
            force,
            ..Self::default()
        }
    }

    /// Sets the empty directory policy.
    #[must_use]
    pub fn empty_dirs(mut self, policy: EmptyDirPolicy) -> Self {
        self.empty_dirs = policy;
        self
    }

    /// Restricts the walk to a subtree of the namespace.
    #[must_use]
    pub fn source_root(mut self, root: AssetPath) -> Self {
        self.source_root = root;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert!(!config.force);
        assert_eq!(config.empty_dirs, EmptyDirPolicy::Skip);
        assert!(config.source_root.is_root());
    }

    #[test]
    fn test_builder_setters() {
        let config = ExtractConfig::with_force(true)
            .empty_dirs(EmptyDirPolicy::Create)
            .source_root(AssetPath::parse("audio/bgm").unwrap());
        assert!(config.force);
        assert_eq!(config.empty_dirs, EmptyDirPolicy::Create);
        assert_eq!(config.source_root.as_str(), "audio/bgm");
    }
}
