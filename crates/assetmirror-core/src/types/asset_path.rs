//! Validated asset namespace path type.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;

/// A validated slash-separated path inside an asset namespace.
///
/// The namespace root is the empty path `""`. Every other path is a sequence
/// of names joined by `/`, where each name:
/// - is non-empty
/// - is not `.` or `..`
/// - contains neither `/`, `\` nor a NUL byte
///
/// Names reported by a namespace listing only become part of a path through
/// [`AssetPath::join`], so a hostile listing can never steer a write outside
/// the destination directory.
///
/// # Examples
///
/// ```
/// use assetmirror_core::AssetPath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = AssetPath::root();
/// assert!(root.is_root());
///
/// let textures = root.join("textures")?;
/// let tile = textures.join("tile.png")?;
/// assert_eq!(tile.as_str(), "textures/tile.png");
///
/// assert!(textures.join("..").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetPath(String);

impl AssetPath {
    /// Returns the namespace root (the empty path).
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Parses a slash-separated path, validating every name.
    ///
    /// Leading, trailing and repeated slashes are tolerated and collapsed, so
    /// `"/a//b/"` parses to `"a/b"`. The empty string parses to the root.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidAssetPath` if any name is `.`, `..`,
    /// or contains a backslash or NUL byte.
    pub fn parse(path: &str) -> Result<Self> {
        let mut parsed = Self::root();
        for name in path.split('/').filter(|name| !name.is_empty()) {
            parsed = parsed.join(name)?;
        }
        Ok(parsed)
    }

    /// Appends a single child name to this path.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidAssetPath` if `name` is not a valid
    /// single path segment.
    pub fn join(&self, name: &str) -> Result<Self> {
        validate_name(name)?;

        if self.is_root() {
            Ok(Self(name.to_string()))
        } else {
            let mut joined = String::with_capacity(self.0.len() + 1 + name.len());
            joined.push_str(&self.0);
            joined.push('/');
            joined.push_str(name);
            Ok(Self(joined))
        }
    }

    /// Returns `true` for the namespace root.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the names of this path (nothing for the root).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|name| !name.is_empty())
    }

    /// Returns the last name of this path, or `None` for the root.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.0.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Returns the parent of this path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind('/') {
            Some(idx) => Self(self.0[..idx].to_string()),
            None => Self::root(),
        })
    }

    /// Number of names in this path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.names().count()
    }

    /// Returns `true` if `self` is `other` or lies underneath it.
    #[must_use]
    pub fn starts_with(&self, other: &Self) -> bool {
        if other.is_root() {
            return true;
        }
        self.0 == other.0
            || (self.0.starts_with(&other.0) && self.0.as_bytes().get(other.0.len()) == Some(&b'/'))
    }

    /// Returns this path relative to `base`, or `None` if it is not beneath it.
    #[must_use]
    pub fn strip_prefix(&self, base: &Self) -> Option<Self> {
        if !self.starts_with(base) {
            return None;
        }
        if base.is_root() {
            return Some(self.clone());
        }
        let rest = self.0[base.0.len()..].trim_start_matches('/');
        Some(Self(rest.to_string()))
    }

    /// Mirrors this path underneath `base`, using the platform separator.
    #[must_use]
    pub fn mirror_under(&self, base: &Path) -> PathBuf {
        let mut mirrored = base.to_path_buf();
        for name in self.names() {
            mirrored.push(name);
        }
        mirrored
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "empty name"
    } else if name == "." {
        "current directory reference"
    } else if name == ".." {
        "parent directory reference"
    } else if name.contains('/') || name.contains('\\') {
        "name contains a path separator"
    } else if name.contains('\0') {
        "contains NUL byte"
    } else {
        return Ok(());
    };

    Err(ExtractionError::InvalidAssetPath {
        path: name.to_string(),
        reason,
    })
}
