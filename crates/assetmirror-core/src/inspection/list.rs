//! Namespace listing implementation.

use crate::AssetNamespace;
use crate::AssetPath;
use crate::ExtractionError;
use crate::LOG_TARGET;
use crate::NodeKind;
use crate::Result;
use crate::inspection::manifest::AssetManifest;

/// Lists every node reachable from `root` without extracting.
///
/// Failures below `root` are contained the same way extraction contains
/// them: logged, counted in `nodes_failed`, and the walk continues.
///
/// # Errors
///
/// Returns `ExtractionError::ListFailed` if `root` itself cannot be listed.
///
/// # Examples
///
/// ```
/// use assetmirror_core::AssetPath;
/// use assetmirror_core::NodeKind;
/// use assetmirror_core::list_assets;
/// use assetmirror_core::namespace::MemoryNamespace;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let assets = MemoryNamespace::new()
///     .with_file("a/b.txt", "x")?
///     .with_file("a/c/d.txt", "y")?;
///
/// let manifest = list_assets(&assets, &AssetPath::root())?;
/// let paths: Vec<_> = manifest.entries.iter().map(|e| e.path.as_str()).collect();
/// assert_eq!(paths, ["a", "a/b.txt", "a/c", "a/c/d.txt"]);
/// assert_eq!(manifest.total_files(), 2);
/// # Ok(())
/// # }
/// ```
pub fn list_assets<N: AssetNamespace + ?Sized>(
    namespace: &N,
    root: &AssetPath,
) -> Result<AssetManifest> {
    let children = namespace
        .list(root)
        .map_err(|source| ExtractionError::ListFailed {
            path: root.to_string(),
            source,
        })?;

    let mut manifest = AssetManifest::new(root.clone());
    walk_children(namespace, root, children, &mut manifest);

    tracing::debug!(
        target: LOG_TARGET,
        root = %root,
        entries = manifest.total_entries(),
        "listed assets"
    );

    Ok(manifest)
}

fn walk_children<N: AssetNamespace + ?Sized>(
    namespace: &N,
    parent: &AssetPath,
    children: Vec<String>,
    manifest: &mut AssetManifest,
) {
    for name in children {
        let path = match parent.join(&name) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    parent = %parent,
                    name = %name.escape_debug(),
                    error = %e,
                    "skipping invalid asset name"
                );
                manifest.nodes_failed += 1;
                continue;
            }
        };

        match namespace.list(&path) {
            Ok(grandchildren) if grandchildren.is_empty() => {
                let kind = namespace.kind(&path);
                manifest.push(path, kind);
            }
            Ok(grandchildren) => {
                manifest.push(path.clone(), Some(NodeKind::Directory));
                walk_children(namespace, &path, grandchildren, manifest);
            }
            Err(e) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    path = %path,
                    error = %e,
                    "failed to list assets"
                );
                manifest.nodes_failed += 1;
            }
        }
    }
}
