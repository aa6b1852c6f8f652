//! Namespace inspection without extraction.
//!
//! This module walks an asset namespace the same way extraction does, but
//! only records what it finds. Nothing is written to disk.
//!
//! # Examples
//!
//! ```no_run
//! use assetmirror_core::AssetPath;
//! use assetmirror_core::list_assets;
//! use assetmirror_core::namespace::open_package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let assets = open_package("app.apk", Some("assets"))?;
//! let manifest = list_assets(&assets, &AssetPath::root())?;
//! println!("Package contains {} files", manifest.total_files());
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod manifest;

pub use list::list_assets;
pub use manifest::AssetManifest;
pub use manifest::ManifestEntry;
