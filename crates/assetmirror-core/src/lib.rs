//! Mirrors bundled read-only asset namespaces into writable directories.
//!
//! `assetmirror-core` walks an [`AssetNamespace`] (a package archive, an
//! on-disk directory, or an in-memory tree) and materializes it under a
//! destination directory, optionally skipping files that already exist.
//! Extraction is best-effort: individual node failures are logged through
//! `tracing` under the [`LOG_TARGET`] target and never abort their siblings.
//!
//! # Examples
//!
//! ```no_run
//! use assetmirror_core::PackageContext;
//! use assetmirror_core::extract_assets;
//! use assetmirror_core::namespace::open_package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let assets = open_package("app.apk", Some("assets"))?;
//! let context = PackageContext::new(assets, Some("/data/app/files".into()));
//!
//! // Fire-and-forget: failures only show up in the logs.
//! extract_assets(&context, false);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod namespace;
pub mod report;
pub mod types;

#[cfg(test)]
mod test_utils;

/// Fixed `tracing` target attached to every event this crate emits.
pub const LOG_TARGET: &str = "asset_extractor";

// Re-export main API types
pub use api::AssetContext;
pub use api::PackageContext;
pub use api::extract_assets;
pub use api::extract_assets_with_config;
pub use api::mirror_into;
pub use config::EmptyDirPolicy;
pub use config::ExtractConfig;
pub use error::ExtractionError;
pub use error::Result;
pub use extraction::Extractor;
pub use inspection::AssetManifest;
pub use inspection::ManifestEntry;
pub use inspection::list_assets;
pub use namespace::AssetNamespace;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;

// Re-export types module for easier access
pub use types::AssetPath;
pub use types::DestDir;
pub use types::NodeKind;
