//! Typed wrappers for asset extraction.
//!
//! Asset paths coming out of a namespace listing are untrusted strings; they
//! only become [`AssetPath`] values through validation, and destination paths
//! are only ever derived from a resolved [`DestDir`].

pub mod asset_path;
pub mod dest_dir;
pub mod node_kind;

pub use asset_path::AssetPath;
pub use dest_dir::DestDir;
pub use node_kind::NodeKind;
