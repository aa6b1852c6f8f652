//! Package format detection.

pub mod detect;

pub use detect::PackageFormat;
pub use detect::detect_format;
