//! Namespace walk and mirroring.

mod extractor;

pub use extractor::Extractor;
