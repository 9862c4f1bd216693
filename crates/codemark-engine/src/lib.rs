//! Cross-referenced documentation for Go packages.
//!
//! [`Builder`] parses a package's files, renders each exported declaration
//! in canonical layout, and annotates the rendering: identifiers become
//! links, anchors or builtin references, comments are marked, and every
//! declaration carries its source position. The annotation protocol
//! itself lives in [`annotate`].

pub mod annotate;
pub mod builder;
pub mod models;

// Re-export key types for easier usage
pub use builder::{
    BuildOptions, Builder, Example, ParsedPackage, ParsedSource, Source, SourceRegistry,
    collect_examples, format_example_text,
};
pub use models::*;
