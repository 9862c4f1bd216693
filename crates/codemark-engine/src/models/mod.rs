pub mod code;
pub mod package;
pub mod pos;

pub use code::{Annotation, AnnotationKind, Code};
pub use package::{ExampleDoc, FuncDoc, PackageDoc, SourceSnippet, TypeDoc, ValueDoc};
pub use pos::Pos;
