//! # Annotation - Cross-references for Rendered Declarations
//!
//! Annotating a declaration is a two-pass protocol between the syntax tree
//! and the text the printer produced from it:
//!
//! ```text
//! Decl ──→ Visitor ──→ [Ignore, Anchor, Builtin, ...] + paths
//!   │                          │
//!   └──→ Printer ──→ text ──→ Lexer ──→ correlate() ──→ Vec<Annotation>
//! ```
//!
//! 1. The [`Visitor`] walks the declaration in the order the printer
//!    writes it and queues one [`Intent`] per identifier it will print.
//! 2. [`correlate`] lexes the printed text. Every `IDENT` token pops the
//!    next intent and, unless it is `Ignore`, becomes an annotation with
//!    that token's byte range. Comments are annotated straight from the
//!    lexer.
//!
//! The two passes never share positions: the printer is free to re-layout
//! the declaration, as long as identifiers come out in tree order.
//!
//! ## Example
//!
//! ```
//! use codemark_engine::annotate::{Visitor, correlate};
//! use codemark_engine::AnnotationKind;
//! use codemark_syntax::{FileSet, PackageScope, Printer, PrinterConfig, parse_file};
//!
//! let mut fset = FileSet::new();
//! let file = parse_file(&mut fset, "p.go", "package p\n\ntype T struct{ X int }\n").file;
//! let scope = PackageScope::new([&file]);
//!
//! let intents = Visitor::new(&scope, &[]).visit_decl(&file.decls[0]);
//! let mut text = String::new();
//! Printer::new(PrinterConfig::default()).print_decl(&file.decls[0], &mut text).unwrap();
//!
//! let kinds: Vec<_> = correlate(&text, intents).iter().map(|a| a.kind).collect();
//! assert_eq!(kinds, [AnnotationKind::Anchor, AnnotationKind::Builtin]);
//! ```

pub mod correlate;
pub mod predeclared;
pub mod visitor;

pub use correlate::{comments, correlate};
pub use predeclared::{Predeclared, is_predeclared};
pub use visitor::{Intent, Intents, Visitor};
