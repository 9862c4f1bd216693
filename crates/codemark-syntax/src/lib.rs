//! # codemark-syntax
//!
//! Go source front end for documentation tooling: a [Logos] lexer, a
//! recursive-descent parser producing a plain AST, package-level name
//! resolution, and a canonical pretty-printer.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → ast::File
//!               (Logos)          (Grammar)    │
//!                                             ├─→ PackageScope (name resolution)
//!                                             └─→ Printer      (canonical text)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Tokenizes input into a flat sequence of [`SyntaxKind`] tokens. Every
//! byte belongs to some token, including whitespace and comments, so the
//! same lexer can re-scan printed output and see exactly what a reader
//! sees.
//!
//! ### 2. Parser ([`parser`] module)
//!
//! Inserts the implicit semicolons of the language, groups comments, and
//! builds an [`ast::File`]. Errors are collected rather than fatal:
//! malformed regions become `Bad` nodes and parsing resumes at the next
//! declaration. Grammar rules live in `parser::grammar`.
//!
//! ### 3. Positions ([`source`] module)
//!
//! Every file added to a [`FileSet`] occupies its own range of global
//! byte positions, so a single [`BytePos`] identifies both a file and an
//! offset in it.
//!
//! ### 4. Scope ([`scope`] module)
//!
//! Answers "what does this identifier refer to" through the [`Resolver`]
//! trait: a package-level declaration, an import, or nothing declared.
//!
//! ### 5. Printer ([`printer`] module)
//!
//! Renders nodes in canonical layout.
//!
//! ## Module Structure
//!
//! ```text
//! codemark-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens)
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── source.rs        # BytePos, Span, FileSet
//! ├── ast.rs           # Declarations, specs, expressions, statements
//! ├── scope.rs         # Binding, Resolver, PackageScope
//! ├── parser/
//! │   ├── mod.rs       # Parser struct, semicolon insertion, parse_file()
//! │   └── grammar/
//! │       ├── mod.rs   # Files, declarations and specs
//! │       ├── types.rs # Type expressions and signatures
//! │       ├── expr.rs  # Expressions
//! │       └── stmt.rs  # Statements and blocks
//! └── printer/
//!     ├── mod.rs       # Printer, Emitter, column alignment
//!     ├── decl.rs      # Declarations and struct/interface bodies
//!     ├── expr.rs      # Expressions
//!     └── stmt.rs      # Blocks and statements
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use codemark_syntax::{FileSet, Printer, PrinterConfig, parse_file};
//!
//! let mut fset = FileSet::new();
//! let parsed = parse_file(&mut fset, "hello.go", "package hello\n\nfunc Greet(name string) string { return \"hi \" + name }\n");
//! assert!(parsed.is_ok());
//!
//! let func = parsed.file.decls[0].clone();
//! let mut out = String::new();
//! Printer::new(PrinterConfig::default()).print_decl(&func, &mut out).unwrap();
//! assert!(out.starts_with("func Greet(name string) string {"));
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod scope;
pub mod source;
pub mod syntax_kind;

pub use parser::{Parse, ParseError, ParseErrors, parse_file};
pub use printer::{Printer, PrinterConfig, RenderError, RenderResult};
pub use scope::{Binding, PackageScope, Resolver};
pub use source::{BytePos, FileId, FileSet, Position, Span};
pub use syntax_kind::SyntaxKind;
