//! # Builder - Documentation for One Package
//!
//! The builder owns everything that outlives a single declaration: the
//! [`FileSet`] positions are resolved against, the [`SourceRegistry`] that
//! gives each file a stable index, the printing options, and one scratch
//! buffer reused for every rendering.
//!
//! ```text
//! add_source() ──→ SourceRegistry ──→ parse_sources() ──→ ParsedPackage
//!                                                            │
//!        print_decl / print_example / print_source ←─────────┤
//!                                                            ↓
//!                                                  build_package() → PackageDoc
//! ```
//!
//! All rendering goes through `&mut self`, so one builder serves one
//! caller at a time. Builders for different packages are independent.

mod example;
mod package;
mod position;
mod render;
mod snippet;
mod sources;

use std::sync::Arc;

use codemark_syntax::ast::{Decl, File};
use codemark_syntax::{FileSet, ParseError, PrinterConfig, Resolver, parse_file};

use crate::annotate::{Visitor, correlate};
use crate::models::Code;

pub use example::{Example, collect_examples, format_example_text};
pub use sources::{Source, SourceRegistry};

/// Options fixed for the lifetime of a [`Builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub printer: PrinterConfig,
    /// Import paths whose members are never linked.
    pub interop_namespaces: Vec<String>,
    /// Attach raw source text to function docs.
    pub include_source: bool,
    /// Collect examples from `_test` files.
    pub include_examples: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            printer: PrinterConfig::default(),
            interop_namespaces: vec!["C".to_string()],
            include_source: true,
            include_examples: true,
        }
    }
}

/// One registered source after parsing.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    /// Registry index, as used by [`crate::models::Pos::file`].
    pub index: usize,
    pub name: String,
    pub file: File,
    pub errors: Vec<ParseError>,
}

impl ParsedSource {
    pub fn is_test(&self) -> bool {
        self.name.ends_with("_test.go")
    }
}

/// Every registered source, parsed, in registry order.
#[derive(Debug, Clone, Default)]
pub struct ParsedPackage {
    pub files: Vec<ParsedSource>,
}

impl ParsedPackage {
    /// Files that make up the package proper.
    pub fn package_files(&self) -> impl Iterator<Item = &ParsedSource> {
        self.files.iter().filter(|f| !f.is_test())
    }

    pub fn test_files(&self) -> impl Iterator<Item = &ParsedSource> {
        self.files.iter().filter(|f| f.is_test())
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| !f.errors.is_empty())
    }
}

#[derive(Debug)]
pub struct Builder {
    fset: FileSet,
    sources: SourceRegistry,
    options: BuildOptions,
    buf: String,
}

impl Builder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            fset: FileSet::new(),
            sources: SourceRegistry::new(),
            options,
            buf: String::new(),
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Register a source file and return its index.
    pub fn add_source(&mut self, name: &str, data: impl Into<Arc<str>>) -> usize {
        self.sources.add(name, data)
    }

    pub fn file_set(&self) -> &FileSet {
        &self.fset
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// Parse every registered source into this builder's file set.
    ///
    /// Syntax errors are logged and kept alongside the partial trees; they
    /// never stop the build.
    pub fn parse_sources(&mut self) -> ParsedPackage {
        let sources: Vec<_> = self
            .sources
            .iter()
            .map(|s| (s.index, s.name.clone(), Arc::clone(&s.data)))
            .collect();
        let mut files = Vec::with_capacity(sources.len());
        for (index, name, data) in sources {
            let parsed = parse_file(&mut self.fset, &name, &data);
            for err in &parsed.errors {
                let line = self.fset.line(err.span.start).unwrap_or(0);
                log::warn!("{name}:{line}: {err}");
            }
            files.push(ParsedSource {
                index,
                name,
                file: parsed.file,
                errors: parsed.errors,
            });
        }
        files.sort_by_key(|f| f.index);
        ParsedPackage { files }
    }

    /// Render a declaration and annotate its identifiers and comments.
    ///
    /// A declaration the printer rejects comes back as its error message
    /// with no annotations.
    pub fn print_decl(&mut self, decl: &Decl, resolver: &dyn Resolver) -> Code {
        let intents = Visitor::new(resolver, &self.options.interop_namespaces).visit_decl(decl);
        if let Err(code) = self.render("declaration", |printer, buf| printer.print_decl(decl, buf)) {
            return code;
        }
        let text = self.buf.clone();
        let paths = intents.paths.clone();
        Code {
            annotations: correlate(&text, intents),
            text,
            paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnnotationKind;
    use codemark_syntax::PackageScope;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_errors_do_not_stop_the_build() {
        let mut builder = Builder::new(BuildOptions::default());
        builder.add_source("ok.go", "package p\n\nvar A = 1\n");
        builder.add_source("bad.go", "package p\n\n) junk\n\nvar B = 2\n");
        builder.add_source("p_test.go", "package p\n");
        let pkg = builder.parse_sources();

        assert!(pkg.has_errors());
        assert_eq!(pkg.package_files().count(), 2);
        assert_eq!(pkg.test_files().count(), 1);
        assert_eq!(pkg.files[1].index, 1);
        assert!(!pkg.files[1].file.decls.is_empty());
    }

    #[test]
    fn print_decl_links_package_members() {
        let mut builder = Builder::new(BuildOptions::default());
        builder.add_source(
            "p.go",
            "package p\n\nimport \"io\"\n\ntype Size int\n\nfunc Copy(dst io.Writer, n Size) error\n",
        );
        let pkg = builder.parse_sources();
        let file = &pkg.files[0].file;
        let scope = PackageScope::new([file]);

        let code = builder.print_decl(&file.decls[2], &scope);
        assert_eq!(code.text, "func Copy(dst io.Writer, n Size) error");
        assert_eq!(code.paths, vec!["io".to_string()]);
        let found: Vec<_> = code
            .annotations
            .iter()
            .map(|a| (code.slice(a), a.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                ("io", AnnotationKind::PackageLink),
                ("Writer", AnnotationKind::Link),
                ("Size", AnnotationKind::Link),
                ("error", AnnotationKind::Builtin),
            ]
        );
    }

    #[test]
    fn unprintable_declaration_becomes_error_text() {
        let mut builder = Builder::new(BuildOptions::default());
        let decl = Decl::Bad(codemark_syntax::Span::default());
        let code = builder.print_decl(&decl, &|_: &codemark_syntax::ast::Ident| {
            codemark_syntax::Binding::Unbound
        });
        assert!(code.text.contains("malformed declaration"));
        assert!(code.annotations.is_empty());
        assert!(code.paths.is_empty());
    }
}
