use codemark_syntax::ast::FuncDecl;

use super::Builder;
use crate::models::SourceSnippet;

impl Builder {
    /// The source lines of a function, from its `func` keyword through the
    /// line holding its end. `None` when the function's file is not
    /// registered.
    pub fn print_source(&self, func: &FuncDecl) -> Option<SourceSnippet> {
        let span = func.span();
        let start = self.fset.position(span.start)?;
        let end = self.fset.position(span.end)?;
        let source = self.sources.get(&start.filename)?;
        let lines = end.line.saturating_sub(start.line) as usize + 1;
        let text: String = source
            .data
            .get(start.offset..)?
            .split_inclusive('\n')
            .take(lines)
            .collect();
        Some(SourceSnippet {
            text: text.replace('\0', ""),
            filename: source.name.clone(),
            line: start.line,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{BuildOptions, Builder};
    use codemark_syntax::ast::Decl;
    use pretty_assertions::assert_eq;

    #[test]
    fn function_source_lines() {
        let mut builder = Builder::new(BuildOptions::default());
        builder.add_source(
            "f.go",
            "package f\n\n// Add adds.\nfunc Add(a, b int) int {\n\treturn a + b\n}\n\nvar after = 1\n",
        );
        let pkg = builder.parse_sources();
        let Decl::Func(func) = &pkg.files[0].file.decls[0] else {
            panic!("expected a function");
        };
        let snippet = builder.print_source(func).unwrap();
        assert_eq!(snippet.text, "func Add(a, b int) int {\n\treturn a + b\n}\n");
        assert_eq!(snippet.filename, "f.go");
        assert_eq!(snippet.line, 4);
    }

    #[test]
    fn nul_bytes_are_stripped() {
        let mut builder = Builder::new(BuildOptions::default());
        builder.add_source("g.go", "package g\n\nfunc G() { _ = \"a\x00b\" }\n");
        let pkg = builder.parse_sources();
        let Decl::Func(func) = &pkg.files[0].file.decls[0] else {
            panic!("expected a function");
        };
        assert_eq!(
            builder.print_source(func).unwrap().text,
            "func G() { _ = \"ab\" }\n"
        );
    }
}
