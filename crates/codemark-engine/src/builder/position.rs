use codemark_syntax::Span;

use super::Builder;
use crate::models::Pos;

impl Builder {
    /// Registered file, start line and line span of a node.
    ///
    /// Positions in files that were not registered through
    /// [`Builder::add_source`] yield `Pos::default()`.
    pub fn position(&self, span: Span) -> Pos {
        let Some(start) = self.fset.position(span.start) else {
            return Pos::default();
        };
        let Some(source) = self.sources.get(&start.filename) else {
            return Pos::default();
        };
        let same_file = self
            .fset
            .position(span.end)
            .filter(|end| end.file == start.file)
            .map(|end| end.line);
        let line_span = same_file
            .and_then(|end| end.checked_sub(start.line))
            .and_then(|n| u16::try_from(n).ok());
        Pos {
            file: Some(source.index),
            line: start.line,
            line_span,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{BuildOptions, Builder};
    use crate::models::Pos;
    use codemark_syntax::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn positions_of_registered_declarations() {
        let mut builder = Builder::new(BuildOptions::default());
        builder.add_source("a.go", "package a\n\nvar X = 1\n");
        let src = "package a\n\n// F does things.\nfunc F() {\n\treturn\n}\n";
        builder.add_source("b.go", src);
        let pkg = builder.parse_sources();

        let func = pkg.files[1].file.decls[0].span();
        assert_eq!(
            builder.position(func),
            Pos {
                file: Some(1),
                line: 4,
                line_span: Some(2),
            }
        );

        let var = pkg.files[0].file.decls[0].span();
        assert_eq!(builder.position(var).line_span, Some(0));
    }

    #[test]
    fn unknown_positions_are_unset() {
        let builder = Builder::new(BuildOptions::default());
        assert_eq!(builder.position(Span::new(10, 20)), Pos::default());
    }

    #[test]
    fn span_fitting_check() {
        let lines = "\n".repeat(70_000);
        let src = format!("package a\n\nvar X = `{lines}`\n");
        let mut builder = Builder::new(BuildOptions::default());
        builder.add_source("big.go", src);
        let pkg = builder.parse_sources();
        let pos = builder.position(pkg.files[0].file.decls[0].span());
        assert_eq!(pos.line, 3);
        assert_eq!(pos.line_span, None);
    }
}
