//! Expressions and type expressions.

use super::{Emitter, RenderError, RenderResult};
use crate::ast::{BinaryOp, ChanDir, Expr, UnaryOp};
use crate::source::BytePos;

/// Binary operators at or below this precedence are always spaced.
const ALWAYS_SPACED: u8 = 3;

impl Emitter<'_> {
    pub(super) fn expr(&mut self, e: &Expr) -> RenderResult {
        match e {
            Expr::Ident(id) => self.text(&id.name),
            Expr::BasicLit(lit) => self.text(&lit.value),
            Expr::CompositeLit {
                ty,
                lbrace,
                elts,
                rbrace,
            } => {
                if let Some(ty) = ty {
                    self.expr(ty)?;
                }
                self.composite_body(*lbrace, elts, *rbrace)?;
            }
            Expr::FuncLit { ty, body } => {
                self.text("func");
                self.signature(ty)?;
                self.text(" ");
                self.block(body)?;
            }
            Expr::Paren { x, .. } => {
                self.text("(");
                self.expr(x)?;
                self.text(")");
            }
            Expr::Selector { x, sel } => {
                self.expr(x)?;
                self.text(".");
                self.text(&sel.name);
            }
            Expr::Index { x, indices, .. } => {
                self.expr(x)?;
                self.text("[");
                self.expr_list(indices)?;
                self.text("]");
            }
            Expr::Slice {
                x,
                low,
                high,
                max,
                slice3,
                ..
            } => {
                self.expr(x)?;
                self.text("[");
                self.opt_expr(low.as_deref())?;
                self.text(":");
                self.opt_expr(high.as_deref())?;
                if *slice3 {
                    self.text(":");
                    self.opt_expr(max.as_deref())?;
                }
                self.text("]");
            }
            Expr::TypeAssert { x, ty, .. } => {
                self.expr(x)?;
                self.text(".(");
                match ty {
                    Some(ty) => self.expr(ty)?,
                    None => self.text("type"),
                }
                self.text(")");
            }
            Expr::Call {
                fun,
                args,
                ellipsis,
                ..
            } => {
                self.expr(fun)?;
                self.text("(");
                self.expr_list(args)?;
                if *ellipsis {
                    self.text("...");
                }
                self.text(")");
            }
            Expr::Star { x, .. } => {
                self.text("*");
                self.expr(x)?;
            }
            Expr::Unary { op, x, .. } => {
                self.text(op.as_str());
                self.expr(x)?;
            }
            Expr::Binary { .. } => self.binary(e, min_precedence(e))?,
            Expr::KeyValue { key, value } => {
                self.expr(key)?;
                self.text(": ");
                self.expr(value)?;
            }
            Expr::Ellipsis { elt, .. } => {
                self.text("...");
                self.opt_expr(elt.as_deref())?;
            }
            Expr::ArrayType { len, elt, .. } => {
                self.text("[");
                self.opt_expr(len.as_deref())?;
                self.text("]");
                self.expr(elt)?;
            }
            Expr::StructType(st) => self.struct_type(st)?,
            Expr::FuncType(ft) => {
                self.text("func");
                self.signature(ft)?;
            }
            Expr::InterfaceType(it) => self.interface_type(it)?,
            Expr::MapType { key, value, .. } => {
                self.text("map[");
                self.expr(key)?;
                self.text("]");
                self.expr(value)?;
            }
            Expr::ChanType { dir, value, .. } => {
                self.text(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.expr(value)?;
            }
            Expr::Bad(span) => return Err(RenderError::BadExpr(span.start)),
        }
        Ok(())
    }

    pub(super) fn expr_list(&mut self, list: &[Expr]) -> RenderResult {
        for (i, e) in list.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            self.expr(e)?;
        }
        Ok(())
    }

    fn opt_expr(&mut self, e: Option<&Expr>) -> RenderResult {
        match e {
            Some(e) => self.expr(e),
            None => Ok(()),
        }
    }

    /// Print a binary expression tree. Operators binding tighter than the
    /// loosest operator in the tree lose their surrounding spaces, so
    /// `a*b + c` and `i < n-1` read the way they group.
    fn binary(&mut self, e: &Expr, cutoff: u8) -> RenderResult {
        let Expr::Binary { x, op, y } = e else {
            return self.expr(e);
        };
        let prec = op.precedence();
        let spaced = prec <= ALWAYS_SPACED || prec <= cutoff || needs_space(*op, y);
        self.binary(x, cutoff)?;
        if spaced {
            self.text(" ");
            self.text(op.as_str());
            self.text(" ");
        } else {
            self.text(op.as_str());
        }
        self.binary(y, cutoff)
    }

    fn composite_body(&mut self, lbrace: BytePos, elts: &[Expr], rbrace: BytePos) -> RenderResult {
        self.text("{");
        if elts.is_empty() {
            self.text("}");
            return Ok(());
        }
        if !self.spans_lines(lbrace, rbrace) {
            self.expr_list(elts)?;
            self.text("}");
            return Ok(());
        }

        self.mark_line(lbrace);
        self.indent += 1;
        let mut cells = Vec::with_capacity(elts.len());
        for elt in elts {
            cells.push(match elt {
                Expr::KeyValue { key, value } => (
                    Some(self.render(|e| e.expr(key))?),
                    self.render(|e| e.expr(value))?,
                ),
                other => (None, self.render(|e| e.expr(other))?),
            });
        }
        let widths = self.key_widths(elts, &cells);

        for (i, (elt, (key, value))) in elts.iter().zip(&cells).enumerate() {
            let start = elt.span().start;
            let printed = self.flush_comments(start, i == 0);
            self.line_break_for(start, i == 0 && !printed);
            if let Some(key) = key {
                self.text(key);
                self.text(":");
                let pad = widths[i].saturating_sub(key.chars().count()) + 1;
                self.text(&" ".repeat(pad));
            }
            self.text(value);
            self.text(",");
            self.mark_line(elt.span().end);
        }
        self.flush_comments(rbrace, false);
        self.indent -= 1;
        self.nl();
        self.text("}");
        self.mark_line(rbrace);
        Ok(())
    }

    /// Key widths for aligning values in runs of consecutive single-line
    /// key-value elements. A blank source line or any other element ends
    /// a run.
    fn key_widths(&self, elts: &[Expr], cells: &[(Option<String>, String)]) -> Vec<usize> {
        let alignable = |i: usize| {
            let (key, value) = &cells[i];
            key.as_ref().is_some_and(|k| !k.contains('\n')) && !value.contains('\n')
        };
        let mut widths = vec![0; cells.len()];
        let mut i = 0;
        while i < cells.len() {
            if !alignable(i) {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while j < cells.len()
                && alignable(j)
                && !self.has_gap(elts[j - 1].span().end, elts[j].span().start)
            {
                j += 1;
            }
            let width = cells[i..j]
                .iter()
                .filter_map(|(k, _)| k.as_ref().map(|k| k.chars().count()))
                .max()
                .unwrap_or(0);
            widths[i..j].fill(width);
            i = j;
        }
        widths
    }
}

fn min_precedence(e: &Expr) -> u8 {
    match e {
        Expr::Binary { x, op, y } => op
            .precedence()
            .min(min_precedence(x))
            .min(min_precedence(y)),
        _ => u8::MAX,
    }
}

/// `a - -b` must not collapse into `a--b`.
fn needs_space(op: BinaryOp, y: &Expr) -> bool {
    matches!(
        (op, y),
        (BinaryOp::Sub, Expr::Unary { op: UnaryOp::Neg, .. })
            | (BinaryOp::Add, Expr::Unary { op: UnaryOp::Plus, .. })
            | (BinaryOp::And | BinaryOp::AndNot, Expr::Unary { op: UnaryOp::Xor, .. })
            | (BinaryOp::Lt, Expr::Unary { op: UnaryOp::Neg | UnaryOp::Recv, .. })
    )
}

#[cfg(test)]
mod tests {
    use super::super::tests::print_first_decl;
    use super::super::{Printer, PrinterConfig};
    use crate::{FileSet, parse_file};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn print_value(expr: &str) -> String {
        let src = format!("package p\n\nvar v = {expr}\n");
        let out = print_first_decl(&src);
        out.strip_prefix("var v = ").unwrap_or(&out).to_string()
    }

    #[rstest]
    #[case("a*b+c", "a*b + c")]
    #[case("i<n-1", "i < n-1")]
    #[case("a * b * c", "a * b * c")]
    #[case("x&&y||!z", "x && y || !z")]
    #[case("(a+b)*c", "(a + b) * c")]
    #[case("a - -b", "a - -b")]
    #[case("x<<1|y", "x<<1 | y")]
    fn binary_spacing(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(print_value(input), expected);
    }

    #[rstest]
    #[case("s[1:]", "s[1:]")]
    #[case("s[:n:cap(s)]", "s[:n:cap(s)]")]
    #[case("x.(io.Reader)", "x.(io.Reader)")]
    #[case("f(xs...)", "f(xs...)")]
    #[case("<-ch", "<-ch")]
    #[case("&T{A: 1}", "&T{A: 1}")]
    #[case("[]int{1,2,3}", "[]int{1, 2, 3}")]
    #[case("map[string][]*T{}", "map[string][]*T{}")]
    #[case("make(chan<- int)", "make(chan<- int)")]
    #[case("Pair[int, string]{}", "Pair[int, string]{}")]
    fn operands(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(print_value(input), expected);
    }

    #[test]
    fn multi_line_composite_literal_aligns_values() {
        let out = print_first_decl(
            "package p\n\nvar Defaults = Options{\n\tName: \"x\",\n\tMaxRetries: 3,\n\n\tVerbose: true}\n",
        );
        assert_snapshot!(out, @r#"
        var Defaults = Options{
            Name:       "x",
            MaxRetries: 3,

            Verbose: true,
        }
        "#);
    }

    #[test]
    fn func_literal_body_is_printed() {
        let out = print_first_decl("package p\n\nvar F = func(x int) int {\n\treturn x*2 + 1\n}\n");
        assert_snapshot!(out, @r"
        var F = func(x int) int {
            return x*2 + 1
        }
        ");
    }

    #[test]
    fn composite_literals_stay_inline_without_line_info() {
        let mut fset = FileSet::new();
        let parsed = parse_file(&mut fset, "p.go", "package p\nvar v = T{\nA: 1,\n}\n");
        let mut out = String::new();
        Printer::new(PrinterConfig::default())
            .print_decl(&parsed.file.decls[0], &mut out)
            .unwrap();
        assert_eq!(out, "var v = T{A: 1}");
    }
}
