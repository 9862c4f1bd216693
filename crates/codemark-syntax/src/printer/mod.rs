//! # Printer - Canonical Source Text from the Tree
//!
//! Renders declarations, expressions and statements in the canonical
//! layout: one level of indentation per block (spaces, [`PrinterConfig::tab_width`]
//! wide), binary operators spaced according to precedence, and grouped
//! declarations and struct fields aligned in columns.
//!
//! ```
//! use codemark_syntax::{FileSet, Printer, PrinterConfig, parse_file};
//!
//! let mut fset = FileSet::new();
//! let parsed = parse_file(&mut fset, "a.go", "package a\ntype T struct{X int; Name string}\n");
//! let printer = Printer::new(PrinterConfig::default()).with_file_set(&fset);
//!
//! let mut out = String::new();
//! printer.print_decl(&parsed.file.decls[0], &mut out).unwrap();
//! assert_eq!(out, "type T struct {\n    X    int\n    Name string\n}");
//! ```
//!
//! ## Comments
//!
//! Doc and line comments attached to struct fields, interface methods and
//! grouped specs are part of the tree and always printed. Free-floating
//! comments (the ones inside function bodies) are only printed by
//! [`Printer::print_block`], which interleaves them with statements by
//! position and needs a [`FileSet`] to keep them on their original lines.
//!
//! ## Errors
//!
//! A `Bad` node cannot be rendered; printing stops with a [`RenderError`].

mod decl;
mod expr;
mod stmt;

use crate::ast::{BlockStmt, CommentGroup, Decl, Expr, Stmt};
use crate::source::{BytePos, FileSet};

/// Layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Spaces per indentation level.
    pub tab_width: usize,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self { tab_width: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("cannot print malformed expression at position {0}")]
    BadExpr(BytePos),
    #[error("cannot print malformed statement at position {0}")]
    BadStmt(BytePos),
    #[error("cannot print malformed declaration at position {0}")]
    BadDecl(BytePos),
}

pub type RenderResult = Result<(), RenderError>;

/// Pretty-printer entry points.
///
/// Each call clears the caller-owned buffer and writes into it, so callers
/// printing many nodes can reuse one allocation.
#[derive(Debug, Clone, Copy)]
pub struct Printer<'a> {
    config: PrinterConfig,
    fset: Option<&'a FileSet>,
}

impl<'a> Printer<'a> {
    pub fn new(config: PrinterConfig) -> Self {
        Self { config, fset: None }
    }

    /// Use source line information: multi-line composite literals stay
    /// multi-line, blank lines between statements and specs are kept, and
    /// comments in [`Printer::print_block`] stay on their lines.
    pub fn with_file_set(mut self, fset: &'a FileSet) -> Self {
        self.fset = Some(fset);
        self
    }

    pub fn print_decl(&self, decl: &Decl, out: &mut String) -> RenderResult {
        self.run(out, &[], |e| e.decl(decl))
    }

    pub fn print_expr(&self, expr: &Expr, out: &mut String) -> RenderResult {
        self.run(out, &[], |e| e.expr(expr))
    }

    pub fn print_stmt(&self, stmt: &Stmt, out: &mut String) -> RenderResult {
        self.run(out, &[], |e| e.stmt(stmt))
    }

    /// Print `{ ... }` with `comments` interleaved among the statements.
    pub fn print_block(
        &self,
        block: &BlockStmt,
        comments: &[CommentGroup],
        out: &mut String,
    ) -> RenderResult {
        self.run(out, comments, |e| e.block(block))
    }

    fn run<'c>(
        &self,
        out: &mut String,
        comments: &'c [CommentGroup],
        f: impl FnOnce(&mut Emitter<'c>) -> RenderResult,
    ) -> RenderResult
    where
        'a: 'c,
    {
        let mut emitter = Emitter::new(self.config, self.fset, std::mem::take(out));
        emitter.comments = comments;
        let result = f(&mut emitter);
        *out = emitter.out;
        result
    }
}

/// Output state shared by the decl, expr and stmt printers.
pub(crate) struct Emitter<'a> {
    config: PrinterConfig,
    fset: Option<&'a FileSet>,
    out: String,
    indent: usize,
    at_line_start: bool,
    comments: &'a [CommentGroup],
    next_comment: usize,
    /// Source line of the last printed item, for blank-line and same-line
    /// comment decisions.
    last_line: Option<u32>,
}

impl<'a> Emitter<'a> {
    fn new(config: PrinterConfig, fset: Option<&'a FileSet>, mut out: String) -> Self {
        out.clear();
        Self {
            config,
            fset,
            out,
            indent: 0,
            at_line_start: false,
            comments: &[],
            next_comment: 0,
            last_line: None,
        }
    }

    /// A fresh emitter at the same indentation, for rendering a cell whose
    /// width must be known before it is written.
    fn nested(&self) -> Emitter<'a> {
        let mut e = Emitter::new(self.config, self.fset, String::new());
        e.indent = self.indent;
        e
    }

    fn text(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if self.at_line_start {
            let width = self.indent * self.config.tab_width;
            self.out.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
        self.out.push_str(s);
    }

    fn nl(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    fn line(&self, pos: BytePos) -> Option<u32> {
        self.fset.and_then(|f| f.line(pos))
    }

    /// Whether two positions lie on different source lines.
    fn spans_lines(&self, start: BytePos, end: BytePos) -> bool {
        match (self.line(start), self.line(end)) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    /// Start a new output line for an item at `pos`, keeping one blank line
    /// if the source had any since the previous item.
    fn line_break_for(&mut self, pos: BytePos, first_in_block: bool) {
        let gap = match (self.last_line, self.line(pos)) {
            (Some(last), Some(line)) => line > last + 1,
            _ => false,
        };
        if gap && !first_in_block {
            self.nl();
        }
        self.nl();
    }

    fn mark_line(&mut self, pos: BytePos) {
        if let Some(line) = self.line(pos) {
            self.last_line = Some(line);
        }
    }

    /// Print pending free-floating comments that start before `pos`.
    ///
    /// A comment on the same source line as the previous item stays on that
    /// line; others get their own lines. Returns whether anything was
    /// printed on a line of its own.
    fn flush_comments(&mut self, pos: BytePos, mut first_in_block: bool) -> bool {
        let mut printed = false;
        while let Some(group) = self.comments.get(self.next_comment) {
            if group.span().start >= pos {
                break;
            }
            self.next_comment += 1;
            for comment in &group.list {
                let same_line = self.last_line.is_some()
                    && self.last_line == self.line(comment.span.start);
                if same_line && !self.at_line_start {
                    self.text(" ");
                } else {
                    self.line_break_for(comment.span.start, first_in_block);
                    first_in_block = false;
                    printed = true;
                }
                self.text(&comment.text);
                self.mark_line(comment.span.end);
            }
        }
        printed
    }

    fn comment_text(group: &CommentGroup) -> String {
        group
            .list
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Print doc comment lines, each followed by a line break.
    fn doc(&mut self, doc: Option<&CommentGroup>) {
        for comment in doc.into_iter().flat_map(|g| &g.list) {
            self.text(&comment.text);
            self.nl();
        }
    }

    /// Print rows of cells aligned in columns, one row per line, each row
    /// preceded by a line break.
    ///
    /// Rows form alignment sections; a row with a doc comment or a blank
    /// line before it starts a new section. Within a section every
    /// single-line cell that is followed by more content on its row is
    /// padded to the widest such cell in its column.
    fn rows(&mut self, rows: &[Row<'_>]) {
        let mut widths: Vec<Vec<usize>> = Vec::with_capacity(rows.len());
        let mut start = 0;
        for end in 1..=rows.len() {
            let boundary = end == rows.len() || rows[end].starts_section();
            if !boundary {
                continue;
            }
            let section = &rows[start..end];
            let columns = section.iter().map(|r| r.cells.len()).max().unwrap_or(0);
            let mut w = vec![0; columns];
            for row in section {
                for (k, cell) in row.cells.iter().enumerate() {
                    if !cell.contains('\n') && row.has_content_after(k) {
                        w[k] = w[k].max(cell.chars().count());
                    }
                }
            }
            widths.extend(std::iter::repeat_n(w, section.len()));
            start = end;
        }

        for (row, w) in rows.iter().zip(&widths) {
            if row.blank_before {
                self.nl();
            }
            self.nl();
            self.doc(row.doc);
            for (k, cell) in row.cells.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                self.text(cell);
                if row.has_content_after(k) {
                    let used = cell.rsplit('\n').next().unwrap_or(cell).chars().count();
                    let pad = w[k].saturating_sub(used) + 1;
                    self.text(&" ".repeat(pad));
                }
            }
        }
    }
}

/// One line of aligned output.
pub(crate) struct Row<'c> {
    blank_before: bool,
    doc: Option<&'c CommentGroup>,
    cells: Vec<String>,
}

impl Row<'_> {
    fn starts_section(&self) -> bool {
        self.blank_before || self.doc.is_some()
    }

    fn has_content_after(&self, k: usize) -> bool {
        self.cells[k + 1..].iter().any(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_file;
    use pretty_assertions::assert_eq;

    pub(super) fn print_first_decl(src: &str) -> String {
        let mut fset = FileSet::new();
        let parsed = parse_file(&mut fset, "p.go", src);
        assert_eq!(parsed.errors, vec![], "unexpected errors for {src:?}");
        let printer = Printer::new(PrinterConfig::default()).with_file_set(&fset);
        let mut out = String::new();
        printer
            .print_decl(&parsed.file.decls[0], &mut out)
            .expect("printable decl");
        out
    }

    #[test]
    fn buffer_is_cleared_before_printing() {
        let mut fset = FileSet::new();
        let parsed = parse_file(&mut fset, "p.go", "package p\nvar X int\n");
        let printer = Printer::new(PrinterConfig::default());
        let mut out = String::from("stale");
        printer.print_decl(&parsed.file.decls[0], &mut out).unwrap();
        assert_eq!(out, "var X int");
    }

    #[test]
    fn tab_width_is_configurable() {
        let mut fset = FileSet::new();
        let parsed = parse_file(&mut fset, "p.go", "package p\ntype T struct {\nX int\n}\n");
        let printer = Printer::new(PrinterConfig { tab_width: 2 });
        let mut out = String::new();
        printer.print_decl(&parsed.file.decls[0], &mut out).unwrap();
        assert_eq!(out, "type T struct {\n  X int\n}");
    }

    #[test]
    fn bad_nodes_fail_to_render() {
        let mut fset = FileSet::new();
        let parsed = parse_file(&mut fset, "p.go", "package p\nvar X = )\n");
        assert!(!parsed.errors.is_empty());
        let printer = Printer::new(PrinterConfig::default());
        let mut out = String::new();
        let err = printer
            .print_decl(&parsed.file.decls[0], &mut out)
            .unwrap_err();
        assert!(matches!(err, RenderError::BadExpr(_)));
        assert!(err.to_string().starts_with("cannot print malformed expression"));
    }
}
