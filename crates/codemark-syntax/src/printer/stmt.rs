//! Blocks and statements, with free-floating comments interleaved.

use super::{Emitter, RenderError, RenderResult};
use crate::ast::{BlockStmt, CaseClause, CommClause, Stmt};
use crate::source::BytePos;

impl Emitter<'_> {
    pub(super) fn block(&mut self, block: &BlockStmt) -> RenderResult {
        self.text("{");
        let has_comments = self
            .comments
            .get(self.next_comment)
            .is_some_and(|g| g.span().start < block.rbrace);
        let has_stmts = block.stmts.iter().any(|s| !matches!(s, Stmt::Empty(_)));
        if !has_stmts && !has_comments {
            self.text("}");
            self.mark_line(block.rbrace);
            return Ok(());
        }

        self.mark_line(block.lbrace);
        self.indent += 1;
        let printed = self.stmt_list(&block.stmts)?;
        self.flush_comments(block.rbrace, !printed);
        self.indent -= 1;
        self.nl();
        self.text("}");
        self.mark_line(block.rbrace);
        Ok(())
    }

    /// Print statements one per line. Returns whether anything was printed.
    fn stmt_list(&mut self, stmts: &[Stmt]) -> Result<bool, RenderError> {
        let mut first = true;
        for s in stmts {
            if matches!(s, Stmt::Empty(_)) {
                continue;
            }
            let span = s.span();
            if self.flush_comments(span.start, first) {
                first = false;
            }
            self.line_break_for(span.start, first);
            first = false;
            self.stmt(s)?;
            self.mark_line(span.end);
        }
        Ok(!first)
    }

    pub(super) fn stmt(&mut self, s: &Stmt) -> RenderResult {
        match s {
            Stmt::Decl(decl) => self.gen_decl(decl)?,
            Stmt::Empty(_) => {}
            Stmt::Labeled { label, stmt } => {
                let indent = self.indent;
                self.indent = indent.saturating_sub(1);
                self.text(&label.name);
                self.text(":");
                self.indent = indent;
                if !matches!(**stmt, Stmt::Empty(_)) {
                    self.nl();
                    self.stmt(stmt)?;
                }
            }
            Stmt::Expr(x) => self.expr(x)?,
            Stmt::Send { chan, value } => {
                self.expr(chan)?;
                self.text(" <- ");
                self.expr(value)?;
            }
            Stmt::IncDec { x, inc, .. } => {
                self.expr(x)?;
                self.text(if *inc { "++" } else { "--" });
            }
            Stmt::Assign { lhs, op, rhs } => {
                self.expr_list(lhs)?;
                self.text(" ");
                self.text(op.as_str());
                self.text(" ");
                self.expr_list(rhs)?;
            }
            Stmt::Go { call, .. } => {
                self.text("go ");
                self.expr(call)?;
            }
            Stmt::Defer { call, .. } => {
                self.text("defer ");
                self.expr(call)?;
            }
            Stmt::Return { results, .. } => {
                self.text("return");
                if !results.is_empty() {
                    self.text(" ");
                    self.expr_list(results)?;
                }
            }
            Stmt::Branch { kind, label, .. } => {
                self.text(kind.as_str());
                if let Some(label) = label {
                    self.text(" ");
                    self.text(&label.name);
                }
            }
            Stmt::Block(block) => self.block(block)?,
            Stmt::If {
                init,
                cond,
                body,
                els,
                ..
            } => {
                self.text("if ");
                self.init(init.as_deref())?;
                self.expr(cond)?;
                self.text(" ");
                self.block(body)?;
                if let Some(els) = els {
                    self.text(" else ");
                    self.stmt(els)?;
                }
            }
            Stmt::Switch {
                pos,
                init,
                tag,
                clauses,
                rbrace,
            } => {
                self.text("switch ");
                self.init(init.as_deref())?;
                if let Some(tag) = tag {
                    self.expr(tag)?;
                    self.text(" ");
                }
                self.text("{");
                self.mark_line(*pos);
                for clause in clauses {
                    self.case_clause(clause)?;
                }
                self.close_clauses(*rbrace);
            }
            Stmt::TypeSwitch {
                pos,
                init,
                assign,
                clauses,
                rbrace,
            } => {
                self.text("switch ");
                self.init(init.as_deref())?;
                self.stmt(assign)?;
                self.text(" {");
                self.mark_line(*pos);
                for clause in clauses {
                    self.case_clause(clause)?;
                }
                self.close_clauses(*rbrace);
            }
            Stmt::Select {
                pos,
                clauses,
                rbrace,
            } => {
                self.text("select {");
                self.mark_line(*pos);
                for clause in clauses {
                    self.comm_clause(clause)?;
                }
                self.close_clauses(*rbrace);
            }
            Stmt::For {
                init,
                cond,
                post,
                body,
                ..
            } => {
                self.text("for ");
                if init.is_some() || post.is_some() {
                    if let Some(init) = init {
                        self.stmt(init)?;
                    }
                    self.text("; ");
                    if let Some(cond) = cond {
                        self.expr(cond)?;
                    }
                    self.text("; ");
                    if let Some(post) = post {
                        self.stmt(post)?;
                        self.text(" ");
                    }
                } else if let Some(cond) = cond {
                    self.expr(cond)?;
                    self.text(" ");
                }
                self.block(body)?;
            }
            Stmt::Range {
                key,
                value,
                define,
                x,
                body,
                ..
            } => {
                self.text("for ");
                if let Some(key) = key {
                    self.expr(key)?;
                    if let Some(value) = value {
                        self.text(", ");
                        self.expr(value)?;
                    }
                    self.text(if *define { " := " } else { " = " });
                }
                self.text("range ");
                self.expr(x)?;
                self.text(" ");
                self.block(body)?;
            }
            Stmt::Bad(span) => return Err(RenderError::BadStmt(span.start)),
        }
        Ok(())
    }

    /// `init; ` of an if or switch header.
    fn init(&mut self, init: Option<&Stmt>) -> RenderResult {
        if let Some(init) = init {
            self.stmt(init)?;
            self.text("; ");
        }
        Ok(())
    }

    fn case_clause(&mut self, clause: &CaseClause) -> RenderResult {
        self.flush_comments(clause.case, false);
        self.line_break_for(clause.case, true);
        match &clause.list {
            Some(list) => {
                self.text("case ");
                self.expr_list(list)?;
                self.text(":");
            }
            None => self.text("default:"),
        }
        self.mark_line(clause.case);
        self.clause_body(&clause.body)
    }

    fn comm_clause(&mut self, clause: &CommClause) -> RenderResult {
        self.flush_comments(clause.case, false);
        self.line_break_for(clause.case, true);
        match &clause.comm {
            Some(comm) => {
                self.text("case ");
                self.stmt(comm)?;
                self.text(":");
            }
            None => self.text("default:"),
        }
        self.mark_line(clause.case);
        self.clause_body(&clause.body)
    }

    fn clause_body(&mut self, body: &[Stmt]) -> RenderResult {
        self.indent += 1;
        self.stmt_list(body)?;
        self.indent -= 1;
        Ok(())
    }

    fn close_clauses(&mut self, rbrace: BytePos) {
        self.flush_comments(rbrace, false);
        self.nl();
        self.text("}");
        self.mark_line(rbrace);
    }
}
