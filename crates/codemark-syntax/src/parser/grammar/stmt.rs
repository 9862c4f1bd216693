//! Statements and blocks.

use super::{bad_expr, expect_semi, expr, gen_decl};
use crate::ast::{AssignOp, BlockStmt, BranchKind, CaseClause, CommClause, Expr, Stmt};
use crate::parser::Parser;
use crate::source::Span;
use crate::syntax_kind::SyntaxKind;

pub(super) fn block(p: &mut Parser<'_>) -> BlockStmt {
    let lbrace = p.expect(SyntaxKind::LBRACE, "'{'");
    let stmts = stmt_list(p);
    let rbrace = p.expect(SyntaxKind::RBRACE, "'}'");
    BlockStmt {
        lbrace,
        stmts,
        rbrace,
    }
}

fn stmt_list(p: &mut Parser<'_>) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    while !matches!(
        p.current(),
        SyntaxKind::RBRACE | SyntaxKind::CASE_KW | SyntaxKind::DEFAULT_KW | SyntaxKind::EOF
    ) {
        if p.eat(SyntaxKind::SEMICOLON) {
            continue;
        }
        stmts.push(stmt(p));
    }
    stmts
}

fn stmt(p: &mut Parser<'_>) -> Stmt {
    let s = match p.current() {
        SyntaxKind::CONST_KW | SyntaxKind::TYPE_KW | SyntaxKind::VAR_KW => Stmt::Decl(gen_decl(p)),
        SyntaxKind::GO_KW => {
            let pos = p.bump().start;
            Stmt::Go {
                pos,
                call: expr::expr(p),
            }
        }
        SyntaxKind::DEFER_KW => {
            let pos = p.bump().start;
            Stmt::Defer {
                pos,
                call: expr::expr(p),
            }
        }
        SyntaxKind::RETURN_KW => {
            let pos = p.bump().start;
            let results = if matches!(p.current(), SyntaxKind::SEMICOLON | SyntaxKind::RBRACE) {
                Vec::new()
            } else {
                expr::expr_list(p)
            };
            Stmt::Return { pos, results }
        }
        SyntaxKind::BREAK_KW
        | SyntaxKind::CONTINUE_KW
        | SyntaxKind::GOTO_KW
        | SyntaxKind::FALLTHROUGH_KW => {
            let kind = match p.current() {
                SyntaxKind::BREAK_KW => BranchKind::Break,
                SyntaxKind::CONTINUE_KW => BranchKind::Continue,
                SyntaxKind::GOTO_KW => BranchKind::Goto,
                _ => BranchKind::Fallthrough,
            };
            let pos = p.bump().start;
            let label = (kind != BranchKind::Fallthrough && p.at(SyntaxKind::IDENT))
                .then(|| p.ident());
            Stmt::Branch { pos, kind, label }
        }
        SyntaxKind::LBRACE => Stmt::Block(block(p)),
        SyntaxKind::IF_KW => if_stmt(p),
        SyntaxKind::SWITCH_KW => switch_stmt(p),
        SyntaxKind::SELECT_KW => select_stmt(p),
        SyntaxKind::FOR_KW => for_stmt(p),
        kind if starts_simple_stmt(kind) => match simple_stmt(p, Mode::LabelOk) {
            Simple::Stmt(s @ Stmt::Labeled { .. }) => return s,
            Simple::Stmt(s) => s,
            Simple::Range { x, .. } => {
                p.error("unexpected range clause");
                Stmt::Bad(x.span())
            }
        },
        _ => {
            let start = p.pos();
            p.error_expected("statement");
            skip_statement(p);
            return Stmt::Bad(Span::new(start, p.prev_end()));
        }
    };
    expect_semi(p);
    s
}

fn starts_simple_stmt(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::IDENT
                | SyntaxKind::FUNC_KW
                | SyntaxKind::LPAREN
                | SyntaxKind::LBRACKET
                | SyntaxKind::STRUCT_KW
                | SyntaxKind::MAP_KW
                | SyntaxKind::CHAN_KW
                | SyntaxKind::INTERFACE_KW
                | SyntaxKind::PLUS
                | SyntaxKind::MINUS
                | SyntaxKind::STAR
                | SyntaxKind::AMP
                | SyntaxKind::CARET
                | SyntaxKind::BANG
                | SyntaxKind::ARROW
        )
}

/// Skip at least one token, then up to and including the next semicolon at
/// the current nesting level, stopping before an unmatched `}`.
fn skip_statement(p: &mut Parser<'_>) {
    let mut depth = 0usize;
    if !p.at(SyntaxKind::RBRACE) {
        if matches!(p.current(), SyntaxKind::LBRACE | SyntaxKind::LPAREN | SyntaxKind::LBRACKET) {
            depth += 1;
        }
        p.bump();
    }
    while !p.at_end() {
        match p.current() {
            SyntaxKind::SEMICOLON if depth == 0 => {
                p.bump();
                return;
            }
            SyntaxKind::RBRACE if depth == 0 => return,
            SyntaxKind::LBRACE | SyntaxKind::LPAREN | SyntaxKind::LBRACKET => depth += 1,
            SyntaxKind::RBRACE | SyntaxKind::RPAREN | SyntaxKind::RBRACKET => {
                depth = depth.saturating_sub(1)
            }
            _ => {}
        }
        p.bump();
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Basic,
    LabelOk,
    RangeOk,
}

enum Simple {
    Stmt(Stmt),
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        x: Expr,
    },
}

fn assign_op(kind: SyntaxKind) -> Option<AssignOp> {
    let op = match kind {
        SyntaxKind::EQ => AssignOp::Assign,
        SyntaxKind::COLON_EQ => AssignOp::Define,
        SyntaxKind::PLUS_EQ => AssignOp::Add,
        SyntaxKind::MINUS_EQ => AssignOp::Sub,
        SyntaxKind::STAR_EQ => AssignOp::Mul,
        SyntaxKind::SLASH_EQ => AssignOp::Div,
        SyntaxKind::PERCENT_EQ => AssignOp::Rem,
        SyntaxKind::AMP_EQ => AssignOp::And,
        SyntaxKind::PIPE_EQ => AssignOp::Or,
        SyntaxKind::CARET_EQ => AssignOp::Xor,
        SyntaxKind::SHL_EQ => AssignOp::Shl,
        SyntaxKind::SHR_EQ => AssignOp::Shr,
        SyntaxKind::AMP_CARET_EQ => AssignOp::AndNot,
        _ => return None,
    };
    Some(op)
}

fn simple_stmt(p: &mut Parser<'_>, mode: Mode) -> Simple {
    if mode == Mode::RangeOk && p.at(SyntaxKind::RANGE_KW) {
        p.bump();
        return Simple::Range {
            key: None,
            value: None,
            define: false,
            x: expr::expr(p),
        };
    }

    let mut lhs = expr::expr_list(p);

    if let Some(op) = assign_op(p.current()) {
        p.bump();
        if mode == Mode::RangeOk
            && p.at(SyntaxKind::RANGE_KW)
            && matches!(op, AssignOp::Assign | AssignOp::Define)
        {
            p.bump();
            let mut vars = lhs.into_iter();
            let key = vars.next();
            let value = vars.next();
            if vars.next().is_some() {
                p.error("range clause permits at most two iteration variables");
            }
            return Simple::Range {
                key,
                value,
                define: op == AssignOp::Define,
                x: expr::expr(p),
            };
        }
        let rhs = expr::expr_list(p);
        return Simple::Stmt(Stmt::Assign { lhs, op, rhs });
    }

    if lhs.len() > 1 {
        p.error_expected("assignment operator");
    }
    let x = lhs.remove(0);

    let s = match (p.current(), x) {
        (SyntaxKind::COLON, Expr::Ident(label)) if mode == Mode::LabelOk => {
            p.bump();
            let inner = if p.at(SyntaxKind::RBRACE) {
                Stmt::Empty(p.pos())
            } else {
                stmt(p)
            };
            Stmt::Labeled {
                label,
                stmt: Box::new(inner),
            }
        }
        (SyntaxKind::ARROW, chan) => {
            p.bump();
            Stmt::Send {
                chan,
                value: expr::expr(p),
            }
        }
        (SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS, x) => {
            let inc = p.at(SyntaxKind::PLUS_PLUS);
            let end = p.bump().end;
            Stmt::IncDec { x, inc, end }
        }
        (_, x) => Stmt::Expr(x),
    };
    Simple::Stmt(s)
}

fn simple(p: &mut Parser<'_>) -> Stmt {
    match simple_stmt(p, Mode::Basic) {
        Simple::Stmt(s) => s,
        Simple::Range { x, .. } => Stmt::Bad(x.span()),
    }
}

/// Unwrap an expression statement used as a condition or switch tag.
fn as_expr(p: &mut Parser<'_>, s: Option<Stmt>, what: &str) -> Expr {
    match s {
        Some(Stmt::Expr(x)) => x,
        Some(other) => {
            p.error(format!("cannot use {what} as value"));
            Expr::Bad(other.span())
        }
        None => {
            p.error(format!("missing {what}"));
            bad_expr(p)
        }
    }
}

fn if_stmt(p: &mut Parser<'_>) -> Stmt {
    let pos = p.bump().start;
    let (init, cond) = p.with_expr_lev(-1, |p| {
        let mut init = None;
        let mut cond = None;
        if !p.at(SyntaxKind::LBRACE) {
            if !p.at(SyntaxKind::SEMICOLON) {
                cond = Some(simple(p));
            }
            if p.eat(SyntaxKind::SEMICOLON) {
                init = cond.take();
                if !p.at(SyntaxKind::LBRACE) {
                    cond = Some(simple(p));
                }
            }
        }
        let cond = as_expr(p, cond, "condition");
        (init, cond)
    });
    let body = block(p);
    let els = if p.eat(SyntaxKind::ELSE_KW) {
        match p.current() {
            SyntaxKind::IF_KW => Some(Box::new(if_stmt(p))),
            SyntaxKind::LBRACE => Some(Box::new(Stmt::Block(block(p)))),
            _ => {
                p.error_expected("if statement or block");
                Some(Box::new(Stmt::Bad(p.span())))
            }
        }
    } else {
        None
    };
    Stmt::If {
        pos,
        init: init.map(Box::new),
        cond,
        body,
        els,
    }
}

fn is_type_switch_guard(s: &Stmt) -> bool {
    let is_guard = |x: &Expr| matches!(x, Expr::TypeAssert { ty: None, .. });
    match s {
        Stmt::Expr(x) => is_guard(x),
        Stmt::Assign {
            op: AssignOp::Define,
            rhs,
            ..
        } => rhs.len() == 1 && is_guard(&rhs[0]),
        _ => false,
    }
}

fn switch_stmt(p: &mut Parser<'_>) -> Stmt {
    let pos = p.bump().start;
    let (init, tag) = p.with_expr_lev(-1, |p| {
        let mut init = None;
        let mut tag = None;
        if !p.at(SyntaxKind::LBRACE) {
            if !p.at(SyntaxKind::SEMICOLON) {
                tag = Some(simple(p));
            }
            if p.eat(SyntaxKind::SEMICOLON) {
                init = tag.take();
                if !p.at(SyntaxKind::LBRACE) {
                    tag = Some(simple(p));
                }
            }
        }
        (init.map(Box::new), tag)
    });

    p.expect(SyntaxKind::LBRACE, "'{'");
    let mut clauses = Vec::new();
    while matches!(p.current(), SyntaxKind::CASE_KW | SyntaxKind::DEFAULT_KW) {
        let case = p.pos();
        let list = if p.eat(SyntaxKind::CASE_KW) {
            Some(expr::expr_list(p))
        } else {
            p.bump();
            None
        };
        p.expect(SyntaxKind::COLON, "':'");
        clauses.push(CaseClause {
            case,
            list,
            body: stmt_list(p),
        });
    }
    let rbrace = p.expect(SyntaxKind::RBRACE, "'}'");

    match tag {
        Some(guard) if is_type_switch_guard(&guard) => Stmt::TypeSwitch {
            pos,
            init,
            assign: Box::new(guard),
            clauses,
            rbrace,
        },
        tag => {
            let tag = tag.map(|t| as_expr(p, Some(t), "switch expression"));
            Stmt::Switch {
                pos,
                init,
                tag,
                clauses,
                rbrace,
            }
        }
    }
}

fn select_stmt(p: &mut Parser<'_>) -> Stmt {
    let pos = p.bump().start;
    p.expect(SyntaxKind::LBRACE, "'{'");
    let mut clauses = Vec::new();
    while matches!(p.current(), SyntaxKind::CASE_KW | SyntaxKind::DEFAULT_KW) {
        let case = p.pos();
        let comm = if p.eat(SyntaxKind::CASE_KW) {
            Some(Box::new(simple(p)))
        } else {
            p.bump();
            None
        };
        p.expect(SyntaxKind::COLON, "':'");
        clauses.push(CommClause {
            case,
            comm,
            body: stmt_list(p),
        });
    }
    let rbrace = p.expect(SyntaxKind::RBRACE, "'}'");
    Stmt::Select {
        pos,
        clauses,
        rbrace,
    }
}

enum ForHeader {
    Loop {
        init: Option<Stmt>,
        cond: Option<Stmt>,
        post: Option<Stmt>,
    },
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        x: Expr,
    },
}

fn for_header(p: &mut Parser<'_>) -> ForHeader {
    let mut init = None;
    let mut cond = None;
    let mut post = None;
    if !p.at(SyntaxKind::LBRACE) && !p.at(SyntaxKind::SEMICOLON) {
        match simple_stmt(p, Mode::RangeOk) {
            Simple::Range {
                key,
                value,
                define,
                x,
            } => {
                return ForHeader::Range {
                    key,
                    value,
                    define,
                    x,
                };
            }
            Simple::Stmt(s) => cond = Some(s),
        }
    }
    if p.eat(SyntaxKind::SEMICOLON) {
        init = cond.take();
        if !p.at(SyntaxKind::SEMICOLON) {
            cond = Some(simple(p));
        }
        p.expect(SyntaxKind::SEMICOLON, "';'");
        if !p.at(SyntaxKind::LBRACE) {
            post = Some(simple(p));
        }
    }
    ForHeader::Loop { init, cond, post }
}

fn for_stmt(p: &mut Parser<'_>) -> Stmt {
    let pos = p.bump().start;
    let header = p.with_expr_lev(-1, for_header);
    let body = block(p);

    match header {
        ForHeader::Range {
            key,
            value,
            define,
            x,
        } => Stmt::Range {
            pos,
            key,
            value,
            define,
            x,
            body,
        },
        ForHeader::Loop { init, cond, post } => {
            let cond = cond.map(|c| as_expr(p, Some(c), "for condition"));
            Stmt::For {
                pos,
                init: init.map(Box::new),
                cond,
                post: post.map(Box::new),
                body,
            }
        }
    }
}
