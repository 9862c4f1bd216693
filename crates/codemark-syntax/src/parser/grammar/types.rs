//! Type expressions, parameter lists, and struct/interface bodies.

use std::mem;

use super::{basic_lit, bad_expr, expr, ident_list};
use crate::ast::{
    BinaryOp, ChanDir, Expr, Field, FieldList, FuncType, Ident, InterfaceType, LitKind,
    StructType, UnaryOp,
};
use crate::parser::Parser;
use crate::source::{BytePos, Span};
use crate::syntax_kind::SyntaxKind;

/// Whether a token can begin a type (used to detect a trailing result type).
pub(super) fn starts_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::STAR
            | SyntaxKind::LBRACKET
            | SyntaxKind::MAP_KW
            | SyntaxKind::CHAN_KW
            | SyntaxKind::ARROW
            | SyntaxKind::FUNC_KW
            | SyntaxKind::STRUCT_KW
            | SyntaxKind::INTERFACE_KW
            | SyntaxKind::LPAREN
    )
}

/// Parse a type.
pub(super) fn ty(p: &mut Parser<'_>) -> Expr {
    match p.current() {
        SyntaxKind::IDENT => type_name(p),
        SyntaxKind::LBRACKET => array_or_slice(p),
        SyntaxKind::STRUCT_KW => Expr::StructType(struct_type(p)),
        SyntaxKind::INTERFACE_KW => Expr::InterfaceType(interface_type(p)),
        SyntaxKind::STAR => {
            let star = p.bump().start;
            Expr::Star {
                star,
                x: Box::new(ty(p)),
            }
        }
        SyntaxKind::FUNC_KW => {
            let func = p.bump().start;
            Expr::FuncType(signature(p, Some(func)))
        }
        SyntaxKind::MAP_KW => {
            let map = p.bump().start;
            p.expect(SyntaxKind::LBRACKET, "'['");
            let key = ty(p);
            p.expect(SyntaxKind::RBRACKET, "']'");
            Expr::MapType {
                map,
                key: Box::new(key),
                value: Box::new(ty(p)),
            }
        }
        SyntaxKind::CHAN_KW => {
            let begin = p.bump().start;
            let dir = if p.eat(SyntaxKind::ARROW) {
                ChanDir::Send
            } else {
                ChanDir::Both
            };
            Expr::ChanType {
                begin,
                dir,
                value: Box::new(ty(p)),
            }
        }
        SyntaxKind::ARROW => {
            let begin = p.bump().start;
            p.expect(SyntaxKind::CHAN_KW, "'chan'");
            Expr::ChanType {
                begin,
                dir: ChanDir::Recv,
                value: Box::new(ty(p)),
            }
        }
        SyntaxKind::LPAREN => {
            let lparen = p.bump().start;
            let x = ty(p);
            let rparen = p.expect(SyntaxKind::RPAREN, "')'");
            Expr::Paren {
                lparen,
                x: Box::new(x),
                rparen,
            }
        }
        _ => {
            p.error_expected("type");
            bad_expr(p)
        }
    }
}

/// `T`, `pkg.T`, optionally instantiated: `T[int]`, `pkg.T[K, V]`.
fn type_name(p: &mut Parser<'_>) -> Expr {
    let mut x = Expr::Ident(p.ident());
    if p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.bump();
        x = Expr::Selector {
            x: Box::new(x),
            sel: p.ident(),
        };
    }
    if p.at(SyntaxKind::LBRACKET) && !bracket_starts_array(p, 0) {
        x = instantiate(p, x);
    }
    x
}

fn instantiate(p: &mut Parser<'_>, x: Expr) -> Expr {
    p.bump();
    let mut indices = vec![ty(p)];
    while p.eat(SyntaxKind::COMMA) {
        if p.at(SyntaxKind::RBRACKET) {
            break;
        }
        indices.push(ty(p));
    }
    let rbrack = p.expect(SyntaxKind::RBRACKET, "']'");
    Expr::Index {
        x: Box::new(x),
        indices,
        rbrack,
    }
}

/// Given a `[` at `offset` tokens ahead, reports whether the bracketed part
/// is the length of an array type (`x [N]int`, `x []T`) rather than a list
/// of type arguments (`List[T]`). Decided by what follows the matching `]`.
pub(super) fn bracket_starts_array(p: &Parser<'_>, offset: usize) -> bool {
    let mut index = p.index() + offset;
    let mut depth = 0usize;
    loop {
        let Some(tok) = p.token_at(index) else {
            return false;
        };
        match tok.kind {
            SyntaxKind::LBRACKET | SyntaxKind::LPAREN | SyntaxKind::LBRACE => depth += 1,
            SyntaxKind::RBRACKET | SyntaxKind::RPAREN | SyntaxKind::RBRACE => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
        index += 1;
    }
    p.token_at(index + 1)
        .is_some_and(|t| t.kind != SyntaxKind::LPAREN && starts_type(t.kind))
}

fn array_or_slice(p: &mut Parser<'_>) -> Expr {
    let lbrack = p.bump().start;
    let len = if p.eat(SyntaxKind::RBRACKET) {
        None
    } else {
        let len = if p.at(SyntaxKind::ELLIPSIS) && p.nth(1) == SyntaxKind::RBRACKET {
            Expr::Ellipsis {
                pos: p.bump().start,
                elt: None,
            }
        } else {
            let lev = p.expr_lev() + 1;
            p.with_expr_lev(lev, expr::expr)
        };
        p.expect(SyntaxKind::RBRACKET, "']'");
        Some(Box::new(len))
    };
    Expr::ArrayType {
        lbrack,
        len,
        elt: Box::new(ty(p)),
    }
}

/// Parameters and results of a function type or method.
pub(super) fn signature(p: &mut Parser<'_>, func: Option<BytePos>) -> FuncType {
    let start = func.unwrap_or_else(|| p.pos());
    let params = params(p);
    let results = results(p);
    FuncType {
        func,
        type_params: None,
        params,
        results,
        span: Span::new(start, p.prev_end()),
    }
}

/// `(a, b int, c ...string)`
pub(super) fn params(p: &mut Parser<'_>) -> FieldList {
    let opening = p.expect(SyntaxKind::LPAREN, "'('");
    let lev = p.expr_lev() + 1;
    let list = p.with_expr_lev(lev, |p| param_list(p, SyntaxKind::RPAREN, false));
    let closing = p.expect(SyntaxKind::RPAREN, "')'");
    FieldList {
        opening: Some(opening),
        list,
        closing: Some(closing),
    }
}

/// `[K comparable, V any]`
pub(super) fn type_params(p: &mut Parser<'_>) -> FieldList {
    let opening = p.bump().start;
    let list = param_list(p, SyntaxKind::RBRACKET, true);
    let closing = p.expect(SyntaxKind::RBRACKET, "']'");
    FieldList {
        opening: Some(opening),
        list,
        closing: Some(closing),
    }
}

/// A parenthesized result list, or a single unparenthesized result type.
pub(super) fn results(p: &mut Parser<'_>) -> Option<FieldList> {
    if p.at(SyntaxKind::LPAREN) {
        return Some(params(p));
    }
    if !starts_type(p.current()) {
        return None;
    }
    let ty = ty(p);
    Some(FieldList {
        opening: None,
        list: vec![Field {
            doc: None,
            names: Vec::new(),
            ty,
            tag: None,
            comment: None,
        }],
        closing: None,
    })
}

enum Param {
    Named(Ident, Expr),
    Unnamed(Expr),
}

/// Parse list entries, then group names with the type that follows them:
/// `a, b int` is one field with two names.
fn param_list(p: &mut Parser<'_>, close: SyntaxKind, type_params: bool) -> Vec<Field> {
    let mut entries = Vec::new();
    while !p.at(close) && !p.at_end() {
        let entry = if p.at(SyntaxKind::IDENT) {
            match p.nth(1) {
                SyntaxKind::COMMA => Param::Unnamed(Expr::Ident(p.ident())),
                kind if kind == close => Param::Unnamed(Expr::Ident(p.ident())),
                SyntaxKind::DOT => Param::Unnamed(type_name(p)),
                SyntaxKind::LBRACKET if !type_params && !bracket_starts_array(p, 1) => {
                    Param::Unnamed(type_name(p))
                }
                _ => {
                    let name = p.ident();
                    Param::Named(name, param_type(p, type_params))
                }
            }
        } else {
            Param::Unnamed(param_type(p, type_params))
        };
        entries.push(entry);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }

    let field = |names: Vec<Ident>, ty: Expr| Field {
        doc: None,
        names,
        ty,
        tag: None,
        comment: None,
    };

    if !entries.iter().any(|e| matches!(e, Param::Named(..))) {
        return entries
            .into_iter()
            .map(|e| match e {
                Param::Unnamed(ty) | Param::Named(_, ty) => field(Vec::new(), ty),
            })
            .collect();
    }

    let mut fields = Vec::new();
    let mut pending: Vec<Ident> = Vec::new();
    for entry in entries {
        match entry {
            Param::Unnamed(Expr::Ident(name)) => pending.push(name),
            Param::Unnamed(ty) => {
                p.error("mixed named and unnamed parameters");
                fields.push(field(Vec::new(), ty));
            }
            Param::Named(name, ty) => {
                pending.push(name);
                fields.push(field(mem::take(&mut pending), ty));
            }
        }
    }
    if !pending.is_empty() {
        p.error("mixed named and unnamed parameters");
        fields.extend(
            pending
                .into_iter()
                .map(|name| field(Vec::new(), Expr::Ident(name))),
        );
    }
    fields
}

fn param_type(p: &mut Parser<'_>, type_params: bool) -> Expr {
    if p.at(SyntaxKind::ELLIPSIS) {
        let pos = p.bump().start;
        return Expr::Ellipsis {
            pos,
            elt: Some(Box::new(ty(p))),
        };
    }
    if type_params { type_elem(p) } else { ty(p) }
}

/// A constraint element: `~int | ~string | fmt.Stringer`.
pub(super) fn type_elem(p: &mut Parser<'_>) -> Expr {
    let mut x = type_term(p);
    while p.at(SyntaxKind::PIPE) {
        p.bump();
        let y = type_term(p);
        x = Expr::Binary {
            x: Box::new(x),
            op: BinaryOp::Or,
            y: Box::new(y),
        };
    }
    x
}

fn type_term(p: &mut Parser<'_>) -> Expr {
    if p.at(SyntaxKind::TILDE) {
        let op_pos = p.bump().start;
        return Expr::Unary {
            op: UnaryOp::Tilde,
            op_pos,
            x: Box::new(ty(p)),
        };
    }
    ty(p)
}

pub(super) fn struct_type(p: &mut Parser<'_>) -> StructType {
    let start = p.bump().start;
    let opening = p.expect(SyntaxKind::LBRACE, "'{'");
    let mut list = Vec::new();
    while !p.at(SyntaxKind::RBRACE) && !p.at_end() {
        list.push(field_decl(p));
        member_end(p);
    }
    let closing = p.expect(SyntaxKind::RBRACE, "'}'");
    StructType {
        fields: FieldList {
            opening: Some(opening),
            list,
            closing: Some(closing),
        },
        span: Span::new(start, p.prev_end()),
    }
}

fn field_decl(p: &mut Parser<'_>) -> Field {
    let doc = p.lead_comment();
    let (names, ty) = match p.current() {
        SyntaxKind::IDENT => match p.nth(1) {
            SyntaxKind::DOT | SyntaxKind::SEMICOLON | SyntaxKind::RBRACE | SyntaxKind::STRING => {
                (Vec::new(), ty(p))
            }
            SyntaxKind::LBRACKET if !bracket_starts_array(p, 1) => (Vec::new(), ty(p)),
            _ => {
                let names = ident_list(p);
                (names, ty(p))
            }
        },
        SyntaxKind::STAR => (Vec::new(), ty(p)),
        _ => {
            p.error_expected("field name or embedded type");
            (Vec::new(), bad_expr(p))
        }
    };
    let tag = p
        .at(SyntaxKind::STRING)
        .then(|| basic_lit(p, LitKind::String));
    Field {
        doc,
        names,
        ty,
        tag,
        comment: p.line_comment(),
    }
}

pub(super) fn interface_type(p: &mut Parser<'_>) -> InterfaceType {
    let start = p.bump().start;
    let opening = p.expect(SyntaxKind::LBRACE, "'{'");
    let mut list = Vec::new();
    while !p.at(SyntaxKind::RBRACE) && !p.at_end() {
        let doc = p.lead_comment();
        let (names, ty) = if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::LPAREN {
            let name = p.ident();
            (vec![name], Expr::FuncType(signature(p, None)))
        } else {
            (Vec::new(), type_elem(p))
        };
        list.push(Field {
            doc,
            names,
            ty,
            tag: None,
            comment: p.line_comment(),
        });
        member_end(p);
    }
    let closing = p.expect(SyntaxKind::RBRACE, "'}'");
    InterfaceType {
        methods: FieldList {
            opening: Some(opening),
            list,
            closing: Some(closing),
        },
        span: Span::new(start, p.prev_end()),
    }
}

/// Separator after a struct field or interface element.
fn member_end(p: &mut Parser<'_>) {
    if p.eat(SyntaxKind::SEMICOLON) || p.at(SyntaxKind::RBRACE) {
        return;
    }
    p.error_expected("';', newline or '}'");
    p.bump();
    while !p.at_end() && !p.at(SyntaxKind::SEMICOLON) && !p.at(SyntaxKind::RBRACE) {
        p.bump();
    }
    p.eat(SyntaxKind::SEMICOLON);
}
