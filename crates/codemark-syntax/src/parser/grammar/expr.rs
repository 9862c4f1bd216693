//! Expressions.
//!
//! Binary expressions use precedence climbing over the five levels of
//! [`BinaryOp::precedence`]. Types may appear wherever an operand may
//! (`make([]int, n)`, `map[string]int{}`), so operands fall back to the type
//! rules for keywords that can only start a type.

use super::{basic_lit, bad_expr, lit_kind, stmt, types};
use crate::ast::{BinaryOp, ChanDir, Expr, UnaryOp};
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

pub(super) fn expr(p: &mut Parser<'_>) -> Expr {
    binary(p, 1)
}

pub(super) fn expr_list(p: &mut Parser<'_>) -> Vec<Expr> {
    let mut list = vec![expr(p)];
    while p.eat(SyntaxKind::COMMA) {
        list.push(expr(p));
    }
    list
}

fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    let op = match kind {
        SyntaxKind::PIPE_PIPE => BinaryOp::LogOr,
        SyntaxKind::AMP_AMP => BinaryOp::LogAnd,
        SyntaxKind::EQ_EQ => BinaryOp::Eq,
        SyntaxKind::NEQ => BinaryOp::Neq,
        SyntaxKind::LT => BinaryOp::Lt,
        SyntaxKind::LTEQ => BinaryOp::LtEq,
        SyntaxKind::GT => BinaryOp::Gt,
        SyntaxKind::GTEQ => BinaryOp::GtEq,
        SyntaxKind::PLUS => BinaryOp::Add,
        SyntaxKind::MINUS => BinaryOp::Sub,
        SyntaxKind::PIPE => BinaryOp::Or,
        SyntaxKind::CARET => BinaryOp::Xor,
        SyntaxKind::STAR => BinaryOp::Mul,
        SyntaxKind::SLASH => BinaryOp::Div,
        SyntaxKind::PERCENT => BinaryOp::Rem,
        SyntaxKind::SHL => BinaryOp::Shl,
        SyntaxKind::SHR => BinaryOp::Shr,
        SyntaxKind::AMP => BinaryOp::And,
        SyntaxKind::AMP_CARET => BinaryOp::AndNot,
        _ => return None,
    };
    Some(op)
}

fn binary(p: &mut Parser<'_>, min_prec: u8) -> Expr {
    let mut x = unary(p);
    while let Some(op) = binary_op(p.current()) {
        if op.precedence() < min_prec {
            break;
        }
        p.bump();
        let y = binary(p, op.precedence() + 1);
        x = Expr::Binary {
            x: Box::new(x),
            op,
            y: Box::new(y),
        };
    }
    x
}

fn unary(p: &mut Parser<'_>) -> Expr {
    let op = match p.current() {
        SyntaxKind::PLUS => UnaryOp::Plus,
        SyntaxKind::MINUS => UnaryOp::Neg,
        SyntaxKind::BANG => UnaryOp::Not,
        SyntaxKind::CARET => UnaryOp::Xor,
        SyntaxKind::AMP => UnaryOp::Addr,
        SyntaxKind::TILDE => UnaryOp::Tilde,
        SyntaxKind::ARROW => {
            let op_pos = p.bump().start;
            if p.eat(SyntaxKind::CHAN_KW) {
                return Expr::ChanType {
                    begin: op_pos,
                    dir: ChanDir::Recv,
                    value: Box::new(types::ty(p)),
                };
            }
            return Expr::Unary {
                op: UnaryOp::Recv,
                op_pos,
                x: Box::new(unary(p)),
            };
        }
        SyntaxKind::STAR => {
            let star = p.bump().start;
            return Expr::Star {
                star,
                x: Box::new(unary(p)),
            };
        }
        _ => return primary(p),
    };
    let op_pos = p.bump().start;
    Expr::Unary {
        op,
        op_pos,
        x: Box::new(unary(p)),
    }
}

fn primary(p: &mut Parser<'_>) -> Expr {
    let mut x = operand(p);
    loop {
        match p.current() {
            SyntaxKind::DOT => {
                p.bump();
                match p.current() {
                    SyntaxKind::IDENT => {
                        x = Expr::Selector {
                            x: Box::new(x),
                            sel: p.ident(),
                        };
                    }
                    SyntaxKind::LPAREN => {
                        p.bump();
                        let ty = if p.eat(SyntaxKind::TYPE_KW) {
                            None
                        } else {
                            Some(Box::new(types::ty(p)))
                        };
                        let rparen = p.expect(SyntaxKind::RPAREN, "')'");
                        x = Expr::TypeAssert {
                            x: Box::new(x),
                            ty,
                            rparen,
                        };
                    }
                    _ => {
                        p.error_expected("selector or type assertion");
                        return x;
                    }
                }
            }
            SyntaxKind::LBRACKET => x = index_or_slice(p, x),
            SyntaxKind::LPAREN => x = call(p, x),
            SyntaxKind::LBRACE => {
                let literal_allowed = match &x {
                    Expr::Ident(_) | Expr::Selector { .. } | Expr::Index { .. } => {
                        p.expr_lev() >= 0
                    }
                    Expr::ArrayType { .. } | Expr::StructType(_) | Expr::MapType { .. } => true,
                    _ => false,
                };
                if !literal_allowed {
                    return x;
                }
                x = composite_lit(p, Some(x));
            }
            _ => return x,
        }
    }
}

fn operand(p: &mut Parser<'_>) -> Expr {
    match p.current() {
        SyntaxKind::IDENT => Expr::Ident(p.ident()),
        kind if kind.is_literal() => match lit_kind(kind) {
            Some(lit) => Expr::BasicLit(basic_lit(p, lit)),
            None => bad_expr(p),
        },
        SyntaxKind::LPAREN => {
            let lparen = p.bump().start;
            let lev = p.expr_lev() + 1;
            let x = p.with_expr_lev(lev, expr);
            let rparen = p.expect(SyntaxKind::RPAREN, "')'");
            Expr::Paren {
                lparen,
                x: Box::new(x),
                rparen,
            }
        }
        SyntaxKind::FUNC_KW => {
            let func = p.bump().start;
            let ty = types::signature(p, Some(func));
            if !p.at(SyntaxKind::LBRACE) {
                return Expr::FuncType(ty);
            }
            let lev = p.expr_lev() + 1;
            let body = p.with_expr_lev(lev, stmt::block);
            Expr::FuncLit { ty, body }
        }
        SyntaxKind::LBRACKET
        | SyntaxKind::STRUCT_KW
        | SyntaxKind::INTERFACE_KW
        | SyntaxKind::MAP_KW
        | SyntaxKind::CHAN_KW => types::ty(p),
        _ => {
            p.error_expected("expression");
            let bad = bad_expr(p);
            if !matches!(
                p.current(),
                SyntaxKind::RPAREN
                    | SyntaxKind::RBRACKET
                    | SyntaxKind::RBRACE
                    | SyntaxKind::SEMICOLON
                    | SyntaxKind::COMMA
                    | SyntaxKind::EOF
            ) {
                p.bump();
            }
            bad
        }
    }
}

/// `x[i]`, `x[lo:hi]`, `x[lo:hi:max]`, or type arguments `x[K, V]`.
fn index_or_slice(p: &mut Parser<'_>, x: Expr) -> Expr {
    p.bump();
    let lev = p.expr_lev() + 1;
    p.with_expr_lev(lev, |p| {
        let mut bounds: [Option<Box<Expr>>; 3] = [None, None, None];
        if !p.at(SyntaxKind::COLON) {
            bounds[0] = Some(Box::new(expr(p)));
        }

        if p.at(SyntaxKind::COMMA) {
            let mut indices: Vec<Expr> = bounds[0].take().map(|b| *b).into_iter().collect();
            while p.eat(SyntaxKind::COMMA) {
                if p.at(SyntaxKind::RBRACKET) {
                    break;
                }
                indices.push(types::ty(p));
            }
            let rbrack = p.expect(SyntaxKind::RBRACKET, "']'");
            return Expr::Index {
                x: Box::new(x),
                indices,
                rbrack,
            };
        }

        let mut colons = 0;
        while colons < 2 && p.eat(SyntaxKind::COLON) {
            colons += 1;
            if !p.at(SyntaxKind::COLON) && !p.at(SyntaxKind::RBRACKET) {
                bounds[colons] = Some(Box::new(expr(p)));
            }
        }
        let rbrack = p.expect(SyntaxKind::RBRACKET, "']'");

        let [low, high, max] = bounds;
        if colons == 0 {
            let index = match low {
                Some(index) => *index,
                None => {
                    p.error("expected operand");
                    bad_expr(p)
                }
            };
            return Expr::Index {
                x: Box::new(x),
                indices: vec![index],
                rbrack,
            };
        }
        Expr::Slice {
            x: Box::new(x),
            low,
            high,
            max,
            slice3: colons == 2,
            rbrack,
        }
    })
}

fn call(p: &mut Parser<'_>, fun: Expr) -> Expr {
    p.bump();
    let lev = p.expr_lev() + 1;
    let (args, ellipsis) = p.with_expr_lev(lev, |p| {
        let mut args = Vec::new();
        let mut ellipsis = false;
        while !p.at(SyntaxKind::RPAREN) && !p.at_end() {
            args.push(expr(p));
            ellipsis |= p.eat(SyntaxKind::ELLIPSIS);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        (args, ellipsis)
    });
    let rparen = p.expect(SyntaxKind::RPAREN, "')'");
    Expr::Call {
        fun: Box::new(fun),
        args,
        ellipsis,
        rparen,
    }
}

/// `T{a, b}`, `T{Key: v}`, or an elided inner literal `{1, 2}`.
fn composite_lit(p: &mut Parser<'_>, ty: Option<Expr>) -> Expr {
    let lbrace = p.bump().start;
    let lev = p.expr_lev() + 1;
    let elts = p.with_expr_lev(lev, |p| {
        let mut elts = Vec::new();
        while !p.at(SyntaxKind::RBRACE) && !p.at_end() {
            elts.push(element(p));
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        elts
    });
    let rbrace = p.expect(SyntaxKind::RBRACE, "'}'");
    Expr::CompositeLit {
        ty: ty.map(Box::new),
        lbrace,
        elts,
        rbrace,
    }
}

fn element(p: &mut Parser<'_>) -> Expr {
    let key = element_value(p);
    if !p.eat(SyntaxKind::COLON) {
        return key;
    }
    Expr::KeyValue {
        key: Box::new(key),
        value: Box::new(element_value(p)),
    }
}

fn element_value(p: &mut Parser<'_>) -> Expr {
    if p.at(SyntaxKind::LBRACE) {
        composite_lit(p, None)
    } else {
        expr(p)
    }
}
