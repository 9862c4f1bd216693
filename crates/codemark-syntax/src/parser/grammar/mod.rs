//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and returns the node it parsed:
//!
//! 1. Inspect the current token (`p.current()`, `p.at()`, `p.nth()`)
//! 2. Consume tokens (`p.bump()`, `p.eat()`, `p.expect()`)
//! 3. Call other rules and assemble the typed node
//!
//! ## Module Structure
//!
//! - this module: source files and declarations
//! - [`types`]: type expressions, parameter lists, struct and interface bodies
//! - [`expr`]: expressions, including composite and function literals
//! - [`stmt`]: statements and blocks
//!
//! ## Error Recovery
//!
//! Rules are lenient. When something unexpected turns up they record an
//! error, return a `Bad` node, and make sure at least one token is consumed
//! somewhere up the call chain so that loops always make progress.

mod expr;
mod stmt;
mod types;

use crate::ast::{
    BasicLit, Decl, DeclKeyword, Expr, File, FuncDecl, FuncType, GenDecl, Ident, ImportSpec,
    LitKind, Spec, TypeSpec, ValueSpec,
};
use crate::parser::Parser;
use crate::source::Span;
use crate::syntax_kind::SyntaxKind;

/// Parse a whole source file: package clause, then declarations.
pub(super) fn source_file(p: &mut Parser<'_>) -> File {
    let doc = p.lead_comment();
    let package = p.expect(SyntaxKind::PACKAGE_KW, "'package'");
    let name = p.ident();
    expect_semi(p);

    let mut decls = Vec::new();
    while !p.at_end() {
        if p.eat(SyntaxKind::SEMICOLON) {
            continue;
        }
        decls.push(top_level_decl(p));
    }

    File {
        doc,
        package,
        name,
        decls,
        comments: p.take_comments(),
        span: p.file_span(),
    }
}

fn top_level_decl(p: &mut Parser<'_>) -> Decl {
    match p.current() {
        SyntaxKind::CONST_KW
        | SyntaxKind::TYPE_KW
        | SyntaxKind::VAR_KW
        | SyntaxKind::IMPORT_KW => {
            let decl = gen_decl(p);
            expect_semi(p);
            Decl::Gen(decl)
        }
        SyntaxKind::FUNC_KW => {
            let decl = func_decl(p);
            expect_semi(p);
            Decl::Func(decl)
        }
        _ => {
            let start = p.pos();
            p.error_expected("declaration");
            skip_to_next_decl(p);
            Decl::Bad(Span::new(start, p.prev_end()))
        }
    }
}

/// Skip at least one token, then everything up to the next top-level
/// declaration keyword.
fn skip_to_next_decl(p: &mut Parser<'_>) {
    let mut depth = 0usize;
    p.bump();
    while !p.at_end() {
        match p.current() {
            SyntaxKind::LBRACE | SyntaxKind::LPAREN | SyntaxKind::LBRACKET => depth += 1,
            SyntaxKind::RBRACE | SyntaxKind::RPAREN | SyntaxKind::RBRACKET => {
                depth = depth.saturating_sub(1)
            }
            SyntaxKind::CONST_KW
            | SyntaxKind::TYPE_KW
            | SyntaxKind::VAR_KW
            | SyntaxKind::IMPORT_KW
            | SyntaxKind::FUNC_KW
                if depth == 0 =>
            {
                return;
            }
            _ => {}
        }
        p.bump();
    }
}

/// Statement terminator: an explicit or inserted semicolon. A closing
/// `)` or `}` also ends the statement without being consumed.
pub(super) fn expect_semi(p: &mut Parser<'_>) {
    match p.current() {
        SyntaxKind::SEMICOLON => {
            p.bump();
        }
        SyntaxKind::RPAREN | SyntaxKind::RBRACE | SyntaxKind::EOF => {}
        _ => {
            p.error_expected("';' or newline");
            let mut depth = 0usize;
            while !p.at_end() {
                match p.current() {
                    SyntaxKind::SEMICOLON if depth == 0 => {
                        p.bump();
                        return;
                    }
                    SyntaxKind::RBRACE | SyntaxKind::RPAREN if depth == 0 => return,
                    SyntaxKind::LBRACE | SyntaxKind::LPAREN | SyntaxKind::LBRACKET => depth += 1,
                    SyntaxKind::RBRACE | SyntaxKind::RPAREN | SyntaxKind::RBRACKET => depth -= 1,
                    _ => {}
                }
                p.bump();
            }
        }
    }
}

/// `import`, `const`, `type` or `var`, either single or parenthesized.
/// The trailing semicolon is left to the caller.
pub(super) fn gen_decl(p: &mut Parser<'_>) -> GenDecl {
    let doc = p.lead_comment();
    let keyword = match p.current() {
        SyntaxKind::IMPORT_KW => DeclKeyword::Import,
        SyntaxKind::CONST_KW => DeclKeyword::Const,
        SyntaxKind::TYPE_KW => DeclKeyword::Type,
        _ => DeclKeyword::Var,
    };
    let keyword_pos = p.bump().start;

    if !p.at(SyntaxKind::LPAREN) {
        let spec = spec(p, keyword, false);
        return GenDecl {
            doc,
            keyword,
            keyword_pos,
            lparen: None,
            specs: vec![spec],
            rparen: None,
        };
    }

    let lparen = p.bump().start;
    let mut specs = Vec::new();
    while !p.at(SyntaxKind::RPAREN) && !p.at_end() {
        specs.push(spec(p, keyword, true));
        if !p.at(SyntaxKind::RPAREN) {
            expect_semi(p);
        }
    }
    let rparen = p.expect(SyntaxKind::RPAREN, "')'");
    GenDecl {
        doc,
        keyword,
        keyword_pos,
        lparen: Some(lparen),
        specs,
        rparen: Some(rparen),
    }
}

fn spec(p: &mut Parser<'_>, keyword: DeclKeyword, grouped: bool) -> Spec {
    let doc = if grouped { p.lead_comment() } else { None };
    match keyword {
        DeclKeyword::Import => Spec::Import(import_spec(p, doc)),
        DeclKeyword::Type => Spec::Type(type_spec(p, doc)),
        DeclKeyword::Const | DeclKeyword::Var => Spec::Value(value_spec(p, doc)),
    }
}

fn import_spec(p: &mut Parser<'_>, doc: Option<crate::ast::CommentGroup>) -> ImportSpec {
    let name = match p.current() {
        SyntaxKind::IDENT => Some(p.ident()),
        SyntaxKind::DOT => {
            let span = p.bump();
            Some(Ident::new(".", span))
        }
        _ => None,
    };
    let path = if p.at(SyntaxKind::STRING) {
        basic_lit(p, LitKind::String)
    } else {
        p.error_expected("import path");
        BasicLit {
            kind: LitKind::String,
            value: "\"\"".to_string(),
            span: Span::new(p.pos(), p.pos()),
        }
    };
    ImportSpec {
        doc,
        name,
        path,
        comment: p.line_comment(),
    }
}

fn value_spec(p: &mut Parser<'_>, doc: Option<crate::ast::CommentGroup>) -> ValueSpec {
    let names = ident_list(p);
    let ty = match p.current() {
        SyntaxKind::EQ | SyntaxKind::SEMICOLON | SyntaxKind::RPAREN | SyntaxKind::EOF => None,
        _ => Some(types::ty(p)),
    };
    let values = if p.eat(SyntaxKind::EQ) {
        expr::expr_list(p)
    } else {
        Vec::new()
    };
    ValueSpec {
        doc,
        names,
        ty,
        values,
        comment: p.line_comment(),
    }
}

fn type_spec(p: &mut Parser<'_>, doc: Option<crate::ast::CommentGroup>) -> TypeSpec {
    let name = p.ident();
    let type_params = (p.at(SyntaxKind::LBRACKET)
        && p.nth(1) == SyntaxKind::IDENT
        && p.nth(2) != SyntaxKind::RBRACKET)
        .then(|| types::type_params(p));
    let assign = p.at(SyntaxKind::EQ).then(|| p.bump().start);
    let ty = types::ty(p);
    TypeSpec {
        doc,
        name,
        type_params,
        assign,
        ty,
        comment: p.line_comment(),
    }
}

fn func_decl(p: &mut Parser<'_>) -> FuncDecl {
    let doc = p.lead_comment();
    let func = p.bump().start;
    let recv = p.at(SyntaxKind::LPAREN).then(|| types::params(p));
    let name = p.ident();
    let type_params = p
        .at(SyntaxKind::LBRACKET)
        .then(|| types::type_params(p));
    let params = types::params(p);
    let results = types::results(p);
    let ty = FuncType {
        func: Some(func),
        type_params,
        params,
        results,
        span: Span::new(func, p.prev_end()),
    };
    let body = p.at(SyntaxKind::LBRACE).then(|| stmt::block(p));
    FuncDecl {
        doc,
        recv,
        name,
        ty,
        body,
    }
}

pub(super) fn ident_list(p: &mut Parser<'_>) -> Vec<Ident> {
    let mut names = vec![p.ident()];
    while p.eat(SyntaxKind::COMMA) {
        names.push(p.ident());
    }
    names
}

pub(super) fn basic_lit(p: &mut Parser<'_>, kind: LitKind) -> BasicLit {
    let value = p.text().to_string();
    let span = p.bump();
    BasicLit { kind, value, span }
}

pub(super) fn lit_kind(kind: SyntaxKind) -> Option<LitKind> {
    match kind {
        SyntaxKind::INT => Some(LitKind::Int),
        SyntaxKind::FLOAT => Some(LitKind::Float),
        SyntaxKind::IMAG => Some(LitKind::Imag),
        SyntaxKind::CHAR => Some(LitKind::Char),
        SyntaxKind::STRING => Some(LitKind::String),
        _ => None,
    }
}

pub(super) fn bad_expr(p: &Parser<'_>) -> Expr {
    Expr::Bad(Span::new(p.pos(), p.pos()))
}

#[cfg(test)]
mod tests {
    use crate::ast::{Decl, Expr, Spec};
    use crate::source::FileSet;
    use crate::parse_file;
    use pretty_assertions::assert_eq;

    fn parse_ok(src: &str) -> crate::ast::File {
        let mut fset = FileSet::new();
        let parsed = parse_file(&mut fset, "test.go", src);
        assert_eq!(parsed.errors, vec![], "unexpected errors for {src:?}");
        parsed.file
    }

    #[test]
    fn package_clause_and_imports() {
        let file = parse_ok("package demo\n\nimport (\n\t\"fmt\"\n\tio \"io/fs\"\n)\n");
        assert_eq!(file.name.name, "demo");
        let paths: Vec<_> = file.imports().map(|i| i.path.value.clone()).collect();
        assert_eq!(paths, vec!["\"fmt\"", "\"io/fs\""]);
        let alias = file.imports().nth(1).and_then(|i| i.name.clone()).unwrap();
        assert_eq!(alias.name, "io");
    }

    #[test]
    fn grouped_consts_keep_spec_docs_and_line_comments() {
        let file = parse_ok(
            "package p\n\n// Colors.\nconst (\n\t// Red is red.\n\tRed Color = iota // first\n\tGreen\n)\n",
        );
        let Decl::Gen(decl) = &file.decls[0] else {
            panic!("expected gen decl");
        };
        assert_eq!(decl.doc.as_ref().unwrap().text(), "Colors.\n");
        let Spec::Value(red) = &decl.specs[0] else {
            panic!("expected value spec");
        };
        assert_eq!(red.doc.as_ref().unwrap().text(), "Red is red.\n");
        assert_eq!(red.comment.as_ref().unwrap().text(), "first\n");
        let Spec::Value(green) = &decl.specs[1] else {
            panic!("expected value spec");
        };
        assert_eq!(green.names[0].name, "Green");
        assert!(green.ty.is_none() && green.values.is_empty());
    }

    #[test]
    fn func_decl_with_receiver_and_type_params() {
        let file = parse_ok(
            "package p\n\nfunc (l *List[T]) Push(v T) {}\n\nfunc Map[T, U any](xs []T, f func(T) U) []U { return nil }\n",
        );
        let Decl::Func(push) = &file.decls[0] else {
            panic!("expected func");
        };
        assert_eq!(push.receiver_type_name(), Some("List"));
        let Decl::Func(map) = &file.decls[1] else {
            panic!("expected func");
        };
        let tparams = map.ty.type_params.as_ref().unwrap();
        assert_eq!(tparams.list[0].names.len(), 2);
        assert_eq!(map.ty.params.list.len(), 2);
        assert!(matches!(
            map.ty.results.as_ref().unwrap().list[0].ty,
            Expr::ArrayType { len: None, .. }
        ));
    }

    #[test]
    fn generic_type_spec() {
        let file = parse_ok("package p\n\ntype Number interface {\n\t~int | ~float64\n}\n\ntype Pair[K comparable, V any] struct {\n\tKey K\n\tVal V\n}\n");
        let Decl::Gen(decl) = &file.decls[1] else {
            panic!("expected gen decl");
        };
        let Spec::Type(pair) = &decl.specs[0] else {
            panic!("expected type spec");
        };
        assert_eq!(pair.type_params.as_ref().unwrap().list.len(), 2);
    }

    #[test]
    fn array_type_is_not_type_params() {
        let file = parse_ok("package p\n\ntype Block [N]byte\n");
        let Decl::Gen(decl) = &file.decls[0] else {
            panic!("expected gen decl");
        };
        let Spec::Type(block) = &decl.specs[0] else {
            panic!("expected type spec");
        };
        assert!(block.type_params.is_none());
        assert!(matches!(block.ty, Expr::ArrayType { len: Some(_), .. }));
    }

    #[test]
    fn garbage_between_decls_recovers() {
        let mut fset = FileSet::new();
        let parsed = parse_file(&mut fset, "bad.go", "package p\n\n+++\n\nvar X int\n");
        assert_eq!(parsed.errors.len(), 1);
        assert!(matches!(parsed.file.decls[0], Decl::Bad(_)));
        assert!(matches!(parsed.file.decls[1], Decl::Gen(_)));
    }
}
