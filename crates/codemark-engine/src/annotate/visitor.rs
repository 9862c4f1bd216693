//! The syntactic half of annotation: walk a declaration in the order the
//! printer writes it and record what each identifier should become.

use std::collections::{HashMap, VecDeque};

use codemark_syntax::Resolver;
use codemark_syntax::ast::{
    BlockStmt, CaseClause, CommClause, Decl, Expr, Field, FieldList, FuncDecl, FuncType, GenDecl,
    Ident, Spec, Stmt, TypeSpec, ValueSpec,
};
use codemark_syntax::scope::Binding;

use super::predeclared::is_predeclared;
use crate::models::AnnotationKind;

/// What to do with the next identifier token of the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Consume the token without annotating it.
    Ignore,
    Annotate {
        kind: AnnotationKind,
        path_index: Option<usize>,
    },
}

/// Output of a walk: one intent per identifier, in printed order, and the
/// import paths the intents index into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intents {
    pub queue: VecDeque<Intent>,
    pub paths: Vec<String>,
}

pub struct Visitor<'r> {
    resolver: &'r dyn Resolver,
    interop_namespaces: &'r [String],
    out: Intents,
    path_index: HashMap<String, usize>,
}

impl<'r> Visitor<'r> {
    /// `interop_namespaces` are import paths whose members are never
    /// linked (the `C` pseudo-package).
    pub fn new(resolver: &'r dyn Resolver, interop_namespaces: &'r [String]) -> Self {
        Self {
            resolver,
            interop_namespaces,
            out: Intents::default(),
            path_index: HashMap::new(),
        }
    }

    pub fn visit_decl(mut self, decl: &Decl) -> Intents {
        match decl {
            Decl::Gen(gen_decl) => self.gen_decl(gen_decl),
            Decl::Func(func) => self.func_decl(func),
            Decl::Bad(_) => {}
        }
        self.out
    }

    fn push(&mut self, kind: AnnotationKind, path: Option<&str>) {
        let path_index = path.map(|path| match self.path_index.get(path) {
            Some(&index) => index,
            None => {
                let index = self.out.paths.len();
                self.out.paths.push(path.to_string());
                self.path_index.insert(path.to_string(), index);
                index
            }
        });
        self.out
            .queue
            .push_back(Intent::Annotate { kind, path_index });
    }

    fn ignore(&mut self) {
        self.out.queue.push_back(Intent::Ignore);
    }

    fn ignore_each(&mut self, names: &[Ident]) {
        for _ in names {
            self.ignore();
        }
    }

    fn anchor_each(&mut self, names: &[Ident]) {
        for _ in names {
            self.push(AnnotationKind::Anchor, None);
        }
    }

    fn gen_decl(&mut self, decl: &GenDecl) {
        for spec in &decl.specs {
            match spec {
                Spec::Import(import) => {
                    if import.name.is_some() {
                        self.ignore();
                    }
                }
                Spec::Value(value) => self.value_spec(value),
                Spec::Type(ty) => self.type_spec(ty),
            }
        }
    }

    /// The declared name is not annotated; members of a struct or
    /// interface body are anchors.
    fn type_spec(&mut self, spec: &TypeSpec) {
        self.ignore();
        if let Some(params) = &spec.type_params {
            self.field_list(params);
        }
        match &spec.ty {
            Expr::StructType(st) => self.member_anchors(&st.fields),
            Expr::InterfaceType(it) => self.member_anchors(&it.methods),
            other => self.expr(other),
        }
    }

    fn member_anchors(&mut self, members: &FieldList) {
        for field in &members.list {
            self.anchor_each(&field.names);
            self.expr(&field.ty);
        }
    }

    fn func_decl(&mut self, func: &FuncDecl) {
        if let Some(recv) = &func.recv {
            self.field_list(recv);
        }
        self.ignore();
        self.func_type(&func.ty);
        if let Some(body) = &func.body {
            self.block(body);
        }
    }

    fn func_type(&mut self, ty: &FuncType) {
        if let Some(params) = &ty.type_params {
            self.field_list(params);
        }
        self.field_list(&ty.params);
        if let Some(results) = &ty.results {
            self.field_list(results);
        }
    }

    fn field_list(&mut self, list: &FieldList) {
        for field in &list.list {
            self.field(field);
        }
    }

    fn field(&mut self, field: &Field) {
        self.ignore_each(&field.names);
        self.expr(&field.ty);
    }

    fn value_spec(&mut self, spec: &ValueSpec) {
        self.anchor_each(&spec.names);
        if let Some(ty) = &spec.ty {
            self.expr(ty);
        }
        self.exprs(&spec.values);
    }

    fn ident(&mut self, ident: &Ident) {
        match self.resolver.resolve(ident) {
            Binding::Unbound if is_predeclared(&ident.name) => {
                self.push(AnnotationKind::Builtin, None)
            }
            Binding::Declared { exported: true } => self.push(AnnotationKind::Link, None),
            Binding::Unbound | Binding::Declared { .. } | Binding::Import { .. } => self.ignore(),
        }
    }

    /// `pkg.Name` links both parts; any other selector walks its operand
    /// and ignores the selected name.
    fn selector(&mut self, x: &Expr) {
        if let Expr::Ident(pkg) = x
            && let Binding::Import { path } = self.resolver.resolve(pkg)
        {
            self.push(AnnotationKind::PackageLink, Some(&path));
            if self.interop_namespaces.contains(&path) {
                self.ignore();
            } else {
                self.push(AnnotationKind::Link, Some(&path));
            }
            return;
        }
        self.expr(x);
        self.ignore();
    }

    fn exprs(&mut self, list: &[Expr]) {
        for x in list {
            self.expr(x);
        }
    }

    fn opt_expr(&mut self, x: Option<&Expr>) {
        if let Some(x) = x {
            self.expr(x);
        }
    }

    fn expr(&mut self, x: &Expr) {
        match x {
            Expr::Ident(ident) => self.ident(ident),
            Expr::Selector { x, .. } => self.selector(x),
            Expr::BasicLit(_) | Expr::Bad(_) => {}
            Expr::CompositeLit { ty, elts, .. } => {
                self.opt_expr(ty.as_deref());
                self.exprs(elts);
            }
            Expr::FuncLit { ty, body } => {
                self.func_type(ty);
                self.block(body);
            }
            Expr::Paren { x, .. } | Expr::Star { x, .. } | Expr::Unary { x, .. } => self.expr(x),
            Expr::Index { x, indices, .. } => {
                self.expr(x);
                self.exprs(indices);
            }
            Expr::Slice {
                x, low, high, max, ..
            } => {
                self.expr(x);
                self.opt_expr(low.as_deref());
                self.opt_expr(high.as_deref());
                self.opt_expr(max.as_deref());
            }
            Expr::TypeAssert { x, ty, .. } => {
                self.expr(x);
                self.opt_expr(ty.as_deref());
            }
            Expr::Call { fun, args, .. } => {
                self.expr(fun);
                self.exprs(args);
            }
            Expr::Binary { x, y, .. } => {
                self.expr(x);
                self.expr(y);
            }
            Expr::KeyValue { key, value } => {
                self.expr(key);
                self.expr(value);
            }
            Expr::Ellipsis { elt, .. } => self.opt_expr(elt.as_deref()),
            Expr::ArrayType { len, elt, .. } => {
                self.opt_expr(len.as_deref());
                self.expr(elt);
            }
            Expr::StructType(st) => self.field_list(&st.fields),
            Expr::InterfaceType(it) => self.field_list(&it.methods),
            Expr::FuncType(ft) => self.func_type(ft),
            Expr::MapType { key, value, .. } => {
                self.expr(key);
                self.expr(value);
            }
            Expr::ChanType { value, .. } => self.expr(value),
        }
    }

    fn block(&mut self, block: &BlockStmt) {
        self.stmts(&block.stmts);
    }

    fn stmts(&mut self, stmts: &[Stmt]) {
        for s in stmts {
            self.stmt(s);
        }
    }

    fn opt_stmt(&mut self, s: Option<&Stmt>) {
        if let Some(s) = s {
            self.stmt(s);
        }
    }

    fn stmt(&mut self, s: &Stmt) {
        match s {
            Stmt::Decl(decl) => self.gen_decl(decl),
            Stmt::Empty(_) | Stmt::Bad(_) => {}
            Stmt::Labeled { stmt, .. } => {
                self.ignore();
                self.stmt(stmt);
            }
            Stmt::Expr(x) => self.expr(x),
            Stmt::Send { chan, value } => {
                self.expr(chan);
                self.expr(value);
            }
            Stmt::IncDec { x, .. } => self.expr(x),
            Stmt::Assign { lhs, rhs, .. } => {
                self.exprs(lhs);
                self.exprs(rhs);
            }
            Stmt::Go { call, .. } | Stmt::Defer { call, .. } => self.expr(call),
            Stmt::Return { results, .. } => self.exprs(results),
            Stmt::Branch { label, .. } => {
                if label.is_some() {
                    self.ignore();
                }
            }
            Stmt::Block(block) => self.block(block),
            Stmt::If {
                init,
                cond,
                body,
                els,
                ..
            } => {
                self.opt_stmt(init.as_deref());
                self.expr(cond);
                self.block(body);
                self.opt_stmt(els.as_deref());
            }
            Stmt::Switch {
                init, tag, clauses, ..
            } => {
                self.opt_stmt(init.as_deref());
                self.opt_expr(tag.as_ref());
                self.case_clauses(clauses);
            }
            Stmt::TypeSwitch {
                init,
                assign,
                clauses,
                ..
            } => {
                self.opt_stmt(init.as_deref());
                self.stmt(assign);
                self.case_clauses(clauses);
            }
            Stmt::Select { clauses, .. } => self.comm_clauses(clauses),
            Stmt::For {
                init,
                cond,
                post,
                body,
                ..
            } => {
                self.opt_stmt(init.as_deref());
                self.opt_expr(cond.as_ref());
                self.opt_stmt(post.as_deref());
                self.block(body);
            }
            Stmt::Range {
                key,
                value,
                x,
                body,
                ..
            } => {
                self.opt_expr(key.as_ref());
                self.opt_expr(value.as_ref());
                self.expr(x);
                self.block(body);
            }
        }
    }

    fn case_clauses(&mut self, clauses: &[CaseClause]) {
        for clause in clauses {
            if let Some(list) = &clause.list {
                self.exprs(list);
            }
            self.stmts(&clause.body);
        }
    }

    fn comm_clauses(&mut self, clauses: &[CommClause]) {
        for clause in clauses {
            self.opt_stmt(clause.comm.as_deref());
            self.stmts(&clause.body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemark_syntax::{FileSet, PackageScope, parse_file};
    use pretty_assertions::assert_eq;

    fn intents(src: &str) -> Intents {
        let mut fset = FileSet::new();
        let file = parse_file(&mut fset, "p.go", src).file;
        let scope = PackageScope::new([&file]);
        let interop = vec!["C".to_string()];
        let decl = file.decls.last().expect("a declaration");
        Visitor::new(&scope, &interop).visit_decl(decl)
    }

    fn annotate(kind: AnnotationKind, path_index: Option<usize>) -> Intent {
        Intent::Annotate { kind, path_index }
    }

    #[test]
    fn paths_are_deduplicated_in_first_use_order() {
        let out = intents(
            "package p\n\nimport (\n\t\"io\"\n\t\"net/http\"\n)\n\nfunc F(a io.Reader, b *http.Request, c io.Writer)\n",
        );
        assert_eq!(out.paths, vec!["io".to_string(), "net/http".to_string()]);
        let package_links: Vec<_> = out
            .queue
            .iter()
            .filter_map(|i| match i {
                Intent::Annotate {
                    kind: AnnotationKind::PackageLink,
                    path_index,
                } => *path_index,
                _ => None,
            })
            .collect();
        assert_eq!(package_links, vec![0, 1, 0]);
    }

    #[test]
    fn struct_members_are_anchors_but_the_type_name_is_not() {
        let out = intents("package p\n\ntype T struct { X, Y int }\n");
        assert_eq!(
            Vec::from(out.queue),
            vec![
                Intent::Ignore,
                annotate(AnnotationKind::Anchor, None),
                annotate(AnnotationKind::Anchor, None),
                annotate(AnnotationKind::Builtin, None),
            ]
        );
    }

    #[test]
    fn interop_members_are_ignored() {
        let out = intents("package p\n\nimport \"C\"\n\nvar Size C.size_t\n");
        assert_eq!(
            Vec::from(out.queue),
            vec![
                annotate(AnnotationKind::Anchor, None),
                annotate(AnnotationKind::PackageLink, Some(0)),
                Intent::Ignore,
            ]
        );
        assert_eq!(out.paths, vec!["C".to_string()]);
    }
}
