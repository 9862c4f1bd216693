//! Declarations, specs, signatures, and struct/interface bodies.

use super::{Emitter, RenderError, RenderResult, Row};
use crate::ast::{
    CommentGroup, Decl, Field, FieldList, FuncDecl, FuncType, GenDecl, InterfaceType, Spec,
    StructType,
};
use crate::source::{BytePos, Span};

impl<'a> Emitter<'a> {
    /// Render into a separate string at the current indentation.
    pub(super) fn render(
        &self,
        f: impl FnOnce(&mut Emitter<'a>) -> RenderResult,
    ) -> Result<String, RenderError> {
        let mut nested = self.nested();
        f(&mut nested)?;
        Ok(nested.out)
    }

    pub(super) fn has_gap(&self, prev_end: BytePos, next_start: BytePos) -> bool {
        match (self.line(prev_end), self.line(next_start)) {
            (Some(prev), Some(next)) => next > prev + 1,
            _ => false,
        }
    }

    pub(super) fn decl(&mut self, decl: &Decl) -> RenderResult {
        match decl {
            Decl::Gen(gen_decl) => self.gen_decl(gen_decl),
            Decl::Func(func) => self.func_decl(func),
            Decl::Bad(span) => Err(RenderError::BadDecl(span.start)),
        }
    }

    pub(super) fn gen_decl(&mut self, decl: &GenDecl) -> RenderResult {
        self.text(decl.keyword.as_str());
        if decl.lparen.is_none()
            && let [spec] = decl.specs.as_slice()
        {
            self.text(" ");
            return self.single_spec(spec);
        }
        if decl.specs.is_empty() {
            self.text(" ()");
            return Ok(());
        }

        self.text(" (");
        self.indent += 1;
        let mut rows = Vec::with_capacity(decl.specs.len());
        let mut prev_end = None;
        for spec in &decl.specs {
            let (doc, comment) = spec_comments(spec);
            let start = doc.map_or(spec.span(), CommentGroup::span).start;
            rows.push(Row {
                blank_before: prev_end.is_some_and(|end| self.has_gap(end, start)),
                doc,
                cells: self.spec_cells(spec, comment)?,
            });
            prev_end = Some(comment.map_or(spec.span(), |c| spec.span().to(c.span())).end);
        }
        self.rows(&rows);
        self.indent -= 1;
        self.nl();
        self.text(")");
        Ok(())
    }

    fn spec_cells(
        &self,
        spec: &Spec,
        comment: Option<&CommentGroup>,
    ) -> Result<Vec<String>, RenderError> {
        let comment = comment.map(Emitter::comment_text).unwrap_or_default();
        let cells = match spec {
            Spec::Import(import) => {
                let path = match &import.name {
                    Some(name) => format!("{} {}", name.name, import.path.value),
                    None => import.path.value.clone(),
                };
                vec![path, comment]
            }
            Spec::Value(value) => {
                let names = join_names(value.names.iter().map(|n| n.name.as_str()));
                let ty = match &value.ty {
                    Some(ty) => self.render(|e| e.expr(ty))?,
                    None => String::new(),
                };
                let values = if value.values.is_empty() {
                    String::new()
                } else {
                    let list = self.render(|e| e.expr_list(&value.values))?;
                    format!("= {list}")
                };
                vec![names, ty, values, comment]
            }
            Spec::Type(spec) => {
                let name = self.render(|e| {
                    e.text(&spec.name.name);
                    match &spec.type_params {
                        Some(params) => e.type_params(params),
                        None => Ok(()),
                    }
                })?;
                let ty = self.render(|e| {
                    if spec.assign.is_some() {
                        e.text("= ");
                    }
                    e.expr(&spec.ty)
                })?;
                vec![name, ty, comment]
            }
        };
        Ok(cells)
    }

    fn single_spec(&mut self, spec: &Spec) -> RenderResult {
        match spec {
            Spec::Import(import) => {
                if let Some(name) = &import.name {
                    self.text(&name.name);
                    self.text(" ");
                }
                self.text(&import.path.value);
            }
            Spec::Value(value) => {
                self.ident_list(&value.names);
                if let Some(ty) = &value.ty {
                    self.text(" ");
                    self.expr(ty)?;
                }
                if !value.values.is_empty() {
                    self.text(" = ");
                    self.expr_list(&value.values)?;
                }
            }
            Spec::Type(spec) => {
                self.text(&spec.name.name);
                if let Some(params) = &spec.type_params {
                    self.type_params(params)?;
                }
                self.text(if spec.assign.is_some() { " = " } else { " " });
                self.expr(&spec.ty)?;
            }
        }
        if let (_, Some(comment)) = spec_comments(spec) {
            self.text(" ");
            self.text(&Emitter::comment_text(comment));
        }
        Ok(())
    }

    fn ident_list(&mut self, names: &[crate::ast::Ident]) {
        self.text(&join_names(names.iter().map(|n| n.name.as_str())));
    }

    pub(super) fn func_decl(&mut self, func: &FuncDecl) -> RenderResult {
        self.text("func ");
        if let Some(recv) = &func.recv {
            self.params(recv)?;
            self.text(" ");
        }
        self.text(&func.name.name);
        if let Some(params) = &func.ty.type_params {
            self.type_params(params)?;
        }
        self.signature(&func.ty)?;
        if let Some(body) = &func.body {
            self.text(" ");
            self.block(body)?;
        }
        Ok(())
    }

    /// Parameters and results, without the `func` keyword.
    pub(super) fn signature(&mut self, ty: &FuncType) -> RenderResult {
        self.params(&ty.params)?;
        let Some(results) = &ty.results else {
            return Ok(());
        };
        match results.list.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() && results.opening.is_none() => {
                self.text(" ");
                self.expr(&single.ty)
            }
            _ => {
                self.text(" ");
                self.params(results)
            }
        }
    }

    pub(super) fn params(&mut self, list: &FieldList) -> RenderResult {
        self.text("(");
        self.param_fields(list)?;
        self.text(")");
        Ok(())
    }

    pub(super) fn type_params(&mut self, list: &FieldList) -> RenderResult {
        self.text("[");
        self.param_fields(list)?;
        self.text("]");
        Ok(())
    }

    fn param_fields(&mut self, list: &FieldList) -> RenderResult {
        for (i, field) in list.list.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            if !field.names.is_empty() {
                self.ident_list(&field.names);
                self.text(" ");
            }
            self.expr(&field.ty)?;
        }
        Ok(())
    }

    pub(super) fn struct_type(&mut self, st: &StructType) -> RenderResult {
        if st.fields.list.is_empty() {
            self.text("struct{}");
            return Ok(());
        }
        self.text("struct {");
        self.member_rows(&st.fields, |e, field| {
            let tag = field
                .tag
                .as_ref()
                .map(|t| t.value.clone())
                .unwrap_or_default();
            let ty = e.render(|e| e.expr(&field.ty))?;
            let (names, ty) = if field.names.is_empty() {
                (ty, String::new())
            } else {
                (join_names(field.names.iter().map(|n| n.name.as_str())), ty)
            };
            Ok(vec![names, ty, tag])
        })?;
        self.text("}");
        Ok(())
    }

    pub(super) fn interface_type(&mut self, it: &InterfaceType) -> RenderResult {
        if it.methods.list.is_empty() {
            self.text("interface{}");
            return Ok(());
        }
        self.text("interface {");
        self.member_rows(&it.methods, |e, field| {
            let cell = e.render(|e| match (field.names.first(), &field.ty) {
                (Some(name), crate::ast::Expr::FuncType(sig)) => {
                    e.text(&name.name);
                    e.signature(sig)
                }
                _ => e.expr(&field.ty),
            })?;
            Ok(vec![cell])
        })?;
        self.text("}");
        Ok(())
    }

    /// Fields or methods one per line with docs and aligned line comments,
    /// leaving the output at the start of the closing line.
    fn member_rows(
        &mut self,
        list: &FieldList,
        cells: impl Fn(&Emitter<'a>, &Field) -> Result<Vec<String>, RenderError>,
    ) -> RenderResult {
        self.indent += 1;
        let mut rows = Vec::with_capacity(list.list.len());
        let mut prev_end: Option<BytePos> = None;
        for field in &list.list {
            let span = field_span_with_comments(field);
            let mut row_cells = cells(self, field)?;
            row_cells.push(
                field
                    .comment
                    .as_ref()
                    .map(Emitter::comment_text)
                    .unwrap_or_default(),
            );
            rows.push(Row {
                blank_before: prev_end.is_some_and(|end| self.has_gap(end, span.start)),
                doc: field.doc.as_ref(),
                cells: row_cells,
            });
            prev_end = Some(span.end);
        }
        self.rows(&rows);
        self.indent -= 1;
        self.nl();
        Ok(())
    }
}

fn join_names<'n>(names: impl Iterator<Item = &'n str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

fn spec_comments(spec: &Spec) -> (Option<&CommentGroup>, Option<&CommentGroup>) {
    match spec {
        Spec::Import(s) => (s.doc.as_ref(), s.comment.as_ref()),
        Spec::Value(s) => (s.doc.as_ref(), s.comment.as_ref()),
        Spec::Type(s) => (s.doc.as_ref(), s.comment.as_ref()),
    }
}

fn field_span_with_comments(field: &Field) -> Span {
    let mut span = field.span();
    if let Some(doc) = &field.doc {
        span = span.to(doc.span());
    }
    if let Some(comment) = &field.comment {
        span = span.to(comment.span());
    }
    span
}

#[cfg(test)]
mod tests {
    use super::super::tests::print_first_decl;
    use insta::assert_snapshot;

    #[test]
    fn struct_with_docs_tags_and_comments() {
        let out = print_first_decl(
            "package p\n\ntype Config struct {\n\t// Name is shown to users.\n\tName string `json:\"name\"` // required\n\tTimeout, Retries int\n\n\tio.Reader\n\tnext *Config\n}\n",
        );
        assert_snapshot!(out, @r#"
        type Config struct {
            // Name is shown to users.
            Name             string `json:"name"` // required
            Timeout, Retries int

            io.Reader
            next *Config
        }
        "#);
    }

    #[test]
    fn grouped_consts_align() {
        let out = print_first_decl(
            "package p\n\nconst (\n\tRed Color = iota // first\n\tGreen\n\tBlueish\n)\n",
        );
        assert_snapshot!(out, @r"
        const (
            Red Color = iota // first
            Green
            Blueish
        )
        ");
    }

    #[test]
    fn grouped_vars_align_names_and_types() {
        let out = print_first_decl("package p\n\nvar (\n\tX int\n\tLonger string = \"a\"\n)\n");
        assert_snapshot!(out, @r#"
        var (
            X      int
            Longer string = "a"
        )
        "#);
    }

    #[test]
    fn interface_with_embeds_and_methods() {
        let out = print_first_decl(
            "package p\n\ntype ReadCloser interface {\n\tio.Reader\n\t// Close releases resources.\n\tClose() error\n\tStat(name string) (info FileInfo, err error)\n}\n",
        );
        assert_snapshot!(out, @r"
        type ReadCloser interface {
            io.Reader
            // Close releases resources.
            Close() error
            Stat(name string) (info FileInfo, err error)
        }
        ");
    }

    #[test]
    fn func_signature_with_receiver_and_type_params() {
        let out = print_first_decl(
            "package p\n\nfunc (l *List[T]) Each(fn func(int, T) bool) (n int) {}\n",
        );
        assert_snapshot!(out, @"func (l *List[T]) Each(fn func(int, T) bool) (n int) {}");

        let out = print_first_decl("package p\n\nfunc Map[T, U any](xs []T, f func(T) U) []U\n");
        assert_snapshot!(out, @"func Map[T, U any](xs []T, f func(T) U) []U");
    }

    #[test]
    fn type_alias_and_constraint() {
        let out = print_first_decl("package p\n\ntype Bytes = []byte\n");
        assert_snapshot!(out, @"type Bytes = []byte");

        let out = print_first_decl("package p\n\ntype Number interface{ ~int | ~float64 }\n");
        assert_snapshot!(out, @r"
        type Number interface {
            ~int | ~float64
        }
        ");
    }
}
