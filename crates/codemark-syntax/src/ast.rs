//! Typed syntax tree for declarations, expressions and statements.
//!
//! Every node category is a variant of a closed enum ([`Decl`], [`Spec`],
//! [`Expr`], [`Stmt`]) so that consumers walking the tree match exhaustively
//! and a new category cannot slip through a catch-all arm unnoticed.
//!
//! Positions are global [`BytePos`] values from a [`FileSet`](crate::FileSet).

use crate::source::{BytePos, Span};

/// Reports whether a name is exported: its first character is upper case.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// A literal, kept verbatim as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub span: Span,
}

impl BasicLit {
    /// The value of a string literal with quotes removed and the common
    /// escapes resolved. `None` for non-string literals or bad escapes.
    pub fn unquote(&self) -> Option<String> {
        if self.kind != LitKind::String || self.value.len() < 2 {
            return None;
        }
        let inner = &self.value[1..self.value.len() - 1];
        if self.value.starts_with('`') {
            return Some(inner.replace('\r', ""));
        }
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                '\'' => out.push('\''),
                _ => return None,
            }
        }
        Some(out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text including its `//` or `/* */` markers.
    pub text: String,
    pub span: Span,
}

/// A run of comments with no tokens and no blank lines between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    pub fn span(&self) -> Span {
        match (self.list.first(), self.list.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::default(),
        }
    }

    /// The comment text without markers, one line per source line.
    ///
    /// A single space after `//` is removed, leading and trailing blank
    /// lines are dropped, and the result ends in a newline unless empty.
    pub fn text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for comment in &self.list {
            let raw = comment.text.as_str();
            if let Some(rest) = raw.strip_prefix("//") {
                lines.push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
            } else if let Some(rest) = raw.strip_prefix("/*") {
                let body = rest.strip_suffix("*/").unwrap_or(rest);
                lines.extend(body.lines().map(str::to_string));
            }
        }
        for line in &mut lines {
            let trimmed = line.trim_end().len();
            line.truncate(trimmed);
        }
        while lines.first().is_some_and(|l| l.is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return String::new();
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

/// A parameter, result, struct field, interface element or type parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub doc: Option<CommentGroup>,
    pub names: Vec<Ident>,
    pub ty: Expr,
    pub tag: Option<BasicLit>,
    pub comment: Option<CommentGroup>,
}

impl Field {
    pub fn span(&self) -> Span {
        let start = self.names.first().map_or(self.ty.span(), |n| n.span);
        let end = self.tag.as_ref().map_or(self.ty.span(), |t| t.span);
        start.to(end)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    pub opening: Option<BytePos>,
    pub list: Vec<Field>,
    pub closing: Option<BytePos>,
}

impl FieldList {
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of parameters, counting every name of a grouped field.
    pub fn num_fields(&self) -> usize {
        self.list.iter().map(|f| f.names.len().max(1)).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    /// Position of the `func` keyword; `None` for interface methods.
    pub func: Option<BytePos>,
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    pub results: Option<FieldList>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub fields: FieldList,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub methods: FieldList,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    Xor,
    Addr,
    Recv,
    Tilde,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Xor => "^",
            UnaryOp::Addr => "&",
            UnaryOp::Recv => "<-",
            UnaryOp::Tilde => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    LogOr,
    LogAnd,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::LogOr => "||",
            BinaryOp::LogAnd => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&",
            BinaryOp::AndNot => "&^",
        }
    }

    /// Binding strength, 1 (weakest) to 5 (strongest).
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::LogOr => 1,
            BinaryOp::LogAnd => 2,
            BinaryOp::Eq
            | BinaryOp::Neq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => 3,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Or | BinaryOp::Xor => 4,
            BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Rem
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::And
            | BinaryOp::AndNot => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    BasicLit(BasicLit),
    CompositeLit {
        ty: Option<Box<Expr>>,
        lbrace: BytePos,
        elts: Vec<Expr>,
        rbrace: BytePos,
    },
    FuncLit {
        ty: FuncType,
        body: BlockStmt,
    },
    Paren {
        lparen: BytePos,
        x: Box<Expr>,
        rparen: BytePos,
    },
    Selector {
        x: Box<Expr>,
        sel: Ident,
    },
    /// `x[i]`, or a generic instantiation `x[A, B]`.
    Index {
        x: Box<Expr>,
        indices: Vec<Expr>,
        rbrack: BytePos,
    },
    Slice {
        x: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
        slice3: bool,
        rbrack: BytePos,
    },
    /// `x.(T)`; `ty` is `None` for `x.(type)` in type switches.
    TypeAssert {
        x: Box<Expr>,
        ty: Option<Box<Expr>>,
        rparen: BytePos,
    },
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        ellipsis: bool,
        rparen: BytePos,
    },
    /// `*x`: pointer type or dereference.
    Star {
        star: BytePos,
        x: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        op_pos: BytePos,
        x: Box<Expr>,
    },
    Binary {
        x: Box<Expr>,
        op: BinaryOp,
        y: Box<Expr>,
    },
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    /// `...T` in a variadic parameter, or `...` in `[...]T`.
    Ellipsis {
        pos: BytePos,
        elt: Option<Box<Expr>>,
    },
    /// `[N]T`, `[...]T`, or the slice type `[]T` when `len` is `None`.
    ArrayType {
        lbrack: BytePos,
        len: Option<Box<Expr>>,
        elt: Box<Expr>,
    },
    StructType(StructType),
    FuncType(FuncType),
    InterfaceType(InterfaceType),
    MapType {
        map: BytePos,
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ChanType {
        begin: BytePos,
        dir: ChanDir,
        value: Box<Expr>,
    },
    Bad(Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(id) => id.span,
            Expr::BasicLit(lit) => lit.span,
            Expr::CompositeLit {
                ty, lbrace, rbrace, ..
            } => {
                let start = ty.as_ref().map_or(*lbrace, |t| t.span().start);
                Span::new(start, rbrace + 1)
            }
            Expr::FuncLit { ty, body } => ty.span.to(body.span()),
            Expr::Paren { lparen, rparen, .. } => Span::new(*lparen, rparen + 1),
            Expr::Selector { x, sel } => x.span().to(sel.span),
            Expr::Index { x, rbrack, .. } | Expr::Slice { x, rbrack, .. } => {
                Span::new(x.span().start, rbrack + 1)
            }
            Expr::TypeAssert { x, rparen, .. } | Expr::Call { fun: x, rparen, .. } => {
                Span::new(x.span().start, rparen + 1)
            }
            Expr::Star { star, x } => Span::new(*star, x.span().end),
            Expr::Unary { op_pos, x, .. } => Span::new(*op_pos, x.span().end),
            Expr::Binary { x, y, .. } => x.span().to(y.span()),
            Expr::KeyValue { key, value } => key.span().to(value.span()),
            Expr::Ellipsis { pos, elt } => {
                let end = elt.as_ref().map_or(pos + 3, |e| e.span().end);
                Span::new(*pos, end)
            }
            Expr::ArrayType { lbrack, elt, .. } => Span::new(*lbrack, elt.span().end),
            Expr::StructType(st) => st.span,
            Expr::FuncType(ft) => ft.span,
            Expr::InterfaceType(it) => it.span,
            Expr::MapType { map, value, .. } => Span::new(*map, value.span().end),
            Expr::ChanType { begin, value, .. } => Span::new(*begin, value.span().end),
            Expr::Bad(span) => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub lbrace: BytePos,
    pub stmts: Vec<Stmt>,
    pub rbrace: BytePos,
}

impl BlockStmt {
    pub fn span(&self) -> Span {
        Span::new(self.lbrace, self.rbrace + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Define,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Define => ":=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::And => "&=",
            AssignOp::Or => "|=",
            AssignOp::Xor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::AndNot => "&^=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl BranchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BranchKind::Break => "break",
            BranchKind::Continue => "continue",
            BranchKind::Goto => "goto",
            BranchKind::Fallthrough => "fallthrough",
        }
    }
}

/// A `case`/`default` clause of an expression or type switch.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub case: BytePos,
    /// `None` for `default`.
    pub list: Option<Vec<Expr>>,
    pub body: Vec<Stmt>,
}

/// A `case`/`default` clause of a select statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CommClause {
    pub case: BytePos,
    /// `None` for `default`.
    pub comm: Option<Box<Stmt>>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Decl(GenDecl),
    Empty(BytePos),
    Labeled {
        label: Ident,
        stmt: Box<Stmt>,
    },
    Expr(Expr),
    Send {
        chan: Expr,
        value: Expr,
    },
    IncDec {
        x: Expr,
        inc: bool,
        end: BytePos,
    },
    Assign {
        lhs: Vec<Expr>,
        op: AssignOp,
        rhs: Vec<Expr>,
    },
    Go {
        pos: BytePos,
        call: Expr,
    },
    Defer {
        pos: BytePos,
        call: Expr,
    },
    Return {
        pos: BytePos,
        results: Vec<Expr>,
    },
    Branch {
        pos: BytePos,
        kind: BranchKind,
        label: Option<Ident>,
    },
    Block(BlockStmt),
    If {
        pos: BytePos,
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: BlockStmt,
        els: Option<Box<Stmt>>,
    },
    Switch {
        pos: BytePos,
        init: Option<Box<Stmt>>,
        tag: Option<Expr>,
        clauses: Vec<CaseClause>,
        rbrace: BytePos,
    },
    TypeSwitch {
        pos: BytePos,
        init: Option<Box<Stmt>>,
        /// `x.(type)` or `v := x.(type)`.
        assign: Box<Stmt>,
        clauses: Vec<CaseClause>,
        rbrace: BytePos,
    },
    Select {
        pos: BytePos,
        clauses: Vec<CommClause>,
        rbrace: BytePos,
    },
    For {
        pos: BytePos,
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: BlockStmt,
    },
    Range {
        pos: BytePos,
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        x: Expr,
        body: BlockStmt,
    },
    Bad(Span),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Decl(decl) => decl.span(),
            Stmt::Empty(pos) => Span::new(*pos, *pos),
            Stmt::Labeled { label, stmt } => label.span.to(stmt.span()),
            Stmt::Expr(x) => x.span(),
            Stmt::Send { chan, value } => chan.span().to(value.span()),
            Stmt::IncDec { x, end, .. } => Span::new(x.span().start, *end),
            Stmt::Assign { lhs, rhs, .. } => {
                let start = lhs.first().map_or(Span::default(), Expr::span);
                let end = rhs.last().map_or(start, Expr::span);
                start.to(end)
            }
            Stmt::Go { pos, call } | Stmt::Defer { pos, call } => Span::new(*pos, call.span().end),
            Stmt::Return { pos, results } => {
                let end = results.last().map_or(pos + 6, |r| r.span().end);
                Span::new(*pos, end)
            }
            Stmt::Branch { pos, kind, label } => {
                let end = label
                    .as_ref()
                    .map_or(pos + kind.as_str().len(), |l| l.span.end);
                Span::new(*pos, end)
            }
            Stmt::Block(block) => block.span(),
            Stmt::If {
                pos, body, els, ..
            } => {
                let end = els.as_ref().map_or(body.span().end, |e| e.span().end);
                Span::new(*pos, end)
            }
            Stmt::Switch { pos, rbrace, .. }
            | Stmt::TypeSwitch { pos, rbrace, .. }
            | Stmt::Select { pos, rbrace, .. } => Span::new(*pos, rbrace + 1),
            Stmt::For { pos, body, .. } | Stmt::Range { pos, body, .. } => {
                Span::new(*pos, body.span().end)
            }
            Stmt::Bad(span) => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKeyword {
    Import,
    Const,
    Type,
    Var,
}

impl DeclKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKeyword::Import => "import",
            DeclKeyword::Const => "const",
            DeclKeyword::Type => "type",
            DeclKeyword::Var => "var",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub doc: Option<CommentGroup>,
    pub name: Option<Ident>,
    pub path: BasicLit,
    pub comment: Option<CommentGroup>,
}

impl ImportSpec {
    pub fn span(&self) -> Span {
        self.name
            .as_ref()
            .map_or(self.path.span, |n| n.span.to(self.path.span))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub doc: Option<CommentGroup>,
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
    pub comment: Option<CommentGroup>,
}

impl ValueSpec {
    pub fn span(&self) -> Span {
        let start = self.names.first().map_or(Span::default(), |n| n.span);
        let end = match (self.values.last(), &self.ty) {
            (Some(v), _) => v.span(),
            (None, Some(t)) => t.span(),
            (None, None) => self.names.last().map_or(start, |n| n.span),
        };
        start.to(end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub doc: Option<CommentGroup>,
    pub name: Ident,
    pub type_params: Option<FieldList>,
    /// Position of `=` for alias declarations.
    pub assign: Option<BytePos>,
    pub ty: Expr,
    pub comment: Option<CommentGroup>,
}

impl TypeSpec {
    pub fn span(&self) -> Span {
        self.name.span.to(self.ty.span())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

impl Spec {
    pub fn span(&self) -> Span {
        match self {
            Spec::Import(s) => s.span(),
            Spec::Value(s) => s.span(),
            Spec::Type(s) => s.span(),
        }
    }
}

/// An `import`, `const`, `type` or `var` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub doc: Option<CommentGroup>,
    pub keyword: DeclKeyword,
    pub keyword_pos: BytePos,
    pub lparen: Option<BytePos>,
    pub specs: Vec<Spec>,
    pub rparen: Option<BytePos>,
}

impl GenDecl {
    pub fn span(&self) -> Span {
        let end = match (self.rparen, self.specs.last()) {
            (Some(rparen), _) => rparen + 1,
            (None, Some(spec)) => spec.span().end,
            (None, None) => self.keyword_pos + self.keyword.as_str().len(),
        };
        Span::new(self.keyword_pos, end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub doc: Option<CommentGroup>,
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    pub body: Option<BlockStmt>,
}

impl FuncDecl {
    pub fn span(&self) -> Span {
        let end = self.body.as_ref().map_or(self.ty.span, BlockStmt::span);
        self.ty.span.to(end)
    }

    /// The declaration without its body, as shown in documentation.
    pub fn signature(&self) -> FuncDecl {
        FuncDecl {
            body: None,
            ..self.clone()
        }
    }

    /// Name of the receiver's base type, with pointers and type arguments
    /// stripped: `func (r *List[T]) Len()` yields `List`.
    pub fn receiver_type_name(&self) -> Option<&str> {
        let field = self.recv.as_ref()?.list.first()?;
        let mut ty = &field.ty;
        loop {
            ty = match ty {
                Expr::Star { x, .. } | Expr::Paren { x, .. } | Expr::Index { x, .. } => x,
                Expr::Ident(id) => return Some(&id.name),
                _ => return None,
            };
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
    Bad(Span),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Gen(d) => d.span(),
            Decl::Func(d) => d.span(),
            Decl::Bad(span) => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub doc: Option<CommentGroup>,
    pub package: BytePos,
    pub name: Ident,
    pub decls: Vec<Decl>,
    /// Every comment group in the file, in source order.
    pub comments: Vec<CommentGroup>,
    /// Global range covered by the file's text.
    pub span: Span,
}

impl File {
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls.iter().flat_map(|decl| match decl {
            Decl::Gen(gen_decl) => gen_decl
                .specs
                .iter()
                .filter_map(|spec| match spec {
                    Spec::Import(import) => Some(import),
                    _ => None,
                })
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    }

    /// Comment groups lying entirely inside `span`.
    pub fn comments_within(&self, span: Span) -> Vec<CommentGroup> {
        self.comments
            .iter()
            .filter(|g| {
                let s = g.span();
                s.start >= span.start && s.end <= span.end
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn comment(text: &str) -> Comment {
        Comment {
            text: text.to_string(),
            span: Span::default(),
        }
    }

    #[test]
    fn exported_names() {
        assert!(is_exported("Reader"));
        assert!(is_exported("Ärger"));
        assert!(!is_exported("reader"));
        assert!(!is_exported("_Reader"));
        assert!(!is_exported(""));
    }

    #[test]
    fn comment_group_text_strips_markers() {
        let group = CommentGroup {
            list: vec![comment("// Output:"), comment("// hello"), comment("//")],
        };
        assert_eq!(group.text(), "Output:\nhello\n");
    }

    #[test]
    fn block_comment_text() {
        let group = CommentGroup {
            list: vec![comment("/*\nfirst\nsecond\n*/")],
        };
        assert_eq!(group.text(), "first\nsecond\n");
    }

    #[test]
    fn unquote_interpreted_and_raw_strings() {
        let lit = |value: &str| BasicLit {
            kind: LitKind::String,
            value: value.to_string(),
            span: Span::default(),
        };
        assert_eq!(lit(r#""net/http""#).unquote().as_deref(), Some("net/http"));
        assert_eq!(lit(r#""a\tb""#).unquote().as_deref(), Some("a\tb"));
        assert_eq!(lit("`raw\\n`").unquote().as_deref(), Some("raw\\n"));
        assert_eq!(lit(r#""bad\q""#).unquote(), None);
    }

    #[test]
    fn binary_precedence_levels() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Lt.precedence());
        assert!(BinaryOp::LogAnd.precedence() > BinaryOp::LogOr.precedence());
    }
}
