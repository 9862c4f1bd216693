//! # Parser - Recursive Descent over the Token Stream
//!
//! This module turns lexed source text into the typed tree in [`crate::ast`].
//!
//! ## Token Preparation
//!
//! Before any grammar rule runs, the raw lexer output is reshaped into the
//! stream the grammar expects:
//!
//! 1. **Trivia is removed.** Whitespace and newlines carry no meaning for the
//!    grammar once semicolons are in place.
//! 2. **Semicolons are inserted.** A newline directly after an identifier,
//!    literal, `break`/`continue`/`fallthrough`/`return`, `++`, `--`, `)`,
//!    `]` or `}` becomes an implicit `SEMICOLON` token, exactly as the
//!    language's automatic semicolon rule prescribes.
//! 3. **Comments are grouped.** Adjacent comments with no blank line and no
//!    token between them form a [`CommentGroup`]. A group that starts on the
//!    same line as the preceding token is a *line comment* of that token; a
//!    group that ends on the line directly above a token is that token's
//!    *lead comment*. Grammar rules ask for these when building fields and
//!    specs.
//!
//! ## Grammar Rules
//!
//! The rules live in [`grammar`] as free functions taking `&mut Parser`:
//! declarations in `grammar::decl`, types in `grammar::types`, expressions
//! in `grammar::expr` and statements in `grammar::stmt`.
//!
//! ## Errors
//!
//! Parsing never fails outright. Problems are recorded as [`ParseError`]s,
//! the offending construct becomes a `Bad` node, and the parser skips ahead
//! to the next statement or declaration:
//!
//! ```
//! use codemark_syntax::{FileSet, parse_file};
//!
//! let mut fset = FileSet::new();
//! let parsed = parse_file(&mut fset, "a.go", "package a\n\nvar X = \n");
//! assert_eq!(parsed.file.name.name, "a");
//! assert!(!parsed.errors.is_empty());
//! ```

mod grammar;

use std::collections::HashMap;

use crate::ast::{Comment, CommentGroup, File, Ident};
use crate::lexer::lex_with_spans;
use crate::source::{BytePos, FileSet, Span};
use crate::syntax_kind::SyntaxKind;

/// A syntax error with the global span it was reported at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

/// All errors reported while parsing one file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} syntax error(s) in {filename}, first: {}", errors.len(), first_message(errors))]
pub struct ParseErrors {
    pub filename: String,
    pub errors: Vec<ParseError>,
}

fn first_message(errors: &[ParseError]) -> &str {
    errors.first().map_or("", |e| e.message.as_str())
}

/// The result of parsing a file: the (possibly partial) tree plus every
/// error encountered on the way.
#[derive(Debug, Clone)]
pub struct Parse {
    pub filename: String,
    pub file: File,
    pub errors: Vec<ParseError>,
}

impl Parse {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The tree if parsing was clean, otherwise the collected errors.
    pub fn into_result(self) -> Result<File, ParseErrors> {
        if self.errors.is_empty() {
            Ok(self.file)
        } else {
            Err(ParseErrors {
                filename: self.filename,
                errors: self.errors,
            })
        }
    }
}

/// Registers `src` under `filename` in the file set and parses it.
pub fn parse_file(fset: &mut FileSet, filename: &str, src: &str) -> Parse {
    let (_, base) = fset.add_file(filename, src);
    let mut parser = Parser::new(src, base);
    let file = grammar::source_file(&mut parser);
    log::debug!(
        "parsed {filename}: {} decls, {} errors",
        file.decls.len(),
        parser.errors.len()
    );
    Parse {
        filename: filename.to_string(),
        file,
        errors: parser.errors,
    }
}

/// A significant token with its global span and line numbers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tok<'input> {
    pub kind: SyntaxKind,
    pub text: &'input str,
    pub span: Span,
    pub line: u32,
    /// Semicolon synthesised from a line break.
    pub implicit: bool,
}

struct PendingGroup {
    group: CommentGroup,
    /// Index of the token that follows the group.
    before_tok: usize,
    /// Index of the token that precedes the group, if any.
    after_tok: Option<usize>,
    end_line: u32,
    trailing: bool,
}

/// The parser state.
///
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `text()`
/// - Consume tokens: `bump()`, `eat()`, `expect()`
/// - Fetch attached comments: `lead_comment()`, `line_comment()`
/// - Report problems: `error()`
pub struct Parser<'input> {
    tokens: Vec<Tok<'input>>,
    pos: usize,
    comments: Vec<CommentGroup>,
    /// Token index -> comment group directly above it.
    lead: HashMap<usize, usize>,
    /// Token index -> comment group trailing it on the same line.
    trailing: HashMap<usize, usize>,
    errors: Vec<ParseError>,
    /// Nesting of brackets; negative inside control clause headers, where
    /// `T {` opens a block rather than a composite literal.
    expr_lev: i32,
    base: BytePos,
    end: BytePos,
}

impl<'input> Parser<'input> {
    /// Prepare a parser for `src`, whose first byte sits at `base`.
    pub fn new(src: &'input str, base: BytePos) -> Self {
        let mut tokens: Vec<Tok<'input>> = Vec::new();
        let mut groups: Vec<PendingGroup> = Vec::new();
        let mut line: u32 = 1;
        let mut last_real_line: Option<u32> = None;

        let needs_semicolon = |tokens: &[Tok<'_>]| {
            tokens
                .last()
                .is_some_and(|t| t.kind != SyntaxKind::SEMICOLON && t.kind.ends_statement())
        };

        for (token, range) in lex_with_spans(src) {
            let span = Span::new(base + range.start, base + range.end);
            match token.kind {
                SyntaxKind::WHITESPACE => {}
                SyntaxKind::NEWLINE => {
                    if needs_semicolon(&tokens) {
                        tokens.push(Tok {
                            kind: SyntaxKind::SEMICOLON,
                            text: "\n",
                            span,
                            line,
                            implicit: true,
                        });
                    }
                    line += 1;
                }
                SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT => {
                    let start_line = line;
                    let newlines = token.text.matches('\n').count() as u32;
                    let end_line = line + newlines;
                    let comment = Comment {
                        text: token.text.to_string(),
                        span,
                    };
                    let before_tok = tokens.len();
                    let trailing = last_real_line == Some(start_line)
                        && tokens.last().is_some_and(|t| !t.implicit);
                    let joins_previous = groups.last().is_some_and(|g| {
                        g.before_tok == before_tok
                            && start_line <= g.end_line + 1
                            && !(g.trailing && start_line > g.end_line)
                    });
                    match groups.last_mut() {
                        Some(g) if joins_previous => {
                            g.group.list.push(comment);
                            g.end_line = end_line;
                        }
                        _ => groups.push(PendingGroup {
                            group: CommentGroup {
                                list: vec![comment],
                            },
                            before_tok,
                            after_tok: before_tok.checked_sub(1),
                            end_line,
                            trailing,
                        }),
                    }
                    // A general comment spanning lines acts like a newline.
                    if newlines > 0 && needs_semicolon(&tokens) {
                        tokens.push(Tok {
                            kind: SyntaxKind::SEMICOLON,
                            text: "\n",
                            span,
                            line: start_line,
                            implicit: true,
                        });
                    }
                    line = end_line;
                }
                kind => {
                    last_real_line = Some(line);
                    tokens.push(Tok {
                        kind,
                        text: token.text,
                        span,
                        line,
                        implicit: false,
                    });
                }
            }
        }

        let end = base + src.len();
        if needs_semicolon(&tokens) {
            tokens.push(Tok {
                kind: SyntaxKind::SEMICOLON,
                text: "\n",
                span: Span::new(end, end),
                line,
                implicit: true,
            });
        }

        let mut lead = HashMap::new();
        let mut trailing = HashMap::new();
        let mut comments = Vec::with_capacity(groups.len());
        for (idx, g) in groups.into_iter().enumerate() {
            if g.trailing {
                if let Some(after) = g.after_tok {
                    trailing.insert(after, idx);
                }
            } else if tokens
                .get(g.before_tok)
                .is_some_and(|t| t.line == g.end_line + 1)
            {
                lead.insert(g.before_tok, idx);
            }
            comments.push(g.group);
        }

        Self {
            tokens,
            pos: 0,
            comments,
            lead,
            trailing,
            errors: Vec::new(),
            expr_lev: 0,
            base,
            end,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Text of the current token; empty at end of input.
    pub fn text(&self) -> &'input str {
        self.tokens.get(self.pos).map(|t| t.text).unwrap_or("")
    }

    /// Span of the current token; an empty span at the end of input.
    pub fn span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or(Span::new(self.end, self.end))
    }

    /// Start position of the current token.
    pub fn pos(&self) -> BytePos {
        self.span().start
    }

    /// End position of the last consumed token.
    pub fn prev_end(&self) -> BytePos {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.base, |t| t.span.end)
    }

    /// Index of the current token, used for lookahead bookkeeping.
    pub(crate) fn index(&self) -> usize {
        self.pos
    }

    pub(crate) fn token_at(&self, index: usize) -> Option<&Tok<'input>> {
        self.tokens.get(index)
    }

    /// Consume the current token and return its span.
    pub fn bump(&mut self) -> Span {
        let span = self.span();
        if !self.at_end() {
            self.pos += 1;
        }
        span
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` and return its start position, or report
    /// that `what` was expected and leave the input untouched.
    pub fn expect(&mut self, kind: SyntaxKind, what: &str) -> BytePos {
        let pos = self.pos();
        if !self.eat(kind) {
            self.error_expected(what);
        }
        pos
    }

    /// Consume an identifier, reporting an error and returning `_` if the
    /// current token is something else.
    pub fn ident(&mut self) -> Ident {
        if self.at(SyntaxKind::IDENT) {
            let name = self.text();
            let span = self.bump();
            Ident::new(name, span)
        } else {
            self.error_expected("identifier");
            Ident::new("_", Span::new(self.pos(), self.pos()))
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let span = self.span();
        self.errors.push(ParseError {
            message: message.into(),
            span,
        });
    }

    pub fn error_expected(&mut self, what: &str) {
        let found = match self.current() {
            SyntaxKind::EOF => "end of file".to_string(),
            SyntaxKind::SEMICOLON if self.tokens.get(self.pos).is_some_and(|t| t.implicit) => {
                "newline".to_string()
            }
            _ => format!("'{}'", self.text()),
        };
        self.error(format!("expected {what}, found {found}"));
    }

    /// The comment group directly above the current token.
    pub fn lead_comment(&self) -> Option<CommentGroup> {
        self.lead
            .get(&self.pos)
            .map(|&idx| self.comments[idx].clone())
    }

    /// The comment group on the same line after the last consumed token.
    pub fn line_comment(&self) -> Option<CommentGroup> {
        let prev = self.pos.checked_sub(1)?;
        self.trailing
            .get(&prev)
            .map(|&idx| self.comments[idx].clone())
    }

    pub(crate) fn expr_lev(&self) -> i32 {
        self.expr_lev
    }

    /// Run `f` with the expression level replaced by `lev`.
    pub(crate) fn with_expr_lev<T>(&mut self, lev: i32, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.expr_lev;
        self.expr_lev = lev;
        let out = f(self);
        self.expr_lev = saved;
        out
    }

    pub(crate) fn take_comments(&mut self) -> Vec<CommentGroup> {
        std::mem::take(&mut self.comments)
    }

    pub(crate) fn file_span(&self) -> Span {
        Span::new(self.base, self.end)
    }
}
