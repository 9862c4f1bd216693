//! # Lexer - Tokenizing Source Text
//!
//! This module breaks source text into tokens using the [Logos] lexer
//! generator. It serves two masters: the parser, which builds declarations
//! from the token stream, and the annotation correlator, which re-scans
//! *rendered* declaration text to find identifier and comment spans.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Nothing is skipped,
//! so spans from [`lex_with_spans`] can be used to slice the input directly:
//!
//! ```
//! use codemark_syntax::lexer::lex;
//!
//! let input = "type T struct { X int } // doc\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Why Two Token Enums?
//!
//! Logos needs its own enum for the `#[derive(Logos)]` macro, while the rest
//! of the workspace uses [`SyntaxKind`], which also carries `ERROR` and `EOF`.
//! [`TokenKind::to_syntax_kind`] converts between them.
//!
//! Keywords are separate kinds from identifiers: the correlator counts only
//! `IDENT` tokens, so `func` or `struct` must never be mistaken for names.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"0[oO][0-7_]+")]
    Int,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-]?[0-9_]+")]
    Float,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?i")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-]?[0-9_]+i")]
    Imag,

    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    Char,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r"`[^`]*`")]
    String,

    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("chan")]
    Chan,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("else")]
    Else,
    #[token("fallthrough")]
    Fallthrough,
    #[token("for")]
    For,
    #[token("func")]
    Func,
    #[token("go")]
    Go,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("package")]
    Package,
    #[token("range")]
    Range,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("type")]
    Type,
    #[token("var")]
    Var,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AmpCaret,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("&^=")]
    AmpCaretEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("<-")]
    Arrow,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("=")]
    Eq,
    #[token(":=")]
    ColonEq,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("...")]
    Ellipsis,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::LineComment => SyntaxKind::LINE_COMMENT,
            TokenKind::BlockComment => SyntaxKind::BLOCK_COMMENT,
            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::Int => SyntaxKind::INT,
            TokenKind::Float => SyntaxKind::FLOAT,
            TokenKind::Imag => SyntaxKind::IMAG,
            TokenKind::Char => SyntaxKind::CHAR,
            TokenKind::String => SyntaxKind::STRING,
            TokenKind::Break => SyntaxKind::BREAK_KW,
            TokenKind::Case => SyntaxKind::CASE_KW,
            TokenKind::Chan => SyntaxKind::CHAN_KW,
            TokenKind::Const => SyntaxKind::CONST_KW,
            TokenKind::Continue => SyntaxKind::CONTINUE_KW,
            TokenKind::Default => SyntaxKind::DEFAULT_KW,
            TokenKind::Defer => SyntaxKind::DEFER_KW,
            TokenKind::Else => SyntaxKind::ELSE_KW,
            TokenKind::Fallthrough => SyntaxKind::FALLTHROUGH_KW,
            TokenKind::For => SyntaxKind::FOR_KW,
            TokenKind::Func => SyntaxKind::FUNC_KW,
            TokenKind::Go => SyntaxKind::GO_KW,
            TokenKind::Goto => SyntaxKind::GOTO_KW,
            TokenKind::If => SyntaxKind::IF_KW,
            TokenKind::Import => SyntaxKind::IMPORT_KW,
            TokenKind::Interface => SyntaxKind::INTERFACE_KW,
            TokenKind::Map => SyntaxKind::MAP_KW,
            TokenKind::Package => SyntaxKind::PACKAGE_KW,
            TokenKind::Range => SyntaxKind::RANGE_KW,
            TokenKind::Return => SyntaxKind::RETURN_KW,
            TokenKind::Select => SyntaxKind::SELECT_KW,
            TokenKind::Struct => SyntaxKind::STRUCT_KW,
            TokenKind::Switch => SyntaxKind::SWITCH_KW,
            TokenKind::Type => SyntaxKind::TYPE_KW,
            TokenKind::Var => SyntaxKind::VAR_KW,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Minus => SyntaxKind::MINUS,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::Percent => SyntaxKind::PERCENT,
            TokenKind::Amp => SyntaxKind::AMP,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Caret => SyntaxKind::CARET,
            TokenKind::Shl => SyntaxKind::SHL,
            TokenKind::Shr => SyntaxKind::SHR,
            TokenKind::AmpCaret => SyntaxKind::AMP_CARET,
            TokenKind::PlusEq => SyntaxKind::PLUS_EQ,
            TokenKind::MinusEq => SyntaxKind::MINUS_EQ,
            TokenKind::StarEq => SyntaxKind::STAR_EQ,
            TokenKind::SlashEq => SyntaxKind::SLASH_EQ,
            TokenKind::PercentEq => SyntaxKind::PERCENT_EQ,
            TokenKind::AmpEq => SyntaxKind::AMP_EQ,
            TokenKind::PipeEq => SyntaxKind::PIPE_EQ,
            TokenKind::CaretEq => SyntaxKind::CARET_EQ,
            TokenKind::ShlEq => SyntaxKind::SHL_EQ,
            TokenKind::ShrEq => SyntaxKind::SHR_EQ,
            TokenKind::AmpCaretEq => SyntaxKind::AMP_CARET_EQ,
            TokenKind::AmpAmp => SyntaxKind::AMP_AMP,
            TokenKind::PipePipe => SyntaxKind::PIPE_PIPE,
            TokenKind::Arrow => SyntaxKind::ARROW,
            TokenKind::PlusPlus => SyntaxKind::PLUS_PLUS,
            TokenKind::MinusMinus => SyntaxKind::MINUS_MINUS,
            TokenKind::EqEq => SyntaxKind::EQ_EQ,
            TokenKind::Neq => SyntaxKind::NEQ,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::LtEq => SyntaxKind::LTEQ,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::GtEq => SyntaxKind::GTEQ,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::ColonEq => SyntaxKind::COLON_EQ,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Ellipsis => SyntaxKind::ELLIPSIS,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LBrace => SyntaxKind::LBRACE,
            TokenKind::RBrace => SyntaxKind::RBRACE,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::Colon => SyntaxKind::COLON,
        }
    }
}

/// Consume a block comment up to and including `*/`. An unterminated
/// comment swallows the rest of the input as an error token.
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unrecognized character (or an unterminated literal)
            Err(()) => SyntaxKind::ERROR,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    fn significant(input: &str) -> Vec<Token<'_>> {
        lex(input)
            .into_iter()
            .filter(|t| t.kind != SyntaxKind::WHITESPACE && t.kind != SyntaxKind::NEWLINE)
            .collect()
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(
            significant("type T struct"),
            vec![
                token(SyntaxKind::TYPE_KW, "type"),
                token(SyntaxKind::IDENT, "T"),
                token(SyntaxKind::STRUCT_KW, "struct"),
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_an_identifier() {
        assert_eq!(
            significant("funcs types"),
            vec![
                token(SyntaxKind::IDENT, "funcs"),
                token(SyntaxKind::IDENT, "types"),
            ]
        );
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(
            significant("Größe π_2"),
            vec![
                token(SyntaxKind::IDENT, "Größe"),
                token(SyntaxKind::IDENT, "π_2"),
            ]
        );
    }

    #[test]
    fn comments_of_both_styles() {
        assert_eq!(
            lex("// line\n/* block\n * more */"),
            vec![
                token(SyntaxKind::LINE_COMMENT, "// line"),
                token(SyntaxKind::NEWLINE, "\n"),
                token(SyntaxKind::BLOCK_COMMENT, "/* block\n * more */"),
            ]
        );
    }

    #[test]
    fn block_comment_ends_at_first_close() {
        assert_eq!(
            significant("/* a */ x /* b **/ y"),
            vec![
                token(SyntaxKind::BLOCK_COMMENT, "/* a */"),
                token(SyntaxKind::IDENT, "x"),
                token(SyntaxKind::BLOCK_COMMENT, "/* b **/"),
                token(SyntaxKind::IDENT, "y"),
            ]
        );
    }

    #[test]
    fn unterminated_block_comment_is_one_error() {
        assert_eq!(
            lex("x /* open"),
            vec![
                token(SyntaxKind::IDENT, "x"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::ERROR, "/* open"),
            ]
        );
    }

    #[test]
    fn division_is_not_a_comment() {
        assert_eq!(
            significant("a / b /= c"),
            vec![
                token(SyntaxKind::IDENT, "a"),
                token(SyntaxKind::SLASH, "/"),
                token(SyntaxKind::IDENT, "b"),
                token(SyntaxKind::SLASH_EQ, "/="),
                token(SyntaxKind::IDENT, "c"),
            ]
        );
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(
            significant("42 0x1F 3.14 1e9 .5 2i"),
            vec![
                token(SyntaxKind::INT, "42"),
                token(SyntaxKind::INT, "0x1F"),
                token(SyntaxKind::FLOAT, "3.14"),
                token(SyntaxKind::FLOAT, "1e9"),
                token(SyntaxKind::FLOAT, ".5"),
                token(SyntaxKind::IMAG, "2i"),
            ]
        );
    }

    #[test]
    fn hex_floats_are_single_tokens() {
        assert_eq!(
            significant("0x1p-2 0x1.8p1 0X_Fp+4 0x1p3i"),
            vec![
                token(SyntaxKind::FLOAT, "0x1p-2"),
                token(SyntaxKind::FLOAT, "0x1.8p1"),
                token(SyntaxKind::FLOAT, "0X_Fp+4"),
                token(SyntaxKind::IMAG, "0x1p3i"),
            ]
        );
    }

    #[test]
    fn string_literals_hide_identifiers() {
        assert_eq!(
            significant(r#""hello world" `raw Name` 'x'"#),
            vec![
                token(SyntaxKind::STRING, r#""hello world""#),
                token(SyntaxKind::STRING, "`raw Name`"),
                token(SyntaxKind::CHAR, "'x'"),
            ]
        );
    }

    #[test]
    fn escaped_quote_inside_string() {
        assert_eq!(
            significant(r#""a\"b" c"#),
            vec![
                token(SyntaxKind::STRING, r#""a\"b""#),
                token(SyntaxKind::IDENT, "c"),
            ]
        );
    }

    #[test]
    fn compound_operators() {
        assert_eq!(
            significant("x := <-ch &^ y... &&="),
            vec![
                token(SyntaxKind::IDENT, "x"),
                token(SyntaxKind::COLON_EQ, ":="),
                token(SyntaxKind::ARROW, "<-"),
                token(SyntaxKind::IDENT, "ch"),
                token(SyntaxKind::AMP_CARET, "&^"),
                token(SyntaxKind::IDENT, "y"),
                token(SyntaxKind::ELLIPSIS, "..."),
                token(SyntaxKind::AMP_AMP, "&&"),
                token(SyntaxKind::EQ, "="),
            ]
        );
    }

    #[test]
    fn unknown_characters_become_errors() {
        let tokens = lex("a $ b");
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::ERROR && t.text == "$"));
    }

    #[test]
    fn all_bytes_preserved_complex() {
        let input = "func (r *Reader) Read(p []byte) (n int, err error) {\n\t// comment\n\treturn 0, nil\n}\n";
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn spans_are_correct() {
        let input = "var x = pkg.Get(\"y\") /* z */";
        let tokens = lex_with_spans(input);
        for (token, span) in &tokens {
            assert_eq!(token.text, &input[span.clone()]);
        }
    }
}
