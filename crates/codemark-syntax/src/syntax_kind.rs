//! SyntaxKind enum for every token the lexer can produce.
//!
//! The parser, the printer tests and the annotation correlator all speak in
//! terms of these kinds, so the lexer's private Logos enum never leaks.

/// All token kinds of the source language.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Trivia ===
    /// Horizontal whitespace (spaces, tabs, carriage returns)
    WHITESPACE,
    /// Line feed
    NEWLINE,
    /// `// ...` up to the end of the line
    LINE_COMMENT,
    /// `/* ... */`
    BLOCK_COMMENT,

    // === Names and literals ===
    IDENT,
    INT,
    FLOAT,
    IMAG,
    CHAR,
    STRING,

    // === Keywords ===
    BREAK_KW,
    CASE_KW,
    CHAN_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DEFER_KW,
    ELSE_KW,
    FALLTHROUGH_KW,
    FOR_KW,
    FUNC_KW,
    GO_KW,
    GOTO_KW,
    IF_KW,
    IMPORT_KW,
    INTERFACE_KW,
    MAP_KW,
    PACKAGE_KW,
    RANGE_KW,
    RETURN_KW,
    SELECT_KW,
    STRUCT_KW,
    SWITCH_KW,
    TYPE_KW,
    VAR_KW,

    // === Operators ===
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    SHL,
    SHR,
    AMP_CARET,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    SHL_EQ,
    SHR_EQ,
    AMP_CARET_EQ,
    AMP_AMP,
    PIPE_PIPE,
    ARROW,
    PLUS_PLUS,
    MINUS_MINUS,
    EQ_EQ,
    NEQ,
    LT,
    LTEQ,
    GT,
    GTEQ,
    EQ,
    COLON_EQ,
    BANG,
    TILDE,
    ELLIPSIS,

    // === Delimiters ===
    LPAREN,
    RPAREN,
    LBRACKET,
    RBRACKET,
    LBRACE,
    RBRACE,
    COMMA,
    DOT,
    SEMICOLON,
    COLON,

    /// Input the lexer could not classify
    ERROR,
    /// End of file marker
    EOF,
}

impl SyntaxKind {
    /// Whitespace, newlines and comments.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE
                | SyntaxKind::NEWLINE
                | SyntaxKind::LINE_COMMENT
                | SyntaxKind::BLOCK_COMMENT
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT)
    }

    pub fn is_keyword(self) -> bool {
        (SyntaxKind::BREAK_KW as u16..=SyntaxKind::VAR_KW as u16).contains(&(self as u16))
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::INT
                | SyntaxKind::FLOAT
                | SyntaxKind::IMAG
                | SyntaxKind::CHAR
                | SyntaxKind::STRING
        )
    }

    /// Whether a line break directly after this token terminates a statement.
    pub fn ends_statement(self) -> bool {
        self == SyntaxKind::IDENT
            || self.is_literal()
            || matches!(
                self,
                SyntaxKind::BREAK_KW
                    | SyntaxKind::CONTINUE_KW
                    | SyntaxKind::FALLTHROUGH_KW
                    | SyntaxKind::RETURN_KW
                    | SyntaxKind::PLUS_PLUS
                    | SyntaxKind::MINUS_MINUS
                    | SyntaxKind::RPAREN
                    | SyntaxKind::RBRACKET
                    | SyntaxKind::RBRACE
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_range_is_closed() {
        assert!(SyntaxKind::BREAK_KW.is_keyword());
        assert!(SyntaxKind::STRUCT_KW.is_keyword());
        assert!(SyntaxKind::VAR_KW.is_keyword());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(!SyntaxKind::PLUS.is_keyword());
    }

    #[test]
    fn statement_terminators() {
        assert!(SyntaxKind::IDENT.ends_statement());
        assert!(SyntaxKind::RBRACE.ends_statement());
        assert!(SyntaxKind::RETURN_KW.ends_statement());
        assert!(!SyntaxKind::COMMA.ends_statement());
        assert!(!SyntaxKind::LBRACE.ends_statement());
    }
}
