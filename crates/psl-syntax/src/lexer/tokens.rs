//! Token definitions for the Prisma Schema Language.
//!
//! The language is line oriented, so newlines are kept as their own token
//! instead of being folded into whitespace.

use logos::Logos;

/// All token kinds of the schema language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Spaces, tabs and stray carriage returns
    #[regex(r"[ \t\r]+")]
    Whitespace,

    /// Line break, `\n` or `\r\n`
    #[regex(r"\r?\n")]
    Newline,

    /// Documentation comment: /// ...
    #[regex(r"///[^\r\n]*", allow_greedy = true)]
    DocComment,

    /// Line comment: // ...
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `,`
    #[token(",")]
    Comma,

    /// `:`
    #[token(":")]
    Colon,

    /// `.`
    #[token(".")]
    Dot,

    /// `=`
    #[token("=")]
    Eq,

    /// `?`
    #[token("?")]
    Question,

    /// `@`, opens a field attribute
    #[token("@")]
    At,

    /// `@@`, opens a block attribute
    #[token("@@")]
    AtAt,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Double-quoted string: "hello"
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#, priority = 3)]
    String,

    /// String that runs into the end of the line without a closing quote
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*"#, priority = 2)]
    UnterminatedString,

    /// Integer or decimal number, optionally negative
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier: starts with letter or underscore, contains letters, digits, underscores
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    /// Lexer error - unrecognized character
    #[default]
    Error,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace or comment).
    ///
    /// Newlines are significant and therefore not trivia.
    #[inline]
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::DocComment
        )
    }

    /// Returns `true` for both terminated and unterminated strings.
    #[inline]
    #[must_use]
    pub fn is_string(self) -> bool {
        matches!(self, Self::String | Self::UnterminatedString)
    }

    /// Returns `true` if this token opens a nesting level.
    #[inline]
    #[must_use]
    pub fn is_opening_delimiter(self) -> bool {
        matches!(self, Self::LParen | Self::LBracket)
    }

    /// Returns `true` if this token closes a nesting level.
    #[inline]
    #[must_use]
    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, Self::RParen | Self::RBracket)
    }
}
