//! Token types for the expression lexer

/// One lexical token. Identifiers borrow from the source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'s> {
    // Literals
    Number(f64),
    Ident(&'s str),

    // Punctuators
    LParen,
    RParen,
    Comma,

    // Operator symbols
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    // End of input
    Eof,
}

/// A token plus the byte offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenAt<'s> {
    pub token: Token<'s>,
    pub at: usize,
}
