//! Lexer for the expression compiler
//!
//! Not a separate pass: the compiler owns the only instance and pulls
//! one token at a time from a single cursor into the source.

use crate::error::{CompileError, CompileErrorKind};
use crate::token::{Token, TokenAt};

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Lexer { src, pos: 0 }
    }

    fn current(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if matches!(c, b' ' | b'\t' | b'\r' | b'\n') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// True if the next non-whitespace character opens a parenthesis.
    /// The compiler uses this to tell calls from value reads.
    pub fn peek_lparen(&mut self) -> bool {
        self.skip_whitespace();
        self.current() == Some(b'(')
    }

    fn read_ident(&mut self) -> &'s str {
        let start = self.pos;
        while let Some(c) = self.current() {
            if c.is_ascii_alphanumeric() {
                self.pos += 1;
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    /// Longest prefix at the cursor that parses as a decimal double:
    /// digits, optional fraction, optional exponent. A leading sign is
    /// never part of the literal; negation is a prefix operator.
    fn read_number(&mut self) -> Option<f64> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut end = start;

        while bytes.get(end).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
        }
        if bytes.get(end) == Some(&b'.') {
            end += 1;
            while bytes.get(end).is_some_and(|c| c.is_ascii_digit()) {
                end += 1;
            }
        }
        if !self.src[start..end].bytes().any(|c| c.is_ascii_digit()) {
            return None;
        }

        // The exponent only counts when at least one digit follows.
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            if bytes.get(exp).is_some_and(|c| c.is_ascii_digit()) {
                while bytes.get(exp).is_some_and(|c| c.is_ascii_digit()) {
                    exp += 1;
                }
                end = exp;
            }
        }

        let value = self.src[start..end].parse().ok()?;
        self.pos = end;
        Some(value)
    }

    pub fn next_token(&mut self) -> Result<TokenAt<'s>, CompileError> {
        self.skip_whitespace();
        let at = self.pos;

        let Some(c) = self.current() else {
            return Ok(TokenAt { token: Token::Eof, at });
        };

        let token = match c {
            b'a'..=b'z' | b'A'..=b'Z' => Token::Ident(self.read_ident()),
            b'(' => {
                self.pos += 1;
                Token::LParen
            }
            b')' => {
                self.pos += 1;
                Token::RParen
            }
            b',' => {
                self.pos += 1;
                Token::Comma
            }
            _ => {
                if let Some(value) = self.read_number() {
                    Token::Number(value)
                } else {
                    let op = match c {
                        b'+' => Token::Plus,
                        b'-' => Token::Minus,
                        b'*' => Token::Star,
                        b'/' => Token::Slash,
                        b'%' => Token::Percent,
                        b'^' => Token::Caret,
                        _ => {
                            return Err(CompileError::new(
                                CompileErrorKind::UnexpectedCharacter,
                                at,
                            ))
                        }
                    };
                    self.pos += 1;
                    op
                }
            }
        };

        Ok(TokenAt { token, at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().expect(src).token;
            let eof = tok == Token::Eof;
            out.push(tok);
            if eof {
                break;
            }
        }
        out
    }

    #[test]
    fn test_operators_and_punctuators() {
        let mut lexer = Lexer::new("+ - * / % ^ ( ) ,");
        assert!(matches!(lexer.next_token().unwrap().token, Token::Plus));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Minus));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Star));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Slash));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Percent));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Caret));
        assert!(matches!(lexer.next_token().unwrap().token, Token::LParen));
        assert!(matches!(lexer.next_token().unwrap().token, Token::RParen));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Comma));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Eof));
    }

    #[test]
    fn test_identifiers() {
        let mut lexer = Lexer::new("pi sqrt2 x");
        assert!(matches!(lexer.next_token().unwrap().token, Token::Ident("pi")));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Ident("sqrt2")));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Ident("x")));
    }

    #[test]
    fn test_numbers() {
        let mut lexer = Lexer::new("12 12.5 .5 12. 1e3 1.5E-2 2e+4");
        assert!(matches!(lexer.next_token().unwrap().token, Token::Number(v) if v == 12.0));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Number(v) if v == 12.5));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Number(v) if v == 0.5));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Number(v) if v == 12.0));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Number(v) if v == 1000.0));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Number(v) if v == 0.015));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Number(v) if v == 20000.0));
    }

    #[test]
    fn test_sign_is_not_part_of_the_literal() {
        let mut lexer = Lexer::new("-2");
        assert!(matches!(lexer.next_token().unwrap().token, Token::Minus));
        assert!(matches!(lexer.next_token().unwrap().token, Token::Number(v) if v == 2.0));
    }

    #[test]
    fn test_dangling_exponent_stays_unconsumed() {
        // "1e" is the literal 1 followed by the identifier `e`.
        assert_eq!(
            tokens("1e"),
            vec![Token::Number(1.0), Token::Ident("e"), Token::Eof]
        );
    }

    #[test]
    fn test_whitespace_and_offsets() {
        let mut lexer = Lexer::new(" \t\r\n 7");
        let tok = lexer.next_token().unwrap();
        assert!(matches!(tok.token, Token::Number(v) if v == 7.0));
        assert_eq!(tok.at, 5);
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("1 $ 2");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::UnexpectedCharacter);
        assert_eq!(err.at, 2);
    }
}
