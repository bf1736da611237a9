use crate::{SourceLocation, Span};

use super::tokens::{Token, TokenKind};

/// Result of a successful generic-argument scan.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericScan {
    pub type_args: Vec<String>,
    /// Index of the token right after the closing `>`.
    pub resume_at: usize,
}

/// Indexed cursor over a token vector that always ends in `EOF`.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let needs_eof = tokens
            .last()
            .map(|token| token.kind != TokenKind::EOF)
            .unwrap_or(true);

        if needs_eof {
            let location = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(SourceLocation::null);

            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: location.clone(),
                    end: location,
                },
            });
        }

        TokenStream { tokens, pos: 0 }
    }

    pub fn peek(&self) -> &Token {
        self.token_at(self.pos)
    }

    /// The token `n` places after the current one, clamped to the final `EOF`.
    pub fn peek_next(&self, n: usize) -> &Token {
        self.token_at(self.pos + n)
    }

    pub fn token_at(&self, index: usize) -> &Token {
        &self.tokens[index.min(self.tokens.len() - 1)]
    }

    pub fn previous(&self) -> &Token {
        self.token_at(self.pos.saturating_sub(1))
    }

    /// Consumes and returns the current token. Never moves past `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();

        if !self.is_at_end() {
            self.pos += 1;
        }

        token
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EOF
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub fn save(&self) -> usize {
        self.pos
    }

    pub fn restore(&mut self, position: usize) {
        self.pos = position.min(self.tokens.len() - 1);
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    /// Looks for `< T (, T)* >` starting at the current token without moving
    /// the cursor. `T` is an identifier or a primitive type keyword.
    pub fn scan_generic_args(&self) -> Option<GenericScan> {
        if self.peek().kind != TokenKind::Less {
            return None;
        }

        let mut index = self.pos + 1;
        let mut type_args = vec![];

        while index < self.tokens.len() {
            let token = &self.tokens[index];

            if token.kind != TokenKind::Identifier && !token.kind.is_primitive_type() {
                return None;
            }

            type_args.push(token.value.clone());
            index += 1;

            match self.token_at(index).kind {
                TokenKind::Comma => index += 1,
                TokenKind::Greater => {
                    return Some(GenericScan {
                        type_args,
                        resume_at: index + 1,
                    })
                }
                _ => return None,
            }
        }

        None
    }

    /// Splits a current `>>` into two `>` tokens so nested template
    /// argument lists can each consume their closing bracket.
    pub fn split_shift_right(&mut self) -> bool {
        if self.peek().kind != TokenKind::ShiftRight {
            return false;
        }

        let original = self.tokens[self.pos].clone();
        let mut middle = original.span.start.clone();
        middle.column += 1;

        let first = Token {
            kind: TokenKind::Greater,
            value: String::from(">"),
            span: Span {
                start: original.span.start.clone(),
                end: middle.clone(),
            },
        };
        let second = Token {
            kind: TokenKind::Greater,
            value: String::from(">"),
            span: Span {
                start: middle,
                end: original.span.end,
            },
        };

        self.tokens[self.pos] = first;
        self.tokens.insert(self.pos + 1, second);
        true
    }
}
