use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    SourceLocation, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, MODIFIER_LOOKUP, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(&format!("^(?:{})", source)).unwrap(),
        handler,
    }
}

lazy_static! {
    /// Tried in order at the current offset; the first match wins, so longer
    /// operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("\\s+", skip_handler),
        pattern("//[^\\n]*", skip_handler),
        pattern("/\\*(?s:.*?)\\*/", skip_handler),
        pattern("/\\*", unterminated_comment_handler),
        pattern("#[a-zA-Z_][a-zA-Z0-9_]*", modifier_handler),
        pattern("0[xX][0-9a-fA-F]+", number_handler),
        pattern("[0-9]+(\\.[0-9]+)?", number_handler),
        pattern("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("\"(?:[^\"\\\\\\n]|\\\\.)*\"", string_handler),
        pattern("\"", unterminated_string_handler),
        pattern("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<")),
        pattern(">>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>")),
        pattern("\\+\\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
        pattern("--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
        pattern("\\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern("-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern("\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern("/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern("%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")),
        pattern("->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern("\\?", MK_DEFAULT_HANDLER!(TokenKind::Question, "?")),
        pattern("@", MK_DEFAULT_HANDLER!(TokenKind::At, "@")),
        pattern("~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
        pattern("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern("&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern("\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern("\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<source>"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(Rc::clone(&self.file), self.line, self.column)
    }

    /// Moves `n` bytes forward, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());

        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Pushes a token whose source text is the next `consumed` bytes.
    pub fn push_token(&mut self, kind: TokenKind, value: String, consumed: usize) {
        let start = self.location();
        self.advance_n(consumed);
        let end = self.location();

        self.push(MK_TOKEN!(kind, value, Span { start, end }));
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn matched_text(lexer: &Lexer, regex: &Regex) -> String {
    regex
        .find(lexer.remainder())
        .map(|found| found.as_str().to_string())
        .unwrap_or_default()
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = matched_text(lexer, regex);
    lexer.advance_n(matched.len());
    Ok(())
}

fn unterminated_comment_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    Err(Error::new(ErrorImpl::UnterminatedComment, lexer.location()))
}

fn unterminated_string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    Err(Error::new(ErrorImpl::UnterminatedString, lexer.location()))
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = matched_text(lexer, regex);
    let length = matched.len();
    lexer.push_token(TokenKind::Number, matched, length);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = matched_text(lexer, regex);
    let length = value.len();

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push_token(*kind, value, length);
    } else {
        lexer.push_token(TokenKind::Identifier, value, length);
    }

    Ok(())
}

fn modifier_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = matched_text(lexer, regex);
    let length = value.len();
    let name = &value[1..];

    let kind = MODIFIER_LOOKUP
        .get(name)
        .copied()
        .unwrap_or(TokenKind::Attribute);
    lexer.push_token(kind, value, length);

    Ok(())
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = matched_text(lexer, regex);
    let length = matched.len();
    let literal = unescape(&matched[1..length - 1]);

    lexer.push_token(TokenKind::String, literal, length);
    Ok(())
}

fn unescape(raw: &str) -> String {
    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek().copied() {
            Some('n') => {
                result.push('\n');
                chars.next();
            }
            Some('t') => {
                result.push('\t');
                chars.next();
            }
            Some('\\') => {
                result.push('\\');
                chars.next();
            }
            Some('r') => {
                result.push('\r');
                chars.next();
            }
            Some('"') => {
                result.push('"');
                chars.next();
            }
            Some('0') => {
                result.push('\0');
                chars.next();
            }
            Some('x') => {
                chars.next();
                let mut hex = String::new();

                while hex.len() < 2 {
                    match chars.peek() {
                        Some(digit) if digit.is_ascii_hexdigit() => {
                            hex.push(*digit);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => result.push_str("\\x"),
                }
            }
            // Unknown escapes keep their backslash
            _ => result.push(ch),
        }
    }

    result
}

/// Splits `source` into tokens, ending with an `EOF` token.
///
/// # Arguments
///
/// * `source` - The source text
/// * `file` - The file name recorded in token locations
///
/// # Returns
///
/// The token vector, or the first lexical error.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    trace!("tokenizing {}", lex.file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                lex.location(),
            ));
        }
    }

    let end = lex.location();
    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: end.clone(),
            end
        }
    ));

    debug!("tokenized {} into {} tokens", lex.file, lex.tokens.len());
    Ok(lex.tokens)
}
