use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("function", TokenKind::Function);
        map.insert("class", TokenKind::Class);
        map.insert("interface", TokenKind::Interface);
        map.insert("enum", TokenKind::Enum);
        map.insert("constructor", TokenKind::Constructor);
        map.insert("typedef", TokenKind::Typedef);
        map.insert("namespace", TokenKind::Namespace);
        map.insert("template", TokenKind::Template);
        map.insert("new", TokenKind::New);
        map.insert("get", TokenKind::Get);
        map.insert("set", TokenKind::Set);
        map.insert("cast", TokenKind::Cast);
        map.insert("where", TokenKind::Where);
        map.insert("throws", TokenKind::Throws);
        map.insert("public", TokenKind::Public);
        map.insert("private", TokenKind::Private);
        map.insert("protected", TokenKind::Protected);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("for", TokenKind::For);
        map.insert("of", TokenKind::Of);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("return", TokenKind::Return);
        map.insert("try", TokenKind::Try);
        map.insert("catch", TokenKind::Catch);
        map.insert("finally", TokenKind::Finally);
        map.insert("throw", TokenKind::Throw);
        map.insert("void", TokenKind::VoidType);
        map.insert("int", TokenKind::IntType);
        map.insert("float", TokenKind::FloatType);
        map.insert("boolean", TokenKind::BooleanType);
        map.insert("string", TokenKind::StringType);
        map.insert("ref", TokenKind::Ref);
        map.insert("extends", TokenKind::Extends);
        map.insert("implements", TokenKind::Implements);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null_value", TokenKind::NullValue);
        map.insert("undefined", TokenKind::Undefined);
        map.insert("this", TokenKind::This);
        map.insert("yield", TokenKind::Yield);
        map.insert("async", TokenKind::Async);
        map.insert("await", TokenKind::Await);
        map
    };

    /// `#`-prefixed modifiers, keyed without the `#`.
    pub static ref MODIFIER_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("stack", TokenKind::Stack);
        map.insert("heap", TokenKind::Heap);
        map.insert("static", TokenKind::Static);
        map.insert("shared", TokenKind::Shared);
        map.insert("unique", TokenKind::Unique);
        map.insert("weak", TokenKind::Weak);
        map.insert("inline", TokenKind::Inline);
        map.insert("virtual", TokenKind::Virtual);
        map.insert("unsafe", TokenKind::Unsafe);
        map.insert("simd", TokenKind::Simd);
        map.insert("target", TokenKind::Target);
        map.insert("aligned", TokenKind::Aligned);
        map.insert("packed", TokenKind::Packed);
        map.insert("abstract", TokenKind::Abstract);
        map.insert("zerocast", TokenKind::ZeroCast);
        map.insert("const", TokenKind::ConstExpr);
        map.insert("sizeof", TokenKind::SizeOf);
        map.insert("alignof", TokenKind::AlignOf);
        map.insert("typeof", TokenKind::TypeOf);
        map.insert("asm", TokenKind::Asm);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,

    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    At,
    Tilde,
    Arrow,

    Not,
    Plus,
    Dash,
    Star,
    Slash,
    Percent,
    Ampersand,
    Pipe,
    Caret,

    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
    ShiftLeft,
    ShiftRight,

    PlusPlus,
    MinusMinus,

    Assignment,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,

    // Reserved
    Let,
    Const,
    Function,
    Class,
    Interface,
    Enum,
    Constructor,
    Typedef,
    Namespace,
    Template,
    New,
    Get,
    Set,
    Cast,
    Where,
    Throws,
    Public,
    Private,
    Protected,
    If,
    Else,
    Switch,
    Case,
    Default,
    While,
    Do,
    For,
    Of,
    Break,
    Continue,
    Return,
    Try,
    Catch,
    Finally,
    Throw,
    VoidType,
    IntType,
    FloatType,
    BooleanType,
    StringType,
    Ref,
    Extends,
    Implements,
    True,
    False,
    NullValue,
    Undefined,
    This,
    Yield,
    Async,
    Await,

    // Modifiers
    Stack,
    Heap,
    Static,
    Shared,
    Unique,
    Weak,
    Inline,
    Virtual,
    Unsafe,
    Simd,
    Target,
    Aligned,
    Packed,
    Abstract,
    ZeroCast,
    ConstExpr,
    SizeOf,
    AlignOf,
    TypeOf,
    Asm,
    Attribute,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TokenKind {
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenKind::VoidType
                | TokenKind::IntType
                | TokenKind::FloatType
                | TokenKind::BooleanType
                | TokenKind::StringType
        )
    }

    /// Modifiers that may precede `function` or a method.
    pub fn is_function_modifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Inline
                | TokenKind::Virtual
                | TokenKind::Unsafe
                | TokenKind::Simd
                | TokenKind::Target
                | TokenKind::Attribute
        )
    }

    pub fn is_storage_class(&self) -> bool {
        matches!(
            self,
            TokenKind::Stack | TokenKind::Heap | TokenKind::Static | TokenKind::Weak
        )
    }

    pub fn is_class_modifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Aligned | TokenKind::Packed | TokenKind::Abstract
        )
    }

    pub fn is_access_modifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Public | TokenKind::Private | TokenKind::Protected
        )
    }

    /// Source spelling of an operator token.
    pub fn operator_symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Not => "!",
            TokenKind::At => "@",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::LessEquals => "<=",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Assignment => "=",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::StarEquals => "*=",
            TokenKind::SlashEquals => "/=",
            TokenKind::PercentEquals => "%=",
            _ => return None,
        };
        Some(symbol)
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::Attribute,
        ]) {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
