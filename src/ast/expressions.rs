use crate::{lexer::tokens::TokenKind, SourceLocation};

use super::{
    declarations::Parameter,
    statements::BlockStmt,
    types::{PointerKind, TypeNode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    True,
    False,
    Null,
    Undefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileTimeKind {
    Const,
    SizeOf,
    AlignOf,
    TypeOf,
}

impl CompileTimeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            CompileTimeKind::Const => "#const",
            CompileTimeKind::SizeOf => "#sizeof",
            CompileTimeKind::AlignOf => "#alignof",
            CompileTimeKind::TypeOf => "#typeof",
        }
    }
}

/// A `#name` or `#name(arg)` modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub argument: Option<Box<Expr>>,
    pub location: SourceLocation,
}

/// `function (params) [: T] { ... }` used as a value.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeNode>,
    pub body: BlockStmt,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: TokenKind,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Unary {
        op: TokenKind,
        operand: Box<Expr>,
        is_prefix: bool,
        location: SourceLocation,
    },
    Literal {
        kind: LiteralKind,
        value: String,
        location: SourceLocation,
    },
    Identifier {
        name: String,
        location: SourceLocation,
    },
    ArrayLiteral {
        elements: Vec<Expr>,
        location: SourceLocation,
    },
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
        location: SourceLocation,
    },
    Assignment {
        op: TokenKind,
        target: Box<Expr>,
        value: Box<Expr>,
        location: SourceLocation,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        type_args: Vec<String>,
        location: SourceLocation,
    },
    Member {
        object: Box<Expr>,
        name: String,
        is_pointer_access: bool,
        location: SourceLocation,
    },
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
        location: SourceLocation,
    },
    This {
        location: SourceLocation,
    },
    New {
        class_name: String,
        args: Vec<Expr>,
        location: SourceLocation,
    },
    Cast {
        target_type: String,
        expr: Box<Expr>,
        location: SourceLocation,
    },
    CompileTime {
        kind: CompileTimeKind,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    TemplateSpecialization {
        base: String,
        type_args: Vec<String>,
        location: SourceLocation,
    },
    Pointer {
        operand: Box<Expr>,
        kind: PointerKind,
        alignment: Option<u32>,
        location: SourceLocation,
    },
    Function(FunctionExpr),
    Attribute(Attribute),
}

impl Expr {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Expr::Binary { location, .. }
            | Expr::Unary { location, .. }
            | Expr::Literal { location, .. }
            | Expr::Identifier { location, .. }
            | Expr::ArrayLiteral { location, .. }
            | Expr::Conditional { location, .. }
            | Expr::Assignment { location, .. }
            | Expr::Call { location, .. }
            | Expr::Member { location, .. }
            | Expr::Index { location, .. }
            | Expr::This { location }
            | Expr::New { location, .. }
            | Expr::Cast { location, .. }
            | Expr::CompileTime { location, .. }
            | Expr::TemplateSpecialization { location, .. }
            | Expr::Pointer { location, .. } => location,
            Expr::Function(function) => &function.location,
            Expr::Attribute(attribute) => &attribute.location,
        }
    }
}
