use std::slice::Iter;

use crate::SourceLocation;

use super::{declarations::Decl, expressions::Expr, types::TypeNode};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub location: SourceLocation,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub parameter: String,
    pub parameter_type: Option<TypeNode>,
    pub body: Box<Stmt>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub is_default: bool,
    /// Always `None` for the default clause.
    pub value: Option<Expr>,
    pub body: Vec<Stmt>,
    pub location: SourceLocation,
}

/// A declaration appearing where a statement is expected.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationStmt {
    pub declaration: Box<Decl>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Expression {
        expr: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
        location: SourceLocation,
    },
    For {
        initializer: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    ForOf {
        is_const: bool,
        identifier: String,
        declared_type: Option<TypeNode>,
        iterable: Expr,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    Break {
        label: Option<String>,
        location: SourceLocation,
    },
    Continue {
        label: Option<String>,
        location: SourceLocation,
    },
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
    Try {
        try_block: Box<Stmt>,
        catch_clauses: Vec<CatchClause>,
        finally: Option<Box<Stmt>>,
        location: SourceLocation,
    },
    Throw {
        value: Expr,
        location: SourceLocation,
    },
    Switch {
        expr: Expr,
        cases: Vec<SwitchCase>,
        location: SourceLocation,
    },
    Assembly {
        code: String,
        constraints: Vec<String>,
        location: SourceLocation,
    },
    Labeled {
        label: String,
        statement: Box<Stmt>,
        location: SourceLocation,
    },
    Declaration(DeclarationStmt),
}

impl Stmt {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::Block(block) => &block.location,
            Stmt::Declaration(declaration) => &declaration.location,
            Stmt::Expression { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::DoWhile { location, .. }
            | Stmt::For { location, .. }
            | Stmt::ForOf { location, .. }
            | Stmt::Break { location, .. }
            | Stmt::Continue { location, .. }
            | Stmt::Return { location, .. }
            | Stmt::Try { location, .. }
            | Stmt::Throw { location, .. }
            | Stmt::Switch { location, .. }
            | Stmt::Assembly { location, .. }
            | Stmt::Labeled { location, .. } => location,
        }
    }
}
