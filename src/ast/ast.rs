use crate::SourceLocation;

use super::{declarations::Decl, statements::Stmt};

/// A top-level item of a compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Decl(Decl),
    Stmt(Stmt),
}

impl Node {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Node::Decl(decl) => decl.location(),
            Node::Stmt(stmt) => stmt.location(),
        }
    }

    pub fn as_decl(&self) -> Option<&Decl> {
        match self {
            Node::Decl(decl) => Some(decl),
            Node::Stmt(_) => None,
        }
    }

    pub fn as_stmt(&self) -> Option<&Stmt> {
        match self {
            Node::Stmt(stmt) => Some(stmt),
            Node::Decl(_) => None,
        }
    }
}

/// The parsed form of one compilation unit, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ast {
    pub nodes: Vec<Node>,
}

impl Ast {
    pub fn new(nodes: Vec<Node>) -> Self {
        Ast { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Top-level declarations, skipping bare statements.
    pub fn declarations(&self) -> impl Iterator<Item = &Decl> {
        self.nodes.iter().filter_map(Node::as_decl)
    }
}
