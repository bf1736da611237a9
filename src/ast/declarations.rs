//! Declaration nodes.
//!
//! Generic functions, classes and interfaces are the plain declaration with
//! a non-empty `generic_params` list; there is no separate generic variant.

use crate::SourceLocation;

use super::{
    expressions::{Attribute, Expr},
    statements::BlockStmt,
    types::{GenericParam, TypeNode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Stack,
    Heap,
    Static,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Getter,
    Setter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub param_type: TypeNode,
    pub default: Option<Expr>,
    pub is_ref: bool,
    pub is_const: bool,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<Expr>,
    pub location: SourceLocation,
}

/// `where T: Constraint` on a free function.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub param: String,
    pub constraint: TypeNode,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var {
        name: String,
        type_annotation: Option<TypeNode>,
        initializer: Option<Expr>,
        storage_class: Option<StorageClass>,
        is_const: bool,
        location: SourceLocation,
    },
    Function {
        name: String,
        params: Vec<Parameter>,
        return_type: Option<TypeNode>,
        throws: Vec<TypeNode>,
        modifiers: Vec<Attribute>,
        /// `None` for a prototype ending in `;`.
        body: Option<BlockStmt>,
        is_async: bool,
        generic_params: Vec<GenericParam>,
        where_clauses: Vec<WhereClause>,
        location: SourceLocation,
    },
    Class {
        name: String,
        modifiers: Vec<Attribute>,
        base_class: Option<TypeNode>,
        interfaces: Vec<TypeNode>,
        members: Vec<Decl>,
        generic_params: Vec<GenericParam>,
        location: SourceLocation,
    },
    Constructor {
        access: AccessModifier,
        params: Vec<Parameter>,
        body: BlockStmt,
        location: SourceLocation,
    },
    Method {
        name: String,
        access: AccessModifier,
        params: Vec<Parameter>,
        return_type: Option<TypeNode>,
        throws: Vec<TypeNode>,
        modifiers: Vec<Attribute>,
        body: BlockStmt,
        location: SourceLocation,
    },
    Field {
        name: String,
        access: AccessModifier,
        is_const: bool,
        type_annotation: Option<TypeNode>,
        initializer: Option<Expr>,
        location: SourceLocation,
    },
    Property {
        name: String,
        access: AccessModifier,
        kind: PropertyKind,
        property_type: TypeNode,
        /// The value parameter of a setter.
        parameter: Option<Parameter>,
        body: BlockStmt,
        location: SourceLocation,
    },
    Namespace {
        name: String,
        declarations: Vec<Decl>,
        location: SourceLocation,
    },
    Enum {
        name: String,
        underlying_type: Option<TypeNode>,
        members: Vec<EnumMember>,
        location: SourceLocation,
    },
    Interface {
        name: String,
        extends: Vec<TypeNode>,
        members: Vec<Decl>,
        is_zero_cast: bool,
        generic_params: Vec<GenericParam>,
        location: SourceLocation,
    },
    MethodSignature {
        name: String,
        access: AccessModifier,
        params: Vec<Parameter>,
        return_type: Option<TypeNode>,
        throws: Vec<TypeNode>,
        location: SourceLocation,
    },
    PropertySignature {
        name: String,
        access: AccessModifier,
        property_type: TypeNode,
        has_getter: bool,
        has_setter: bool,
        location: SourceLocation,
    },
    Typedef {
        name: String,
        aliased_type: TypeNode,
        location: SourceLocation,
    },
}

impl Decl {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Decl::Var { location, .. }
            | Decl::Function { location, .. }
            | Decl::Class { location, .. }
            | Decl::Constructor { location, .. }
            | Decl::Method { location, .. }
            | Decl::Field { location, .. }
            | Decl::Property { location, .. }
            | Decl::Namespace { location, .. }
            | Decl::Enum { location, .. }
            | Decl::Interface { location, .. }
            | Decl::MethodSignature { location, .. }
            | Decl::PropertySignature { location, .. }
            | Decl::Typedef { location, .. } => location,
        }
    }

    /// The declared name. Constructors are named `constructor`.
    pub fn name(&self) -> &str {
        match self {
            Decl::Constructor { .. } => "constructor",
            Decl::Var { name, .. }
            | Decl::Function { name, .. }
            | Decl::Class { name, .. }
            | Decl::Method { name, .. }
            | Decl::Field { name, .. }
            | Decl::Property { name, .. }
            | Decl::Namespace { name, .. }
            | Decl::Enum { name, .. }
            | Decl::Interface { name, .. }
            | Decl::MethodSignature { name, .. }
            | Decl::PropertySignature { name, .. }
            | Decl::Typedef { name, .. } => name,
        }
    }

    pub fn is_generic(&self) -> bool {
        match self {
            Decl::Function { generic_params, .. }
            | Decl::Class { generic_params, .. }
            | Decl::Interface { generic_params, .. } => !generic_params.is_empty(),
            _ => false,
        }
    }
}
