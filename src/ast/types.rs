//! Type annotations as written in source.
//!
//! This module defines the syntactic type forms the parser produces:
//!
//! - Primitive keywords (`void`, `int`, `float`, `boolean`, `string`)
//! - Named and namespace-qualified references
//! - Composite forms (arrays, pointers, references, function types, unions)
//! - Templates and smart pointers
//! - Generic parameters and their constraints
//!
//! These are only descriptions. The type checker resolves them into
//! `ResolvedType` values by looking names up in its scope table.

use std::fmt::Display;

use crate::SourceLocation;

use super::expressions::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Void,
    Int,
    Float,
    Boolean,
    String,
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveKind::Void => write!(f, "void"),
            PrimitiveKind::Int => write!(f, "int"),
            PrimitiveKind::Float => write!(f, "float"),
            PrimitiveKind::Boolean => write!(f, "boolean"),
            PrimitiveKind::String => write!(f, "string"),
        }
    }
}

/// Pointer flavours. `Safe` only appears in type annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Raw,
    Safe,
    Unsafe,
    Aligned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartPointerKind {
    Shared,
    Unique,
    Weak,
}

impl Display for SmartPointerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmartPointerKind::Shared => write!(f, "#shared"),
            SmartPointerKind::Unique => write!(f, "#unique"),
            SmartPointerKind::Weak => write!(f, "#weak"),
        }
    }
}

/// `T extends A & B` in a generic parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParam {
    pub name: String,
    pub constraints: Vec<TypeNode>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Primitive {
        kind: PrimitiveKind,
        location: SourceLocation,
    },
    Named {
        name: String,
        location: SourceLocation,
    },
    Qualified {
        path: Vec<String>,
        location: SourceLocation,
    },
    Array {
        element: Box<TypeNode>,
        size: Option<Box<Expr>>,
        location: SourceLocation,
    },
    Pointer {
        base: Box<TypeNode>,
        kind: PointerKind,
        alignment: Option<u32>,
        location: SourceLocation,
    },
    Reference {
        base: Box<TypeNode>,
        location: SourceLocation,
    },
    Function {
        params: Vec<TypeNode>,
        return_type: Box<TypeNode>,
        location: SourceLocation,
    },
    Template {
        base: Box<TypeNode>,
        args: Vec<TypeNode>,
        location: SourceLocation,
    },
    SmartPointer {
        pointee: Box<TypeNode>,
        kind: SmartPointerKind,
        location: SourceLocation,
    },
    Union {
        left: Box<TypeNode>,
        right: Box<TypeNode>,
        location: SourceLocation,
    },
    GenericParam(GenericParam),
    BuiltinConstraint {
        name: String,
        location: SourceLocation,
    },
}

impl TypeNode {
    pub fn location(&self) -> &SourceLocation {
        match self {
            TypeNode::GenericParam(param) => &param.location,
            TypeNode::Primitive { location, .. }
            | TypeNode::Named { location, .. }
            | TypeNode::Qualified { location, .. }
            | TypeNode::Array { location, .. }
            | TypeNode::Pointer { location, .. }
            | TypeNode::Reference { location, .. }
            | TypeNode::Function { location, .. }
            | TypeNode::Template { location, .. }
            | TypeNode::SmartPointer { location, .. }
            | TypeNode::Union { location, .. }
            | TypeNode::BuiltinConstraint { location, .. } => location,
        }
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, types: &[TypeNode]) -> std::fmt::Result {
    for (index, type_node) in types.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", type_node)?;
    }
    Ok(())
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeNode::Primitive { kind, .. } => write!(f, "{}", kind),
            TypeNode::Named { name, .. } => write!(f, "{}", name),
            TypeNode::Qualified { path, .. } => write!(f, "{}", path.join(".")),
            TypeNode::Array { element, size, .. } => match size {
                Some(_) => write!(f, "{}[_]", element),
                None => write!(f, "{}[]", element),
            },
            TypeNode::Pointer {
                base,
                kind,
                alignment,
                ..
            } => match kind {
                PointerKind::Raw => write!(f, "{}@", base),
                PointerKind::Safe => write!(f, "{}@safe", base),
                PointerKind::Unsafe => write!(f, "{}@#unsafe", base),
                PointerKind::Aligned => {
                    write!(f, "{}@#aligned({})", base, alignment.unwrap_or_default())
                }
            },
            TypeNode::Reference { base, .. } => write!(f, "{}&", base),
            TypeNode::Function {
                params,
                return_type,
                ..
            } => {
                write!(f, "function(")?;
                write_list(f, params)?;
                write!(f, "): {}", return_type)
            }
            TypeNode::Template { base, args, .. } => {
                write!(f, "{}<", base)?;
                write_list(f, args)?;
                write!(f, ">")
            }
            TypeNode::SmartPointer { pointee, kind, .. } => write!(f, "{}<{}>", kind, pointee),
            TypeNode::Union { left, right, .. } => write!(f, "{} | {}", left, right),
            TypeNode::GenericParam(param) => {
                write!(f, "{}", param.name)?;
                if !param.constraints.is_empty() {
                    write!(f, " extends ")?;
                    for (index, constraint) in param.constraints.iter().enumerate() {
                        if index > 0 {
                            write!(f, " & ")?;
                        }
                        write!(f, "{}", constraint)?;
                    }
                }
                Ok(())
            }
            TypeNode::BuiltinConstraint { name, .. } => write!(f, "{}", name),
        }
    }
}
