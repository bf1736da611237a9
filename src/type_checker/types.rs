use crate::{
    ast::types::{PointerKind, PrimitiveKind, TypeNode},
    errors::errors::ErrorImpl,
    SourceLocation,
};

use super::{
    expr::check_expr,
    resolved_type::ResolvedType,
    type_checker::{CheckContext, TypeChecker},
};

/// Resolves a written type annotation against the scope table.
pub fn resolve_type(checker: &mut TypeChecker, type_node: &TypeNode) -> ResolvedType {
    match type_node {
        TypeNode::Primitive { kind, .. } => match kind {
            PrimitiveKind::Void => ResolvedType::Void,
            PrimitiveKind::Int => ResolvedType::Int,
            PrimitiveKind::Float => ResolvedType::Float,
            PrimitiveKind::Boolean => ResolvedType::Bool,
            PrimitiveKind::String => ResolvedType::String,
        },
        TypeNode::Named { name, location } => resolve_type_name(checker, name, location),
        TypeNode::Qualified { path, location } => {
            let qualified = path.join(".");
            match checker.scopes.lookup_type(&qualified) {
                Some(ty) => ty.clone(),
                None => checker.error(
                    ErrorImpl::UndefinedQualifiedType { path: qualified },
                    location,
                ),
            }
        }
        TypeNode::Array { element, size, .. } => {
            if let Some(size) = size {
                let size_type = check_expr(checker, size, &CheckContext::default());
                if !size_type.is_assignable_to(&ResolvedType::Int) {
                    checker.error(
                        ErrorImpl::ArraySizeNotInteger {
                            received: size_type.to_string(),
                        },
                        size.location(),
                    );
                }
            }
            ResolvedType::Array(Box::new(resolve_type(checker, element)))
        }
        TypeNode::Pointer { base, kind, .. } => {
            ResolvedType::pointer(resolve_type(checker, base), *kind == PointerKind::Unsafe)
        }
        TypeNode::Reference { base, .. } => {
            ResolvedType::Reference(Box::new(resolve_type(checker, base)))
        }
        TypeNode::Function {
            params,
            return_type,
            ..
        } => {
            let params = params
                .iter()
                .map(|param| resolve_type(checker, param))
                .collect();
            ResolvedType::function(resolve_type(checker, return_type), params)
        }
        TypeNode::Template {
            base,
            args,
            location,
        } => {
            let base = resolve_type(checker, base);
            let args: Vec<ResolvedType> =
                args.iter().map(|arg| resolve_type(checker, arg)).collect();

            match base {
                ResolvedType::Named(name) => ResolvedType::Template { name, args },
                ResolvedType::Error => ResolvedType::Error,
                other => checker.error(
                    ErrorImpl::TemplateBaseNotNamed {
                        received: other.to_string(),
                    },
                    location,
                ),
            }
        }
        TypeNode::SmartPointer { pointee, kind, .. } => ResolvedType::Smart {
            pointee: Box::new(resolve_type(checker, pointee)),
            kind: *kind,
        },
        TypeNode::Union { left, right, .. } => {
            ResolvedType::union(resolve_type(checker, left), resolve_type(checker, right))
        }
        TypeNode::GenericParam(param) => ResolvedType::Named(param.name.clone()),
        TypeNode::BuiltinConstraint { name, .. } => ResolvedType::Named(name.clone()),
    }
}

/// Resolves a bare type name such as the target of a cast.
pub fn resolve_type_name(
    checker: &mut TypeChecker,
    name: &str,
    location: &SourceLocation,
) -> ResolvedType {
    match checker.scopes.lookup_type(name) {
        Some(ty) => ty.clone(),
        None => checker.error(
            ErrorImpl::UndefinedType {
                name: name.to_string(),
            },
            location,
        ),
    }
}
