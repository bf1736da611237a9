use std::collections::HashMap;

use crate::{
    ast::{
        expressions::{CompileTimeKind, Expr, LiteralKind},
        types::PointerKind,
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    SourceLocation,
};

use super::{
    resolved_type::ResolvedType,
    type_checker::{check_function, CheckContext, TypeChecker},
    types::resolve_type_name,
};

fn operator_text(op: TokenKind) -> String {
    op.operator_symbol()
        .map(String::from)
        .unwrap_or_else(|| op.to_string())
}

/// The binary operator a compound assignment applies.
fn compound_operator(op: TokenKind) -> Option<TokenKind> {
    match op {
        TokenKind::PlusEquals => Some(TokenKind::Plus),
        TokenKind::MinusEquals => Some(TokenKind::Dash),
        TokenKind::StarEquals => Some(TokenKind::Star),
        TokenKind::SlashEquals => Some(TokenKind::Slash),
        TokenKind::PercentEquals => Some(TokenKind::Percent),
        _ => None,
    }
}

fn invalid_operands(
    type_checker: &mut TypeChecker,
    op: TokenKind,
    left: &ResolvedType,
    right: &ResolvedType,
    requirement: &str,
    location: &SourceLocation,
) -> ResolvedType {
    type_checker.error(
        ErrorImpl::InvalidOperands {
            operator: operator_text(op),
            left: left.to_string(),
            right: right.to_string(),
            requirement: requirement.to_string(),
        },
        location,
    )
}

fn invalid_operand(
    type_checker: &mut TypeChecker,
    op: TokenKind,
    operand: &ResolvedType,
    requirement: &str,
    location: &SourceLocation,
) -> ResolvedType {
    type_checker.error(
        ErrorImpl::InvalidOperand {
            operator: operator_text(op),
            operand: operand.to_string(),
            requirement: requirement.to_string(),
        },
        location,
    )
}

/// Result type of `left op right`. An `Error` operand short-circuits
/// without a second diagnostic.
pub fn check_binary_op(
    type_checker: &mut TypeChecker,
    op: TokenKind,
    left: &ResolvedType,
    right: &ResolvedType,
    location: &SourceLocation,
) -> ResolvedType {
    let left = left.dereferenced();
    let right = right.dereferenced();
    if left.is_error() || right.is_error() {
        return ResolvedType::Error;
    }

    match op {
        TokenKind::Plus
        | TokenKind::Dash
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent => {
            if left.is_numeric() && right.is_numeric() {
                if *left == ResolvedType::Float || *right == ResolvedType::Float {
                    ResolvedType::Float
                } else {
                    ResolvedType::Int
                }
            } else if op == TokenKind::Plus
                && (*left == ResolvedType::String || *right == ResolvedType::String)
            {
                ResolvedType::String
            } else {
                invalid_operands(
                    type_checker,
                    op,
                    left,
                    right,
                    "Invalid operands for arithmetic operator",
                    location,
                )
            }
        }
        TokenKind::Equals
        | TokenKind::NotEquals
        | TokenKind::Less
        | TokenKind::Greater
        | TokenKind::LessEquals
        | TokenKind::GreaterEquals => {
            if left.is_assignable_to(right) || right.is_assignable_to(left) {
                ResolvedType::Bool
            } else {
                invalid_operands(
                    type_checker,
                    op,
                    left,
                    right,
                    "Cannot compare incompatible types",
                    location,
                )
            }
        }
        TokenKind::And | TokenKind::Or => {
            if left.is_implicitly_convertible_to(&ResolvedType::Bool)
                && right.is_implicitly_convertible_to(&ResolvedType::Bool)
            {
                ResolvedType::Bool
            } else {
                invalid_operands(
                    type_checker,
                    op,
                    left,
                    right,
                    "Logical operators require boolean operands",
                    location,
                )
            }
        }
        TokenKind::Ampersand
        | TokenKind::Pipe
        | TokenKind::Caret
        | TokenKind::ShiftLeft
        | TokenKind::ShiftRight => {
            if *left == ResolvedType::Int && *right == ResolvedType::Int {
                ResolvedType::Int
            } else {
                invalid_operands(
                    type_checker,
                    op,
                    left,
                    right,
                    "Bitwise operators require integer operands",
                    location,
                )
            }
        }
        _ => invalid_operands(
            type_checker,
            op,
            left,
            right,
            "Unhandled binary operator in type checking",
            location,
        ),
    }
}

pub fn check_unary_op(
    type_checker: &mut TypeChecker,
    op: TokenKind,
    operand: &ResolvedType,
    location: &SourceLocation,
) -> ResolvedType {
    let operand = operand.dereferenced();
    // Address-of yields a pointer even to an ill-typed operand.
    if op == TokenKind::At {
        return ResolvedType::pointer(operand.clone(), false);
    }
    if operand.is_error() {
        return ResolvedType::Error;
    }

    match op {
        TokenKind::Plus | TokenKind::Dash => {
            if operand.is_numeric() {
                operand.clone()
            } else {
                invalid_operand(
                    type_checker,
                    op,
                    operand,
                    "Unary +/- requires numeric operand",
                    location,
                )
            }
        }
        TokenKind::Not => {
            if operand.is_implicitly_convertible_to(&ResolvedType::Bool) {
                ResolvedType::Bool
            } else {
                invalid_operand(
                    type_checker,
                    op,
                    operand,
                    "Logical NOT requires boolean operand",
                    location,
                )
            }
        }
        TokenKind::Tilde => {
            if *operand == ResolvedType::Int {
                ResolvedType::Int
            } else {
                invalid_operand(
                    type_checker,
                    op,
                    operand,
                    "Bitwise NOT requires integer operand",
                    location,
                )
            }
        }
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            if operand.is_numeric() {
                operand.clone()
            } else {
                invalid_operand(
                    type_checker,
                    op,
                    operand,
                    "Increment/decrement requires numeric operand",
                    location,
                )
            }
        }
        // Smart pointers dereference like raw ones.
        TokenKind::Star => match operand {
            ResolvedType::Pointer { pointee, .. } | ResolvedType::Smart { pointee, .. } => {
                pointee.as_ref().clone()
            }
            _ => invalid_operand(
                type_checker,
                op,
                operand,
                "Dereference requires pointer operand",
                location,
            ),
        },
        _ => invalid_operand(
            type_checker,
            op,
            operand,
            "Unhandled unary operator in type checking",
            location,
        ),
    }
}

/// Checks `args` against `params`, reporting the arity or the first
/// mismatching argument of each position.
fn check_arguments(
    type_checker: &mut TypeChecker,
    params: &[ResolvedType],
    args: &[Expr],
    arg_types: &[ResolvedType],
    location: &SourceLocation,
) {
    if params.len() != args.len() {
        type_checker.error(
            ErrorImpl::ArgumentCountMismatch {
                expected: params.len(),
                received: args.len(),
            },
            location,
        );
        return;
    }

    for ((param, arg), arg_type) in params.iter().zip(args.iter()).zip(arg_types.iter()) {
        let param = param.dereferenced();
        if !arg_type.is_assignable_to(param) {
            type_checker.error(
                ErrorImpl::ArgumentTypeMatchError {
                    expected: param.to_string(),
                    received: arg_type.to_string(),
                },
                arg.location(),
            );
        }
    }
}

/// Parameter names of the generic function `callee` names, unless a
/// variable shadows it. `ns.f` resolves through the namespace's full name.
fn generic_params_of(type_checker: &TypeChecker, callee: &Expr) -> Option<Vec<String>> {
    match callee {
        Expr::Identifier { name, .. } if type_checker.scopes.lookup_variable(name).is_none() => {
            type_checker.scopes.lookup_generics(name).cloned()
        }
        Expr::Member {
            object,
            name,
            is_pointer_access: false,
            ..
        } => match object.as_ref() {
            Expr::Identifier {
                name: namespace, ..
            } if type_checker.members.is_namespace(namespace)
                && type_checker.scopes.lookup_variable(namespace).is_none() =>
            {
                let full_name = format!("{}.{}", namespace, name);
                type_checker.scopes.lookup_generics(&full_name).cloned()
            }
            _ => None,
        },
        _ => None,
    }
}

fn check_call(
    type_checker: &mut TypeChecker,
    callee: &Expr,
    args: &[Expr],
    type_args: &[String],
    location: &SourceLocation,
    context: &CheckContext,
) -> ResolvedType {
    let callee_type = check_expr(type_checker, callee, context);
    let arg_types: Vec<ResolvedType> = args
        .iter()
        .map(|arg| check_expr(type_checker, arg, context))
        .collect();

    let (return_type, params) = match callee_type.dereferenced() {
        ResolvedType::Function {
            return_type,
            params,
        } => (return_type.as_ref().clone(), params.clone()),
        ResolvedType::Error => return ResolvedType::Error,
        other => {
            return type_checker.error(
                ErrorImpl::NotCallable {
                    received: other.to_string(),
                },
                callee.location(),
            )
        }
    };

    let (return_type, params) = match generic_params_of(type_checker, callee) {
        Some(generic_params) => {
            let mut bindings = HashMap::new();
            for (name, type_arg) in generic_params.iter().zip(type_args.iter()) {
                let resolved = resolve_type_name(type_checker, type_arg, location);
                bindings.insert(name.clone(), resolved);
            }
            for (param, arg_type) in params.iter().zip(arg_types.iter()) {
                param.infer_bindings(arg_type, &generic_params, &mut bindings);
            }

            (
                return_type.substitute(&bindings),
                params
                    .iter()
                    .map(|param| param.substitute(&bindings))
                    .collect::<Vec<_>>(),
            )
        }
        None => (return_type, params),
    };

    check_arguments(type_checker, &params, args, &arg_types, location);
    return_type
}

/// `Namespace.member` or `Enum.Member`, when `object` names one.
fn check_static_member(
    type_checker: &mut TypeChecker,
    object: &Expr,
    member: &str,
    location: &SourceLocation,
) -> Option<ResolvedType> {
    let Expr::Identifier { name, .. } = object else {
        return None;
    };
    if type_checker.scopes.lookup_variable(name).is_some()
        || type_checker.scopes.lookup_function(name).is_some()
    {
        return None;
    }

    if type_checker.members.is_namespace(name) {
        let found = type_checker.members.namespace_member(name, member).cloned();
        return Some(match found {
            Some(ty) => ty,
            None => type_checker.error(
                ErrorImpl::UnknownMember {
                    type_name: name.clone(),
                    member: member.to_string(),
                },
                location,
            ),
        });
    }

    let enum_name = match type_checker.scopes.lookup_type(name) {
        Some(ResolvedType::Named(enum_name)) if type_checker.members.is_enum(enum_name) => {
            enum_name.clone()
        }
        _ => return None,
    };
    let found = type_checker.members.lookup_member(&enum_name, member, &[]);
    Some(match found {
        Some(ty) => ty,
        None => type_checker.error(
            ErrorImpl::UnknownMember {
                type_name: enum_name,
                member: member.to_string(),
            },
            location,
        ),
    })
}

fn check_member(
    type_checker: &mut TypeChecker,
    object: &Expr,
    member: &str,
    is_pointer_access: bool,
    location: &SourceLocation,
    context: &CheckContext,
) -> ResolvedType {
    if !is_pointer_access {
        if let Some(ty) = check_static_member(type_checker, object, member, location) {
            return ty;
        }
    }

    let object_type = check_expr(type_checker, object, context);
    let object_type = object_type.dereferenced();
    if object_type.is_error() {
        return ResolvedType::Error;
    }

    let target = match (is_pointer_access, object_type) {
        (true, ResolvedType::Pointer { pointee, .. }) => pointee.as_ref(),
        (false, ResolvedType::Smart { pointee, .. }) => pointee.as_ref(),
        (false, other) => other,
        (true, other) => {
            return type_checker.error(
                ErrorImpl::InvalidMemberAccess {
                    type_name: other.to_string(),
                    member: member.to_string(),
                },
                location,
            )
        }
    };

    let (type_name, args) = match target {
        ResolvedType::Named(name) => (name.clone(), vec![]),
        ResolvedType::Template { name, args } => (name.clone(), args.clone()),
        ResolvedType::Error => return ResolvedType::Error,
        other => {
            return type_checker.error(
                ErrorImpl::InvalidMemberAccess {
                    type_name: other.to_string(),
                    member: member.to_string(),
                },
                location,
            )
        }
    };

    match type_checker.members.lookup_member(&type_name, member, &args) {
        Some(ty) => ty,
        // Generic parameters carry no member table.
        None if !type_checker.members.contains(&type_name) => ResolvedType::Error,
        None => type_checker.error(
            ErrorImpl::UnknownMember {
                type_name,
                member: member.to_string(),
            },
            location,
        ),
    }
}

fn check_new(
    type_checker: &mut TypeChecker,
    class_name: &str,
    args: &[Expr],
    location: &SourceLocation,
    context: &CheckContext,
) -> ResolvedType {
    let arg_types: Vec<ResolvedType> = args
        .iter()
        .map(|arg| check_expr(type_checker, arg, context))
        .collect();

    let class_type = match type_checker.scopes.lookup_type(class_name) {
        Some(class_type) => class_type.clone(),
        None => {
            return type_checker.error(
                ErrorImpl::UndefinedClass {
                    name: class_name.to_string(),
                },
                location,
            )
        }
    };

    let constructor = class_type
        .nominal_name()
        .and_then(|name| type_checker.members.get(name))
        .and_then(|info| info.constructor.clone());
    if let Some(params) = constructor {
        check_arguments(type_checker, &params, args, &arg_types, location);
    }

    class_type
}

fn check_array_literal(
    type_checker: &mut TypeChecker,
    elements: &[Expr],
    location: &SourceLocation,
    context: &CheckContext,
) -> ResolvedType {
    let Some((first, rest)) = elements.split_first() else {
        return type_checker.error(ErrorImpl::EmptyArrayLiteral, location);
    };

    let element_type = check_expr(type_checker, first, context);
    for element in rest {
        let ty = check_expr(type_checker, element, context);
        if !ty.is_assignable_to(&element_type) {
            type_checker.error(
                ErrorImpl::ArrayElementMismatch {
                    expected: element_type.to_string(),
                    received: ty.to_string(),
                },
                element.location(),
            );
        }
    }

    ResolvedType::Array(Box::new(element_type))
}

/// Whether `operand` is a bare type name, as in `#sizeof(Point)`.
fn names_type(type_checker: &TypeChecker, operand: &Expr) -> bool {
    match operand {
        Expr::Identifier { name, .. } => {
            type_checker.scopes.lookup_variable(name).is_none()
                && type_checker.scopes.lookup_type(name).is_some()
        }
        _ => false,
    }
}

/// Computes the type of `expr`, reporting every problem found along the way.
///
/// Never fails: an ill-typed expression yields `ResolvedType::Error`.
pub fn check_expr(type_checker: &mut TypeChecker, expr: &Expr, context: &CheckContext) -> ResolvedType {
    match expr {
        Expr::Literal { kind, value, .. } => match kind {
            LiteralKind::Number => {
                if value.contains('.') {
                    ResolvedType::Float
                } else {
                    ResolvedType::Int
                }
            }
            LiteralKind::String => ResolvedType::String,
            LiteralKind::True | LiteralKind::False => ResolvedType::Bool,
            LiteralKind::Null | LiteralKind::Undefined => ResolvedType::Error,
        },
        Expr::Identifier { name, location } => {
            if let Some(ty) = type_checker.scopes.lookup_variable(name) {
                ty.clone()
            } else if let Some(ty) = type_checker.scopes.lookup_function(name) {
                ty.clone()
            } else {
                type_checker.error(
                    ErrorImpl::UndefinedIdentifier { name: name.clone() },
                    location,
                )
            }
        }
        Expr::Binary {
            op,
            left,
            right,
            location,
        } => {
            let left = check_expr(type_checker, left, context);
            let right = check_expr(type_checker, right, context);
            check_binary_op(type_checker, *op, &left, &right, location)
        }
        Expr::Unary {
            op,
            operand,
            location,
            ..
        } => {
            let operand = check_expr(type_checker, operand, context);
            check_unary_op(type_checker, *op, &operand, location)
        }
        Expr::ArrayLiteral { elements, location } => {
            check_array_literal(type_checker, elements, location, context)
        }
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
            location,
        } => {
            let condition_type = check_expr(type_checker, condition, context);
            if !condition_type.is_implicitly_convertible_to(&ResolvedType::Bool) {
                type_checker.error(
                    ErrorImpl::ConditionNotBoolean {
                        construct: String::from("Conditional"),
                        received: condition_type.to_string(),
                    },
                    condition.location(),
                );
            }

            let then_type = check_expr(type_checker, then_branch, context);
            let else_type = check_expr(type_checker, else_branch, context);
            if then_type.is_assignable_to(&else_type) {
                else_type
            } else if else_type.is_assignable_to(&then_type) {
                then_type
            } else {
                type_checker.error(
                    ErrorImpl::ConditionalBranchMismatch {
                        then_type: then_type.to_string(),
                        else_type: else_type.to_string(),
                    },
                    location,
                )
            }
        }
        Expr::Assignment {
            op,
            target,
            value,
            location,
        } => {
            let target_type = check_expr(type_checker, target, context);
            let value_type = check_expr(type_checker, value, context);
            let expected = target_type.dereferenced();

            match compound_operator(*op) {
                None => {
                    if !value_type.is_assignable_to(expected) {
                        type_checker.error(
                            ErrorImpl::TypeMatchError {
                                expected: expected.to_string(),
                                received: value_type.to_string(),
                            },
                            location,
                        );
                    }
                }
                Some(binary_op) => {
                    let result =
                        check_binary_op(type_checker, binary_op, expected, &value_type, location);
                    if !result.is_assignable_to(expected) {
                        type_checker.error(
                            ErrorImpl::CompoundAssignmentMismatch {
                                expected: expected.to_string(),
                                received: result.to_string(),
                            },
                            location,
                        );
                    }
                }
            }

            target_type
        }
        Expr::Call {
            callee,
            args,
            type_args,
            location,
        } => check_call(type_checker, callee, args, type_args, location, context),
        Expr::Member {
            object,
            name,
            is_pointer_access,
            location,
        } => check_member(
            type_checker,
            object,
            name,
            *is_pointer_access,
            location,
            context,
        ),
        Expr::Index {
            array,
            index,
            location,
        } => {
            let array_type = check_expr(type_checker, array, context);
            let index_type = check_expr(type_checker, index, context);

            match array_type.dereferenced() {
                ResolvedType::Array(element) => {
                    if !index_type.is_assignable_to(&ResolvedType::Int) {
                        type_checker.error(
                            ErrorImpl::IndexNotInteger {
                                received: index_type.to_string(),
                            },
                            index.location(),
                        );
                    }
                    element.as_ref().clone()
                }
                ResolvedType::Error => ResolvedType::Error,
                other => type_checker.error(
                    ErrorImpl::IndexNonArray {
                        received: other.to_string(),
                    },
                    location,
                ),
            }
        }
        Expr::This { location } => match &context.class_type {
            Some(class_type) => class_type.clone(),
            None => type_checker.error(ErrorImpl::ThisOutsideClass, location),
        },
        Expr::New {
            class_name,
            args,
            location,
        } => check_new(type_checker, class_name, args, location, context),
        Expr::Cast {
            target_type,
            expr,
            location,
        } => {
            let source = check_expr(type_checker, expr, context);
            let target = resolve_type_name(type_checker, target_type, location);

            if !source.is_explicitly_convertible_to(&target) {
                type_checker.error(
                    ErrorImpl::InvalidCast {
                        from: source.to_string(),
                        to: target.to_string(),
                    },
                    location,
                );
            }
            target
        }
        Expr::CompileTime { kind, operand, .. } => {
            let operand_type = if *kind != CompileTimeKind::Const && names_type(type_checker, operand) {
                ResolvedType::Void
            } else {
                check_expr(type_checker, operand, context)
            };

            match kind {
                CompileTimeKind::SizeOf | CompileTimeKind::AlignOf => ResolvedType::Int,
                CompileTimeKind::TypeOf => ResolvedType::String,
                CompileTimeKind::Const => operand_type,
            }
        }
        Expr::TemplateSpecialization {
            base,
            type_args,
            location,
        } => {
            let args: Vec<ResolvedType> = type_args
                .iter()
                .map(|arg| resolve_type_name(type_checker, arg, location))
                .collect();

            if let Some(generic_params) = type_checker.scopes.lookup_generics(base).cloned() {
                let bindings: HashMap<String, ResolvedType> =
                    generic_params.into_iter().zip(args).collect();
                return match type_checker.scopes.lookup_function(base) {
                    Some(function) => function.substitute(&bindings),
                    None => ResolvedType::Error,
                };
            }

            match resolve_type_name(type_checker, base, location) {
                ResolvedType::Named(name) => ResolvedType::Template { name, args },
                ResolvedType::Error => ResolvedType::Error,
                other => type_checker.error(
                    ErrorImpl::TemplateBaseNotNamed {
                        received: other.to_string(),
                    },
                    location,
                ),
            }
        }
        Expr::Pointer { operand, kind, .. } => {
            let operand_type = check_expr(type_checker, operand, context);
            ResolvedType::pointer(operand_type, *kind == PointerKind::Unsafe)
        }
        Expr::Function(function) => check_function(
            type_checker,
            &function.params,
            function.return_type.as_ref(),
            Some(&function.body),
            &[],
            context,
        ),
        Expr::Attribute(attribute) => {
            if let Some(argument) = &attribute.argument {
                check_expr(type_checker, argument, context);
            }
            ResolvedType::Void
        }
    }
}
