use tracing::trace;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    errors::errors::ErrorImpl,
};

use super::{
    expr::check_expr,
    resolved_type::ResolvedType,
    type_checker::{check_decl, CheckContext, TypeChecker},
    types::resolve_type,
};

/// Reports `construct` when `condition` cannot be used as a boolean.
fn check_condition(
    type_checker: &mut TypeChecker,
    construct: &str,
    condition: &Expr,
    context: &CheckContext,
) {
    let condition_type = check_expr(type_checker, condition, context);
    if !condition_type.is_implicitly_convertible_to(&ResolvedType::Bool) {
        type_checker.error(
            ErrorImpl::ConditionNotBoolean {
                construct: construct.to_string(),
                received: condition_type.to_string(),
            },
            condition.location(),
        );
    }
}

/// Checks a statement in a new scope.
fn check_scoped(type_checker: &mut TypeChecker, stmt: &Stmt, context: &CheckContext) {
    type_checker.scopes.push();
    check_stmt(type_checker, stmt, context);
    type_checker.scopes.pop();
}

pub fn check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt, context: &CheckContext) {
    match stmt {
        Stmt::Block(block) => {
            type_checker.scopes.push();
            for stmt in block.iter() {
                check_stmt(type_checker, stmt, context);
            }
            type_checker.scopes.pop();
        }
        Stmt::Expression { expr, .. } => {
            check_expr(type_checker, expr, context);
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            check_condition(type_checker, "If", condition, context);
            check_scoped(type_checker, then_branch, context);
            if let Some(else_branch) = else_branch {
                check_scoped(type_checker, else_branch, context);
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            check_condition(type_checker, "While", condition, context);
            check_scoped(type_checker, body, &context.for_loop());
        }
        Stmt::DoWhile {
            body, condition, ..
        } => {
            check_scoped(type_checker, body, &context.for_loop());
            check_condition(type_checker, "Do-while", condition, context);
        }
        Stmt::For {
            initializer,
            condition,
            increment,
            body,
            ..
        } => {
            type_checker.scopes.push();
            if let Some(initializer) = initializer {
                check_stmt(type_checker, initializer, context);
            }
            if let Some(condition) = condition {
                check_condition(type_checker, "For", condition, context);
            }
            if let Some(increment) = increment {
                check_expr(type_checker, increment, context);
            }
            check_scoped(type_checker, body, &context.for_loop());
            type_checker.scopes.pop();
        }
        Stmt::ForOf {
            identifier,
            declared_type,
            iterable,
            body,
            location,
            ..
        } => {
            let iterable_type = check_expr(type_checker, iterable, context);
            let element_type = match iterable_type.element_type() {
                Some(element) => element.clone(),
                None => {
                    if !iterable_type.is_error() {
                        type_checker.warning(
                            ErrorImpl::NonIterable {
                                received: iterable_type.to_string(),
                            },
                            iterable.location(),
                        );
                    }
                    ResolvedType::Error
                }
            };

            let binding_type = match declared_type {
                Some(declared_type) => {
                    let declared = resolve_type(type_checker, declared_type);
                    if !element_type.is_assignable_to(&declared) {
                        type_checker.error(
                            ErrorImpl::TypeMatchError {
                                expected: declared.to_string(),
                                received: element_type.to_string(),
                            },
                            location,
                        );
                    }
                    declared
                }
                None => element_type,
            };

            type_checker.scopes.push();
            type_checker.declare_variable(identifier, binding_type, location);
            check_scoped(type_checker, body, &context.for_loop());
            type_checker.scopes.pop();
        }
        Stmt::Break { location, .. } => {
            if !context.in_loop && !context.in_switch {
                type_checker.error(ErrorImpl::BreakOutsideLoop, location);
            }
        }
        Stmt::Continue { location, .. } => {
            if !context.in_loop {
                type_checker.error(ErrorImpl::ContinueOutsideLoop, location);
            }
        }
        Stmt::Return { value, location } => {
            let value_type = match value {
                Some(value) => check_expr(type_checker, value, context),
                None => ResolvedType::Void,
            };

            match &context.return_type {
                None => {
                    type_checker.error(ErrorImpl::ReturnOutsideFunction, location);
                }
                Some(return_type) => {
                    if !value_type.is_assignable_to(return_type) {
                        type_checker.error(
                            ErrorImpl::ReturnTypeMismatch {
                                expected: return_type.to_string(),
                                received: value_type.to_string(),
                            },
                            location,
                        );
                    }
                }
            }
        }
        Stmt::Try {
            try_block,
            catch_clauses,
            finally,
            ..
        } => {
            check_scoped(type_checker, try_block, &context.for_try());

            for clause in catch_clauses {
                type_checker.scopes.push();
                let parameter_type = match &clause.parameter_type {
                    Some(parameter_type) => resolve_type(type_checker, parameter_type),
                    None => ResolvedType::Error,
                };
                type_checker.declare_variable(&clause.parameter, parameter_type, &clause.location);
                check_scoped(type_checker, &clause.body, context);
                type_checker.scopes.pop();
            }

            if let Some(finally) = finally {
                check_scoped(type_checker, finally, context);
            }
        }
        Stmt::Throw { value, .. } => {
            check_expr(type_checker, value, context);
        }
        Stmt::Switch { expr, cases, .. } => {
            let switch_type = check_expr(type_checker, expr, context);
            let inner = context.for_switch();

            for case in cases {
                if let Some(value) = &case.value {
                    let case_type = check_expr(type_checker, value, context);
                    if !case_type.is_assignable_to(&switch_type) {
                        type_checker.error(
                            ErrorImpl::CaseTypeMismatch {
                                expected: switch_type.to_string(),
                                received: case_type.to_string(),
                            },
                            &case.location,
                        );
                    }
                }

                type_checker.scopes.push();
                for stmt in &case.body {
                    check_stmt(type_checker, stmt, &inner);
                }
                type_checker.scopes.pop();
            }
        }
        Stmt::Assembly { code, location, .. } => {
            if code.trim().is_empty() {
                type_checker.error(ErrorImpl::EmptyAssembly, location);
            }
        }
        Stmt::Labeled {
            label, statement, ..
        } => {
            trace!("checking labeled statement {}", label);
            check_stmt(type_checker, statement, context);
        }
        Stmt::Declaration(declaration) => {
            check_decl(type_checker, &declaration.declaration, context, None);
        }
    }
}
