
use tracing::{debug, info, trace};

use crate::{
    ast::{
        ast::{Ast, Node},
        declarations::{Decl, EnumMember, Parameter},
        expressions::Expr,
        statements::BlockStmt,
        types::{GenericParam, TypeNode},
    },
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    SourceLocation,
};

use super::{
    expr::check_expr,
    members::{MemberTable, TypeKind, TypeMembers},
    resolved_type::ResolvedType,
    scope::ScopeTable,
    stmt::check_stmt,
    types::resolve_type,
};

/// Names every unit can use without declaring them.
const BUILTIN_TYPES: [(&str, ResolvedType); 6] = [
    ("void", ResolvedType::Void),
    ("int", ResolvedType::Int),
    ("float", ResolvedType::Float),
    ("bool", ResolvedType::Bool),
    ("boolean", ResolvedType::Bool),
    ("string", ResolvedType::String),
];

/// Ambient state of the construct being checked.
///
/// Nested constructs receive a modified copy, so leaving a loop or a
/// function restores the outer state without any bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct CheckContext {
    pub in_loop: bool,
    pub in_switch: bool,
    pub in_try: bool,
    pub return_type: Option<ResolvedType>,
    pub class_type: Option<ResolvedType>,
}

impl CheckContext {
    pub fn for_loop(&self) -> Self {
        CheckContext {
            in_loop: true,
            ..self.clone()
        }
    }

    pub fn for_switch(&self) -> Self {
        CheckContext {
            in_switch: true,
            ..self.clone()
        }
    }

    pub fn for_try(&self) -> Self {
        CheckContext {
            in_try: true,
            ..self.clone()
        }
    }

    /// A function body: loop and switch state do not cross the boundary.
    pub fn for_function(&self, return_type: ResolvedType) -> Self {
        CheckContext {
            return_type: Some(return_type),
            class_type: self.class_type.clone(),
            ..CheckContext::default()
        }
    }

    pub fn for_class(&self, class_type: ResolvedType) -> Self {
        CheckContext {
            class_type: Some(class_type),
            ..CheckContext::default()
        }
    }
}

#[derive(Debug)]
pub struct TypeChecker<'a> {
    diagnostics: &'a mut Diagnostics,
    pub scopes: ScopeTable,
    pub members: MemberTable,
    /// Non-zero while hoisting, when resolution failures are reported later.
    quiet: usize,
}

impl<'a> TypeChecker<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        let mut scopes = ScopeTable::new();
        for (name, ty) in BUILTIN_TYPES {
            scopes.declare_global_type(name, ty);
        }

        TypeChecker {
            diagnostics,
            scopes,
            members: MemberTable::new(),
            quiet: 0,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &*self.diagnostics
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&ResolvedType> {
        self.scopes.lookup_variable(name)
    }

    pub fn lookup_function(&self, name: &str) -> Option<&ResolvedType> {
        self.scopes.lookup_function(name)
    }

    pub fn lookup_type(&self, name: &str) -> Option<&ResolvedType> {
        self.scopes.lookup_type(name)
    }

    pub fn report(&mut self, error: Error) {
        if self.quiet == 0 {
            debug!("type error at {}: {}", error.get_position(), error.message());
            self.diagnostics.report(error);
        }
    }

    /// Reports `error_impl` and returns the `Error` sentinel.
    pub fn error(&mut self, error_impl: ErrorImpl, location: &SourceLocation) -> ResolvedType {
        self.report(Error::new(error_impl, location.clone()));
        ResolvedType::Error
    }

    pub fn warning(&mut self, error_impl: ErrorImpl, location: &SourceLocation) {
        if self.quiet == 0 {
            self.diagnostics
                .report_warning(Error::new(error_impl, location.clone()));
        }
    }

    pub fn declare_variable(&mut self, name: &str, ty: ResolvedType, location: &SourceLocation) {
        if let Err(err) = self.scopes.declare_variable(name, ty, location) {
            self.report(err);
        }
    }

    pub fn declare_generic_params(&mut self, generic_params: &[GenericParam]) {
        for param in generic_params {
            self.scopes
                .declare_type(&param.name, ResolvedType::Named(param.name.clone()));
        }
    }
}

fn generic_names(generic_params: &[GenericParam]) -> Vec<String> {
    generic_params.iter().map(|param| param.name.clone()).collect()
}

fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(namespace) => format!("{}.{}", namespace, name),
        None => name.to_string(),
    }
}

/// Type checks a parsed unit, appending every problem to `diagnostics`.
///
/// Types, member tables and function signatures are hoisted first so
/// declarations may refer to each other regardless of order.
///
/// # Arguments
///
/// * `ast` - The unit produced by the parser
/// * `diagnostics` - The sink shared with the parser
///
/// # Returns
///
/// The checker, with the global scope still populated
pub fn type_check<'a>(ast: &Ast, diagnostics: &'a mut Diagnostics) -> TypeChecker<'a> {
    info!("type checking {} top-level nodes", ast.len());
    let mut type_checker = TypeChecker::new(diagnostics);

    let declarations: Vec<&Decl> = ast.declarations().collect();
    type_checker.quiet += 1;
    hoist_types(&mut type_checker, &declarations, None);
    hoist_typedefs(&mut type_checker, &declarations, None);
    hoist_members(&mut type_checker, &declarations, None);
    type_checker.quiet -= 1;

    let context = CheckContext::default();
    for node in ast.iter() {
        match node {
            Node::Decl(decl) => check_decl(&mut type_checker, decl, &context, None),
            Node::Stmt(stmt) => check_stmt(&mut type_checker, stmt, &context),
        }
    }

    debug!(
        "type checking finished with {} errors",
        type_checker.diagnostics.error_count()
    );
    type_checker
}

fn hoist_types(type_checker: &mut TypeChecker, declarations: &[&Decl], namespace: Option<&str>) {
    for decl in declarations {
        match decl {
            Decl::Class { name, members, .. } => {
                let full_name = qualify(namespace, name);
                trace!("hoisting class {}", full_name);
                type_checker
                    .scopes
                    .declare_global_type(&full_name, ResolvedType::Named(full_name.clone()));

                let nested: Vec<&Decl> = members.iter().collect();
                hoist_types(type_checker, &nested, namespace);
            }
            Decl::Interface { name, .. } | Decl::Enum { name, .. } => {
                let full_name = qualify(namespace, name);
                type_checker
                    .scopes
                    .declare_global_type(&full_name, ResolvedType::Named(full_name.clone()));
            }
            Decl::Namespace {
                name, declarations, ..
            } => {
                let full_name = qualify(namespace, name);
                type_checker.members.register_namespace(&full_name);

                let inner: Vec<&Decl> = declarations.iter().collect();
                hoist_types(type_checker, &inner, Some(&full_name));
            }
            _ => {}
        }
    }
}

fn hoist_typedefs(type_checker: &mut TypeChecker, declarations: &[&Decl], namespace: Option<&str>) {
    for decl in declarations {
        match decl {
            Decl::Typedef {
                name, aliased_type, ..
            } => {
                let aliased = resolve_type(type_checker, aliased_type);
                type_checker
                    .scopes
                    .declare_global_type(&qualify(namespace, name), aliased.clone());
                type_checker.scopes.declare_type(name, aliased);
            }
            Decl::Namespace {
                name, declarations, ..
            } => {
                let full_name = qualify(namespace, name);
                enter_namespace(type_checker, &full_name, declarations);

                let inner: Vec<&Decl> = declarations.iter().collect();
                hoist_typedefs(type_checker, &inner, Some(&full_name));
                type_checker.scopes.pop();
            }
            _ => {}
        }
    }
}

fn hoist_members(type_checker: &mut TypeChecker, declarations: &[&Decl], namespace: Option<&str>) {
    for decl in declarations {
        match decl {
            Decl::Class {
                name,
                base_class,
                interfaces,
                members,
                generic_params,
                ..
            } => {
                let full_name = qualify(namespace, name);
                register_class(
                    type_checker,
                    &full_name,
                    base_class.as_ref(),
                    interfaces,
                    members,
                    generic_params,
                );

                let nested: Vec<&Decl> = members.iter().collect();
                hoist_members(type_checker, &nested, namespace);
            }
            Decl::Interface {
                name,
                extends,
                members,
                generic_params,
                ..
            } => {
                let full_name = qualify(namespace, name);
                register_interface(type_checker, &full_name, extends, members, generic_params);
            }
            Decl::Enum {
                name,
                underlying_type,
                members,
                ..
            } => {
                let full_name = qualify(namespace, name);
                register_enum(type_checker, &full_name, underlying_type.as_ref(), members);
            }
            Decl::Function {
                name,
                params,
                return_type,
                generic_params,
                ..
            } => {
                let full_name = qualify(namespace, name);
                let signature =
                    function_signature(type_checker, params, return_type.as_ref(), generic_params);
                trace!("hoisting function {}: {}", full_name, signature);

                if let Some(namespace) = namespace {
                    type_checker
                        .members
                        .add_namespace_member(namespace, name, signature.clone());
                }
                type_checker
                    .scopes
                    .declare_global_function(&full_name, signature);
                if !generic_params.is_empty() {
                    type_checker
                        .scopes
                        .declare_global_generics(&full_name, generic_names(generic_params));
                }
            }
            Decl::Namespace {
                name, declarations, ..
            } => {
                let full_name = qualify(namespace, name);
                enter_namespace(type_checker, &full_name, declarations);

                let inner: Vec<&Decl> = declarations.iter().collect();
                hoist_members(type_checker, &inner, Some(&full_name));
                type_checker.scopes.pop();
            }
            _ => {}
        }
    }
}

/// Pushes a frame in which the namespace's own types and functions are
/// visible by their short names.
fn enter_namespace(type_checker: &mut TypeChecker, full_name: &str, declarations: &[Decl]) {
    type_checker.scopes.push();

    for decl in declarations {
        let qualified = qualify(Some(full_name), decl.name());
        match decl {
            Decl::Class { name, .. } | Decl::Interface { name, .. } | Decl::Enum { name, .. } => {
                type_checker
                    .scopes
                    .declare_type(name, ResolvedType::Named(qualified));
            }
            Decl::Typedef { name, .. } => {
                if let Some(aliased) = type_checker.scopes.lookup_type(&qualified).cloned() {
                    type_checker.scopes.declare_type(name, aliased);
                }
            }
            Decl::Function { name, .. } => {
                if let Some(signature) = type_checker.scopes.lookup_function(&qualified).cloned() {
                    type_checker.scopes.declare_function(name, signature);
                }
                if let Some(generics) = type_checker.scopes.lookup_generics(&qualified).cloned() {
                    type_checker.scopes.declare_generics(name, generics);
                }
            }
            _ => {}
        }
    }
}

fn push_base(type_checker: &mut TypeChecker, info: &mut TypeMembers, base: &TypeNode) {
    let resolved = resolve_type(type_checker, base);
    if let Some(name) = resolved.nominal_name() {
        info.bases.push(name.to_string());
    }
}

fn register_class(
    type_checker: &mut TypeChecker,
    full_name: &str,
    base_class: Option<&TypeNode>,
    interfaces: &[TypeNode],
    members: &[Decl],
    generic_params: &[GenericParam],
) {
    type_checker.scopes.push();
    type_checker.declare_generic_params(generic_params);

    let mut info = TypeMembers::new(TypeKind::Class);
    info.generic_params = generic_names(generic_params);
    if let Some(base_class) = base_class {
        push_base(type_checker, &mut info, base_class);
    }
    for interface in interfaces {
        push_base(type_checker, &mut info, interface);
    }

    for member in members {
        match member {
            Decl::Field {
                name,
                type_annotation,
                ..
            } => {
                let ty = match type_annotation {
                    Some(type_annotation) => resolve_type(type_checker, type_annotation),
                    None => ResolvedType::Error,
                };
                info.members.insert(name.clone(), ty);
            }
            Decl::Method {
                name,
                params,
                return_type,
                ..
            } => {
                let signature = function_signature(type_checker, params, return_type.as_ref(), &[]);
                info.members.insert(name.clone(), signature);
            }
            Decl::Property {
                name,
                property_type,
                ..
            } => {
                let ty = resolve_type(type_checker, property_type);
                info.members.entry(name.clone()).or_insert(ty);
            }
            Decl::Constructor { params, .. } => {
                let params = params
                    .iter()
                    .map(|param| parameter_type(type_checker, param))
                    .collect();
                info.constructor = Some(params);
            }
            _ => {}
        }
    }

    type_checker.scopes.pop();
    type_checker.members.register_type(full_name, info);
}

fn register_interface(
    type_checker: &mut TypeChecker,
    full_name: &str,
    extends: &[TypeNode],
    members: &[Decl],
    generic_params: &[GenericParam],
) {
    type_checker.scopes.push();
    type_checker.declare_generic_params(generic_params);

    let mut info = TypeMembers::new(TypeKind::Interface);
    info.generic_params = generic_names(generic_params);
    for base in extends {
        push_base(type_checker, &mut info, base);
    }

    for member in members {
        match member {
            Decl::MethodSignature {
                name,
                params,
                return_type,
                ..
            } => {
                let signature = function_signature(type_checker, params, return_type.as_ref(), &[]);
                info.members.insert(name.clone(), signature);
            }
            Decl::PropertySignature {
                name, property_type, ..
            } => {
                let ty = resolve_type(type_checker, property_type);
                info.members.insert(name.clone(), ty);
            }
            _ => {}
        }
    }

    type_checker.scopes.pop();
    type_checker.members.register_type(full_name, info);
}

/// Enum members take the underlying type, `int` unless one is declared.
fn register_enum(
    type_checker: &mut TypeChecker,
    full_name: &str,
    underlying_type: Option<&TypeNode>,
    members: &[EnumMember],
) {
    let underlying = match underlying_type {
        Some(underlying_type) => resolve_type(type_checker, underlying_type),
        None => ResolvedType::Int,
    };

    let mut info = TypeMembers::new(TypeKind::Enum);
    for member in members {
        info.members.insert(member.name.clone(), underlying.clone());
    }
    type_checker.members.register_type(full_name, info);
}

/// A parameter's type as it appears in a signature. `ref` parameters are
/// wrapped in `Reference`.
pub fn parameter_type(type_checker: &mut TypeChecker, param: &Parameter) -> ResolvedType {
    let ty = resolve_type(type_checker, &param.param_type);
    if param.is_ref {
        ResolvedType::Reference(Box::new(ty))
    } else {
        ty
    }
}

/// The `Function` type of a declaration, without looking at its body.
pub fn function_signature(
    type_checker: &mut TypeChecker,
    params: &[Parameter],
    return_type: Option<&TypeNode>,
    generic_params: &[GenericParam],
) -> ResolvedType {
    type_checker.scopes.push();
    type_checker.declare_generic_params(generic_params);

    let params = params
        .iter()
        .map(|param| parameter_type(type_checker, param))
        .collect();
    let return_type = match return_type {
        Some(return_type) => resolve_type(type_checker, return_type),
        None => ResolvedType::Void,
    };

    type_checker.scopes.pop();
    ResolvedType::function(return_type, params)
}

pub fn check_decl(
    type_checker: &mut TypeChecker,
    decl: &Decl,
    context: &CheckContext,
    namespace: Option<&str>,
) {
    match decl {
        Decl::Var {
            name,
            type_annotation,
            initializer,
            location,
            ..
        } => {
            let ty = check_var_decl(
                type_checker,
                name,
                type_annotation.as_ref(),
                initializer.as_ref(),
                location,
                context,
            );
            if let Some(namespace) = namespace {
                type_checker
                    .members
                    .add_namespace_member(namespace, name, ty);
            }
        }
        Decl::Function {
            name,
            params,
            return_type,
            body,
            generic_params,
            ..
        } => {
            // Nested functions are not hoisted. Declare them before the body
            // is checked so they may recurse.
            if namespace.is_none() && type_checker.scopes.depth() > 1 {
                type_checker.quiet += 1;
                let signature =
                    function_signature(type_checker, params, return_type.as_ref(), generic_params);
                type_checker.quiet -= 1;
                type_checker.scopes.declare_function(name, signature);
                if !generic_params.is_empty() {
                    type_checker
                        .scopes
                        .declare_generics(name, generic_names(generic_params));
                }
            }

            check_function(
                type_checker,
                params,
                return_type.as_ref(),
                body.as_ref(),
                generic_params,
                context,
            );
        }
        Decl::Class {
            name,
            base_class,
            interfaces,
            members,
            generic_params,
            ..
        } => {
            let full_name = qualify(namespace, name);
            if !type_checker.members.contains(&full_name) {
                type_checker
                    .scopes
                    .declare_type(name, ResolvedType::Named(full_name.clone()));
                type_checker.quiet += 1;
                register_class(
                    type_checker,
                    &full_name,
                    base_class.as_ref(),
                    interfaces,
                    members,
                    generic_params,
                );
                type_checker.quiet -= 1;
            }

            check_class(
                type_checker,
                &full_name,
                base_class.as_ref(),
                interfaces,
                members,
                generic_params,
                context,
            );
        }
        Decl::Constructor { .. }
        | Decl::Method { .. }
        | Decl::Field { .. }
        | Decl::Property { .. } => check_member(type_checker, decl, context, None),
        Decl::Namespace {
            name, declarations, ..
        } => {
            let full_name = qualify(namespace, name);
            debug!("checking namespace {}", full_name);
            enter_namespace(type_checker, &full_name, declarations);
            for inner in declarations {
                check_decl(type_checker, inner, context, Some(&full_name));
            }
            type_checker.scopes.pop();
        }
        Decl::Enum {
            name,
            underlying_type,
            members,
            ..
        } => {
            let full_name = qualify(namespace, name);
            if !type_checker.members.contains(&full_name) {
                type_checker
                    .scopes
                    .declare_type(name, ResolvedType::Named(full_name.clone()));
                type_checker.quiet += 1;
                register_enum(type_checker, &full_name, underlying_type.as_ref(), members);
                type_checker.quiet -= 1;
            }
            check_enum(type_checker, underlying_type.as_ref(), members, context);
        }
        Decl::Interface {
            name,
            extends,
            members,
            generic_params,
            ..
        } => {
            let full_name = qualify(namespace, name);
            if !type_checker.members.contains(&full_name) {
                type_checker
                    .scopes
                    .declare_type(name, ResolvedType::Named(full_name.clone()));
                type_checker.quiet += 1;
                register_interface(type_checker, &full_name, extends, members, generic_params);
                type_checker.quiet -= 1;
            }

            type_checker.scopes.push();
            type_checker.declare_generic_params(generic_params);
            for base in extends {
                resolve_type(type_checker, base);
            }
            for member in members {
                check_decl(type_checker, member, context, None);
            }
            type_checker.scopes.pop();
        }
        Decl::MethodSignature {
            params,
            return_type,
            ..
        } => {
            function_signature(type_checker, params, return_type.as_ref(), &[]);
        }
        Decl::PropertySignature { property_type, .. } => {
            resolve_type(type_checker, property_type);
        }
        Decl::Typedef {
            name, aliased_type, ..
        } => {
            let aliased = resolve_type(type_checker, aliased_type);
            type_checker.scopes.declare_type(name, aliased);
        }
    }
}

/// Checks a variable declaration and binds it in the current scope.
///
/// # Returns
///
/// The declared type, or the initializer's type when none was written
pub fn check_var_decl(
    type_checker: &mut TypeChecker,
    name: &str,
    type_annotation: Option<&TypeNode>,
    initializer: Option<&Expr>,
    location: &SourceLocation,
    context: &CheckContext,
) -> ResolvedType {
    let declared = type_annotation.map(|annotation| resolve_type(type_checker, annotation));
    let initial = initializer.map(|initializer| check_expr(type_checker, initializer, context));

    let ty = match (declared, initial) {
        (Some(declared), Some(initial)) => {
            if !initial.is_assignable_to(&declared) {
                type_checker.error(
                    ErrorImpl::InitializerMismatch {
                        expected: declared.to_string(),
                        received: initial.to_string(),
                    },
                    location,
                );
            }
            declared
        }
        (Some(declared), None) => declared,
        (None, Some(initial)) => initial,
        (None, None) => type_checker.error(
            ErrorImpl::MissingTypeOrInitializer {
                name: name.to_string(),
            },
            location,
        ),
    };

    trace!("declared {}: {}", name, ty);
    type_checker.declare_variable(name, ty.clone(), location);
    ty
}

/// Binds parameters in the current scope and checks their default values.
fn check_parameters(
    type_checker: &mut TypeChecker,
    params: &[Parameter],
    context: &CheckContext,
) -> Vec<ResolvedType> {
    let mut types = vec![];

    for param in params {
        let ty = resolve_type(type_checker, &param.param_type);

        if let Some(default) = &param.default {
            let default_type = check_expr(type_checker, default, context);
            if !default_type.is_assignable_to(&ty) {
                type_checker.error(
                    ErrorImpl::DefaultValueMismatch {
                        expected: ty.to_string(),
                        received: default_type.to_string(),
                    },
                    default.location(),
                );
            }
        }

        type_checker.declare_variable(&param.name, ty.clone(), &param.location);
        types.push(if param.is_ref {
            ResolvedType::Reference(Box::new(ty))
        } else {
            ty
        });
    }

    types
}

/// Checks a function-like body in a fresh scope holding its parameters.
pub fn check_function(
    type_checker: &mut TypeChecker,
    params: &[Parameter],
    return_type: Option<&TypeNode>,
    body: Option<&BlockStmt>,
    generic_params: &[GenericParam],
    context: &CheckContext,
) -> ResolvedType {
    type_checker.scopes.push();
    type_checker.declare_generic_params(generic_params);

    let params = check_parameters(type_checker, params, context);
    let return_type = match return_type {
        Some(return_type) => resolve_type(type_checker, return_type),
        None => ResolvedType::Void,
    };

    if let Some(body) = body {
        let inner = context.for_function(return_type.clone());
        for stmt in body.iter() {
            check_stmt(type_checker, stmt, &inner);
        }
    }

    type_checker.scopes.pop();
    ResolvedType::function(return_type, params)
}

fn check_class(
    type_checker: &mut TypeChecker,
    full_name: &str,
    base_class: Option<&TypeNode>,
    interfaces: &[TypeNode],
    members: &[Decl],
    generic_params: &[GenericParam],
    context: &CheckContext,
) {
    debug!("checking class {}", full_name);
    type_checker.scopes.push();
    type_checker.declare_generic_params(generic_params);

    if let Some(base_class) = base_class {
        resolve_type(type_checker, base_class);
    }
    for interface in interfaces {
        resolve_type(type_checker, interface);
    }

    let inner = context.for_class(ResolvedType::Named(full_name.to_string()));
    for member in members {
        check_member(type_checker, member, &inner, Some(full_name));
    }

    type_checker.scopes.pop();
}

/// Checks one class body member. `class_name` is `None` for members that
/// appear outside a class.
fn check_member(
    type_checker: &mut TypeChecker,
    member: &Decl,
    context: &CheckContext,
    class_name: Option<&str>,
) {
    match member {
        Decl::Field {
            name,
            type_annotation,
            initializer,
            location,
            ..
        } => {
            let declared = type_annotation
                .as_ref()
                .map(|annotation| resolve_type(type_checker, annotation));
            let initial = initializer
                .as_ref()
                .map(|initializer| check_expr(type_checker, initializer, context));

            let ty = match (declared, initial) {
                (Some(declared), Some(initial)) => {
                    if !initial.is_assignable_to(&declared) {
                        type_checker.error(
                            ErrorImpl::FieldInitializerMismatch {
                                expected: declared.to_string(),
                                received: initial.to_string(),
                            },
                            location,
                        );
                    }
                    declared
                }
                (Some(declared), None) => declared,
                (None, Some(initial)) => {
                    let info = class_name.and_then(|class| type_checker.members.get_mut(class));
                    if let Some(info) = info {
                        info.members.insert(name.clone(), initial.clone());
                    }
                    initial
                }
                (None, None) => type_checker.error(
                    ErrorImpl::FieldMissingTypeOrInitializer { name: name.clone() },
                    location,
                ),
            };

            type_checker.declare_variable(name, ty, location);
        }
        Decl::Method {
            params,
            return_type,
            body,
            ..
        } => {
            check_function(
                type_checker,
                params,
                return_type.as_ref(),
                Some(body),
                &[],
                context,
            );
        }
        Decl::Constructor { params, body, .. } => {
            check_function(type_checker, params, None, Some(body), &[], context);
        }
        Decl::Property {
            property_type,
            parameter,
            body,
            ..
        } => match parameter {
            Some(parameter) => {
                check_function(
                    type_checker,
                    std::slice::from_ref(parameter),
                    None,
                    Some(body),
                    &[],
                    context,
                );
            }
            None => {
                check_function(
                    type_checker,
                    &[],
                    Some(property_type),
                    Some(body),
                    &[],
                    context,
                );
            }
        },
        _ => check_decl(type_checker, member, context, None),
    }
}

fn check_enum(
    type_checker: &mut TypeChecker,
    underlying_type: Option<&TypeNode>,
    members: &[EnumMember],
    context: &CheckContext,
) {
    let underlying = match underlying_type {
        Some(underlying_type) => resolve_type(type_checker, underlying_type),
        None => ResolvedType::Int,
    };

    for member in members {
        if let Some(value) = &member.value {
            let value_type = check_expr(type_checker, value, context);
            if !value_type.is_assignable_to(&underlying) {
                type_checker.error(
                    ErrorImpl::EnumValueMismatch {
                        expected: underlying.to_string(),
                        received: value_type.to_string(),
                    },
                    &member.location,
                );
            }
        }
    }
}
