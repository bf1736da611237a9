use std::{collections::HashMap, fmt::Display};

use crate::ast::types::SmartPointerKind;

/// A type after name resolution.
///
/// `Error` is the sentinel produced by a failed check. It is assignable to
/// and from every other type so that one mistake yields one diagnostic.
#[derive(Debug, Clone)]
pub enum ResolvedType {
    Void,
    Int,
    Float,
    Bool,
    String,
    Named(String),
    Array(Box<ResolvedType>),
    Pointer {
        pointee: Box<ResolvedType>,
        is_unsafe: bool,
    },
    Reference(Box<ResolvedType>),
    Function {
        return_type: Box<ResolvedType>,
        params: Vec<ResolvedType>,
    },
    Smart {
        pointee: Box<ResolvedType>,
        kind: SmartPointerKind,
    },
    Union(Box<ResolvedType>, Box<ResolvedType>),
    Template {
        name: String,
        args: Vec<ResolvedType>,
    },
    Error,
}

impl PartialEq for ResolvedType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ResolvedType::Void, ResolvedType::Void)
            | (ResolvedType::Int, ResolvedType::Int)
            | (ResolvedType::Float, ResolvedType::Float)
            | (ResolvedType::Bool, ResolvedType::Bool)
            | (ResolvedType::String, ResolvedType::String)
            | (ResolvedType::Error, ResolvedType::Error) => true,
            (ResolvedType::Named(a), ResolvedType::Named(b)) => a == b,
            (ResolvedType::Array(a), ResolvedType::Array(b))
            | (ResolvedType::Reference(a), ResolvedType::Reference(b)) => a == b,
            (
                ResolvedType::Pointer {
                    pointee: a,
                    is_unsafe: a_unsafe,
                },
                ResolvedType::Pointer {
                    pointee: b,
                    is_unsafe: b_unsafe,
                },
            ) => a_unsafe == b_unsafe && a == b,
            (
                ResolvedType::Function {
                    return_type: a_return,
                    params: a_params,
                },
                ResolvedType::Function {
                    return_type: b_return,
                    params: b_params,
                },
            ) => a_return == b_return && a_params == b_params,
            (
                ResolvedType::Smart {
                    pointee: a,
                    kind: a_kind,
                },
                ResolvedType::Smart {
                    pointee: b,
                    kind: b_kind,
                },
            ) => a_kind == b_kind && a == b,
            // Union equality ignores member order.
            (ResolvedType::Union(a_left, a_right), ResolvedType::Union(b_left, b_right)) => {
                (a_left == b_left && a_right == b_right) || (a_left == b_right && a_right == b_left)
            }
            (
                ResolvedType::Template {
                    name: a_name,
                    args: a_args,
                },
                ResolvedType::Template {
                    name: b_name,
                    args: b_args,
                },
            ) => a_name == b_name && a_args == b_args,
            _ => false,
        }
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, types: &[ResolvedType]) -> std::fmt::Result {
    for (index, ty) in types.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

impl Display for ResolvedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedType::Void => write!(f, "void"),
            ResolvedType::Int => write!(f, "int"),
            ResolvedType::Float => write!(f, "float"),
            ResolvedType::Bool => write!(f, "bool"),
            ResolvedType::String => write!(f, "string"),
            ResolvedType::Named(name) => write!(f, "{}", name),
            ResolvedType::Array(element) => write!(f, "{}[]", element),
            ResolvedType::Pointer { pointee, is_unsafe } => {
                if *is_unsafe {
                    write!(f, "{}@unsafe", pointee)
                } else {
                    write!(f, "{}@", pointee)
                }
            }
            ResolvedType::Reference(base) => write!(f, "{}&", base),
            ResolvedType::Function {
                return_type,
                params,
            } => {
                write!(f, "function(")?;
                write_list(f, params)?;
                write!(f, "): {}", return_type)
            }
            ResolvedType::Smart { pointee, kind } => write!(f, "{}<{}>", kind, pointee),
            ResolvedType::Union(left, right) => write!(f, "{} | {}", left, right),
            ResolvedType::Template { name, args } => {
                write!(f, "{}<", name)?;
                write_list(f, args)?;
                write!(f, ">")
            }
            ResolvedType::Error => write!(f, "error_type"),
        }
    }
}

impl ResolvedType {
    pub fn pointer(pointee: ResolvedType, is_unsafe: bool) -> Self {
        ResolvedType::Pointer {
            pointee: Box::new(pointee),
            is_unsafe,
        }
    }

    pub fn function(return_type: ResolvedType, params: Vec<ResolvedType>) -> Self {
        ResolvedType::Function {
            return_type: Box::new(return_type),
            params,
        }
    }

    pub fn union(left: ResolvedType, right: ResolvedType) -> Self {
        ResolvedType::Union(Box::new(left), Box::new(right))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResolvedType::Error)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ResolvedType::Int | ResolvedType::Float)
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, ResolvedType::Pointer { .. })
    }

    pub fn is_smart(&self) -> bool {
        matches!(self, ResolvedType::Smart { .. })
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            ResolvedType::Int | ResolvedType::Float | ResolvedType::Bool | ResolvedType::String
        )
    }

    /// Name of the class, interface or enum behind a nominal type.
    pub fn nominal_name(&self) -> Option<&str> {
        match self {
            ResolvedType::Named(name) | ResolvedType::Template { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Element type of an array, if this is one.
    pub fn element_type(&self) -> Option<&ResolvedType> {
        match self {
            ResolvedType::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Strips one level of `Reference`.
    pub fn dereferenced(&self) -> &ResolvedType {
        match self {
            ResolvedType::Reference(base) => base,
            _ => self,
        }
    }

    /// Whether a value of this type may be stored where `target` is expected.
    pub fn is_assignable_to(&self, target: &ResolvedType) -> bool {
        if self == target || self.is_error() || target.is_error() {
            return true;
        }

        if let ResolvedType::Union(left, right) = target {
            return self.is_assignable_to(left) || self.is_assignable_to(right);
        }

        match (self, target) {
            (ResolvedType::Int, ResolvedType::Float) => true,
            (
                ResolvedType::Smart {
                    pointee: source_pointee,
                    kind: source_kind,
                },
                ResolvedType::Smart {
                    pointee: target_pointee,
                    kind: target_kind,
                },
            ) => {
                let kinds_match = source_kind == target_kind
                    || (*source_kind == SmartPointerKind::Shared
                        && *target_kind == SmartPointerKind::Weak);
                kinds_match && source_pointee.is_assignable_to(target_pointee)
            }
            (ResolvedType::Array(source), ResolvedType::Array(target)) => {
                source.is_assignable_to(target)
            }
            (
                ResolvedType::Function {
                    return_type: source_return,
                    params: source_params,
                },
                ResolvedType::Function {
                    return_type: target_return,
                    params: target_params,
                },
            ) => {
                source_params.len() == target_params.len()
                    && source_return.is_assignable_to(target_return)
                    && source_params
                        .iter()
                        .zip(target_params.iter())
                        .all(|(source, target)| target.is_assignable_to(source))
            }
            _ => false,
        }
    }

    /// Conversions applied without a cast, such as in conditions.
    pub fn is_implicitly_convertible_to(&self, target: &ResolvedType) -> bool {
        if self.is_assignable_to(target) {
            return true;
        }

        match target {
            ResolvedType::Bool => {
                self.is_numeric() || self.is_pointer() || self.is_smart()
            }
            ResolvedType::Float => matches!(self, ResolvedType::Int),
            _ => false,
        }
    }

    /// Conversions allowed by an explicit `cast<T>(...)`.
    pub fn is_explicitly_convertible_to(&self, target: &ResolvedType) -> bool {
        if self.is_implicitly_convertible_to(target) {
            return true;
        }

        if let ResolvedType::Union(left, right) = self {
            return left.is_explicitly_convertible_to(target)
                || right.is_explicitly_convertible_to(target);
        }
        if let ResolvedType::Union(left, right) = target {
            return self.is_explicitly_convertible_to(left)
                || self.is_explicitly_convertible_to(right);
        }

        match (self, target) {
            (ResolvedType::Float, ResolvedType::Int) | (ResolvedType::Int, ResolvedType::Float) => {
                true
            }
            (source, ResolvedType::String) if source.is_primitive() => true,
            (ResolvedType::Pointer { .. }, ResolvedType::Pointer { .. }) => true,
            (ResolvedType::Pointer { .. }, ResolvedType::Int)
            | (ResolvedType::Int, ResolvedType::Pointer { .. }) => true,
            (ResolvedType::Smart { .. }, ResolvedType::Smart { .. }) => true,
            (ResolvedType::Smart { .. }, ResolvedType::Pointer { .. })
            | (ResolvedType::Pointer { .. }, ResolvedType::Smart { .. }) => true,
            _ => false,
        }
    }

    /// Replaces generic parameter names with the concrete types bound to them.
    pub fn substitute(&self, bindings: &HashMap<String, ResolvedType>) -> ResolvedType {
        match self {
            ResolvedType::Named(name) => match bindings.get(name) {
                Some(bound) => bound.clone(),
                None => self.clone(),
            },
            ResolvedType::Array(element) => {
                ResolvedType::Array(Box::new(element.substitute(bindings)))
            }
            ResolvedType::Pointer { pointee, is_unsafe } => {
                ResolvedType::pointer(pointee.substitute(bindings), *is_unsafe)
            }
            ResolvedType::Reference(base) => {
                ResolvedType::Reference(Box::new(base.substitute(bindings)))
            }
            ResolvedType::Function {
                return_type,
                params,
            } => ResolvedType::function(
                return_type.substitute(bindings),
                params.iter().map(|param| param.substitute(bindings)).collect(),
            ),
            ResolvedType::Smart { pointee, kind } => ResolvedType::Smart {
                pointee: Box::new(pointee.substitute(bindings)),
                kind: *kind,
            },
            ResolvedType::Union(left, right) => {
                ResolvedType::union(left.substitute(bindings), right.substitute(bindings))
            }
            ResolvedType::Template { name, args } => ResolvedType::Template {
                name: name.clone(),
                args: args.iter().map(|arg| arg.substitute(bindings)).collect(),
            },
            _ => self.clone(),
        }
    }

    /// Binds generic parameter names in `self` by matching it against `actual`.
    pub fn infer_bindings(
        &self,
        actual: &ResolvedType,
        generic_params: &[String],
        bindings: &mut HashMap<String, ResolvedType>,
    ) {
        match (self, actual.dereferenced()) {
            (ResolvedType::Named(name), actual) if generic_params.contains(name) => {
                bindings.entry(name.clone()).or_insert_with(|| actual.clone());
            }
            (ResolvedType::Reference(base), actual) => {
                base.infer_bindings(actual, generic_params, bindings)
            }
            (ResolvedType::Array(element), ResolvedType::Array(actual_element)) => {
                element.infer_bindings(actual_element, generic_params, bindings)
            }
            (
                ResolvedType::Pointer { pointee, .. },
                ResolvedType::Pointer {
                    pointee: actual_pointee,
                    ..
                },
            )
            | (
                ResolvedType::Smart { pointee, .. },
                ResolvedType::Smart {
                    pointee: actual_pointee,
                    ..
                },
            ) => pointee.infer_bindings(actual_pointee, generic_params, bindings),
            (
                ResolvedType::Template { args, .. },
                ResolvedType::Template {
                    args: actual_args, ..
                },
            ) => {
                for (arg, actual_arg) in args.iter().zip(actual_args.iter()) {
                    arg.infer_bindings(actual_arg, generic_params, bindings);
                }
            }
            _ => {}
        }
    }
}
