use std::fmt::Display;

use thiserror::Error;

use crate::SourceLocation;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: SourceLocation,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: SourceLocation) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &SourceLocation {
        &self.position
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The message a diagnostic built from this error carries.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::InternalFault { .. } => "InternalFault",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::InitializerMismatch { .. } => "InitializerMismatch",
            ErrorImpl::MissingTypeOrInitializer { .. } => "MissingTypeOrInitializer",
            ErrorImpl::FieldMissingTypeOrInitializer { .. } => "FieldMissingTypeOrInitializer",
            ErrorImpl::FieldInitializerMismatch { .. } => "FieldInitializerMismatch",
            ErrorImpl::DefaultValueMismatch { .. } => "DefaultValueMismatch",
            ErrorImpl::EnumValueMismatch { .. } => "EnumValueMismatch",
            ErrorImpl::ConditionNotBoolean { .. } => "ConditionNotBoolean",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
            ErrorImpl::ContinueOutsideLoop => "ContinueOutsideLoop",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::NonIterable { .. } => "NonIterable",
            ErrorImpl::CaseTypeMismatch { .. } => "CaseTypeMismatch",
            ErrorImpl::EmptyAssembly => "EmptyAssembly",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::CompoundAssignmentMismatch { .. } => "CompoundAssignmentMismatch",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::UndefinedIdentifier { .. } => "UndefinedIdentifier",
            ErrorImpl::UndefinedType { .. } => "UndefinedType",
            ErrorImpl::UndefinedQualifiedType { .. } => "UndefinedQualifiedType",
            ErrorImpl::UndefinedClass { .. } => "UndefinedClass",
            ErrorImpl::InvalidCast { .. } => "InvalidCast",
            ErrorImpl::IndexNonArray { .. } => "IndexNonArray",
            ErrorImpl::IndexNotInteger { .. } => "IndexNotInteger",
            ErrorImpl::ArraySizeNotInteger { .. } => "ArraySizeNotInteger",
            ErrorImpl::EmptyArrayLiteral => "EmptyArrayLiteral",
            ErrorImpl::ArrayElementMismatch { .. } => "ArrayElementMismatch",
            ErrorImpl::ConditionalBranchMismatch { .. } => "ConditionalBranchMismatch",
            ErrorImpl::ThisOutsideClass => "ThisOutsideClass",
            ErrorImpl::UnknownMember { .. } => "UnknownMember",
            ErrorImpl::InvalidMemberAccess { .. } => "InvalidMemberAccess",
            ErrorImpl::TemplateBaseNotNamed { .. } => "TemplateBaseNotNamed",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Add a closing `\"` before the end of the line"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comments must be closed with `*/`"))
            }
            ErrorImpl::UnexpectedToken { token, .. } => {
                ErrorTip::Suggestion(format!("Found `{}` here", token))
            }
            ErrorImpl::InternalFault { .. } => ErrorTip::None,
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this scope, pick another name",
                variable
            )),
            ErrorImpl::InitializerMismatch { expected, received }
            | ErrorImpl::FieldInitializerMismatch { expected, received }
            | ErrorImpl::DefaultValueMismatch { expected, received }
            | ErrorImpl::EnumValueMismatch { expected, received }
            | ErrorImpl::ReturnTypeMismatch { expected, received }
            | ErrorImpl::CaseTypeMismatch { expected, received }
            | ErrorImpl::ArgumentTypeMatchError { expected, received }
            | ErrorImpl::CompoundAssignmentMismatch { expected, received }
            | ErrorImpl::ArrayElementMismatch { expected, received } => ErrorTip::Suggestion(
                format!("Expected type `{}`, received `{}`", expected, received),
            ),
            ErrorImpl::MissingTypeOrInitializer { name }
            | ErrorImpl::FieldMissingTypeOrInitializer { name } => ErrorTip::Suggestion(format!(
                "Annotate `{}` with a type or give it an initial value",
                name
            )),
            ErrorImpl::ConditionNotBoolean { received, .. } => {
                ErrorTip::Suggestion(format!("Condition has type `{}`", received))
            }
            ErrorImpl::BreakOutsideLoop
            | ErrorImpl::ContinueOutsideLoop
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::EmptyAssembly
            | ErrorImpl::EmptyArrayLiteral
            | ErrorImpl::ThisOutsideClass => ErrorTip::None,
            ErrorImpl::NonIterable { received } => {
                ErrorTip::Suggestion(format!("`{}` is not an array type", received))
            }
            ErrorImpl::InvalidOperands {
                operator,
                left,
                right,
                ..
            } => ErrorTip::Suggestion(format!(
                "`{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::InvalidOperand {
                operator, operand, ..
            } => ErrorTip::Suggestion(format!(
                "`{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::TypeMatchError { .. } => ErrorTip::None,
            ErrorImpl::NotCallable { received } => {
                ErrorTip::Suggestion(format!("Callee has type `{}`", received))
            }
            ErrorImpl::ArgumentCountMismatch { .. } => ErrorTip::None,
            ErrorImpl::UndefinedIdentifier { name } => ErrorTip::Suggestion(format!(
                "Declare `{}` before using it",
                name
            )),
            ErrorImpl::UndefinedType { .. }
            | ErrorImpl::UndefinedQualifiedType { .. }
            | ErrorImpl::UndefinedClass { .. } => ErrorTip::Suggestion(String::from(
                "Types must be declared with class, interface, enum or typedef",
            )),
            ErrorImpl::InvalidCast { .. } => ErrorTip::None,
            ErrorImpl::IndexNonArray { .. } => ErrorTip::None,
            ErrorImpl::IndexNotInteger { received } => {
                ErrorTip::Suggestion(format!("Index has type `{}`", received))
            }
            ErrorImpl::ArraySizeNotInteger { received } => {
                ErrorTip::Suggestion(format!("Size has type `{}`", received))
            }
            ErrorImpl::ConditionalBranchMismatch { then_type, else_type } => ErrorTip::Suggestion(
                format!("Branches have types `{}` and `{}`", then_type, else_type),
            ),
            ErrorImpl::UnknownMember { .. } => ErrorTip::None,
            ErrorImpl::InvalidMemberAccess { .. } => ErrorTip::None,
            ErrorImpl::TemplateBaseNotNamed { received } => {
                ErrorTip::Suggestion(format!("Base has type `{}`", received))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Tokenizer
    #[error("Unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Unterminated block comment")]
    UnterminatedComment,

    // Parser
    #[error("{message}")]
    UnexpectedToken { token: String, message: String },

    #[error("Unexpected error during compilation: {message}")]
    InternalFault { message: String },

    // Declarations
    #[error("Variable '{variable}' is already declared in this scope")]
    VariableAlreadyDeclared { variable: String },
    #[error("Initializer type doesn't match variable type")]
    InitializerMismatch { expected: String, received: String },
    #[error("Variable declaration needs either a type or an initializer for type inference")]
    MissingTypeOrInitializer { name: String },
    #[error("Field must have either explicit type or initializer")]
    FieldMissingTypeOrInitializer { name: String },
    #[error("Field initializer type doesn't match field type")]
    FieldInitializerMismatch { expected: String, received: String },
    #[error("Parameter default value type mismatch")]
    DefaultValueMismatch { expected: String, received: String },
    #[error("Enum member value must be compatible with underlying type")]
    EnumValueMismatch { expected: String, received: String },

    // Statements
    #[error("{construct} condition must be convertible to boolean")]
    ConditionNotBoolean { construct: String, received: String },
    #[error("Break statement must be inside a loop or switch")]
    BreakOutsideLoop,
    #[error("Continue statement must be inside a loop")]
    ContinueOutsideLoop,
    #[error("Return statement outside of a function")]
    ReturnOutsideFunction,
    #[error("Return value type doesn't match function return type")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("For-of requires an iterable type")]
    NonIterable { received: String },
    #[error("Case value type doesn't match switch expression type")]
    CaseTypeMismatch { expected: String, received: String },
    #[error("Assembly statement cannot have empty code")]
    EmptyAssembly,

    // Operators
    #[error("{requirement}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
        requirement: String,
    },
    #[error("{requirement}")]
    InvalidOperand {
        operator: String,
        operand: String,
        requirement: String,
    },
    #[error("Cannot assign {received} to {expected}")]
    TypeMatchError { expected: String, received: String },
    #[error("Result of compound assignment is not assignable to target")]
    CompoundAssignmentMismatch { expected: String, received: String },

    // Calls
    #[error("Cannot call non-function type")]
    NotCallable { received: String },
    #[error("Wrong number of arguments: expected {expected}, received {received}")]
    ArgumentCountMismatch { expected: usize, received: usize },
    #[error("Argument type mismatch")]
    ArgumentTypeMatchError { expected: String, received: String },

    // Name resolution
    #[error("Undefined identifier: {name}")]
    UndefinedIdentifier { name: String },
    #[error("Undefined type: {name}")]
    UndefinedType { name: String },
    #[error("Undefined qualified type: {path}")]
    UndefinedQualifiedType { path: String },
    #[error("Undefined class: {name}")]
    UndefinedClass { name: String },

    // Expressions
    #[error("Invalid cast from {from} to {to}")]
    InvalidCast { from: String, to: String },
    #[error("Cannot index non-array type")]
    IndexNonArray { received: String },
    #[error("Array index must be an integer")]
    IndexNotInteger { received: String },
    #[error("Array size must be an integer")]
    ArraySizeNotInteger { received: String },
    #[error("Cannot determine type of empty array literal")]
    EmptyArrayLiteral,
    #[error("Array elements must have compatible types")]
    ArrayElementMismatch { expected: String, received: String },
    #[error("Conditional expression branches have incompatible types")]
    ConditionalBranchMismatch { then_type: String, else_type: String },
    #[error("'this' can only be used inside a class")]
    ThisOutsideClass,
    #[error("Type '{type_name}' has no member '{member}'")]
    UnknownMember { type_name: String, member: String },
    #[error("Cannot access member '{member}' on type {type_name}")]
    InvalidMemberAccess { type_name: String, member: String },
    #[error("Template base type must be a named type")]
    TemplateBaseNotNamed { received: String },
}
