/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The compilation unit and its top-level nodes
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for the statement variants
/// - declarations: Definitions for the declaration variants
/// - types: Definitions for type annotations in the AST
/// - printer: Indented textual dump of a unit
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
