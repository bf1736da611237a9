use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    SourceLocation,
};

use super::resolved_type::ResolvedType;

/// One lexical frame. Variables, functions and types live in separate
/// namespaces, so a variable never shadows a type of the same name.
#[derive(Debug, Default)]
pub struct Scope {
    pub variables: HashMap<String, ResolvedType>,
    pub functions: HashMap<String, ResolvedType>,
    pub types: HashMap<String, ResolvedType>,
    /// Type parameter names of the generic functions declared in this frame.
    pub generics: HashMap<String, Vec<String>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }
}

/// A stack of frames. The bottom frame is the global scope and is never popped.
#[derive(Debug)]
pub struct ScopeTable {
    frames: Vec<Scope>,
}

impl Default for ScopeTable {
    fn default() -> Self {
        ScopeTable::new()
    }
}

impl ScopeTable {
    pub fn new() -> Self {
        ScopeTable {
            frames: vec![Scope::new()],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self) {
        self.frames.push(Scope::new());
    }

    /// Returns to the parent frame.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    fn current(&mut self) -> &mut Scope {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn global(&mut self) -> &mut Scope {
        &mut self.frames[0]
    }

    /// Declares a variable in the innermost frame.
    ///
    /// # Returns
    ///
    /// `Err` with `VariableAlreadyDeclared` when the frame already holds `name`.
    pub fn declare_variable(
        &mut self,
        name: &str,
        ty: ResolvedType,
        location: &SourceLocation,
    ) -> Result<(), Error> {
        let scope = self.current();
        if scope.variables.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.to_string(),
                },
                location.clone(),
            ));
        }

        scope.variables.insert(name.to_string(), ty);
        Ok(())
    }

    pub fn declare_function(&mut self, name: &str, ty: ResolvedType) {
        self.current().functions.insert(name.to_string(), ty);
    }

    /// Records the type parameters of a function declared in the innermost frame.
    pub fn declare_generics(&mut self, name: &str, params: Vec<String>) {
        self.current().generics.insert(name.to_string(), params);
    }

    pub fn declare_global_generics(&mut self, name: &str, params: Vec<String>) {
        self.global().generics.insert(name.to_string(), params);
    }

    pub fn declare_type(&mut self, name: &str, ty: ResolvedType) {
        self.current().types.insert(name.to_string(), ty);
    }

    pub fn declare_global_type(&mut self, name: &str, ty: ResolvedType) {
        self.global().types.insert(name.to_string(), ty);
    }

    pub fn declare_global_function(&mut self, name: &str, ty: ResolvedType) {
        self.global().functions.insert(name.to_string(), ty);
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&ResolvedType> {
        self.frames
            .iter()
            .rev()
            .find_map(|scope| scope.variables.get(name))
    }

    pub fn lookup_function(&self, name: &str) -> Option<&ResolvedType> {
        self.frames
            .iter()
            .rev()
            .find_map(|scope| scope.functions.get(name))
    }

    /// Type parameters of the function `name` resolves to. A non-generic
    /// function in an inner frame hides a generic one further out.
    pub fn lookup_generics(&self, name: &str) -> Option<&Vec<String>> {
        self.frames
            .iter()
            .rev()
            .find(|scope| scope.functions.contains_key(name))
            .and_then(|scope| scope.generics.get(name))
    }

    pub fn lookup_type(&self, name: &str) -> Option<&ResolvedType> {
        self.frames
            .iter()
            .rev()
            .find_map(|scope| scope.types.get(name))
    }
}
