//! Member tables for nominal types and namespaces.
//!
//! These are filled during hoisting so member accesses and constructor calls
//! may refer to types declared later in the unit.

use std::collections::{HashMap, HashSet};

use super::resolved_type::ResolvedType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

#[derive(Debug, Clone)]
pub struct TypeMembers {
    pub kind: TypeKind,
    /// Fields, methods and properties by name. Methods are `Function` types.
    pub members: HashMap<String, ResolvedType>,
    /// Constructor parameter types, when the class declares one.
    pub constructor: Option<Vec<ResolvedType>>,
    /// Base class followed by extended interfaces.
    pub bases: Vec<String>,
    pub generic_params: Vec<String>,
}

impl TypeMembers {
    pub fn new(kind: TypeKind) -> Self {
        TypeMembers {
            kind,
            members: HashMap::new(),
            constructor: None,
            bases: vec![],
            generic_params: vec![],
        }
    }

    /// Maps this type's generic parameters onto `args`.
    pub fn bindings(&self, args: &[ResolvedType]) -> HashMap<String, ResolvedType> {
        self.generic_params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemberTable {
    types: HashMap<String, TypeMembers>,
    namespaces: HashMap<String, HashMap<String, ResolvedType>>,
}

impl MemberTable {
    pub fn new() -> Self {
        MemberTable::default()
    }

    pub fn register_type(&mut self, name: &str, members: TypeMembers) {
        self.types.insert(name.to_string(), members);
    }

    pub fn get(&self, name: &str) -> Option<&TypeMembers> {
        self.types.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeMembers> {
        self.types.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        matches!(self.types.get(name), Some(info) if info.kind == TypeKind::Enum)
    }

    /// Finds `member` on `type_name` or any of its bases.
    ///
    /// Generic parameters of the owning type are replaced with `args`.
    pub fn lookup_member(
        &self,
        type_name: &str,
        member: &str,
        args: &[ResolvedType],
    ) -> Option<ResolvedType> {
        let mut visited = HashSet::new();
        self.lookup_member_in(type_name, member, args, &mut visited)
    }

    fn lookup_member_in(
        &self,
        type_name: &str,
        member: &str,
        args: &[ResolvedType],
        visited: &mut HashSet<String>,
    ) -> Option<ResolvedType> {
        if !visited.insert(type_name.to_string()) {
            return None;
        }

        let info = self.types.get(type_name)?;
        if let Some(found) = info.members.get(member) {
            return Some(found.substitute(&info.bindings(args)));
        }

        info.bases
            .iter()
            .find_map(|base| self.lookup_member_in(base, member, &[], visited))
    }

    pub fn register_namespace(&mut self, name: &str) {
        self.namespaces.entry(name.to_string()).or_default();
    }

    pub fn is_namespace(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    pub fn add_namespace_member(&mut self, namespace: &str, name: &str, ty: ResolvedType) {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(name.to_string(), ty);
    }

    pub fn namespace_member(&self, namespace: &str, name: &str) -> Option<&ResolvedType> {
        self.namespaces.get(namespace)?.get(name)
    }
}
