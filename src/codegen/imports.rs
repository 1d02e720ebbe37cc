//! Import resolution for a single compilation unit.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::TypeRef;

const IMPLICIT_PACKAGE: &str = "java.lang";

/// Decides, for every type referenced by a file, whether it is written by
/// simple name (imported, same package or `java.lang`) or fully qualified.
///
/// Each simple name is bound to at most one top-level type. The declared
/// type and types of the file's own package bind first, then the remaining
/// types in order of first reference; later types whose simple name is
/// taken are written qualified. Nested types go through their top-level
/// type and are written `Outer.Inner`.
#[derive(Debug, Clone)]
pub struct ImportScope {
    bindings: BTreeMap<String, TypeRef>,
    imports: BTreeSet<String>,
}

impl ImportScope {
    pub fn new<'a>(declared: &TypeRef, referenced: impl IntoIterator<Item = &'a TypeRef>) -> Self {
        let mut scope = Self {
            bindings: BTreeMap::new(),
            imports: BTreeSet::new(),
        };
        scope.bind(declared);

        let package = declared.package();
        let (local, foreign): (Vec<&TypeRef>, Vec<&TypeRef>) = referenced
            .into_iter()
            .partition(|ty| ty.package() == package);

        for ty in local {
            scope.bind(ty);
        }
        for ty in foreign {
            let top = ty.top_level();
            if scope.bind(&top) && top.package() != IMPLICIT_PACKAGE && !top.package().is_empty() {
                scope.imports.insert(top.qualified_name());
            }
        }
        scope
    }

    /// Binds the simple name of the top-level type of `ty` if it is free.
    /// Returns true only for a new binding.
    fn bind(&mut self, ty: &TypeRef) -> bool {
        let top = ty.top_level();
        if self.bindings.contains_key(top.simple_name()) {
            return false;
        }
        self.bindings.insert(top.simple_name().to_string(), top);
        true
    }

    /// How `ty` is written in the file body.
    pub fn name(&self, ty: &TypeRef) -> String {
        let top = ty.top_level();
        match self.bindings.get(top.simple_name()) {
            Some(bound) if *bound == top => ty.nested_name(),
            _ => ty.qualified_name(),
        }
    }

    /// Import statements, sorted.
    pub fn imports(&self) -> Vec<&str> {
        self.imports.iter().map(String::as_str).collect()
    }
}
