//! Generated type names.
//!
//! Names come from single-placeholder patterns applied to the simple name of
//! the annotated class (`Sharp%sComponent`, `Sharp%sScope`). Sharp
//! dependencies are named through a [`NameTable`] filled from every model of
//! the run before any artifact is assembled.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Config;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{is_java_identifier, ComponentModel, TypeRef};

/// Placeholder replaced by the annotated class's simple name.
pub const PLACEHOLDER: &str = "%s";

/// Derives generated names from the configured patterns.
#[derive(FromContext, Clone)]
pub struct NamingResolver {
    config: Arc<Config>,
}

impl NamingResolver {
    /// Checks that both patterns hold exactly one placeholder and produce
    /// valid Java identifiers.
    pub fn validate(&self) -> Result<(), AppError> {
        let naming = &self.config.naming;
        for (key, pattern) in [
            ("naming.component_pattern", &naming.component_pattern),
            ("naming.scope_pattern", &naming.scope_pattern),
        ] {
            let placeholders = pattern.matches(PLACEHOLDER).count();
            if placeholders != 1 {
                return Err(AppError::Initialization(format!(
                    "{} '{}' must contain exactly one '{}' (found {})",
                    key, pattern, PLACEHOLDER, placeholders
                )));
            }
            if !is_java_identifier(&apply(pattern, "Sample")) {
                return Err(AppError::Initialization(format!(
                    "{} '{}' does not produce a valid Java identifier",
                    key, pattern
                )));
            }
        }
        if naming.component_pattern == naming.scope_pattern {
            return Err(AppError::Initialization(
                "naming.component_pattern and naming.scope_pattern must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// `com.example.Foo` → `com.example.SharpFooComponent`
    pub fn component_name(&self, target: &TypeRef) -> TypeRef {
        target.with_simple_name(apply(
            &self.config.naming.component_pattern,
            target.simple_name(),
        ))
    }

    /// `com.example.Foo` → `com.example.SharpFooScope`
    pub fn scope_name(&self, target: &TypeRef) -> TypeRef {
        target.with_simple_name(apply(&self.config.naming.scope_pattern, target.simple_name()))
    }

    /// Records the generated component name of every model.
    pub fn name_table(&self, models: &[ComponentModel]) -> NameTable {
        let mut table = NameTable::default();
        for model in models {
            table.record(&model.target, self.component_name(&model.target));
        }
        table
    }

    /// Generated component name of a sharp dependency.
    ///
    /// Looks the dependency up in `table`; a dependency that is not a
    /// component of this run falls back to applying the component pattern
    /// to its own simple name.
    pub fn sharp_dependency(&self, dependency: &TypeRef, table: &NameTable) -> SharpName {
        match table.get(dependency) {
            Some(generated) => SharpName::Recorded(generated.clone()),
            None => SharpName::Derived(self.component_name(dependency)),
        }
    }
}

fn apply(pattern: &str, simple_name: &str) -> String {
    pattern.replacen(PLACEHOLDER, simple_name, 1)
}

/// Outcome of naming a sharp dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharpName {
    /// The dependency is a component of this run.
    Recorded(TypeRef),
    /// The dependency was not seen in this run; the name is derived from
    /// the pattern alone.
    Derived(TypeRef),
}

impl SharpName {
    pub fn type_ref(&self) -> &TypeRef {
        match self {
            SharpName::Recorded(ty) | SharpName::Derived(ty) => ty,
        }
    }
}

/// Annotated class → generated component name, for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: BTreeMap<String, TypeRef>,
}

impl NameTable {
    pub fn record(&mut self, original: &TypeRef, generated: TypeRef) {
        self.names.insert(original.qualified_name(), generated);
    }

    pub fn get(&self, original: &TypeRef) -> Option<&TypeRef> {
        self.names.get(&original.qualified_name())
    }
}
