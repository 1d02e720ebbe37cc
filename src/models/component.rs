//! The component model extracted from one tagged class.

use serde::{Deserialize, Serialize};

use super::TypeRef;

/// The scope information found on a declaration, before any policy is
/// applied. Every combination the host can report maps to exactly one
/// variant or is rejected by the model builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum ScopeInput {
    /// No scope marker and no scope annotation.
    Absent,
    /// Explicit `NoScope` marker.
    NoScope,
    /// Explicit `SharpScope` marker.
    Sharp,
    /// A scope annotation declared elsewhere.
    External(TypeRef),
}

/// How the generated component is scoped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum ScopeResolution {
    /// Annotate the component with an existing scope type.
    External(TypeRef),
    /// Generate a scope type for this component and annotate with it.
    Synthesize,
    /// Leave the component unscoped.
    Unscoped,
}

/// Structured representation of one tagged class.
///
/// List entries are kept as the host reported them and are resolved to
/// [`TypeRef`]s when the artifact is assembled, so an unresolvable entry
/// only fails the model that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentModel {
    /// The annotated class; also the injection target.
    pub target: TypeRef,
    pub scope: ScopeResolution,
    pub modules: Vec<String>,
    pub dependencies: Vec<String>,
    pub sharp_dependencies: Vec<String>,
    pub provides: Vec<String>,
}

impl ComponentModel {
    /// Generated artifacts always live in the target's package.
    pub fn package(&self) -> &str {
        self.target.package()
    }

    pub fn simple_name(&self) -> &str {
        self.target.simple_name()
    }
}
