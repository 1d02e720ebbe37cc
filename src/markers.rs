//! Recognized marker annotations and declaration lookup.

use std::fmt;

use crate::models::TaggedDeclaration;

/// Marker annotations understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `@SharpComponent(modules, dependencies, sharpDependencies, provides)`
    Component,
    /// `@SharpScope`: generate a dedicated scope for the component.
    Scope,
    /// `@NoScope`: leave the component unscoped.
    NoScope,
}

impl Marker {
    /// All markers, in the order they are registered with the host.
    pub fn all() -> &'static [Marker] {
        &[Marker::Component, Marker::Scope, Marker::NoScope]
    }

    /// Simple name of the annotation type.
    pub fn simple_name(&self) -> &'static str {
        match self {
            Marker::Component => "SharpComponent",
            Marker::Scope => "SharpScope",
            Marker::NoScope => "NoScope",
        }
    }

    /// Qualified annotation type name inside `package`.
    pub fn qualified_name(&self, package: &str) -> String {
        format!("{}.{}", package, self.simple_name())
    }

    /// Member names of the `SharpComponent` annotation.
    pub const MODULES: &'static str = "modules";
    pub const DEPENDENCIES: &'static str = "dependencies";
    pub const SHARP_DEPENDENCIES: &'static str = "sharpDependencies";
    pub const PROVIDES: &'static str = "provides";
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}

/// Qualified marker names for one marker package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    package: String,
}

impl MarkerSet {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    pub fn name(&self, marker: Marker) -> String {
        marker.qualified_name(&self.package)
    }

    /// Returns true if `declaration` carries `marker`.
    pub fn is_tagged(&self, declaration: &TaggedDeclaration, marker: Marker) -> bool {
        declaration.has_annotation(&self.name(marker))
    }
}

/// Host-side discovery of tagged declarations.
///
/// Implementations return declarations in discovery order; the generator
/// processes them in that order.
pub trait DeclarationSource {
    /// Every declaration carrying the annotation with the given qualified name.
    fn annotated_with(&self, annotation: &str) -> Vec<&TaggedDeclaration>;
}

impl DeclarationSource for [TaggedDeclaration] {
    fn annotated_with(&self, annotation: &str) -> Vec<&TaggedDeclaration> {
        self.iter()
            .filter(|decl| decl.has_annotation(annotation))
            .collect()
    }
}

impl DeclarationSource for Vec<TaggedDeclaration> {
    fn annotated_with(&self, annotation: &str) -> Vec<&TaggedDeclaration> {
        self.as_slice().annotated_with(annotation)
    }
}
